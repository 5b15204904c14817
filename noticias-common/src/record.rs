//! Article record model
//!
//! Records are kept as JSON objects so that fields the tools do not know about
//! survive a rewrite untouched (and in their original order). Typed accessors
//! cover the fields the pipeline reads or writes.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names used by the site data
pub mod fields {
    pub const TITLE: &str = "titular";
    pub const EMOTIONAL_CATEGORY: &str = "categoria_emocional";
    pub const PUBLISHED: &str = "fecha_publicacion";
    pub const CANONICAL_URL: &str = "url_canonical";
    pub const IMAGE_URL: &str = "url_imagen";
    pub const SUMMARY: &str = "resumen";
    pub const CONTEXT: &str = "contexto";
    pub const TIMELINE: &str = "linea_tiempo";
    pub const WHO_IS_WHO: &str = "quien_es_quien";
    pub const GLOSSARY: &str = "glosario_terminos";
    pub const EXPECTED_IMPACT: &str = "impacto_esperado";
    pub const COMPARISONS: &str = "comparativas";
}

/// Why a candidate value is not a usable record
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidRecord {
    #[error("expected an object, found {0}")]
    NotAnObject(&'static str),

    #[error("missing '{}' field", fields::TITLE)]
    MissingTitle,

    #[error("'{}' is not a string", fields::TITLE)]
    TitleNotString,

    #[error("'{}' is blank", fields::TITLE)]
    BlankTitle,
}

/// A well-formed article: a JSON object with a non-blank title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Accept a candidate value if it is an object with a non-blank `titular`
    pub fn try_from_value(value: Value) -> std::result::Result<Self, (InvalidRecord, Value)> {
        if let Err(reason) = Self::check(&value) {
            return Err((reason, value));
        }
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err((InvalidRecord::NotAnObject(json_kind(&other)), other)),
        }
    }

    /// Check validity without taking ownership
    pub fn check(value: &Value) -> std::result::Result<(), InvalidRecord> {
        let Some(map) = value.as_object() else {
            return Err(InvalidRecord::NotAnObject(json_kind(value)));
        };
        match map.get(fields::TITLE) {
            None | Some(Value::Null) => Err(InvalidRecord::MissingTitle),
            Some(Value::String(title)) if title.trim().is_empty() => Err(InvalidRecord::BlankTitle),
            Some(Value::String(_)) => Ok(()),
            Some(_) => Err(InvalidRecord::TitleNotString),
        }
    }

    /// Title (guaranteed non-blank)
    pub fn title(&self) -> &str {
        self.str_field(fields::TITLE).unwrap_or_default()
    }

    /// Canonical reference URL, if present and non-blank
    pub fn canonical_url(&self) -> Option<&str> {
        non_blank(self.str_field(fields::CANONICAL_URL))
    }

    /// Image URL, if present and non-blank
    pub fn image_url(&self) -> Option<&str> {
        non_blank(self.str_field(fields::IMAGE_URL))
    }

    pub fn set_image_url(&mut self, url: impl Into<String>) {
        self.0
            .insert(fields::IMAGE_URL.to_string(), Value::String(url.into()));
    }

    /// String value of a field
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// Canonical URL of a raw candidate, if present and non-blank
pub fn candidate_canonical_url(value: &Value) -> Option<&str> {
    non_blank(value.get(fields::CANONICAL_URL).and_then(Value::as_str))
}

/// Image URL of a raw candidate, if present and non-blank
pub fn candidate_image_url(value: &Value) -> Option<&str> {
    non_blank(value.get(fields::IMAGE_URL).and_then(Value::as_str))
}

/// Short name of a JSON value's type, for diagnostics
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Contents of the incoming batch file
///
/// The file has historically held either one article object or an array of
/// them. Both shapes are accepted here and nowhere else; callers work with the
/// normalized candidate sequence. The empty object `{}` is the placeholder
/// left after a merge and holds no candidates.
#[derive(Debug, Clone, PartialEq)]
pub enum IncomingBatch {
    /// A lone article object (or the `{}` placeholder)
    Single(Value),
    /// An array of candidate articles
    Many(Vec<Value>),
}

impl IncomingBatch {
    /// Classify a parsed batch document
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(_) => Ok(Self::Single(value)),
            Value::Array(values) => Ok(Self::Many(values)),
            other => Err(Error::InvalidInput(format!(
                "incoming batch must be an object or an array, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Value written over the batch file once it has been merged
    pub fn empty_placeholder() -> Value {
        Value::Object(Map::new())
    }

    /// Ordered candidates (a lone article becomes a one-element slice)
    pub fn candidates(&self) -> &[Value] {
        match self {
            Self::Single(value) if is_empty_object(value) => &[],
            Self::Single(value) => std::slice::from_ref(value),
            Self::Many(values) => values,
        }
    }

    pub fn candidates_mut(&mut self) -> std::slice::IterMut<'_, Value> {
        let slice: &mut [Value] = match self {
            Self::Single(value) if is_empty_object(value) => &mut [],
            Self::Single(value) => std::slice::from_mut(value),
            Self::Many(values) => values.as_mut_slice(),
        };
        slice.iter_mut()
    }

    pub fn into_candidates(self) -> Vec<Value> {
        match self {
            Self::Single(value) if is_empty_object(&value) => Vec::new(),
            Self::Single(value) => vec![value],
            Self::Many(values) => values,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.candidates().is_empty()
    }

    /// Document to write back, in the shape it was read
    pub fn to_value(&self) -> Value {
        match self {
            Self::Single(value) => value.clone(),
            Self::Many(values) => Value::Array(values.clone()),
        }
    }
}

fn is_empty_object(value: &Value) -> bool {
    value.as_object().is_some_and(Map::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_requires_non_blank_string_title() {
        assert!(Record::try_from_value(json!({"titular": "Hola"})).is_ok());

        let cases = [
            (json!(null), InvalidRecord::NotAnObject("null")),
            (json!("titular"), InvalidRecord::NotAnObject("string")),
            (json!([{"titular": "A"}]), InvalidRecord::NotAnObject("array")),
            (json!({"foo": "bar"}), InvalidRecord::MissingTitle),
            (json!({"titular": null}), InvalidRecord::MissingTitle),
            (json!({"titular": "  \t "}), InvalidRecord::BlankTitle),
            (json!({"titular": 7}), InvalidRecord::TitleNotString),
        ];
        for (value, expected) in cases {
            assert_eq!(Record::check(&value), Err(expected.clone()));
            let (reason, returned) = Record::try_from_value(value.clone()).unwrap_err();
            assert_eq!(reason, expected);
            assert_eq!(returned, value);
        }
    }

    #[test]
    fn test_set_image_url_appends_field_last() {
        let mut record =
            Record::try_from_value(json!({"titular": "A", "url_canonical": "http://x"})).unwrap();
        assert_eq!(record.canonical_url(), Some("http://x"));
        assert_eq!(record.image_url(), None);

        record.set_image_url("http://img/a.png");
        let keys: Vec<&String> = record.as_map().keys().collect();
        assert_eq!(keys, ["titular", "url_canonical", "url_imagen"]);
        assert_eq!(record.image_url(), Some("http://img/a.png"));
    }

    #[test]
    fn test_batch_normalization() {
        let single = IncomingBatch::from_value(json!({"titular": "A"})).unwrap();
        assert_eq!(single.candidates(), &[json!({"titular": "A"})]);

        let many = IncomingBatch::from_value(json!([{"titular": "A"}, 3])).unwrap();
        assert_eq!(many.candidates().len(), 2);

        let placeholder = IncomingBatch::from_value(json!({})).unwrap();
        assert!(placeholder.is_empty());
        assert!(placeholder.into_candidates().is_empty());

        let empty_array = IncomingBatch::from_value(json!([])).unwrap();
        assert!(empty_array.is_empty());

        let err = IncomingBatch::from_value(json!("nope")).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_batch_keeps_shape_on_write_back() {
        let mut single = IncomingBatch::from_value(json!({"titular": "A"})).unwrap();
        for candidate in single.candidates_mut() {
            candidate["url_imagen"] = json!("http://img");
        }
        assert_eq!(single.to_value(), json!({"titular": "A", "url_imagen": "http://img"}));

        let many = IncomingBatch::from_value(json!([{"titular": "A"}])).unwrap();
        assert_eq!(many.to_value(), json!([{"titular": "A"}]));
    }
}
