//! Command-line surface of noticias-merge

use crate::config::MergeOverrides;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for noticias-merge
#[derive(Parser, Debug)]
#[command(name = "noticias-merge")]
#[command(about = "Merge the incoming article batch into the site data store")]
#[command(version)]
pub struct Args {
    /// Sub-task to run
    #[arg(value_enum, default_value_t = Task::Merge)]
    pub task: Task,

    /// TOML configuration file
    #[arg(long, env = "NOTICIAS_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: MergeOverrides,
}

/// Sub-task selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Task {
    /// Fill url_imagen in the incoming batch from each article's og:image
    ExtractOgImage,
    /// Snapshot the store into the backup directory
    Backup,
    /// Full pipeline: backup, enrich, validate, append, reset batch
    Merge,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in [
            "NOTICIAS_CONFIG",
            "NOTICIAS_STORE",
            "NOTICIAS_BATCH",
            "NOTICIAS_BACKUP_DIR",
            "NOTICIAS_FALLBACK_IMAGE_URL",
            "NOTICIAS_FETCH_TIMEOUT_SECS",
            "NOTICIAS_DEDUP",
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_task_defaults_to_merge() {
        clear_env();
        let args = Args::try_parse_from(["noticias-merge"]).unwrap();
        assert_eq!(args.task, Task::Merge);
        assert!(args.overrides.store_path.is_none());
    }

    #[test]
    #[serial]
    fn test_recognized_task_names() {
        clear_env();
        for (name, task) in [
            ("extract-og-image", Task::ExtractOgImage),
            ("backup", Task::Backup),
            ("merge", Task::Merge),
        ] {
            let args = Args::try_parse_from(["noticias-merge", name]).unwrap();
            assert_eq!(args.task, task);
        }
    }

    #[test]
    #[serial]
    fn test_unrecognized_task_is_rejected() {
        clear_env();
        assert!(Args::try_parse_from(["noticias-merge", "publish"]).is_err());
    }

    #[test]
    #[serial]
    fn test_environment_fills_unset_flags() {
        clear_env();
        std::env::set_var("NOTICIAS_STORE", "/srv/site/_data/source.json");
        std::env::set_var("NOTICIAS_DEDUP", "skip-canonical");

        let args = Args::try_parse_from(["noticias-merge", "--batch", "in.json"]).unwrap();
        assert_eq!(
            args.overrides.store_path,
            Some(PathBuf::from("/srv/site/_data/source.json"))
        );
        assert_eq!(args.overrides.batch_path, Some(PathBuf::from("in.json")));
        assert_eq!(
            args.overrides.duplicate_policy,
            Some(crate::config::DuplicatePolicy::SkipCanonical)
        );

        // flag beats environment
        let args =
            Args::try_parse_from(["noticias-merge", "--store", "local.json"]).unwrap();
        assert_eq!(args.overrides.store_path, Some(PathBuf::from("local.json")));

        clear_env();
    }
}
