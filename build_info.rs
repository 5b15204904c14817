//! Build identification shared by the noticias binaries
//!
//! Both `noticias-merge` and `noticias-site` point their `build` key at this
//! file. It exposes to `env!`:
//! - `GIT_HASH`: `git describe` of the checkout, `-dirty` when modified
//! - `BUILD_TIMESTAMP`: UTC, second resolution
//! - `BUILD_PROFILE`: cargo profile (debug/release)

use std::process::Command;

const UNKNOWN: &str = "unknown";

/// Trimmed stdout of a successful git invocation
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn main() {
    let build_info = [
        (
            "GIT_HASH",
            git(&["describe", "--always", "--dirty", "--abbrev=8"])
                .unwrap_or_else(|| UNKNOWN.to_string()),
        ),
        (
            "BUILD_TIMESTAMP",
            chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        ),
        (
            "BUILD_PROFILE",
            std::env::var("PROFILE").unwrap_or_else(|_| UNKNOWN.to_string()),
        ),
    ];

    for (key, value) in build_info {
        println!("cargo:rustc-env={}={}", key, value);
    }
    // no rerun-if-changed: the script runs on every build so the hash stays current
}
