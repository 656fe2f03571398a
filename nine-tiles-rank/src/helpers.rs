//! Locates the most recently produced `solutions_<N>` directory, mirroring
//! the numbering convention `nine-tiles-enumerate` writes with.

use std::fs;
use std::path::{Path, PathBuf};

pub fn latest_numbered_dir(base: &Path, prefix: &str) -> anyhow::Result<PathBuf> {
    let needle = format!("{prefix}_");
    let mut best: Option<(u32, PathBuf)> = None;
    for entry in fs::read_dir(base)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            continue;
        };
        let Some(suffix) = name.strip_prefix(&needle) else {
            continue;
        };
        if let Ok(n) = suffix.parse::<u32>() {
            if best.as_ref().is_none_or(|(best_n, _)| n > *best_n) {
                best = Some((n, entry.path()));
            }
        }
    }
    best.map(|(_, path)| path)
        .ok_or_else(|| anyhow::anyhow!("no `{prefix}_<N>` directory found under {}", base.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_highest_suffix() {
        let dir = std::env::temp_dir().join("nine-tiles-rank-test-latest");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("solutions_2")).expect("create temp dir");
        fs::create_dir_all(dir.join("solutions_10")).expect("create temp dir");
        let latest = latest_numbered_dir(&dir, "solutions").expect("found one");
        assert_eq!(latest, dir.join("solutions_10"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn errors_when_nothing_matches() {
        let dir = std::env::temp_dir().join("nine-tiles-rank-test-empty");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("create temp dir");
        assert!(latest_numbered_dir(&dir, "solutions").is_err());
        let _ = fs::remove_dir_all(&dir);
    }
}
