//! Output directory numbering: each enumeration run gets a fresh
//! `solutions_<N>/` directory named after the highest numeric suffix
//! already present, the same convention the original solver used for its
//! Parquet output files.

use std::fs;
use std::path::{Path, PathBuf};

pub fn highest_numeric_suffix(base: &Path, prefix: &str) -> std::io::Result<Option<u32>> {
    if !base.exists() {
        return Ok(None);
    }
    let needle = format!("{prefix}_");
    let mut highest = None;
    for entry in fs::read_dir(base)? {
        let entry = entry?;
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            continue;
        };
        let Some(suffix) = name.strip_prefix(&needle) else {
            continue;
        };
        if let Ok(n) = suffix.parse::<u32>() {
            highest = Some(highest.map_or(n, |h: u32| h.max(n)));
        }
    }
    Ok(highest)
}

pub fn next_numbered_dir(base: &Path, prefix: &str) -> std::io::Result<PathBuf> {
    let next = highest_numeric_suffix(base, prefix)?.map_or(1, |n| n + 1);
    Ok(base.join(format!("{prefix}_{next}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_run_starts_at_one() {
        let dir = std::env::temp_dir().join("nine-tiles-enumerate-test-empty");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("create temp dir");
        let next = next_numbered_dir(&dir, "solutions").expect("ok");
        assert_eq!(next, dir.join("solutions_1"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn picks_highest_existing_suffix() {
        let dir = std::env::temp_dir().join("nine-tiles-enumerate-test-numbered");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("solutions_3")).expect("create temp dir");
        fs::create_dir_all(dir.join("solutions_7")).expect("create temp dir");
        fs::create_dir_all(dir.join("solutions_not_a_number")).expect("create temp dir");
        let next = next_numbered_dir(&dir, "solutions").expect("ok");
        assert_eq!(next, dir.join("solutions_8"));
        let _ = fs::remove_dir_all(&dir);
    }
}
