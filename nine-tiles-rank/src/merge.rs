//! Combines the per-worker shard files left by `nine-tiles-enumerate` into
//! one in-memory relation.

use std::path::Path;

use nine_tiles_core::error::MergeError;
use nine_tiles_core::PackedRow;
use zerocopy::FromBytes;

pub fn load_shards(dir: &Path) -> Result<Vec<PackedRow>, MergeError> {
    let row_size = size_of::<PackedRow>();
    let mut rows = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("bin") {
            continue;
        }
        let bytes = std::fs::read(&path)?;
        if bytes.len() % row_size != 0 {
            return Err(MergeError::SchemaMismatch {
                path: path.display().to_string(),
                expected: row_size,
                found: bytes.len() % row_size,
            });
        }
        for chunk in bytes.chunks_exact(row_size) {
            let row = PackedRow::ref_from_bytes(chunk).expect("chunk is exactly one row's size");
            rows.push(*row);
        }
    }
    Ok(rows)
}
