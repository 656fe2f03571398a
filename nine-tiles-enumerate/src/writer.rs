//! Buffered columnar row writer: accumulates `PackedRow`s and flushes them to
//! a worker-local file in fixed-size chunks.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use nine_tiles_core::PackedRow;
use zerocopy::IntoBytes;

pub struct ColumnarWriter {
    file: BufWriter<File>,
    chunk_size: usize,
    buffer: Vec<PackedRow>,
    rows_written: u64,
}

impl ColumnarWriter {
    pub fn create(path: &Path, chunk_size: usize) -> io::Result<Self> {
        Ok(Self {
            file: BufWriter::new(File::create(path)?),
            chunk_size,
            buffer: Vec::with_capacity(chunk_size),
            rows_written: 0,
        })
    }

    pub fn push(&mut self, row: PackedRow) -> io::Result<()> {
        self.buffer.push(row);
        if self.buffer.len() >= self.chunk_size {
            self.flush_chunk()?;
        }
        Ok(())
    }

    fn flush_chunk(&mut self) -> io::Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        for row in &self.buffer {
            self.file.write_all(row.as_bytes())?;
        }
        self.rows_written += self.buffer.len() as u64;
        tracing::debug!(rows_written = self.rows_written, "flushed chunk");
        self.buffer.clear();
        Ok(())
    }

    /// Flushes any remaining buffered rows and returns the total row count.
    pub fn finish(mut self) -> io::Result<u64> {
        self.flush_chunk()?;
        self.file.flush()?;
        Ok(self.rows_written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nine_tiles_core::{OrientedTile, StatRecord, NUM_CELLS};

    #[test]
    fn writes_rows_across_chunk_boundary() {
        let dir = std::env::temp_dir().join("nine-tiles-enumerate-writer-test");
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join("shard.bin");

        let mut writer = ColumnarWriter::create(&path, 2).expect("create writer");
        let row = PackedRow::new([OrientedTile::new(0, 0, 0); NUM_CELLS], StatRecord::default());
        for _ in 0..5 {
            writer.push(row).expect("push row");
        }
        let rows_written = writer.finish().expect("finish");
        assert_eq!(rows_written, 5);

        let bytes = std::fs::read(&path).expect("read shard");
        assert_eq!(bytes.len(), 5 * size_of::<PackedRow>());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
