use super::*;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};

pub const DEFAULT_CHUNK_SIZE: u64 = 1024 * 1024;

const BOUNDARY_PROBE: usize = 4096;

/// Byte range of one log file, ending on a line boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub start: u64,
    pub len: u64,
}

impl Chunk {
    pub fn end(&self) -> u64 {
        self.start + self.len
    }
}

/// Plans line-aligned chunks for one file. Planning is cheap and can be
/// repeated; every call to [`ChunkPlanner::chunks`] starts from offset 0.
#[derive(Debug, Clone)]
pub struct ChunkPlanner {
    path: PathBuf,
    chunk_size: u64,
}

impl ChunkPlanner {
    pub fn new(path: impl Into<PathBuf>, chunk_size: u64) -> ReplayResult<Self> {
        if chunk_size == 0 {
            return Err(ReplayError::InvalidChunkSize);
        }
        Ok(Self {
            path: path.into(),
            chunk_size,
        })
    }

    /// Gzip-rotated logs cannot be split by byte offset.
    pub fn is_compressed(&self) -> bool {
        is_gzip(&self.path)
    }

    pub fn chunks(&self) -> ReplayResult<Chunks> {
        let file = File::open(&self.path).map_err(|e| ReplayError::io(&self.path, e))?;
        let file_len = file
            .metadata()
            .map_err(|e| ReplayError::io(&self.path, e))?
            .len();
        let chunk_size = if self.is_compressed() {
            file_len.max(1)
        } else {
            self.chunk_size
        };

        Ok(Chunks {
            path: self.path.clone(),
            file,
            file_len,
            chunk_size,
            cursor: 0,
            probe: vec![0; BOUNDARY_PROBE],
        })
    }
}

pub fn is_gzip(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("gz")
}

pub struct Chunks {
    path: PathBuf,
    file: File,
    file_len: u64,
    chunk_size: u64,
    cursor: u64,
    probe: Vec<u8>,
}

impl Chunks {
    /// Offset just past the first `\n` at or after `from`, or end of file.
    fn next_boundary(&mut self, from: u64) -> std::io::Result<u64> {
        self.file.seek(SeekFrom::Start(from))?;
        let mut offset = from;
        loop {
            let read = self.file.read(&mut self.probe)?;
            if read == 0 {
                return Ok(self.file_len);
            }
            if let Some(pos) = self.probe[..read].iter().position(|&b| b == b'\n') {
                return Ok(offset + pos as u64 + 1);
            }
            offset += read as u64;
        }
    }
}

impl Iterator for Chunks {
    type Item = ReplayResult<Chunk>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.file_len {
            return None;
        }

        let start = self.cursor;
        let nominal_end = start.saturating_add(self.chunk_size);
        let end = if nominal_end >= self.file_len {
            self.file_len
        } else {
            // The byte before the nominal end may already be the newline
            match self.next_boundary(nominal_end - 1) {
                Ok(end) => end.min(self.file_len),
                Err(e) => {
                    self.cursor = self.file_len;
                    return Some(Err(ReplayError::io(&self.path, e)));
                }
            }
        };

        self.cursor = end;
        Some(Ok(Chunk {
            start,
            len: end - start,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn planned(contents: &[u8], chunk_size: u64) -> Vec<Chunk> {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        ChunkPlanner::new(file.path(), chunk_size)
            .unwrap()
            .chunks()
            .unwrap()
            .collect::<ReplayResult<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn empty_file_has_no_chunks() {
        assert!(planned(b"", 8).is_empty());
    }

    #[test]
    fn small_file_is_one_chunk() {
        assert_eq!(planned(b"a\nb\n", 1024), vec![Chunk { start: 0, len: 4 }]);
    }

    #[test]
    fn chunk_that_ends_on_newline_is_not_extended() {
        // "abc\n" is exactly four bytes
        let chunks = planned(b"abc\ndef\nghi", 4);
        assert_eq!(
            chunks,
            vec![
                Chunk { start: 0, len: 4 },
                Chunk { start: 4, len: 4 },
                Chunk { start: 8, len: 3 },
            ]
        );
    }

    #[test]
    fn long_line_spans_past_nominal_size() {
        let chunks = planned(b"0123456789\nx\n", 3);
        assert_eq!(chunks[0], Chunk { start: 0, len: 11 });
        assert_eq!(chunks[1], Chunk { start: 11, len: 2 });
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        assert!(matches!(
            ChunkPlanner::new("anything.log", 0),
            Err(ReplayError::InvalidChunkSize)
        ));
    }
}
