//! Line counting for source files.
//!
//! Counting works on raw bytes: `\n`, `\r\n` and a lone `\r` each end one
//! line, and a trailing line without a terminator still counts. Since none
//! of the terminator bytes can occur inside a multi-byte UTF-8 sequence,
//! invalid or non-UTF-8 content never changes the result.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use tracing::debug;

const CHUNK_SIZE: usize = 64 * 1024;

/// Count the lines of a file, treating unreadable files as empty.
///
/// The file is streamed in fixed-size chunks, so its size doesn't matter.
///
/// # Examples
///
/// ```no_run
/// # use std::path::Path;
/// # use icp_mgr::tree::count_lines;
/// let lines = count_lines(Path::new("backend/lib.rs"));
/// println!("{lines} lines");
/// ```
#[must_use]
pub fn count_lines(path: &Path) -> usize {
    match count_file_lines(path) {
        Ok(lines) => lines,
        Err(e) => {
            debug!("Could not read {}: {e}", path.display());
            0
        }
    }
}

fn count_file_lines(path: &Path) -> io::Result<usize> {
    let mut reader = BufReader::with_capacity(CHUNK_SIZE, File::open(path)?);
    let mut counter = LineCounter::default();

    loop {
        let chunk = match reader.fill_buf() {
            Ok([]) => break,
            Ok(chunk) => chunk,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        counter.feed(chunk);

        let consumed = chunk.len();
        reader.consume(consumed);
    }

    Ok(counter.finish())
}

/// Count the lines in an in-memory buffer.
#[must_use]
pub fn count_lines_in(content: &[u8]) -> usize {
    let mut counter = LineCounter::default();
    counter.feed(content);
    counter.finish()
}

/// Incremental terminator counting, fed one chunk at a time.
#[derive(Debug, Default)]
struct LineCounter {
    lines: usize,

    /// Bytes were seen since the last terminator.
    open_line: bool,

    /// The last byte was `\r`; a following `\n` belongs to the same terminator.
    after_cr: bool,
}

impl LineCounter {
    fn feed(&mut self, chunk: &[u8]) {
        for &byte in chunk {
            match byte {
                b'\n' if self.after_cr => self.after_cr = false,
                b'\n' => {
                    self.lines += 1;
                    self.open_line = false;
                }
                b'\r' => {
                    self.lines += 1;
                    self.open_line = false;
                    self.after_cr = true;
                }
                _ => {
                    self.open_line = true;
                    self.after_cr = false;
                }
            }
        }
    }

    const fn finish(self) -> usize {
        if self.open_line { self.lines + 1 } else { self.lines }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_content() {
        assert_eq!(count_lines_in(b""), 0);
    }

    #[test]
    fn test_trailing_newline() {
        assert_eq!(count_lines_in(b"a\nb\nc\n"), 3);
    }

    #[test]
    fn test_missing_trailing_newline_counts_last_line() {
        assert_eq!(count_lines_in(b"a\nb\nc"), 3);
        assert_eq!(count_lines_in(b"single"), 1);
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(count_lines_in(b"\n"), 1);
        assert_eq!(count_lines_in(b"\n\n\n"), 3);
    }

    #[test]
    fn test_crlf_counts_once() {
        assert_eq!(count_lines_in(b"a\r\nb\r\n"), 2);
        assert_eq!(count_lines_in(b"\r\n"), 1);
    }

    #[test]
    fn test_lone_carriage_return() {
        assert_eq!(count_lines_in(b"a\rb\rc"), 3);
        assert_eq!(count_lines_in(b"a\r\rb"), 3);
    }

    #[test]
    fn test_invalid_utf8_is_ignored() {
        assert_eq!(count_lines_in(b"\xff\xfe\n\xc3\x28\nok"), 3);
    }

    #[test]
    fn test_crlf_split_across_chunks() {
        let mut counter = LineCounter::default();
        counter.feed(b"a\r");
        counter.feed(b"\nb\r");
        counter.feed(b"\r");
        counter.feed(b"c");

        assert_eq!(counter.finish(), 3);
    }

    #[test]
    fn test_open_line_survives_chunk_boundary() {
        let mut counter = LineCounter::default();
        counter.feed(b"abc");
        counter.feed(b"");

        assert_eq!(counter.finish(), 1);
    }

    #[test]
    fn test_count_lines_streams_file_larger_than_chunk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("big.json");
        // CRLF pairs straddle chunk boundaries: each line is 7 bytes
        let content = "line\r\n\n".repeat(3 * CHUNK_SIZE / 7) + "tail";
        std::fs::write(&path, &content).unwrap();

        assert_eq!(count_lines(&path), 2 * (3 * CHUNK_SIZE / 7) + 1);
        assert_eq!(count_lines(&path), count_lines_in(content.as_bytes()));
    }

    #[test]
    fn test_count_lines_reads_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("a.py");
        std::fs::write(&path, "import os\nprint(os.name)\n\n").unwrap();

        assert_eq!(count_lines(&path), 3);
    }

    #[test]
    fn test_count_lines_missing_file_is_zero() {
        let dir = tempfile::TempDir::new().unwrap();

        assert_eq!(count_lines(&dir.path().join("missing.rs")), 0);
    }
}
