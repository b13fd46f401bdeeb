/// Query k-mer source
///
/// Reads query k-mers from line-oriented input, one k-mer per line, and
/// keeps end-of-input apart from read failures so a traversal can finish
/// its report before surfacing the error.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Query source errors
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Cannot open query file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Read error after line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
}

pub type QueryResult<T> = Result<T, QueryError>;

/// How raw lines become lookup keys
///
/// Under either policy a line that is not valid UTF-8 is decoded lossily
/// (invalid bytes become U+FFFD) and still looked up, where it normally
/// misses. Only a failing reader ends the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinePolicy {
    /// Strip surrounding whitespace and skip blank lines
    #[default]
    Trimmed,
    /// Strip only the line terminator; every line is a query
    Raw,
}

/// State of the underlying stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceState {
    Open,
    Exhausted,
    Failed,
}

/// Ordered stream of query k-mers
pub struct QuerySource<R> {
    reader: Option<R>,
    policy: LinePolicy,
    bytes: Vec<u8>,
    buf: String,
    lines_read: usize,
    state: SourceState,
    error: Option<QueryError>,
}

impl QuerySource<BufReader<File>> {
    /// Open a query file
    pub fn open<P: AsRef<Path>>(path: P, policy: LinePolicy) -> QueryResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| QueryError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_reader(BufReader::new(file), policy))
    }
}

impl<R: BufRead> QuerySource<R> {
    /// Wrap any buffered reader
    pub fn from_reader(reader: R, policy: LinePolicy) -> Self {
        Self {
            reader: Some(reader),
            policy,
            bytes: Vec::new(),
            buf: String::new(),
            lines_read: 0,
            state: SourceState::Open,
            error: None,
        }
    }

    /// Read the next query k-mer
    ///
    /// Returns `None` once the input is exhausted or a read fails; every
    /// later call returns `None` as well. The reader is dropped at that
    /// point, releasing the underlying handle.
    pub fn next_kmer(&mut self) -> Option<&str> {
        loop {
            let reader = self.reader.as_mut()?;
            self.bytes.clear();

            match reader.read_until(b'\n', &mut self.bytes) {
                Ok(0) => {
                    self.finish(SourceState::Exhausted);
                    return None;
                }
                Ok(_) => {
                    self.lines_read += 1;
                    self.buf.clear();
                    self.buf.push_str(&String::from_utf8_lossy(&self.bytes));
                    let keep = match self.policy {
                        LinePolicy::Trimmed => !self.buf.trim().is_empty(),
                        LinePolicy::Raw => true,
                    };
                    if keep {
                        break;
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => {
                    self.error = Some(QueryError::Read {
                        line: self.lines_read,
                        source,
                    });
                    self.finish(SourceState::Failed);
                    return None;
                }
            }
        }

        Some(match self.policy {
            LinePolicy::Trimmed => self.buf.trim(),
            LinePolicy::Raw => strip_line_terminator(&self.buf),
        })
    }

    fn finish(&mut self, state: SourceState) {
        self.reader = None;
        self.state = state;
    }

    /// Close the source early; later reads return `None`
    pub fn close(&mut self) {
        if self.state == SourceState::Open {
            self.finish(SourceState::Exhausted);
        }
    }

    /// Number of raw lines consumed, including skipped blank lines
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Current stream state
    pub fn state(&self) -> SourceState {
        self.state
    }

    /// Check if the underlying handle is still held
    pub fn is_open(&self) -> bool {
        self.reader.is_some()
    }

    /// Read failure that ended the stream, if any
    pub fn error(&self) -> Option<&QueryError> {
        self.error.as_ref()
    }

    /// Take the read failure out of the source
    pub fn take_error(&mut self) -> Option<QueryError> {
        self.error.take()
    }
}

fn strip_line_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
