//! Reading branch traces.
//!
//! A trace is a text file with one instruction per line:
//!
//! ```text
//! 00a3b5fc t
//! 00a3b604 n
//! 00a3b610 n -
//! ```
//!
//! The first column is the instruction address in hexadecimal (an optional
//! `0x` prefix is accepted), and the second is the resolved direction. An
//! optional third column marks the instruction as a branch (`b`) or as an
//! instruction which is not a branch (`-`). Blank lines and lines starting
//! with `#` are ignored.

pub mod synth;

pub use synth::*;

use std::fs::File;
use std::io::{ BufRead, BufReader };
use std::path::Path;
use thiserror::Error;

use crate::branch::*;

/// Errors encountered while reading a trace.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {msg}")]
    Parse { line: usize, msg: String },
}

/// Parse a single line of a trace.
///
/// Returns [None] for blank lines and comments.
pub fn parse_line(line: &str) -> Result<Option<BranchRecord>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut fields = line.split_whitespace();
    let addr = fields.next().ok_or("missing address")?;
    let addr = addr.trim_start_matches("0x").trim_start_matches("0X");
    let pc = u32::from_str_radix(addr, 16)
        .map_err(|e| format!("invalid address '{}': {}", addr, e))?;

    let outcome = match fields.next() {
        Some("t") | Some("T") => Outcome::T,
        Some("n") | Some("N") => Outcome::N,
        Some(x) => return Err(format!("invalid outcome '{}'", x)),
        None => return Err("missing outcome".to_string()),
    };
    let is_branch = match fields.next() {
        None | Some("b") => true,
        Some("-") => false,
        Some(x) => return Err(format!("invalid branch marker '{}'", x)),
    };
    if let Some(x) = fields.next() {
        return Err(format!("unexpected field '{}'", x));
    }

    if is_branch {
        Ok(Some(BranchRecord::new(pc, outcome)))
    } else {
        Ok(Some(BranchRecord::not_branch(pc)))
    }
}

/// Iterator over the records in a text trace.
pub struct TextTrace<R: BufRead> {
    lines: std::io::Lines<R>,
    line: usize,
}
impl<R: BufRead> TextTrace<R> {
    pub fn new(reader: R) -> Self {
        Self { lines: reader.lines(), line: 0 }
    }
}
impl TextTrace<BufReader<File>> {
    /// Open a trace file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let f = File::open(path)?;
        Ok(Self::new(BufReader::new(f)))
    }
}

impl<R: BufRead> Iterator for TextTrace<R> {
    type Item = Result<BranchRecord, TraceError>;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line += 1;
            match parse_line(&line) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => continue,
                Err(msg) => {
                    return Some(Err(TraceError::Parse { line: self.line, msg }));
                },
            }
        }
    }
}

/// Read an entire trace into memory.
pub fn read_trace<R: BufRead>(reader: R) -> Result<Vec<BranchRecord>, TraceError> {
    TextTrace::new(reader).collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_records() {
        let text = "\
# comment
00a3b5fc t
0x00a3b604 n

00a3b610 n -
00a3b614 T b
";
        let records = read_trace(text.as_bytes()).unwrap();
        assert_eq!(records, vec![
            BranchRecord::new(0x00a3_b5fc, Outcome::T),
            BranchRecord::new(0x00a3_b604, Outcome::N),
            BranchRecord::not_branch(0x00a3_b610),
            BranchRecord::new(0x00a3_b614, Outcome::T),
        ]);
    }

    #[test]
    fn reports_the_offending_line() {
        let text = "1000 t\n\n1004 x\n";
        match read_trace(text.as_bytes()) {
            Err(TraceError::Parse { line, msg }) => {
                assert_eq!(line, 3);
                assert!(msg.contains("invalid outcome"));
            },
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(parse_line("zzzz t").is_err());
        assert!(parse_line("1000").is_err());
        assert!(parse_line("1000 t b extra").is_err());
        assert!(parse_line("1000 t ?").is_err());
        assert!(parse_line("100000000 t").is_err());
    }
}
