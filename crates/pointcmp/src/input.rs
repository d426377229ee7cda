//! Text input for point sequences.
//!
//! Two layouts:
//! - file-pair mode (`read_points`, `read_points_file`): whitespace-separated
//!   tokens taken in `(x, y)` pairs regardless of line breaks, until EOF;
//! - stream mode (`read_points_until_blank`): one `x y` point per line, the
//!   sequence ends at the first all-whitespace line. Several sequences can be
//!   read back to back from the same reader.
//!
//! Both layouts are strict: a bad literal, a wrong token count, or a dangling
//! coordinate is an error with the offending line. Nothing is skipped.
//!
//! Literals follow `f64::from_str` (`1`, `-2.5e3`, `inf`, `nan`, `-nan`, ...).
//! A finite literal whose value overflows to infinity, or one with non-zero
//! digits that rounds to zero, is rejected.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::order::Point;

/// Coarse failure class surfaced to callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    ParseFailure,
    IoFailure,
}

#[derive(Debug)]
pub enum InputError {
    /// A token or line could not be turned into a point. `line` is 1-based.
    Parse {
        line: usize,
        token: String,
        reason: &'static str,
    },
    Io(io::Error),
    /// The stream ended before the terminating blank line.
    Unterminated { read: usize },
}

impl InputError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InputError::Parse { .. } => ErrorKind::ParseFailure,
            InputError::Io(_) | InputError::Unterminated { .. } => ErrorKind::IoFailure,
        }
    }

    fn parse(line: usize, token: &str, reason: &'static str) -> Self {
        InputError::Parse {
            line,
            token: token.to_string(),
            reason,
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Parse {
                line,
                token,
                reason,
            } => write!(f, "line {line}: {reason}: {token:?}"),
            InputError::Io(e) => write!(f, "read failed: {e}"),
            InputError::Unterminated { read } => write!(
                f,
                "input ended after {read} point(s) without a terminating blank line"
            ),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for InputError {
    fn from(e: io::Error) -> Self {
        InputError::Io(e)
    }
}

/// Parse one coordinate literal, rejecting silent overflow/underflow.
pub fn parse_coord(token: &str) -> Result<f64, &'static str> {
    let v: f64 = token.parse().map_err(|_| "not a number")?;
    if v.is_infinite() && !is_special_literal(token) {
        return Err("value out of range");
    }
    if v == 0.0 && has_nonzero_mantissa(token) {
        return Err("value out of range");
    }
    Ok(v)
}

fn is_special_literal(token: &str) -> bool {
    let body = token.trim_start_matches(['+', '-']);
    body.eq_ignore_ascii_case("inf") || body.eq_ignore_ascii_case("infinity")
}

// Digits before the exponent marker; `0.0e-999` is zero, `1e-999` underflowed.
fn has_nonzero_mantissa(token: &str) -> bool {
    token
        .chars()
        .take_while(|c| *c != 'e' && *c != 'E')
        .any(|c| matches!(c, '1'..='9'))
}

/// File-pair mode: all tokens until EOF, consumed two at a time.
pub fn read_points<R: BufRead>(reader: R) -> Result<Vec<Point>, InputError> {
    let mut out = Vec::new();
    let mut pending: Option<(f64, usize, String)> = None;
    for (idx, raw) in reader.split(b'\n').enumerate() {
        let raw = raw?;
        let lineno = idx + 1;
        let line = decode_line(&raw, lineno)?;
        for token in line.split_whitespace() {
            let v = parse_coord(token).map_err(|reason| InputError::parse(lineno, token, reason))?;
            match pending.take() {
                None => pending = Some((v, lineno, token.to_string())),
                Some((x, _, _)) => out.push(Point::new(x, v)),
            }
        }
    }
    if let Some((_, lineno, token)) = pending {
        return Err(InputError::parse(lineno, &token, "x coordinate without y"));
    }
    tracing::debug!(points = out.len(), "read points");
    Ok(out)
}

// Bytes that are not UTF-8 cannot hold a coordinate literal: a parse failure, not IO.
fn decode_line(raw: &[u8], lineno: usize) -> Result<&str, InputError> {
    std::str::from_utf8(raw).map_err(|_| {
        let shown = String::from_utf8_lossy(raw);
        InputError::parse(lineno, shown.trim(), "invalid UTF-8")
    })
}

pub fn read_points_file<P: AsRef<Path>>(path: P) -> Result<Vec<Point>, InputError> {
    let file = File::open(path.as_ref())?;
    read_points(BufReader::new(file))
}

/// Stream mode: one point per line until a blank line.
///
/// Reads only through the terminating line, so the next call on the same
/// reader picks up the following sequence. `start_line` offsets reported line
/// numbers when several sequences share a stream; the returned `usize` is the
/// number of lines consumed.
pub fn read_points_until_blank<R: BufRead>(
    reader: &mut R,
    start_line: usize,
) -> Result<(Vec<Point>, usize), InputError> {
    let mut out = Vec::new();
    let mut raw = Vec::new();
    let mut consumed = 0usize;
    loop {
        raw.clear();
        if reader.read_until(b'\n', &mut raw)? == 0 {
            return Err(InputError::Unterminated { read: out.len() });
        }
        consumed += 1;
        let lineno = start_line + consumed;
        let buf = decode_line(&raw, lineno)?;
        let mut tokens = buf.split_whitespace();
        let (x, y) = match (tokens.next(), tokens.next(), tokens.next()) {
            (None, _, _) => break,
            (Some(x), Some(y), None) => (x, y),
            _ => {
                return Err(InputError::parse(
                    lineno,
                    buf.trim(),
                    "expected exactly two coordinates",
                ))
            }
        };
        let x = parse_coord(x).map_err(|reason| InputError::parse(lineno, x, reason))?;
        let y = parse_coord(y).map_err(|reason| InputError::parse(lineno, y, reason))?;
        out.push(Point::new(x, y));
    }
    tracing::debug!(points = out.len(), lines = consumed, "read points until blank line");
    Ok((out, consumed))
}
