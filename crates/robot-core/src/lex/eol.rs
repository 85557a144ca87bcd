// Dweve Robot - Robot Framework Test Data Engine
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Line splitting with exact end-of-line classification.
//!
//! Test data files written on different platforms mix line terminators, so
//! each physical line remembers which marker ended it. Concatenating
//! `text + eol` for every line reproduces the input byte for byte.

use super::span::FilePosition;
use memchr::memchr2;
use std::fmt;

/// The terminator of a physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EndOfLineKind {
    /// `\r`
    Cr,
    /// `\n`
    Lf,
    /// `\r\n`
    CrLf,
    /// `\n\r`
    LfCr,
    /// End of input, no marker present.
    Eof,
}

impl EndOfLineKind {
    /// The raw marker text.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cr => "\r",
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::LfCr => "\n\r",
            Self::Eof => "",
        }
    }

    /// Length of the marker in bytes.
    #[inline]
    pub const fn len(&self) -> usize {
        self.as_str().len()
    }

    #[inline]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::Eof)
    }
}

impl fmt::Display for EndOfLineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cr => write!(f, "CR"),
            Self::Lf => write!(f, "LF"),
            Self::CrLf => write!(f, "CRLF"),
            Self::LfCr => write!(f, "LFCR"),
            Self::Eof => write!(f, "EOF"),
        }
    }
}

/// A classified end-of-line marker and where it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndOfLine {
    kind: EndOfLineKind,
    position: FilePosition,
}

impl EndOfLine {
    pub const fn new(kind: EndOfLineKind, position: FilePosition) -> Self {
        Self { kind, position }
    }

    #[inline]
    pub const fn kind(&self) -> EndOfLineKind {
        self.kind
    }

    #[inline]
    pub const fn position(&self) -> FilePosition {
        self.position
    }

    #[inline]
    pub const fn text(&self) -> &'static str {
        self.kind.as_str()
    }
}

/// One physical line of input, without its terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine<'a> {
    /// The line content.
    pub text: &'a str,
    /// Position of the first character of the line.
    pub start: FilePosition,
    /// The terminator that ended the line.
    pub eol: EndOfLine,
}

/// Classify the marker starting at `at`.
///
/// Returns `None` when `bytes[at]` is neither `\r` nor `\n`, and
/// [`EndOfLineKind::Eof`] when `at` is past the end of input. Two-byte markers
/// win over one-byte markers.
pub fn classify_eol(bytes: &[u8], at: usize) -> Option<EndOfLineKind> {
    let Some(&first) = bytes.get(at) else {
        return Some(EndOfLineKind::Eof);
    };
    let next = bytes.get(at + 1).copied();
    match (first, next) {
        (b'\r', Some(b'\n')) => Some(EndOfLineKind::CrLf),
        (b'\n', Some(b'\r')) => Some(EndOfLineKind::LfCr),
        (b'\r', _) => Some(EndOfLineKind::Cr),
        (b'\n', _) => Some(EndOfLineKind::Lf),
        _ => None,
    }
}

/// Split `text` into physical lines.
///
/// `base_offset` is added to every offset (used to account for a skipped
/// byte-order mark). Input that ends with a terminator yields a final empty
/// line terminated by [`EndOfLineKind::Eof`]; empty input yields exactly one
/// such line.
pub fn read_lines(text: &str, base_offset: usize) -> Vec<RawLine<'_>> {
    let bytes = text.as_bytes();
    let estimated_lines = bytecount_lines(bytes) + 1;
    let mut lines = Vec::with_capacity(estimated_lines);

    let mut start = 0;
    let mut number = 1;
    loop {
        let (end, kind) = match memchr2(b'\r', b'\n', &bytes[start..]) {
            Some(rel) => {
                let at = start + rel;
                // memchr2 only stops on a marker byte
                let kind = classify_eol(bytes, at).unwrap_or(EndOfLineKind::Lf);
                (at, kind)
            }
            None => (bytes.len(), EndOfLineKind::Eof),
        };

        let line_text = &text[start..end];
        let line_start = FilePosition::new(number, 0, base_offset + start);
        lines.push(RawLine {
            text: line_text,
            start: line_start,
            eol: EndOfLine::new(kind, line_start.advanced_by(line_text)),
        });

        if kind.is_eof() {
            break;
        }
        start = end + kind.len();
        number += 1;
    }

    lines
}

fn bytecount_lines(bytes: &[u8]) -> usize {
    memchr::memchr_iter(b'\n', bytes).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rebuild(lines: &[RawLine<'_>]) -> String {
        lines
            .iter()
            .map(|l| format!("{}{}", l.text, l.eol.text()))
            .collect()
    }

    // ==================== Classification tests ====================

    #[test]
    fn test_classify_two_byte_markers() {
        assert_eq!(classify_eol(b"a\r\nb", 1), Some(EndOfLineKind::CrLf));
        assert_eq!(classify_eol(b"a\n\rb", 1), Some(EndOfLineKind::LfCr));
    }

    #[test]
    fn test_classify_single_markers() {
        assert_eq!(classify_eol(b"a\rb", 1), Some(EndOfLineKind::Cr));
        assert_eq!(classify_eol(b"a\nb", 1), Some(EndOfLineKind::Lf));
        assert_eq!(classify_eol(b"a\n", 1), Some(EndOfLineKind::Lf));
    }

    #[test]
    fn test_classify_non_marker_and_eof() {
        assert_eq!(classify_eol(b"ab", 0), None);
        assert_eq!(classify_eol(b"ab", 2), Some(EndOfLineKind::Eof));
    }

    // ==================== Line splitting tests ====================

    #[test]
    fn test_empty_input() {
        let lines = read_lines("", 0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "");
        assert_eq!(lines[0].eol.kind(), EndOfLineKind::Eof);
    }

    #[test]
    fn test_no_trailing_newline() {
        let lines = read_lines("a\nb", 0);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].text, "b");
        assert_eq!(lines[1].eol.kind(), EndOfLineKind::Eof);
    }

    #[test]
    fn test_trailing_newline_adds_eof_line() {
        let lines = read_lines("a\n", 0);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].eol.kind(), EndOfLineKind::Lf);
        assert_eq!(lines[1].text, "");
        assert_eq!(lines[1].eol.kind(), EndOfLineKind::Eof);
        assert_eq!(lines[1].start.line(), 2);
    }

    #[test]
    fn test_mixed_terminators() {
        let input = "a\r\nb\rc\nd\n\re";
        let lines = read_lines(input, 0);
        let kinds: Vec<_> = lines.iter().map(|l| l.eol.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                EndOfLineKind::CrLf,
                EndOfLineKind::Cr,
                EndOfLineKind::Lf,
                EndOfLineKind::LfCr,
                EndOfLineKind::Eof
            ]
        );
        assert_eq!(rebuild(&lines), input);
    }

    #[test]
    fn test_positions() {
        let lines = read_lines("ab\r\ncd", 3);
        assert_eq!(lines[0].start, FilePosition::new(1, 0, 3));
        assert_eq!(lines[0].eol.position(), FilePosition::new(1, 2, 5));
        assert_eq!(lines[1].start, FilePosition::new(2, 0, 7));
    }

    #[test]
    fn test_eol_column_counts_characters() {
        let lines = read_lines("żó\n", 0);
        assert_eq!(lines[0].eol.position().column(), 2);
        assert_eq!(lines[0].eol.position().offset(), "żó".len());
    }

    #[test]
    fn test_blank_lines_between_crlf() {
        let input = "\r\n\r\n";
        let lines = read_lines(input, 0);
        assert_eq!(lines.len(), 3);
        assert_eq!(rebuild(&lines), input);
    }
}
