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

//! Column separation for the pipe and space/tab separated formats.
//!
//! A line is split into cells and the separator runs between them. Both are
//! kept with their exact text so a line can be rebuilt verbatim.

use super::eol::RawLine;
use super::span::FilePosition;
use std::fmt;

/// The flavour of a separator run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SeparatorKind {
    /// `|` surrounded by whitespace.
    Pipe,
    /// A whitespace run holding at least one tab.
    Tabulator,
    /// Two or more spaces.
    DoubleSpace,
}

impl fmt::Display for SeparatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pipe => write!(f, "PIPE"),
            Self::Tabulator => write!(f, "TABULATOR"),
            Self::DoubleSpace => write!(f, "DOUBLE_SPACE"),
        }
    }
}

/// How cells of a line are separated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineFormat {
    /// Cells separated by two or more spaces or by tabs.
    Text,
    /// Cells separated by ` | `; the line starts with `| `.
    Pipe,
}

impl LineFormat {
    /// Detect the format of a single line.
    pub fn detect(line: &str) -> Self {
        let bytes = line.as_bytes();
        match bytes {
            [b'|'] => Self::Pipe,
            [b'|', next, ..] if is_blank(*next) => Self::Pipe,
            _ => Self::Text,
        }
    }
}

/// A separator run with its exact text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Separator {
    pub kind: SeparatorKind,
    pub text: String,
    pub position: FilePosition,
}

/// A raw, not yet classified cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawCell<'a> {
    pub text: &'a str,
    pub position: FilePosition,
    /// Zero-based logical column: the number of separators before the cell,
    /// not counting the leading pipe of a pipe-separated line.
    pub column: usize,
}

/// One piece of a split line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Cell(RawCell<'a>),
    Separator(Separator),
}

impl<'a> Segment<'a> {
    pub fn as_cell(&self) -> Option<&RawCell<'a>> {
        match self {
            Segment::Cell(cell) => Some(cell),
            Segment::Separator(_) => None,
        }
    }
}

#[inline]
fn is_blank(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

enum Piece {
    Cell(usize, usize),
    Separator(usize, usize, SeparatorKind),
}

fn split_text(bytes: &[u8]) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut cell_start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if !is_blank(bytes[i]) {
            i += 1;
            continue;
        }
        let run_start = i;
        while i < bytes.len() && is_blank(bytes[i]) {
            i += 1;
        }
        let run = &bytes[run_start..i];
        let kind = if run.contains(&b'\t') {
            SeparatorKind::Tabulator
        } else if run.len() >= 2 {
            SeparatorKind::DoubleSpace
        } else {
            continue;
        };
        if run_start > cell_start {
            pieces.push(Piece::Cell(cell_start, run_start));
        }
        pieces.push(Piece::Separator(run_start, i, kind));
        cell_start = i;
    }
    if cell_start < bytes.len() {
        pieces.push(Piece::Cell(cell_start, bytes.len()));
    }
    pieces
}

fn split_pipe(bytes: &[u8]) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut i = 1;
    while i < bytes.len() && is_blank(bytes[i]) {
        i += 1;
    }
    pieces.push(Piece::Separator(0, i, SeparatorKind::Pipe));

    let mut cell_start = i;
    let mut j = i;
    while j < bytes.len() {
        let is_separator_pipe = bytes[j] == b'|'
            && (j == cell_start || is_blank(bytes[j - 1]))
            && (j + 1 == bytes.len() || is_blank(bytes[j + 1]));
        if !is_separator_pipe {
            j += 1;
            continue;
        }
        let mut start = j;
        while start > cell_start && is_blank(bytes[start - 1]) {
            start -= 1;
        }
        let mut end = j + 1;
        while end < bytes.len() && is_blank(bytes[end]) {
            end += 1;
        }
        if start > cell_start {
            pieces.push(Piece::Cell(cell_start, start));
        }
        pieces.push(Piece::Separator(start, end, SeparatorKind::Pipe));
        cell_start = end;
        j = end;
    }
    if cell_start < bytes.len() {
        pieces.push(Piece::Cell(cell_start, bytes.len()));
    }
    pieces
}

/// Split a physical line into cells and separators.
///
/// A line without separators yields one cell covering it up to the
/// terminator. Empty cells are never produced; an empty pipe column shows up
/// as two adjacent separators and advances the column counter.
pub fn split_line<'a>(line: &RawLine<'a>) -> Vec<Segment<'a>> {
    let text = line.text;
    let format = LineFormat::detect(text);
    let pieces = match format {
        LineFormat::Text => split_text(text.as_bytes()),
        LineFormat::Pipe => split_pipe(text.as_bytes()),
    };

    let mut segments = Vec::with_capacity(pieces.len());
    let mut position = line.start;
    let mut consumed = 0;
    let mut separators = 0usize;
    for piece in pieces {
        let (start, end) = match piece {
            Piece::Cell(s, e) | Piece::Separator(s, e, _) => (s, e),
        };
        debug_assert_eq!(start, consumed);
        let slice = &text[start..end];
        match piece {
            Piece::Cell(..) => {
                let column = match format {
                    LineFormat::Pipe => separators.saturating_sub(1),
                    LineFormat::Text => separators,
                };
                segments.push(Segment::Cell(RawCell {
                    text: slice,
                    position,
                    column,
                }));
            }
            Piece::Separator(_, _, kind) => {
                separators += 1;
                segments.push(Segment::Separator(Separator {
                    kind,
                    text: slice.to_string(),
                    position,
                }));
            }
        }
        position = position.advanced_by(slice);
        consumed = end;
    }
    segments
}
