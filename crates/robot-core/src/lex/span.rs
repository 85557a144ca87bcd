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

//! Source position tracking for test data elements.
//!
//! Every token, separator and end-of-line marker carries a [`FilePosition`]
//! so that the original text can be rebuilt and problems can be reported
//! precisely.
//!
//! # Examples
//!
//! ```
//! use robot_core::lex::FilePosition;
//!
//! let pos = FilePosition::new(10, 4, 120);
//! assert_eq!(pos.line(), 10);
//! assert_eq!(pos.column(), 4);
//! assert_eq!(pos.offset(), 120);
//! ```

use std::fmt;

/// A position in a source file.
///
/// Lines are 1-based, columns are 0-based character columns within the
/// line, offsets are 0-based byte offsets from the start of the input
/// (a skipped byte-order mark included).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilePosition {
    line: usize,
    column: usize,
    offset: usize,
}

impl FilePosition {
    /// Creates a new file position.
    ///
    /// # Arguments
    ///
    /// * `line` - The line number (1-based, 0 for "not set").
    /// * `column` - The character column within the line (0-based).
    /// * `offset` - The byte offset from the start of the input.
    #[inline]
    pub const fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Creates a position at the start of the file.
    #[inline]
    pub const fn start() -> Self {
        Self {
            line: 1,
            column: 0,
            offset: 0,
        }
    }

    /// Returns the line number.
    #[inline]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Returns the character column.
    #[inline]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Returns the byte offset.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// True for positions that were never assigned.
    #[inline]
    pub const fn is_not_set(&self) -> bool {
        self.line == 0
    }

    /// Returns the position reached after `text`, assuming it holds no line break.
    pub fn advanced_by(&self, text: &str) -> Self {
        Self {
            line: self.line,
            column: self.column + text.chars().count(),
            offset: self.offset + text.len(),
        }
    }
}

impl fmt::Display for FilePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start() {
        let pos = FilePosition::start();
        assert_eq!(pos.line(), 1);
        assert_eq!(pos.column(), 0);
        assert_eq!(pos.offset(), 0);
    }

    #[test]
    fn test_default_is_not_set() {
        assert!(FilePosition::default().is_not_set());
        assert!(!FilePosition::start().is_not_set());
    }

    #[test]
    fn test_advanced_by_counts_chars_and_bytes() {
        let pos = FilePosition::new(2, 3, 10).advanced_by("żółw");
        assert_eq!(pos.column(), 7);
        assert_eq!(pos.offset(), 10 + "żółw".len());
        assert_eq!(pos.line(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(FilePosition::new(5, 2, 40).to_string(), "line 5, column 2");
    }

    #[test]
    fn test_ordering_follows_line_then_column() {
        assert!(FilePosition::new(1, 9, 9) < FilePosition::new(2, 0, 10));
        assert!(FilePosition::new(2, 0, 10) < FilePosition::new(2, 1, 11));
    }
}
