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

//! Input preprocessing for test data parsing.

use crate::error::{RobotError, RobotResult};
use crate::lex::{read_lines, RawLine};
use crate::limits::Limits;

const BOM: &str = "\u{FEFF}";

/// Validated input split into physical lines.
///
/// Nothing is normalized: line terminators are classified, not rewritten,
/// so the lines reproduce the input exactly.
#[derive(Debug)]
pub struct PreprocessedInput<'a> {
    /// Whether a byte-order mark preceded the text.
    pub bom: bool,
    /// Physical lines in order.
    pub lines: Vec<RawLine<'a>>,
}

impl<'a> PreprocessedInput<'a> {
    /// Number of physical lines, including the trailing end-of-input line.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Preprocess raw input bytes into lines.
///
/// This handles:
/// - Size and line length limits
/// - UTF-8 validation
/// - BOM skipping
pub fn preprocess<'a>(input: &'a [u8], limits: &Limits) -> RobotResult<PreprocessedInput<'a>> {
    // Don't reveal the exact input size
    if input.len() > limits.max_file_size {
        return Err(RobotError::security(
            format!("file too large: exceeds limit of {} bytes", limits.max_file_size),
            0,
        ));
    }

    let text = std::str::from_utf8(input).map_err(|e| {
        let line = input[..e.valid_up_to()]
            .iter()
            .filter(|&&b| b == b'\n')
            .count()
            + 1;
        RobotError::syntax(format!("invalid UTF-8 encoding: {}", e), line)
    })?;

    preprocess_str(text, limits)
}

/// Preprocess already-decoded text.
pub fn preprocess_str<'a>(text: &'a str, limits: &Limits) -> RobotResult<PreprocessedInput<'a>> {
    if text.len() > limits.max_file_size {
        return Err(RobotError::security(
            format!("file too large: exceeds limit of {} bytes", limits.max_file_size),
            0,
        ));
    }

    let (body, bom) = match text.strip_prefix(BOM) {
        Some(rest) => (rest, true),
        None => (text, false),
    };
    let base_offset = if bom { BOM.len() } else { 0 };

    let lines = read_lines(body, base_offset);
    if let Some(long) = lines
        .iter()
        .find(|line| line.text.len() > limits.max_line_length)
    {
        return Err(RobotError::security(
            format!(
                "line too long: exceeds limit of {} bytes",
                limits.max_line_length
            ),
            long.start.line(),
        ));
    }

    Ok(PreprocessedInput { bom, lines })
}

/// Check if a line is blank (empty or whitespace only).
pub fn is_blank_line(line: &str) -> bool {
    line.trim().is_empty()
}
