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

//! Test data parser.
//!
//! Parsing runs in two phases:
//!
//! 1. **Preprocess**: validate the input and split it into physical lines
//!    without normalizing line terminators
//! 2. **Map**: split every line into cells and route each cell through the
//!    [`MapperRegistry`], driven by a stack of [`ParsingState`]s
//!
//! Table headers, comments and `...` continuations are handled before the
//! registry is consulted, since they behave the same in every table.
//!
//! The parser never rejects malformed content. Anything it cannot place is
//! kept as an `UNKNOWN` token for reconstruction and reported as a build
//! message; only resource limits and invalid UTF-8 abort a parse.

pub mod comments;
pub mod context;
pub mod executables;
pub mod fallback;
pub mod headers;
pub mod registry;
pub mod settings;
pub mod state;
pub mod variables;

pub use context::{CellInfo, OpenElement, ParsingContext, PreviousLine};
pub use registry::{MapperRegistry, ParsingMapper};
pub use state::ParsingState;

use crate::error::{RobotError, RobotResult};
use crate::expression::extract_variables_with_depth;
use crate::lex::{
    recognize, split_line, RawCell, RawLine, Recognition, Recognized, RobotToken, Segment, TokenType,
};
use crate::limits::Limits;
use crate::model::{LineElement, RobotFileOutput, RobotLine};
use crate::preprocess::{is_blank_line, preprocess, preprocess_str, PreprocessedInput};
use crate::version::GrammarVersion;
use tracing::{debug, trace};

/// Parser configuration options.
///
/// # Security
///
/// ParseOptions carries the resource limits that guard against hostile
/// input:
///
/// - `max_file_size`: Prevents loading extremely large files
/// - `max_line_length`: Prevents regex DOS via extremely long lines
/// - `max_cells_per_line`: Prevents memory exhaustion via huge rows
/// - `max_expression_depth`: Bounds bracket nesting in cell values
///
/// # Fields
///
/// - `version`: Grammar generation to parse with
/// - `limits`: Security limits for parser resources
/// - `file_name`: Name reported in build messages
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Grammar generation.
    pub version: GrammarVersion,
    /// Security limits.
    pub limits: Limits,
    /// Source name for build messages.
    pub file_name: Option<String>,
}

impl ParseOptions {
    /// Create a new builder for ParseOptions.
    ///
    /// # Examples
    ///
    /// ```text
    /// let opts = ParseOptions::builder()
    ///     .version(GrammarVersion::new(2, 9))
    ///     .file_name("suite.robot")
    ///     .build();
    /// ```
    pub fn builder() -> ParseOptionsBuilder {
        ParseOptionsBuilder::new()
    }
}

/// Builder for ergonomic construction of ParseOptions.
///
/// # Examples
///
/// ```text
/// let opts = ParseOptions::builder()
///     .max_line_length(64 * 1024)
///     .max_cells_per_line(500)
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParseOptionsBuilder {
    version: GrammarVersion,
    limits: Limits,
    file_name: Option<String>,
}

impl ParseOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grammar generation.
    ///
    /// # Parameters
    ///
    /// - `version`: Grammar version (default: 3.0)
    pub fn version(mut self, version: GrammarVersion) -> Self {
        self.version = version;
        self
    }

    /// Set the name reported in build messages.
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    /// Replace all limits at once.
    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the maximum file size in bytes.
    ///
    /// # Parameters
    ///
    /// - `size`: Maximum file size in bytes (default: 64MB)
    ///
    /// # Examples
    ///
    /// ```text
    /// ParseOptions::builder().max_file_size(8 * 1024 * 1024)
    /// ```
    pub fn max_file_size(mut self, size: usize) -> Self {
        self.limits.max_file_size = size;
        self
    }

    /// Set the maximum line length in bytes.
    ///
    /// # Parameters
    ///
    /// - `length`: Maximum line length in bytes (default: 1MB)
    pub fn max_line_length(mut self, length: usize) -> Self {
        self.limits.max_line_length = length;
        self
    }

    /// Set the maximum number of cells on one line.
    ///
    /// # Parameters
    ///
    /// - `count`: Maximum cells (default: 10k)
    pub fn max_cells_per_line(mut self, count: usize) -> Self {
        self.limits.max_cells_per_line = count;
        self
    }

    /// Set the maximum bracket nesting inside a cell value.
    ///
    /// Openers beyond this depth are treated as plain text.
    ///
    /// # Parameters
    ///
    /// - `depth`: Maximum depth (default: 256)
    pub fn max_expression_depth(mut self, depth: usize) -> Self {
        self.limits.max_expression_depth = depth;
        self
    }

    /// Build the ParseOptions.
    pub fn build(self) -> ParseOptions {
        ParseOptions {
            version: self.version,
            limits: self.limits,
            file_name: self.file_name,
        }
    }
}

/// Parse test data from bytes with default options.
pub fn parse(input: &[u8]) -> RobotResult<RobotFileOutput> {
    parse_with_options(input, &ParseOptions::default())
}

/// Parse test data from a string with default options.
pub fn parse_str(input: &str) -> RobotResult<RobotFileOutput> {
    let options = ParseOptions::default();
    let preprocessed = preprocess_str(input, &options.limits)?;
    run(preprocessed, input.len(), &options)
}

/// Parse test data with custom options.
pub fn parse_with_options(input: &[u8], options: &ParseOptions) -> RobotResult<RobotFileOutput> {
    let preprocessed = preprocess(input, &options.limits)?;
    run(preprocessed, input.len(), options)
}

fn run(preprocessed: PreprocessedInput<'_>, size: usize, options: &ParseOptions) -> RobotResult<RobotFileOutput> {
    debug!(
        bytes = size,
        lines = preprocessed.line_count(),
        version = %options.version,
        "parsing test data"
    );

    let mut parser = Parser::new(options);
    for line in &preprocessed.lines {
        parser.parse_line(line)?;
    }

    let mut ctx = parser.ctx;
    ctx.file.bom = preprocessed.bom;
    let output = RobotFileOutput {
        file: ctx.file,
        version: options.version,
        messages: ctx.messages,
    };
    debug!(
        lines = output.file.lines.len(),
        messages = output.messages.len(),
        "parsed test data"
    );
    Ok(output)
}

/// Tag a value cell that references variables.
pub(crate) fn tag_variable_usage(token: &mut RobotToken, max_depth: usize) {
    if token.text().contains('{') && !extract_variables_with_depth(token.text(), max_depth).is_empty() {
        token.add_type(TokenType::VariableUsage);
    }
}

/// Tag a keyword-name value of `NONE`, which disables the setting from 3.0 on.
pub(crate) fn mark_disabled_keyword(token: &mut RobotToken, version: GrammarVersion) {
    if version >= GrammarVersion::V3_0 && token.text().trim().eq_ignore_ascii_case("NONE") {
        token.add_type(TokenType::DisabledKeyword);
    }
}

/// How the current line started, for the end-of-line bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineStart {
    Nothing,
    Header,
    Comment,
    Content,
}

struct Parser<'o> {
    ctx: ParsingContext,
    registry: &'static MapperRegistry,
    limits: &'o Limits,
}

impl<'o> Parser<'o> {
    fn new(options: &'o ParseOptions) -> Self {
        let mut ctx = ParsingContext::new(options.version, options.file_name.clone());
        ctx.max_expression_depth = options.limits.max_expression_depth;
        Self {
            ctx,
            registry: MapperRegistry::shared(),
            limits: &options.limits,
        }
    }

    fn parse_line(&mut self, raw: &RawLine<'_>) -> RobotResult<()> {
        let number = raw.start.line();
        self.ctx.current_line = number;
        let mut elements = Vec::new();

        if is_blank_line(raw.text) {
            if !raw.text.is_empty() {
                elements.push(LineElement::Token(RobotToken::new(
                    raw.text,
                    raw.start,
                    TokenType::PrettyAlignSpace,
                )));
            }
        } else {
            let segments = split_line(raw);
            let cells = segments.iter().filter(|s| s.as_cell().is_some()).count();
            if cells > self.limits.max_cells_per_line {
                return Err(RobotError::security(
                    format!(
                        "line has {} cells, exceeding the limit of {}",
                        cells, self.limits.max_cells_per_line
                    ),
                    number,
                ));
            }

            let mut start = LineStart::Nothing;
            for segment in segments {
                match segment {
                    Segment::Separator(separator) => elements.push(LineElement::Separator(separator)),
                    Segment::Cell(cell) => {
                        let token = self.map_cell(&cell, &mut start);
                        elements.push(LineElement::Token(token));
                    }
                }
            }
            self.end_line(start);
        }

        self.ctx.file.lines.push(RobotLine {
            number,
            elements,
            eol: raw.eol,
        });
        Ok(())
    }

    fn map_cell(&mut self, cell: &RawCell<'_>, start: &mut LineStart) -> RobotToken {
        let ctx = &mut self.ctx;
        let first_in_line = *start == LineStart::Nothing;
        let table = ctx.top().and_then(|s| s.table());
        let info = CellInfo {
            column: cell.column,
            first_in_line,
            recognition: recognize(cell.text, table, ctx.version),
        };
        let token = RobotToken::new(cell.text, cell.position, TokenType::Unknown);

        if ctx.top() == Some(ParsingState::Comment) {
            return comments::map_comment(token, &info, ctx);
        }

        if headers::is_header_cell(cell.text, &info) {
            *start = LineStart::Header;
            return headers::map_header(token, &info, ctx);
        }

        let produced = info.recognition.map(|r| r.produced);
        if produced == Some(Recognized::Comment) {
            if first_in_line {
                *start = LineStart::Comment;
            }
            return comments::map_comment(token, &info, ctx);
        }

        if first_in_line {
            *start = LineStart::Content;
            if let Some(Recognition {
                produced: Recognized::Continuation,
                exact: true,
                ..
            }) = info.recognition
            {
                return continue_previous_line(token, ctx);
            }
        }

        self.registry.map(token, &info, ctx)
    }

    fn end_line(&mut self, start: LineStart) {
        let ctx = &mut self.ctx;
        ctx.stack.retain(|s| *s != ParsingState::Comment);
        ctx.comment_target = None;

        if start == LineStart::Content {
            ctx.previous_line = Some(PreviousLine {
                stack: ctx.stack.clone(),
                open: ctx.open,
            });
        }

        if let Some(ParsingState::TableHeader(table)) = ctx.top() {
            ctx.stack.clear();
            ctx.push(ParsingState::TableInside(table));
        } else {
            ctx.pop_to_line_level();
        }
        trace!(line = ctx.current_line, stack = ?ctx.stack, "line done");
    }
}

/// Resume the state the previous content line ended in.
fn continue_previous_line(mut token: RobotToken, ctx: &mut ParsingContext) -> RobotToken {
    token.set_primary_type(TokenType::PreviousLineContinue);
    match ctx.previous_line.clone() {
        Some(previous) => {
            ctx.stack = previous.stack;
            ctx.open = previous.open;
            if ctx.open.is_some() {
                ctx.open_line = ctx.current_line;
            }
        }
        None => ctx.warn(
            "Line continuation without a previous line to continue.",
            token.position(),
        ),
    }
    token
}
