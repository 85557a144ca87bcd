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

//! Lexical analysis subsystem for Robot test data.
//!
//! # Module Structure
//!
//! - [`span`] - Source positions for every element
//! - [`eol`] - Line splitting with end-of-line classification
//! - [`separator`] - Cell and separator splitting for the text and pipe formats
//! - [`token`] - Positioned tokens and their semantic tags
//! - [`recognizer`] - Ordered, version-aware cell classification
//!
//! # Examples
//!
//! ```
//! use robot_core::lex::{read_lines, split_line, EndOfLineKind, Segment};
//!
//! let lines = read_lines("Log  hello\r\n", 0);
//! assert_eq!(lines[0].eol.kind(), EndOfLineKind::CrLf);
//!
//! let cells: Vec<_> = split_line(&lines[0])
//!     .into_iter()
//!     .filter_map(|s| s.as_cell().map(|c| c.text))
//!     .collect();
//! assert_eq!(cells, vec!["Log", "hello"]);
//! ```
//!
//! ```
//! use robot_core::lex::{recognize, Recognized, TableType};
//! use robot_core::GrammarVersion;
//!
//! let r = recognize("*** Test Cases ***", None, GrammarVersion::V3_0).unwrap();
//! assert_eq!(r.produced, Recognized::TableHeader(TableType::TestCases));
//! ```

pub mod eol;
pub mod recognizer;
pub mod separator;
pub mod span;
pub mod token;

pub use eol::{classify_eol, read_lines, EndOfLine, EndOfLineKind, RawLine};
pub use recognizer::{recognize, recognizers, Recognition, Recognized, Recognizer, RecognizerScope};
pub use separator::{split_line, LineFormat, RawCell, Segment, Separator, SeparatorKind};
pub use span::FilePosition;
pub use token::{
    ExecutableKind, LocalSettingKind, RobotToken, SettingKind, TableType, TokenType, ValueRole,
};
