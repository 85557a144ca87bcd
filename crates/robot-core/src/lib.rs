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

//! Core parser and data model for Robot Framework test data.
//!
//! This crate turns tabular test data (plain text with space or tab
//! separated cells, or pipe-separated rows) into a typed model while keeping
//! every character of the input, so the source can be rebuilt exactly.
//!
//! # Lexical Analysis
//!
//! The [`lex`] module provides the line and cell level infrastructure:
//!
//! - End-of-line classification and line splitting
//! - Cell separation for text and pipe formats
//! - Version-aware recognition of headers, settings and markers
//! - Positioned tokens with semantic type tags
//!
//! # Expressions
//!
//! The [`expression`] module builds bracket trees over cell values and
//! extracts variable references from them.
//!
//! # Example
//!
//! ```
//! use robot_core::{parse_str, TableType};
//!
//! let text = "*** Test Cases ***\nLogin\n    Open Browser    ${URL}\n";
//! let output = parse_str(text).unwrap();
//! assert!(output.file.has_table(TableType::TestCases));
//! assert_eq!(output.file.reconstruct(), text);
//! ```

mod diagnostic;
mod error;
pub mod expression;
pub mod lex;
mod limits;
pub mod model;
pub mod parser;
mod preprocess;
mod version;

pub use diagnostic::{BuildMessage, Severity};
pub use error::{RobotError, RobotErrorKind, RobotResult};
pub use limits::Limits;
pub use model::{
    Executable, ExecutableRow, ExecutableTable, LineElement, LocalSetting, RobotFile,
    RobotFileOutput, RobotLine, Setting, SettingTable, TableHeader, Variable, VariableKind,
    VariableTable,
};
pub use parser::{parse, parse_str, parse_with_options, ParseOptions, ParseOptionsBuilder};
pub use preprocess::{preprocess, preprocess_str, PreprocessedInput};
pub use version::GrammarVersion;

// Re-export the most used lexical types
pub use expression::{extract_variables, VariableType};
pub use lex::{
    ExecutableKind, FilePosition, LocalSettingKind, RobotToken, SettingKind, TableType, TokenType,
    ValueRole,
};
