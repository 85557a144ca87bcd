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

//! # Robot - Robot Framework test data engine
//!
//! Parses Robot Framework test data (`.robot` suites and resource files)
//! into a lossless typed model and resolves keyword calls to their
//! definitions.
//!
//! ## Quick Start
//!
//! ```rust
//! use robot::{parse, keyword_index};
//!
//! let suite = "\
//! *** Test Cases ***
//! Valid Login
//!     Given Login bob to prod
//!
//! *** Keywords ***
//! Login ${user} to ${system}
//!     Log    ${user}@${system}
//! ";
//!
//! let output = parse(suite).expect("Failed to parse");
//! assert_eq!(output.file.reconstruct(), suite);
//!
//! let index = keyword_index(&output.file, "suite.robot");
//! assert!(index.resolve_unique("Given Login bob to prod").is_some());
//! ```
//!
//! ## Modules
//!
//! - [`lex`], [`model`], [`parser`]: tokens, model and parser
//! - [`names`]: keyword name matching and resolution
//! - [`expression`]: variable and index expressions inside cells

pub use robot_core::{
    // Functions
    parse_with_options,
    preprocess,
    // Model
    Executable,
    ExecutableKind,
    ExecutableRow,
    ExecutableTable,
    RobotFile,
    RobotFileOutput,
    Setting,
    SettingTable,
    TableType,
    Variable,
    VariableTable,
    // Diagnostics
    BuildMessage,
    Severity,
    // Errors
    RobotError,
    RobotErrorKind,
    RobotResult,
    // Options
    GrammarVersion,
    Limits,
    ParseOptions,
    ParseOptionsBuilder,
};

pub use robot_names::{KeywordDefinition, KeywordIndex, QualifiedKeywordName};

// Error handling extensions
mod error_ext;
pub use error_ext::RobotResultExt;

pub use robot_core::{lex, model, parser};

pub mod expression {
    //! Variable and index expressions
    pub use robot_core::expression::*;
}

pub mod names {
    //! Keyword name matching
    pub use robot_names::{camel_case, embedded, gherkin, qualified, unify};
}

use std::path::Path;
use tracing::debug;

/// Parse test data from a string with the default grammar version.
///
/// # Examples
///
/// ```rust
/// use robot::parse;
///
/// let output = parse("*** Settings ***\nLibrary    Collections\n").unwrap();
/// assert!(output.messages.is_empty());
/// ```
#[inline]
pub fn parse(input: &str) -> RobotResult<RobotFileOutput> {
    robot_core::parse_str(input)
}

/// Parse test data for a specific grammar version.
///
/// ```rust
/// use robot::{parse_with_version, GrammarVersion};
///
/// let output = parse_with_version("*** Settings ***\nMeta: Owner    me\n", GrammarVersion::new(2, 9)).unwrap();
/// assert!(output.warnings().is_empty());
/// ```
pub fn parse_with_version(input: &str, version: GrammarVersion) -> RobotResult<RobotFileOutput> {
    let options = ParseOptions::builder().version(version).build();
    parse_with_options(input.as_bytes(), &options)
}

/// Read and parse a file.
///
/// Build messages carry the path as their file name.
pub fn parse_file(path: impl AsRef<Path>, version: GrammarVersion) -> RobotResult<RobotFileOutput> {
    let path = path.as_ref();
    let shown = path.display().to_string();
    let bytes = std::fs::read(path).with_context(|| format!("while reading {}", shown))?;
    debug!(path = %shown, bytes = bytes.len(), "read test data file");

    let options = ParseOptions::builder()
        .version(version)
        .file_name(shown.clone())
        .build();
    parse_with_options(&bytes, &options).with_context(|| format!("while parsing {}", shown))
}

/// Check that test data parses without ERROR build messages.
///
/// Warnings are allowed. The first ERROR message is returned as a
/// syntax error at its line.
pub fn validate(input: &str) -> RobotResult<()> {
    let output = parse(input)?;
    let result = match output.messages_of(Severity::Error).next() {
        Some(message) => Err(RobotError::syntax(message.message(), message.position().line())),
        None => Ok(()),
    };
    result
}

/// Index the keywords a parsed file defines, attributed to `source`.
pub fn keyword_index(file: &RobotFile, source: &str) -> KeywordIndex {
    let mut index = KeywordIndex::new();
    add_keywords(&mut index, file, source);
    index
}

/// Add the keywords a parsed file defines to an existing index.
pub fn add_keywords(index: &mut KeywordIndex, file: &RobotFile, source: &str) {
    if let Some(table) = &file.keywords {
        for keyword in &table.executables {
            index.add(keyword.name(), source);
        }
    }
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
