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

//! Error types for Robot test data parsing.
//!
//! Only conditions that stop a parse are errors. Everything a parse can
//! recover from is reported as a [`BuildMessage`](crate::BuildMessage).

use std::fmt;
use thiserror::Error;

/// The kind of error that occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RobotErrorKind {
    /// Input is not valid UTF-8.
    Syntax,
    /// Grammar version string could not be understood.
    Version,
    /// Security limit exceeded.
    Security,
    /// I/O error (file operations).
    IO,
}

impl fmt::Display for RobotErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => write!(f, "SyntaxError"),
            Self::Version => write!(f, "VersionError"),
            Self::Security => write!(f, "SecurityError"),
            Self::IO => write!(f, "IOError"),
        }
    }
}

/// An error that stopped a parse.
#[derive(Debug, Clone, Error)]
#[error("{kind} at line {line}: {message}")]
pub struct RobotError {
    /// The kind of error.
    pub kind: RobotErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Line number (1-based, 0 when the error is not tied to a line).
    pub line: usize,
    /// Column number (0-based character column, optional).
    pub column: Option<usize>,
    /// Additional context (e.g., "while parsing suite.robot").
    pub context: Option<String>,
}

impl RobotError {
    /// Create a new error.
    pub fn new(kind: RobotErrorKind, message: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            line,
            column: None,
            context: None,
        }
    }

    /// Add column information.
    pub fn with_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    /// Add context information.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    // Convenience constructors for each error kind
    pub fn syntax(message: impl Into<String>, line: usize) -> Self {
        Self::new(RobotErrorKind::Syntax, message, line)
    }

    pub fn version(message: impl Into<String>) -> Self {
        Self::new(RobotErrorKind::Version, message, 0)
    }

    pub fn security(message: impl Into<String>, line: usize) -> Self {
        Self::new(RobotErrorKind::Security, message, line)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(RobotErrorKind::IO, message, 0)
    }
}

/// Result type for Robot test data operations.
pub type RobotResult<T> = Result<T, RobotError>;
