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

//! Build messages produced while parsing.

use crate::lex::FilePosition;

/// Severity level for build messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// Informational
    Info,
    /// Warning - the input was accepted with a recovery
    Warn,
    /// Error - the parser hit an internal inconsistency
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// A recoverable problem found while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildMessage {
    severity: Severity,
    message: String,
    position: FilePosition,
    file_name: Option<String>,
}

impl BuildMessage {
    pub fn new(severity: Severity, message: impl Into<String>, position: FilePosition) -> Self {
        Self {
            severity,
            message: message.into(),
            position,
            file_name: None,
        }
    }

    pub fn info(message: impl Into<String>, position: FilePosition) -> Self {
        Self::new(Severity::Info, message, position)
    }

    pub fn warn(message: impl Into<String>, position: FilePosition) -> Self {
        Self::new(Severity::Warn, message, position)
    }

    pub fn error(message: impl Into<String>, position: FilePosition) -> Self {
        Self::new(Severity::Error, message, position)
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn position(&self) -> FilePosition {
        self.position
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }
}

impl std::fmt::Display for BuildMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] ", self.severity)?;
        if let Some(name) = &self.file_name {
            write!(f, "{}: ", name)?;
        }
        write!(f, "{}: {}", self.position, self.message)
    }
}
