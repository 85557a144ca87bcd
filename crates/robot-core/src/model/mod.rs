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

//! In-memory model of a parsed test data file.
//!
//! The model keeps two views of the same tokens: [`RobotFile::lines`] holds
//! every cell, separator and end-of-line marker in source order (which is
//! what makes exact reconstruction possible), while the optional tables hold
//! the typed constructs.

pub mod executables;
pub mod settings;
pub mod variables;

pub use executables::{Executable, ExecutableRow, ExecutableTable, LocalSetting};
pub use settings::{Setting, SettingTable};
pub use variables::{DictionaryItem, Variable, VariableKind, VariableTable};

use crate::diagnostic::{BuildMessage, Severity};
use crate::lex::{EndOfLine, RobotToken, Separator, TableType};
use crate::version::GrammarVersion;

/// A table header line: the `*** ... ***` cell, column names and comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableHeader {
    pub declaration: RobotToken,
    pub columns: Vec<RobotToken>,
    pub comments: Vec<RobotToken>,
}

impl TableHeader {
    pub fn new(declaration: RobotToken) -> Self {
        Self {
            declaration,
            columns: Vec::new(),
            comments: Vec::new(),
        }
    }
}

/// A piece of a physical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineElement {
    Token(RobotToken),
    Separator(Separator),
}

impl LineElement {
    pub fn text(&self) -> &str {
        match self {
            LineElement::Token(t) => t.text(),
            LineElement::Separator(s) => &s.text,
        }
    }

    pub fn as_token(&self) -> Option<&RobotToken> {
        match self {
            LineElement::Token(t) => Some(t),
            LineElement::Separator(_) => None,
        }
    }
}

/// One physical line as parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotLine {
    pub number: usize,
    pub elements: Vec<LineElement>,
    pub eol: EndOfLine,
}

impl RobotLine {
    pub fn tokens(&self) -> impl Iterator<Item = &RobotToken> {
        self.elements.iter().filter_map(LineElement::as_token)
    }
}

/// A parsed file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RobotFile {
    pub file_name: Option<String>,
    /// A byte-order mark preceded the content.
    pub bom: bool,
    pub lines: Vec<RobotLine>,
    pub settings: Option<SettingTable>,
    pub variables: Option<VariableTable>,
    pub test_cases: Option<executables::ExecutableTable>,
    pub keywords: Option<executables::ExecutableTable>,
    /// Headers of tables this parser does not model.
    pub user_tables: Vec<TableHeader>,
}

impl RobotFile {
    /// Rebuild the exact source text.
    pub fn reconstruct(&self) -> String {
        let mut out = String::new();
        if self.bom {
            out.push('\u{FEFF}');
        }
        for line in &self.lines {
            for element in &line.elements {
                out.push_str(element.text());
            }
            out.push_str(line.eol.text());
        }
        out
    }

    /// Every token in source order.
    pub fn tokens(&self) -> impl Iterator<Item = &RobotToken> {
        self.lines.iter().flat_map(RobotLine::tokens)
    }

    pub fn has_table(&self, table: TableType) -> bool {
        match table {
            TableType::Settings => self.settings.is_some(),
            TableType::Variables => self.variables.is_some(),
            TableType::TestCases => self.test_cases.is_some(),
            TableType::Keywords => self.keywords.is_some(),
        }
    }

    pub fn headers(&self, table: TableType) -> &[TableHeader] {
        match table {
            TableType::Settings => self.settings.as_ref().map(|t| t.headers.as_slice()),
            TableType::Variables => self.variables.as_ref().map(|t| t.headers.as_slice()),
            TableType::TestCases => self.test_cases.as_ref().map(|t| t.headers.as_slice()),
            TableType::Keywords => self.keywords.as_ref().map(|t| t.headers.as_slice()),
        }
        .unwrap_or(&[])
    }
}

/// A parsed file together with its version and build messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotFileOutput {
    pub file: RobotFile,
    pub version: GrammarVersion,
    pub messages: Vec<BuildMessage>,
}

impl RobotFileOutput {
    pub fn messages_of(&self, severity: Severity) -> impl Iterator<Item = &BuildMessage> {
        self.messages.iter().filter(move |m| m.severity() == severity)
    }

    pub fn has_errors(&self) -> bool {
        self.messages_of(Severity::Error).next().is_some()
    }

    pub fn warnings(&self) -> Vec<&BuildMessage> {
        self.messages_of(Severity::Warn).collect()
    }
}
