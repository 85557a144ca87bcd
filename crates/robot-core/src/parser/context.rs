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

//! Mutable state threaded through a single parse.

use super::state::ParsingState;
use crate::diagnostic::BuildMessage;
use crate::lex::{ExecutableKind, FilePosition, Recognition, TableType};
use crate::model::{
    Executable, ExecutableRow, ExecutableTable, LocalSetting, RobotFile, Setting, SettingTable,
    TableHeader, Variable, VariableTable,
};
use crate::version::GrammarVersion;
use tracing::debug;

/// The model element that comments and continuation lines attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenElement {
    Header(TableType, usize),
    Setting(usize),
    Variable(usize),
    Executable(ExecutableKind, usize),
    LocalSetting(ExecutableKind, usize, usize),
    Row(ExecutableKind, usize, usize),
}

/// Saved at the end of a content line so a continuation can resume it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviousLine {
    pub stack: Vec<ParsingState>,
    pub open: Option<OpenElement>,
}

/// What the parser knows about the cell being mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellInfo {
    /// Logical column of the cell.
    pub column: usize,
    /// No content cell preceded it on this line.
    pub first_in_line: bool,
    pub recognition: Option<Recognition>,
}

/// Parser state and the model built so far.
#[derive(Debug)]
pub struct ParsingContext {
    pub version: GrammarVersion,
    pub max_expression_depth: usize,
    pub file: RobotFile,
    pub messages: Vec<BuildMessage>,
    pub stack: Vec<ParsingState>,
    pub open: Option<OpenElement>,
    /// Line on which [`Self::open`] was last extended.
    pub open_line: usize,
    pub previous_line: Option<PreviousLine>,
    pub current_line: usize,
    /// Where the comment on the current line is being collected.
    pub comment_target: Option<OpenElement>,
}

impl ParsingContext {
    pub fn new(version: GrammarVersion, file_name: Option<String>) -> Self {
        Self {
            version,
            max_expression_depth: crate::Limits::default().max_expression_depth,
            file: RobotFile {
                file_name,
                ..RobotFile::default()
            },
            messages: Vec::new(),
            stack: Vec::new(),
            open: None,
            open_line: 0,
            previous_line: None,
            current_line: 0,
            comment_target: None,
        }
    }

    pub fn top(&self) -> Option<ParsingState> {
        self.stack.last().copied()
    }

    pub fn push(&mut self, state: ParsingState) {
        self.stack.push(state);
    }

    /// Pop states above the nearest line-level state.
    pub fn pop_to_line_level(&mut self) {
        while let Some(top) = self.top() {
            if top.is_line_level() {
                break;
            }
            self.stack.pop();
        }
    }

    pub fn set_open(&mut self, open: OpenElement) {
        self.open = Some(open);
        self.open_line = self.current_line;
    }

    /// The open element was touched on the current line.
    pub fn open_on_current_line(&self) -> bool {
        self.open.is_some() && self.open_line == self.current_line
    }

    // ==================== Messages ====================

    pub fn warn(&mut self, message: impl Into<String>, position: FilePosition) {
        let message = message.into();
        debug!(line = position.line(), %message, "recovered");
        let mut msg = BuildMessage::warn(message, position);
        if let Some(name) = &self.file.file_name {
            msg = msg.with_file_name(name.clone());
        }
        self.messages.push(msg);
    }

    pub fn error(&mut self, message: impl Into<String>, position: FilePosition) {
        let mut msg = BuildMessage::error(message, position);
        if let Some(name) = &self.file.file_name {
            msg = msg.with_file_name(name.clone());
        }
        self.messages.push(msg);
    }

    // ==================== Tables ====================

    pub fn settings_mut(&mut self) -> &mut SettingTable {
        self.file.settings.get_or_insert_with(SettingTable::default)
    }

    pub fn variables_mut(&mut self) -> &mut VariableTable {
        self.file.variables.get_or_insert_with(VariableTable::default)
    }

    pub fn executables_mut(&mut self, kind: ExecutableKind) -> &mut ExecutableTable {
        let slot = match kind {
            ExecutableKind::TestCase => &mut self.file.test_cases,
            ExecutableKind::Keyword => &mut self.file.keywords,
        };
        slot.get_or_insert_with(|| ExecutableTable::new(kind))
    }

    pub fn headers_mut(&mut self, table: TableType) -> &mut Vec<TableHeader> {
        match table {
            TableType::Settings => &mut self.settings_mut().headers,
            TableType::Variables => &mut self.variables_mut().headers,
            TableType::TestCases => &mut self.executables_mut(ExecutableKind::TestCase).headers,
            TableType::Keywords => &mut self.executables_mut(ExecutableKind::Keyword).headers,
        }
    }

    // ==================== Open element access ====================

    pub fn open_setting_mut(&mut self) -> Option<&mut Setting> {
        match self.open {
            Some(OpenElement::Setting(i)) => self.file.settings.as_mut()?.settings.get_mut(i),
            _ => None,
        }
    }

    pub fn open_variable_mut(&mut self) -> Option<&mut Variable> {
        match self.open {
            Some(OpenElement::Variable(i)) => self.file.variables.as_mut()?.variables.get_mut(i),
            _ => None,
        }
    }

    /// The executable that is open, directly or through one of its parts.
    pub fn open_executable_mut(&mut self) -> Option<&mut Executable> {
        let (kind, index) = match self.open? {
            OpenElement::Executable(k, i)
            | OpenElement::LocalSetting(k, i, _)
            | OpenElement::Row(k, i, _) => (k, i),
            _ => return None,
        };
        self.executables_mut(kind).executables.get_mut(index)
    }

    pub fn open_executable_index(&self, kind: ExecutableKind) -> Option<usize> {
        match self.open? {
            OpenElement::Executable(k, i)
            | OpenElement::LocalSetting(k, i, _)
            | OpenElement::Row(k, i, _)
                if k == kind =>
            {
                Some(i)
            }
            _ => None,
        }
    }

    pub fn open_local_setting_mut(&mut self) -> Option<&mut LocalSetting> {
        match self.open? {
            OpenElement::LocalSetting(k, i, j) => self.executables_mut(k).executables.get_mut(i)?.settings.get_mut(j),
            _ => None,
        }
    }

    pub fn open_row(&self) -> Option<&ExecutableRow> {
        match self.open? {
            OpenElement::Row(k, i, j) => {
                let table = match k {
                    ExecutableKind::TestCase => self.file.test_cases.as_ref(),
                    ExecutableKind::Keyword => self.file.keywords.as_ref(),
                }?;
                table.executables.get(i)?.rows.get(j)
            }
            _ => None,
        }
    }

    pub fn open_row_mut(&mut self) -> Option<&mut ExecutableRow> {
        match self.open? {
            OpenElement::Row(k, i, j) => self.executables_mut(k).executables.get_mut(i)?.rows.get_mut(j),
            _ => None,
        }
    }

    /// The open row already has its action.
    pub fn row_has_action(&self) -> bool {
        self.open_row().is_some_and(|row| row.action.is_some())
    }
}
