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

//! Test case and user keyword tables.
//!
//! Both tables hold the same structure: a named executable with bracketed
//! local settings and executable rows. A `*** Tasks ***` table is a test
//! case table under another header.

use super::TableHeader;
use crate::lex::{ExecutableKind, LocalSettingKind, RobotToken, TokenType, ValueRole};

/// A `[Setting]` line inside a test case or keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalSetting {
    pub kind: LocalSettingKind,
    pub declaration: RobotToken,
    pub values: Vec<RobotToken>,
    pub comments: Vec<RobotToken>,
}

impl LocalSetting {
    pub fn new(kind: LocalSettingKind, declaration: RobotToken) -> Self {
        Self {
            kind,
            declaration,
            values: Vec::new(),
            comments: Vec::new(),
        }
    }

    pub fn values_with_role(&self, role: ValueRole) -> impl Iterator<Item = &RobotToken> {
        self.values.iter().filter(
            move |t| matches!(t.primary_type(), TokenType::LocalSettingValue(_, _, r) if r == role),
        )
    }

    pub fn keyword_name(&self) -> Option<&RobotToken> {
        self.values_with_role(ValueRole::KeywordName).next()
    }

    pub fn is_disabled(&self) -> bool {
        self.keyword_name()
            .is_some_and(|t| t.has_type(TokenType::DisabledKeyword))
    }
}

/// One step: `${a}=    Action    arg1    arg2`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutableRow {
    pub assignments: Vec<RobotToken>,
    pub action: Option<RobotToken>,
    pub arguments: Vec<RobotToken>,
    pub comments: Vec<RobotToken>,
}

impl ExecutableRow {
    /// A row with neither assignments nor action, e.g. a comment-only line.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty() && self.action.is_none()
    }

    pub fn action_name(&self) -> Option<&str> {
        self.action.as_ref().map(RobotToken::text)
    }
}

/// A test case or user keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Executable {
    pub kind: ExecutableKind,
    pub name: RobotToken,
    pub settings: Vec<LocalSetting>,
    pub rows: Vec<ExecutableRow>,
    pub comments: Vec<RobotToken>,
}

impl Executable {
    pub fn new(kind: ExecutableKind, name: RobotToken) -> Self {
        Self {
            kind,
            name,
            settings: Vec::new(),
            rows: Vec::new(),
            comments: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.name.text()
    }

    pub fn setting(&self, kind: LocalSettingKind) -> Option<&LocalSetting> {
        self.settings.iter().find(|s| s.kind == kind)
    }

    /// Declared `[Arguments]` of a keyword.
    pub fn arguments(&self) -> Vec<&str> {
        self.setting(LocalSettingKind::Arguments)
            .map(|s| s.values.iter().map(RobotToken::text).collect())
            .unwrap_or_default()
    }

    /// Rows that call something.
    pub fn steps(&self) -> impl Iterator<Item = &ExecutableRow> {
        self.rows.iter().filter(|r| !r.is_empty())
    }
}

/// The `*** Test Cases ***` or `*** Keywords ***` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutableTable {
    pub kind: ExecutableKind,
    pub headers: Vec<TableHeader>,
    pub executables: Vec<Executable>,
}

impl ExecutableTable {
    pub fn new(kind: ExecutableKind) -> Self {
        Self {
            kind,
            headers: Vec::new(),
            executables: Vec::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Executable> {
        self.executables.iter().find(|e| e.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.executables.iter().map(Executable::name).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.executables.is_empty()
    }

    /// Declared with a `*** Task(s) ***` header.
    pub fn is_task_table(&self) -> bool {
        self.headers.iter().any(|header| {
            header
                .declaration
                .text()
                .trim_start_matches(|c: char| c == '*' || c.is_whitespace())
                .get(..4)
                .is_some_and(|word| word.eq_ignore_ascii_case("task"))
        })
    }
}
