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

//! Test case and keyword table mappers.
//!
//! Both tables share one set of mappers, parameterized by
//! [`ExecutableKind`]. A line starting in the first column names a new
//! executable; indented lines hold either a bracketed local setting or a
//! step made of assignments, an action and its arguments.

use super::context::{CellInfo, OpenElement, ParsingContext};
use super::registry::ParsingMapper;
use super::state::ParsingState;
use super::{mark_disabled_keyword, tag_variable_usage};
use crate::expression::{extract_variables_with_depth, VariableType};
use crate::lex::{
    ExecutableKind, LocalSettingKind, Recognition, Recognized, RobotToken, TokenType, ValueRole,
};
use crate::model::{Executable, ExecutableRow, LocalSetting};

fn is_local_setting(cell: &CellInfo) -> bool {
    matches!(
        cell.recognition,
        Some(Recognition {
            produced: Recognized::LocalSetting(_),
            ..
        })
    )
}

fn executable_noun(kind: ExecutableKind) -> &'static str {
    match kind {
        ExecutableKind::TestCase => "test case",
        ExecutableKind::Keyword => "keyword",
    }
}

/// Whether a cell assigns the action's return value, as in `${x}=`.
pub(crate) fn is_assignment(text: &str, max_depth: usize) -> bool {
    let candidate = text.trim().trim_end_matches('=').trim_end();
    if candidate.is_empty() {
        return false;
    }
    if !matches!(
        VariableType::of_declaration(candidate),
        VariableType::Scalar | VariableType::List | VariableType::Dictionary
    ) {
        return false;
    }
    let found = extract_variables_with_depth(candidate, max_depth);
    let char_count = candidate.chars().count();
    matches!(
        found.variables.first(),
        Some(v) if v.range.start == 0 && v.range.end == char_count && v.indexes.is_empty()
    )
}

/// First-column cell naming a test case or keyword.
pub struct ExecutableNameMapper(pub ExecutableKind);

impl ParsingMapper for ExecutableNameMapper {
    fn id(&self) -> &'static str {
        match self.0 {
            ExecutableKind::TestCase => "test-case-name",
            ExecutableKind::Keyword => "keyword-name",
        }
    }

    fn can_map(&self, cell: &CellInfo, state: Option<ParsingState>, _ctx: &ParsingContext) -> bool {
        let kind = self.0;
        cell.column == 0
            && (state == Some(ParsingState::TableInside(kind.table()))
                || state == Some(ParsingState::ExecutableDeclaration(kind)))
    }

    fn map(&self, mut token: RobotToken, _cell: &CellInfo, ctx: &mut ParsingContext) -> RobotToken {
        let kind = self.0;
        token.set_primary_type(TokenType::ExecutableName(kind));
        tag_variable_usage(&mut token, ctx.max_expression_depth);

        if ctx.top() == Some(ParsingState::ExecutableDeclaration(kind)) {
            ctx.stack.pop();
        }
        let executables = &mut ctx.executables_mut(kind).executables;
        executables.push(Executable::new(kind, token.clone()));
        let index = executables.len() - 1;
        ctx.set_open(OpenElement::Executable(kind, index));
        ctx.push(ParsingState::ExecutableDeclaration(kind));
        token
    }
}

/// `[Setup]`, `[Arguments]` and the other bracketed settings.
pub struct LocalSettingMapper(pub ExecutableKind);

impl ParsingMapper for LocalSettingMapper {
    fn id(&self) -> &'static str {
        match self.0 {
            ExecutableKind::TestCase => "test-case-setting",
            ExecutableKind::Keyword => "keyword-setting",
        }
    }

    fn can_map(&self, cell: &CellInfo, state: Option<ParsingState>, _ctx: &ParsingContext) -> bool {
        cell.column > 0
            && state == Some(ParsingState::ExecutableDeclaration(self.0))
            && is_local_setting(cell)
    }

    fn map(&self, mut token: RobotToken, cell: &CellInfo, ctx: &mut ParsingContext) -> RobotToken {
        let kind = self.0;
        let (recognized, exact) = match cell.recognition {
            Some(Recognition {
                produced: Recognized::LocalSetting(local),
                exact,
                ..
            }) => (local, exact),
            _ => (LocalSettingKind::Unknown, false),
        };

        let local = if exact && recognized.is_allowed_for(kind) {
            recognized
        } else {
            LocalSettingKind::Unknown
        };
        token.set_primary_type(TokenType::LocalSettingDeclaration(kind, local));
        if local != recognized {
            token.add_type(TokenType::LocalSettingDeclaration(kind, recognized));
        }
        if local == LocalSettingKind::Unknown {
            let message = if exact && recognized != LocalSettingKind::Unknown {
                format!(
                    "Setting '{}' is not allowed in {}.",
                    token.text().trim(),
                    executable_noun(kind)
                )
            } else {
                format!(
                    "Unknown setting '{}' used in {}.",
                    token.text().trim(),
                    executable_noun(kind)
                )
            };
            ctx.warn(message, token.position());
        }

        let Some(index) = ctx.open_executable_index(kind) else {
            return token;
        };
        let settings = &mut ctx.executables_mut(kind).executables[index].settings;
        settings.push(LocalSetting::new(local, token.clone()));
        let setting_index = settings.len() - 1;
        ctx.set_open(OpenElement::LocalSetting(kind, index, setting_index));
        ctx.push(ParsingState::LocalSetting(kind, local));
        token
    }
}

/// Value cells of the open local setting.
pub struct LocalSettingValueMapper(pub ExecutableKind);

impl ParsingMapper for LocalSettingValueMapper {
    fn id(&self) -> &'static str {
        match self.0 {
            ExecutableKind::TestCase => "test-case-setting-value",
            ExecutableKind::Keyword => "keyword-setting-value",
        }
    }

    fn can_map(&self, _cell: &CellInfo, state: Option<ParsingState>, _ctx: &ParsingContext) -> bool {
        matches!(state, Some(ParsingState::LocalSetting(k, _)) if k == self.0)
    }

    fn map(&self, mut token: RobotToken, _cell: &CellInfo, ctx: &mut ParsingContext) -> RobotToken {
        let kind = self.0;
        let version = ctx.version;
        let max_depth = ctx.max_expression_depth;
        let line = ctx.current_line;
        let Some(setting) = ctx.open_local_setting_mut() else {
            token.set_primary_type(TokenType::Unknown);
            return token;
        };

        let role = local_value_role(setting.kind, setting.values.len());
        token.set_primary_type(TokenType::LocalSettingValue(kind, setting.kind, role));
        if role == ValueRole::KeywordName {
            mark_disabled_keyword(&mut token, version);
        }
        tag_variable_usage(&mut token, max_depth);
        setting.values.push(token.clone());
        ctx.open_line = line;
        token
    }
}

/// The role of the value at `position` inside a local setting.
pub(crate) fn local_value_role(kind: LocalSettingKind, position: usize) -> ValueRole {
    use LocalSettingKind as L;
    use ValueRole as R;
    let first_or = |first: ValueRole, rest: ValueRole| if position == 0 { first } else { rest };
    match kind {
        L::Documentation => R::Text,
        L::Tags => R::TagName,
        L::Setup | L::Teardown => first_or(R::KeywordName, R::KeywordArgument),
        L::Template => first_or(R::KeywordName, R::UnwantedArgument),
        L::Timeout => first_or(R::TimeoutValue, R::TimeoutMessage),
        L::Arguments | L::Unknown => R::Argument,
        L::Return => R::Value,
    }
}

/// Assignments and the action of a step.
pub struct ActionMapper(pub ExecutableKind);

impl ParsingMapper for ActionMapper {
    fn id(&self) -> &'static str {
        match self.0 {
            ExecutableKind::TestCase => "test-case-action",
            ExecutableKind::Keyword => "keyword-action",
        }
    }

    fn can_map(&self, cell: &CellInfo, state: Option<ParsingState>, ctx: &ParsingContext) -> bool {
        let kind = self.0;
        match state {
            Some(ParsingState::ExecutableDeclaration(k)) if k == kind => {
                cell.column > 0 && !is_local_setting(cell)
            }
            Some(ParsingState::ExecutableRow(k)) if k == kind => !ctx.row_has_action(),
            _ => false,
        }
    }

    fn map(&self, mut token: RobotToken, _cell: &CellInfo, ctx: &mut ParsingContext) -> RobotToken {
        let kind = self.0;
        let max_depth = ctx.max_expression_depth;

        if ctx.top() == Some(ParsingState::ExecutableDeclaration(kind)) {
            let Some(index) = ctx.open_executable_index(kind) else {
                token.set_primary_type(TokenType::Unknown);
                return token;
            };
            let rows = &mut ctx.executables_mut(kind).executables[index].rows;
            rows.push(ExecutableRow::default());
            let row_index = rows.len() - 1;
            ctx.set_open(OpenElement::Row(kind, index, row_index));
            ctx.push(ParsingState::ExecutableRow(kind));
        }

        let assignment = is_assignment(token.text(), max_depth);
        if assignment {
            token.set_primary_type(TokenType::VariableAssignment);
        } else {
            token.set_primary_type(TokenType::ActionName(kind));
        }
        tag_variable_usage(&mut token, max_depth);

        let line = ctx.current_line;
        if let Some(row) = ctx.open_row_mut() {
            if assignment {
                row.assignments.push(token.clone());
            } else {
                row.action = Some(token.clone());
            }
            ctx.open_line = line;
        }
        token
    }
}

/// Cells after the action of a step.
pub struct ActionArgumentMapper(pub ExecutableKind);

impl ParsingMapper for ActionArgumentMapper {
    fn id(&self) -> &'static str {
        match self.0 {
            ExecutableKind::TestCase => "test-case-argument",
            ExecutableKind::Keyword => "keyword-argument",
        }
    }

    fn can_map(&self, _cell: &CellInfo, state: Option<ParsingState>, ctx: &ParsingContext) -> bool {
        state == Some(ParsingState::ExecutableRow(self.0)) && ctx.row_has_action()
    }

    fn map(&self, mut token: RobotToken, _cell: &CellInfo, ctx: &mut ParsingContext) -> RobotToken {
        token.set_primary_type(TokenType::ActionArgument(self.0));
        tag_variable_usage(&mut token, ctx.max_expression_depth);
        let line = ctx.current_line;
        if let Some(row) = ctx.open_row_mut() {
            row.arguments.push(token.clone());
            ctx.open_line = line;
        }
        token
    }
}
