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

//! Comment attachment.
//!
//! A `#` cell turns the rest of the line into a comment. The comment belongs
//! to the element the line was already extending; a comment on a line of its
//! own gets a holder element so it keeps its place in the table.

use super::context::{CellInfo, OpenElement, ParsingContext};
use super::settings::open_setting;
use super::state::ParsingState;
use super::variables::open_variable;
use crate::expression::VariableType;
use crate::lex::{RobotToken, SettingKind, TableType, TokenType};
use crate::model::{ExecutableRow, Variable, VariableKind};

/// Map a cell of a comment: the `#` cell itself or any cell after it.
pub(crate) fn map_comment(mut token: RobotToken, cell: &CellInfo, ctx: &mut ParsingContext) -> RobotToken {
    if ctx.top() == Some(ParsingState::Comment) {
        token.set_primary_type(TokenType::CommentContinue);
    } else {
        token.set_primary_type(TokenType::StartHashComment);
        ctx.comment_target = resolve_target(&token, cell, ctx);
        ctx.push(ParsingState::Comment);
    }

    if let Some(target) = ctx.comment_target {
        attach(ctx, target, token.clone());
    }
    token
}

fn resolve_target(token: &RobotToken, cell: &CellInfo, ctx: &mut ParsingContext) -> Option<OpenElement> {
    let state = ctx.top();
    if matches!(state, Some(ParsingState::TableHeader(_))) {
        return ctx.open;
    }
    if let Some(index) = variable_ending_on_current_line(ctx) {
        return Some(OpenElement::Variable(index));
    }
    if ctx.open_on_current_line() {
        return ctx.open;
    }
    if !cell.first_in_line {
        return None;
    }

    match state {
        Some(ParsingState::TableInside(TableType::Settings)) => {
            let holder = RobotToken::new(
                "",
                token.position(),
                TokenType::SettingDeclaration(SettingKind::Empty),
            );
            let index = open_setting(ctx, SettingKind::Empty, holder);
            Some(OpenElement::Setting(index))
        }
        Some(ParsingState::TableInside(TableType::Variables)) => {
            let holder = RobotToken::new(
                "",
                token.position(),
                TokenType::VariableDeclaration(VariableType::List),
            );
            let index = open_variable(ctx, Variable::new(holder, VariableKind::for_type(VariableType::List)));
            Some(OpenElement::Variable(index))
        }
        Some(ParsingState::ExecutableDeclaration(kind)) => {
            let index = ctx.open_executable_index(kind)?;
            let rows = &mut ctx.executables_mut(kind).executables.get_mut(index)?.rows;
            rows.push(ExecutableRow::default());
            let row = rows.len() - 1;
            ctx.set_open(OpenElement::Row(kind, index, row));
            Some(OpenElement::Row(kind, index, row))
        }
        Some(ParsingState::TableInside(table @ (TableType::TestCases | TableType::Keywords))) => {
            let what = match table {
                TableType::Keywords => "keyword",
                _ => "test case",
            };
            ctx.warn(
                format!("Comment '{}' is outside of any {}.", token.text(), what),
                token.position(),
            );
            None
        }
        // Comments before the first table or inside unmodelled tables.
        None | Some(ParsingState::Trash) | Some(ParsingState::Unknown) => None,
        Some(other) => {
            ctx.warn(
                format!("Comment '{}' cannot be attached in {:?}.", token.text(), other),
                token.position(),
            );
            None
        }
    }
}

/// The last variable of the table, when its last token is on this line.
fn variable_ending_on_current_line(ctx: &ParsingContext) -> Option<usize> {
    if ctx.top()?.table() != Some(TableType::Variables) {
        return None;
    }
    let variables = &ctx.file.variables.as_ref()?.variables;
    let index = variables.len().checked_sub(1)?;
    (variables[index].last_line() == ctx.current_line).then_some(index)
}

fn attach(ctx: &mut ParsingContext, target: OpenElement, token: RobotToken) {
    let comments = match target {
        OpenElement::Header(table, i) => ctx.headers_mut(table).get_mut(i).map(|h| &mut h.comments),
        OpenElement::Setting(i) => ctx.settings_mut().settings.get_mut(i).map(|s| &mut s.comments),
        OpenElement::Variable(i) => ctx.variables_mut().variables.get_mut(i).map(|v| &mut v.comments),
        OpenElement::Executable(kind, i) => ctx
            .executables_mut(kind)
            .executables
            .get_mut(i)
            .map(|e| &mut e.comments),
        OpenElement::LocalSetting(kind, i, j) => ctx
            .executables_mut(kind)
            .executables
            .get_mut(i)
            .and_then(|e| e.settings.get_mut(j))
            .map(|s| &mut s.comments),
        OpenElement::Row(kind, i, j) => ctx
            .executables_mut(kind)
            .executables
            .get_mut(i)
            .and_then(|e| e.rows.get_mut(j))
            .map(|r| &mut r.comments),
    };
    if let Some(comments) = comments {
        comments.push(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lex::FilePosition;
    use crate::model::Setting;
    use crate::version::GrammarVersion;

    fn token(text: &str, line: usize, column: usize) -> RobotToken {
        RobotToken::new(text, FilePosition::new(line, column, 0), TokenType::Unknown)
    }

    fn first() -> CellInfo {
        CellInfo {
            column: 0,
            first_in_line: true,
            recognition: None,
        }
    }

    fn later() -> CellInfo {
        CellInfo {
            column: 2,
            first_in_line: false,
            recognition: None,
        }
    }

    #[test]
    fn test_trailing_comment_attaches_to_open_setting() {
        let mut ctx = ParsingContext::new(GrammarVersion::V3_0, None);
        ctx.current_line = 3;
        ctx.push(ParsingState::TableInside(TableType::Settings));
        open_setting(
            &mut ctx,
            SettingKind::Library,
            RobotToken::detached("Library", TokenType::SettingDeclaration(SettingKind::Library)),
        );
        ctx.push(ParsingState::Setting(SettingKind::Library));
        let start = map_comment(token("# why", 3, 20), &later(), &mut ctx);
        let more = map_comment(token("more", 3, 30), &later(), &mut ctx);
        assert_eq!(start.primary_type(), TokenType::StartHashComment);
        assert_eq!(more.primary_type(), TokenType::CommentContinue);
        let setting: &Setting = &ctx.file.settings.as_ref().expect("table").settings[0];
        assert_eq!(setting.comments.len(), 2);
    }

    #[test]
    fn test_standalone_comment_in_settings_gets_holder() {
        let mut ctx = ParsingContext::new(GrammarVersion::V3_0, None);
        ctx.current_line = 5;
        ctx.push(ParsingState::TableInside(TableType::Settings));
        map_comment(token("# alone", 5, 0), &first(), &mut ctx);
        let setting = &ctx.file.settings.as_ref().expect("table").settings[0];
        assert_eq!(setting.kind, SettingKind::Empty);
        assert!(setting.declaration.is_empty());
        assert_eq!(setting.comments.len(), 1);
    }

    #[test]
    fn test_standalone_comment_in_variables_gets_holder() {
        let mut ctx = ParsingContext::new(GrammarVersion::V3_0, None);
        ctx.current_line = 5;
        ctx.push(ParsingState::TableInside(TableType::Variables));
        map_comment(token("# alone", 5, 0), &first(), &mut ctx);
        let variable = &ctx.file.variables.as_ref().expect("table").variables[0];
        assert!(variable.is_comment_holder());
        assert_eq!(variable.variable_type(), VariableType::List);
    }

    #[test]
    fn test_comment_joins_variable_ending_on_same_line() {
        let mut ctx = ParsingContext::new(GrammarVersion::V3_0, None);
        ctx.current_line = 4;
        ctx.push(ParsingState::TableInside(TableType::Variables));
        let declaration = RobotToken::new(
            "${a}",
            FilePosition::new(4, 0, 0),
            TokenType::VariableDeclaration(VariableType::Scalar),
        );
        ctx.variables_mut()
            .variables
            .push(Variable::new(declaration, VariableKind::for_type(VariableType::Scalar)));
        ctx.push(ParsingState::Variable(VariableType::Scalar));

        map_comment(token("# same line", 4, 10), &later(), &mut ctx);
        let variables = &ctx.file.variables.as_ref().expect("table").variables;
        assert_eq!(variables.len(), 1);
        assert_eq!(variables[0].comments.len(), 1);
        assert_eq!(variables[0].last_line(), 4);
    }

    #[test]
    fn test_comment_on_next_line_gets_own_holder() {
        let mut ctx = ParsingContext::new(GrammarVersion::V3_0, None);
        ctx.current_line = 5;
        ctx.push(ParsingState::TableInside(TableType::Variables));
        let declaration = RobotToken::new(
            "${a}",
            FilePosition::new(4, 0, 0),
            TokenType::VariableDeclaration(VariableType::Scalar),
        );
        ctx.variables_mut()
            .variables
            .push(Variable::new(declaration, VariableKind::for_type(VariableType::Scalar)));

        map_comment(token("# next", 5, 0), &first(), &mut ctx);
        let variables = &ctx.file.variables.as_ref().expect("table").variables;
        assert_eq!(variables.len(), 2);
        assert!(variables[1].is_comment_holder());
    }

    #[test]
    fn test_comment_before_any_executable_warns() {
        let mut ctx = ParsingContext::new(GrammarVersion::V3_0, None);
        ctx.push(ParsingState::TableInside(TableType::TestCases));
        map_comment(token("# lost", 2, 0), &first(), &mut ctx);
        assert_eq!(ctx.messages.len(), 1);
    }

    #[test]
    fn test_comment_in_trash_is_silent() {
        let mut ctx = ParsingContext::new(GrammarVersion::V3_0, None);
        map_comment(token("# preamble", 1, 0), &first(), &mut ctx);
        assert!(ctx.messages.is_empty());
        assert_eq!(ctx.top(), Some(ParsingState::Comment));
    }
}
