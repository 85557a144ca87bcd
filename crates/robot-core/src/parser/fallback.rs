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

//! Mappers for cells no specific mapper accepts.

use super::context::{CellInfo, ParsingContext};
use super::registry::ParsingMapper;
use super::settings::open_setting;
use super::state::ParsingState;
use crate::lex::{Recognition, Recognized, RobotToken, SettingKind, TableType, TokenType};

/// A settings table line whose first cell is not a known setting.
pub struct SettingUnknownMapper;

impl ParsingMapper for SettingUnknownMapper {
    fn id(&self) -> &'static str {
        "setting-unknown"
    }

    fn can_map(&self, _cell: &CellInfo, state: Option<ParsingState>, _ctx: &ParsingContext) -> bool {
        state == Some(ParsingState::TableInside(TableType::Settings))
    }

    fn map(&self, mut token: RobotToken, cell: &CellInfo, ctx: &mut ParsingContext) -> RobotToken {
        token.set_primary_type(TokenType::SettingDeclaration(SettingKind::Unknown));
        if let Some(Recognition {
            produced: Recognized::SettingDeclaration(kind),
            ..
        }) = cell.recognition
        {
            token.add_type(TokenType::SettingDeclaration(kind));
        }
        ctx.warn(format!("Unknown setting '{}'.", token.text()), token.position());
        open_setting(ctx, SettingKind::Unknown, token.clone());
        ctx.push(ParsingState::Setting(SettingKind::Unknown));
        token
    }
}

/// An indented line in a test case or keyword table before any name.
pub struct ExecutableOutsideMapper;

impl ParsingMapper for ExecutableOutsideMapper {
    fn id(&self) -> &'static str {
        "executable-outside"
    }

    fn can_map(&self, _cell: &CellInfo, state: Option<ParsingState>, _ctx: &ParsingContext) -> bool {
        matches!(
            state,
            Some(ParsingState::TableInside(TableType::TestCases | TableType::Keywords))
        )
    }

    fn map(&self, mut token: RobotToken, _cell: &CellInfo, ctx: &mut ParsingContext) -> RobotToken {
        let what = match ctx.top() {
            Some(ParsingState::TableInside(TableType::Keywords)) => "keyword",
            _ => "test case",
        };
        token.set_primary_type(TokenType::Unknown);
        ctx.warn(
            format!("Step '{}' is outside of any {}.", token.text(), what),
            token.position(),
        );
        ctx.push(ParsingState::Unknown);
        token
    }
}

/// Content outside any modelled table.
pub struct TrashMapper;

impl ParsingMapper for TrashMapper {
    fn id(&self) -> &'static str {
        "trash"
    }

    fn can_map(&self, _cell: &CellInfo, state: Option<ParsingState>, _ctx: &ParsingContext) -> bool {
        matches!(
            state,
            None | Some(ParsingState::Trash) | Some(ParsingState::Unknown)
        )
    }

    fn map(&self, mut token: RobotToken, _cell: &CellInfo, _ctx: &mut ParsingContext) -> RobotToken {
        token.set_primary_type(TokenType::Unknown);
        token
    }
}
