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

//! Table header lines.

use super::context::{CellInfo, OpenElement, ParsingContext};
use super::registry::ParsingMapper;
use super::state::ParsingState;
use crate::lex::{Recognition, Recognized, RobotToken, TokenType};
use crate::model::TableHeader;
use tracing::trace;

/// Whether a cell opens a table: the first cell of a line, in the first
/// column, starting with `*`.
pub(crate) fn is_header_cell(text: &str, cell: &CellInfo) -> bool {
    cell.first_in_line && cell.column == 0 && text.trim_start().starts_with('*')
}

/// Open the table named by a header cell.
///
/// A cell that names one of the modelled tables exactly opens that table;
/// anything else starting with `*` opens a user table whose content is kept
/// only for reconstruction.
pub(crate) fn map_header(mut token: RobotToken, cell: &CellInfo, ctx: &mut ParsingContext) -> RobotToken {
    ctx.previous_line = None;
    ctx.stack.clear();

    match cell.recognition {
        Some(Recognition {
            produced: Recognized::TableHeader(table),
            exact: true,
            ..
        }) => {
            trace!(%table, line = token.line(), "table header");
            token.set_primary_type(TokenType::TableHeader(table));
            let headers = ctx.headers_mut(table);
            headers.push(TableHeader::new(token.clone()));
            let index = headers.len() - 1;
            ctx.push(ParsingState::TableHeader(table));
            ctx.set_open(OpenElement::Header(table, index));
        }
        other => {
            trace!(text = token.text(), line = token.line(), "user table header");
            token.set_primary_type(TokenType::UserOwnTableHeader);
            if let Some(Recognition {
                produced: Recognized::TableHeader(table),
                ..
            }) = other
            {
                token.add_type(TokenType::TableHeader(table));
            }
            ctx.file.user_tables.push(TableHeader::new(token.clone()));
            ctx.push(ParsingState::Trash);
            ctx.open = None;
        }
    }
    token
}

/// Column names following the header cell.
pub struct TableHeaderColumnMapper;

impl ParsingMapper for TableHeaderColumnMapper {
    fn id(&self) -> &'static str {
        "table-header-column"
    }

    fn can_map(&self, _cell: &CellInfo, state: Option<ParsingState>, _ctx: &ParsingContext) -> bool {
        matches!(state, Some(ParsingState::TableHeader(_)))
    }

    fn map(&self, mut token: RobotToken, _cell: &CellInfo, ctx: &mut ParsingContext) -> RobotToken {
        token.set_primary_type(TokenType::TableHeaderColumn);
        if let Some(OpenElement::Header(table, index)) = ctx.open {
            if let Some(header) = ctx.headers_mut(table).get_mut(index) {
                header.columns.push(token.clone());
            }
        }
        token
    }
}
