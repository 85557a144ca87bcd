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

//! Variables table mappers.

use super::context::{CellInfo, OpenElement, ParsingContext};
use super::registry::ParsingMapper;
use super::state::ParsingState;
use super::tag_variable_usage;
use crate::expression::VariableType;
use crate::lex::{RobotToken, TableType, TokenType};
use crate::model::{DictionaryItem, Variable, VariableKind};
use once_cell::sync::Lazy;
use regex::Regex;

static SPACED_SIGIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*([$@&%])\s+\{").expect("valid regex"));

/// Open a new variable and make it the current element.
pub(crate) fn open_variable(ctx: &mut ParsingContext, variable: Variable) -> usize {
    let variables = &mut ctx.variables_mut().variables;
    variables.push(variable);
    let index = variables.len() - 1;
    ctx.set_open(OpenElement::Variable(index));
    index
}

/// First cell of a variables table line.
pub struct VariableDeclarationMapper;

impl ParsingMapper for VariableDeclarationMapper {
    fn id(&self) -> &'static str {
        "variable-declaration"
    }

    fn can_map(&self, _cell: &CellInfo, state: Option<ParsingState>, _ctx: &ParsingContext) -> bool {
        state == Some(ParsingState::TableInside(TableType::Variables))
    }

    fn map(&self, mut token: RobotToken, _cell: &CellInfo, ctx: &mut ParsingContext) -> RobotToken {
        let declared = VariableType::of_declaration(token.text());
        let variable_type = match declared {
            VariableType::Scalar | VariableType::List | VariableType::Dictionary => declared,
            VariableType::Environment | VariableType::Invalid => {
                if let Some(caps) = SPACED_SIGIL.captures(token.text()) {
                    ctx.warn(
                        format!("Incorrect variable id with space between '{}' and '{{'.", &caps[1]),
                        token.position(),
                    );
                } else {
                    ctx.warn(
                        format!("Invalid variable declaration '{}'.", token.text()),
                        token.position(),
                    );
                }
                VariableType::Invalid
            }
        };

        token.set_primary_type(TokenType::VariableDeclaration(variable_type));
        open_variable(ctx, Variable::new(token.clone(), VariableKind::for_type(variable_type)));
        ctx.push(ParsingState::Variable(variable_type));
        token
    }
}

/// Value cells of the open variable.
pub struct VariableValueMapper;

impl ParsingMapper for VariableValueMapper {
    fn id(&self) -> &'static str {
        "variable-value"
    }

    fn can_map(&self, _cell: &CellInfo, state: Option<ParsingState>, _ctx: &ParsingContext) -> bool {
        matches!(state, Some(ParsingState::Variable(_)))
    }

    fn map(&self, mut token: RobotToken, _cell: &CellInfo, ctx: &mut ParsingContext) -> RobotToken {
        token.set_primary_type(TokenType::VariableValue);
        tag_variable_usage(&mut token, ctx.max_expression_depth);
        let line = ctx.current_line;

        let missing_equals = match ctx.open_variable_mut() {
            Some(variable) => {
                let is_dictionary = variable.variable_type() == VariableType::Dictionary;
                variable.push_value(token.clone());
                is_dictionary && DictionaryItem::parse(token.clone()).value.is_none()
            }
            None => {
                ctx.warn(
                    format!("Value '{}' has no variable to belong to.", token.text()),
                    token.position(),
                );
                return token;
            }
        };
        ctx.open_line = line;

        if missing_equals {
            ctx.warn(
                format!("Invalid dictionary item '{}'. Items must use 'key=value' syntax.", token.text()),
                token.position(),
            );
        }
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lex::FilePosition;
    use crate::version::GrammarVersion;

    fn cell() -> CellInfo {
        CellInfo {
            column: 0,
            first_in_line: true,
            recognition: None,
        }
    }

    fn token(text: &str) -> RobotToken {
        RobotToken::new(text, FilePosition::new(2, 0, 0), TokenType::Unknown)
    }

    fn ctx() -> ParsingContext {
        let mut ctx = ParsingContext::new(GrammarVersion::V3_0, None);
        ctx.push(ParsingState::TableInside(TableType::Variables));
        ctx
    }

    #[test]
    fn test_scalar_declaration() {
        let mut ctx = ctx();
        let mapped = VariableDeclarationMapper.map(token("${host}="), &cell(), &mut ctx);
        assert_eq!(mapped.primary_type(), TokenType::VariableDeclaration(VariableType::Scalar));
        assert_eq!(ctx.top(), Some(ParsingState::Variable(VariableType::Scalar)));
        VariableValueMapper.map(token("localhost"), &cell(), &mut ctx);
        let table = ctx.file.variables.as_ref().expect("table");
        assert_eq!(table.get("host").map(|v| v.values().len()), Some(1));
        assert!(ctx.messages.is_empty());
    }

    #[test]
    fn test_spaced_sigil_warns() {
        let mut ctx = ctx();
        let mapped = VariableDeclarationMapper.map(token("$ {x}"), &cell(), &mut ctx);
        assert_eq!(mapped.primary_type(), TokenType::VariableDeclaration(VariableType::Invalid));
        assert_eq!(
            ctx.messages[0].message(),
            "Incorrect variable id with space between '$' and '{'."
        );
    }

    #[test]
    fn test_environment_declaration_is_invalid() {
        let mut ctx = ctx();
        VariableDeclarationMapper.map(token("%{HOME}"), &cell(), &mut ctx);
        assert_eq!(ctx.messages.len(), 1);
        assert_eq!(ctx.top(), Some(ParsingState::Variable(VariableType::Invalid)));
    }

    #[test]
    fn test_dictionary_item_without_equals_warns() {
        let mut ctx = ctx();
        VariableDeclarationMapper.map(token("&{d}"), &cell(), &mut ctx);
        VariableValueMapper.map(token("a=1"), &cell(), &mut ctx);
        assert!(ctx.messages.is_empty());
        VariableValueMapper.map(token("b"), &cell(), &mut ctx);
        assert_eq!(ctx.messages.len(), 1);
    }

    #[test]
    fn test_value_with_variable_is_tagged() {
        let mut ctx = ctx();
        VariableDeclarationMapper.map(token("${url}"), &cell(), &mut ctx);
        let value = VariableValueMapper.map(token("http://${host}/"), &cell(), &mut ctx);
        assert!(value.has_type(TokenType::VariableUsage));
    }
}
