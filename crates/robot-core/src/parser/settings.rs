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

//! Settings table mappers.

use super::context::{CellInfo, OpenElement, ParsingContext};
use super::registry::ParsingMapper;
use super::state::ParsingState;
use super::{mark_disabled_keyword, tag_variable_usage};
use crate::lex::{Recognition, Recognized, RobotToken, SettingKind, TableType, TokenType, ValueRole};
use crate::model::Setting;
use crate::version::GrammarVersion;
use once_cell::sync::Lazy;
use regex::Regex;

static WITH_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*WITH\s+NAME\s*$").expect("valid regex"));

fn in_settings_table(state: Option<ParsingState>) -> bool {
    state == Some(ParsingState::TableInside(TableType::Settings))
}

/// Open a new setting in the table and make it the current element.
pub(crate) fn open_setting(ctx: &mut ParsingContext, kind: SettingKind, declaration: RobotToken) -> usize {
    let settings = &mut ctx.settings_mut().settings;
    settings.push(Setting::new(kind, declaration));
    let index = settings.len() - 1;
    ctx.set_open(OpenElement::Setting(index));
    index
}

/// `Library`, `Suite Setup` and the other recognized declarations.
pub struct SettingDeclarationMapper;

impl ParsingMapper for SettingDeclarationMapper {
    fn id(&self) -> &'static str {
        "setting-declaration"
    }

    fn can_map(&self, cell: &CellInfo, state: Option<ParsingState>, _ctx: &ParsingContext) -> bool {
        in_settings_table(state)
            && matches!(
                cell.recognition,
                Some(Recognition {
                    produced: Recognized::SettingDeclaration(_),
                    exact: true,
                    ..
                })
            )
    }

    fn map(&self, mut token: RobotToken, cell: &CellInfo, ctx: &mut ParsingContext) -> RobotToken {
        let kind = match cell.recognition.map(|r| r.produced) {
            Some(Recognized::SettingDeclaration(kind)) => kind,
            _ => SettingKind::Unknown,
        };
        token.set_primary_type(TokenType::SettingDeclaration(kind));
        open_setting(ctx, kind, token.clone());
        ctx.push(ParsingState::Setting(kind));
        token
    }
}

/// `Meta: Name    value` from grammars before 3.0.
pub struct OldMetadataDeclarationMapper;

impl ParsingMapper for OldMetadataDeclarationMapper {
    fn id(&self) -> &'static str {
        "old-metadata-declaration"
    }

    fn is_applicable_for(&self, version: GrammarVersion) -> bool {
        version < GrammarVersion::V3_0
    }

    fn can_map(&self, cell: &CellInfo, state: Option<ParsingState>, _ctx: &ParsingContext) -> bool {
        in_settings_table(state)
            && matches!(
                cell.recognition,
                Some(Recognition {
                    produced: Recognized::OldMetadata,
                    ..
                })
            )
    }

    fn map(&self, mut token: RobotToken, _cell: &CellInfo, ctx: &mut ParsingContext) -> RobotToken {
        token.set_primary_type(TokenType::SettingDeclaration(SettingKind::Metadata));
        open_setting(ctx, SettingKind::Metadata, token.clone());
        ctx.push(ParsingState::Setting(SettingKind::Metadata));
        token
    }
}

/// Value cells of the open setting.
pub struct SettingValueMapper;

impl ParsingMapper for SettingValueMapper {
    fn id(&self) -> &'static str {
        "setting-value"
    }

    fn can_map(&self, _cell: &CellInfo, state: Option<ParsingState>, _ctx: &ParsingContext) -> bool {
        matches!(state, Some(ParsingState::Setting(_)))
    }

    fn map(&self, mut token: RobotToken, _cell: &CellInfo, ctx: &mut ParsingContext) -> RobotToken {
        let version = ctx.version;
        let max_depth = ctx.max_expression_depth;
        let line = ctx.current_line;
        let Some(setting) = ctx.open_setting_mut() else {
            token.set_primary_type(TokenType::Unknown);
            ctx.warn(
                format!("Value '{}' has no setting to belong to.", token.text()),
                token.position(),
            );
            return token;
        };

        let kind = setting.kind;
        let role = value_role(setting, token.text());
        token.set_primary_type(TokenType::SettingValue(kind, role));
        if role == ValueRole::KeywordName {
            mark_disabled_keyword(&mut token, version);
        }
        tag_variable_usage(&mut token, max_depth);
        setting.values.push(token.clone());
        ctx.open_line = line;
        token
    }
}

/// Whether a metadata setting uses the `Meta: Name` declaration form.
fn is_old_metadata(setting: &Setting) -> bool {
    setting
        .declaration
        .text()
        .split_once(':')
        .is_some_and(|(_, key)| !key.trim().is_empty())
}

/// The role of the next value cell of `setting`.
pub(crate) fn value_role(setting: &Setting, text: &str) -> ValueRole {
    use ValueRole as R;
    let count = setting.values.len();
    let first_or = |first: ValueRole, rest: ValueRole| if count == 0 { first } else { rest };
    match setting.kind {
        SettingKind::Library => {
            if setting.values_with_role(R::Alias).next().is_some() {
                R::UnwantedArgument
            } else if setting.values_with_role(R::AliasDeclaration).next().is_some() {
                R::Alias
            } else if count == 0 {
                R::Name
            } else if WITH_NAME.is_match(text) {
                R::AliasDeclaration
            } else {
                R::Argument
            }
        }
        SettingKind::Resource => first_or(R::Path, R::UnwantedArgument),
        SettingKind::Variables => first_or(R::Path, R::Argument),
        SettingKind::Documentation => R::Text,
        SettingKind::Metadata => {
            if is_old_metadata(setting) {
                R::Value
            } else {
                first_or(R::Key, R::Value)
            }
        }
        SettingKind::SuiteSetup
        | SettingKind::SuiteTeardown
        | SettingKind::TestSetup
        | SettingKind::TestTeardown => first_or(R::KeywordName, R::KeywordArgument),
        SettingKind::TestTemplate => first_or(R::KeywordName, R::UnwantedArgument),
        SettingKind::ForceTags | SettingKind::DefaultTags => R::TagName,
        SettingKind::TestTimeout => first_or(R::TimeoutValue, R::TimeoutMessage),
        SettingKind::Unknown | SettingKind::Empty => R::Argument,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lex::FilePosition;

    fn setting(kind: SettingKind, declaration: &str, values: &[&str]) -> Setting {
        let mut s = Setting::new(
            kind,
            RobotToken::new(declaration, FilePosition::start(), TokenType::SettingDeclaration(kind)),
        );
        for v in values {
            let role = value_role(&s, v);
            s.values
                .push(RobotToken::new(*v, FilePosition::start(), TokenType::SettingValue(kind, role)));
        }
        s
    }

    fn roles(s: &Setting) -> Vec<ValueRole> {
        s.values
            .iter()
            .map(|t| match t.primary_type() {
                TokenType::SettingValue(_, role) => role,
                other => panic!("unexpected {:?}", other),
            })
            .collect()
    }

    // ==================== Role tests ====================

    #[test]
    fn test_library_with_alias() {
        let s = setting(
            SettingKind::Library,
            "Library",
            &["Remote", "http://x", "WITH NAME", "Other", "extra"],
        );
        assert_eq!(
            roles(&s),
            vec![
                ValueRole::Name,
                ValueRole::Argument,
                ValueRole::AliasDeclaration,
                ValueRole::Alias,
                ValueRole::UnwantedArgument
            ]
        );
        assert_eq!(s.alias().map(RobotToken::text), Some("Other"));
    }

    #[test]
    fn test_library_named_with_name() {
        let s = setting(SettingKind::Library, "Library", &["WITH NAME"]);
        assert_eq!(roles(&s), vec![ValueRole::Name]);
    }

    #[test]
    fn test_resource_extra_is_unwanted() {
        let s = setting(SettingKind::Resource, "Resource", &["common.robot", "x"]);
        assert_eq!(roles(&s), vec![ValueRole::Path, ValueRole::UnwantedArgument]);
    }

    #[test]
    fn test_metadata_forms() {
        let new = setting(SettingKind::Metadata, "Metadata", &["Version", "1.0"]);
        assert_eq!(roles(&new), vec![ValueRole::Key, ValueRole::Value]);
        let old = setting(SettingKind::Metadata, "Meta: Version", &["1.0", "more"]);
        assert_eq!(roles(&old), vec![ValueRole::Value, ValueRole::Value]);
    }

    #[test]
    fn test_keyword_settings() {
        let setup = setting(SettingKind::SuiteSetup, "Suite Setup", &["Open", "a", "b"]);
        assert_eq!(
            roles(&setup),
            vec![ValueRole::KeywordName, ValueRole::KeywordArgument, ValueRole::KeywordArgument]
        );
        let template = setting(SettingKind::TestTemplate, "Test Template", &["Check", "x"]);
        assert_eq!(roles(&template), vec![ValueRole::KeywordName, ValueRole::UnwantedArgument]);
    }

    #[test]
    fn test_timeout_and_tags() {
        let timeout = setting(SettingKind::TestTimeout, "Test Timeout", &["1 min", "msg", "more"]);
        assert_eq!(
            roles(&timeout),
            vec![ValueRole::TimeoutValue, ValueRole::TimeoutMessage, ValueRole::TimeoutMessage]
        );
        let tags = setting(SettingKind::ForceTags, "Force Tags", &["a", "b"]);
        assert_eq!(roles(&tags), vec![ValueRole::TagName, ValueRole::TagName]);
    }
}
