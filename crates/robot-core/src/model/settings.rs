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

//! Settings table model.

use super::TableHeader;
use crate::lex::{RobotToken, SettingKind, TokenType, ValueRole};

/// One declared setting: declaration cell, value cells and trailing comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    pub kind: SettingKind,
    pub declaration: RobotToken,
    pub values: Vec<RobotToken>,
    pub comments: Vec<RobotToken>,
}

impl Setting {
    pub fn new(kind: SettingKind, declaration: RobotToken) -> Self {
        Self {
            kind,
            declaration,
            values: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// Value tokens playing `role`.
    pub fn values_with_role(&self, role: ValueRole) -> impl Iterator<Item = &RobotToken> {
        self.values
            .iter()
            .filter(move |t| matches!(t.primary_type(), TokenType::SettingValue(_, r) if r == role))
    }

    fn first_with_role(&self, role: ValueRole) -> Option<&RobotToken> {
        self.values_with_role(role).next()
    }

    /// Library name, resource path or variable file path.
    pub fn import_target(&self) -> Option<&RobotToken> {
        match self.kind {
            SettingKind::Library => self.first_with_role(ValueRole::Name),
            SettingKind::Resource | SettingKind::Variables => self.first_with_role(ValueRole::Path),
            _ => None,
        }
    }

    /// Arguments of an import or of a setup/teardown keyword.
    pub fn arguments(&self) -> Vec<&RobotToken> {
        let role = if self.kind.takes_keyword() {
            ValueRole::KeywordArgument
        } else {
            ValueRole::Argument
        };
        self.values_with_role(role).collect()
    }

    /// The `WITH NAME` alias of a library import.
    pub fn alias(&self) -> Option<&RobotToken> {
        self.first_with_role(ValueRole::Alias)
    }

    pub fn keyword_name(&self) -> Option<&RobotToken> {
        self.first_with_role(ValueRole::KeywordName)
    }

    /// True for a setup/teardown/template explicitly set to `NONE`.
    pub fn is_disabled(&self) -> bool {
        self.keyword_name()
            .is_some_and(|t| t.has_type(TokenType::DisabledKeyword))
    }

    pub fn tags(&self) -> Vec<&str> {
        self.values_with_role(ValueRole::TagName)
            .map(RobotToken::text)
            .collect()
    }

    /// Documentation cells joined with single spaces.
    pub fn documentation(&self) -> String {
        self.values_with_role(ValueRole::Text)
            .map(RobotToken::text)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Metadata key; for the old `Meta: Key` form it comes from the declaration.
    pub fn metadata_key(&self) -> Option<&str> {
        if self.kind != SettingKind::Metadata {
            return None;
        }
        if let Some(key) = self.first_with_role(ValueRole::Key) {
            return Some(key.text());
        }
        self.declaration
            .text()
            .split_once(':')
            .map(|(_, key)| key.trim())
            .filter(|key| !key.is_empty())
    }

    pub fn timeout(&self) -> Option<&RobotToken> {
        self.first_with_role(ValueRole::TimeoutValue)
    }

    /// Declaration, values and comments in source order.
    pub fn element_tokens(&self) -> Vec<&RobotToken> {
        let mut tokens: Vec<&RobotToken> = std::iter::once(&self.declaration)
            .chain(&self.values)
            .chain(&self.comments)
            .collect();
        tokens.sort_by_key(|t| t.position());
        tokens
    }
}

/// The `*** Settings ***` table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingTable {
    pub headers: Vec<TableHeader>,
    pub settings: Vec<Setting>,
}

impl SettingTable {
    pub fn of_kind(&self, kind: SettingKind) -> impl Iterator<Item = &Setting> {
        self.settings.iter().filter(move |s| s.kind == kind)
    }

    /// Library, Resource and Variables imports in declaration order.
    pub fn imports(&self) -> impl Iterator<Item = &Setting> {
        self.settings.iter().filter(|s| s.kind.is_import())
    }

    pub fn suite_setup(&self) -> Option<&Setting> {
        self.of_kind(SettingKind::SuiteSetup).next()
    }

    pub fn suite_teardown(&self) -> Option<&Setting> {
        self.of_kind(SettingKind::SuiteTeardown).next()
    }

    pub fn test_template(&self) -> Option<&Setting> {
        self.of_kind(SettingKind::TestTemplate).next()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }
}
