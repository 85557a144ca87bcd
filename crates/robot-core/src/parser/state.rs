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

//! Parsing states.

use crate::expression::VariableType;
use crate::lex::{ExecutableKind, LocalSettingKind, SettingKind, TableType};

/// Where the state machine currently is.
///
/// The parser keeps a stack of these; the top decides which mapper handles
/// the next cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParsingState {
    Unknown,
    /// Content that is kept for reconstruction but not modelled.
    Trash,
    /// The rest of the line belongs to a comment.
    Comment,
    /// On a table header line.
    TableHeader(TableType),
    /// At line level inside a table.
    TableInside(TableType),
    /// Inside the value list of a setting.
    Setting(SettingKind),
    /// Inside the value list of a variable.
    Variable(VariableType),
    /// A test case or keyword is open; at line level.
    ExecutableDeclaration(ExecutableKind),
    /// Inside an executable row.
    ExecutableRow(ExecutableKind),
    /// Inside the value list of a bracketed local setting.
    LocalSetting(ExecutableKind, LocalSettingKind),
}

impl ParsingState {
    /// The table this state belongs to.
    pub fn table(&self) -> Option<TableType> {
        match self {
            Self::Unknown | Self::Trash | Self::Comment => None,
            Self::TableHeader(t) | Self::TableInside(t) => Some(*t),
            Self::Setting(_) => Some(TableType::Settings),
            Self::Variable(_) => Some(TableType::Variables),
            Self::ExecutableDeclaration(k) | Self::ExecutableRow(k) | Self::LocalSetting(k, _) => {
                Some(k.table())
            }
        }
    }

    /// The enclosing line-level state.
    pub fn parent(&self) -> Option<ParsingState> {
        match self {
            Self::Unknown | Self::Trash | Self::Comment | Self::TableHeader(_) => None,
            Self::TableInside(_) => None,
            Self::Setting(_) => Some(Self::TableInside(TableType::Settings)),
            Self::Variable(_) => Some(Self::TableInside(TableType::Variables)),
            Self::ExecutableDeclaration(k) => Some(Self::TableInside(k.table())),
            Self::ExecutableRow(k) | Self::LocalSetting(k, _) => Some(Self::ExecutableDeclaration(*k)),
        }
    }

    /// States that survive the end of a line.
    pub fn is_line_level(&self) -> bool {
        matches!(
            self,
            Self::TableInside(_) | Self::ExecutableDeclaration(_) | Self::Trash
        )
    }

    /// Every state value, for exhaustive checks.
    pub fn all() -> Vec<ParsingState> {
        use LocalSettingKind as L;
        use SettingKind as S;
        let mut states = vec![Self::Unknown, Self::Trash, Self::Comment];
        for table in TableType::ALL {
            states.push(Self::TableHeader(table));
            states.push(Self::TableInside(table));
        }
        for kind in [
            S::Library,
            S::Resource,
            S::Variables,
            S::Documentation,
            S::Metadata,
            S::SuiteSetup,
            S::SuiteTeardown,
            S::ForceTags,
            S::DefaultTags,
            S::TestSetup,
            S::TestTeardown,
            S::TestTemplate,
            S::TestTimeout,
            S::Unknown,
            S::Empty,
        ] {
            states.push(Self::Setting(kind));
        }
        for kind in [
            VariableType::Scalar,
            VariableType::List,
            VariableType::Dictionary,
            VariableType::Environment,
            VariableType::Invalid,
        ] {
            states.push(Self::Variable(kind));
        }
        for exec in [ExecutableKind::TestCase, ExecutableKind::Keyword] {
            states.push(Self::ExecutableDeclaration(exec));
            states.push(Self::ExecutableRow(exec));
            for kind in [
                L::Documentation,
                L::Tags,
                L::Setup,
                L::Teardown,
                L::Template,
                L::Timeout,
                L::Arguments,
                L::Return,
                L::Unknown,
            ] {
                states.push(Self::LocalSetting(exec, kind));
            }
        }
        states
    }
}
