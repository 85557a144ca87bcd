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

//! Positioned tokens and their semantic type tags.

use super::span::FilePosition;
use crate::expression::VariableType;
use std::fmt;

/// The four modelled tables of a test data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TableType {
    Settings,
    Variables,
    TestCases,
    Keywords,
}

impl TableType {
    pub const ALL: [TableType; 4] = [
        TableType::Settings,
        TableType::Variables,
        TableType::TestCases,
        TableType::Keywords,
    ];

    /// The executable flavour of the table, if it holds executables.
    pub const fn executable_kind(&self) -> Option<ExecutableKind> {
        match self {
            Self::TestCases => Some(ExecutableKind::TestCase),
            Self::Keywords => Some(ExecutableKind::Keyword),
            Self::Settings | Self::Variables => None,
        }
    }
}

impl fmt::Display for TableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Settings => write!(f, "Settings"),
            Self::Variables => write!(f, "Variables"),
            Self::TestCases => write!(f, "Test Cases"),
            Self::Keywords => write!(f, "Keywords"),
        }
    }
}

/// Test cases and user keywords share one structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecutableKind {
    TestCase,
    Keyword,
}

impl ExecutableKind {
    pub const fn table(&self) -> TableType {
        match self {
            Self::TestCase => TableType::TestCases,
            Self::Keyword => TableType::Keywords,
        }
    }
}

/// Constructs of the settings table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SettingKind {
    Library,
    Resource,
    Variables,
    Documentation,
    Metadata,
    SuiteSetup,
    SuiteTeardown,
    ForceTags,
    DefaultTags,
    TestSetup,
    TestTeardown,
    TestTemplate,
    TestTimeout,
    /// A declaration no recognizer accepted.
    Unknown,
    /// Holder for a standalone comment line.
    Empty,
}

impl SettingKind {
    /// True for constructs whose first value is a keyword name.
    pub const fn takes_keyword(&self) -> bool {
        matches!(
            self,
            Self::SuiteSetup
                | Self::SuiteTeardown
                | Self::TestSetup
                | Self::TestTeardown
                | Self::TestTemplate
        )
    }

    /// True for the import constructs.
    pub const fn is_import(&self) -> bool {
        matches!(self, Self::Library | Self::Resource | Self::Variables)
    }
}

/// Bracketed settings inside a test case or user keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocalSettingKind {
    Documentation,
    Tags,
    Setup,
    Teardown,
    Template,
    Timeout,
    Arguments,
    Return,
    Unknown,
}

impl LocalSettingKind {
    /// Whether the setting is legal inside the given executable.
    pub const fn is_allowed_for(&self, kind: ExecutableKind) -> bool {
        match self {
            Self::Documentation | Self::Tags | Self::Teardown | Self::Timeout | Self::Unknown => true,
            Self::Setup | Self::Template => matches!(kind, ExecutableKind::TestCase),
            Self::Arguments | Self::Return => matches!(kind, ExecutableKind::Keyword),
        }
    }

    pub const fn takes_keyword(&self) -> bool {
        matches!(self, Self::Setup | Self::Teardown | Self::Template)
    }
}

/// The part a value cell plays inside its construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueRole {
    Name,
    Argument,
    /// The `WITH NAME` marker of a library import.
    AliasDeclaration,
    Alias,
    Path,
    UnwantedArgument,
    Text,
    Key,
    Value,
    KeywordName,
    KeywordArgument,
    TagName,
    TimeoutValue,
    TimeoutMessage,
}

/// Semantic tag of a token. A token may carry several, most specific first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenType {
    Unknown,
    PrettyAlignSpace,
    TableHeader(TableType),
    UserOwnTableHeader,
    TableHeaderColumn,
    StartHashComment,
    CommentContinue,
    PreviousLineContinue,
    SettingDeclaration(SettingKind),
    SettingValue(SettingKind, ValueRole),
    VariableDeclaration(VariableType),
    VariableValue,
    ExecutableName(ExecutableKind),
    ActionName(ExecutableKind),
    ActionArgument(ExecutableKind),
    LocalSettingDeclaration(ExecutableKind, LocalSettingKind),
    LocalSettingValue(ExecutableKind, LocalSettingKind, ValueRole),
    /// A `${x}=` cell in front of an action.
    VariableAssignment,
    /// The cell references at least one variable.
    VariableUsage,
    /// `NONE` in a keyword position, which disables the setting.
    DisabledKeyword,
}

impl TokenType {
    pub const fn is_comment(&self) -> bool {
        matches!(self, Self::StartHashComment | Self::CommentContinue)
    }
}

/// An immutable span of source text with its semantic tags.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RobotToken {
    text: String,
    position: FilePosition,
    types: Vec<TokenType>,
}

impl RobotToken {
    pub fn new(text: impl Into<String>, position: FilePosition, primary: TokenType) -> Self {
        Self {
            text: text.into(),
            position,
            types: vec![primary],
        }
    }

    /// A token with no position, as created by model edits.
    pub fn detached(text: impl Into<String>, primary: TokenType) -> Self {
        Self::new(text, FilePosition::default(), primary)
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub const fn position(&self) -> FilePosition {
        self.position
    }

    #[inline]
    pub const fn line(&self) -> usize {
        self.position.line()
    }

    #[inline]
    pub fn types(&self) -> &[TokenType] {
        &self.types
    }

    /// The most specific tag.
    pub fn primary_type(&self) -> TokenType {
        self.types.first().copied().unwrap_or(TokenType::Unknown)
    }

    pub fn has_type(&self, token_type: TokenType) -> bool {
        self.types.contains(&token_type)
    }

    /// Position just past the last character.
    pub fn end_position(&self) -> FilePosition {
        self.position.advanced_by(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the primary tag, keeping the others.
    pub(crate) fn set_primary_type(&mut self, token_type: TokenType) {
        self.types.retain(|t| *t != token_type);
        if self.types.is_empty() {
            self.types.push(token_type);
        } else {
            self.types[0] = token_type;
        }
    }

    /// Make `token_type` primary, demoting the current primary.
    pub(crate) fn push_primary_type(&mut self, token_type: TokenType) {
        self.types.retain(|t| *t != token_type);
        self.types.insert(0, token_type);
    }

    /// Add a secondary tag if absent.
    pub(crate) fn add_type(&mut self, token_type: TokenType) {
        if !self.types.contains(&token_type) {
            self.types.push(token_type);
        }
    }

    pub fn with_type(mut self, token_type: TokenType) -> Self {
        self.add_type(token_type);
        self
    }
}

impl fmt::Display for RobotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> RobotToken {
        RobotToken::new("Log", FilePosition::new(3, 4, 20), TokenType::Unknown)
    }

    // ==================== Tag tests ====================

    #[test]
    fn test_primary_type() {
        let mut t = token();
        assert_eq!(t.primary_type(), TokenType::Unknown);
        t.set_primary_type(TokenType::ActionName(ExecutableKind::TestCase));
        assert_eq!(t.types(), &[TokenType::ActionName(ExecutableKind::TestCase)]);
    }

    #[test]
    fn test_push_primary_demotes() {
        let mut t = RobotToken::new(
            "Suite Setupx",
            FilePosition::start(),
            TokenType::SettingDeclaration(SettingKind::SuiteSetup),
        );
        t.push_primary_type(TokenType::SettingDeclaration(SettingKind::Unknown));
        assert_eq!(
            t.types(),
            &[
                TokenType::SettingDeclaration(SettingKind::Unknown),
                TokenType::SettingDeclaration(SettingKind::SuiteSetup)
            ]
        );
    }

    #[test]
    fn test_add_type_is_idempotent() {
        let t = token()
            .with_type(TokenType::VariableUsage)
            .with_type(TokenType::VariableUsage);
        assert_eq!(t.types().len(), 2);
        assert!(t.has_type(TokenType::VariableUsage));
    }

    #[test]
    fn test_end_position() {
        assert_eq!(token().end_position(), FilePosition::new(3, 7, 23));
    }

    // ==================== Kind tests ====================

    #[test]
    fn test_local_setting_permissions() {
        assert!(LocalSettingKind::Setup.is_allowed_for(ExecutableKind::TestCase));
        assert!(!LocalSettingKind::Setup.is_allowed_for(ExecutableKind::Keyword));
        assert!(LocalSettingKind::Arguments.is_allowed_for(ExecutableKind::Keyword));
        assert!(!LocalSettingKind::Return.is_allowed_for(ExecutableKind::TestCase));
        assert!(LocalSettingKind::Teardown.is_allowed_for(ExecutableKind::Keyword));
    }

    #[test]
    fn test_table_executable_kind() {
        assert_eq!(TableType::Keywords.executable_kind(), Some(ExecutableKind::Keyword));
        assert_eq!(TableType::Settings.executable_kind(), None);
        assert_eq!(ExecutableKind::TestCase.table(), TableType::TestCases);
    }
}
