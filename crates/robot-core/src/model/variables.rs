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

//! Variables table model.

use super::TableHeader;
use crate::expression::VariableType;
use crate::lex::RobotToken;

/// A `key=value` item of a dictionary variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryItem {
    pub raw: RobotToken,
    pub key: String,
    /// `None` when the cell holds no unescaped `=`.
    pub value: Option<String>,
}

impl DictionaryItem {
    /// Split `raw` at its first unescaped `=`.
    pub fn parse(raw: RobotToken) -> Self {
        let text = raw.text();
        let (key, value) = match find_unescaped_equals(text) {
            Some(at) => (text[..at].to_string(), Some(text[at + 1..].to_string())),
            None => (text.to_string(), None),
        };
        Self { raw, key, value }
    }
}

fn find_unescaped_equals(text: &str) -> Option<usize> {
    let mut backslashes = 0usize;
    for (i, b) in text.bytes().enumerate() {
        match b {
            b'\\' => backslashes += 1,
            b'=' if backslashes % 2 == 0 => return Some(i),
            _ => backslashes = 0,
        }
    }
    None
}

/// Kind-specific content of a variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableKind {
    Scalar { values: Vec<RobotToken> },
    List { items: Vec<RobotToken> },
    Dictionary { items: Vec<DictionaryItem> },
    Unknown { values: Vec<RobotToken> },
}

impl VariableKind {
    pub fn for_type(variable_type: VariableType) -> Self {
        match variable_type {
            VariableType::Scalar => Self::Scalar { values: Vec::new() },
            VariableType::List => Self::List { items: Vec::new() },
            VariableType::Dictionary => Self::Dictionary { items: Vec::new() },
            VariableType::Environment | VariableType::Invalid => Self::Unknown { values: Vec::new() },
        }
    }

    pub fn variable_type(&self) -> VariableType {
        match self {
            Self::Scalar { .. } => VariableType::Scalar,
            Self::List { .. } => VariableType::List,
            Self::Dictionary { .. } => VariableType::Dictionary,
            Self::Unknown { .. } => VariableType::Invalid,
        }
    }
}

/// One entry of the variables table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub declaration: RobotToken,
    /// Name between the braces, empty for holders without a declaration.
    pub name: String,
    pub kind: VariableKind,
    pub comments: Vec<RobotToken>,
}

impl Variable {
    pub fn new(declaration: RobotToken, kind: VariableKind) -> Self {
        let name = name_of(declaration.text());
        Self {
            declaration,
            name,
            kind,
            comments: Vec::new(),
        }
    }

    pub fn variable_type(&self) -> VariableType {
        self.kind.variable_type()
    }

    /// Append a value cell according to the variable kind.
    pub fn push_value(&mut self, token: RobotToken) {
        match &mut self.kind {
            VariableKind::Scalar { values } | VariableKind::Unknown { values } => values.push(token),
            VariableKind::List { items } => items.push(token),
            VariableKind::Dictionary { items } => items.push(DictionaryItem::parse(token)),
        }
    }

    /// Raw value tokens in order.
    pub fn values(&self) -> Vec<&RobotToken> {
        match &self.kind {
            VariableKind::Scalar { values } | VariableKind::Unknown { values } => values.iter().collect(),
            VariableKind::List { items } => items.iter().collect(),
            VariableKind::Dictionary { items } => items.iter().map(|i| &i.raw).collect(),
        }
    }

    /// Holder created only to carry a standalone comment line.
    pub fn is_comment_holder(&self) -> bool {
        self.declaration.is_empty() && self.values().is_empty()
    }

    /// Source line of the last token of this variable.
    pub fn last_line(&self) -> usize {
        std::iter::once(&self.declaration)
            .chain(self.values())
            .chain(&self.comments)
            .map(RobotToken::line)
            .max()
            .unwrap_or(0)
    }
}

/// Strip the sigil, braces and an optional trailing `=` from a declaration.
fn name_of(declaration: &str) -> String {
    let trimmed = declaration.trim().trim_end_matches('=').trim_end();
    let inner = trimmed
        .get(1..)
        .and_then(|rest| rest.strip_prefix('{'))
        .and_then(|rest| rest.strip_suffix('}'));
    inner.unwrap_or(trimmed).to_string()
}

/// The `*** Variables ***` table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableTable {
    pub headers: Vec<TableHeader>,
    pub variables: Vec<Variable>,
}

impl VariableTable {
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lex::{FilePosition, TokenType};

    fn value(text: &str) -> RobotToken {
        RobotToken::new(text, FilePosition::new(1, 0, 0), TokenType::VariableValue)
    }

    // ==================== Dictionary item tests ====================

    #[test]
    fn test_dictionary_split_first_equals() {
        let item = DictionaryItem::parse(value("a=b=c"));
        assert_eq!(item.key, "a");
        assert_eq!(item.value.as_deref(), Some("b=c"));
    }

    #[test]
    fn test_dictionary_escaped_equals() {
        let item = DictionaryItem::parse(value(r"a\=b=c"));
        assert_eq!(item.key, r"a\=b");
        assert_eq!(item.value.as_deref(), Some("c"));
    }

    #[test]
    fn test_dictionary_double_backslash_does_not_escape() {
        let item = DictionaryItem::parse(value(r"a\\=b"));
        assert_eq!(item.key, r"a\\");
        assert_eq!(item.value.as_deref(), Some("b"));
    }

    #[test]
    fn test_dictionary_without_equals() {
        let item = DictionaryItem::parse(value("lonely"));
        assert_eq!(item.key, "lonely");
        assert!(item.value.is_none());
    }

    // ==================== Variable tests ====================

    #[test]
    fn test_name_of_declaration() {
        assert_eq!(name_of("${var}"), "var");
        assert_eq!(name_of("@{list} ="), "list");
        assert_eq!(name_of("junk"), "junk");
    }

    #[test]
    fn test_push_value_by_kind() {
        let decl = RobotToken::new("&{d}", FilePosition::new(2, 0, 0), TokenType::Unknown);
        let mut v = Variable::new(decl, VariableKind::for_type(VariableType::Dictionary));
        v.push_value(value("k=v"));
        match &v.kind {
            VariableKind::Dictionary { items } => assert_eq!(items[0].key, "k"),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(v.values().len(), 1);
        assert_eq!(v.last_line(), 2);
    }

    #[test]
    fn test_comment_holder() {
        let decl = RobotToken::new("", FilePosition::new(3, 0, 0), TokenType::Unknown);
        let v = Variable::new(decl, VariableKind::for_type(VariableType::List));
        assert!(v.is_comment_holder());
    }
}
