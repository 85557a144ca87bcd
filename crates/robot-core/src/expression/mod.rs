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

//! Variable and index expression structure.
//!
//! A cell value is scanned character by character into a tree of bracket
//! containers ([`tree`]); variable references are then read off that tree
//! ([`variables`]).
//!
//! # Examples
//!
//! ```
//! use robot_core::expression::{extract_variables, VariableType};
//!
//! let found = extract_variables("Login ${user} with @{keys}[0]");
//! assert_eq!(found.variables.len(), 2);
//! assert_eq!(found.variables[0].name, "user");
//! assert_eq!(found.variables[1].kind, VariableType::List);
//! assert_eq!(found.variables[1].indexes, vec!["0".to_string()]);
//! ```

pub mod tree;
pub mod variables;

pub use tree::{
    build_structure_tree, Container, ContainerElement, ContainerId, ContainerKind, ElementType,
    ExpressionTree, Node,
};
pub use variables::{extract_variables, extract_variables_with_depth, VariableDeclaration, VariableExtraction};

use std::fmt;

/// Kind of a variable, derived from its sigil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VariableType {
    /// `${...}`
    Scalar,
    /// `@{...}`
    List,
    /// `&{...}`
    Dictionary,
    /// `%{...}`
    Environment,
    Invalid,
}

impl VariableType {
    pub fn from_sigil(c: char) -> Self {
        match c {
            '$' => Self::Scalar,
            '@' => Self::List,
            '&' => Self::Dictionary,
            '%' => Self::Environment,
            _ => Self::Invalid,
        }
    }

    /// Kind of a declaration cell such as `${name}=`.
    pub fn of_declaration(text: &str) -> Self {
        let trimmed = text.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(sigil), Some('{')) if trimmed.trim_end_matches('=').trim_end().ends_with('}') => {
                Self::from_sigil(sigil)
            }
            _ => Self::Invalid,
        }
    }

    pub const fn sigil(&self) -> Option<char> {
        match self {
            Self::Scalar => Some('$'),
            Self::List => Some('@'),
            Self::Dictionary => Some('&'),
            Self::Environment => Some('%'),
            Self::Invalid => None,
        }
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => write!(f, "scalar"),
            Self::List => write!(f, "list"),
            Self::Dictionary => write!(f, "dictionary"),
            Self::Environment => write!(f, "environment"),
            Self::Invalid => write!(f, "invalid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_sigil() {
        assert_eq!(VariableType::from_sigil('&'), VariableType::Dictionary);
        assert_eq!(VariableType::from_sigil('x'), VariableType::Invalid);
    }

    #[test]
    fn test_of_declaration() {
        assert_eq!(VariableType::of_declaration("${a}"), VariableType::Scalar);
        assert_eq!(VariableType::of_declaration("@{a} ="), VariableType::List);
        assert_eq!(VariableType::of_declaration("&{a}="), VariableType::Dictionary);
        assert_eq!(VariableType::of_declaration("${a"), VariableType::Invalid);
        assert_eq!(VariableType::of_declaration("$ {a}"), VariableType::Invalid);
        assert_eq!(VariableType::of_declaration("name"), VariableType::Invalid);
    }

    #[test]
    fn test_sigil_round_trip() {
        for t in [VariableType::Scalar, VariableType::List, VariableType::Dictionary] {
            assert_eq!(t.sigil().map(VariableType::from_sigil), Some(t));
        }
    }
}
