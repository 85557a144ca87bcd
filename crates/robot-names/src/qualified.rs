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

//! Source-qualified keyword names.

use crate::embedded::has_embedded_arguments;
use crate::unify::unify_definition;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A keyword name together with the library or resource it comes from.
///
/// `name` is unified. `embedded_name` keeps the lowercased raw text where it
/// is needed for embedded argument matching: for definitions that declare
/// embedded arguments, and for every occurrence. Equality and hashing use
/// `(name, source)` only.
#[derive(Debug, Clone)]
pub struct QualifiedKeywordName {
    pub name: String,
    pub embedded_name: Option<String>,
    pub source: String,
}

impl QualifiedKeywordName {
    /// Name of a definition coming from `source`.
    pub fn create(name: &str, source: &str) -> Self {
        Self {
            name: unify_definition(name),
            embedded_name: has_embedded_arguments(name).then(|| name.to_lowercase()),
            source: source.to_string(),
        }
    }

    /// Name of a call site, split on the last `.` into source and name.
    ///
    /// # Examples
    ///
    /// ```
    /// use robot_names::QualifiedKeywordName;
    ///
    /// let call = QualifiedKeywordName::from_occurrence("MyLib.Do Something");
    /// assert!(call.matches_ignoring_case(&QualifiedKeywordName::create("Do Something", "MyLib")));
    /// assert!(!call.matches_ignoring_case(&QualifiedKeywordName::create("Do Something", "OtherLib")));
    /// ```
    pub fn from_occurrence(occurrence: &str) -> Self {
        let (source, name) = match occurrence.rfind('.') {
            Some(dot) => (&occurrence[..dot], &occurrence[dot + 1..]),
            None => ("", occurrence),
        };
        Self::unqualified_parts(name, source)
    }

    /// Call site name taken whole, without looking for a qualifier.
    pub fn unqualified(occurrence: &str) -> Self {
        Self::unqualified_parts(occurrence, "")
    }

    fn unqualified_parts(name: &str, source: &str) -> Self {
        Self {
            name: unify_definition(name),
            embedded_name: Some(name.to_lowercase()),
            source: source.to_string(),
        }
    }

    pub fn is_qualified(&self) -> bool {
        !self.source.is_empty()
    }

    /// Whether this occurrence names `definition`.
    ///
    /// Names compare ignoring case. Sources compare ignoring case unless
    /// this name has no source, in which case any source matches.
    pub fn matches_ignoring_case(&self, definition: &QualifiedKeywordName) -> bool {
        self.name.to_lowercase() == definition.name.to_lowercase() && self.source_matches(&definition.source)
    }

    /// Source part of [`matches_ignoring_case`](Self::matches_ignoring_case).
    pub fn source_matches(&self, source: &str) -> bool {
        self.source.is_empty() || self.source.to_lowercase() == source.to_lowercase()
    }
}

impl PartialEq for QualifiedKeywordName {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.source == other.source
    }
}

impl Eq for QualifiedKeywordName {}

impl Hash for QualifiedKeywordName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.source.hash(state);
    }
}

impl fmt::Display for QualifiedKeywordName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.source.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.source, self.name)
        }
    }
}
