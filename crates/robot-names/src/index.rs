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

//! Keyword definitions indexed for call resolution.
//!
//! Resolution of a call text tries each Gherkin variant in turn. For every
//! variant the source qualifier is split off, then the unified name is
//! looked up exactly, then embedded argument patterns are tried. The first
//! variant producing a match wins.

use crate::camel_case;
use crate::embedded::{compile_embedded_pattern, has_embedded_arguments, starts_with_ignore_case};
use crate::gherkin::first_gherkin_match;
use crate::qualified::QualifiedKeywordName;
use regex::Regex;
use std::collections::HashMap;
use std::ops::Range;
use tracing::{debug, trace};

/// A registered keyword definition.
#[derive(Debug, Clone)]
pub struct KeywordDefinition {
    /// Name as written in the definition.
    pub name: String,
    /// Library or resource the keyword comes from.
    pub source: String,
    pub qualified: QualifiedKeywordName,
    pattern: Option<Regex>,
}

impl KeywordDefinition {
    pub fn has_embedded_arguments(&self) -> bool {
        self.qualified.embedded_name.is_some()
    }
}

/// Keyword definitions keyed by unified name.
#[derive(Debug, Default, Clone)]
pub struct KeywordIndex {
    definitions: Vec<KeywordDefinition>,
    by_name: HashMap<String, Vec<usize>>,
    embedded: Vec<usize>,
}

impl KeywordIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition and return its id.
    ///
    /// A definition whose embedded pattern fails to compile is kept but
    /// never matches by pattern.
    pub fn add(&mut self, name: &str, source: &str) -> usize {
        let id = self.definitions.len();
        let qualified = QualifiedKeywordName::create(name, source);
        let pattern = if has_embedded_arguments(name) {
            self.embedded.push(id);
            match compile_embedded_pattern(name) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    debug!(name, source, error = %e, "keyword pattern does not compile");
                    None
                }
            }
        } else {
            self.by_name.entry(qualified.name.clone()).or_default().push(id);
            None
        };
        self.definitions.push(KeywordDefinition {
            name: name.to_string(),
            source: source.to_string(),
            qualified,
            pattern,
        });
        id
    }

    pub fn get(&self, id: usize) -> Option<&KeywordDefinition> {
        self.definitions.get(id)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeywordDefinition> {
        self.definitions.iter()
    }

    /// Every definition a call text resolves to.
    ///
    /// More than one result means the call is ambiguous; deciding between
    /// them is up to the caller.
    pub fn resolve(&self, occurrence: &str) -> Vec<&KeywordDefinition> {
        first_gherkin_match(occurrence, |variant| {
            let found = self.lookup(variant);
            (!found.is_empty()).then_some(found)
        })
        .unwrap_or_default()
    }

    /// The single definition a call resolves to, if unambiguous.
    pub fn resolve_unique(&self, occurrence: &str) -> Option<&KeywordDefinition> {
        match self.resolve(occurrence).as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    fn lookup(&self, variant: &str) -> Vec<&KeywordDefinition> {
        let qualified = QualifiedKeywordName::from_occurrence(variant);
        let mut candidates = vec![qualified];
        if candidates[0].is_qualified() {
            // names such as `Wait 1.5 Seconds` contain a dot of their own
            candidates.push(QualifiedKeywordName::unqualified(variant));
        }

        for call in &candidates {
            let exact: Vec<&KeywordDefinition> = self
                .by_name
                .get(&call.name)
                .into_iter()
                .flatten()
                .map(|&id| &self.definitions[id])
                .filter(|def| call.source_matches(&def.source))
                .collect();
            if !exact.is_empty() {
                trace!(variant, matches = exact.len(), "exact keyword match");
                return exact;
            }

            let raw = call.embedded_name.as_deref().unwrap_or(&call.name);
            let embedded: Vec<&KeywordDefinition> = self
                .embedded
                .iter()
                .map(|&id| &self.definitions[id])
                .filter(|def| call.source_matches(&def.source))
                .filter(|def| def.pattern.as_ref().is_some_and(|p| p.is_match(raw)))
                .collect();
            if !embedded.is_empty() {
                trace!(variant, matches = embedded.len(), "embedded keyword match");
                return embedded;
            }
        }
        Vec::new()
    }

    /// Definitions whose name `prefix` could be the start of, with the
    /// number of definition characters covered.
    pub fn complete(&self, prefix: &str) -> Vec<(&KeywordDefinition, usize)> {
        self.definitions
            .iter()
            .filter_map(|def| starts_with_ignore_case(&def.name, prefix).map(|len| (def, len)))
            .filter(|(_, len)| *len > 0 || prefix.is_empty())
            .collect()
    }

    /// Definitions matching a camel case abbreviation, with the ranges of
    /// the definition name each hump covers.
    pub fn find_camel_case(&self, occurrence: &str) -> Vec<(&KeywordDefinition, Vec<Range<usize>>)> {
        self.definitions
            .iter()
            .filter_map(|def| {
                let ranges = camel_case::matches(&def.name, occurrence);
                (!ranges.is_empty()).then_some((def, ranges))
            })
            .collect()
    }
}
