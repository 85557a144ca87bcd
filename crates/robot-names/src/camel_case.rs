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

//! CamelCase abbreviations of keyword names.
//!
//! Typing `OpBr` finds `Open Browser`: the occurrence is split into humps
//! (`Op`, `Br`) and each hump must start a word of the definition, in order.
//! The matched ranges are returned for highlighting.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static HUMP: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z][a-z]*").expect("valid regex"));

/// Split a name into `[A-Z][a-z]*` humps.
///
/// Returns an empty list when the humps do not make up the whole name, so
/// `login_user` or `Login User` are not camel case.
pub fn to_camel_case_parts(name: &str) -> Vec<&str> {
    let parts: Vec<&str> = HUMP.find_iter(name).map(|m| m.as_str()).collect();
    let covered: usize = parts.iter().map(|p| p.len()).sum();
    if covered == name.len() {
        parts
    } else {
        Vec::new()
    }
}

/// Whether `name` is made of camel case humps only.
pub fn is_camel_case(name: &str) -> bool {
    !to_camel_case_parts(name).is_empty()
}

/// Character positions where a word starts: after a non-alphanumeric
/// character or at an uppercase letter following a lowercase one.
fn word_starts(chars: &[char]) -> Vec<usize> {
    let mut starts = Vec::new();
    for (i, c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            continue;
        }
        let starts_word = match i.checked_sub(1).map(|p| chars[p]) {
            None => true,
            Some(prev) => !prev.is_alphanumeric() || (prev.is_lowercase() && c.is_uppercase()),
        };
        if starts_word {
            starts.push(i);
        }
    }
    starts
}

fn starts_with_at(chars: &[char], at: usize, part: &[char]) -> bool {
    at + part.len() <= chars.len()
        && chars[at..at + part.len()]
            .iter()
            .zip(part)
            .all(|(a, b)| a.to_lowercase().eq(b.to_lowercase()))
}

/// Match a camel case occurrence against a definition name.
///
/// Each hump of `occurrence` must begin a word of `definition`, ignoring
/// case, with the humps in order and not overlapping. Returns the character
/// range each hump covers, or an empty list when the occurrence is not camel
/// case or does not match.
pub fn matches(definition: &str, occurrence: &str) -> Vec<Range<usize>> {
    let parts = to_camel_case_parts(occurrence);
    if parts.is_empty() {
        return Vec::new();
    }
    let chars: Vec<char> = definition.chars().collect();
    let starts = word_starts(&chars);

    let mut ranges = Vec::with_capacity(parts.len());
    let mut cursor = 0;
    for part in parts {
        let part: Vec<char> = part.chars().collect();
        let found = starts
            .iter()
            .copied()
            .filter(|&s| s >= cursor)
            .find(|&s| starts_with_at(&chars, s, &part));
        match found {
            Some(start) => {
                ranges.push(start..start + part.len());
                cursor = start + part.len();
            }
            None => return Vec::new(),
        }
    }
    ranges
}
