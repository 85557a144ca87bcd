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

//! Embedded keyword arguments.
//!
//! A keyword definition such as `Login ${user} to ${system:\w+}` carries its
//! arguments inside the name. Each `${...}` placeholder is found by a small
//! character DFA; the definition then compiles to an anchored,
//! case-insensitive regular expression that occurrences are matched against.
//!
//! All ranges are half-open character ranges into the definition and
//! include the `${` and `}` of the placeholder.

use regex::Regex;
use std::ops::Range;
use tracing::debug;

/// Pattern used for placeholders without an explicit `:pattern`.
pub const DEFAULT_ARGUMENT_PATTERN: &str = ".+";

/// States of the placeholder scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordDfaState {
    /// Outside any placeholder.
    Start,
    /// After a `$`.
    DollarSeen,
    /// Right after `${`.
    BraceOpenSeen,
    /// Inside the placeholder body.
    InVariable,
    /// After a backslash inside the body.
    InVariableEscaping,
}

/// Input classes the scanner distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Dollar,
    BraceOpen,
    BraceClose,
    Backslash,
    Other,
}

impl CharClass {
    fn of(c: char) -> Self {
        match c {
            '$' => Self::Dollar,
            '{' => Self::BraceOpen,
            '}' => Self::BraceClose,
            '\\' => Self::Backslash,
            _ => Self::Other,
        }
    }
}

/// What a transition does besides changing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    None,
    /// A `$` that may start a placeholder.
    MarkStart,
    /// The placeholder that started at the mark ends here.
    Emit,
}

impl KeywordDfaState {
    fn next(self, class: CharClass) -> (Self, Action) {
        use CharClass as C;
        use KeywordDfaState as S;
        match (self, class) {
            (S::Start, C::Dollar) => (S::DollarSeen, Action::MarkStart),
            (S::Start, _) => (S::Start, Action::None),

            (S::DollarSeen, C::Dollar) => (S::DollarSeen, Action::MarkStart),
            (S::DollarSeen, C::BraceOpen) => (S::BraceOpenSeen, Action::None),
            (S::DollarSeen, _) => (S::Start, Action::None),

            // `${}` names nothing
            (S::BraceOpenSeen, C::BraceClose) => (S::Start, Action::None),
            (S::BraceOpenSeen, C::Backslash) => (S::InVariableEscaping, Action::None),
            (S::BraceOpenSeen, _) => (S::InVariable, Action::None),

            (S::InVariable, C::BraceClose) => (S::Start, Action::Emit),
            (S::InVariable, C::Backslash) => (S::InVariableEscaping, Action::None),
            (S::InVariable, _) => (S::InVariable, Action::None),

            (S::InVariableEscaping, _) => (S::InVariable, Action::None),
        }
    }
}

/// Character ranges of the `${...}` placeholders in a definition name.
///
/// Ranges are non-overlapping and in order. An unterminated placeholder
/// yields no range.
pub fn find_embedded_argument_ranges(name: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut state = KeywordDfaState::Start;
    let mut start = 0;
    for (i, c) in name.chars().enumerate() {
        let (next, action) = state.next(CharClass::of(c));
        match action {
            Action::MarkStart => start = i,
            Action::Emit => ranges.push(start..i + 1),
            Action::None => {}
        }
        state = next;
    }
    ranges
}

/// Whether a definition name declares embedded arguments.
pub fn has_embedded_arguments(name: &str) -> bool {
    !find_embedded_argument_ranges(name).is_empty()
}

/// Undo escaping in a custom placeholder pattern.
///
/// A backslash is dropped only when it escapes another backslash or a `}`;
/// every other backslash reaches the regex engine, so `\d` stays a digit
/// class.
fn de_escape(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if next == '\\' || next == '}' {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

/// Regex fragment for one placeholder given its full text `${...}`.
fn placeholder_pattern(placeholder: &str) -> String {
    let inner = placeholder
        .strip_prefix("${")
        .and_then(|s| s.strip_suffix('}'))
        .unwrap_or(placeholder);
    match inner.split_once(':') {
        Some((_, custom)) => de_escape(custom),
        None => DEFAULT_ARGUMENT_PATTERN.to_string(),
    }
}

/// Regex source for `chars[..end]` where every placeholder inside is
/// replaced by `substitute(placeholder_text)`, wrapped in a group named
/// after its position so groups inside custom patterns do not shift it.
fn pattern_source(
    chars: &[char],
    ranges: &[Range<usize>],
    end: usize,
    substitute: impl Fn(&str) -> String,
) -> String {
    let mut source = String::from("(?is)^");
    let mut cursor = 0;
    for (index, range) in ranges.iter().enumerate().filter(|(_, r)| r.end <= end) {
        let literal: String = chars[cursor..range.start].iter().collect();
        source.push_str(&regex::escape(&literal));
        let placeholder: String = chars[range.clone()].iter().collect();
        source.push_str(&format!("(?P<{}>", group_name(index)));
        source.push_str(&substitute(&placeholder));
        source.push(')');
        cursor = range.end;
    }
    let literal: String = chars[cursor..end].iter().collect();
    source.push_str(&regex::escape(&literal));
    source.push('$');
    source
}

fn group_name(index: usize) -> String {
    format!("arg{}", index)
}

/// Compile a definition name into an anchored, case-insensitive pattern.
///
/// Placeholder `i` (counting from zero) is captured by the group `argi`.
///
/// # Errors
///
/// Returns the regex error when a custom `${name:pattern}` is invalid.
pub fn compile_embedded_pattern(definition: &str) -> Result<Regex, regex::Error> {
    let chars: Vec<char> = definition.chars().collect();
    let ranges = find_embedded_argument_ranges(definition);
    Regex::new(&pattern_source(&chars, &ranges, chars.len(), placeholder_pattern))
}

/// Whether `occurrence` matches the whole of `definition`, ignoring case.
///
/// A definition whose custom pattern does not compile matches nothing.
pub fn matches_ignore_case(definition: &str, occurrence: &str) -> bool {
    match compile_embedded_pattern(definition) {
        Ok(pattern) => pattern.is_match(occurrence),
        Err(e) => {
            debug!(definition, error = %e, "invalid embedded argument pattern");
            false
        }
    }
}

/// Values bound to the placeholders of `definition` by `occurrence`.
pub fn embedded_argument_values(definition: &str, occurrence: &str) -> Option<Vec<String>> {
    let pattern = match compile_embedded_pattern(definition) {
        Ok(pattern) => pattern,
        Err(e) => {
            debug!(definition, error = %e, "invalid embedded argument pattern");
            return None;
        }
    };
    let captures = pattern.captures(occurrence)?;
    let count = find_embedded_argument_ranges(definition).len();
    Some(
        (0..count)
            .map(|i| {
                captures
                    .name(&group_name(i))
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default()
            })
            .collect(),
    )
}

/// Length, in characters of `definition`, of the longest definition prefix
/// that `prefix` is an occurrence of.
///
/// Placeholders lying fully inside a candidate definition prefix match any
/// non-empty text. The returned length never ends inside a placeholder.
/// Returns `None` when no definition prefix fits and `definition` does not
/// literally start with `prefix` either.
pub fn starts_with_ignore_case(definition: &str, prefix: &str) -> Option<usize> {
    let chars: Vec<char> = definition.chars().collect();
    let ranges = find_embedded_argument_ranges(definition);
    let splits_range = |k: usize| ranges.iter().any(|r| r.start < k && k < r.end);

    for end in (0..=chars.len()).rev() {
        if splits_range(end) {
            continue;
        }
        let source = pattern_source(&chars, &ranges, end, |_| DEFAULT_ARGUMENT_PATTERN.to_string());
        match Regex::new(&source) {
            Ok(pattern) if pattern.is_match(prefix) => return Some(end),
            Ok(_) => {}
            Err(e) => debug!(definition, error = %e, "invalid prefix pattern"),
        }
    }

    // Literal fallback, pulled back to the start of a split placeholder.
    let lower_definition = definition.to_lowercase();
    let lower_prefix = prefix.to_lowercase();
    if !lower_definition.starts_with(&lower_prefix) {
        return None;
    }
    let length = lower_prefix.chars().count().min(chars.len());
    Some(
        ranges
            .iter()
            .find(|r| r.start < length && length < r.end)
            .map_or(length, |r| r.start),
    )
}
