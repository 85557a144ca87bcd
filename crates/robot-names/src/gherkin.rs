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

//! Gherkin style prefixes.
//!
//! A call such as `Given the user is logged in` resolves to the keyword
//! `The User Is Logged In`. Prefixes may be stacked (`And Then ...`) and
//! are tried one level at a time, so a keyword whose own name begins with a
//! prefix word still wins when it matches first.

use once_cell::sync::Lazy;
use regex::Regex;

/// Recognized prefix words, compared ignoring case.
pub const GHERKIN_PREFIXES: [&str; 5] = ["given", "when", "and", "but", "then"];

static PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)^\s*(?:{})\s+", GHERKIN_PREFIXES.join("|"))).expect("valid regex")
});

/// Strip one leading prefix word.
///
/// Returns `None` when there is no prefix or nothing would remain.
fn strip_once(text: &str) -> Option<&str> {
    let m = PREFIX.find(text)?;
    let rest = &text[m.end()..];
    if rest.trim().is_empty() {
        None
    } else {
        Some(rest)
    }
}

/// Text after a single leading prefix word.
///
/// When there is no prefix, or removing it would leave nothing, the text is
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use robot_names::gherkin::text_after_gherkin_prefix_if_exists;
///
/// assert_eq!(text_after_gherkin_prefix_if_exists("Given the user is on page"), "the user is on page");
/// assert_eq!(text_after_gherkin_prefix_if_exists("Given"), "Given");
/// ```
pub fn text_after_gherkin_prefix_if_exists(text: &str) -> &str {
    strip_once(text).unwrap_or(text)
}

/// The name followed by each successively stripped variant.
pub fn gherkin_variants(name: &str) -> Vec<&str> {
    let mut variants = vec![name];
    let mut current = name;
    while let Some(next) = strip_once(current) {
        if next == current {
            break;
        }
        variants.push(next);
        current = next;
    }
    variants
}

/// Apply `f` to the name and then to each stripped variant, returning the
/// first `Some`.
pub fn first_gherkin_match<'a, T>(name: &'a str, mut f: impl FnMut(&'a str) -> Option<T>) -> Option<T> {
    let mut current = name;
    loop {
        if let Some(found) = f(current) {
            return Some(found);
        }
        match strip_once(current) {
            Some(next) if next != current => current = next,
            _ => return None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_strip() {
        assert_eq!(text_after_gherkin_prefix_if_exists("Given the user is on page"), "the user is on page");
        assert_eq!(text_after_gherkin_prefix_if_exists("WHEN  x"), "x");
        assert_eq!(text_after_gherkin_prefix_if_exists("Given"), "Given");
        assert_eq!(text_after_gherkin_prefix_if_exists("Given   "), "Given   ");
        assert_eq!(text_after_gherkin_prefix_if_exists("Givenx y"), "Givenx y");
        assert_eq!(text_after_gherkin_prefix_if_exists("Plain"), "Plain");
    }

    #[test]
    fn test_variants_stack() {
        assert_eq!(gherkin_variants("And Then do it"), vec!["And Then do it", "Then do it", "do it"]);
        assert_eq!(gherkin_variants("But"), vec!["But"]);
    }

    #[test]
    fn test_first_match_prefers_original() {
        let found = first_gherkin_match("Given Then Done", |s| (s.to_lowercase() == "then done").then_some(s));
        assert_eq!(found, Some("Then Done"));
        let original = first_gherkin_match("Given x", |s| Some(s.len()));
        assert_eq!(original, Some(7));
    }

    #[test]
    fn test_first_match_none() {
        let mut seen = Vec::new();
        let found: Option<()> = first_gherkin_match("When but x", |s| {
            seen.push(s.to_string());
            None
        });
        assert!(found.is_none());
        assert_eq!(seen, vec!["When but x", "but x", "x"]);
    }
}
