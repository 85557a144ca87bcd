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

//! Name unification.
//!
//! Keyword names compare case-insensitively and ignore spaces and
//! underscores, so `Open Browser`, `open_browser` and `OPENBROWSER` are the
//! same keyword. Names with embedded arguments keep their spacing since the
//! spaces are part of the pattern.

use crate::embedded::has_embedded_arguments;

/// Canonical form of a keyword name.
///
/// Lowercases the name, and strips every space and underscore unless the
/// name declares embedded arguments. Applying it twice yields the same
/// result as applying it once.
///
/// # Examples
///
/// ```
/// use robot_names::unify_definition;
///
/// assert_eq!(unify_definition("My Keyword"), "mykeyword");
/// assert_eq!(unify_definition("Login ${User}"), "login ${user}");
/// ```
pub fn unify_definition(name: &str) -> String {
    let lower = name.to_lowercase();
    if has_embedded_arguments(&lower) {
        lower
    } else {
        lower.chars().filter(|c| *c != ' ' && *c != '_').collect()
    }
}

/// Whether two names denote the same keyword after unification.
pub fn names_equal(a: &str, b: &str) -> bool {
    unify_definition(a) == unify_definition(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unify_plain() {
        assert_eq!(unify_definition("My Keyword"), "mykeyword");
        assert_eq!(unify_definition("my_key word"), "mykeyword");
        assert_eq!(unify_definition(""), "");
    }

    #[test]
    fn test_unify_embedded_keeps_spaces() {
        assert_eq!(unify_definition("Login ${user} To_X"), "login ${user} to_x");
    }

    #[test]
    fn test_unify_idempotent() {
        for name in ["My Keyword", "$ {x} y", "Login ${user}", "A_B C", "ÄÖ Ü"] {
            let once = unify_definition(name);
            assert_eq!(unify_definition(&once), once, "{}", name);
        }
    }

    #[test]
    fn test_names_equal() {
        assert!(names_equal("Open Browser", "open_browser"));
        assert!(!names_equal("Open Browser", "Close Browser"));
    }
}
