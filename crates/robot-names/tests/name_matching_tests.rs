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

//! Integration tests for keyword name matching.

use proptest::prelude::*;
use robot_names::camel_case::{matches, to_camel_case_parts};
use robot_names::{
    find_embedded_argument_ranges, matches_ignore_case, starts_with_ignore_case,
    text_after_gherkin_prefix_if_exists, unify_definition, KeywordIndex, QualifiedKeywordName,
};

// =============================================================================
// Documented behavior
// =============================================================================

#[test]
fn test_unify_definition() {
    assert_eq!(unify_definition("My Keyword"), "mykeyword");
}

#[test]
fn test_embedded_ranges() {
    assert_eq!(
        find_embedded_argument_ranges("Keyword ${arg1} and ${arg2:\\d+}"),
        vec![8..15, 20..31]
    );
}

#[test]
fn test_camel_case_parts() {
    assert_eq!(to_camel_case_parts("LoginUser"), vec!["Login", "User"]);
    assert!(to_camel_case_parts("login_user").is_empty());
}

#[test]
fn test_gherkin_prefix() {
    assert_eq!(text_after_gherkin_prefix_if_exists("Given the user is on page"), "the user is on page");
    assert_eq!(text_after_gherkin_prefix_if_exists("Given"), "Given");
}

#[test]
fn test_qualified_match() {
    let call = QualifiedKeywordName::from_occurrence("MyLib.Do Something");
    assert!(call.matches_ignoring_case(&QualifiedKeywordName::create("Do Something", "MyLib")));
    assert!(!call.matches_ignoring_case(&QualifiedKeywordName::create("Do Something", "OtherLib")));
}

#[test]
fn test_embedded_match_with_custom_pattern() {
    assert!(matches_ignore_case("Wait ${n:\\d+} Seconds", "wait 10 seconds"));
    assert!(!matches_ignore_case("Wait ${n:\\d+} Seconds", "wait ten seconds"));
}

#[test]
fn test_index_end_to_end() {
    let mut index = KeywordIndex::new();
    index.add("Log", "BuiltIn");
    index.add("Log", "custom.robot");
    index.add("Input ${text} Into ${field}", "forms");

    assert_eq!(index.resolve("builtin.log").len(), 1);
    assert_eq!(index.resolve("Then LOG").len(), 2);
    assert_eq!(index.resolve_unique("forms.Input abc Into name").unwrap().source, "forms");
    assert_eq!(matches("Input ${text} Into ${field}", "InIn"), vec![0..2, 14..16]);
}

// =============================================================================
// Properties
// =============================================================================

fn arb_name() -> impl Strategy<Value = String> {
    "[A-Za-z _${}:\\\\.0-9]{0,24}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: unification is idempotent
    #[test]
    fn prop_unify_idempotent(name in arb_name()) {
        let once = unify_definition(&name);
        prop_assert_eq!(unify_definition(&once), once);
    }

    /// Property: prefix lengths never end inside a placeholder
    #[test]
    fn prop_prefix_never_splits_placeholder(def in arb_name(), prefix in "[A-Za-z ${}]{0,12}") {
        let ranges = find_embedded_argument_ranges(&def);
        if let Some(len) = starts_with_ignore_case(&def, &prefix) {
            prop_assert!(len <= def.chars().count());
            prop_assert!(!ranges.iter().any(|r| r.start < len && len < r.end));
        }
    }

    /// Property: placeholder ranges are ordered, disjoint and brace delimited
    #[test]
    fn prop_ranges_well_formed(name in arb_name()) {
        let chars: Vec<char> = name.chars().collect();
        let ranges = find_embedded_argument_ranges(&name);
        for w in ranges.windows(2) {
            prop_assert!(w[0].end <= w[1].start);
        }
        for r in ranges {
            prop_assert_eq!(chars[r.start], '$');
            prop_assert_eq!(chars[r.start + 1], '{');
            prop_assert_eq!(chars[r.end - 1], '}');
        }
    }

    /// Property: camel case ranges spell the occurrence humps
    #[test]
    fn prop_camel_case_ranges(def in "[A-Za-z ]{0,20}", occ in "([A-Z][a-z]{0,2}){1,3}") {
        let chars: Vec<char> = def.chars().collect();
        let parts = to_camel_case_parts(&occ);
        let ranges = matches(&def, &occ);
        if !ranges.is_empty() {
            prop_assert_eq!(ranges.len(), parts.len());
            for (range, part) in ranges.iter().zip(parts) {
                let text: String = chars[range.clone()].iter().collect();
                prop_assert_eq!(text.to_lowercase(), part.to_lowercase());
            }
        }
    }
}
