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

//! Property-based tests for the robot facade.

use proptest::prelude::*;
use robot::{keyword_index, parse, validate};

fn arb_keyword_name() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Z][a-z]{2,6}( [A-Z][a-z]{2,6}){0,3}",
        "[A-Z][a-z]{2,6} \\$\\{[a-z]{1,5}\\} [a-z]{2,4}",
    ]
}

fn arb_keywords_table() -> impl Strategy<Value = (String, Vec<String>)> {
    prop::collection::vec(arb_keyword_name(), 1..8).prop_map(|names| {
        let mut doc = String::from("*** Keywords ***\n");
        for name in &names {
            doc.push_str(name);
            doc.push_str("\n    No Operation\n");
        }
        (doc, names)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: parsing never fails on well-formed keyword tables
    #[test]
    fn prop_parse_success((doc, _) in arb_keywords_table()) {
        let output = parse(&doc).unwrap();
        prop_assert_eq!(output.file.reconstruct(), doc.clone());
        prop_assert!(validate(&doc).is_ok());
    }

    /// Property: every defined keyword resolves from its own name
    #[test]
    fn prop_defined_keywords_resolve((doc, names) in arb_keywords_table()) {
        let output = parse(&doc).unwrap();
        let index = keyword_index(&output.file, "res");
        prop_assert_eq!(index.len(), names.len());
        for name in &names {
            prop_assert!(!index.resolve(name).is_empty(), "{}", name);
            let qualified = format!("res.{}", name);
            prop_assert!(!index.resolve(&qualified).is_empty(), "{}", qualified);
        }
    }

    /// Property: Gherkin prefixes never hide a definition
    #[test]
    fn prop_gherkin_prefix_resolves((doc, names) in arb_keywords_table(), prefix in "(Given|When|Then|And|But) ") {
        let output = parse(&doc).unwrap();
        let index = keyword_index(&output.file, "res");
        for name in &names {
            let call = format!("{}{}", prefix, name);
            prop_assert!(!index.resolve(&call).is_empty(), "{}", call);
        }
    }
}
