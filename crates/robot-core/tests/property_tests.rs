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

//! Property-based tests for the parser and the expression builder.
//!
//! These tests verify that reconstruction is lossless and that the registry
//! always finds exactly one mapper, across randomly generated inputs.

use proptest::prelude::*;
use robot_core::expression::{
    build_structure_tree, extract_variables, extract_variables_with_depth, ElementType, ExpressionTree, Node,
};
use robot_core::{parse_str, parse_with_options, GrammarVersion, ParseOptions};

/// A cell made of the characters the grammar cares about.
fn arb_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 =.:]{1,12}",
        "[$@&%{}\\[\\]\\\\#a-z]{1,10}",
        Just("*** Settings ***".to_string()),
        Just("*** Variables ***".to_string()),
        Just("*** Test Cases ***".to_string()),
        Just("*** Keywords ***".to_string()),
        Just("*** Other ***".to_string()),
        Just("Library".to_string()),
        Just("Suite Setup".to_string()),
        Just("Meta: Key".to_string()),
        Just("[Arguments]".to_string()),
        Just("[Setup]".to_string()),
        Just("[Bogus]".to_string()),
        Just("...".to_string()),
        Just("\\".to_string()),
        Just("# note".to_string()),
        Just("${x}=".to_string()),
        Just("&{d}".to_string()),
        Just("NONE".to_string()),
        Just("WITH NAME".to_string()),
    ]
}

fn arb_separator() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("  ".to_string()),
        Just("    ".to_string()),
        Just("\t".to_string()),
        Just(" \t ".to_string()),
        Just(" | ".to_string()),
    ]
}

fn arb_line() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just(String::new()), Just("    ".to_string()), Just("| ".to_string())],
        prop::collection::vec((arb_cell(), arb_separator()), 0..6),
    )
        .prop_map(|(lead, cells)| {
            let mut line = lead;
            for (i, (cell, sep)) in cells.into_iter().enumerate() {
                if i > 0 {
                    line.push_str(&sep);
                }
                line.push_str(&cell);
            }
            line
        })
}

fn arb_eol() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("\n"), Just("\r\n"), Just("\r"), Just("\n\r")]
}

fn arb_document() -> impl Strategy<Value = String> {
    (prop::collection::vec((arb_line(), arb_eol()), 0..30), any::<bool>()).prop_map(
        |(lines, trailing)| {
            let mut doc = String::new();
            let count = lines.len();
            for (i, (line, eol)) in lines.into_iter().enumerate() {
                doc.push_str(&line);
                if i + 1 < count || trailing {
                    doc.push_str(eol);
                }
            }
            doc
        },
    )
}

fn arb_version() -> impl Strategy<Value = GrammarVersion> {
    prop_oneof![
        Just(GrammarVersion::new(2, 8)),
        Just(GrammarVersion::new(2, 9)),
        Just(GrammarVersion::V3_0),
        Just(GrammarVersion::new(3, 1)),
    ]
}

fn assert_root_open(tree: &ExpressionTree) -> Result<(), TestCaseError> {
    prop_assert!(tree.root().is_open_for_modification());
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: reconstruction reproduces the input exactly
    #[test]
    fn prop_round_trip(doc in arb_document()) {
        let out = parse_str(&doc).unwrap();
        prop_assert_eq!(out.file.reconstruct(), doc);
    }

    /// Property: the registry never reports a missing or ambiguous mapper
    #[test]
    fn prop_no_registry_errors(doc in arb_document(), version in arb_version()) {
        let opts = ParseOptions::builder().version(version).build();
        let out = parse_with_options(doc.as_bytes(), &opts).unwrap();
        prop_assert!(!out.has_errors(), "{:?}", out.messages);
        prop_assert_eq!(out.file.reconstruct(), doc);
    }

    /// Property: tokens are in source order with increasing offsets
    #[test]
    fn prop_token_offsets_increase(doc in arb_document()) {
        let out = parse_str(&doc).unwrap();
        let offsets: Vec<usize> = out.file.tokens().map(|t| t.position().offset()).collect();
        prop_assert!(offsets.windows(2).all(|w| w[0] < w[1]));
    }

    /// Property: the expression root is never closed
    #[test]
    fn prop_root_always_open(text in "[${}@&%\\[\\]\\\\a-z ]{0,40}") {
        let tree = build_structure_tree(&text, 64);
        assert_root_open(&tree)?;
    }

    /// Property: leaves are normalized and every sigil leaf starts a container
    #[test]
    fn prop_leaves_normalized(text in "[${}@&%\\[\\]\\\\a-z ]{0,40}") {
        let tree = build_structure_tree(&text, usize::MAX);
        for id in 0..tree.container_count() {
            let elements = tree.container(id).elements();
            for pair in elements.windows(2) {
                if let (Node::Element(a), Node::Element(b)) = (&pair[0], &pair[1]) {
                    prop_assert!(
                        !(a.element_type() == b.element_type() && a.element_type().can_be_merged()),
                        "unmerged {:?} in {:?}", a.element_type(), text
                    );
                    prop_assert_ne!(a.element_type(), ElementType::VariableTypeId);
                }
            }
            if let Some(Node::Element(last)) = elements.last() {
                prop_assert_ne!(last.element_type(), ElementType::VariableTypeId);
            }
        }
    }

    /// Property: every declaration is closed by its own braces and brackets
    #[test]
    fn prop_declarations_self_terminated(text in "[${}@&%\\[\\]\\\\a-z ]{0,40}", depth in 1usize..8) {
        for variable in extract_variables_with_depth(&text, depth).variables {
            let sigil = &variable.text[..1];
            let mut expected = format!("{}{{{}}}", sigil, variable.name);
            for index in &variable.indexes {
                expected.push('[');
                expected.push_str(index);
                expected.push(']');
            }
            prop_assert_eq!(expected, variable.text);
        }
    }

    /// Property: extracted variables lie within the text and start with a sigil
    #[test]
    fn prop_extracted_ranges_in_bounds(text in "[${}@&%\\[\\]\\\\a-z ]{0,40}") {
        let chars: Vec<char> = text.chars().collect();
        for variable in extract_variables(&text).variables {
            prop_assert!(variable.range.end <= chars.len());
            prop_assert!(matches!(chars[variable.range.start], '$' | '@' | '&' | '%'));
            let slice: String = chars[variable.range.clone()].iter().collect();
            prop_assert_eq!(slice, variable.text);
        }
    }
}
