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

//! Variable references found in a cell value.

use super::tree::{build_structure_tree, ContainerId, ContainerKind, ElementType, ExpressionTree, Node};
use super::VariableType;
use std::ops::Range;

/// A closed, non-escaped variable reference such as `${name}` or `@{list}[0]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDeclaration {
    /// Full text from the sigil up to the last index bracket.
    pub text: String,
    /// Text between the braces.
    pub name: String,
    pub kind: VariableType,
    /// Character range of [`Self::text`] within the value.
    pub range: Range<usize>,
    /// Contents of trailing `[...]` parts.
    pub indexes: Vec<String>,
    /// Nested inside another variable's braces.
    pub nested: bool,
}

/// Everything [`extract_variables`] found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableExtraction {
    pub variables: Vec<VariableDeclaration>,
    /// Character positions of sigils separated from their `{` by whitespace.
    pub spaced_sigils: Vec<usize>,
}

impl VariableExtraction {
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

/// Extract variable references from `text`.
///
/// Equivalent to [`extract_variables_with_depth`] with the default depth
/// limit.
pub fn extract_variables(text: &str) -> VariableExtraction {
    extract_variables_with_depth(text, crate::Limits::default().max_expression_depth)
}

pub fn extract_variables_with_depth(text: &str, max_depth: usize) -> VariableExtraction {
    let tree = build_structure_tree(text, max_depth);
    let mut out = VariableExtraction::default();
    collect(&tree, &mut out);
    out.variables.sort_by_key(|v| (v.range.start, std::cmp::Reverse(v.range.end)));
    out
}

fn collect(tree: &ExpressionTree, out: &mut VariableExtraction) {
    let mut pending = vec![(ExpressionTree::ROOT, false)];
    while let Some((id, inside_variable)) = pending.pop() {
        let elements = tree.container(id).elements();
        for (pos, node) in elements.iter().enumerate() {
            let Some(child) = node.as_container() else {
                continue;
            };
            let kind = tree.kind(child);
            let is_variable = kind == ContainerKind::Variable;
            if is_variable && tree.is_terminated(child) {
                if let Some(declaration) = declaration_at(tree, elements, pos, child, inside_variable) {
                    out.variables.push(declaration);
                }
            }
            if kind == ContainerKind::Curly {
                if let Some(sigil) = spaced_sigil_before(tree, elements, pos) {
                    out.spaced_sigils.push(sigil);
                }
            }
            pending.push((child, inside_variable || is_variable));
        }
    }
}

/// Text between the opener and closer of a terminated container.
fn inner_text(tree: &ExpressionTree, id: ContainerId) -> Option<&str> {
    let text = tree.container_text(id);
    text.get(1..text.len().checked_sub(1)?)
}

/// Build the declaration for the variable container at `elements[pos]`.
fn declaration_at(
    tree: &ExpressionTree,
    elements: &[Node],
    pos: usize,
    container: ContainerId,
    nested: bool,
) -> Option<VariableDeclaration> {
    let sigil_pos = pos.checked_sub(1)?;
    let sigil = elements[sigil_pos].as_element()?;
    if is_escaped(tree, elements, sigil_pos) {
        return None;
    }
    let (braces_chars, braces_bytes) = tree.span(container)?;
    let name = inner_text(tree, container)?.to_string();
    let mut end_chars = braces_chars.end;
    let mut end_bytes = braces_bytes.end;

    let mut indexes = Vec::new();
    for node in &elements[pos + 1..] {
        let Some(next) = node.as_container() else {
            break;
        };
        if tree.kind(next) != ContainerKind::Index || !tree.is_terminated(next) {
            break;
        }
        let (Some((chars, bytes)), Some(inner)) = (tree.span(next), inner_text(tree, next)) else {
            break;
        };
        indexes.push(inner.to_string());
        end_chars = chars.end;
        end_bytes = bytes.end;
    }

    let source = tree.source();
    let start_bytes = sigil.byte_range().start;
    let text = source.get(start_bytes..end_bytes)?;
    let kind = text
        .chars()
        .next()
        .map(VariableType::from_sigil)
        .unwrap_or(VariableType::Invalid);
    Some(VariableDeclaration {
        text: text.to_string(),
        name,
        kind,
        range: sigil.char_range().start..end_chars,
        indexes,
        nested,
    })
}

/// A sigil is escaped by an odd-length run of backslashes right before it.
fn is_escaped(tree: &ExpressionTree, elements: &[Node], sigil_pos: usize) -> bool {
    sigil_pos
        .checked_sub(1)
        .and_then(|prev| elements[prev].as_element())
        .filter(|e| e.element_type() == ElementType::Escape)
        .is_some_and(|e| tree.text_of(e).chars().count() % 2 == 1)
}

/// A sigil left as text because whitespace separates it from a `{`.
fn spaced_sigil_before(tree: &ExpressionTree, elements: &[Node], pos: usize) -> Option<usize> {
    let space = elements[pos.checked_sub(1)?].as_element()?;
    let text = elements[pos.checked_sub(2)?].as_element()?;
    let ends_with_sigil = tree
        .text_of(text)
        .chars()
        .last()
        .is_some_and(|c| matches!(c, '$' | '@' | '&' | '%'));
    (space.element_type() == ElementType::Whitespace && ends_with_sigil).then(|| text.char_range().end - 1)
}
