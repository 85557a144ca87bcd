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

//! Bracket structure tree over a single cell value.
//!
//! Containers live in an index arena owned by [`ExpressionTree`]; children
//! refer to nested containers by [`ContainerId`]. Id 0 is always the root.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::ops::Range;

/// Classification of one character (or a merged run of characters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Text,
    Whitespace,
    Escape,
    /// One of `$ @ & %`.
    VariableTypeId,
    CurlyOpen,
    CurlyClose,
    SquareOpen,
    SquareClose,
}

static CHAR_TYPES: Lazy<HashMap<char, ElementType>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for c in [' ', '\t'] {
        map.insert(c, ElementType::Whitespace);
    }
    map.insert('\\', ElementType::Escape);
    for c in ['$', '@', '&', '%'] {
        map.insert(c, ElementType::VariableTypeId);
    }
    map.insert('{', ElementType::CurlyOpen);
    map.insert('}', ElementType::CurlyClose);
    map.insert('[', ElementType::SquareOpen);
    map.insert(']', ElementType::SquareClose);
    map
});

static CLOSE_TYPES: Lazy<HashMap<ElementType, ElementType>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert(ElementType::CurlyOpen, ElementType::CurlyClose);
    map.insert(ElementType::SquareOpen, ElementType::SquareClose);
    map
});

impl ElementType {
    /// Type of a single character.
    pub fn of(c: char) -> Self {
        CHAR_TYPES.get(&c).copied().unwrap_or(ElementType::Text)
    }

    /// Adjacent elements of a mergeable type collapse into one span.
    pub const fn can_be_merged(&self) -> bool {
        matches!(self, Self::Text | Self::Whitespace | Self::Escape)
    }

    pub const fn opens_container(&self) -> bool {
        matches!(self, Self::CurlyOpen | Self::SquareOpen)
    }

    pub const fn closes_container(&self) -> bool {
        matches!(self, Self::CurlyClose | Self::SquareClose)
    }

    /// The closer matching an opener.
    pub fn close_type(&self) -> Option<ElementType> {
        CLOSE_TYPES.get(self).copied()
    }
}

/// A leaf span of the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerElement {
    element_type: ElementType,
    chars: Range<usize>,
    bytes: Range<usize>,
}

impl ContainerElement {
    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// Character range within the source.
    pub fn char_range(&self) -> Range<usize> {
        self.chars.clone()
    }

    pub fn byte_range(&self) -> Range<usize> {
        self.bytes.clone()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

/// Index of a container inside its tree.
pub type ContainerId = usize;

/// A child of a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(ContainerElement),
    Container(ContainerId),
}

impl Node {
    pub fn as_element(&self) -> Option<&ContainerElement> {
        match self {
            Node::Element(e) => Some(e),
            Node::Container(_) => None,
        }
    }

    pub fn as_container(&self) -> Option<ContainerId> {
        match self {
            Node::Container(id) => Some(*id),
            Node::Element(_) => None,
        }
    }
}

/// A composite node: the opener, its content and (once closed) the closer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    parent: Option<ContainerId>,
    elements: Vec<Node>,
    open: bool,
    depth: usize,
}

impl Container {
    fn new(parent: Option<ContainerId>, depth: usize) -> Self {
        Self {
            parent,
            elements: Vec::new(),
            open: true,
            depth,
        }
    }

    pub fn parent(&self) -> Option<ContainerId> {
        self.parent
    }

    pub fn elements(&self) -> &[Node] {
        &self.elements
    }

    /// False once the matching closer was appended.
    pub fn is_open_for_modification(&self) -> bool {
        self.open
    }

    /// Nesting depth; the root is 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn first_type(&self) -> Option<ElementType> {
        self.elements
            .first()
            .and_then(Node::as_element)
            .map(ContainerElement::element_type)
    }
}

/// What a container stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Root,
    /// `{...}` directly preceded by a variable sigil.
    Variable,
    /// Any other `{...}`.
    Curly,
    /// `[...]`
    Index,
}

/// The structure of one parsed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionTree {
    source: String,
    containers: Vec<Container>,
}

impl ExpressionTree {
    pub const ROOT: ContainerId = 0;

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> &Container {
        &self.containers[Self::ROOT]
    }

    pub fn container(&self, id: ContainerId) -> &Container {
        &self.containers[id]
    }

    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    /// Source text of a leaf.
    pub fn text_of(&self, element: &ContainerElement) -> &str {
        &self.source[element.byte_range()]
    }

    pub fn kind(&self, id: ContainerId) -> ContainerKind {
        let container = &self.containers[id];
        let Some(parent) = container.parent else {
            return ContainerKind::Root;
        };
        match container.first_type() {
            Some(ElementType::SquareOpen) => ContainerKind::Index,
            _ => {
                let siblings = &self.containers[parent].elements;
                let preceded_by_sigil = siblings
                    .iter()
                    .position(|n| *n == Node::Container(id))
                    .and_then(|pos| pos.checked_sub(1))
                    .and_then(|prev| siblings[prev].as_element())
                    .is_some_and(|e| e.element_type == ElementType::VariableTypeId);
                if preceded_by_sigil {
                    ContainerKind::Variable
                } else {
                    ContainerKind::Curly
                }
            }
        }
    }

    /// Character and byte span covered by a container, if it holds anything.
    pub fn span(&self, id: ContainerId) -> Option<(Range<usize>, Range<usize>)> {
        let first = self.first_leaf(id)?;
        let last = self.last_leaf(id)?;
        Some((
            first.chars.start..last.chars.end,
            first.bytes.start..last.bytes.end,
        ))
    }

    /// Source text covered by a container.
    pub fn container_text(&self, id: ContainerId) -> &str {
        self.span(id)
            .map(|(_, bytes)| &self.source[bytes])
            .unwrap_or("")
    }

    fn first_leaf(&self, id: ContainerId) -> Option<&ContainerElement> {
        let mut id = id;
        loop {
            match self.containers[id].elements.first()? {
                Node::Element(e) => return Some(e),
                Node::Container(child) => id = *child,
            }
        }
    }

    fn last_leaf(&self, id: ContainerId) -> Option<&ContainerElement> {
        let mut id = id;
        loop {
            match self.containers[id].elements.last()? {
                Node::Element(e) => return Some(e),
                Node::Container(child) => id = *child,
            }
        }
    }

    /// True when the last child of `id` is the closer pairing with its own
    /// opener. Containers closed only because an ancestor closed are not.
    pub fn is_terminated(&self, id: ContainerId) -> bool {
        let container = &self.containers[id];
        let expected = container.first_type().and_then(|t| t.close_type());
        let last = container
            .elements
            .last()
            .and_then(Node::as_element)
            .map(ContainerElement::element_type);
        !container.open && expected.is_some() && last == expected
    }

    /// Narrowest open container whose opener pairs with `close`, searched
    /// upwards from `from`.
    ///
    /// Open containers always form the chain from the root to the current
    /// container, so walking parents visits every candidate.
    fn find_nearest_container_to_close(
        &self,
        close: ElementType,
        from: ContainerId,
    ) -> Option<ContainerId> {
        let mut cursor = Some(from);
        while let Some(id) = cursor {
            let container = &self.containers[id];
            if container.open
                && container.first_type().and_then(|t| t.close_type()) == Some(close)
            {
                return Some(id);
            }
            cursor = container.parent;
        }
        None
    }

    /// Close `id` and every still-open container below it.
    fn close_container(&mut self, id: ContainerId) {
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            let container = &mut self.containers[next];
            if !container.open {
                continue;
            }
            container.open = false;
            pending.extend(container.elements.iter().filter_map(Node::as_container));
        }
    }

    fn push_element(&mut self, into: ContainerId, element: ContainerElement) {
        let elements = &mut self.containers[into].elements;
        if element.element_type.can_be_merged() {
            if let Some(Node::Element(last)) = elements.last_mut() {
                if last.element_type == element.element_type {
                    last.chars.end = element.chars.end;
                    last.bytes.end = element.bytes.end;
                    return;
                }
            }
        }
        elements.push(Node::Element(element));
    }
}

/// Build the bracket structure of `text`.
///
/// Openers nested deeper than `max_depth` are kept as plain text, and so is
/// a sigil that is not immediately followed by an opening `{`.
/// Unbalanced brackets never fail: the affected containers stay open, and a
/// closer with no open partner is kept as a plain element.
pub fn build_structure_tree(text: &str, max_depth: usize) -> ExpressionTree {
    let mut tree = ExpressionTree {
        source: text.to_string(),
        containers: vec![Container::new(None, 0)],
    };
    let mut current = ExpressionTree::ROOT;

    let mut chars = text.char_indices().enumerate().peekable();
    while let Some((char_index, (byte_index, c))) = chars.next() {
        let can_open = tree.containers[current].depth < max_depth;
        let mut element_type = ElementType::of(c);
        if element_type.opens_container() && !can_open {
            element_type = ElementType::Text;
        }
        // a sigil only counts when it starts a variable
        if element_type == ElementType::VariableTypeId {
            let opens_variable = can_open && matches!(chars.peek(), Some((_, (_, '{'))));
            if !opens_variable {
                element_type = ElementType::Text;
            }
        }
        let element = ContainerElement {
            element_type,
            chars: char_index..char_index + 1,
            bytes: byte_index..byte_index + c.len_utf8(),
        };

        if element_type.opens_container() {
            let depth = tree.containers[current].depth + 1;
            let id = tree.containers.len();
            tree.containers.push(Container::new(Some(current), depth));
            tree.containers[current].elements.push(Node::Container(id));
            tree.containers[id].elements.push(Node::Element(element));
            current = id;
        } else if element_type.closes_container() {
            match tree.find_nearest_container_to_close(element_type, current) {
                Some(matching) => {
                    tree.containers[matching].elements.push(Node::Element(element));
                    tree.close_container(matching);
                    current = tree.containers[matching]
                        .parent
                        .unwrap_or(ExpressionTree::ROOT);
                }
                None => tree.push_element(current, element),
            }
        } else {
            tree.push_element(current, element);
        }
    }

    tree
}
