// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Checklist trees
//!
//! Items are grouped into sections and optional subsections, and every node
//! carries a checked flag. Checking a node checks its whole subtree in the
//! same call; parents are never updated from their children.
//!
//! The tree is an arena: nodes live in one `Vec` and refer to each other by
//! [`NodeId`].

use crate::{Result, UiError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Selectable item carrying an arbitrary value
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem<T> {
    /// Payload returned by [`Checklist::checked_items`]
    pub value: T,
    /// Display name
    pub name: String,
    /// Display number
    #[serde(default)]
    pub number: u32,
    /// Top-level group; `None` groups under an unnamed section
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Second-level group; `None` or empty places the item directly in its section
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsection: Option<String>,
    /// Initial checked state
    #[serde(default)]
    pub checked: bool,
}

impl<T> ChecklistItem<T> {
    /// Create an unchecked item without a section
    pub fn new(value: T, name: impl Into<String>) -> Self {
        Self {
            value,
            name: name.into(),
            number: 0,
            section: None,
            subsection: None,
            checked: false,
        }
    }

    /// Set the display number
    pub fn with_number(mut self, number: u32) -> Self {
        self.number = number;
        self
    }

    /// Place the item in a section
    pub fn in_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Place the item in a subsection of its section
    pub fn in_subsection(mut self, subsection: impl Into<String>) -> Self {
        self.subsection = Some(subsection.into());
        self
    }

    /// Set the initial checked state
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }
}

/// Index of a node in a [`Checklist`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug)]
struct Node {
    name: String,
    checked: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Index into `items` for leaves
    item: Option<usize>,
}

/// Tree of sections, subsections and items
#[derive(Clone, Debug)]
pub struct Checklist<T> {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    items: Vec<ChecklistItem<T>>,
    /// Leaf node of each item
    item_nodes: Vec<NodeId>,
}

impl<T> Default for Checklist<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            items: Vec::new(),
            item_nodes: Vec::new(),
        }
    }
}

impl<T> Checklist<T> {
    /// Group items into a tree
    ///
    /// Sections and subsections appear in the order they are first seen.
    /// Groups start unchecked; items keep their own checked state.
    pub fn from_items(items: impl IntoIterator<Item = ChecklistItem<T>>) -> Self {
        let mut list = Self::default();
        for item in items {
            let section_name = item.section.clone().unwrap_or_default();
            let section = list.find_or_add_group(None, &section_name);
            let parent = match item.subsection.as_deref() {
                Some(sub) if !sub.is_empty() => list.find_or_add_group(Some(section), sub),
                _ => section,
            };

            let node = list.push_node(Some(parent), item.name.clone(), item.checked);
            list.nodes[node.0].item = Some(list.items.len());
            list.item_nodes.push(node);
            list.items.push(item);
        }

        log::debug!(
            "Built checklist with {} sections and {} items",
            list.roots.len(),
            list.items.len()
        );
        list
    }

    fn push_node(&mut self, parent: Option<NodeId>, name: String, checked: bool) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name,
            checked,
            parent,
            children: Vec::new(),
            item: None,
        });
        match parent {
            Some(parent) => self.nodes[parent.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    fn find_or_add_group(&mut self, parent: Option<NodeId>, name: &str) -> NodeId {
        let siblings = match parent {
            Some(parent) => &self.nodes[parent.0].children,
            None => &self.roots,
        };
        let existing = siblings
            .iter()
            .copied()
            .find(|id| self.nodes[id.0].item.is_none() && self.nodes[id.0].name == name);
        match existing {
            Some(id) => id,
            None => self.push_node(parent, name.to_string(), false),
        }
    }

    fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.0).ok_or(UiError::UnknownNode(id.0))
    }

    /// Number of nodes, groups included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Top-level section nodes
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Child nodes, in insertion order
    pub fn children(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(&self.node(id)?.children)
    }

    /// Parent node, `None` for sections
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.node(id)?.parent)
    }

    /// Display name of a node
    pub fn name(&self, id: NodeId) -> Result<&str> {
        Ok(&self.node(id)?.name)
    }

    /// Checked state of a node
    pub fn is_checked(&self, id: NodeId) -> Result<bool> {
        Ok(self.node(id)?.checked)
    }

    /// Item behind a leaf node, `None` for groups
    pub fn item(&self, id: NodeId) -> Result<Option<&ChecklistItem<T>>> {
        Ok(self.node(id)?.item.map(|idx| &self.items[idx]))
    }

    /// Find a top-level section by name
    pub fn find_section(&self, name: &str) -> Option<NodeId> {
        self.roots
            .iter()
            .copied()
            .find(|id| self.nodes[id.0].name == name)
    }

    /// Find a child group of a node by name
    pub fn find_group(&self, parent: NodeId, name: &str) -> Result<Option<NodeId>> {
        Ok(self.children(parent)?.iter().copied().find(|id| {
            let node = &self.nodes[id.0];
            node.item.is_none() && node.name == name
        }))
    }

    /// Set a node and its whole subtree
    ///
    /// Returns the nodes whose state changed, in preorder.
    pub fn set_checked(&mut self, id: NodeId, checked: bool) -> Result<Vec<NodeId>> {
        self.node(id)?;
        Ok(self.cascade(id, checked))
    }

    /// Flip each node's state, cascading to its subtree
    ///
    /// Nodes are flipped in the given order, so a node listed after its
    /// ancestor flips relative to the state the ancestor left it in. Fails
    /// without changing anything if any id is unknown.
    pub fn toggle(&mut self, ids: &[NodeId]) -> Result<Vec<NodeId>> {
        for &id in ids {
            self.node(id)?;
        }

        let mut changed = Vec::new();
        for &id in ids {
            let checked = !self.nodes[id.0].checked;
            changed.extend(self.cascade(id, checked));
        }
        Ok(changed)
    }

    /// Set every node
    ///
    /// Returns the nodes whose state changed, root by root in preorder.
    pub fn set_all(&mut self, checked: bool) -> Vec<NodeId> {
        let mut changed = Vec::new();
        for i in 0..self.roots.len() {
            let root = self.roots[i];
            changed.extend(self.cascade(root, checked));
        }
        changed
    }

    /// `id` must belong to this arena.
    fn cascade(&mut self, id: NodeId, checked: bool) -> Vec<NodeId> {
        let mut changed = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = &mut self.nodes[current.0];
            if node.checked != checked {
                node.checked = checked;
                if let Some(idx) = node.item {
                    self.items[idx].checked = checked;
                }
                changed.push(current);
            }
            stack.extend(self.nodes[current.0].children.iter().rev().copied());
        }
        changed
    }

    /// Values of checked items, in input order
    pub fn checked_items(&self) -> Vec<&T> {
        self.items
            .iter()
            .zip(&self.item_nodes)
            .filter(|(_, node)| self.nodes[node.0].checked)
            .map(|(item, _)| &item.value)
            .collect()
    }

    /// All items, in input order
    pub fn items(&self) -> &[ChecklistItem<T>] {
        &self.items
    }
}
