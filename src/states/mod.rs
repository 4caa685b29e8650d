//! Block state ID trees.
//!
//! Every block's states are stored as a tree that is walked one property at
//! a time, in the block's `order`, until a leaf holding the ID is reached.
//! Properties with fewer values come first, so wide properties such as
//! `rotation` or `power` end up in the leaves.

mod report;

pub use report::{BlockDefinition, BlockReport, State};

use crate::error::{ColorGenError, Result};
use crate::types::AIR_ALIASES;
use serde::Serialize;
use std::collections::BTreeMap;

/// Highest state ID (exclusive) the renderer can address.
pub const MAX_STATE_ID: u32 = 1 << 16;

/// A node of a state tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StateNode {
    Leaf(u32),
    Branch(BTreeMap<String, StateNode>),
}

impl StateNode {
    /// Root of a block with a single state.
    pub fn single(id: u32) -> Self {
        StateNode::Branch(BTreeMap::from([(String::new(), StateNode::Leaf(id))]))
    }

    fn collect_leaves(&self, out: &mut Vec<u32>) {
        match self {
            StateNode::Leaf(id) => out.push(*id),
            StateNode::Branch(children) => {
                for child in children.values() {
                    child.collect_leaves(out);
                }
            }
        }
    }

    fn remap<F: Fn(u32) -> u32>(&mut self, f: &F) {
        match self {
            StateNode::Leaf(id) => *id = f(*id),
            StateNode::Branch(children) => {
                for child in children.values_mut() {
                    child.remap(f);
                }
            }
        }
    }

    /// Number of branch levels above the shallowest and deepest leaf.
    pub fn depth_range(&self) -> (usize, usize) {
        match self {
            StateNode::Leaf(_) => (0, 0),
            StateNode::Branch(children) => {
                let (min, max) = children
                    .values()
                    .map(StateNode::depth_range)
                    .fold((usize::MAX, 0), |(lo, hi), (a, b)| (lo.min(a), hi.max(b)));
                (min.saturating_add(1), max + 1)
            }
        }
    }
}

/// The state tree of one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockStates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Vec<String>>,
    pub states: StateNode,
}

impl BlockStates {
    /// Resolve a full property assignment to its ID.
    pub fn lookup(&self, properties: &BTreeMap<String, String>) -> Option<u32> {
        let mut node = &self.states;

        match &self.order {
            None => node = branch_child(node, "")?,
            Some(order) => {
                for property in order {
                    node = branch_child(node, properties.get(property)?)?;
                }
            }
        }

        match node {
            StateNode::Leaf(id) => Some(*id),
            StateNode::Branch(_) => None,
        }
    }

    /// Every leaf ID, in tree order.
    pub fn leaf_ids(&self) -> Vec<u32> {
        let mut ids = Vec::new();
        self.states.collect_leaves(&mut ids);
        ids
    }

    /// Rewrite every leaf through `f`.
    pub fn remap<F: Fn(u32) -> u32>(&mut self, f: F) {
        self.states.remap(&f);
    }

    /// Collapse a tree whose leaves all hold the same ID into a single
    /// leaf and drop the order. Returns true if the tree changed.
    pub fn condense(&mut self) -> bool {
        if self.order.is_none() {
            return false;
        }

        let ids = self.leaf_ids();
        let Some(&id) = ids.first() else {
            return false;
        };
        if ids.iter().any(|&other| other != id) {
            return false;
        }

        self.order = None;
        self.states = StateNode::single(id);
        true
    }
}

fn branch_child<'a>(node: &'a StateNode, key: &str) -> Option<&'a StateNode> {
    match node {
        StateNode::Branch(children) => children.get(key),
        StateNode::Leaf(_) => None,
    }
}

/// Descend order: fewest values first, ties by name.
pub fn property_order(properties: &BTreeMap<String, Vec<String>>) -> Vec<String> {
    let mut order: Vec<(&String, usize)> = properties
        .iter()
        .map(|(name, values)| (name, values.len()))
        .collect();
    order.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
    order.into_iter().map(|(name, _)| name.clone()).collect()
}

fn check_id(block_name: &str, id: u32) -> Result<u32> {
    if id >= MAX_STATE_ID {
        return Err(ColorGenError::InvariantViolation(format!(
            "state ID {} of {} does not fit in 16 bits",
            id, block_name
        )));
    }
    Ok(id)
}

/// Build the state tree of one block.
pub fn build_block_states(block_name: &str, definition: &BlockDefinition) -> Result<BlockStates> {
    let properties = match &definition.properties {
        Some(properties) if !properties.is_empty() => properties,
        _ => {
            let first = definition.states.first().ok_or_else(|| {
                ColorGenError::InvariantViolation(format!("{} has no states", block_name))
            })?;
            let id = if AIR_ALIASES.contains(&block_name) {
                0
            } else {
                first.id
            };
            return Ok(BlockStates {
                order: None,
                states: StateNode::single(check_id(block_name, id)?),
            });
        }
    };

    let order = property_order(properties);
    let mut root = BTreeMap::new();

    for state in &definition.states {
        let id = check_id(block_name, state.id)?;
        let mut current = &mut root;

        for (depth, property) in order.iter().enumerate() {
            let value = state.properties.get(property).ok_or_else(|| {
                ColorGenError::InvariantViolation(format!(
                    "state {} of {} has no value for {}",
                    state.id, block_name, property
                ))
            })?;

            if depth + 1 == order.len() {
                current.insert(value.clone(), StateNode::Leaf(id));
                break;
            }

            let child = current
                .entry(value.clone())
                .or_insert_with(|| StateNode::Branch(BTreeMap::new()));
            current = match child {
                StateNode::Branch(children) => children,
                StateNode::Leaf(_) => {
                    return Err(ColorGenError::InvariantViolation(format!(
                        "conflicting states for {} at {}={}",
                        block_name, property, value
                    )))
                }
            };
        }
    }

    Ok(BlockStates {
        order: Some(order),
        states: StateNode::Branch(root),
    })
}

/// Build the state trees of every block of a report.
pub fn build_all(report: &BlockReport) -> Result<BTreeMap<String, BlockStates>> {
    report
        .blocks
        .iter()
        .map(|(name, definition)| Ok((name.clone(), build_block_states(name, definition)?)))
        .collect()
}
