//! Per-node source code for a whole grid

use serde::{Deserialize, Serialize};

/// Source lines for every mesh node, indexed by node number
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramCode {
    pub title: String,
    pub nodes: Vec<Vec<String>>,
}

impl ProgramCode {
    /// Empty program for `node_count` nodes
    pub fn new(title: impl Into<String>, node_count: usize) -> Self {
        Self {
            title: title.into(),
            nodes: vec![Vec::new(); node_count],
        }
    }

    /// Replace the source of one node; grows the table if needed
    pub fn set_node<I, S>(&mut self, index: usize, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.nodes.len() <= index {
            self.nodes.resize(index + 1, Vec::new());
        }
        self.nodes[index] = lines.into_iter().map(Into::into).collect();
    }

    /// Builder form of [`ProgramCode::set_node`]
    pub fn with_node<I, S>(mut self, index: usize, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_node(index, lines);
        self
    }

    pub fn node(&self, index: usize) -> &[String] {
        self.nodes.get(index).map(Vec::as_slice).unwrap_or(&[])
    }
}
