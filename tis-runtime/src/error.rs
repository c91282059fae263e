//! Runtime error types

use crate::node::NodeId;
use thiserror::Error;
use tis_assembler::AssemblerError;
use tis_spec::{Port, PuzzleError};

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Puzzle error: {0}")]
    Puzzle(#[from] PuzzleError),

    #[error("Assembler error: {0}")]
    Assembler(#[from] AssemblerError),

    #[error("Node {node}: cannot write to {port}")]
    InvalidWrite { node: NodeId, port: Port },

    #[error("Node {node} does not exist (grid has {count} nodes)")]
    NodeOutOfRange { node: usize, count: usize },

    #[error("Node {node} is damaged and cannot hold a program")]
    DamagedNode { node: usize },
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
