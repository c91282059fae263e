//! Assembler errors
//!
//! Line numbers are 1-based and count every line handed to the assembler,
//! blank ones included.

use thiserror::Error;
use tis_spec::Operation;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblerError {
    #[error("Line {line}: `{text}` is too short to be an instruction")]
    LineTooShort { line: usize, text: String },

    #[error("Line {line}: unknown instruction `{mnemonic}`")]
    UnknownInstruction { line: usize, mnemonic: String },

    #[error("Line {line}: {operation} expects {expected} operand(s), found {found}")]
    OperandCount {
        line: usize,
        operation: Operation,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}: invalid operand `{operand}`")]
    InvalidOperand { line: usize, operand: String },

    #[error("Line {line}: value {value} is not in range {min}..={max}")]
    ImmediateOutOfRange { line: usize, value: i64, min: i64, max: i64 },

    #[error("Line {line}: cannot write to `{operand}`")]
    InvalidDestination { line: usize, operand: String },

    #[error("Line {line}: undefined label `{label}`")]
    UndefinedLabel { line: usize, label: String },

    #[error("Line {line}: label `{label}` already defined on line {first}")]
    DuplicateLabel { line: usize, label: String, first: usize },

    #[error("Line {line}: empty label")]
    EmptyLabel { line: usize },

    #[error("Line {line}: source line before any node header")]
    MissingNodeHeader { line: usize },

    #[error("Line {line}: invalid node header `{text}`")]
    InvalidNodeHeader { line: usize, text: String },

    #[error("Line {line}: node {node} is not in range 1..={max}")]
    NodeOutOfRange { line: usize, node: usize, max: usize },

    #[error("Node {node}: {source}")]
    InNode {
        node: usize,
        #[source]
        source: Box<AssemblerError>,
    },
}

impl AssemblerError {
    /// Line the error points at, if it refers to one
    pub fn line(&self) -> Option<usize> {
        match self {
            AssemblerError::LineTooShort { line, .. }
            | AssemblerError::UnknownInstruction { line, .. }
            | AssemblerError::OperandCount { line, .. }
            | AssemblerError::InvalidOperand { line, .. }
            | AssemblerError::ImmediateOutOfRange { line, .. }
            | AssemblerError::InvalidDestination { line, .. }
            | AssemblerError::UndefinedLabel { line, .. }
            | AssemblerError::DuplicateLabel { line, .. }
            | AssemblerError::EmptyLabel { line }
            | AssemblerError::MissingNodeHeader { line }
            | AssemblerError::InvalidNodeHeader { line, .. }
            | AssemblerError::NodeOutOfRange { line, .. } => Some(*line),
            AssemblerError::InNode { source, .. } => source.line(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AssemblerError>;
