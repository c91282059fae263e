//! # Grid Node Simulator Core Types
//!
//! Core types shared by the assembler, disassembler and runtime.
//!
//! ## Key Features
//! - Signed accumulator values clamped to [-999, 999]
//! - 14 operations over typed source/destination locations
//! - Four compass ports plus the `NIL`, `ACC`, `ANY` and `LAST` pseudo-ports
//! - Validated puzzle descriptors (streams + node layout)

pub mod config;
pub mod instruction;
pub mod error;
pub mod puzzle;
pub mod program;

pub use config::Limits;
pub use instruction::{Direction, Instruction, Location, Operation, Port};
pub use error::{PuzzleError, Result};
pub use puzzle::{NodeKind, Puzzle, PuzzleDescriptor, Stream, StreamDescriptor, StreamKind};
pub use program::ProgramCode;

/// Register and port value
pub type Value = i16;

/// Largest accumulator value
pub const MAX_ACC: Value = 999;

/// Smallest accumulator value
pub const MIN_ACC: Value = -999;

/// Conventional mesh dimensions
pub const GRID_ROWS: usize = 3;
pub const GRID_COLS: usize = 4;

/// Maximum number of values a stream may declare
pub const MAX_STREAM_VALUES: usize = 30;
