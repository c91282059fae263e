//! Grid Node Assembler
//!
//! Assemble per-node source text into instruction lists.
//!
//! ## Example
//!
//! ```rust
//! use tis_assembler::assemble;
//!
//! let source = r#"
//!     START: MOV UP, ACC
//!     ADD 1
//!     MOV ACC, DOWN
//!     JMP START
//! "#;
//!
//! let program = assemble(source).unwrap();
//! assert_eq!(program.len(), 4);
//! ```

pub mod error;
pub mod lexer;
pub mod parser;
pub mod assembler;
pub mod program_file;

pub use error::{AssemblerError, Result};
pub use assembler::{assemble, assemble_node, assemble_node_with, assemble_program, LabelTable};
pub use parser::{parse_instruction, parse_location};
pub use program_file::{parse_program, render_program};
