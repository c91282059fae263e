//! Node and program disassembly

use crate::formatter::format;
use tis_spec::{Instruction, ProgramCode};

/// Disassemble one node into source lines
pub fn disassemble(instructions: &[Instruction]) -> Vec<String> {
    instructions.iter().map(format).collect()
}

/// Disassemble every node into a [`ProgramCode`]
pub fn disassemble_program(title: &str, nodes: &[Vec<Instruction>]) -> ProgramCode {
    let mut code = ProgramCode::new(title, nodes.len());
    for (i, node) in nodes.iter().enumerate() {
        code.set_node(i, disassemble(node));
    }
    code
}
