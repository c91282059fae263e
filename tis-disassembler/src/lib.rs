//! # Grid Node Disassembler
//!
//! Turn parsed instructions back into source text. Jump targets come out as
//! raw line indices since label names do not survive assembly.
//!
//! ## Example
//!
//! ```rust
//! use tis_spec::{Instruction, Location, Port};
//! use tis_disassembler::format;
//!
//! let instr = Instruction::Mov { src: Location::Address(Port::UP), dst: Port::Acc };
//! assert_eq!(format(&instr), "MOV UP, ACC");
//! ```

pub mod formatter;
pub mod disassembler;

pub use disassembler::{disassemble, disassemble_program};
pub use formatter::format;

#[cfg(test)]
mod tests {
    use super::*;
    use tis_spec::{Instruction, Location};

    #[test]
    fn test_public_exports() {
        assert_eq!(format(&Instruction::Nop), "NOP");
        assert_eq!(disassemble(&[Instruction::Add { src: Location::Number(1) }]), vec!["ADD 1"]);
    }

    // Note: assemble/format round trips are in the workspace-level tests/cross_module.rs
}
