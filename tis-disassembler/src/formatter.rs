//! Instruction formatting to source text

use tis_spec::Instruction;

/// Format instruction as source text
pub fn format(instr: &Instruction) -> String {
    let op = instr.operation();
    match instr {
        Instruction::Mov { src, dst } => format!("{} {}, {}", op, src, dst),

        Instruction::Add { src } | Instruction::Sub { src } | Instruction::Jro { src } => {
            format!("{} {}", op, src)
        }

        Instruction::Jmp { target }
        | Instruction::Jez { target }
        | Instruction::Jnz { target }
        | Instruction::Jgz { target }
        | Instruction::Jlz { target } => format!("{} {}", op, target),

        Instruction::Neg | Instruction::Sav | Instruction::Swp | Instruction::Nop | Instruction::Ata => {
            op.mnemonic().to_string()
        }
    }
}
