//! Instruction parser
//!
//! Works on one normalized line (trimmed, uppercased, label already split
//! off). The mnemonic is always the first three characters.

use crate::assembler::LabelTable;
use crate::error::{AssemblerError, Result};
use crate::lexer::{single_token, Token};
use tis_spec::{Instruction, Limits, Location, Operation, Port, Value};

/// Parse a source operand: a port keyword or a signed number
pub fn parse_location(text: &str, line: usize, limits: &Limits) -> Result<Location> {
    match single_token(text) {
        Some(Token::Port(port)) => Ok(Location::Address(port)),
        Some(Token::Number(n)) => Ok(Location::Number(check_range(n, line, limits)?)),
        _ => Err(AssemblerError::InvalidOperand {
            line,
            operand: text.trim().to_string(),
        }),
    }
}

/// Parse a single instruction
pub fn parse_instruction(
    text: &str,
    line: usize,
    labels: &LabelTable,
    limits: &Limits,
) -> Result<Instruction> {
    let text = text.trim();
    if text.len() < 3 {
        return Err(AssemblerError::LineTooShort {
            line,
            text: text.to_string(),
        });
    }

    let unknown = || AssemblerError::UnknownInstruction {
        line,
        mnemonic: text.split_whitespace().next().unwrap_or(text).to_string(),
    };

    let mnemonic = text.get(..3).ok_or_else(unknown)?;
    let rest = &text[3..];
    // "MOVE" must not parse as MOV
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return Err(unknown());
    }
    let operation = Operation::from_mnemonic(mnemonic).ok_or_else(unknown)?;
    let operands = split_operands(rest.trim());

    let expected = operation.operand_count();
    if operands.len() != expected {
        return Err(AssemblerError::OperandCount {
            line,
            operation,
            expected,
            found: operands.len(),
        });
    }

    let instr = match operation {
        Operation::Mov => {
            let src = parse_location(operands[0], line, limits)?;
            let dst = parse_destination(operands[1], line, limits)?;
            Instruction::Mov { src, dst }
        }
        Operation::Add => Instruction::Add { src: parse_location(operands[0], line, limits)? },
        Operation::Sub => Instruction::Sub { src: parse_location(operands[0], line, limits)? },
        Operation::Jro => Instruction::Jro { src: parse_location(operands[0], line, limits)? },
        Operation::Jmp => Instruction::Jmp { target: parse_target(operands[0], line, labels, limits)? },
        Operation::Jez => Instruction::Jez { target: parse_target(operands[0], line, labels, limits)? },
        Operation::Jnz => Instruction::Jnz { target: parse_target(operands[0], line, labels, limits)? },
        Operation::Jgz => Instruction::Jgz { target: parse_target(operands[0], line, labels, limits)? },
        Operation::Jlz => Instruction::Jlz { target: parse_target(operands[0], line, labels, limits)? },
        Operation::Sav => Instruction::Sav,
        Operation::Swp => Instruction::Swp,
        Operation::Nop => Instruction::Nop,
        Operation::Neg => Instruction::Neg,
        Operation::Ata => Instruction::Ata,
    };

    Ok(instr)
}

/// Split operands on ", ", then ",", then whitespace
fn split_operands(rest: &str) -> Vec<&str> {
    if rest.is_empty() {
        return Vec::new();
    }
    if rest.contains(',') {
        rest.split(',').map(str::trim).collect()
    } else {
        rest.split_whitespace().collect()
    }
}

fn parse_destination(text: &str, line: usize, limits: &Limits) -> Result<Port> {
    match parse_location(text, line, limits)? {
        Location::Address(port) if port != Port::Nil => Ok(port),
        _ => Err(AssemblerError::InvalidDestination {
            line,
            operand: text.trim().to_string(),
        }),
    }
}

/// Jump operand: a label of this node, else a raw line index
fn parse_target(text: &str, line: usize, labels: &LabelTable, limits: &Limits) -> Result<i16> {
    if let Some(index) = labels.get(text) {
        return Ok(index as i16);
    }
    match single_token(text) {
        Some(Token::Number(n)) => check_range(n, line, limits),
        _ => Err(AssemblerError::UndefinedLabel {
            line,
            label: text.to_string(),
        }),
    }
}

fn check_range(n: i64, line: usize, limits: &Limits) -> Result<Value> {
    if limits.contains(n) {
        Ok(n as Value)
    } else {
        Err(AssemblerError::ImmediateOutOfRange {
            line,
            value: n,
            min: limits.acc_min as i64,
            max: limits.acc_max as i64,
        })
    }
}
