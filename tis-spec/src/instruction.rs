//! Node Instruction Set
//!
//! Every instruction has at most one source and one destination. Sources are
//! either a literal number or a port; destinations are always a port.
//!
//! ## Operations
//! - Data:    MOV
//! - ALU:     ADD, SUB, NEG
//! - Backup:  SAV, SWP
//! - Control: JMP, JEZ, JNZ, JGZ, JLZ, JRO
//! - Other:   NOP, ATA (append ACC to the node's output sink)

use crate::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Compass direction of a neighbor link
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Direction {
    /// All directions in link-index order
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    /// Index into a node's link array
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction pointing back from the neighbor
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Right => "RIGHT",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Address-typed location
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Port {
    /// Neighbor link
    Dir(Direction),
    /// Reads as 0; cannot be written
    Nil,
    /// The accumulator
    Acc,
    /// First ready neighbor
    Any,
    /// Neighbor most recently resolved by `Any`
    Last,
}

impl Port {
    pub const UP: Self = Port::Dir(Direction::Up);
    pub const RIGHT: Self = Port::Dir(Direction::Right);
    pub const DOWN: Self = Port::Dir(Direction::Down);
    pub const LEFT: Self = Port::Dir(Direction::Left);

    /// Whether reading or writing this port talks to a neighbor
    #[inline]
    pub const fn is_link(self) -> bool {
        matches!(self, Port::Dir(_) | Port::Any | Port::Last)
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Port::Dir(d) => write!(f, "{}", d),
            Port::Nil => f.write_str("NIL"),
            Port::Acc => f.write_str("ACC"),
            Port::Any => f.write_str("ANY"),
            Port::Last => f.write_str("LAST"),
        }
    }
}

/// Source operand: a literal or a port
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Number(Value),
    Address(Port),
}

impl Location {
    /// The port this location reads from a neighbor, if any
    pub fn link(&self) -> Option<Port> {
        match self {
            Location::Address(port) if port.is_link() => Some(*port),
            _ => None,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Number(n) => write!(f, "{}", n),
            Location::Address(port) => write!(f, "{}", port),
        }
    }
}

impl From<Port> for Location {
    fn from(port: Port) -> Self {
        Location::Address(port)
    }
}

impl From<Value> for Location {
    fn from(value: Value) -> Self {
        Location::Number(value)
    }
}

/// Operation mnemonic
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Mov,
    Sav,
    Swp,
    Sub,
    Add,
    Nop,
    Neg,
    Jez,
    Jmp,
    Jnz,
    Jgz,
    Jlz,
    Jro,
    Ata,
}

impl Operation {
    pub const ALL: [Operation; 14] = [
        Operation::Mov,
        Operation::Sav,
        Operation::Swp,
        Operation::Sub,
        Operation::Add,
        Operation::Nop,
        Operation::Neg,
        Operation::Jez,
        Operation::Jmp,
        Operation::Jnz,
        Operation::Jgz,
        Operation::Jlz,
        Operation::Jro,
        Operation::Ata,
    ];

    pub const fn mnemonic(self) -> &'static str {
        match self {
            Operation::Mov => "MOV",
            Operation::Sav => "SAV",
            Operation::Swp => "SWP",
            Operation::Sub => "SUB",
            Operation::Add => "ADD",
            Operation::Nop => "NOP",
            Operation::Neg => "NEG",
            Operation::Jez => "JEZ",
            Operation::Jmp => "JMP",
            Operation::Jnz => "JNZ",
            Operation::Jgz => "JGZ",
            Operation::Jlz => "JLZ",
            Operation::Jro => "JRO",
            Operation::Ata => "ATA",
        }
    }

    pub fn from_mnemonic(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.mnemonic() == s)
    }

    /// Number of operands the source form takes
    pub const fn operand_count(self) -> usize {
        match self {
            Operation::Mov => 2,
            Operation::Sub
            | Operation::Add
            | Operation::Jez
            | Operation::Jmp
            | Operation::Jnz
            | Operation::Jgz
            | Operation::Jlz
            | Operation::Jro => 1,
            Operation::Sav | Operation::Swp | Operation::Nop | Operation::Neg | Operation::Ata => 0,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// A parsed node instruction
///
/// Jump targets are resolved line indices. Targets outside the program are
/// legal and send the cursor back to 0 when taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    // ========== Data ==========
    /// MOV: dst = src
    Mov { src: Location, dst: Port },

    // ========== Arithmetic ==========
    /// ADD: ACC = clamp(ACC + src)
    Add { src: Location },

    /// SUB: ACC = clamp(ACC - src)
    Sub { src: Location },

    /// NEG: ACC = -ACC
    Neg,

    // ========== Backup register ==========
    /// SAV: BAK = ACC
    Sav,

    /// SWP: ACC <-> BAK
    Swp,

    // ========== Control flow ==========
    /// JMP: cursor = target
    Jmp { target: i16 },

    /// JEZ: if ACC == 0 { cursor = target }
    Jez { target: i16 },

    /// JNZ: if ACC != 0 { cursor = target }
    Jnz { target: i16 },

    /// JGZ: if ACC > 0 { cursor = target }
    Jgz { target: i16 },

    /// JLZ: if ACC < 0 { cursor = target }
    Jlz { target: i16 },

    /// JRO: cursor += src
    Jro { src: Location },

    // ========== Misc ==========
    Nop,

    /// ATA: append ACC to the attached output sink
    Ata,
}

impl Instruction {
    pub fn operation(&self) -> Operation {
        match self {
            Instruction::Mov { .. } => Operation::Mov,
            Instruction::Add { .. } => Operation::Add,
            Instruction::Sub { .. } => Operation::Sub,
            Instruction::Neg => Operation::Neg,
            Instruction::Sav => Operation::Sav,
            Instruction::Swp => Operation::Swp,
            Instruction::Jmp { .. } => Operation::Jmp,
            Instruction::Jez { .. } => Operation::Jez,
            Instruction::Jnz { .. } => Operation::Jnz,
            Instruction::Jgz { .. } => Operation::Jgz,
            Instruction::Jlz { .. } => Operation::Jlz,
            Instruction::Jro { .. } => Operation::Jro,
            Instruction::Nop => Operation::Nop,
            Instruction::Ata => Operation::Ata,
        }
    }

    /// Source operand, for instructions that read one
    pub fn source(&self) -> Option<Location> {
        match self {
            Instruction::Mov { src, .. }
            | Instruction::Add { src }
            | Instruction::Sub { src }
            | Instruction::Jro { src } => Some(*src),
            _ => None,
        }
    }

    /// Port this instruction would read from a neighbor
    pub fn listening_port(&self) -> Option<Port> {
        self.source().and_then(|src| src.link())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_opposite() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
        }
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
    }

    #[test]
    fn test_direction_index_order() {
        let indices: Vec<usize> = Direction::ALL.iter().map(|d| d.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_port_display() {
        let ports = [Port::UP, Port::RIGHT, Port::DOWN, Port::LEFT, Port::Nil, Port::Acc, Port::Any, Port::Last];
        let names: Vec<String> = ports.iter().map(|p| p.to_string()).collect();
        assert_eq!(names, ["UP", "RIGHT", "DOWN", "LEFT", "NIL", "ACC", "ANY", "LAST"]);
    }

    #[test]
    fn test_port_is_link() {
        assert!(Port::UP.is_link());
        assert!(Port::Any.is_link());
        assert!(Port::Last.is_link());
        assert!(!Port::Acc.is_link());
        assert!(!Port::Nil.is_link());
    }

    #[test]
    fn test_mnemonic_roundtrip() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_mnemonic(op.mnemonic()), Some(op));
        }
        assert_eq!(Operation::from_mnemonic("HCF"), None);
    }

    #[test]
    fn test_operand_counts() {
        assert_eq!(Operation::Mov.operand_count(), 2);
        assert_eq!(Operation::Jro.operand_count(), 1);
        assert_eq!(Operation::Ata.operand_count(), 0);
    }

    #[test]
    fn test_listening_port() {
        let mov = Instruction::Mov { src: Location::Address(Port::LEFT), dst: Port::Acc };
        assert_eq!(mov.listening_port(), Some(Port::LEFT));

        let add = Instruction::Add { src: Location::Number(5) };
        assert_eq!(add.listening_port(), None);

        let acc = Instruction::Sub { src: Location::Address(Port::Acc) };
        assert_eq!(acc.listening_port(), None);

        assert_eq!(Instruction::Nop.listening_port(), None);
    }

    #[test]
    fn test_instruction_operation() {
        assert_eq!(Instruction::Jmp { target: 2 }.operation(), Operation::Jmp);
        assert_eq!(Instruction::Ata.operation(), Operation::Ata);
    }
}
