//! Malformed source handling
//!
//! Every rejected line must produce a typed error carrying its 1-based line
//! number, never a panic.

use tis_assembler::{assemble, assemble_node_with, parse_program, AssemblerError};
use tis_spec::Limits;

fn err(source: &str) -> AssemblerError {
    assemble(source).unwrap_err()
}

// ============================================================================
// Mnemonics
// ============================================================================

#[test]
fn test_unknown_mnemonic() {
    assert!(matches!(err("HCF"), AssemblerError::UnknownInstruction { line: 1, .. }));
    assert!(matches!(err("NOPE"), AssemblerError::UnknownInstruction { .. }));
    assert!(matches!(err("ADDX 1"), AssemblerError::UnknownInstruction { .. }));
}

#[test]
fn test_too_short() {
    assert!(matches!(err("NO"), AssemblerError::LineTooShort { line: 1, .. }));
    assert!(matches!(err("L: A"), AssemblerError::LineTooShort { .. }));
}

#[test]
fn test_line_number_counts_blank_lines() {
    let e = err("NOP\n\n\nBAD");
    assert_eq!(e.line(), Some(4));
}

// ============================================================================
// Operands
// ============================================================================

#[test]
fn test_wrong_operand_counts() {
    let cases = [
        ("MOV UP", 2, 1),
        ("MOV UP, DOWN, LEFT", 2, 3),
        ("ADD", 1, 0),
        ("JMP", 1, 0),
        ("NOP 1", 0, 1),
        ("NEG ACC", 0, 1),
    ];
    for (source, want, got) in cases {
        match err(source) {
            AssemblerError::OperandCount { expected, found, .. } => {
                assert_eq!((expected, found), (want, got), "{source}");
            }
            other => panic!("{source}: unexpected error {other}"),
        }
    }
}

#[test]
fn test_bad_operands() {
    assert!(matches!(err("ADD BAK"), AssemblerError::InvalidOperand { .. }));
    assert!(matches!(err("ADD 12AB"), AssemblerError::InvalidOperand { .. }));
    assert!(matches!(err("MOV UP, SIDEWAYS"), AssemblerError::InvalidOperand { .. }));
    assert!(matches!(err("JRO NOWHERE"), AssemblerError::InvalidOperand { .. }));
}

#[test]
fn test_immediate_range() {
    assert!(matches!(err("ADD 1000"), AssemblerError::ImmediateOutOfRange { value: 1000, .. }));
    assert!(matches!(err("MOV -1000, ACC"), AssemblerError::ImmediateOutOfRange { value: -1000, .. }));
    assert!(matches!(err("JMP 5000"), AssemblerError::ImmediateOutOfRange { .. }));
    assert!(assemble("ADD 999\nSUB -999").is_ok());
}

#[test]
fn test_narrower_limits() {
    let limits = Limits { acc_min: -99, acc_max: 99, ..Limits::DEFAULT };
    assert!(matches!(
        assemble_node_with(&["ADD 100"], &limits),
        Err(AssemblerError::ImmediateOutOfRange { min: -99, max: 99, .. })
    ));
}

#[test]
fn test_bad_destinations() {
    assert!(matches!(err("MOV 1, NIL"), AssemblerError::InvalidDestination { .. }));
    assert!(matches!(err("MOV 1, 5"), AssemblerError::InvalidDestination { .. }));
}

// ============================================================================
// Labels
// ============================================================================

#[test]
fn test_undefined_label() {
    match err("JMP NOWHERE") {
        AssemblerError::UndefinedLabel { line, label } => {
            assert_eq!(line, 1);
            assert_eq!(label, "NOWHERE");
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn test_duplicate_label() {
    match err("A: NOP\nB: NOP\nA: NOP") {
        AssemblerError::DuplicateLabel { line, label, first } => {
            assert_eq!((line, first), (3, 1));
            assert_eq!(label, "A");
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn test_empty_label() {
    assert!(matches!(err("NOP\n: ADD 1"), AssemblerError::EmptyLabel { line: 2 }));
}

// ============================================================================
// Saved-program format
// ============================================================================

#[test]
fn test_code_before_header() {
    assert!(matches!(
        parse_program("NOP\n@1\n", 12),
        Err(AssemblerError::MissingNodeHeader { line: 1 })
    ));
}

#[test]
fn test_bad_headers() {
    assert!(matches!(parse_program("@X\n", 12), Err(AssemblerError::InvalidNodeHeader { .. })));
    assert!(matches!(parse_program("@13\n", 12), Err(AssemblerError::NodeOutOfRange { node: 13, max: 12, .. })));
}

#[test]
fn test_error_messages() {
    assert_eq!(err("HCF").to_string(), "Line 1: unknown instruction `HCF`");
    assert_eq!(
        err("ADD 1000").to_string(),
        "Line 1: value 1000 is not in range -999..=999"
    );
}
