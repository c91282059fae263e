//! Saved-program text format
//!
//! ```text
//! @1
//! MOV UP, DOWN
//!
//! @2
//!
//! ```
//!
//! One section per node: an `@N` header with the 1-based node number, the
//! node's source lines, then a blank separator line. Reading and writing
//! files is left to the caller.

use crate::error::{AssemblerError, Result};
use tis_spec::ProgramCode;

/// Render a program in the saved-program format
pub fn render_program(code: &ProgramCode) -> String {
    let mut output = String::new();

    for (i, lines) in code.nodes.iter().enumerate() {
        output.push_str(&format!("@{}\n", i + 1));
        for line in lines {
            output.push_str(line);
            output.push('\n');
        }
        output.push('\n');
    }

    output
}

/// Parse the saved-program format for a grid of `node_count` nodes
///
/// Blank lines are separators and never part of a node's source.
pub fn parse_program(text: &str, node_count: usize) -> Result<ProgramCode> {
    let mut code = ProgramCode::new(String::new(), node_count);
    let mut current: Option<usize> = None;

    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(number) = trimmed.strip_prefix('@') {
            let node: usize = number.trim().parse().map_err(|_| AssemblerError::InvalidNodeHeader {
                line,
                text: trimmed.to_string(),
            })?;
            if node == 0 || node > node_count {
                return Err(AssemblerError::NodeOutOfRange { line, node, max: node_count });
            }
            current = Some(node - 1);
            continue;
        }

        let node = current.ok_or(AssemblerError::MissingNodeHeader { line })?;
        code.nodes[node].push(trimmed.to_string());
    }

    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let code = ProgramCode::new("T", 2).with_node(0, ["MOV UP, DOWN"]);
        assert_eq!(render_program(&code), "@1\nMOV UP, DOWN\n\n@2\n\n");
    }

    #[test]
    fn test_parse_render_roundtrip() {
        let code = ProgramCode::new("", 12)
            .with_node(0, ["START:", "MOV UP, ACC", "JMP START"])
            .with_node(11, ["MOV ANY, DOWN"]);
        let parsed = parse_program(&render_program(&code), 12).unwrap();
        assert_eq!(parsed, code);
    }

    #[test]
    fn test_parse_missing_header() {
        let err = parse_program("MOV UP, DOWN\n", 12).unwrap_err();
        assert_eq!(err, AssemblerError::MissingNodeHeader { line: 1 });
    }

    #[test]
    fn test_parse_bad_header() {
        assert!(matches!(
            parse_program("@X\n", 12),
            Err(AssemblerError::InvalidNodeHeader { line: 1, .. })
        ));
        assert_eq!(
            parse_program("@13\n", 12).unwrap_err(),
            AssemblerError::NodeOutOfRange { line: 1, node: 13, max: 12 }
        );
        assert!(matches!(
            parse_program("@0\n", 12),
            Err(AssemblerError::NodeOutOfRange { node: 0, .. })
        ));
    }

    #[test]
    fn test_parse_trims_lines() {
        let code = parse_program("@2\n   ADD 1  \n\n", 4).unwrap();
        assert_eq!(code.node(1), &["ADD 1".to_string()]);
    }
}
