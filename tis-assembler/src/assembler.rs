//! Main assembler logic
//!
//! Each node is assembled in two passes. The label pass strips `NAME:`
//! prefixes and records the index of the line they sit on; the instruction
//! pass parses the remaining text with that table. The table lives only for
//! the duration of one node's assembly.

use std::collections::HashMap;

use crate::error::{AssemblerError, Result};
use crate::parser::parse_instruction;
use tis_spec::{Instruction, Limits, ProgramCode};

/// Label name to instruction index, for one node
#[derive(Debug, Clone, Default)]
pub struct LabelTable {
    labels: HashMap<String, usize>,
}

impl LabelTable {
    pub fn insert(&mut self, label: &str, index: usize) {
        self.labels.insert(label.to_string(), index);
    }

    pub fn get(&self, label: &str) -> Option<usize> {
        self.labels.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// A source line after normalization and label stripping
struct SourceLine {
    line: usize,
    text: String,
}

/// Label pass: drop blank lines, split off labels, build the table
fn collect_labels<S: AsRef<str>>(lines: &[S]) -> Result<(Vec<SourceLine>, LabelTable)> {
    let mut labels = LabelTable::default();
    let mut defined_on: HashMap<String, usize> = HashMap::new();
    let mut body = Vec::with_capacity(lines.len());

    for (i, raw) in lines.iter().enumerate() {
        let line = i + 1;
        let text = raw.as_ref().trim().to_ascii_uppercase();
        if text.is_empty() {
            continue;
        }

        let text = match text.split_once(':') {
            Some((label, rest)) => {
                let label = label.trim();
                if label.is_empty() {
                    return Err(AssemblerError::EmptyLabel { line });
                }
                if let Some(&first) = defined_on.get(label) {
                    return Err(AssemblerError::DuplicateLabel {
                        line,
                        label: label.to_string(),
                        first,
                    });
                }
                defined_on.insert(label.to_string(), line);
                labels.insert(label, body.len());
                let rest = rest.trim();
                if rest.is_empty() {
                    "NOP".to_string()
                } else {
                    rest.to_string()
                }
            }
            None => text,
        };

        body.push(SourceLine { line, text });
    }

    Ok((body, labels))
}

/// Assemble one node's source lines with explicit limits
pub fn assemble_node_with<S: AsRef<str>>(lines: &[S], limits: &Limits) -> Result<Vec<Instruction>> {
    let (body, labels) = collect_labels(lines)?;

    body.iter()
        .map(|src| parse_instruction(&src.text, src.line, &labels, limits))
        .collect()
}

/// Assemble one node's source lines
pub fn assemble_node<S: AsRef<str>>(lines: &[S]) -> Result<Vec<Instruction>> {
    assemble_node_with(lines, &Limits::DEFAULT)
}

/// Assemble a multi-line source string for a single node
pub fn assemble(source: &str) -> Result<Vec<Instruction>> {
    let lines: Vec<&str> = source.lines().collect();
    assemble_node(&lines)
}

/// Assemble every node of a program
///
/// Errors are wrapped with the 1-based node number. Nothing is returned
/// unless every node assembles.
pub fn assemble_program(code: &ProgramCode, limits: &Limits) -> Result<Vec<Vec<Instruction>>> {
    code.nodes
        .iter()
        .enumerate()
        .map(|(i, lines)| {
            assemble_node_with(lines, limits).map_err(|e| AssemblerError::InNode {
                node: i + 1,
                source: Box::new(e),
            })
        })
        .collect()
}
