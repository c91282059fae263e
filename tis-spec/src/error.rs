//! # Error Types for puzzle descriptors

use crate::puzzle::StreamKind;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("Stream {stream}: unknown stream kind {value} (expected 0 for input or 1 for output)")]
    InvalidStreamKind { stream: usize, value: i64 },

    #[error("Stream {stream}: position {value} is not in range 0..={max}")]
    InvalidPosition { stream: usize, value: i64, max: usize },

    #[error("Stream {stream}: expected at most {max} values, found {found}")]
    TooManyValues { stream: usize, max: usize, found: usize },

    #[error("Stream {stream}: value #{index} ({value}) is not in range {min}..={max}")]
    ValueOutOfRange {
        stream: usize,
        index: usize,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("Stream {stream}: {kind:?} position {position} is already used by stream {other}")]
    DuplicatePosition {
        stream: usize,
        other: usize,
        kind: StreamKind,
        position: u8,
    },

    #[error("Invalid layout size: expected {expected} nodes, found {found}")]
    InvalidLayoutSize { expected: usize, found: usize },

    #[error("Layout entry {index}: unknown node kind {value} (expected 0 for compute or 1 for damaged)")]
    InvalidNodeKind { index: usize, value: i64 },
}

pub type Result<T> = std::result::Result<T, PuzzleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_display() {
        let err = PuzzleError::InvalidPosition { stream: 1, value: 7, max: 3 };
        assert_eq!(err.to_string(), "Stream 1: position 7 is not in range 0..=3");
    }

    #[test]
    fn test_layout_size_display() {
        let err = PuzzleError::InvalidLayoutSize { expected: 12, found: 11 };
        assert_eq!(err.to_string(), "Invalid layout size: expected 12 nodes, found 11");
    }

    #[test]
    fn test_value_range_display() {
        let err = PuzzleError::ValueOutOfRange {
            stream: 0,
            index: 4,
            value: 1200,
            min: -999,
            max: 999,
        };
        assert_eq!(
            err.to_string(),
            "Stream 0: value #4 (1200) is not in range -999..=999"
        );
    }

    #[test]
    fn test_all_variants_display() {
        let errors = vec![
            PuzzleError::InvalidStreamKind { stream: 0, value: 5 },
            PuzzleError::InvalidPosition { stream: 0, value: -1, max: 3 },
            PuzzleError::TooManyValues { stream: 0, max: 30, found: 31 },
            PuzzleError::ValueOutOfRange { stream: 0, index: 0, value: 0, min: 0, max: 0 },
            PuzzleError::DuplicatePosition {
                stream: 1,
                other: 0,
                kind: StreamKind::Input,
                position: 2,
            },
            PuzzleError::InvalidLayoutSize { expected: 12, found: 0 },
            PuzzleError::InvalidNodeKind { index: 3, value: 9 },
        ];

        for err in errors {
            assert!(!err.to_string().is_empty());
        }
    }
}
