//! # Puzzle descriptors
//!
//! A puzzle describes the mesh layout and the boundary streams. External
//! loaders produce a loosely typed [`PuzzleDescriptor`]; [`Puzzle::from_descriptor`]
//! checks every field and either returns a complete [`Puzzle`] or the first
//! violation found. No partially validated puzzle ever escapes.

use crate::config::Limits;
use crate::error::{PuzzleError, Result};
use crate::Value;
use serde::{Deserialize, Serialize};

/// Direction of a boundary stream
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StreamKind {
    Input,
    Output,
}

impl StreamKind {
    fn from_raw(value: i64) -> Option<Self> {
        match value {
            0 => Some(StreamKind::Input),
            1 => Some(StreamKind::Output),
            _ => None,
        }
    }
}

/// Kind of a mesh node
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    #[default]
    Compute,
    Damaged,
}

impl NodeKind {
    fn from_raw(value: i64) -> Option<Self> {
        match value {
            0 => Some(NodeKind::Compute),
            1 => Some(NodeKind::Damaged),
            _ => None,
        }
    }
}

/// Unvalidated stream entry as handed over by a loader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamDescriptor {
    pub kind: i64,
    pub name: String,
    pub position: i64,
    pub values: Vec<i64>,
}

/// Unvalidated puzzle as handed over by a loader
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleDescriptor {
    pub title: String,
    pub description: Vec<String>,
    pub streams: Vec<StreamDescriptor>,
    pub layout: Vec<i64>,
}

/// A validated boundary stream
///
/// For output streams `values` is the expected sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stream {
    pub kind: StreamKind,
    pub name: String,
    pub position: u8,
    pub values: Vec<Value>,
}

impl Stream {
    pub fn input(name: impl Into<String>, position: u8, values: Vec<Value>) -> Self {
        Self { kind: StreamKind::Input, name: name.into(), position, values }
    }

    pub fn output(name: impl Into<String>, position: u8, values: Vec<Value>) -> Self {
        Self { kind: StreamKind::Output, name: name.into(), position, values }
    }
}

/// A validated puzzle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub title: String,
    pub description: Vec<String>,
    pub streams: Vec<Stream>,
    pub layout: Vec<NodeKind>,
}

impl Puzzle {
    /// Build and validate a puzzle from typed parts
    pub fn new(
        title: impl Into<String>,
        description: Vec<String>,
        streams: Vec<Stream>,
        layout: Vec<NodeKind>,
        limits: &Limits,
    ) -> Result<Self> {
        let puzzle = Self {
            title: title.into(),
            description,
            streams,
            layout,
        };
        puzzle.validate(limits)?;
        Ok(puzzle)
    }

    /// All-compute puzzle with the given streams
    pub fn with_streams(title: impl Into<String>, streams: Vec<Stream>, limits: &Limits) -> Result<Self> {
        Self::new(title, Vec::new(), streams, vec![NodeKind::Compute; limits.node_count()], limits)
    }

    /// Convert and validate a loader-provided descriptor
    pub fn from_descriptor(desc: &PuzzleDescriptor, limits: &Limits) -> Result<Self> {
        let mut streams = Vec::with_capacity(desc.streams.len());
        for (i, raw) in desc.streams.iter().enumerate() {
            streams.push(convert_stream(i, raw, limits)?);
        }

        if desc.layout.len() != limits.node_count() {
            return Err(PuzzleError::InvalidLayoutSize {
                expected: limits.node_count(),
                found: desc.layout.len(),
            });
        }
        let layout = desc
            .layout
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                NodeKind::from_raw(value).ok_or(PuzzleError::InvalidNodeKind { index, value })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(desc.title.clone(), desc.description.clone(), streams, layout, limits)
    }

    /// Check every invariant of a typed puzzle
    pub fn validate(&self, limits: &Limits) -> Result<()> {
        for (i, stream) in self.streams.iter().enumerate() {
            if stream.position as usize >= limits.io_positions() {
                return Err(PuzzleError::InvalidPosition {
                    stream: i,
                    value: stream.position as i64,
                    max: limits.io_positions() - 1,
                });
            }
            check_values(i, stream.values.iter().map(|&v| v as i64), limits)?;

            let clash = self.streams[..i]
                .iter()
                .position(|s| s.kind == stream.kind && s.position == stream.position);
            if let Some(other) = clash {
                return Err(PuzzleError::DuplicatePosition {
                    stream: i,
                    other,
                    kind: stream.kind,
                    position: stream.position,
                });
            }
        }

        if self.layout.len() != limits.node_count() {
            return Err(PuzzleError::InvalidLayoutSize {
                expected: limits.node_count(),
                found: self.layout.len(),
            });
        }

        Ok(())
    }

    pub fn inputs(&self) -> impl Iterator<Item = &Stream> {
        self.streams.iter().filter(|s| s.kind == StreamKind::Input)
    }

    pub fn outputs(&self) -> impl Iterator<Item = &Stream> {
        self.streams.iter().filter(|s| s.kind == StreamKind::Output)
    }
}

fn convert_stream(i: usize, raw: &StreamDescriptor, limits: &Limits) -> Result<Stream> {
    let kind = StreamKind::from_raw(raw.kind)
        .ok_or(PuzzleError::InvalidStreamKind { stream: i, value: raw.kind })?;

    if raw.position < 0 || raw.position as usize >= limits.io_positions() {
        return Err(PuzzleError::InvalidPosition {
            stream: i,
            value: raw.position,
            max: limits.io_positions() - 1,
        });
    }

    check_values(i, raw.values.iter().copied(), limits)?;

    Ok(Stream {
        kind,
        name: raw.name.clone(),
        position: raw.position as u8,
        values: raw.values.iter().map(|&v| v as Value).collect(),
    })
}

fn check_values(stream: usize, values: impl ExactSizeIterator<Item = i64>, limits: &Limits) -> Result<()> {
    if values.len() > limits.max_stream_values {
        return Err(PuzzleError::TooManyValues {
            stream,
            max: limits.max_stream_values,
            found: values.len(),
        });
    }
    for (index, value) in values.enumerate() {
        if !limits.contains(value) {
            return Err(PuzzleError::ValueOutOfRange {
                stream,
                index,
                value,
                min: limits.acc_min as i64,
                max: limits.acc_max as i64,
            });
        }
    }
    Ok(())
}
