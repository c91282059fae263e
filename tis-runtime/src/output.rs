//! Output capture

use serde::{Deserialize, Serialize};
use tis_spec::Value;

/// Values that left the grid through one output boundary node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputCapture {
    pub name: String,
    pub position: u8,
    /// Number of values the stream declares
    pub expected_len: usize,
    values: Vec<Value>,
}

impl OutputCapture {
    pub fn new(name: impl Into<String>, position: u8, expected_len: usize) -> Self {
        OutputCapture {
            name: name.into(),
            position,
            expected_len,
            values: Vec::new(),
        }
    }

    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Whether at least the declared number of values has arrived
    pub fn is_complete(&self) -> bool {
        self.values.len() >= self.expected_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_in_order() {
        let mut out = OutputCapture::new("OUT.A", 2, 3);
        out.push(3);
        out.push(-1);
        assert_eq!(out.values(), &[3, -1]);
        assert!(!out.is_complete());
        out.push(0);
        assert!(out.is_complete());
    }
}
