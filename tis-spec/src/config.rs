//! # Numeric limits
//!
//! The range rules of the machine (accumulator bounds, stream length, mesh
//! size) live here so the builder and the execution engine take them as a
//! value instead of scattering literals.

use crate::{Value, GRID_COLS, GRID_ROWS, MAX_ACC, MAX_STREAM_VALUES, MIN_ACC};

/// Machine limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Limits {
    /// Smallest value ACC and BAK may hold
    pub acc_min: Value,
    /// Largest value ACC and BAK may hold
    pub acc_max: Value,
    /// Maximum number of values in one stream
    pub max_stream_values: usize,
    /// Mesh rows
    pub rows: usize,
    /// Mesh columns (also the number of boundary positions)
    pub cols: usize,
}

impl Limits {
    /// Default limits: 3x4 mesh, ACC in [-999, 999], streams of at most 30 values
    pub const DEFAULT: Self = Self {
        acc_min: MIN_ACC,
        acc_max: MAX_ACC,
        max_stream_values: MAX_STREAM_VALUES,
        rows: GRID_ROWS,
        cols: GRID_COLS,
    };

    /// Number of mesh nodes
    #[inline]
    pub const fn node_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Number of boundary positions on the top and bottom edges
    #[inline]
    pub const fn io_positions(&self) -> usize {
        self.cols
    }

    /// Saturate a wide intermediate result into the accumulator range
    #[inline]
    pub fn clamp(&self, value: i32) -> Value {
        value.clamp(self.acc_min as i32, self.acc_max as i32) as Value
    }

    /// Whether `value` is representable in a register
    #[inline]
    pub fn contains(&self, value: i64) -> bool {
        value >= self.acc_min as i64 && value <= self.acc_max as i64
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = Limits::default();
        assert_eq!(limits.acc_min, -999);
        assert_eq!(limits.acc_max, 999);
        assert_eq!(limits.node_count(), 12);
        assert_eq!(limits.io_positions(), 4);
        assert_eq!(limits.max_stream_values, 30);
    }

    #[test]
    fn test_clamp() {
        let limits = Limits::DEFAULT;
        assert_eq!(limits.clamp(1040), 999);
        assert_eq!(limits.clamp(-1998), -999);
        assert_eq!(limits.clamp(42), 42);
    }

    #[test]
    fn test_contains() {
        let limits = Limits::DEFAULT;
        assert!(limits.contains(999));
        assert!(limits.contains(-999));
        assert!(!limits.contains(1000));
        assert!(!limits.contains(-1000));
    }
}
