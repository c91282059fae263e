//! # Grid Node Runtime
//!
//! Tick-synchronous simulator for a small mesh of processing nodes that talk
//! to their neighbors through single-value rendezvous ports.
//!
//! ## Features
//!
//! - **3x4 mesh** of compute nodes (configurable through [`tis_spec::Limits`])
//! - **Boundary nodes** synthesized for every input and output stream
//! - **Blocking ports**: a written value waits in the writer until claimed
//! - **Order independent ticks**: the schedule order never changes a result
//!
//! ## Example
//!
//! ```rust
//! use tis_runtime::{Simulation, SimConfig, StopReason};
//! use tis_spec::{Limits, ProgramCode, Puzzle, Stream};
//!
//! let puzzle = Puzzle::with_streams(
//!     "DOUBLER",
//!     vec![Stream::input("IN", 0, vec![1, 2]), Stream::output("OUT", 0, vec![2, 4])],
//!     &Limits::DEFAULT,
//! ).unwrap();
//! let code = ProgramCode::new("DOUBLER", 12)
//!     .with_node(0, ["MOV UP, ACC", "ADD ACC", "MOV ACC, DOWN"])
//!     .with_node(4, ["MOV UP, DOWN"])
//!     .with_node(8, ["MOV UP, DOWN"]);
//!
//! let mut sim = Simulation::new(puzzle, SimConfig::default()).unwrap();
//! sim.load_code(&code).unwrap();
//! let result = sim.run().unwrap();
//! assert_eq!(result.stop, StopReason::OutputComplete);
//! assert_eq!(result.output("OUT"), Some(&[2, 4][..]));
//! ```

pub mod error;
pub mod node;
pub mod execute;
pub mod grid;
pub mod output;
pub mod sim;

pub use error::RuntimeError;
pub use grid::{Grid, GridBuilder};
pub use node::{Node, NodeId, NodeRole, Offer};
pub use output::OutputCapture;
pub use sim::{RunResult, SimConfig, Simulation, StopReason};

/// Simple execution helper
///
/// Loads `code` into a fresh grid for `puzzle` and runs it with the default
/// configuration.
pub fn run(puzzle: tis_spec::Puzzle, code: &tis_spec::ProgramCode) -> Result<RunResult, RuntimeError> {
    let mut sim = Simulation::new(puzzle, SimConfig::default())?;
    sim.load_code(code)?;
    sim.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tis_spec::{Limits, ProgramCode, Puzzle, Stream};

    #[test]
    fn test_public_exports() {
        let _ = SimConfig::default();
        let _ = StopReason::Quiescent;
        let _ = NodeRole::Compute;
        let _ = OutputCapture::new("OUT", 0, 0);
    }

    #[test]
    fn test_run_helper() {
        let puzzle = Puzzle::with_streams(
            "NEGATE",
            vec![Stream::input("IN", 3, vec![5, -6]), Stream::output("OUT", 3, vec![-5, 6])],
            &Limits::DEFAULT,
        )
        .unwrap();
        let code = ProgramCode::new("NEGATE", 12)
            .with_node(3, ["MOV UP, ACC", "NEG", "MOV ACC, DOWN"])
            .with_node(7, ["MOV UP, DOWN"])
            .with_node(11, ["MOV UP, DOWN"]);

        let result = run(puzzle, &code).unwrap();
        assert_eq!(result.output("OUT"), Some(&[-5, 6][..]));
    }

    #[test]
    fn test_run_helper_reports_assembly_errors() {
        let puzzle = Puzzle::with_streams("EMPTY", vec![], &Limits::DEFAULT).unwrap();
        let code = ProgramCode::new("BAD", 12).with_node(0, ["FOO"]);
        assert!(matches!(run(puzzle, &code), Err(RuntimeError::Assembler(_))));
    }
}
