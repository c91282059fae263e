//! Simulation driver

use serde::{Deserialize, Serialize};

use crate::error::{Result, RuntimeError};
use crate::grid::{Grid, GridBuilder};
use crate::output::OutputCapture;
use tis_assembler::assemble_program;
use tis_spec::{Limits, ProgramCode, Puzzle, PuzzleDescriptor, Value};

/// Simulation configuration
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Maximum number of ticks before `run` gives up
    pub max_ticks: u64,

    /// Log every active node's registers after each tick
    pub trace: bool,

    /// Machine limits
    pub limits: Limits,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_ticks: 100_000,
            trace: false,
            limits: Limits::DEFAULT,
        }
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// Every active node was blocked for a whole tick
    Quiescent,
    /// Every output sink received its declared number of values
    OutputComplete,
    /// `max_ticks` reached
    TickLimit,
}

/// Result of [`Simulation::run`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Number of ticks executed
    pub ticks: u64,

    /// Reason for stopping
    pub stop: StopReason,

    /// Captured output, one entry per output stream
    pub outputs: Vec<OutputCapture>,
}

impl RunResult {
    /// Values captured by the output stream called `name`
    pub fn output(&self, name: &str) -> Option<&[Value]> {
        self.outputs.iter().find(|o| o.name == name).map(OutputCapture::values)
    }
}

/// A puzzle plus the grid currently loaded for it
pub struct Simulation {
    puzzle: Puzzle,
    config: SimConfig,
    grid: Grid,
}

impl Simulation {
    /// Validate the puzzle and build a grid with no programs
    pub fn new(puzzle: Puzzle, config: SimConfig) -> Result<Self> {
        puzzle.validate(&config.limits)?;
        let grid = GridBuilder::from_puzzle(&puzzle, config.limits).build()?;
        tracing::debug!(
            title = %puzzle.title,
            inputs = puzzle.inputs().count(),
            outputs = puzzle.outputs().count(),
            "puzzle loaded"
        );
        Ok(Self { puzzle, config, grid })
    }

    /// Validate a loader-provided descriptor and build the grid
    pub fn from_descriptor(desc: &PuzzleDescriptor, config: SimConfig) -> Result<Self> {
        let puzzle = Puzzle::from_descriptor(desc, &config.limits)?;
        Self::new(puzzle, config)
    }

    /// Assemble every node and replace the grid
    ///
    /// The current grid is kept if any node fails to assemble or a program
    /// targets a node that cannot hold one.
    pub fn load_code(&mut self, code: &ProgramCode) -> Result<()> {
        check_node_count(code, &self.config.limits)?;
        let programs = assemble_program(code, &self.config.limits)?;

        let mut builder = GridBuilder::from_puzzle(&self.puzzle, self.config.limits);
        for (index, program) in programs.into_iter().enumerate() {
            if !program.is_empty() {
                builder = builder.program(index, program);
            }
        }
        self.grid = builder.build()?;

        tracing::debug!(
            title = %code.title,
            active = self.grid.active().len(),
            "program loaded"
        );
        Ok(())
    }

    /// Advance one tick; `true` when the grid is fully blocked
    pub fn tick(&mut self) -> Result<bool> {
        let quiescent = self.grid.step()?;

        if self.config.trace {
            for &id in self.grid.active() {
                let node = &self.grid.nodes()[id];
                tracing::debug!(
                    tick = self.grid.tick(),
                    node = id,
                    acc = node.acc,
                    bak = node.bak,
                    cursor = node.cursor,
                    blocked = node.blocked,
                    "node state"
                );
            }
        }

        Ok(quiescent)
    }

    /// Run until the grid blocks, the outputs fill up, or the tick limit
    pub fn run(mut self) -> Result<RunResult> {
        let stop = loop {
            if self.grid.tick() >= self.config.max_ticks {
                break StopReason::TickLimit;
            }

            let quiescent = self.tick()?;

            let outputs = self.grid.outputs();
            if !outputs.is_empty() && outputs.iter().all(OutputCapture::is_complete) {
                break StopReason::OutputComplete;
            }
            if quiescent {
                break StopReason::Quiescent;
            }
        };

        let ticks = self.grid.tick();
        tracing::debug!(ticks, ?stop, "run finished");

        Ok(RunResult {
            ticks,
            stop,
            outputs: self.grid.into_outputs(),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn outputs(&self) -> &[OutputCapture] {
        self.grid.outputs()
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("title", &self.puzzle.title)
            .field("tick", &self.grid.tick())
            .finish()
    }
}

/// Reject code for nodes past the end of the mesh before assembling it
fn check_node_count(code: &ProgramCode, limits: &Limits) -> Result<()> {
    let count = limits.node_count();
    match code.nodes.iter().enumerate().skip(count).find(|(_, lines)| !lines.is_empty()) {
        Some((node, _)) => Err(RuntimeError::NodeOutOfRange { node, count }),
        None => Ok(()),
    }
}
