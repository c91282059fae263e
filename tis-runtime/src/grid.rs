//! Grid construction and scheduling
//!
//! The grid owns every node in a flat arena. Mesh nodes come first in
//! row-major order, boundary nodes follow in stream order. Links between
//! nodes are arena indices.
//!
//! Damaged mesh nodes keep their links but never run, so anything that
//! reads from or writes to one waits forever.

use crate::error::{Result, RuntimeError};
use crate::execute::step;
use crate::node::{Node, NodeId, NodeRole};
use crate::output::OutputCapture;
use tis_spec::{
    Direction, Instruction, Limits, Location, NodeKind, Port, Puzzle, Stream, StreamKind, Value,
};

/// Builds a [`Grid`] from a layout, boundary streams and node programs
#[derive(Debug, Clone)]
pub struct GridBuilder {
    limits: Limits,
    layout: Vec<NodeKind>,
    streams: Vec<Stream>,
    programs: Vec<(usize, Vec<Instruction>)>,
}

impl GridBuilder {
    /// All-compute mesh with no streams
    pub fn new(limits: Limits) -> Self {
        Self {
            limits,
            layout: vec![NodeKind::Compute; limits.node_count()],
            streams: Vec::new(),
            programs: Vec::new(),
        }
    }

    /// Layout and streams taken from a puzzle
    pub fn from_puzzle(puzzle: &Puzzle, limits: Limits) -> Self {
        Self {
            layout: puzzle.layout.clone(),
            streams: puzzle.streams.clone(),
            ..Self::new(limits)
        }
    }

    pub fn layout(mut self, layout: Vec<NodeKind>) -> Self {
        self.layout = layout;
        self
    }

    pub fn stream(mut self, stream: Stream) -> Self {
        self.streams.push(stream);
        self
    }

    /// Attach a program to mesh node `index`
    pub fn program(mut self, index: usize, instructions: Vec<Instruction>) -> Self {
        self.programs.push((index, instructions));
        self
    }

    pub fn build(self) -> Result<Grid> {
        let limits = self.limits;
        // Same checks a loaded puzzle goes through
        let puzzle = Puzzle::new("", Vec::new(), self.streams, self.layout, &limits)?;

        let (rows, cols) = (limits.rows, limits.cols);
        let mut nodes: Vec<Node> = puzzle
            .layout
            .iter()
            .enumerate()
            .map(|(i, kind)| {
                let role = match kind {
                    NodeKind::Compute => NodeRole::Compute,
                    NodeKind::Damaged => NodeRole::Damaged,
                };
                Node::new(i, role)
            })
            .collect();

        for row in 0..rows {
            for col in 0..cols {
                let id = row * cols + col;
                if row + 1 < rows {
                    connect(&mut nodes, id, Direction::Down, id + cols);
                }
                if col + 1 < cols {
                    connect(&mut nodes, id, Direction::Right, id + 1);
                }
            }
        }

        for (index, instructions) in self.programs {
            let node = nodes.get_mut(index).ok_or(RuntimeError::NodeOutOfRange {
                node: index,
                count: limits.node_count(),
            })?;
            if node.role == NodeRole::Damaged && !instructions.is_empty() {
                return Err(RuntimeError::DamagedNode { node: index });
            }
            node.instructions = instructions;
        }

        let mut active: Vec<NodeId> = nodes.iter().filter(|n| n.is_active()).map(|n| n.index).collect();
        let mut outputs = Vec::new();

        for stream in &puzzle.streams {
            let id = nodes.len();
            let col = stream.position as usize;
            let node = match stream.kind {
                StreamKind::Input => {
                    let mut node = Node::new(id, NodeRole::Input);
                    node.instructions = input_program(&stream.values);
                    node
                }
                StreamKind::Output => {
                    let mut node = Node::new(id, NodeRole::Output);
                    node.instructions = output_program();
                    node.sink = Some(outputs.len());
                    outputs.push(OutputCapture::new(
                        stream.name.clone(),
                        stream.position,
                        stream.values.len(),
                    ));
                    node
                }
            };
            nodes.push(node);

            match stream.kind {
                StreamKind::Input => connect(&mut nodes, id, Direction::Down, col),
                StreamKind::Output => connect(&mut nodes, (rows - 1) * cols + col, Direction::Down, id),
            }
            active.push(id);
        }

        tracing::debug!(
            nodes = nodes.len(),
            active = active.len(),
            outputs = outputs.len(),
            "grid built"
        );

        Ok(Grid {
            nodes,
            active,
            outputs,
            limits,
            tick: 0,
        })
    }
}

/// Link `a` to `b` in `dir` and `b` back to `a`
fn connect(nodes: &mut [Node], a: NodeId, dir: Direction, b: NodeId) {
    nodes[a].ports[dir.index()] = Some(b);
    nodes[b].ports[dir.opposite().index()] = Some(a);
}

/// Write every value down into the mesh, then loop
fn input_program(values: &[Value]) -> Vec<Instruction> {
    let mut program: Vec<Instruction> = values
        .iter()
        .map(|&v| Instruction::Mov { src: Location::Number(v), dst: Port::DOWN })
        .collect();
    program.push(Instruction::Jro { src: Location::Number(-(values.len() as i16)) });
    program
}

/// Copy the value from the mesh into ACC, then append it to the sink
fn output_program() -> Vec<Instruction> {
    vec![
        Instruction::Mov { src: Location::Address(Port::UP), dst: Port::Acc },
        Instruction::Ata,
    ]
}

/// Node arena plus the schedule that drives it
#[derive(Debug, Clone)]
pub struct Grid {
    nodes: Vec<Node>,
    active: Vec<NodeId>,
    outputs: Vec<OutputCapture>,
    limits: Limits,
    tick: u64,
}

impl Grid {
    /// Advance every active node by one tick
    ///
    /// Returns `true` when every active node ended the tick blocked.
    pub fn step(&mut self) -> Result<bool> {
        self.tick += 1;

        for &id in &self.active {
            self.nodes[id].capture_listening();
        }
        for &id in &self.active {
            step(&mut self.nodes, &mut self.outputs, id, self.tick, &self.limits)?;
        }

        let quiescent = self.active.iter().all(|&id| self.nodes[id].blocked);
        if quiescent {
            tracing::trace!(tick = self.tick, "grid fully blocked");
        }
        Ok(quiescent)
    }

    /// Number of ticks executed so far
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Active nodes in scheduling order
    pub fn active(&self) -> &[NodeId] {
        &self.active
    }

    pub fn outputs(&self) -> &[OutputCapture] {
        &self.outputs
    }

    pub fn output(&self, name: &str) -> Option<&OutputCapture> {
        self.outputs.iter().find(|o| o.name == name)
    }

    pub fn into_outputs(self) -> Vec<OutputCapture> {
        self.outputs
    }
}
