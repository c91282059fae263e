//! Node state

use serde::{Deserialize, Serialize};
use tis_spec::{Direction, Instruction, Port, Value};

/// Stable index of a node in the grid arena
pub type NodeId = usize;

/// What a node is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeRole {
    /// Programmable mesh node
    Compute,
    /// Mesh node that never executes but keeps its links
    Damaged,
    /// Boundary node feeding an input stream into the mesh
    Input,
    /// Boundary node draining the mesh into an output sink
    Output,
}

/// A value written toward a neighbor and not yet claimed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offer {
    pub value: Value,
    /// Destination port as written in the instruction
    pub port: Port,
    /// Resolved neighbor; `None` until `port` resolves
    pub target: Option<NodeId>,
    /// Tick in which `target` was resolved
    pub tick: u64,
}

/// Which neighbor a node will try to read from this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listen {
    Any,
    From(NodeId),
}

/// One processing element
#[derive(Debug, Clone)]
pub struct Node {
    pub index: NodeId,
    pub role: NodeRole,

    /// Accumulator
    pub acc: Value,

    /// Backup register
    pub bak: Value,

    /// Instruction cursor
    pub cursor: usize,

    /// Neighbor links indexed by [`Direction::index`]
    pub ports: [Option<NodeId>; 4],

    /// Set when the node made no progress in the last tick
    pub blocked: bool,

    /// Pending outgoing value
    pub offer: Option<Offer>,

    /// Neighbor last resolved by an `ANY` read or write
    pub last: Option<NodeId>,

    /// Index of the output sink fed by `ATA`
    pub sink: Option<usize>,

    pub(crate) instructions: Vec<Instruction>,

    /// Read intent captured at the start of the current tick
    pub(crate) listening: Option<Listen>,

    /// Tick in which a neighbor claimed this node's offer
    pub(crate) released_at: Option<u64>,
}

impl Node {
    pub fn new(index: NodeId, role: NodeRole) -> Self {
        Self {
            index,
            role,
            acc: 0,
            bak: 0,
            cursor: 0,
            ports: [None; 4],
            blocked: false,
            offer: None,
            last: None,
            sink: None,
            instructions: Vec::new(),
            listening: None,
            released_at: None,
        }
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Compute nodes run only with code; boundary nodes always run
    pub fn is_active(&self) -> bool {
        match self.role {
            NodeRole::Compute => !self.instructions.is_empty(),
            NodeRole::Damaged => false,
            NodeRole::Input | NodeRole::Output => true,
        }
    }

    #[inline]
    pub fn link(&self, dir: Direction) -> Option<NodeId> {
        self.ports[dir.index()]
    }

    /// Cursor after wrapping past the end of the program
    #[inline]
    pub fn fetch_index(&self) -> usize {
        if self.cursor >= self.instructions.len() {
            0
        } else {
            self.cursor
        }
    }

    pub fn current_instruction(&self) -> Option<&Instruction> {
        self.instructions.get(self.fetch_index())
    }

    /// Jump to `pos`, falling back to 0 outside the program
    pub fn set_cursor(&mut self, pos: i32) {
        self.cursor = if pos < 0 || pos as usize >= self.instructions.len() {
            0
        } else {
            pos as usize
        };
    }

    #[inline]
    pub fn advance(&mut self) {
        self.cursor += 1;
    }

    /// Whether this node holds an offer `reader` may take during `tick`
    pub fn offers_to(&self, reader: NodeId, tick: u64) -> bool {
        matches!(self.offer, Some(o) if o.target == Some(reader) && o.tick < tick)
    }

    /// Snapshot which neighbor the current instruction reads from
    pub(crate) fn capture_listening(&mut self) {
        self.listening = if self.offer.is_some() || !self.is_active() {
            None
        } else {
            match self.current_instruction().and_then(Instruction::listening_port) {
                Some(Port::Any) => Some(Listen::Any),
                Some(Port::Last) => self.last.map(Listen::From),
                Some(Port::Dir(d)) => self.link(d).map(Listen::From),
                _ => None,
            }
        };
    }

    /// Whether a write from `writer` would be picked up by this node
    pub(crate) fn listens_to(&self, writer: NodeId) -> bool {
        match self.listening {
            Some(Listen::Any) => true,
            Some(Listen::From(id)) => id == writer,
            None => false,
        }
    }
}
