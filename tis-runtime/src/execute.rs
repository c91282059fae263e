//! Instruction execution
//!
//! [`step`] advances one node by at most one instruction. Values move between
//! nodes through the writer's single offer slot:
//!
//! 1. A `MOV` to a port reads its source, installs an offer and waits.
//! 2. On a later tick the target reads the port, takes the value, clears the
//!    slot and advances the writer past its `MOV`.
//!
//! Only offers resolved in an earlier tick can be claimed, and a writer whose
//! offer was claimed does nothing else in that tick. `ANY` writes look at the
//! read intent each neighbor had at the start of the tick. Together these
//! make the outcome of a tick independent of the order nodes are stepped in.
//!
//! `blocked` is set on entry. It is cleared by an instruction that completes
//! and falls through to the next line, by installing or resolving an offer,
//! and by a neighbor claiming the offer. Taken jumps set the cursor and
//! return with the node still blocked.

use crate::error::{Result, RuntimeError};
use crate::node::{Node, NodeId, Offer};
use crate::output::OutputCapture;
use tis_spec::{Direction, Instruction, Limits, Location, Port, Value};

/// Neighbor scan order for `ANY` reads
pub const READ_SCAN: [Direction; 4] = [Direction::Left, Direction::Right, Direction::Up, Direction::Down];

/// Neighbor scan order for `ANY` writes
pub const WRITE_SCAN: [Direction; 4] = [Direction::Up, Direction::Left, Direction::Right, Direction::Down];

enum Write {
    /// Destination updated in place
    Done,
    /// Value parked in the offer slot
    Offered,
}

/// Execute one tick of node `id`
pub fn step(
    nodes: &mut [Node],
    outputs: &mut [OutputCapture],
    id: NodeId,
    tick: u64,
    limits: &Limits,
) -> Result<()> {
    let count = nodes.len();
    {
        let node = nodes
            .get_mut(id)
            .ok_or(RuntimeError::NodeOutOfRange { node: id, count })?;

        // Claimed by a neighbor earlier in this tick
        if node.released_at == Some(tick) {
            return Ok(());
        }

        node.blocked = true;
        if node.instructions.is_empty() {
            return Ok(());
        }
    }

    if let Some(offer) = nodes[id].offer {
        if offer.target.is_none() {
            if let Some(target) = resolve_output(nodes, id, offer.port) {
                let node = &mut nodes[id];
                node.offer = Some(Offer { target: Some(target), tick, ..offer });
                if offer.port == Port::Any {
                    node.last = Some(target);
                }
                node.blocked = false;
            }
        }
        return Ok(());
    }

    let node = &mut nodes[id];
    if node.cursor >= node.instructions.len() {
        node.cursor = 0;
    }
    let instr = node.instructions[node.cursor];

    match instr {
        Instruction::Mov { src, dst } => {
            let Some(value) = read(nodes, id, src, tick) else {
                tracing::trace!(node = id, tick, ?instr, "blocked on read");
                return Ok(());
            };
            if let Write::Offered = write(nodes, id, dst, value, tick)? {
                nodes[id].blocked = false;
                return Ok(());
            }
        }

        Instruction::Add { src } => {
            let Some(value) = read(nodes, id, src, tick) else {
                tracing::trace!(node = id, tick, ?instr, "blocked on read");
                return Ok(());
            };
            let node = &mut nodes[id];
            node.acc = limits.clamp(node.acc as i32 + value as i32);
        }

        Instruction::Sub { src } => {
            let Some(value) = read(nodes, id, src, tick) else {
                tracing::trace!(node = id, tick, ?instr, "blocked on read");
                return Ok(());
            };
            let node = &mut nodes[id];
            node.acc = limits.clamp(node.acc as i32 - value as i32);
        }

        Instruction::Neg => {
            let node = &mut nodes[id];
            node.acc = limits.clamp(-(node.acc as i32));
        }

        Instruction::Sav => {
            let node = &mut nodes[id];
            node.bak = node.acc;
        }

        Instruction::Swp => {
            let node = &mut nodes[id];
            std::mem::swap(&mut node.acc, &mut node.bak);
        }

        Instruction::Nop => {}

        Instruction::Ata => {
            let node = &nodes[id];
            if let Some(out) = node.sink.and_then(|sink| outputs.get_mut(sink)) {
                out.push(node.acc);
            }
        }

        Instruction::Jmp { target }
        | Instruction::Jez { target }
        | Instruction::Jnz { target }
        | Instruction::Jgz { target }
        | Instruction::Jlz { target } => {
            let node = &mut nodes[id];
            let taken = match instr {
                Instruction::Jez { .. } => node.acc == 0,
                Instruction::Jnz { .. } => node.acc != 0,
                Instruction::Jgz { .. } => node.acc > 0,
                Instruction::Jlz { .. } => node.acc < 0,
                _ => true,
            };
            // A taken jump moves the cursor and leaves the node blocked
            if taken {
                node.set_cursor(target as i32);
                return Ok(());
            }
        }

        Instruction::Jro { src } => {
            let Some(offset) = read(nodes, id, src, tick) else {
                tracing::trace!(node = id, tick, ?instr, "blocked on read");
                return Ok(());
            };
            let node = &mut nodes[id];
            let pos = node.cursor as i32 + offset as i32;
            node.set_cursor(pos);
            return Ok(());
        }
    }

    let node = &mut nodes[id];
    node.blocked = false;
    node.advance();
    tracing::trace!(node = id, tick, ?instr, acc = node.acc, "completed");
    Ok(())
}

/// Read a source location; `None` means the node is blocked this tick
fn read(nodes: &mut [Node], id: NodeId, src: Location, tick: u64) -> Option<Value> {
    // Still waiting for our own write to be taken
    if nodes[id].offer.is_some() {
        return None;
    }

    let port = match src {
        Location::Number(n) => return Some(n),
        Location::Address(port) => port,
    };

    match port {
        Port::Nil => Some(0),
        Port::Acc => Some(nodes[id].acc),
        Port::Dir(_) | Port::Any | Port::Last => match resolve_input(nodes, id, port, tick) {
            Some(from) if nodes[from].offers_to(id, tick) => {
                let value = claim(&mut nodes[from], tick);
                if port == Port::Any {
                    nodes[id].last = Some(from);
                }
                Some(value)
            }
            Some(_) if port == Port::Last => Some(0),
            _ => None,
        },
    }
}

/// Take the writer's offer and let it move on
fn claim(writer: &mut Node, tick: u64) -> Value {
    let value = writer.offer.take().map_or(0, |offer| offer.value);
    writer.blocked = false;
    writer.advance();
    writer.released_at = Some(tick);
    value
}

/// Write a value to a destination port
fn write(nodes: &mut [Node], id: NodeId, dst: Port, value: Value, tick: u64) -> Result<Write> {
    match dst {
        Port::Acc => {
            nodes[id].acc = value;
            Ok(Write::Done)
        }
        Port::Dir(_) | Port::Any | Port::Last => {
            if nodes[id].offer.is_none() {
                let target = resolve_output(nodes, id, dst);
                let node = &mut nodes[id];
                node.offer = Some(Offer { value, port: dst, target, tick });
                if let (Port::Any, Some(target)) = (dst, target) {
                    node.last = Some(target);
                }
            }
            Ok(Write::Offered)
        }
        Port::Nil => Err(RuntimeError::InvalidWrite { node: id, port: dst }),
    }
}

/// Neighbor a read on `port` takes its value from
fn resolve_input(nodes: &[Node], id: NodeId, port: Port, tick: u64) -> Option<NodeId> {
    let node = &nodes[id];
    match port {
        Port::Dir(d) => node.link(d),
        Port::Last => node.last,
        Port::Any => READ_SCAN
            .iter()
            .filter_map(|&d| node.link(d))
            .find(|&n| nodes[n].offers_to(id, tick)),
        Port::Nil | Port::Acc => None,
    }
}

/// Neighbor a write on `port` is addressed to
fn resolve_output(nodes: &[Node], id: NodeId, port: Port) -> Option<NodeId> {
    let node = &nodes[id];
    match port {
        Port::Dir(d) => node.link(d),
        Port::Last => node.last,
        Port::Any => WRITE_SCAN
            .iter()
            .filter_map(|&d| node.link(d))
            .find(|&n| nodes[n].listens_to(id)),
        Port::Nil | Port::Acc => None,
    }
}
