// Rotor: Forwarding Schedules for Rotating Switch Networks
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! # Schedule
//!
//! This module contains the forwarding schedule, which is the result of every policy. For every
//! triple `(phase, node, flow)`, the schedule tells which port to use, and in which phase the
//! packet actually departs.

use crate::model::{FlowId, Model, NodeId, Phase, PortId};

use log::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Forwarding decision for a single `(phase, node, flow)` triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleChoice {
    /// Port on which the packet is sent
    pub port: PortId,
    /// Phase in which the packet departs. This is either the next phase, or a later one if the
    /// packet must wait at the port.
    pub phase: Phase,
}

impl ScheduleChoice {
    /// Create a new choice
    pub fn new(port: PortId, phase: Phase) -> Self {
        Self { port, phase }
    }
}

/// Schedule Errors
#[derive(Error, Debug, PartialEq)]
pub enum ScheduleError {
    /// The key is not part of the schedule
    #[error("Key (phase {0}, node {1}, flow {2}) is out of range")]
    OutOfRange(Phase, NodeId, FlowId),
    /// The entry is missing, and no default can be used since the node owns no port
    #[error("No entry for (phase {0}, node {1}, flow {2}), and node {1} owns no port")]
    MissingEntry(Phase, NodeId, FlowId),
}

/// # Schedule
///
/// Total function from `(phase, node, flow)` to a [`ScheduleChoice`]. The entries are stored in a
/// flattened, dense table. Reading is split into two tiers:
///
/// - [`Schedule::get`] only returns entries that were explicitly set.
/// - [`Schedule::lookup`] falls back to the default choice (first owned port of the node,
///   departing in the next phase) if the entry is missing. This never modifies the schedule.
///
/// The defaults are only written into the table when calling [`Schedule::fill_defaults`]. Thus,
/// [`Schedule::is_complete`] tells if the policy has set every entry on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    num_phases: usize,
    num_nodes: usize,
    num_flows: usize,
    /// Flattened 3-dimensional table, indexed by `(phase * num_nodes + node) * num_flows + flow`
    entries: Vec<Option<ScheduleChoice>>,
    /// First port owned by each node, used for the default choice.
    default_ports: Vec<Option<PortId>>,
}

impl Schedule {
    /// Create an empty schedule for the model.
    pub fn new(model: &Model) -> Self {
        let num_phases = model.num_phases();
        let num_nodes = model.num_nodes();
        let num_flows = model.num_flows();
        Self {
            num_phases,
            num_nodes,
            num_flows,
            entries: vec![None; num_phases * num_nodes * num_flows],
            default_ports: model.nodes().map(|n| model.ports_of_node(n).first().cloned()).collect(),
        }
    }

    /// Number of phases
    pub fn num_phases(&self) -> usize {
        self.num_phases
    }

    /// Number of nodes
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of flows
    pub fn num_flows(&self) -> usize {
        self.num_flows
    }

    /// Set the choice for a single entry, overwriting any previous value.
    pub fn set(
        &mut self,
        phase: Phase,
        node: NodeId,
        flow: FlowId,
        choice: ScheduleChoice,
    ) -> Result<(), ScheduleError> {
        let idx = self.idx(phase, node, flow)?;
        self.entries[idx] = Some(choice);
        Ok(())
    }

    /// Returns the entry, only if it was explicitly set.
    pub fn get(&self, phase: Phase, node: NodeId, flow: FlowId) -> Option<ScheduleChoice> {
        self.idx(phase, node, flow).ok().and_then(|idx| self.entries[idx])
    }

    /// Returns the entry, or the default choice if it was never set. The default is to send on
    /// the first port owned by the node, in the next phase.
    pub fn lookup(
        &self,
        phase: Phase,
        node: NodeId,
        flow: FlowId,
    ) -> Result<ScheduleChoice, ScheduleError> {
        let idx = self.idx(phase, node, flow)?;
        self.entries[idx]
            .or_else(|| self.default_choice(phase, node))
            .ok_or(ScheduleError::MissingEntry(phase, node, flow))
    }

    /// The default choice for a node: Pick the first owned port, and depart in the next phase.
    /// Returns `None` if the node owns no port.
    pub fn default_choice(&self, phase: Phase, node: NodeId) -> Option<ScheduleChoice> {
        let port = self.default_ports.get(node).cloned().flatten()?;
        Some(ScheduleChoice::new(port, (phase + 1) % self.num_phases))
    }

    /// Write the default choice into every missing entry. Returns the number of entries that were
    /// filled. Entries of nodes without any port remain missing.
    pub fn fill_defaults(&mut self) -> usize {
        let mut filled = 0;
        for phase in 0..self.num_phases {
            for node in 0..self.num_nodes {
                let default = match self.default_choice(phase, node) {
                    Some(c) => c,
                    None => continue,
                };
                for flow in 0..self.num_flows {
                    let idx = self.flat_idx(phase, node, flow);
                    if self.entries[idx].is_none() {
                        self.entries[idx] = Some(default);
                        filled += 1;
                    }
                }
            }
        }
        trace!("Filled {} schedule entries with the default choice", filled);
        filled
    }

    /// Returns true if and only if every `(phase, node, flow)` entry was explicitly set (or
    /// filled by [`Schedule::fill_defaults`]).
    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(|e| e.is_some())
    }

    /// Returns true if and only if every recorded entry departs in the phase immediately after
    /// the current one. The first violating entry is reported in the log.
    pub fn all_hop_immediately(&self) -> bool {
        for ((phase, node, flow), choice) in self.iter() {
            if choice.phase != (phase + 1) % self.num_phases {
                info!(
                    "{} phases: entry (phase {}, node {}, flow {}) departs in phase {} on port {}",
                    self.num_phases, phase, node, flow, choice.phase, choice.port
                );
                return false;
            }
        }
        true
    }

    /// Iterate over all recorded entries, in the order phase, node, flow.
    pub fn iter(
        &self,
    ) -> impl Iterator<Item = ((Phase, NodeId, FlowId), ScheduleChoice)> + '_ {
        let num_nodes = self.num_nodes;
        let num_flows = self.num_flows;
        self.entries.iter().enumerate().filter_map(move |(idx, e)| {
            let phase = idx / (num_nodes * num_flows);
            let node = (idx / num_flows) % num_nodes;
            e.map(|c| ((phase, node, idx % num_flows), c))
        })
    }

    /// Materialize the schedule as nested lists `[phase][node][flow]`. Missing entries are
    /// replaced with the default choice (see [`Schedule::lookup`]). Fails if an entry is missing
    /// for a node which owns no port.
    pub fn to_lists(&self) -> Result<Vec<Vec<Vec<ScheduleChoice>>>, ScheduleError> {
        (0..self.num_phases)
            .map(|phase| {
                (0..self.num_nodes)
                    .map(|node| {
                        (0..self.num_flows)
                            .map(|flow| self.lookup(phase, node, flow))
                            .collect::<Result<Vec<_>, _>>()
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect()
    }

    fn idx(&self, phase: Phase, node: NodeId, flow: FlowId) -> Result<usize, ScheduleError> {
        if phase >= self.num_phases || node >= self.num_nodes || flow >= self.num_flows {
            Err(ScheduleError::OutOfRange(phase, node, flow))
        } else {
            Ok(self.flat_idx(phase, node, flow))
        }
    }

    fn flat_idx(&self, phase: Phase, node: NodeId, flow: FlowId) -> usize {
        (phase * self.num_nodes + node) * self.num_flows + flow
    }
}
