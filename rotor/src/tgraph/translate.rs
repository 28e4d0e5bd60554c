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

//! # Path Translator
//!
//! Converts the paths of the time-expanded graph into forwarding decisions, and assembles the
//! decisions of all flows into a [`Schedule`].

use super::builder::TVertex;
use super::{GraphError, PathMap};
use crate::model::{Model, NodeId, Phase};
use crate::schedule::{Schedule, ScheduleChoice, ScheduleError};

use log::*;
use std::collections::HashMap;

/// Forwarding decision of every `(phase, node)` for a single flow. The value `None` means that
/// the source already is the destination, so the forwarding decision does not matter.
pub type PortChoices = HashMap<(Phase, NodeId), Option<ScheduleChoice>>;

/// Translate a single path into a forwarding decision.
///
/// A path with a single vertex (source is already the destination) results in `None`. Otherwise,
/// the second vertex must be a port-vertex. If `collapse_waits` is set, all following vertices of
/// that same port are skipped (the packet waits at the port), and the phase of the first
/// node-vertex after them is the departure phase. Otherwise, the phase of the port-vertex is used.
pub fn path_to_choice(
    path: &[TVertex],
    collapse_waits: bool,
) -> Result<Option<ScheduleChoice>, GraphError> {
    if path.len() <= 1 {
        return Ok(None);
    }

    let (port_phase, port) = match path[1] {
        TVertex::Port { phase, port } => (phase, port),
        found => return Err(GraphError::ExpectedPort(found)),
    };

    if !collapse_waits {
        return Ok(Some(ScheduleChoice::new(port, port_phase)));
    }

    for vertex in path.iter().skip(2) {
        match vertex {
            // we must always be at the same port while waiting
            TVertex::Port { port: next_port, .. } if *next_port == port => {}
            TVertex::Port { port: next_port, .. } => {
                return Err(GraphError::PortSwitchWhileWaiting { from: port, to: *next_port })
            }
            // we send in the phase of the node which is reached
            TVertex::Node { phase, .. } => return Ok(Some(ScheduleChoice::new(port, *phase))),
        }
    }

    // a path must always lead to a node
    Err(GraphError::MissingTerminalNode(path.to_vec()))
}

/// Translate all paths of a single flow.
pub fn path_to_ports(paths: &PathMap, collapse_waits: bool) -> Result<PortChoices, GraphError> {
    paths
        .iter()
        .map(|(key, path)| path_to_choice(path, collapse_waits).map(|choice| (*key, choice)))
        .collect()
}

/// Assemble the forwarding decisions of all flows (in the order of the flows of the model) into
/// a schedule.
///
/// Placeholder decisions (`None`) are replaced by the default: the first port owned by the node,
/// departing in the next phase. Nodes without any port, for which no decision exists, are left
/// empty.
pub fn ports_to_schedule(
    model: &Model,
    flow_port_choices: &[PortChoices],
) -> Result<Schedule, ScheduleError> {
    let mut schedule = Schedule::new(model);
    for phase in 0..model.num_phases() {
        for node in model.nodes() {
            for (flow, port_choices) in flow_port_choices.iter().enumerate() {
                let choice = match port_choices.get(&(phase, node)) {
                    Some(Some(choice)) => *choice,
                    Some(None) => match schedule.default_choice(phase, node) {
                        Some(choice) => choice,
                        None => continue,
                    },
                    None => {
                        trace!("No forwarding decision for node {} in phase {}", node, phase);
                        continue;
                    }
                };
                schedule.set(phase, node, flow, choice)?;
            }
        }
    }
    Ok(schedule)
}
