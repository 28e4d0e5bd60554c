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

//! Policy choosing a random simple path with a fixed number of hops for every flow.

use crate::model::{Model, NodeId, Phase};
use crate::schedule::{Schedule, ScheduleChoice};
use crate::tgraph::{GraphError, NodeGraph};
use crate::Error;

use itertools::Itertools;
use log::*;
use rand::seq::SliceRandom;
use rand::Rng;

/// For every flow, pick one of the simple paths with exactly `hops` hops from the ingress to the
/// egress uniformly at random. Then, for every phase and every hop on that path, wait at the node
/// until a port connects to the next node on the path.
///
/// Only the nodes on the chosen path get an entry for the flow, so the schedule is usually not
/// complete.
pub(super) fn exact_hops_schedule<R: Rng + ?Sized>(
    model: &Model,
    hops: usize,
    rng: &mut R,
) -> Result<Schedule, Error> {
    let graph = NodeGraph::from_model(model);

    // choose the paths of all flows before expanding any hop
    let mut flow_paths: Vec<Vec<NodeId>> = Vec::with_capacity(model.num_flows());
    for flow in model.flows() {
        let candidates: Vec<Vec<NodeId>> =
            graph.simple_paths(flow.ingress, flow.egress, hops).collect();
        trace!(
            "{} simple paths with {} hops from {} to {}",
            candidates.len(),
            hops,
            flow.ingress,
            flow.egress
        );
        let path = candidates.choose(rng).ok_or(GraphError::NoSimplePath {
            ingress: flow.ingress,
            egress: flow.egress,
            hops,
        })?;
        flow_paths.push(path.clone());
    }

    let mut schedule = Schedule::new(model);
    for (flow, path) in flow_paths.iter().enumerate() {
        debug!("Flow {} follows the path {:?}", flow, path);
        for phase in 0..model.num_phases() {
            for (node, next) in path.iter().tuple_windows() {
                let choice = connecting_choice(model, phase, *node, *next, rng)?;
                schedule.set(phase, *node, flow, choice)?;
            }
        }
    }
    Ok(schedule)
}

/// Scan the phases after `phase` (wrapping around, up to one full cycle) for a port of `node`
/// connected to `next`. Among all matching ports of the first such phase, pick one uniformly at
/// random.
fn connecting_choice<R: Rng + ?Sized>(
    model: &Model,
    phase: Phase,
    node: NodeId,
    next: NodeId,
    rng: &mut R,
) -> Result<ScheduleChoice, GraphError> {
    for waits in 1..=model.num_phases() {
        let future_phase = model.phase_add(phase, waits);
        let connecting: Vec<_> = model
            .ports_of_node(node)
            .iter()
            .filter(|port| model.target(future_phase, **port) == next)
            .collect();
        if let Some(port) = connecting.choose(rng) {
            return Ok(ScheduleChoice::new(**port, future_phase));
        }
    }
    Err(GraphError::NoConnectingPort { node, next, phase })
}
