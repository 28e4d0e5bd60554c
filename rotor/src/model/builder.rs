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

//! # Model and Topology Builders
//!
//! Helper functions to build a model without flows, and to generate the cyclic topology of
//! rotating switches.

use super::network::Model;
use super::types::*;

use log::*;
use std::collections::HashSet;

/// Build a model with `num_nodes` nodes, each owning `ports_per_node` ports with the same
/// capacity and bandwidth. Ports are numbered node-major, i.e., port `n * ports_per_node + i` is
/// the `i`-th port of node `n`. The model has neither flows nor a topology yet.
pub fn build_flowless_model(
    num_nodes: usize,
    ports_per_node: usize,
    capacity: u64,
    bandwidth: u64,
) -> Model {
    let mut model = Model::new();
    for _ in 0..num_nodes {
        let node = model.add_node();
        for _ in 0..ports_per_node {
            model.push_port(node, capacity, bandwidth);
        }
    }
    model
}

/// # Rotating Switches
///
/// Every node owns `num_switches` ports (one per switch). Port `i` of node `n` is connected to
/// node `n + offset_i` (modulo the number of nodes, skipping `n` itself). After every phase, each
/// offset advances by one. The topology ends as soon as the tuple of offsets repeats, so the
/// number of phases is the length of this cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotatingSwitches {
    num_switches: usize,
    initial_offsets: Vec<usize>,
}

impl RotatingSwitches {
    /// Create the topology generator with initial offsets `i * interval + start_offset`.
    pub fn new(num_switches: usize, interval: usize, start_offset: usize) -> Self {
        let initial_offsets = (0..num_switches).map(|i| i * interval + start_offset).collect();
        Self { num_switches, initial_offsets }
    }

    /// Create the topology generator with explicit initial offsets. There must be exactly one
    /// offset for every switch.
    pub fn with_offsets(num_switches: usize, offsets: Vec<usize>) -> Result<Self, ConfigError> {
        if offsets.len() != num_switches {
            return Err(ConfigError::OffsetCountMismatch {
                expected: num_switches,
                found: offsets.len(),
            });
        }
        Ok(Self { num_switches, initial_offsets: offsets })
    }

    /// Number of switches (ports per node)
    pub fn num_switches(&self) -> usize {
        self.num_switches
    }

    /// Initial offsets of all switches
    pub fn initial_offsets(&self) -> &[usize] {
        &self.initial_offsets
    }

    /// Generate the topology for a model with `num_nodes` nodes, each owning `num_switches`
    /// ports numbered node-major (see [`build_flowless_model`]).
    pub fn get_topology(&self, num_nodes: usize) -> Result<Topology, ConfigError> {
        if num_nodes < 2 {
            return Err(ConfigError::TooFewNodes { required: 2, found: num_nodes });
        }

        let target = |source: NodeId, offset: usize| -> NodeId {
            let t = (source + offset) % num_nodes;
            if t == source {
                (t + 1) % num_nodes
            } else {
                t
            }
        };
        // offsets cycle through 1..num_nodes
        let advance = |offset: usize| -> usize { (offset + num_nodes - 1) % (num_nodes - 1) + 1 };

        let mut seen: HashSet<Vec<usize>> = HashSet::new();
        let mut topology: Topology = Vec::new();
        let mut offsets = self.initial_offsets.clone();

        while seen.insert(offsets.clone()) {
            let matching = (0..num_nodes)
                .flat_map(|n| offsets.iter().map(move |o| (n, *o)))
                .map(|(n, o)| target(n, o))
                .collect::<Vec<NodeId>>();
            topology.push(matching);
            offsets = offsets.iter().map(|o| advance(*o)).collect();
        }

        debug!(
            "Generated rotating topology with {} phases for {} nodes and {} switches",
            topology.len(),
            num_nodes,
            self.num_switches
        );
        Ok(topology)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_flowless_model() {
        let model = build_flowless_model(3, 2, 10, 1);
        assert_eq!(model.num_nodes(), 3);
        assert_eq!(model.num_ports(), 6);
        assert_eq!(model.num_flows(), 0);
        assert_eq!(model.ports_of_node(0), &[0, 1]);
        assert_eq!(model.ports_of_node(2), &[4, 5]);
        assert!(model.ports().iter().all(|p| p.capacity == 10 && p.bandwidth == 1));
    }

    #[test]
    fn test_rotating_single_switch() {
        let topo = RotatingSwitches::new(1, 1, 1).get_topology(4).unwrap();
        assert_eq!(topo, vec![vec![1, 2, 3, 0], vec![2, 3, 0, 1], vec![3, 0, 1, 2]]);
    }

    #[test]
    fn test_rotating_two_switches() {
        let topo = RotatingSwitches::new(2, 1, 1).get_topology(3).unwrap();
        // offsets (1, 2) -> (2, 1) -> (1, 2)
        assert_eq!(topo, vec![vec![1, 2, 2, 0, 0, 1], vec![2, 1, 0, 2, 1, 0]]);
    }

    #[test]
    fn test_rotating_never_targets_self() {
        let topo = RotatingSwitches::new(3, 2, 0).get_topology(5).unwrap();
        for row in topo.iter() {
            for (port, target) in row.iter().enumerate() {
                assert_ne!(port / 3, *target);
            }
        }
    }

    #[test]
    fn test_offset_mismatch() {
        assert_eq!(
            RotatingSwitches::with_offsets(2, vec![1, 2, 3]),
            Err(ConfigError::OffsetCountMismatch { expected: 2, found: 3 })
        );
        assert!(RotatingSwitches::with_offsets(2, vec![1, 2]).is_ok());
    }

    #[test]
    fn test_too_few_nodes() {
        assert_eq!(
            RotatingSwitches::new(1, 1, 1).get_topology(1),
            Err(ConfigError::TooFewNodes { required: 2, found: 1 })
        );
    }
}
