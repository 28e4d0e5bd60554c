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

//! # Rotor Model
//!
//! This module contains the static description of the switching network: the nodes, their ports,
//! the cyclic topology and the flows.

use super::types::*;

use log::*;

/// # Model
///
/// Static description of a rotor switching network. Nodes and ports are identified by dense,
/// zero-based indices. The topology is a sequence indexed by phase, where
/// `topology[phase][port]` is the node which the port is connected to during that phase. Phase
/// arithmetic is always modulo the number of phases.
///
/// The model is built once and only read afterwards. Policies never mutate it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    num_nodes: usize,
    ports: Vec<Port>,
    /// lookup from the node to all ports owned by it, in increasing order
    node_ports: Vec<Vec<PortId>>,
    flows: Vec<Flow>,
    topology: Topology,
}

impl Model {
    /// Create an empty model, without any nodes, ports, flows or topology.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new node and return its index.
    pub fn add_node(&mut self) -> NodeId {
        let node = self.num_nodes;
        self.num_nodes += 1;
        self.node_ports.push(Vec::new());
        node
    }

    /// Add a new port owned by `owner` and return its index.
    pub fn add_port(
        &mut self,
        owner: NodeId,
        capacity: u64,
        bandwidth: u64,
    ) -> Result<PortId, ConfigError> {
        if owner >= self.num_nodes {
            return Err(ConfigError::UnknownNode(owner));
        }
        Ok(self.push_port(owner, capacity, bandwidth))
    }

    /// Add a port to a node which is known to exist.
    pub(super) fn push_port(&mut self, owner: NodeId, capacity: u64, bandwidth: u64) -> PortId {
        let index = self.ports.len();
        self.ports.push(Port { index, owner, capacity, bandwidth });
        self.node_ports[owner].push(index);
        index
    }

    /// Add a flow to the model and return its index.
    pub fn add_flow(&mut self, flow: Flow) -> Result<FlowId, ConfigError> {
        for node in [flow.ingress, flow.egress].iter() {
            if *node >= self.num_nodes {
                return Err(ConfigError::UnknownNode(*node));
            }
        }
        self.flows.push(flow);
        Ok(self.flows.len() - 1)
    }

    /// Attach the topology to the model. Every phase must contain exactly one target node for
    /// each port, and at least one phase must be given.
    pub fn set_topology(&mut self, topology: Topology) -> Result<(), ConfigError> {
        validate_topology(&topology, self.num_ports(), self.num_nodes)?;
        debug!(
            "Topology with {} phases set on a model with {} nodes and {} ports",
            topology.len(),
            self.num_nodes,
            self.num_ports()
        );
        self.topology = topology;
        Ok(())
    }

    /// Check that the model is ready to be scheduled. This fails if no topology was attached.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_topology(&self.topology, self.num_ports(), self.num_nodes)
    }

    /// Number of nodes
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of ports
    pub fn num_ports(&self) -> usize {
        self.ports.len()
    }

    /// Number of flows
    pub fn num_flows(&self) -> usize {
        self.flows.len()
    }

    /// Number of phases, which is the length of the topology.
    pub fn num_phases(&self) -> usize {
        self.topology.len()
    }

    /// Iterator over all node indices
    pub fn nodes(&self) -> std::ops::Range<NodeId> {
        0..self.num_nodes
    }

    /// All ports of the model
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    /// Get a single port
    pub fn port(&self, port: PortId) -> Option<&Port> {
        self.ports.get(port)
    }

    /// All flows of the model
    pub fn flows(&self) -> &[Flow] {
        &self.flows
    }

    /// The topology, `topology[phase][port] = target_node`
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Returns the indices of all ports owned by the node, in increasing order. Unknown nodes own
    /// no ports.
    pub fn ports_of_node(&self, node: NodeId) -> &[PortId] {
        self.node_ports.get(node).map(|p| p.as_slice()).unwrap_or(&[])
    }

    /// Returns the node which `port` is connected to during `phase`.
    pub fn target(&self, phase: Phase, port: PortId) -> NodeId {
        self.topology[phase][port]
    }

    /// Add `amount` phases to `phase`, wrapping around at the end of the cycle.
    pub fn phase_add(&self, phase: Phase, amount: usize) -> Phase {
        (phase + amount) % self.num_phases()
    }
}

fn validate_topology(
    topology: &[Vec<NodeId>],
    num_ports: usize,
    num_nodes: usize,
) -> Result<(), ConfigError> {
    if topology.is_empty() {
        return Err(ConfigError::EmptyTopology);
    }
    for (phase, targets) in topology.iter().enumerate() {
        if targets.len() != num_ports {
            return Err(ConfigError::TopologyPortMismatch {
                phase,
                expected: num_ports,
                found: targets.len(),
            });
        }
        if let Some((port, node)) = targets.iter().enumerate().find(|(_, n)| **n >= num_nodes) {
            return Err(ConfigError::UnknownTargetNode { phase, port, node: *node });
        }
    }
    Ok(())
}
