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

//! Module containing all type definitions of the rotor model

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Node Identification (dense, zero-based index)
pub type NodeId = usize;
/// Port Identification (dense, zero-based index over all ports of the model)
pub type PortId = usize;
/// Flow Identification (index into the flows of the model)
pub type FlowId = usize;
/// Phase of the cyclic topology, always in `0..num_phases`
pub type Phase = usize;
/// Topology, indexed by `topology[phase][port] = target_node`
pub type Topology = Vec<Vec<NodeId>>;

/// # Port
/// A port is owned by exactly one node. During each phase, the port is connected to exactly one
/// target node, which is given by the topology of the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Port {
    /// Index of the port
    pub index: PortId,
    /// Node owning this port
    pub owner: NodeId,
    /// Buffer size of the port
    pub capacity: u64,
    /// Throughput of the port
    pub bandwidth: u64,
}

/// # Flow
/// Demand to move `amount` traffic from the `ingress` to the `egress` node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Flow {
    /// Node where the traffic enters the network
    pub ingress: NodeId,
    /// Node where the traffic leaves the network
    pub egress: NodeId,
    /// Demand of the flow
    pub amount: u64,
}

impl Flow {
    /// Create a new flow
    pub fn new(ingress: NodeId, egress: NodeId, amount: u64) -> Self {
        Self { ingress, egress, amount }
    }
}

/// Configuration Error
///
/// These errors are raised while building the model, or when the parameters of a policy are
/// invalid. They are always reported before any graph is constructed.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    /// The topology has no phase at all
    #[error("The topology must contain at least one phase")]
    EmptyTopology,
    /// A row of the topology does not contain one entry per port
    #[error("Phase {phase} of the topology has {found} entries, but there are {expected} ports")]
    TopologyPortMismatch {
        /// Phase of the topology
        phase: Phase,
        /// Number of ports in the model
        expected: usize,
        /// Number of entries in the topology row
        found: usize,
    },
    /// The topology references a node which does not exist
    #[error("Port {port} targets the unknown node {node} in phase {phase}")]
    UnknownTargetNode {
        /// Phase of the topology
        phase: Phase,
        /// Port which targets the unknown node
        port: PortId,
        /// The unknown node
        node: NodeId,
    },
    /// A node was referenced which is not part of the model
    #[error("Node {0} is not part of the model")]
    UnknownNode(NodeId),
    /// The number of explicit offsets does not match the number of switches.
    #[error("Initial offsets must match number of switches: expected {expected}, found {found}")]
    OffsetCountMismatch {
        /// Number of switches
        expected: usize,
        /// Number of offsets
        found: usize,
    },
    /// Too few nodes to generate the requested topology or flows
    #[error("At least {required} nodes are required, but the model has {found}")]
    TooFewNodes {
        /// Required number of nodes
        required: usize,
        /// Number of nodes in the model
        found: usize,
    },
    /// The maximum demand is smaller than the minimum demand
    #[error("Max demand {max} cannot be less than min demand {min}")]
    InvalidDemandRange {
        /// minimum demand
        min: u64,
        /// maximum demand
        max: u64,
    },
    /// The connection percentage is not in `[0, 100]`
    #[error("Connection percentage must be in [0, 100], but is {0}")]
    InvalidConnectionPercentage(f64),
    /// The policy name is not known
    #[error("Unknown policy: {0}")]
    UnknownPolicy(String),
    /// A cost constant is negative or not finite
    #[error("Invalid edge cost: {0}")]
    InvalidCost(f64),
    /// The requested hop count is zero
    #[error("The number of hops must be at least 1")]
    InvalidHopCount,
}
