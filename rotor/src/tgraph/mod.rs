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

//! # Time-Expanded Graph
//!
//! The rotating topology is unrolled into a static, directed graph. For each phase, the graph
//! contains a vertex for each node, and a vertex for each port. A packet at a node in phase `p`
//! can be handed to one of its ports, from where it either travels over the link to the target
//! node (as configured in that phase), or waits at the port until a later phase. All phases are
//! arranged in a cycle, so the last phase is followed by the first one.
//!
//! The edge families and their costs are chosen by the policy (see [`EdgeConfig`]). The
//! [`ConnectivityGraph`] then computes the cheapest path from every `(phase, node)` towards an
//! egress node, and the functions in [`translate`] turn these paths into a
//! [`Schedule`](crate::schedule::Schedule).
//!
//! In addition, the [`NodeGraph`] collapses all phases and ports into a simple graph on the
//! nodes, which is used to enumerate paths with a fixed number of hops.

mod builder;
mod node_graph;
mod resolver;
pub mod translate;

pub use builder::{
    ConnectivityGraph, EdgeConfig, EdgeCost, EdgeFamily, TVertex, TimeGraph, VertexId,
};
pub use node_graph::{NodeGraph, SimplePaths};
pub use translate::{path_to_choice, path_to_ports, ports_to_schedule, PortChoices};

use crate::model::{ConfigError, NodeId, Phase, PortId};

use std::collections::HashMap;
use thiserror::Error;

/// Shortest path from every `(phase, node)` towards a single egress node. Each path starts with
/// the node-vertex of the source, and ends with a node-vertex of the egress.
pub type PathMap = HashMap<(Phase, NodeId), Vec<TVertex>>;

/// Errors while building or querying the time-expanded graph
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    /// The model is invalid
    #[error("Invalid model: {0}")]
    ConfigError(#[from] ConfigError),
    /// An edge family shifts by more than one full cycle
    #[error("Cannot shift by {amount} phases, the cycle has only {num_phases} phases")]
    PhaseShiftTooLarge {
        /// Requested shift
        amount: usize,
        /// Number of phases in the cycle
        num_phases: usize,
    },
    /// A node which is able to send cannot reach the egress node
    #[error("Node {node} in phase {phase} cannot reach egress node {egress}")]
    Unreachable {
        /// Phase of the source
        phase: Phase,
        /// Source node
        node: NodeId,
        /// Egress node
        egress: NodeId,
    },
    /// The path resolved from the shortest-path tree ends at the wrong vertex
    #[error("Path ends at {found:?}, but expected {expected:?}")]
    WrongDestination {
        /// Last vertex on the path
        found: TVertex,
        /// Expected destination
        expected: TVertex,
    },
    /// The second vertex on a path must be a port
    #[error("Expected a port vertex, found {0:?}")]
    ExpectedPort(TVertex),
    /// The packet switched to a different port while waiting
    #[error("Packet switched from port {from} to port {to} while waiting")]
    PortSwitchWhileWaiting {
        /// Port where the packet started to wait
        from: PortId,
        /// Port the path switched to
        to: PortId,
    },
    /// The path does not end at a node
    #[error("Path does not end at a node: {0:?}")]
    MissingTerminalNode(Vec<TVertex>),
    /// There exists no simple path with exactly the required number of hops
    #[error("No simple path from {ingress} to {egress} with exactly {hops} hops")]
    NoSimplePath {
        /// Start of the path
        ingress: NodeId,
        /// End of the path
        egress: NodeId,
        /// Required number of hops
        hops: usize,
    },
    /// No port of the node connects to the next node within one full cycle
    #[error("Node {node} cannot reach node {next} within a full cycle after phase {phase}")]
    NoConnectingPort {
        /// Node sending the packet
        node: NodeId,
        /// Node which should receive the packet
        next: NodeId,
        /// Phase in which the packet arrives at `node`
        phase: Phase,
    },
    /// The graph contains a negative cycle
    #[error("The time-expanded graph contains a negative cycle")]
    NegativeCycle,
}
