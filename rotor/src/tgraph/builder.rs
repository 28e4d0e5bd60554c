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

//! # Time-Expanded Graph Builder
//!
//! Construction of the time-expanded graph. For every phase, the graph contains one vertex per
//! node and one vertex per port. Edges connect them according to the enabled [`EdgeFamily`]s.

use super::{GraphError, PathMap};
use crate::model::{Model, NodeId, Phase, PortId};

use log::*;
use petgraph::prelude::*;
use std::collections::HashMap;

type IndexType = u32;
/// Cost of an edge in the time-expanded graph
pub type EdgeCost = f64;
/// Time-expanded graph
pub type TimeGraph = Graph<TVertex, EdgeCost, Directed, IndexType>;
/// Vertex Identification in the time-expanded graph
pub type VertexId = NodeIndex<IndexType>;

/// Vertex of the time-expanded graph, referring back to the domain model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TVertex {
    /// A node during a specific phase
    Node {
        /// Phase of the vertex
        phase: Phase,
        /// Node of the model
        node: NodeId,
    },
    /// A port during a specific phase
    Port {
        /// Phase of the vertex
        phase: Phase,
        /// Port of the model
        port: PortId,
    },
}

impl TVertex {
    /// Phase of the vertex
    pub fn phase(&self) -> Phase {
        match self {
            Self::Node { phase, .. } | Self::Port { phase, .. } => *phase,
        }
    }

    /// Returns true if and only if the vertex represents a port.
    pub fn is_port(&self) -> bool {
        matches!(self, Self::Port { .. })
    }

    /// Returns the node, if the vertex represents a node.
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Self::Node { node, .. } => Some(*node),
            Self::Port { .. } => None,
        }
    }
}

/// Cost and phase shift of one family of edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeFamily {
    /// Weight of every edge in this family
    pub cost: EdgeCost,
    /// Number of phases the edge moves forward in time
    pub phase_shift: usize,
}

impl EdgeFamily {
    /// Port to target node, in the same phase.
    pub fn port_to_node(cost: EdgeCost) -> Self {
        Self { cost, phase_shift: 0 }
    }

    /// Node to one of its ports, in the next phase.
    pub fn node_to_port(cost: EdgeCost) -> Self {
        Self { cost, phase_shift: 1 }
    }

    /// Port to the same port, in the next phase (waiting at the port).
    pub fn port_to_port(cost: EdgeCost) -> Self {
        Self { cost, phase_shift: 1 }
    }
}

/// Selection of the edge families in the time-expanded graph. Families set to `None` are not
/// added.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeConfig {
    /// Edges `(p, port) -> (p + shift, target_node(p, port))`
    pub port_to_node: Option<EdgeFamily>,
    /// Edges `(p, node) -> (p + shift, port)` for every port owned by the node
    pub node_to_port: Option<EdgeFamily>,
    /// Edges `(p, port) -> (p + shift, port)`
    pub port_to_port: Option<EdgeFamily>,
}

impl EdgeConfig {
    /// Packets must hop every phase: links cost 1, waiting at a port is impossible.
    pub fn must_hop() -> Self {
        Self {
            port_to_node: Some(EdgeFamily::port_to_node(1.0)),
            node_to_port: Some(EdgeFamily::node_to_port(0.0)),
            port_to_port: None,
        }
    }

    /// Packets may wait at a port, which costs `wait_cost` per phase. Links cost 1.
    pub fn may_wait(wait_cost: EdgeCost) -> Self {
        Self { port_to_port: Some(EdgeFamily::port_to_port(wait_cost)), ..Self::must_hop() }
    }

    /// Waiting at a port is free, and every link costs `hop_cost`.
    pub fn prefer_wait(hop_cost: EdgeCost) -> Self {
        Self {
            port_to_node: Some(EdgeFamily::port_to_node(hop_cost)),
            node_to_port: Some(EdgeFamily::node_to_port(0.0)),
            port_to_port: Some(EdgeFamily::port_to_port(0.0)),
        }
    }
}

/// # Connectivity Graph
///
/// Time-expanded graph of a model. For each phase, it contains a node-vertex for each node and a
/// port-vertex for each port of the model. Node-vertices come first (phase-major), followed by
/// all port-vertices (phase-major), such that the index of every vertex can be computed directly.
///
/// The phases of the port-vertices are the phases in which packets are sent.
///
/// The graph owns the cache of the shortest paths towards each egress node. The cache is cleared
/// whenever edges are added.
#[derive(Debug, Clone)]
pub struct ConnectivityGraph<'a> {
    pub(super) model: &'a Model,
    pub(super) graph: TimeGraph,
    num_nverts: usize,
    pub(super) cache: HashMap<NodeId, PathMap>,
}

impl<'a> ConnectivityGraph<'a> {
    /// Create the graph with all vertices, but without any edge. Fails if the model has no valid
    /// topology.
    pub fn new(model: &'a Model) -> Result<Self, GraphError> {
        model.validate()?;
        let num_phases = model.num_phases();
        let num_nverts = num_phases * model.num_nodes();
        let num_pverts = num_phases * model.num_ports();

        let mut graph = TimeGraph::with_capacity(num_nverts + num_pverts, 0);
        for phase in 0..num_phases {
            for node in model.nodes() {
                graph.add_node(TVertex::Node { phase, node });
            }
        }
        for phase in 0..num_phases {
            for port in 0..model.num_ports() {
                graph.add_node(TVertex::Port { phase, port });
            }
        }

        Ok(Self { model, graph, num_nverts, cache: HashMap::new() })
    }

    /// Create the graph and add all edge families enabled in `config`.
    pub fn build(model: &'a Model, config: &EdgeConfig) -> Result<Self, GraphError> {
        let mut g = Self::new(model)?;
        if let Some(family) = config.port_to_node {
            g.add_port_to_nodes(family)?;
        }
        if let Some(family) = config.node_to_port {
            g.add_nodes_to_port(family)?;
        }
        if let Some(family) = config.port_to_port {
            g.add_port_to_same_future_port(family)?;
        }
        debug!(
            "Built time-expanded graph with {} vertices and {} edges",
            g.graph.node_count(),
            g.graph.edge_count()
        );
        Ok(g)
    }

    /// The model this graph was built from
    pub fn model(&self) -> &'a Model {
        self.model
    }

    /// The underlying petgraph graph
    pub fn graph(&self) -> &TimeGraph {
        &self.graph
    }

    /// Index of the vertex representing `node` in `phase`
    pub fn node_vertex(&self, phase: Phase, node: NodeId) -> VertexId {
        VertexId::new(phase * self.model.num_nodes() + node)
    }

    /// Index of the vertex representing `port` in `phase`
    pub fn port_vertex(&self, phase: Phase, port: PortId) -> VertexId {
        VertexId::new(self.num_nverts + phase * self.model.num_ports() + port)
    }

    /// Returns the domain data of a vertex.
    pub fn vertex(&self, v: VertexId) -> TVertex {
        self.graph[v]
    }

    /// Shift `phase` by `amount` phases, wrapping around. Shifting by more than one full cycle is
    /// a usage error.
    pub fn phase_shift(&self, phase: Phase, amount: usize) -> Result<Phase, GraphError> {
        let num_phases = self.model.num_phases();
        if amount > num_phases {
            return Err(GraphError::PhaseShiftTooLarge { amount, num_phases });
        }
        Ok((phase + amount) % num_phases)
    }

    /// Connect every port-vertex to the vertex of the node it is connected to in that phase.
    pub fn add_port_to_nodes(&mut self, family: EdgeFamily) -> Result<(), GraphError> {
        let model = self.model;
        let mut to_add: Vec<(VertexId, VertexId)> = Vec::new();
        for (from_phase, targets) in model.topology().iter().enumerate() {
            let to_phase = self.phase_shift(from_phase, family.phase_shift)?;
            for (port, target) in targets.iter().enumerate() {
                let from = self.port_vertex(from_phase, port);
                to_add.push((from, self.node_vertex(to_phase, *target)));
            }
        }
        trace!("Adding {} port -> node edges with cost {}", to_add.len(), family.cost);
        self.extend(to_add, family.cost);
        Ok(())
    }

    /// Connect every node-vertex to the vertices of all ports owned by this node.
    pub fn add_nodes_to_port(&mut self, family: EdgeFamily) -> Result<(), GraphError> {
        let model = self.model;
        let mut to_add: Vec<(VertexId, VertexId)> = Vec::new();
        for from_phase in 0..model.num_phases() {
            let to_phase = self.phase_shift(from_phase, family.phase_shift)?;
            for node in model.nodes() {
                for port in model.ports_of_node(node) {
                    let from = self.node_vertex(from_phase, node);
                    to_add.push((from, self.port_vertex(to_phase, *port)));
                }
            }
        }
        trace!("Adding {} node -> port edges with cost {}", to_add.len(), family.cost);
        self.extend(to_add, family.cost);
        Ok(())
    }

    /// Connect every port-vertex to the vertex of the same port in a future phase.
    pub fn add_port_to_same_future_port(&mut self, family: EdgeFamily) -> Result<(), GraphError> {
        let model = self.model;
        let mut to_add: Vec<(VertexId, VertexId)> = Vec::new();
        for from_phase in 0..model.num_phases() {
            let to_phase = self.phase_shift(from_phase, family.phase_shift)?;
            for port in 0..model.num_ports() {
                let from = self.port_vertex(from_phase, port);
                to_add.push((from, self.port_vertex(to_phase, port)));
            }
        }
        trace!("Adding {} port -> port edges with cost {}", to_add.len(), family.cost);
        self.extend(to_add, family.cost);
        Ok(())
    }

    fn extend(&mut self, edges: Vec<(VertexId, VertexId)>, cost: EdgeCost) {
        for (a, b) in edges {
            self.graph.add_edge(a, b, cost);
        }
        // the edge set changed, so all cached paths are stale
        self.cache.clear();
    }
}
