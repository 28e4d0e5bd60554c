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

//! # Shortest-Path Resolver
//!
//! Computes, for a given egress node, the cheapest path from every node-vertex of the
//! time-expanded graph to any phase-instance of that egress node.

use super::builder::{ConnectivityGraph, EdgeCost, TVertex, TimeGraph, VertexId};
use super::{GraphError, PathMap};
use crate::model::{ConfigError, NodeId, Phase};

use log::*;
use petgraph::algo::bellman_ford;
use std::collections::HashMap;

impl<'a> ConnectivityGraph<'a> {
    /// Returns the shortest paths from every `(phase, node)` towards any phase-instance of
    /// `egress`. Each path is given in forward order, starting at the node-vertex of the source
    /// and ending at a node-vertex of the egress.
    ///
    /// The result is cached per egress node, and reused until new edges are added to the graph.
    ///
    /// Nodes without any port cannot send packets. They are only part of the result if they are
    /// the egress node itself. For every other node, a missing path is an error.
    ///
    /// **Note**: Among paths of equal cost, the one found first wins. The destination phases
    /// are tried in increasing order, and a later phase only replaces a path if it is strictly
    /// cheaper. Within a single destination phase, the tie-break follows the iteration order of
    /// the shortest-path algorithm, and is not canonical.
    pub fn shortest_paths(&mut self, egress: NodeId) -> Result<&PathMap, GraphError> {
        if !self.cache.contains_key(&egress) {
            debug!("Computing shortest paths towards egress node {}", egress);
            let paths = self.compute_shortest_paths(egress)?;
            self.cache.insert(egress, paths);
        } else {
            trace!("Reusing shortest paths towards egress node {}", egress);
        }
        Ok(&self.cache[&egress])
    }

    /// Returns the shortest paths for every flow, in the order of the flows of the model. Flows
    /// sharing the same egress node reuse the same result.
    pub fn paths_for_flows(&mut self) -> Result<Vec<PathMap>, GraphError> {
        let model = self.model;
        model.flows().iter().map(|f| self.shortest_paths(f.egress).map(|p| p.clone())).collect()
    }

    fn compute_shortest_paths(&self, egress: NodeId) -> Result<PathMap, GraphError> {
        let model = self.model;
        if egress >= model.num_nodes() {
            return Err(ConfigError::UnknownNode(egress).into());
        }

        // compute the paths towards the destination on the reversed graph. The predecessor in
        // the reversed graph is the next hop in the original graph.
        let mut reversed: TimeGraph = self.graph.clone();
        reversed.reverse();

        let mut best_paths: HashMap<(Phase, NodeId), (Vec<TVertex>, EdgeCost)> = HashMap::new();

        for dest_phase in 0..model.num_phases() {
            let dest = self.node_vertex(dest_phase, egress);
            let (costs, next_hops) =
                bellman_ford(&reversed, dest).map_err(|_| GraphError::NegativeCycle)?;

            for phase in 0..model.num_phases() {
                for node in model.nodes() {
                    let source = self.node_vertex(phase, node);
                    let cost = costs[source.index()];
                    if cost.is_infinite() {
                        continue;
                    }
                    // only replace the path if it is strictly better
                    match best_paths.get(&(phase, node)) {
                        Some((_, best)) if *best <= cost => continue,
                        _ => {}
                    }
                    let path = self.walk_path(source, dest, &next_hops)?;
                    best_paths.insert((phase, node), (path, cost));
                }
            }
        }

        // every node which is able to send must reach the egress node
        for phase in 0..model.num_phases() {
            for node in model.nodes() {
                if best_paths.contains_key(&(phase, node)) {
                    continue;
                }
                if node == egress || !model.ports_of_node(node).is_empty() {
                    return Err(GraphError::Unreachable { phase, node, egress });
                }
                trace!("Node {} owns no port, skipping it as a source", node);
            }
        }

        Ok(best_paths.into_iter().map(|(k, (path, _))| (k, path)).collect())
    }

    /// Follow the next hops from `source` to `dest`, and translate the vertices back to the
    /// domain model. The last vertex must be the node-vertex of the egress.
    fn walk_path(
        &self,
        source: VertexId,
        dest: VertexId,
        next_hops: &[Option<VertexId>],
    ) -> Result<Vec<TVertex>, GraphError> {
        let mut path: Vec<TVertex> = vec![self.vertex(source)];
        let mut current = source;
        while current != dest {
            current = match next_hops[current.index()] {
                Some(nh) => nh,
                None => break,
            };
            path.push(self.vertex(current));
            if path.len() > self.graph.node_count() {
                break;
            }
        }

        let expected = self.vertex(dest);
        let last = self.vertex(current);
        if last.node() == expected.node() {
            Ok(path)
        } else {
            Err(GraphError::WrongDestination { found: last, expected })
        }
    }
}
