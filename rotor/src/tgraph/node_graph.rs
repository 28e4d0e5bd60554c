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

//! # Node Graph
//!
//! Graph on the nodes of the model only (no phases, no ports). Node `a` is connected to node `b`
//! if any port of `a` is connected to `b` in any phase.

use crate::model::{Model, NodeId};

use petgraph::prelude::*;

type IndexType = u32;

/// Node graph, emulating the connectivity of all phases at once.
#[derive(Debug, Clone)]
pub struct NodeGraph {
    graph: DiGraph<NodeId, (), IndexType>,
}

impl NodeGraph {
    /// Build the node graph of the model. Multiple links between the same pair of nodes (in
    /// different phases, or using different ports) result in a single edge.
    pub fn from_model(model: &Model) -> Self {
        let mut graph = DiGraph::with_capacity(model.num_nodes(), 0);
        for node in model.nodes() {
            graph.add_node(node);
        }
        for targets in model.topology() {
            for (port, target) in targets.iter().enumerate() {
                let owner = model.ports()[port].owner;
                graph.update_edge(NodeIndex::new(owner), NodeIndex::new(*target), ());
            }
        }
        Self { graph }
    }

    /// Returns all direct successors of the node, in increasing order.
    pub fn neighbors(&self, node: NodeId) -> Vec<NodeId> {
        if node >= self.graph.node_count() {
            return Vec::new();
        }
        let mut n =
            self.graph.neighbors(NodeIndex::new(node)).map(|x| x.index()).collect::<Vec<_>>();
        n.sort_unstable();
        n.dedup();
        n
    }

    /// Returns true if the two nodes are directly connected in any phase.
    pub fn contains_edge(&self, from: NodeId, to: NodeId) -> bool {
        from < self.graph.node_count()
            && to < self.graph.node_count()
            && self.graph.contains_edge(NodeIndex::new(from), NodeIndex::new(to))
    }

    /// Returns an iterator over all simple paths from `from` to `to` with exactly `hops` edges.
    /// Each path contains `hops + 1` nodes, starting with `from` and ending with `to`. The paths
    /// are enumerated in depth-first order, visiting the successors in increasing order.
    pub fn simple_paths(&self, from: NodeId, to: NodeId, hops: usize) -> SimplePaths<'_> {
        let mut options = self.neighbors(from);
        options.reverse();
        SimplePaths { graph: self, to, hops, options_stack: vec![options], path_stack: vec![from] }
    }
}

/// Iterator over all simple paths of a fixed length. See [`NodeGraph::simple_paths`].
#[derive(Debug)]
pub struct SimplePaths<'a> {
    graph: &'a NodeGraph,
    to: NodeId,
    hops: usize,
    options_stack: Vec<Vec<NodeId>>,
    path_stack: Vec<NodeId>,
}

impl<'a> Iterator for SimplePaths<'a> {
    type Item = Vec<NodeId>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.options_stack.last_mut()?;
            match frame.pop() {
                Some(next) if self.path_stack.contains(&next) => {
                    // loop detected, the option is not valid
                }
                Some(next) if next == self.to => {
                    if self.path_stack.len() == self.hops {
                        let mut result = self.path_stack.clone();
                        result.push(next);
                        return Some(result);
                    }
                }
                Some(next) => {
                    if self.path_stack.len() < self.hops {
                        self.path_stack.push(next);
                        let mut options = self.graph.neighbors(next);
                        // pop from the back, such that successors are visited in increasing order
                        options.reverse();
                        self.options_stack.push(options);
                    }
                }
                None => {
                    self.options_stack.pop();
                    self.path_stack.pop();
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::build_flowless_model;

    /// Node 0 -> 1, 0 -> 2, 1 -> 2, 2 -> 3, 1 -> 3, over two phases
    fn get_test_model() -> Model {
        let mut model = build_flowless_model(4, 1, 10, 1);
        model.set_topology(vec![vec![1, 2, 3, 0], vec![2, 3, 3, 0]]).unwrap();
        model
    }

    #[test]
    fn test_edges() {
        let g = NodeGraph::from_model(&get_test_model());
        assert_eq!(g.neighbors(0), vec![1, 2]);
        assert_eq!(g.neighbors(1), vec![2, 3]);
        assert_eq!(g.neighbors(2), vec![3]);
        assert_eq!(g.neighbors(3), vec![0]);
        assert!(g.contains_edge(0, 1));
        assert!(!g.contains_edge(1, 0));
        assert!(g.neighbors(4).is_empty());
    }

    #[test]
    fn test_simple_paths() {
        let g = NodeGraph::from_model(&get_test_model());
        assert_eq!(g.simple_paths(0, 3, 2).collect::<Vec<_>>(), vec![vec![0, 1, 3], vec![0, 2, 3]]);
        assert_eq!(g.simple_paths(0, 3, 3).collect::<Vec<_>>(), vec![vec![0, 1, 2, 3]]);
        assert_eq!(g.simple_paths(0, 2, 1).collect::<Vec<_>>(), vec![vec![0, 2]]);
        assert!(g.simple_paths(0, 3, 1).next().is_none());
        assert!(g.simple_paths(0, 3, 4).next().is_none());
    }

    #[test]
    fn test_no_path_to_self() {
        let g = NodeGraph::from_model(&get_test_model());
        assert!(g.simple_paths(0, 0, 2).next().is_none());
        assert!(g.simple_paths(0, 0, 4).next().is_none());
    }
}
