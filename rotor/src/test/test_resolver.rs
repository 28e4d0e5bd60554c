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

//! Test the shortest-path resolver on the time-expanded graph.

use crate::example_models::*;
use crate::model::{ConfigError, Model, NodeId};
use crate::tgraph::*;

use assert_approx_eq::assert_approx_eq;

/// Number of real transmissions (port to node) on the path
fn num_hops(path: &[TVertex]) -> usize {
    path.iter().skip(1).filter(|v| !v.is_port()).count()
}

/// Sum of the edge weights along the path
fn path_cost(g: &ConnectivityGraph, path: &[TVertex]) -> EdgeCost {
    let index = |v: &TVertex| match v {
        TVertex::Node { phase, node } => g.node_vertex(*phase, *node),
        TVertex::Port { phase, port } => g.port_vertex(*phase, *port),
    };
    path.windows(2)
        .map(|w| {
            let e = g.graph().find_edge(index(&w[0]), index(&w[1])).unwrap();
            g.graph()[e]
        })
        .sum()
}

#[test]
fn test_ring_paths() {
    let model = RingModel::model(3).unwrap();
    let mut g = ConnectivityGraph::build(&model, &EdgeConfig::must_hop()).unwrap();
    let paths = g.shortest_paths(2).unwrap().clone();

    assert_eq!(paths.len(), 3 * 3);
    assert_eq!(
        paths[&(0, 0)],
        vec![
            TVertex::Node { phase: 0, node: 0 },
            TVertex::Port { phase: 1, port: 0 },
            TVertex::Node { phase: 1, node: 1 },
            TVertex::Port { phase: 2, port: 1 },
            TVertex::Node { phase: 2, node: 2 },
        ]
    );
    for phase in 0..3 {
        assert_eq!(paths[&(phase, 2)], vec![TVertex::Node { phase, node: 2 }]);
        assert_eq!(num_hops(&paths[&(phase, 1)]), 1);
        assert_eq!(num_hops(&paths[&(phase, 0)]), 2);
    }
}

#[test]
fn test_paths_end_at_egress() {
    let model = RotatingModel::model(6).unwrap();
    let mut g = ConnectivityGraph::build(&model, &EdgeConfig::may_wait(1.0)).unwrap();
    for egress in model.nodes() {
        let paths = g.shortest_paths(egress).unwrap().clone();
        assert_eq!(paths.len(), model.num_phases() * model.num_nodes());
        for ((phase, node), path) in paths.iter() {
            assert_eq!(path[0], TVertex::Node { phase: *phase, node: *node });
            assert_eq!(path.last().unwrap().node(), Some(egress));
            // only the last vertex may be the egress
            assert!(path[..path.len() - 1].iter().all(|v| v.node() != Some(egress)));
            // the path is connected
            assert!(path_cost(&g, path) >= 0.0);
        }
    }
}

#[test]
fn test_cached_paths() {
    let model = CompleteModel::model(4).unwrap();
    let mut g = ConnectivityGraph::build(&model, &EdgeConfig::must_hop()).unwrap();
    let first = g.shortest_paths(1).unwrap().clone();
    let second = g.shortest_paths(1).unwrap().clone();
    assert_eq!(first, second);

    let flow_paths = g.paths_for_flows().unwrap();
    assert_eq!(flow_paths.len(), model.num_flows());
    for (flow, paths) in model.flows().iter().zip(flow_paths.iter()) {
        assert_eq!(paths, g.shortest_paths(flow.egress).unwrap());
    }

    // after adding the waiting edges, every path still has a single hop
    g.add_port_to_same_future_port(EdgeFamily::port_to_port(1.0)).unwrap();
    for ((_, node), path) in g.shortest_paths(1).unwrap().iter() {
        assert_eq!(num_hops(path), if *node == 1 { 0 } else { 1 });
    }
}

#[test]
fn test_minimize_hops_never_more_hops() {
    let model = RotatingModel::model(6).unwrap();
    let mut must_hop = ConnectivityGraph::build(&model, &EdgeConfig::must_hop()).unwrap();
    let mut prefer_wait =
        ConnectivityGraph::build(&model, &EdgeConfig::prefer_wait(1_000_000.0)).unwrap();

    for egress in model.nodes() {
        let fewest = must_hop.shortest_paths(egress).unwrap().clone();
        let minimized = prefer_wait.shortest_paths(egress).unwrap().clone();
        for (key, path) in minimized.iter() {
            assert!(num_hops(path) <= num_hops(&fewest[key]));
            assert_approx_eq!(
                path_cost(&prefer_wait, path),
                num_hops(path) as EdgeCost * 1_000_000.0
            );
        }
    }
}

#[test]
fn test_fastest_waits_at_port() {
    let model = waiting_model();
    let mut g = ConnectivityGraph::build(&model, &EdgeConfig::may_wait(1.0)).unwrap();
    let paths = g.shortest_paths(2).unwrap();
    assert_eq!(
        paths[&(0, 0)],
        vec![
            TVertex::Node { phase: 0, node: 0 },
            TVertex::Port { phase: 1, port: 0 },
            TVertex::Port { phase: 2, port: 0 },
            TVertex::Node { phase: 2, node: 2 },
        ]
    );
    let path = paths[&(0, 0)].clone();
    assert_approx_eq!(path_cost(&g, &path), 2.0);
}

#[test]
fn test_unreachable() {
    // node 0 and 1 are connected to each other, node 2 only sends to node 0
    let mut model = crate::model::build_flowless_model(3, 1, 10, 1);
    model.set_topology(vec![vec![1, 0, 0]]).unwrap();
    let mut g = ConnectivityGraph::build(&model, &EdgeConfig::may_wait(1.0)).unwrap();
    assert_eq!(g.shortest_paths(2), Err(GraphError::Unreachable { phase: 0, node: 0, egress: 2 }));
    assert!(g.shortest_paths(0).is_ok());
}

#[test]
fn test_unknown_egress() {
    let model = RingModel::model(3).unwrap();
    let mut g = ConnectivityGraph::build(&model, &EdgeConfig::must_hop()).unwrap();
    assert_eq!(g.shortest_paths(3), Err(GraphError::ConfigError(ConfigError::UnknownNode(3))));
}

#[test]
fn test_portless_node() {
    // node 2 owns no port
    let mut model = Model::new();
    let nodes: Vec<NodeId> = (0..3).map(|_| model.add_node()).collect();
    model.add_port(nodes[0], 10, 1).unwrap();
    model.add_port(nodes[1], 10, 1).unwrap();
    model.set_topology(vec![vec![1, 2], vec![1, 0]]).unwrap();

    let mut g = ConnectivityGraph::build(&model, &EdgeConfig::may_wait(1.0)).unwrap();
    let paths = g.shortest_paths(1).unwrap();
    assert_eq!(paths.len(), 2 * 2);
    assert!(!paths.contains_key(&(0, 2)));
    assert!(!paths.contains_key(&(1, 2)));

    // the portless node can still be reached
    let paths = g.shortest_paths(2).unwrap();
    assert_eq!(paths.len(), 2 * 3);
}

/// Node 0 is connected to node 1 in phase 0 and 1, and to node 2 in phase 2. Nodes 1 and 2 are
/// always connected to node 0.
pub(super) fn waiting_model() -> Model {
    let mut model = crate::model::build_flowless_model(3, 1, 10, 1);
    model.set_topology(vec![vec![1, 0, 0], vec![1, 0, 0], vec![2, 0, 0]]).unwrap();
    model
}
