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

//! # Complete Rotor

use super::ExampleModel;
use crate::model::{build_flowless_model, ConfigError, Flow, Model};

/// # Complete Rotor
///
/// Every node owns `num_nodes - 1` ports, such that it is directly connected to every other node
/// in every phase. In phase `p`, port `i` of node `n` is connected to node
/// `n + 1 + (i + p) % (num_nodes - 1)`, so the assignment of ports rotates, and the topology has
/// `num_nodes - 1` phases. There is one flow (with demand 1) for every ordered pair of nodes.
#[derive(Debug)]
pub struct CompleteModel {}

impl ExampleModel for CompleteModel {
    fn model(num_nodes: usize) -> Result<Model, ConfigError> {
        if num_nodes < 2 {
            return Err(ConfigError::TooFewNodes { required: 2, found: num_nodes });
        }
        let k = num_nodes - 1;
        let mut model = build_flowless_model(num_nodes, k, 10, 1);
        let topology = (0..k)
            .map(|p| {
                model
                    .nodes()
                    .flat_map(|n| (0..k).map(move |i| (n + 1 + (i + p) % k) % num_nodes))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        model.set_topology(topology)?;
        for ingress in 0..num_nodes {
            for egress in (0..num_nodes).filter(|e| *e != ingress) {
                model.add_flow(Flow::new(ingress, egress, 1))?;
            }
        }
        Ok(model)
    }
}
