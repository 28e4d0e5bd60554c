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

//! # Rotating Switches

use super::ExampleModel;
use crate::model::{build_flowless_model, ConfigError, Flow, Model, RotatingSwitches};

/// # Rotating Model
///
/// Every node owns two ports, each connected to a rotating switch with initial offsets 1 and 2
/// (see [`RotatingSwitches`]). Thus, every node is connected to two other nodes in every phase,
/// and the topology has `num_nodes - 1` phases. Every node `n` sends 3 units to the node on the
/// opposite side of the ring, `n + num_nodes / 2`.
#[derive(Debug)]
pub struct RotatingModel {}

impl ExampleModel for RotatingModel {
    fn model(num_nodes: usize) -> Result<Model, ConfigError> {
        let switches = RotatingSwitches::new(2, 1, 1);
        let topology = switches.get_topology(num_nodes)?;
        let mut model = build_flowless_model(num_nodes, switches.num_switches(), 10, 1);
        model.set_topology(topology)?;
        for ingress in model.nodes() {
            let egress = (ingress + num_nodes / 2) % num_nodes;
            if egress != ingress {
                model.add_flow(Flow::new(ingress, egress, 3))?;
            }
        }
        Ok(model)
    }
}
