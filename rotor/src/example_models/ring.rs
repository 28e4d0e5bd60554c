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

//! # Static Ring

use super::ExampleModel;
use crate::model::{build_flowless_model, ConfigError, Flow, Model};

/// # Static Ring
///
/// Every node owns a single port (capacity 10, bandwidth 1), which is connected to the next node
/// on the ring in every phase. The topology repeats the same matching for `num_nodes` phases.
/// The only flow sends 5 units from node 0 to the last node.
///
/// ```text
/// 0 --> 1 --> 2 --> ... --> n-1
/// ^                          |
/// +--------------------------+
/// ```
#[derive(Debug)]
pub struct RingModel {}

impl ExampleModel for RingModel {
    fn model(num_nodes: usize) -> Result<Model, ConfigError> {
        if num_nodes < 2 {
            return Err(ConfigError::TooFewNodes { required: 2, found: num_nodes });
        }
        let mut model = build_flowless_model(num_nodes, 1, 10, 1);
        let ring = model.nodes().map(|n| (n + 1) % num_nodes).collect::<Vec<_>>();
        model.set_topology(vec![ring; num_nodes])?;
        model.add_flow(Flow::new(0, num_nodes - 1, 5))?;
        Ok(model)
    }
}
