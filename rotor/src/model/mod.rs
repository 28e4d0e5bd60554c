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

#![deny(missing_docs, missing_debug_implementations)]

//! # Model
//!
//! Static description of a rotor switching network: nodes, ports (with capacity and bandwidth),
//! the cyclic topology and the flow demands. The model is built once, and is only read by the
//! policies computing the forwarding schedule.
//!
//! ```rust
//! use rotor::model::{build_flowless_model, Flow, RotatingSwitches};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 4 nodes, each with a single port of capacity 10 and bandwidth 1
//!     let mut model = build_flowless_model(4, 1, 10, 1);
//!     model.add_flow(Flow::new(0, 2, 5))?;
//!     model.set_topology(RotatingSwitches::new(1, 1, 1).get_topology(4)?)?;
//!
//!     assert_eq!(model.num_phases(), 3);
//!     assert_eq!(model.target(0, 0), 1);
//!     assert_eq!(model.target(1, 0), 2);
//!     assert_eq!(model.phase_add(2, 1), 0);
//!
//!     Ok(())
//! }
//! ```

mod builder;
mod flows;
mod network;
mod types;

pub use builder::{build_flowless_model, RotatingSwitches};
pub use flows::{FlowBuilder, GravityFlowBuilder, UniformFlowBuilder};
pub use network::Model;
pub use types::{ConfigError, Flow, FlowId, NodeId, Phase, Port, PortId, Topology};
