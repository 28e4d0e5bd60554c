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

#![deny(missing_docs)]

//! # Rotor: Forwarding Schedules for Rotating Switch Networks
//! This is a library for computing forwarding schedules in networks whose topology changes in
//! a cyclic pattern of discrete phases. Each node owns several ports, and in every phase, each
//! port is connected to exactly one other node. Given a set of flows, the library computes for
//! every phase, every node and every flow, which port to use, and in which phase the packet
//! actually departs.
//!
//! ## Structure
//!
//! - **[`Model`](model)**: Static description of the nodes, ports, the cyclic topology and the
//!   flows. The module also contains generators for
//!   [rotating topologies](model::RotatingSwitches) and [random flows](model::FlowBuilder).
//!
//! - **[`Time-Expanded Graph`](tgraph)**: Unrolls the phases into a static graph, resolves the
//!   shortest paths towards every egress node, and translates these paths into forwarding
//!   decisions.
//!
//! - **[`Policies`](policies)**: The four scheduling policies. All of them take a model and a
//!   random source, and produce a [`Schedule`](schedule::Schedule).
//!
//! - **[`Schedule`](schedule)**: The result, including the structural checks
//!   [`is_complete`](schedule::Schedule::is_complete) and
//!   [`all_hop_immediately`](schedule::Schedule::all_hop_immediately).
//!
//! - **[`Config`](config)**: Description of an experiment as a JSON file.
//!
//! - **[`ExampleModels`](example_models)**: Collection of prepared models to test the policies.
//!
//! ## Usage
//!
//! ```
//! use rotor::model::{build_flowless_model, Flow};
//! use rotor::policies::Policy;
//! use rotor::Error;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! fn main() -> Result<(), Error> {
//!     // three nodes on a ring, each with a single port
//!     let mut model = build_flowless_model(3, 1, 10, 1);
//!     model.set_topology(vec![vec![1, 2, 0]; 3])?;
//!     model.add_flow(Flow::new(0, 2, 5))?;
//!
//!     let mut rng = StdRng::seed_from_u64(42);
//!     let schedule = Policy::FewestHopsMustHop.make_schedule(&model, &mut rng)?;
//!
//!     // node 0 sends on port 0 in phase 1, reaching node 1
//!     let choice = schedule.lookup(0, 0, 0)?;
//!     assert_eq!((choice.port, choice.phase), (0, 1));
//!     assert!(schedule.is_complete());
//!     assert!(schedule.all_hop_immediately());
//!
//!     Ok(())
//! }
//! ```

// test modules
pub mod example_models;
mod test;

pub mod config;
mod error;
pub mod model;
pub mod policies;
pub mod schedule;
pub mod tgraph;

pub use error::Error;
