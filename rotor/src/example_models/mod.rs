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

//! Models for testing

use crate::model::{ConfigError, Model};

mod ring;
pub use ring::RingModel;

mod complete;
pub use complete::CompleteModel;

mod rotating;
pub use rotating::RotatingModel;

/// Trait for easier access to example models.
pub trait ExampleModel {
    /// Get the model with `num_nodes` nodes, including the topology and the flows.
    fn model(num_nodes: usize) -> Result<Model, ConfigError>;
}
