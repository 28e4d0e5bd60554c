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

//! # Flow Builders
//!
//! Random flow generators. All of them draw exclusively from the random source passed in, such
//! that a fixed seed reproduces the same set of flows.

use super::types::*;

use itertools::Itertools;
use log::*;
use rand::distributions::Uniform;
use rand::seq::index::sample;
use rand::Rng;

/// Interface for all flow generators
pub trait FlowBuilder {
    /// Generate the flows for a model with `num_nodes` nodes.
    fn make_flows<R: Rng + ?Sized>(
        &self,
        num_nodes: usize,
        rng: &mut R,
    ) -> Result<Vec<Flow>, ConfigError>;
}

/// # Uniform Flows
///
/// Generates `num_flows` flows. For each of them, the ingress and egress are two distinct nodes
/// chosen uniformly at random, and the amount is drawn uniformly from
/// `[min_demand, max_demand]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformFlowBuilder {
    num_flows: usize,
    min_demand: u64,
    max_demand: u64,
}

impl UniformFlowBuilder {
    /// Create a new uniform flow builder. Fails if `max_demand < min_demand`.
    pub fn new(num_flows: usize, min_demand: u64, max_demand: u64) -> Result<Self, ConfigError> {
        if max_demand < min_demand {
            return Err(ConfigError::InvalidDemandRange { min: min_demand, max: max_demand });
        }
        Ok(Self { num_flows, min_demand, max_demand })
    }
}

impl FlowBuilder for UniformFlowBuilder {
    fn make_flows<R: Rng + ?Sized>(
        &self,
        num_nodes: usize,
        rng: &mut R,
    ) -> Result<Vec<Flow>, ConfigError> {
        if num_nodes < 2 {
            return Err(ConfigError::TooFewNodes { required: 2, found: num_nodes });
        }
        let demand = Uniform::new_inclusive(self.min_demand, self.max_demand);
        let flows = (0..self.num_flows)
            .map(|_| {
                let amount = rng.sample(demand);
                let pair = sample(&mut *rng, num_nodes, 2);
                Flow::new(pair.index(0), pair.index(1), amount)
            })
            .collect::<Vec<_>>();
        debug!("Generated {} uniform flows", flows.len());
        Ok(flows)
    }
}

/// # Gravity Flows
///
/// Every node is assigned a random sender mass and a random receiver mass. Then,
/// `connection_percentage` percent of all ordered node pairs are chosen at random, and each of
/// them becomes a flow with amount `min + send^power * recv^power * (max - min)`.
#[derive(Debug, Clone, PartialEq)]
pub struct GravityFlowBuilder {
    connection_percentage: f64,
    min_demand: u64,
    max_demand: u64,
    power: f64,
}

impl GravityFlowBuilder {
    /// Create a new gravity flow builder.
    pub fn new(
        connection_percentage: f64,
        min_demand: u64,
        max_demand: u64,
        power: f64,
    ) -> Result<Self, ConfigError> {
        if !(0.0..=100.0).contains(&connection_percentage) {
            return Err(ConfigError::InvalidConnectionPercentage(connection_percentage));
        }
        if max_demand < min_demand {
            return Err(ConfigError::InvalidDemandRange { min: min_demand, max: max_demand });
        }
        Ok(Self { connection_percentage, min_demand, max_demand, power })
    }
}

impl FlowBuilder for GravityFlowBuilder {
    fn make_flows<R: Rng + ?Sized>(
        &self,
        num_nodes: usize,
        rng: &mut R,
    ) -> Result<Vec<Flow>, ConfigError> {
        let delta = (self.max_demand - self.min_demand) as f64;
        let send_mass = (0..num_nodes).map(|_| rng.gen::<f64>()).collect::<Vec<_>>();
        let recv_mass = (0..num_nodes).map(|_| rng.gen::<f64>()).collect::<Vec<_>>();

        let pairs = (0..num_nodes).permutations(2).collect::<Vec<_>>();
        let num_to_use =
            ((pairs.len() as f64) * self.connection_percentage * 0.01).round() as usize;

        let flows = sample(rng, pairs.len(), num_to_use.min(pairs.len()))
            .into_iter()
            .map(|i| {
                let (ingress, egress) = (pairs[i][0], pairs[i][1]);
                let scale =
                    send_mass[ingress].powf(self.power) * recv_mass[egress].powf(self.power);
                let amount = (self.min_demand as f64 + scale * delta).round() as u64;
                Flow::new(ingress, egress, amount)
            })
            .collect::<Vec<_>>();
        debug!("Generated {} gravity flows out of {} node pairs", flows.len(), pairs.len());
        Ok(flows)
    }
}
