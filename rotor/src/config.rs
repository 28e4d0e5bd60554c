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

//! # Experiment Configuration
//!
//! An experiment is described by a JSON file with the sections `model`, `topology`, `flow`,
//! `schedule` and `random`:
//!
//! ```json
//! {
//!     "model": { "num_nodes": 8, "num_switches": 2, "capacity": 10, "bandwidth": 1 },
//!     "topology": { "type": "rotating", "interval": 1, "start_offset": 1 },
//!     "flow": { "type": "uniform", "num_flows": 4, "min_demand": 1, "max_demand": 5 },
//!     "schedule": { "policy": "fastest-may-wait", "wait_cost": 0.5 },
//!     "random": { "seed": 42 }
//! }
//! ```
//!
//! The sections `schedule` and `random` are optional. Without them, the policy
//! `fewest-hops-must-hop` and the seed `123456` are used.

use crate::model::{
    build_flowless_model, ConfigError, FlowBuilder, GravityFlowBuilder, Model, RotatingSwitches,
    UniformFlowBuilder,
};
use crate::policies::{Policy, DEFAULT_HOPS, DEFAULT_HOP_COST, DEFAULT_WAIT_COST};
use crate::tgraph::EdgeCost;
use crate::Error;

use log::*;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Seed used if the configuration does not specify one
pub const DEFAULT_SEED: u64 = 123456;

/// Full description of an experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Nodes and ports
    pub model: ModelConfig,
    /// Generator of the cyclic topology
    pub topology: TopologyConfig,
    /// Generator of the flows
    pub flow: FlowConfig,
    /// Scheduling policy
    #[serde(default)]
    pub schedule: ScheduleConfig,
    /// Random source
    #[serde(default)]
    pub random: RandomConfig,
}

/// Nodes and ports of the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Number of nodes
    pub num_nodes: usize,
    /// Number of switches, which is the number of ports per node
    pub num_switches: usize,
    /// Capacity of every port
    pub capacity: u64,
    /// Bandwidth of every port
    pub bandwidth: u64,
}

/// Topology generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TopologyConfig {
    /// Rotating switches, see [`RotatingSwitches`]
    Rotating {
        /// Difference of the initial offsets of two consecutive switches
        interval: usize,
        /// Initial offset of the first switch
        start_offset: usize,
        /// Explicit initial offsets, overriding `interval` and `start_offset`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        offsets: Option<Vec<usize>>,
    },
}

/// Flow generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlowConfig {
    /// See [`UniformFlowBuilder`]
    Uniform {
        /// Number of flows
        num_flows: usize,
        /// Minimum demand
        min_demand: u64,
        /// Maximum demand
        max_demand: u64,
    },
    /// See [`GravityFlowBuilder`]
    Gravity {
        /// Percentage of node pairs which become flows
        connection_percentage: f64,
        /// Minimum demand
        min_demand: u64,
        /// Maximum demand
        max_demand: u64,
        /// Exponent applied to the send and receive mass
        power: f64,
    },
}

/// Policy and its parameters. Parameters which do not apply to the chosen policy are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Name of the policy, see [`Policy::NAMES`]
    pub policy: String,
    /// Cost of a hop for `minimize-hops-prefer-wait`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hop_cost: Option<EdgeCost>,
    /// Cost of waiting one phase for `fastest-may-wait`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_cost: Option<EdgeCost>,
    /// Number of hops for `exactly-two-hops-may-wait`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hops: Option<usize>,
    /// Collapse waiting at a port into a single decision
    #[serde(default = "default_collapse_waits")]
    pub collapse_waits: bool,
}

fn default_collapse_waits() -> bool {
    true
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            policy: Policy::default().name().to_string(),
            hop_cost: None,
            wait_cost: None,
            hops: None,
            collapse_waits: true,
        }
    }
}

impl ScheduleConfig {
    /// Resolve the policy name and its parameters, and validate them.
    pub fn policy(&self) -> Result<Policy, ConfigError> {
        let policy = match self.policy.parse::<Policy>()? {
            Policy::FastestMayWait { .. } => {
                Policy::FastestMayWait { wait_cost: self.wait_cost.unwrap_or(DEFAULT_WAIT_COST) }
            }
            Policy::MinimizeHopsPreferWait { .. } => Policy::MinimizeHopsPreferWait {
                hop_cost: self.hop_cost.unwrap_or(DEFAULT_HOP_COST),
            },
            Policy::ExactlyHopsMayWait { .. } => {
                Policy::ExactlyHopsMayWait { hops: self.hops.unwrap_or(DEFAULT_HOPS) }
            }
            p => p,
        };
        policy.validate()?;
        Ok(policy)
    }
}

/// Random source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomConfig {
    /// Seed of the random number generator
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self { seed: DEFAULT_SEED }
    }
}

impl ExperimentConfig {
    /// Read the configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let config: Self = serde_json::from_reader(reader)?;
        debug!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Parse the configuration from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(s)?)
    }

    /// Build the model: create all nodes and ports, generate the topology and then the flows.
    /// The flows are drawn from `rng`.
    pub fn build_model<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Model, ConfigError> {
        let m = &self.model;
        let mut model = build_flowless_model(m.num_nodes, m.num_switches, m.capacity, m.bandwidth);

        let topology = match &self.topology {
            TopologyConfig::Rotating { offsets: Some(offsets), .. } => {
                RotatingSwitches::with_offsets(m.num_switches, offsets.clone())?
            }
            TopologyConfig::Rotating { interval, start_offset, offsets: None } => {
                RotatingSwitches::new(m.num_switches, *interval, *start_offset)
            }
        }
        .get_topology(m.num_nodes)?;
        model.set_topology(topology)?;

        let flows = match &self.flow {
            FlowConfig::Uniform { num_flows, min_demand, max_demand } => {
                UniformFlowBuilder::new(*num_flows, *min_demand, *max_demand)?
                    .make_flows(m.num_nodes, rng)?
            }
            FlowConfig::Gravity { connection_percentage, min_demand, max_demand, power } => {
                GravityFlowBuilder::new(*connection_percentage, *min_demand, *max_demand, *power)?
                    .make_flows(m.num_nodes, rng)?
            }
        };
        for flow in flows {
            model.add_flow(flow)?;
        }

        info!(
            "Model with {} nodes, {} ports, {} phases and {} flows",
            model.num_nodes(),
            model.num_ports(),
            model.num_phases(),
            model.num_flows()
        );
        Ok(model)
    }

    /// Resolve the policy, see [`ScheduleConfig::policy`].
    pub fn policy(&self) -> Result<Policy, ConfigError> {
        self.schedule.policy()
    }

    /// Seed of the random source
    pub fn seed(&self) -> u64 {
        self.random.seed
    }
}
