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

//! # Policies
//!
//! This module contains the scheduling policies. Each policy is a pure function from a
//! [`Model`] and a random source to a [`Schedule`]. Three of them configure the edges of the
//! time-expanded graph differently, and share the same pipeline:
//!
//! 1. Build a fresh [`ConnectivityGraph`] with the policy-specific [`EdgeConfig`].
//! 2. Resolve the shortest paths towards the egress node of every flow (cached per egress).
//! 3. Translate the paths into forwarding decisions, and assemble them into a schedule.
//!
//! The fourth policy, [`Policy::ExactlyHopsMayWait`], does not use the time-expanded graph. It
//! picks a random simple path with a fixed number of hops on the
//! [`NodeGraph`](crate::tgraph::NodeGraph) and expands each hop into the next phase with a
//! connecting port.
//!
//! | Policy                      | Port to Node | Node to Port | Port to Port |
//! |-----------------------------|--------------|--------------|--------------|
//! | `fewest-hops-must-hop`      | 1            | 0            | disabled     |
//! | `fastest-may-wait`          | 1            | 0            | `wait_cost`  |
//! | `minimize-hops-prefer-wait` | `hop_cost`   | 0            | 0            |
//!
//! Randomness is only drawn from the random source passed to [`Policy::make_schedule`]. Hence, a
//! fixed seed always reproduces the same schedule.

mod exact_hops;

use crate::model::{ConfigError, Model};
use crate::schedule::Schedule;
use crate::tgraph::{path_to_ports, ports_to_schedule, ConnectivityGraph, EdgeConfig, EdgeCost};
use crate::Error;

use log::*;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Default cost of waiting one phase at a port for [`Policy::FastestMayWait`]
pub const DEFAULT_WAIT_COST: EdgeCost = 1.0;
/// Default cost of a hop for [`Policy::MinimizeHopsPreferWait`]
pub const DEFAULT_HOP_COST: EdgeCost = 1_000_000.0;
/// Default number of hops for [`Policy::ExactlyHopsMayWait`]
pub const DEFAULT_HOPS: usize = 2;

/// Scheduling policy, including its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Policy {
    /// Packets must be sent in the next phase. Minimizes the number of hops.
    FewestHopsMustHop,
    /// Packets may wait at a port for a future link. Minimizes the total cost, where each hop
    /// costs 1, and each phase waiting at a port costs `wait_cost`.
    FastestMayWait {
        /// Cost of waiting a single phase at a port
        wait_cost: EdgeCost,
    },
    /// Waiting is free, but every hop costs `hop_cost`. With a large `hop_cost`, this minimizes
    /// the number of hops, while allowing to wait arbitrarily long.
    MinimizeHopsPreferWait {
        /// Cost of a single hop
        hop_cost: EdgeCost,
    },
    /// Choose a random simple path with exactly `hops` hops for every flow, and wait at each node
    /// until the next node on the path is connected.
    ExactlyHopsMayWait {
        /// Number of hops of every path
        hops: usize,
    },
}

impl Policy {
    /// Names of all policies, as accepted by [`Policy::from_str`].
    pub const NAMES: [&'static str; 4] = [
        "fewest-hops-must-hop",
        "fastest-may-wait",
        "minimize-hops-prefer-wait",
        "exactly-two-hops-may-wait",
    ];

    /// Name of the policy
    pub fn name(&self) -> &'static str {
        match self {
            Self::FewestHopsMustHop => Self::NAMES[0],
            Self::FastestMayWait { .. } => Self::NAMES[1],
            Self::MinimizeHopsPreferWait { .. } => Self::NAMES[2],
            Self::ExactlyHopsMayWait { .. } => Self::NAMES[3],
        }
    }

    /// Check the parameters of the policy. Costs must be finite and non-negative, and the number
    /// of hops must be at least 1.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::FewestHopsMustHop => Ok(()),
            Self::FastestMayWait { wait_cost: cost }
            | Self::MinimizeHopsPreferWait { hop_cost: cost } => {
                if cost.is_finite() && *cost >= 0.0 {
                    Ok(())
                } else {
                    Err(ConfigError::InvalidCost(*cost))
                }
            }
            Self::ExactlyHopsMayWait { hops: 0 } => Err(ConfigError::InvalidHopCount),
            Self::ExactlyHopsMayWait { .. } => Ok(()),
        }
    }

    /// Edge configuration of the time-expanded graph. Returns `None` for
    /// [`Policy::ExactlyHopsMayWait`], which does not use the time-expanded graph.
    pub fn edge_config(&self) -> Option<EdgeConfig> {
        match self {
            Self::FewestHopsMustHop => Some(EdgeConfig::must_hop()),
            Self::FastestMayWait { wait_cost } => Some(EdgeConfig::may_wait(*wait_cost)),
            Self::MinimizeHopsPreferWait { hop_cost } => Some(EdgeConfig::prefer_wait(*hop_cost)),
            Self::ExactlyHopsMayWait { .. } => None,
        }
    }

    /// Compute the schedule for the model, collapsing waits at a port into a single decision.
    pub fn make_schedule<R: Rng + ?Sized>(
        &self,
        model: &Model,
        rng: &mut R,
    ) -> Result<Schedule, Error> {
        self.make_schedule_with(model, rng, true)
    }

    /// Compute the schedule for the model. If `collapse_waits` is false, the departure phase of
    /// every decision is the phase of the first port on the path, instead of the phase in which
    /// the packet actually leaves the port.
    pub fn make_schedule_with<R: Rng + ?Sized>(
        &self,
        model: &Model,
        rng: &mut R,
        collapse_waits: bool,
    ) -> Result<Schedule, Error> {
        self.validate()?;
        model.validate()?;
        info!("Computing schedule with policy {}", self);

        let config = match self {
            Self::ExactlyHopsMayWait { hops } => {
                return exact_hops::exact_hops_schedule(model, *hops, rng)
            }
            Self::FewestHopsMustHop => EdgeConfig::must_hop(),
            Self::FastestMayWait { wait_cost } => EdgeConfig::may_wait(*wait_cost),
            Self::MinimizeHopsPreferWait { hop_cost } => EdgeConfig::prefer_wait(*hop_cost),
        };
        let schedule = shortest_path_schedule(model, &config, collapse_waits)?;
        if *self == Self::FewestHopsMustHop && !schedule.all_hop_immediately() {
            warn!("Some node is unable to hop immediately");
        }
        Ok(schedule)
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::FewestHopsMustHop
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FewestHopsMustHop => write!(f, "{}", self.name()),
            Self::FastestMayWait { wait_cost } => {
                write!(f, "{} (wait cost {})", self.name(), wait_cost)
            }
            Self::MinimizeHopsPreferWait { hop_cost } => {
                write!(f, "{} (hop cost {})", self.name(), hop_cost)
            }
            Self::ExactlyHopsMayWait { hops } => write!(f, "{} ({} hops)", self.name(), hops),
        }
    }
}

impl FromStr for Policy {
    type Err = ConfigError;

    /// Parse the policy name, using the default parameters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fewest-hops-must-hop" => Ok(Self::FewestHopsMustHop),
            "fastest-may-wait" => Ok(Self::FastestMayWait { wait_cost: DEFAULT_WAIT_COST }),
            "minimize-hops-prefer-wait" => {
                Ok(Self::MinimizeHopsPreferWait { hop_cost: DEFAULT_HOP_COST })
            }
            "exactly-two-hops-may-wait" => Ok(Self::ExactlyHopsMayWait { hops: DEFAULT_HOPS }),
            other => Err(ConfigError::UnknownPolicy(other.to_string())),
        }
    }
}

/// Shared pipeline of all policies using the time-expanded graph. The graph is built fresh for
/// every call, so no cached paths are shared between different edge configurations.
fn shortest_path_schedule(
    model: &Model,
    config: &EdgeConfig,
    collapse_waits: bool,
) -> Result<Schedule, Error> {
    let mut graph = ConnectivityGraph::build(model, config)?;
    let flow_paths = graph.paths_for_flows()?;
    let flow_choices = flow_paths
        .iter()
        .map(|paths| path_to_ports(paths, collapse_waits))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ports_to_schedule(model, &flow_choices)?)
}
