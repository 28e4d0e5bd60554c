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

//! Module containing all error types

use crate::model::ConfigError;
use crate::schedule::ScheduleError;
use crate::tgraph::GraphError;
use thiserror::Error;

/// Main error type
#[derive(Debug, Error)]
pub enum Error {
    /// The model, the topology generator or the policy is misconfigured
    #[error("Configuration Error: {0}")]
    ConfigError(#[from] ConfigError),
    /// Error while building or querying the time-expanded graph
    #[error("Graph Error: {0}")]
    GraphError(#[from] GraphError),
    /// Error while accessing the schedule
    #[error("Schedule Error: {0}")]
    ScheduleError(#[from] ScheduleError),
    /// Error while reading or writing a file
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
    /// Error while parsing or generating JSON
    #[error("JSON Error: {0}")]
    JsonError(#[from] serde_json::Error),
}
