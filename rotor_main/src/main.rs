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

use rotor::config::ExperimentConfig;
use rotor::example_models::*;
use rotor::model::Model;
use rotor::policies::Policy;
use rotor::schedule::Schedule;

use clap::{Parser, Subcommand, ValueEnum};
use log::*;
use rand::prelude::*;
use serde_json::json;
use std::error::Error;
use std::fs::File;
use std::io::Write;

fn main() -> Result<(), Box<dyn Error>> {
    // initialize the env logger
    pretty_env_logger::init();

    // run clap
    let args = CommandLineArguments::parse();

    // match on the action
    match args.cmd {
        MainCommand::Schedule { config, policy, seed, output } => {
            let config = ExperimentConfig::from_json_file(&config)?;
            let seed = seed.unwrap_or_else(|| config.seed());
            let mut schedule_config = config.schedule.clone();
            if let Some(policy) = policy {
                schedule_config.policy = policy;
            }
            let policy = schedule_config.policy()?;

            let mut rng = StdRng::seed_from_u64(seed);
            let model = config.build_model(&mut rng)?;

            info!("Computing the schedule with seed {}", seed);
            let schedule =
                policy.make_schedule_with(&model, &mut rng, schedule_config.collapse_waits)?;
            write_result(&model, &policy, &schedule, output)?;
        }
        MainCommand::Example { model, num_nodes, policy, seed, output } => {
            let policy: Policy = policy.parse()?;
            let model = match model {
                ExampleSelection::Ring => RingModel::model(num_nodes)?,
                ExampleSelection::Complete => CompleteModel::model(num_nodes)?,
                ExampleSelection::Rotating => RotatingModel::model(num_nodes)?,
            };

            let mut rng = StdRng::seed_from_u64(seed);
            let schedule = policy.make_schedule(&model, &mut rng)?;
            write_result(&model, &policy, &schedule, output)?;
        }
    }

    Ok(())
}

/// Print the summary, and write the schedule as JSON to the output file (or to stdout).
fn write_result(
    model: &Model,
    policy: &Policy,
    schedule: &Schedule,
    output: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let complete = schedule.is_complete();
    let hop_immediately = schedule.all_hop_immediately();
    info!(
        "Schedule for {} phases, {} nodes and {} flows: complete: {}, all hop immediately: {}",
        model.num_phases(),
        model.num_nodes(),
        model.num_flows(),
        complete,
        hop_immediately
    );

    // fill in the default choices for entries which were not set by the policy
    let mut filled = schedule.clone();
    let num_defaults = filled.fill_defaults();
    if num_defaults > 0 {
        debug!("{} entries use the default choice", num_defaults);
    }

    let lists = filled.to_lists()?;
    let result = json!({
        "policy": policy.name(),
        "num_phases": model.num_phases(),
        "num_nodes": model.num_nodes(),
        "flows": model.flows(),
        "complete": complete,
        "all_hop_immediately": hop_immediately,
        "schedule": lists,
    });
    let result_str = serde_json::to_string_pretty(&result)?;

    match output {
        Some(filename) => {
            let mut file = File::create(&filename)?;
            file.write_all(result_str.as_bytes())?;
            info!("Schedule written to {}", filename);
        }
        None => println!("{}", result_str),
    }
    Ok(())
}

#[derive(Parser, Debug)]
#[command(
    name = "Rotor",
    version = "0.1",
    author = "Tibor Schneider <tiborschneider@bluewin.ch>",
    about = "Compute forwarding schedules for rotating switch networks"
)]
struct CommandLineArguments {
    /// Action to perform
    #[command(subcommand)]
    cmd: MainCommand,
}

#[derive(Subcommand, Debug)]
enum MainCommand {
    /// Build the model from an experiment configuration and compute its schedule
    #[command(name = "schedule")]
    Schedule {
        /// Experiment configuration (JSON)
        #[arg(short = 'c', long)]
        config: String,
        /// Override the policy of the configuration
        #[arg(short = 'p', long)]
        policy: Option<String>,
        /// Override the seed of the configuration
        #[arg(short = 's', long)]
        seed: Option<u64>,
        /// Write the schedule to this file instead of stdout
        #[arg(short = 'o', long)]
        output: Option<String>,
    },
    /// Compute the schedule of an example model
    #[command(name = "example")]
    Example {
        /// Example model
        #[arg(value_enum)]
        model: ExampleSelection,
        /// Number of nodes
        #[arg(short = 'n', long, default_value_t = 4)]
        num_nodes: usize,
        /// Name of the policy
        #[arg(short = 'p', long, default_value = "fewest-hops-must-hop")]
        policy: String,
        /// Seed of the random source
        #[arg(short = 's', long, default_value_t = 123456)]
        seed: u64,
        /// Write the schedule to this file instead of stdout
        #[arg(short = 'o', long)]
        output: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ExampleSelection {
    /// Static ring, see `RingModel`
    Ring,
    /// Every node is connected to every other node in every phase, see `CompleteModel`
    Complete,
    /// Two rotating switches, see `RotatingModel`
    Rotating,
}
