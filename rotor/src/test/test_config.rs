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

//! Test parsing the experiment configuration and building the model from it.

use crate::config::*;
use crate::model::ConfigError;
use crate::policies::Policy;
use crate::Error;

use rand::rngs::StdRng;
use rand::SeedableRng;

const UNIFORM: &str = r#"{
    "model": { "num_nodes": 8, "num_switches": 2, "capacity": 10, "bandwidth": 1 },
    "topology": { "type": "rotating", "interval": 1, "start_offset": 1 },
    "flow": { "type": "uniform", "num_flows": 4, "min_demand": 1, "max_demand": 5 },
    "schedule": { "policy": "fastest-may-wait", "wait_cost": 0.5 },
    "random": { "seed": 42 }
}"#;

const GRAVITY: &str = r#"{
    "model": { "num_nodes": 4, "num_switches": 1, "capacity": 10, "bandwidth": 2 },
    "topology": { "type": "rotating", "interval": 1, "start_offset": 1, "offsets": [2] },
    "flow": {
        "type": "gravity",
        "connection_percentage": 50.0,
        "min_demand": 1,
        "max_demand": 10,
        "power": 1.0
    }
}"#;

#[test]
fn test_parse_uniform() {
    let config = ExperimentConfig::from_json_str(UNIFORM).unwrap();
    assert_eq!(
        config.model,
        ModelConfig { num_nodes: 8, num_switches: 2, capacity: 10, bandwidth: 1 }
    );
    assert_eq!(
        config.topology,
        TopologyConfig::Rotating { interval: 1, start_offset: 1, offsets: None }
    );
    assert_eq!(config.seed(), 42);
    assert_eq!(config.policy(), Ok(Policy::FastestMayWait { wait_cost: 0.5 }));
    assert!(config.schedule.collapse_waits);

    let mut rng = StdRng::seed_from_u64(config.seed());
    let model = config.build_model(&mut rng).unwrap();
    assert_eq!(model.num_nodes(), 8);
    assert_eq!(model.num_ports(), 16);
    assert_eq!(model.num_phases(), 7);
    assert_eq!(model.num_flows(), 4);
    for flow in model.flows() {
        assert_ne!(flow.ingress, flow.egress);
        assert!(flow.amount >= 1 && flow.amount <= 5);
    }
    for port in model.ports() {
        assert_eq!(port.capacity, 10);
        assert_eq!(port.bandwidth, 1);
    }

    // the same seed builds the same model
    let mut rng = StdRng::seed_from_u64(config.seed());
    assert_eq!(config.build_model(&mut rng).unwrap(), model);
}

#[test]
fn test_parse_gravity() {
    let config = ExperimentConfig::from_json_str(GRAVITY).unwrap();
    assert_eq!(config.seed(), DEFAULT_SEED);
    assert_eq!(config.policy(), Ok(Policy::FewestHopsMustHop));

    let mut rng = StdRng::seed_from_u64(config.seed());
    let model = config.build_model(&mut rng).unwrap();
    assert_eq!(model.num_ports(), 4);
    // offsets cycle through 2, 3, 1
    assert_eq!(model.num_phases(), 3);
    assert_eq!(model.target(0, 0), 2);
    assert_eq!(model.num_flows(), 6);
    for flow in model.flows() {
        assert!(flow.amount >= 1 && flow.amount <= 10);
    }
}

#[test]
fn test_policy_parameters() {
    let mut schedule = ScheduleConfig::default();
    assert_eq!(schedule.policy(), Ok(Policy::FewestHopsMustHop));

    schedule.policy = "minimize-hops-prefer-wait".to_string();
    assert_eq!(schedule.policy(), Ok(Policy::MinimizeHopsPreferWait { hop_cost: 1_000_000.0 }));
    schedule.hop_cost = Some(100.0);
    assert_eq!(schedule.policy(), Ok(Policy::MinimizeHopsPreferWait { hop_cost: 100.0 }));

    schedule.policy = "exactly-two-hops-may-wait".to_string();
    assert_eq!(schedule.policy(), Ok(Policy::ExactlyHopsMayWait { hops: 2 }));
    schedule.hops = Some(0);
    assert_eq!(schedule.policy(), Err(ConfigError::InvalidHopCount));

    schedule.policy = "fastest-may-wait".to_string();
    schedule.wait_cost = Some(f64::NAN);
    assert!(matches!(schedule.policy(), Err(ConfigError::InvalidCost(_))));

    schedule.policy = "random".to_string();
    assert_eq!(schedule.policy(), Err(ConfigError::UnknownPolicy("random".to_string())));
}

#[test]
fn test_offset_mismatch() {
    let mut config = ExperimentConfig::from_json_str(GRAVITY).unwrap();
    config.topology =
        TopologyConfig::Rotating { interval: 1, start_offset: 1, offsets: Some(vec![1, 2]) };
    let mut rng = StdRng::seed_from_u64(config.seed());
    assert_eq!(
        config.build_model(&mut rng),
        Err(ConfigError::OffsetCountMismatch { expected: 1, found: 2 })
    );
}

#[test]
fn test_invalid_json() {
    match ExperimentConfig::from_json_str(r#"{ "model": { "num_nodes": 3 } }"#) {
        Err(Error::JsonError(_)) => {}
        r => panic!("Unexpected result: {:?}", r),
    }
    match ExperimentConfig::from_json_file("/this/file/does/not/exist.json") {
        Err(Error::IoError(_)) => {}
        r => panic!("Unexpected result: {:?}", r),
    }
}

#[test]
fn test_roundtrip() {
    let config = ExperimentConfig::from_json_str(GRAVITY).unwrap();
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(ExperimentConfig::from_json_str(&json).unwrap(), config);
}
