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

//! Test the schedule and its structural checks.

use crate::example_models::*;
use crate::model::{Flow, Model, NodeId};
use crate::schedule::*;

fn ring() -> Model {
    RingModel::model(3).unwrap()
}

/// Node 2 owns no port. Node 0 and 1 send to each other.
fn portless_model() -> Model {
    let mut model = Model::new();
    let nodes: Vec<NodeId> = (0..3).map(|_| model.add_node()).collect();
    model.add_port(nodes[0], 10, 1).unwrap();
    model.add_port(nodes[1], 10, 1).unwrap();
    model.set_topology(vec![vec![1, 0], vec![1, 0]]).unwrap();
    model.add_flow(Flow::new(0, 1, 1)).unwrap();
    model
}

#[test]
fn test_empty_schedule() {
    let model = ring();
    let schedule = Schedule::new(&model);
    assert_eq!(schedule.num_phases(), 3);
    assert_eq!(schedule.num_nodes(), 3);
    assert_eq!(schedule.num_flows(), 1);
    assert!(!schedule.is_complete());
    assert_eq!(schedule.iter().count(), 0);
    assert_eq!(schedule.get(0, 0, 0), None);
    // vacuously true
    assert!(schedule.all_hop_immediately());
}

#[test]
fn test_set_get() {
    let model = ring();
    let mut schedule = Schedule::new(&model);
    schedule.set(1, 2, 0, ScheduleChoice::new(2, 0)).unwrap();
    assert_eq!(schedule.get(1, 2, 0), Some(ScheduleChoice::new(2, 0)));
    schedule.set(1, 2, 0, ScheduleChoice::new(2, 1)).unwrap();
    assert_eq!(schedule.get(1, 2, 0), Some(ScheduleChoice::new(2, 1)));

    assert_eq!(
        schedule.set(3, 0, 0, ScheduleChoice::new(0, 1)),
        Err(ScheduleError::OutOfRange(3, 0, 0))
    );
    assert_eq!(
        schedule.set(0, 3, 0, ScheduleChoice::new(0, 1)),
        Err(ScheduleError::OutOfRange(0, 3, 0))
    );
    assert_eq!(
        schedule.set(0, 0, 1, ScheduleChoice::new(0, 1)),
        Err(ScheduleError::OutOfRange(0, 0, 1))
    );
    assert_eq!(schedule.get(0, 0, 1), None);
}

#[test]
fn test_lookup_does_not_modify() {
    let model = ring();
    let mut schedule = Schedule::new(&model);
    schedule.set(0, 0, 0, ScheduleChoice::new(0, 2)).unwrap();

    assert_eq!(schedule.lookup(0, 0, 0), Ok(ScheduleChoice::new(0, 2)));
    // default: first owned port, next phase
    assert_eq!(schedule.lookup(2, 1, 0), Ok(ScheduleChoice::new(1, 0)));
    assert_eq!(schedule.get(2, 1, 0), None);
    assert_eq!(schedule.lookup(0, 0, 2), Err(ScheduleError::OutOfRange(0, 0, 2)));
    assert!(!schedule.is_complete());

    assert_eq!(schedule.fill_defaults(), 8);
    assert!(schedule.is_complete());
    assert_eq!(schedule.get(2, 1, 0), Some(ScheduleChoice::new(1, 0)));
    assert_eq!(schedule.get(0, 0, 0), Some(ScheduleChoice::new(0, 2)));
    assert_eq!(schedule.fill_defaults(), 0);
}

#[test]
fn test_all_hop_immediately() {
    let model = ring();
    let mut schedule = Schedule::new(&model);
    schedule.fill_defaults();
    assert!(schedule.all_hop_immediately());
    schedule.set(1, 1, 0, ScheduleChoice::new(1, 0)).unwrap();
    assert!(!schedule.all_hop_immediately());
    schedule.set(1, 1, 0, ScheduleChoice::new(1, 2)).unwrap();
    assert!(schedule.all_hop_immediately());
}

#[test]
fn test_iter_order() {
    let mut model = ring();
    model.add_flow(Flow::new(1, 0, 1)).unwrap();
    let mut schedule = Schedule::new(&model);
    schedule.set(2, 0, 1, ScheduleChoice::new(0, 0)).unwrap();
    schedule.set(0, 2, 0, ScheduleChoice::new(2, 1)).unwrap();
    schedule.set(0, 1, 1, ScheduleChoice::new(1, 1)).unwrap();
    let keys = schedule.iter().map(|(k, _)| k).collect::<Vec<_>>();
    assert_eq!(keys, vec![(0, 1, 1), (0, 2, 0), (2, 0, 1)]);
}

#[test]
fn test_to_lists() {
    let model = ring();
    let mut schedule = Schedule::new(&model);
    schedule.set(0, 0, 0, ScheduleChoice::new(0, 2)).unwrap();
    let lists = schedule.to_lists().unwrap();
    assert_eq!(lists.len(), 3);
    assert!(lists.iter().all(|nodes| nodes.len() == 3));
    assert!(lists.iter().flatten().all(|flows| flows.len() == 1));
    assert_eq!(lists[0][0][0], ScheduleChoice::new(0, 2));
    assert_eq!(lists[1][2][0], ScheduleChoice::new(2, 2));
    assert_eq!(lists[2][0][0], ScheduleChoice::new(0, 0));
}

#[test]
fn test_portless_node() {
    let model = portless_model();
    let mut schedule = Schedule::new(&model);
    assert_eq!(schedule.default_choice(0, 2), None);
    assert_eq!(schedule.lookup(0, 2, 0), Err(ScheduleError::MissingEntry(0, 2, 0)));
    assert_eq!(schedule.fill_defaults(), 4);
    assert!(!schedule.is_complete());
    assert_eq!(schedule.to_lists(), Err(ScheduleError::MissingEntry(0, 2, 0)));
}

#[test]
fn test_serialize_choice() {
    let choice = ScheduleChoice::new(3, 1);
    let json = serde_json::to_string(&choice).unwrap();
    assert_eq!(json, r#"{"port":3,"phase":1}"#);
    assert_eq!(serde_json::from_str::<ScheduleChoice>(&json).unwrap(), choice);
}
