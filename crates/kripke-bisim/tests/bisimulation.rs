//! Tests for cross-model bisimulations.

use kripke_bisim::{RefinementConfig, are_bisimilar, construct_bisimulation};
use kripke_model::{AccessibilityRelation, ModelError, PointedModel, RelationId, World, WorldId};

fn model(valuations: &[&[&str]], edges: &[(u32, u32)]) -> PointedModel {
    let mut model = PointedModel::new();
    for (index, atoms) in valuations.iter().enumerate() {
        model
            .add_world(World::new(WorldId::new(index as u32)).with_atoms(atoms.iter().copied()))
            .unwrap();
    }
    model
        .add_relation(AccessibilityRelation::new(RelationId::DEFAULT))
        .unwrap();
    for &(from, to) in edges {
        model
            .add_edge(RelationId::DEFAULT, WorldId::new(from), WorldId::new(to))
            .unwrap();
    }
    model.set_selected_world(WorldId::new(0)).unwrap();
    model
}

fn w(id: u32) -> WorldId {
    WorldId::new(id)
}

#[test]
fn duplicated_successors_are_bisimilar() {
    let left = model(&[&[], &["p"]], &[(0, 1)]);
    let right = model(&[&[], &["p"], &["p"]], &[(0, 1), (0, 2)]);
    let config = RefinementConfig::default();

    let bisimulation = construct_bisimulation(&left, &right, &config).unwrap();
    assert_eq!(bisimulation.len(), 3);
    assert!(bisimulation.contains(w(0), w(0)));
    assert!(bisimulation.contains(w(1), w(1)));
    assert!(bisimulation.contains(w(1), w(2)));
    assert!(!bisimulation.contains(w(0), w(1)));
    assert!(are_bisimilar(&left, &right, &config).unwrap());
}

#[test]
fn a_missing_successor_is_noticed() {
    let left = model(&[&[], &["p"]], &[(0, 1)]);
    let right = model(&[&[], &["p"]], &[]);
    let config = RefinementConfig::default();

    let bisimulation = construct_bisimulation(&left, &right, &config).unwrap();
    assert!(!bisimulation.contains(w(0), w(0)));
    assert!(bisimulation.contains(w(1), w(1)));
    assert!(!are_bisimilar(&left, &right, &config).unwrap());
}

#[test]
fn loops_and_infinite_chains_agree() {
    // A single reflexive world and a two-cycle unfold to the same tree.
    let left = model(&[&["p"]], &[(0, 0)]);
    let right = model(&[&["p"], &["p"]], &[(0, 1), (1, 0)]);
    let bisimulation =
        construct_bisimulation(&left, &right, &RefinementConfig::default()).unwrap();
    assert!(bisimulation.contains(w(0), w(0)));
    assert!(bisimulation.contains(w(0), w(1)));
}

#[test]
fn selected_worlds_are_required() {
    let left = model(&[&["p"]], &[]);
    let mut right = model(&[&["p"]], &[]);
    right.clear_selection();
    assert_eq!(
        are_bisimilar(&left, &right, &RefinementConfig::default()),
        Err(ModelError::NoSelectedWorld)
    );
}
