//! Tests for bisimulation quotients.

use kripke_bisim::{RefinementConfig, coarsest_partition, reduce_model, reduce_model_with};
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
    model
}

#[test]
fn indistinguishable_worlds_collapse() {
    let model = model(&[&["p"], &["p"]], &[]);
    let refinement = coarsest_partition(&model, &RefinementConfig::default()).unwrap();
    assert_eq!(refinement.partition.len(), 1);

    let reduced = reduce_model(&model).unwrap();
    assert_eq!(reduced.world_count(), 1);
    assert!(reduced.world(WorldId::new(0)).unwrap().has_atom("p"));
}

#[test]
fn successors_with_equal_valuations_merge() {
    let mut model = model(&[&[], &["p"], &["p"]], &[(0, 1), (0, 2)]);
    model.set_selected_world(WorldId::new(0)).unwrap();

    let reduced = reduce_model(&model).unwrap();
    assert_eq!(reduced.world_count(), 2);
    assert_eq!(reduced.selected_world(), Some(WorldId::new(0)));
    assert_eq!(
        reduced
            .accessible_worlds(RelationId::DEFAULT, WorldId::new(0))
            .unwrap(),
        vec![WorldId::new(1)]
    );
    assert!(reduced.world(WorldId::new(1)).unwrap().has_atom("p"));
}

#[test]
fn selection_follows_its_block() {
    let mut model = model(&[&["p"], &["q"], &["q"]], &[(1, 0), (2, 0)]);
    model.set_selected_world(WorldId::new(2)).unwrap();
    let reduced = reduce_model(&model).unwrap();
    assert_eq!(reduced.world_count(), 2);
    let selected = reduced.selected_world().unwrap();
    assert!(reduced.world(selected).unwrap().has_atom("q"));
}

#[test]
fn reduction_without_selection_selects_nothing() {
    let reduced = reduce_model(&model(&[&["p"]], &[(0, 0)])).unwrap();
    assert_eq!(reduced.selected_world(), None);
    assert!(
        reduced
            .is_accessible(RelationId::DEFAULT, WorldId::new(0), WorldId::new(0))
            .unwrap()
    );
}

#[test]
fn different_depths_stay_apart() {
    // 0 -> 1 -> 2 and 3 -> 4: worlds 0 and 3 differ two steps out.
    let model = model(
        &[&[], &[], &[], &[], &[]],
        &[(0, 1), (1, 2), (3, 4)],
    );
    let refinement = coarsest_partition(&model, &RefinementConfig::default()).unwrap();
    let partition = &refinement.partition;
    assert!(!partition.same_block(&WorldId::new(0), &WorldId::new(3)));
    assert!(partition.same_block(&WorldId::new(1), &WorldId::new(3)));
    assert!(partition.same_block(&WorldId::new(2), &WorldId::new(4)));
    assert!(refinement.block_counts.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn other_relations_are_ignored() {
    let mut model = model(&[&["p"], &["p"]], &[]);
    model
        .add_relation(AccessibilityRelation::new(RelationId::new(2)))
        .unwrap();
    model
        .add_edge(RelationId::new(2), WorldId::new(0), WorldId::new(1))
        .unwrap();

    assert_eq!(reduce_model(&model).unwrap().world_count(), 1);
    let config = RefinementConfig::default().with_relation(RelationId::new(2));
    let reduced = reduce_model_with(&model, &config).unwrap();
    assert_eq!(reduced.world_count(), 2);
    assert!(reduced.relation(RelationId::new(2)).is_ok());
    assert!(reduced.relation(RelationId::DEFAULT).is_err());
}

#[test]
fn unknown_relation_is_reported() {
    let model = model(&[&["p"]], &[]);
    let config = RefinementConfig::default().with_relation(RelationId::new(7));
    assert!(matches!(
        reduce_model_with(&model, &config),
        Err(ModelError::UnknownRelation(_))
    ));
}

#[test]
fn partition_serializes_as_nested_lists() {
    let model = model(&[&["p"], &["q"], &["p"]], &[]);
    let refinement = coarsest_partition(&model, &RefinementConfig::default()).unwrap();
    assert_eq!(
        serde_json::to_value(&refinement.partition).unwrap(),
        serde_json::json!([[0, 2], [1]])
    );
}
