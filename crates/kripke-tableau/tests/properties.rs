//! Property tests relating tableau results to direct evaluation.

use kripke_formula::Formula;
use kripke_model::{AccessibilityRelation, PointedModel, RelationId, World, WorldId};
use kripke_tableau::{Tableau, TableauConfig};
use proptest::collection::vec;
use proptest::prelude::*;

fn formula() -> impl Strategy<Value = Formula> {
    let leaf = prop_oneof![Just(Formula::atom("p")), Just(Formula::atom("q"))];
    leaf.prop_recursive(3, 12, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(Formula::not),
            inner.clone().prop_map(Formula::possibly),
            inner.clone().prop_map(Formula::necessarily),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Formula::and(l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Formula::or(l, r)),
            (inner.clone(), inner).prop_map(|(l, r)| Formula::implies(l, r)),
        ]
    })
}

fn small_model() -> impl Strategy<Value = PointedModel> {
    (1u32..4).prop_flat_map(|size| {
        (
            vec((any::<bool>(), any::<bool>()), size as usize),
            vec((0..size, 0..size), 0..(size * size) as usize),
        )
            .prop_map(|(valuations, edges)| {
                let mut model = PointedModel::new();
                for (index, (p, q)) in valuations.into_iter().enumerate() {
                    let atoms = [(p, "p"), (q, "q")]
                        .into_iter()
                        .filter_map(|(holds, atom)| holds.then_some(atom));
                    model
                        .add_world(World::new(WorldId::new(index as u32)).with_atoms(atoms))
                        .unwrap();
                }
                model
                    .add_relation(AccessibilityRelation::new(RelationId::DEFAULT))
                    .unwrap();
                for (from, to) in edges {
                    model
                        .add_edge(RelationId::DEFAULT, WorldId::new(from), WorldId::new(to))
                        .unwrap();
                }
                model
            })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn constructed_models_satisfy_the_seed(seed in formula()) {
        let tableau = Tableau::build(&seed, &TableauConfig::default()).unwrap();
        if let Some(model) = tableau.construct_model().unwrap() {
            prop_assert!(seed.holds_at_selected(&model).unwrap());
        }
    }

    #[test]
    fn valid_formulas_hold_everywhere(formula in formula(), model in small_model()) {
        let tableau = Tableau::for_validity(&formula, &TableauConfig::default()).unwrap();
        if !tableau.has_model() {
            for world in model.world_ids() {
                prop_assert!(formula.is_satisfied(world, &model).unwrap());
            }
        }
    }
}
