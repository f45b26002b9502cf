//! Property tests for parsing and evaluation.

use kripke_formula::{Formula, parse};
use kripke_model::{AccessibilityRelation, PointedModel, RelationId, World, WorldId};
use proptest::collection::vec;
use proptest::prelude::*;

/// Formulas expressible in the textual grammar. Atom names avoid keywords.
fn grammar_formula() -> impl Strategy<Value = Formula> {
    let leaf = "[p-s][0-9]?".prop_map(Formula::Atom);
    leaf.prop_recursive(4, 32, 2, |inner| {
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

/// Small models over the atoms `p` and `q`, with world 0 selected.
fn small_model() -> impl Strategy<Value = PointedModel> {
    (1u32..5).prop_flat_map(|size| {
        (
            vec((any::<bool>(), any::<bool>()), size as usize),
            vec((0..size, 0..size), 0..(size * size) as usize),
        )
            .prop_map(|(valuations, edges)| {
                let mut model = PointedModel::new();
                for (index, (p, q)) in valuations.into_iter().enumerate() {
                    let mut world = World::new(WorldId::new(index as u32));
                    if p {
                        world.add_atom("p");
                    }
                    if q {
                        world.add_atom("q");
                    }
                    model.add_world(world).unwrap();
                }
                model
                    .add_relation(AccessibilityRelation::new(RelationId::DEFAULT))
                    .unwrap();
                for (from, to) in edges {
                    model
                        .add_edge(RelationId::DEFAULT, WorldId::new(from), WorldId::new(to))
                        .unwrap();
                }
                model.set_selected_world(WorldId::new(0)).unwrap();
                model
            })
    })
}

/// Grammar formulas over the atoms `p` and `q` only.
fn model_formula() -> impl Strategy<Value = Formula> {
    let leaf = prop_oneof![Just(Formula::atom("p")), Just(Formula::atom("q"))];
    leaf.prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(Formula::not),
            inner.clone().prop_map(Formula::possibly),
            inner.clone().prop_map(Formula::necessarily),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Formula::and(l, r)),
            (inner.clone(), inner).prop_map(|(l, r)| Formula::implies(l, r)),
        ]
    })
}

proptest! {
    #[test]
    fn grammar_round_trip(formula in grammar_formula()) {
        let text = formula.to_grammar().expect("grammar formula has a textual form");
        prop_assert_eq!(parse(&text).unwrap(), formula);
    }

    #[test]
    fn evaluation_is_deterministic(model in small_model(), formula in model_formula()) {
        for world in model.world_ids() {
            let first = formula.is_satisfied(world, &model).unwrap();
            let second = formula.is_satisfied(world, &model).unwrap();
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn necessity_is_dual_to_possibility(model in small_model(), formula in model_formula()) {
        let boxed = Formula::necessarily(formula.clone());
        let dual = Formula::not(Formula::possibly(Formula::not(formula)));
        for world in model.world_ids() {
            prop_assert_eq!(
                boxed.is_satisfied(world, &model).unwrap(),
                dual.is_satisfied(world, &model).unwrap()
            );
        }
    }

    #[test]
    fn extension_agrees_with_pointwise_evaluation(
        model in small_model(),
        formula in model_formula(),
    ) {
        let extension = formula.extension(&model).unwrap();
        for world in model.world_ids() {
            prop_assert_eq!(
                extension.contains(&world),
                formula.is_satisfied(world, &model).unwrap()
            );
        }
    }
}
