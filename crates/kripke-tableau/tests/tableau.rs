//! Tests for tableau growth and model construction.

use kripke_formula::{Formula, parse};
use kripke_model::{RelationId, WorldId};
use kripke_tableau::{Tableau, TableauConfig, TableauError, find_countermodel, find_model};

#[test]
fn negated_excluded_middle_closes() {
    let seed = Formula::not(parse("(p or (not p))").unwrap());
    let tableau = Tableau::build(&seed, &TableauConfig::default()).unwrap();
    assert!(!tableau.has_model());
    assert!(tableau.open_branches().is_empty());
    assert_eq!(tableau.closed_branches(), 1);
    assert!(tableau.construct_model().unwrap().is_none());
}

#[test]
fn contradiction_has_no_model() {
    let seed = parse("(p and (not p))").unwrap();
    assert!(find_model(&seed, &TableauConfig::default()).unwrap().is_none());
}

#[test]
fn distribution_axiom_is_valid() {
    let axiom = parse("(nec (p then q) then (nec p then nec q))").unwrap();
    let tableau = Tableau::for_validity(&axiom, &TableauConfig::default()).unwrap();
    assert!(!tableau.has_model());
    assert_eq!(tableau.closed_branches(), 2);
}

#[test]
fn possibility_does_not_imply_necessity() {
    let formula = parse("(poss p then nec p)").unwrap();
    let model = find_countermodel(&formula, &TableauConfig::default())
        .unwrap()
        .expect("formula is not valid");
    assert_eq!(model.selected_world(), Some(WorldId::new(0)));
    assert_eq!(model.world_count(), 3);
    assert!(!formula.holds_at_selected(&model).unwrap());
    assert_eq!(
        model.accessible_worlds(RelationId::DEFAULT, WorldId::new(0)).unwrap(),
        vec![WorldId::new(1), WorldId::new(2)]
    );
}

#[test]
fn necessity_reaches_worlds_created_after_it() {
    let seed = parse("(nec p and poss q)").unwrap();
    let model = find_model(&seed, &TableauConfig::default())
        .unwrap()
        .expect("seed is satisfiable");
    let successor = model.world(WorldId::new(1)).expect("witness world");
    assert!(successor.has_atom("p"));
    assert!(successor.has_atom("q"));
    assert!(seed.holds_at_selected(&model).unwrap());
}

#[test]
fn disjunction_keeps_sibling_branches_apart() {
    let seed = parse("((p or q) and (not p))").unwrap();
    let tableau = Tableau::build(&seed, &TableauConfig::default()).unwrap();
    assert_eq!(tableau.closed_branches(), 1);
    assert_eq!(tableau.open_branches().len(), 1);
    let model = tableau.construct_model().unwrap().unwrap();
    let root = model.world(WorldId::new(0)).unwrap();
    assert!(root.has_atom("q"));
    assert!(!root.has_atom("p"));
}

#[test]
fn modal_edges_keep_their_relation() {
    let seed = Formula::and(
        Formula::possibly_in(RelationId::new(2), Formula::atom("p")),
        Formula::necessarily(Formula::not(Formula::atom("p"))),
    );
    let model = find_model(&seed, &TableauConfig::default())
        .unwrap()
        .expect("different relations do not interact");
    assert_eq!(model.relations().len(), 2);
    assert!(model.is_accessible(RelationId::new(2), WorldId::new(0), WorldId::new(1)).unwrap());
    assert!(!model.is_accessible(RelationId::DEFAULT, WorldId::new(0), WorldId::new(1)).unwrap());
    assert!(seed.holds_at_selected(&model).unwrap());
}

#[test]
fn empty_sets_are_constants() {
    let config = TableauConfig::default();
    assert!(find_model(&Formula::and_all([]), &config).unwrap().is_some());
    assert!(find_model(&Formula::or_all([]), &config).unwrap().is_none());
    assert!(find_countermodel(&Formula::and_all([]), &config).unwrap().is_none());
}

#[test]
fn node_ceiling_aborts_the_search() {
    let axiom = parse("(nec (p then q) then (nec p then nec q))").unwrap();
    let config = TableauConfig::default().with_max_nodes(Some(3));
    let err = Tableau::for_validity(&axiom, &config).unwrap_err();
    assert_eq!(err, TableauError::SearchAborted { nodes: 3, limit: 3 });
}

#[test]
fn proof_tree_rendering() {
    let seed = Formula::not(parse("(p or (not p))").unwrap());
    let tableau = Tableau::build(&seed, &TableauConfig::default()).unwrap();
    assert_eq!(tableau.node_count(), 4);
    insta::assert_snapshot!(tableau.render_tree().trim_end(), @r"
    ¬(p ∨ ¬p) [world: 0]
        ¬p [world: 0]
            ¬¬p [world: 0]
                p [world: 0]
    ");
}

#[test]
fn branching_renders_both_children() {
    let tableau = Tableau::build(&parse("(p or q)").unwrap(), &TableauConfig::default()).unwrap();
    assert_eq!(tableau.open_branches().len(), 2);
    let root = tableau.node(tableau.root()).unwrap();
    assert_eq!(root.children().len(), 2);
    let rendered = tableau.render_tree();
    assert_eq!(rendered.lines().count(), tableau.node_count());
    assert!(rendered.ends_with('\n'));
    insta::assert_snapshot!(tableau.render_tree().trim_end(), @r"
    (p ∨ q) [world: 0]
        p [world: 0]
        q [world: 0]
    ");
}
