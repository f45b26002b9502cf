use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use kripke_cli::reports::{
    BisimReport, EvalReport, ModelReport, ParseReport, ReduceReport, SearchReport, Verdict,
};

pub fn print_json<T: Serialize>(report: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("serialize report")?;
    println!("{json}");
    Ok(())
}

pub fn print_parse(report: &ParseReport) {
    let mut table = field_table();
    table.add_row(vec![header_cell("Formula"), Cell::new(&report.formula)]);
    table.add_row(vec![header_cell("LaTeX"), Cell::new(&report.latex)]);
    table.add_row(vec![
        header_cell("Grammar"),
        report
            .grammar
            .as_deref()
            .map_or_else(|| dim_cell("-"), Cell::new),
    ]);
    table.add_row(vec![header_cell("Atoms"), list_cell(&report.atoms)]);
    table.add_row(vec![header_cell("Modal depth"), Cell::new(report.modal_depth)]);
    table.add_row(vec![header_cell("Size"), Cell::new(report.size)]);
    println!("{table}");
}

pub fn print_eval(report: &EvalReport) {
    let mut table = field_table();
    table.add_row(vec![header_cell("Formula"), Cell::new(&report.formula)]);
    table.add_row(vec![header_cell("World"), Cell::new(&report.world)]);
    table.add_row(vec![header_cell("Holds"), truth_cell(report.holds)]);
    table.add_row(vec![header_cell("Extension"), list_cell(&report.extension)]);
    println!("{table}");
}

pub fn print_search(report: &SearchReport) {
    let (label, color) = match report.verdict {
        Verdict::Valid => ("valid", Color::Green),
        Verdict::Invalid => ("not valid", Color::Red),
        Verdict::Satisfiable => ("satisfiable", Color::Green),
        Verdict::Unsatisfiable => ("unsatisfiable", Color::Red),
    };
    let mut table = field_table();
    table.add_row(vec![header_cell("Formula"), Cell::new(&report.formula)]);
    table.add_row(vec![
        header_cell("Verdict"),
        Cell::new(label).fg(color).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![header_cell("Nodes"), Cell::new(report.nodes)]);
    table.add_row(vec![
        header_cell("Open branches"),
        Cell::new(report.open_branches),
    ]);
    table.add_row(vec![
        header_cell("Closed branches"),
        Cell::new(report.closed_branches),
    ]);
    println!("{table}");

    if let Some(model) = &report.model {
        let title = match report.verdict {
            Verdict::Invalid => "Countermodel",
            _ => "Model",
        };
        println!("{title}:");
        print_model(model);
    }
    if let Some(tree) = &report.tree {
        println!("Proof tree:");
        print!("{tree}");
    }
}

pub fn print_reduce(report: &ReduceReport) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Block"), header_cell("Worlds")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, block) in report.blocks.iter().enumerate() {
        table.add_row(vec![Cell::new(index), list_cell(block)]);
    }
    println!("{table}");
    println!("Reduced model:");
    print_model(&report.model);
}

pub fn print_bisim(report: &BisimReport) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Left"), header_cell("Right")]);
    apply_table_style(&mut table);
    for (left, right) in &report.pairs {
        table.add_row(vec![Cell::new(left), Cell::new(right)]);
    }
    if report.pairs.is_empty() {
        table.add_row(vec![dim_cell("-"), dim_cell("-")]);
    }
    println!("{table}");
    println!(
        "Selected worlds bisimilar: {}",
        if report.selected_bisimilar { "yes" } else { "no" }
    );
}

fn print_model(model: &ModelReport) {
    let mut worlds = Table::new();
    worlds.set_header(vec![
        header_cell("World"),
        header_cell("Atoms"),
        header_cell("Selected"),
    ]);
    apply_table_style(&mut worlds);
    align_column(&mut worlds, 2, CellAlignment::Center);
    for world in &model.worlds {
        worlds.add_row(vec![
            Cell::new(&world.name),
            list_cell(&world.atoms),
            if world.selected {
                Cell::new("*").fg(Color::Cyan)
            } else {
                dim_cell("")
            },
        ]);
    }
    println!("{worlds}");

    if model.edges.is_empty() {
        return;
    }
    let mut edges = Table::new();
    edges.set_header(vec![
        header_cell("Relation"),
        header_cell("From"),
        header_cell("To"),
    ]);
    apply_table_style(&mut edges);
    for edge in &model.edges {
        edges.add_row(vec![
            dim_cell(&edge.relation),
            Cell::new(&edge.from),
            Cell::new(&edge.to),
        ]);
    }
    println!("{edges}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn field_table() -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn truth_cell(value: bool) -> Cell {
    if value {
        Cell::new("true").fg(Color::Green)
    } else {
        Cell::new("false").fg(Color::Red)
    }
}

fn list_cell(items: &[String]) -> Cell {
    if items.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(items.join(", "))
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
