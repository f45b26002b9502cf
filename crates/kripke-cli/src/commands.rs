use anyhow::{Context, Result};
use kripke_cli::model_args::build_model;
use kripke_cli::reports::{
    BisimReport, EvalReport, ParseReport, ReduceReport, SearchMode, SearchOptions, SearchReport,
};
use kripke_formula::{Formula, parse};
use kripke_model::PointedModel;
use kripke_tableau::TableauConfig;
use tracing::{debug, info_span};

use crate::cli::{
    BisimArgs, EvalArgs, ModelArgs, OutputFormatArg, ParseArgs, ReduceArgs, SearchArgs,
};
use crate::summary::{
    print_bisim, print_eval, print_json, print_parse, print_reduce, print_search,
};

pub fn run_parse(args: &ParseArgs) -> Result<()> {
    let formula = parse_formula(&args.formula)?;
    let report = ParseReport::new(&formula);
    match args.format {
        OutputFormatArg::Table => print_parse(&report),
        OutputFormatArg::Json => print_json(&report)?,
    }
    Ok(())
}

pub fn run_eval(args: &EvalArgs) -> Result<()> {
    let formula = parse_formula(&args.formula)?;
    let model = model_from_args(&args.model)?;
    let report = EvalReport::evaluate(&formula, &model).context("evaluate formula")?;
    match args.format {
        OutputFormatArg::Table => print_eval(&report),
        OutputFormatArg::Json => print_json(&report)?,
    }
    Ok(())
}

pub fn run_search(args: &SearchArgs, mode: SearchMode) -> Result<()> {
    let formula = parse_formula(&args.formula)?;
    let _span = info_span!("search", mode = ?mode).entered();
    let config = if args.unbounded {
        TableauConfig::unbounded()
    } else {
        TableauConfig::default().with_max_nodes(Some(args.max_nodes))
    };
    let options = SearchOptions {
        config,
        reduce: args.reduce,
        tree: args.tree,
    };
    let report = SearchReport::run(&formula, mode, &options)?;
    match args.format {
        OutputFormatArg::Table => print_search(&report),
        OutputFormatArg::Json => print_json(&report)?,
    }
    Ok(())
}

pub fn run_reduce(args: &ReduceArgs) -> Result<()> {
    let model = model_from_args(&args.model)?;
    let report = ReduceReport::run(&model).context("reduce model")?;
    match args.format {
        OutputFormatArg::Table => print_reduce(&report),
        OutputFormatArg::Json => print_json(&report)?,
    }
    Ok(())
}

pub fn run_bisim(args: &BisimArgs) -> Result<()> {
    let left = model_from_args(&args.model)?;
    let right = build_model(
        &args.other_worlds,
        &args.other_edges,
        args.other_at.as_deref(),
    )
    .context("build second model")?;
    let report = BisimReport::run(&left, &right).context("construct bisimulation")?;
    match args.format {
        OutputFormatArg::Table => print_bisim(&report),
        OutputFormatArg::Json => print_json(&report)?,
    }
    Ok(())
}

fn parse_formula(text: &str) -> Result<Formula> {
    let formula = parse(text).with_context(|| format!("parse formula '{text}'"))?;
    debug!(formula = %formula, "parsed");
    Ok(formula)
}

fn model_from_args(args: &ModelArgs) -> Result<PointedModel> {
    build_model(&args.worlds, &args.edges, args.at.as_deref()).context("build model")
}
