//! Stackelberg - Main CLI Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use stackelberg::{
    cli::{parse_list, render, Args, Commands},
    config::Config,
    telemetry::{self, TelemetryDisplay},
    GameInput, StackelbergSolver,
};
use std::path::Path;

/// Solve `input` and print the result in the configured format
fn run_solver(args: &Args, config: &Config, input: &GameInput) -> Result<()> {
    let solver = StackelbergSolver::with_config(config.solver.clone());
    let allocation = solver.solve(input)?;

    TelemetryDisplay::new(args.verbosity()).display_summary(input, &allocation);

    let format = args.format.unwrap_or(config.output.format);
    println!("{}", render(&allocation, format, config.output.fixed_decimals)?);
    Ok(())
}

/// Build an input from the positional `evaluation` arguments
fn evaluation_input(
    budget: f64,
    clients: usize,
    weights: &str,
    varrho: &str,
    eta: &str,
) -> Result<GameInput> {
    let input = GameInput::new(
        budget,
        parse_list(weights).context("Failed to parse weights")?,
        parse_list(varrho).context("Failed to parse varrho")?,
        parse_list(eta).context("Failed to parse eta")?,
    );
    input.check_shape(clients)?;
    Ok(input)
}

/// Read a problem file, choosing the parser by extension
fn load_input(path: &Path) -> Result<GameInput> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let input = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?,
        _ => serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?,
    };
    Ok(input)
}

fn show_config(config: &Config) -> Result<()> {
    println!("{}", "Stackelberg Configuration".bold());
    match Config::default_path() {
        Some(path) => println!("Default path: {}", path.display()),
        None => println!("Default path: (no home directory)"),
    }
    println!();
    print!("{}", toml::to_string_pretty(config).context("Failed to serialize config")?);
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;
    telemetry::init_logging(args.verbosity(), config.telemetry.color_output);

    match &args.command {
        Commands::Evaluation {
            budget,
            clients,
            weights,
            varrho,
            eta,
        } => {
            let input = evaluation_input(*budget, *clients, weights, varrho, eta)?;
            run_solver(args, &config, &input)?;
        }
        Commands::Solve { input } => {
            let input = load_input(input)?;
            run_solver(args, &config, &input)?;
        }
        Commands::Config => {
            show_config(&config)?;
        }
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("{}: {:#}", "Error".red(), e);
        std::process::exit(1);
    }
}
