#![deny(unsafe_code)]
//! CLI binary for the flowfield particle simulator.
//!
//! Subcommands:
//! - `render`: run the simulation N steps while drawing trails, write PNG
//! - `run`: run N steps and report population statistics
//! - `params`: print default parameters and their schema

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use flowfield_core::{FlowConfig, Simulation};
use flowfield_trails::{Rgb8, TrailCanvas, TrailStyle};
use std::path::PathBuf;
use std::process;

/// Frame interval handed to `step`; the simulation clock ignores it.
const FRAME_DT: f64 = 1.0 / 60.0;

#[derive(Parser)]
#[command(name = "flowfield", about = "Procedural flow-field particle simulator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the simulation for N steps, drawing trails, and write a PNG.
    Render {
        /// Canvas width in pixels.
        #[arg(short = 'W', long, default_value_t = 800)]
        width: usize,

        /// Canvas height in pixels.
        #[arg(short = 'H', long, default_value_t = 600)]
        height: usize,

        /// Number of simulation steps.
        #[arg(short, long, default_value_t = 600)]
        steps: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output file path.
        #[arg(short, long, default_value = "flowfield.png")]
        output: PathBuf,

        /// Simulation parameters as a JSON object.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Fraction of trail intensity lost per step.
        #[arg(long, default_value_t = 0.08)]
        fade: f64,

        /// Background color as hex (e.g. "#120b08").
        #[arg(long, default_value = "#120b08")]
        background: String,

        /// Stroke color as hex (e.g. "#ffd2b4").
        #[arg(long, default_value = "#ffd2b4")]
        stroke: String,

        /// Start from the flat background instead of the warm gradient.
        #[arg(long)]
        flat: bool,
    },
    /// Run the simulation for N steps and report population statistics.
    Run {
        /// Domain width.
        #[arg(short = 'W', long, default_value_t = 800.0)]
        width: f64,

        /// Domain height.
        #[arg(short = 'H', long, default_value_t = 600.0)]
        height: f64,

        /// Number of simulation steps.
        #[arg(short, long, default_value_t = 600)]
        steps: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Report every N steps (0 reports only the final step).
        #[arg(long, default_value_t = 0)]
        every: usize,

        /// Simulation parameters as a JSON object.
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// Print default parameters and their schema.
    Params,
}

fn parse_config(params: &str) -> Result<FlowConfig, CliError> {
    let params: serde_json::Value = serde_json::from_str(params)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    FlowConfig::from_json(&params).map_err(|e| CliError::rejected("--params", e))
}

fn parse_color(flag: &str, hex: &str) -> Result<Rgb8, CliError> {
    Rgb8::from_hex(hex).map_err(|e| CliError::rejected(&format!("--{flag}"), e))
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Params => {
            let defaults = FlowConfig::default().to_json();
            if cli.json {
                let info = serde_json::json!({
                    "defaults": defaults,
                    "schema": FlowConfig::schema(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else if let Some(map) = defaults.as_object() {
                println!("Parameters:");
                for (name, value) in map {
                    println!("  {name} = {value}");
                }
            }
        }
        Command::Render {
            width,
            height,
            steps,
            seed,
            output,
            params,
            fade,
            background,
            stroke,
            flat,
        } => {
            if !(0.0..=1.0).contains(&fade) {
                return Err(CliError::Input(format!("--fade must be in [0, 1], got {fade}")));
            }
            let mut style = TrailStyle {
                fade,
                background: parse_color("background", &background)?,
                stroke: parse_color("stroke", &stroke)?,
                ..TrailStyle::default()
            };
            if flat {
                style = style.flat();
            }
            let config = parse_config(&params)?;

            let mut canvas = TrailCanvas::new(width, height)
                .map_err(|e| CliError::rejected("--width/--height", e))?;
            let mut sim = Simulation::new(config, seed)?;
            sim.resize(width as f64, height as f64)?;

            for _ in 0..steps {
                sim.step(FRAME_DT)?;
                canvas.record(sim.particles(), &style);
            }

            flowfield_trails::snapshot::write_png(&canvas, &style, &output)?;

            let population = sim.particles().len();
            if cli.json {
                let info = serde_json::json!({
                    "width": width,
                    "height": height,
                    "steps": steps,
                    "seed": seed,
                    "population": population,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered flowfield ({width}x{height}, {steps} steps, seed {seed}, {population} particles) -> {}",
                    output.display()
                );
            }
        }
        Command::Run {
            width,
            height,
            steps,
            seed,
            every,
            params,
        } => {
            let config = parse_config(&params)?;
            let mut sim = Simulation::new(config, seed)?;
            sim.resize(width, height)
                .map_err(|e| CliError::rejected("--width/--height", e))?;

            let mut reports = Vec::new();
            for i in 1..=steps {
                sim.step(FRAME_DT)?;
                if i == steps || (every > 0 && i % every == 0) {
                    reports.push(sim.last_step());
                }
            }

            if cli.json {
                let info = serde_json::json!({
                    "width": width,
                    "height": height,
                    "steps": steps,
                    "seed": seed,
                    "population_cap": sim.config().population_cap(),
                    "reports": reports,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                for s in &reports {
                    eprintln!(
                        "tick {:>6}  t={:.2}  population {:>6}  spawned {:>3}  captured {:>3}  evicted {:>3}",
                        s.tick, s.time, s.population, s.spawned, s.captured, s.evicted
                    );
                }
                if reports.is_empty() {
                    eprintln!("no steps run; population {}", sim.particles().len());
                }
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
