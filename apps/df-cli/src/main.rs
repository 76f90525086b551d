mod error;
mod render;

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;

use df_project::Scenario;
use df_sim::{Renderer, StepAccumulator, refinement_study};
use error::{CliError, CliResult};
use render::{Format, StopRule, TextRenderer};

#[derive(Parser)]
#[command(name = "df-cli")]
#[command(about = "DualFlight CLI - RK4 vs Dormand-Prince projectile flight", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a scenario file with the reference launch
    Init {
        /// Path of the scenario YAML file to create
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Validate scenario file syntax and values
    Validate {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
    },
    /// Run both integrators side by side
    Run {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
        /// Stop after this many frames
        #[arg(long, default_value_t = 10_000)]
        max_frames: u64,
        /// Stop as soon as both integrators have settled
        #[arg(long)]
        until_settled: bool,
        /// Write every N-th frame
        #[arg(long, default_value_t = 1)]
        every: u64,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
        /// Output file (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pace physics steps against the wall clock at the scenario frame rate
        #[arg(long)]
        realtime: bool,
    },
    /// Compare final RK4 / Dormand-Prince gaps over halving step sizes
    Study {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
        /// Integration end time in seconds, a whole multiple of the scenario time step
        #[arg(long, default_value_t = 2.0)]
        t_end: f64,
        /// Number of refinement levels (at most 20)
        #[arg(long, default_value_t = 5)]
        levels: usize,
    },
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path, force } => cmd_init(&path, force),
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Run {
            scenario_path,
            max_frames,
            until_settled,
            every,
            format,
            output,
            realtime,
        } => cmd_run(
            &scenario_path,
            StopRule {
                max_frames,
                until_settled,
            },
            every,
            format,
            output.as_deref(),
            realtime,
        ),
        Commands::Study {
            scenario_path,
            t_end,
            levels,
        } => cmd_study(&scenario_path, t_end, levels),
    }
}

fn cmd_init(path: &Path, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(CliError::Exists {
            path: path.to_path_buf(),
        });
    }
    df_project::save_yaml(path, &Scenario::default())?;
    println!("✓ Wrote scenario: {}", path.display());
    Ok(())
}

fn cmd_validate(scenario_path: &Path) -> CliResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = df_project::load_yaml(scenario_path)?;
    df_project::compile(&scenario)?;
    println!("✓ Scenario '{}' is valid", scenario.name);
    Ok(())
}

fn cmd_run(
    scenario_path: &Path,
    rule: StopRule,
    every: u64,
    format: Format,
    output: Option<&Path>,
    realtime: bool,
) -> CliResult<()> {
    let scenario = df_project::load_yaml(scenario_path)?;
    let compiled = df_project::compile(&scenario)?;
    let frame_rate_hz = compiled.frame_rate_hz;
    let mut sim = df_sim::Simulation::new(compiled.params, &compiled.launch, compiled.options)?;
    info!(
        scenario = %scenario.name,
        dt = sim.params().time_step(),
        realtime,
        "starting run"
    );

    let out: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    let mut renderer = TextRenderer::new(out, format, every, rule);

    let started = Instant::now();
    let frames = if realtime {
        run_realtime(&mut sim, &mut renderer, frame_rate_hz)?
    } else {
        sim.run(&mut renderer)?
    };
    renderer.finish()?;

    let snap = sim.snapshot();
    eprintln!(
        "✓ {} frames, {} steps, t = {:.3} s, divergence = {:.6e} m, settled = {} ({:.2}s wall)",
        frames,
        snap.step,
        snap.sim_time,
        snap.divergence_total,
        snap.all_settled(),
        started.elapsed().as_secs_f64()
    );
    if let Some(path) = output {
        eprintln!("  Output: {}", path.display());
    }
    Ok(())
}

/// Frame loop paced at `frame_rate_hz`, running as many physics steps per
/// frame as wall-clock time allows.
fn run_realtime<R: Renderer>(
    sim: &mut df_sim::Simulation,
    renderer: &mut R,
    frame_rate_hz: f64,
) -> Result<u64, CliError>
where
    CliError: From<R::Error>,
{
    let frame = Duration::from_secs_f64(1.0 / frame_rate_hz);
    let mut pacer = StepAccumulator::new(sim.params().time_step(), 8)?;
    let mut frames = 0;
    let mut last = Instant::now();

    while !renderer.stop_requested() {
        let now = Instant::now();
        let steps = pacer.advance((now - last).as_secs_f64());
        last = now;

        let snapshot = sim.advance(steps);
        renderer.present(&snapshot)?;
        frames += 1;

        let spent = now.elapsed();
        if spent < frame {
            std::thread::sleep(frame - spent);
        }
    }
    Ok(frames)
}

fn cmd_study(scenario_path: &Path, t_end: f64, levels: usize) -> CliResult<()> {
    let scenario = df_project::load_yaml(scenario_path)?;
    let compiled = df_project::compile(&scenario)?;
    info!(scenario = %scenario.name, t_end, levels, "refinement study");

    let results = refinement_study(&compiled.params, &compiled.launch, t_end, levels)?;

    println!("Refinement study for '{}' (t_end = {:.3} s):", scenario.name, t_end);
    println!("  {:>12} {:>10} {:>14} {:>8}", "dt [s]", "steps", "gap [m]", "ratio");
    let mut prev: Option<f64> = None;
    for level in &results {
        let ratio = match prev {
            Some(p) if level.final_gap > 0.0 => format!("{:.1}", p / level.final_gap),
            _ => "-".to_string(),
        };
        println!(
            "  {:>12.6} {:>10} {:>14.6e} {:>8}",
            level.time_step, level.steps, level.final_gap, ratio
        );
        prev = Some(level.final_gap);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_limit_counts_frames() {
        let cli = Cli::try_parse_from(["df-cli", "run", "cannon.yaml", "--max-frames", "25"]).unwrap();
        match cli.command {
            Commands::Run { max_frames, .. } => assert_eq!(max_frames, 25),
            _ => panic!("expected run"),
        }
        assert!(Cli::try_parse_from(["df-cli", "run", "cannon.yaml", "--max-steps", "25"]).is_err());
    }
}
