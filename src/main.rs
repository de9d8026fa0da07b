use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use tumor_growth_simulator::{
    analysis::{run_sweep, GrowthModel, Simulator, SweepSummary},
    io::{self, FileFormat},
    visualization::{
        print_curve_table, print_growth_chart, print_parameter_table, print_sweep_summary,
        print_sweep_table,
    },
    ModelParameters, ParameterRanges, SimConfig,
};

#[derive(Parser)]
#[command(
    name = "growth-sim",
    about = "Tumor Growth Simulator - untreated vs. treated growth with analytic half-capacity time",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file (constants, default parameters, samples)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Parameter overrides shared by the simulation commands.
#[derive(Args, Debug, Clone)]
struct ParamArgs {
    /// Initial population N0 (slider range 10-200)
    #[arg(long)]
    n0: Option<f64>,

    /// Growth rate r (slider range 0.05-1.0)
    #[arg(short, long)]
    rate: Option<f64>,

    /// Treatment effectiveness alpha (slider range 0.001-0.05)
    #[arg(short, long)]
    alpha: Option<f64>,

    /// Number of time samples over [0, Tf]
    #[arg(short, long)]
    samples: Option<usize>,

    /// Snap parameters onto the interactive slider grid
    #[arg(long)]
    snap: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute both curves and the half-capacity time, then plot them
    Simulate {
        #[command(flatten)]
        params: ParamArgs,

        /// Also print this many evenly spaced curve samples
        #[arg(long, default_value = "0")]
        rows: usize,

        /// Skip the ASCII chart
        #[arg(long)]
        no_chart: bool,
    },

    /// Export sampled curves to CSV, JSON, or Excel
    Export {
        #[command(flatten)]
        params: ParamArgs,

        /// Output file path (.csv, .json, or .xlsx)
        #[arg(short, long)]
        output: PathBuf,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Evaluate a batch of parameter sets from a file
    Sweep {
        /// Path to input file (CSV, JSON, or Excel)
        #[arg(short, long)]
        input: PathBuf,

        /// Write sweep results to this file (.csv or .json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Start the interactive web UI server
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}

/// Merge CLI overrides into the configured parameters and validate them.
fn resolve(config: &SimConfig, args: &ParamArgs) -> Result<(ModelParameters, usize)> {
    let mut params = config.parameters;
    if let Some(n0) = args.n0 {
        params.initial_population = n0;
    }
    if let Some(r) = args.rate {
        params.growth_rate = r;
    }
    if let Some(alpha) = args.alpha {
        params.treatment_effectiveness = alpha;
    }

    let ranges = ParameterRanges::default();
    if args.snap {
        params = ranges.snap(&params);
    } else {
        for issue in ranges.out_of_range(&params) {
            warn!("{issue} (outside the interactive slider range)");
        }
    }
    params.validate()?;

    let samples = args.samples.unwrap_or(config.simulation.samples);
    if samples < 2 {
        anyhow::bail!("At least 2 samples are required, got {samples}");
    }
    Ok((params, samples))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = SimConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Simulate {
            params,
            rows,
            no_chart,
        } => {
            let (params, samples) = resolve(&config, &params)?;

            println!("\n{}", "Cellular Growth Simulation with Treatment".bold().cyan());
            println!("{}", "=".repeat(50));
            println!(
                "  Fixed: K = {}, horizon = {} days; A is computed as (K - N0)/N0",
                config.constants.carrying_capacity, config.constants.horizon
            );

            let mut simulator = Simulator::new(config.constants, params, samples);
            simulator.on_update(move |result| {
                print_parameter_table(result);
                if !no_chart {
                    print_growth_chart(result);
                }
                if rows > 0 {
                    print_curve_table(result, rows);
                }
            });
            simulator.refresh();
        }

        Commands::Export {
            params,
            output,
            pretty,
        } => {
            let (params, samples) = resolve(&config, &params)?;
            let result = GrowthModel::new(config.constants).simulate(&params, samples);
            io::write_curves(&result, &output, pretty)?;

            println!(
                "{} Wrote {} samples -> {}",
                "Success:".green().bold(),
                result.len(),
                output.display()
            );
        }

        Commands::Sweep {
            input,
            output,
            pretty,
        } => {
            let sets = io::read_parameter_sets(&input)?;
            println!(
                "\n{}",
                format!("Parameter Sweep: {}", input.display()).bold().cyan()
            );
            println!("  Loaded {} parameter sets", sets.len());

            let rows = run_sweep(&GrowthModel::new(config.constants), &sets)?;
            print_sweep_table(&rows);

            match SweepSummary::compute(&rows) {
                Ok(summary) => print_sweep_summary(&summary),
                Err(e) => eprintln!("{}: {e}", "Warning".yellow()),
            }

            if let Some(output) = output {
                match FileFormat::from_path(&output)? {
                    FileFormat::Csv => io::write_sweep_csv(&rows, &output)?,
                    FileFormat::Json => io::write_sweep_json(&rows, &output, pretty)?,
                    FileFormat::Excel => {
                        anyhow::bail!("Sweep results can be written as .csv or .json")
                    }
                }
                println!(
                    "\n{} Wrote sweep results -> {}",
                    "Success:".green().bold(),
                    output.display()
                );
            }
        }

        #[cfg(feature = "web")]
        Commands::Serve { port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(tumor_growth_simulator::web::start_server(port, config))?;
        }
    }

    Ok(())
}
