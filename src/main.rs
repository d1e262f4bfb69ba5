use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use metal_lca::assessment::demo::{blank_input, demo_input};
use metal_lca::assessment::{check_readiness, estimate_missing, run_assessment, AssessmentInput};
use metal_lca::config::{Config, ConfigOverrides};
use metal_lca::output::csv::{readiness_to_csv, reference_to_csv, report_to_csv};
use metal_lca::output::json::render_json;
use metal_lca::output::table::{
    render_input_table, render_readiness_table, render_reference_table, render_report,
};
use metal_lca::output::OutputFormat;
use metal_lca::reference::{GridRegion, Material, ReferenceTables, RouteKind};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "metal-lca",
    about = "Life-cycle impact estimates for metal production routes"
)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Args, Clone)]
struct InputArgs {
    /// Assessment input as JSON; `-` reads stdin.
    #[arg(short, long, conflicts_with = "demo")]
    input: Option<PathBuf>,
    /// Use the sample project for a material instead of a file.
    #[arg(long)]
    demo: Option<Material>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Run {
        #[command(flatten)]
        source: InputArgs,
        #[arg(long)]
        detail: bool,
    },
    Fill {
        #[command(flatten)]
        source: InputArgs,
    },
    Validate {
        #[command(flatten)]
        source: InputArgs,
    },
    Demo {
        material: Material,
    },
    New {
        material: Material,
        #[arg(long)]
        route: Option<RouteKind>,
        #[arg(long = "grid-region")]
        grid_region: Option<GridRegion>,
        #[arg(long = "functional-unit-kg")]
        functional_unit_kg: Option<f64>,
    },
    Tables {
        material: Material,
    },
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;
    let mut overrides = ConfigOverrides {
        format: cli.output,
        ..ConfigOverrides::default()
    };
    match &cli.command {
        Commands::Run { detail: true, .. } => overrides.detail = Some(true),
        Commands::New {
            route,
            grid_region,
            functional_unit_kg,
            ..
        } => {
            overrides.route = *route;
            overrides.grid_region = *grid_region;
            overrides.functional_unit_kg = *functional_unit_kg;
        }
        _ => {}
    }
    config.apply_overrides(overrides);
    let format = config.output.format;
    let tables = ReferenceTables::builtin();

    match &cli.command {
        Commands::Run { source, .. } => {
            let input = load_input(source)?;
            info!(product = %input.product_name, material = %input.material, "running assessment");
            let report = run_assessment(tables, &input, config.output.detail)?;
            match format {
                OutputFormat::Table => println!("{}", render_report(&report)),
                OutputFormat::Json => println!("{}", render_json(&report)?),
                OutputFormat::Csv => println!("{}", report_to_csv(&report)?),
            }
        }
        Commands::Fill { source } => {
            let input = load_input(source)?;
            let filled = estimate_missing(&input)?;
            print_input(&filled, format)?;
        }
        Commands::Validate { source } => {
            let input = load_input(source)?;
            let report = check_readiness(&input);
            if !report.is_ready() {
                warn!(issues = report.issues.len(), "input is not ready to run");
            }
            match format {
                OutputFormat::Table => println!("{}", render_readiness_table(&report)),
                OutputFormat::Json => println!("{}", render_json(&report)?),
                OutputFormat::Csv => println!("{}", readiness_to_csv(&report)?),
            }
        }
        Commands::Demo { material } => print_input(&demo_input(*material), format)?,
        Commands::New { material, .. } => {
            print_input(&blank_input(*material, &config.assessment), format)?
        }
        Commands::Tables { material } => {
            let rows = tables.material_defaults(*material)?;
            match format {
                OutputFormat::Table => {
                    let renewables = GridRegion::ALL
                        .into_iter()
                        .filter_map(|r| {
                            tables
                                .typical_renewables_pct(r)
                                .map(|pct| (r.to_string(), pct))
                        })
                        .collect::<Vec<_>>();
                    println!("{}", render_reference_table(&rows, &renewables));
                }
                OutputFormat::Json => println!("{}", render_json(&rows)?),
                OutputFormat::Csv => println!("{}", reference_to_csv(&rows)?),
            }
        }
        Commands::Config { init, show } => {
            handle_config_command(*init, *show, &config, &config_path)?
        }
    }

    Ok(())
}

fn handle_config_command(
    init: bool,
    show: bool,
    config: &Config,
    config_path: &Path,
) -> Result<()> {
    if init {
        Config::write_template(config_path)?;
        println!("Wrote config template to {}", config_path.display());
    }
    if show || !init {
        println!("{}", render_json(config)?);
    }
    Ok(())
}

fn load_input(source: &InputArgs) -> Result<AssessmentInput> {
    if let Some(material) = source.demo {
        return Ok(demo_input(material));
    }
    let Some(path) = &source.input else {
        return Err(anyhow!("either --input <PATH> or --demo <MATERIAL> is required"));
    };
    let data = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed reading assessment input from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed reading assessment input: {}", path.display()))?
    };
    serde_json::from_str(&data)
        .with_context(|| format!("failed parsing assessment input: {}", path.display()))
}

fn print_input(input: &AssessmentInput, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_input_table(input)),
        OutputFormat::Json => println!("{}", render_json(input)?),
        OutputFormat::Csv => {
            warn!("CSV output for assessment inputs not implemented, using JSON");
            println!("{}", render_json(input)?);
        }
    }
    Ok(())
}
