use std::path::PathBuf;

use chrono::Local;
use clap::{ArgAction, Parser, Subcommand};
use scope_cost_report::config::{ConfigOverrides, ReportConfig};
use scope_cost_report::flatten::{CellValue, SheetTable};
use scope_cost_report::pipeline;
use scope_cost_report::{ReportError, Result};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging(cli.verbose).and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ReportError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Generate(args) => execute_generate(args),
        Command::Inspect(args) => execute_inspect(args),
    }
}

fn execute_generate(args: GenerateArgs) -> Result<()> {
    let config = args.resolve_config()?;
    let outcome = pipeline::generate_report(&config, Local::now().naive_local())?;

    if !outcome.warnings.is_empty() {
        println!(
            "{} cell(s) could not be formatted; see the log for details.",
            outcome.warnings.len()
        );
    }
    println!(
        "Detailed summary report has been generated: {}",
        outcome.path.display()
    );
    Ok(())
}

fn execute_inspect(args: InspectArgs) -> Result<()> {
    let workbook = pipeline::inspect_report(&args.report)?;
    for table in &workbook.tables {
        println!("{}", render_table(table));
    }
    Ok(())
}

fn render_table(table: &SheetTable) -> String {
    let cells: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    CellValue::Number(value) => format!("{value:.2}"),
                    other => other.display_text(),
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(index, header)| {
            cells
                .iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    let format_row = |values: &[String]| {
        values
            .iter()
            .zip(&widths)
            .map(|(value, width)| format!("{value:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![format!("== {}", table.sheet_name), format_row(&table.columns)];
    lines.extend(cells.iter().map(|row| format_row(row)));
    lines.join("\n")
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Summarise labor and material costs by scope into an Excel report."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a new report from the labor and material CSV files.
    Generate(GenerateArgs),
    /// Print the sheets of a previously generated report.
    Inspect(InspectArgs),
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// JSON configuration file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the input CSV files.
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Directory receiving the report.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// File name of the labor-hours table inside the input directory.
    #[arg(long)]
    labor_file: Option<String>,

    /// File name of the material-purchases table inside the input directory.
    #[arg(long)]
    material_file: Option<String>,

    /// Tax rate as a fraction, e.g. 0.07.
    #[arg(long)]
    tax_rate: Option<f64>,

    /// Overhead rate as a fraction, e.g. 0.15.
    #[arg(long)]
    overhead_rate: Option<f64>,
}

impl GenerateArgs {
    fn resolve_config(self) -> Result<ReportConfig> {
        let overrides = ConfigOverrides {
            input_dir: self.input_dir,
            output_dir: self.output_dir,
            labor_file: self.labor_file,
            material_file: self.material_file,
            tax_rate: self.tax_rate,
            overhead_rate: self.overhead_rate,
        };
        ReportConfig::resolve(self.config.as_deref(), overrides)
    }
}

#[derive(clap::Args)]
struct InspectArgs {
    /// Path of the report workbook.
    report: PathBuf,
}
