//! Matchstats CLI - reshape football statistics CSV files
//!
//! # Main Commands
//!
//! ```bash
//! matchstats parse serie_a_stats.csv                 # CSV to JSON rows
//! matchstats strip-sign stats.csv -c Team -c xPTS    # keep columns, drop +/- deltas
//! matchstats run stats.csv --plan ranking.json       # apply a saved plan
//! matchstats stats stats.csv -c xG                   # count, mean, median
//! ```
//!
//! # Helper Commands
//!
//! ```bash
//! matchstats validate rows.json                      # check a JSON table's shape
//! matchstats operations                              # list plan steps
//! matchstats example-plan                            # print an example plan
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use matchstats::config::Settings;
use matchstats::logs::{self, log_error, log_success, log_warning, LogOptions};
use matchstats::{
    extract_column, load_table, parse_date, project, render, run_plan, split_by_date, strip_sign,
    summarize_column, validate_table, LoadOptions, LogFormat, OutputFormat, Table, TransformPlan,
};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "matchstats")]
#[command(about = "Parse and reshape football statistics CSV files", long_about = None)]
struct Cli {
    /// Do not print progress messages
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Progress message format
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Input file (`.json` for a JSON table, `-` for stdin)
    input: PathBuf,

    /// Detect the input encoding instead of requiring UTF-8
    #[arg(long)]
    auto_encoding: bool,
}

impl InputArgs {
    fn load(&self) -> Result<Table, Box<dyn std::error::Error>> {
        let options = LoadOptions {
            auto_encoding: self.auto_encoding,
            kind: None,
        };
        Ok(load_table(&self.input, &options)?.table)
    }
}

#[derive(Args)]
struct OutputArgs {
    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: MATCHSTATS_OUTPUT, else json)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
}

impl OutputArgs {
    /// `--format` if given, else the configured default.
    fn resolve_format(&self, settings: &Settings) -> OutputFormat {
        self.format.unwrap_or(settings.output_format)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Part {
    Before,
    After,
    Unparsed,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a CSV file and output its rows
    Parse {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Keep only the given columns
    Project {
        #[command(flatten)]
        input: InputArgs,

        /// Columns to keep (repeatable)
        #[arg(short, long = "column", required = true)]
        columns: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Keep only the given columns, cut at the first `+` or `-`
    StripSign {
        #[command(flatten)]
        input: InputArgs,

        /// Columns to keep (repeatable)
        #[arg(short, long = "column", required = true)]
        columns: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the values of one column as a JSON array
    Extract {
        #[command(flatten)]
        input: InputArgs,

        /// Column to extract
        #[arg(short, long)]
        column: String,
    },

    /// Count, mean, median and range of a numeric column
    Stats {
        #[command(flatten)]
        input: InputArgs,

        /// Numeric column
        #[arg(short, long)]
        column: String,
    },

    /// Split rows around a pivot date
    Split {
        #[command(flatten)]
        input: InputArgs,

        /// Date column
        #[arg(short, long)]
        column: String,

        /// Pivot date; rows strictly before it go to `before`
        #[arg(long)]
        pivot: String,

        /// chrono date format (default: MATCHSTATS_DATE_FORMAT, else %m/%d/%Y)
        #[arg(long)]
        date_format: Option<String>,

        /// Output only one part as a table
        #[arg(long, value_enum)]
        part: Option<Part>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Apply a plan file to a table
    Run {
        #[command(flatten)]
        input: InputArgs,

        /// Plan JSON file
        #[arg(short, long)]
        plan: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Check that a JSON file is an array of string-valued rows
    Validate {
        /// Input JSON file
        input: PathBuf,
    },

    /// Show example plan
    ExamplePlan,

    /// Show available plan steps
    Operations,
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let (mut settings, problems) = Settings::from_lookup_checked(|key| std::env::var(key).ok());
    settings.quiet |= cli.quiet;
    if let Some(format) = cli.log_format {
        settings.log_format = format;
    }
    logs::init(LogOptions {
        format: settings.log_format,
        quiet: settings.quiet,
    });
    for problem in problems {
        log_warning(format!("Ignoring {}", problem));
    }

    let result = match cli.command {
        Commands::Parse { input, output } => cmd_parse(&input, &output, &settings),

        Commands::Project {
            input,
            columns,
            output,
        } => cmd_project(&input, &columns, &output, &settings),

        Commands::StripSign {
            input,
            columns,
            output,
        } => cmd_strip_sign(&input, &columns, &output, &settings),

        Commands::Extract { input, column } => cmd_extract(&input, &column),

        Commands::Stats { input, column } => cmd_stats(&input, &column),

        Commands::Split {
            input,
            column,
            pivot,
            date_format,
            part,
            output,
        } => {
            let format = date_format.unwrap_or_else(|| settings.date_format.clone());
            cmd_split(&input, &column, &pivot, &format, part, &output, &settings)
        }

        Commands::Run {
            input,
            plan,
            output,
        } => cmd_run(&input, &plan, &output, &settings),

        Commands::Validate { input } => cmd_validate(&input),

        Commands::ExamplePlan => cmd_example_plan(),

        Commands::Operations => cmd_operations(),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_parse(
    input: &InputArgs,
    output: &OutputArgs,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let table = input.load()?;
    write_table(&table, output, settings)
}

fn cmd_project(
    input: &InputArgs,
    columns: &[String],
    output: &OutputArgs,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let table = input.load()?;
    warn_missing_columns(&table, columns);
    write_table(&project(&table, columns), output, settings)
}

fn cmd_strip_sign(
    input: &InputArgs,
    columns: &[String],
    output: &OutputArgs,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let table = input.load()?;
    warn_missing_columns(&table, columns);
    write_table(&strip_sign(&table, columns), output, settings)
}

fn cmd_extract(input: &InputArgs, column: &str) -> Result<(), Box<dyn std::error::Error>> {
    let table = input.load()?;
    let values = extract_column(&table, column);
    log_success(format!("{} values in '{}'", values.len(), column));
    println!("{}", serde_json::to_string_pretty(&values)?);
    Ok(())
}

fn cmd_stats(input: &InputArgs, column: &str) -> Result<(), Box<dyn std::error::Error>> {
    let table = input.load()?;
    let summary = summarize_column(&table, column)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn cmd_split(
    input: &InputArgs,
    column: &str,
    pivot: &str,
    date_format: &str,
    part: Option<Part>,
    output: &OutputArgs,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let pivot_date = parse_date(pivot, date_format)
        .ok_or_else(|| format!("Pivot '{}' does not match date format '{}'", pivot, date_format))?;

    let table = input.load()?;
    let split = split_by_date(&table, column, pivot_date, date_format);
    log_success(format!(
        "{} before, {} after, {} without a date",
        split.before.len(),
        split.after.len(),
        split.unparsed.len()
    ));

    match part {
        Some(Part::Before) => write_table(&split.before, output, settings),
        Some(Part::After) => write_table(&split.after, output, settings),
        Some(Part::Unparsed) => write_table(&split.unparsed, output, settings),
        None => {
            if output.resolve_format(settings) == OutputFormat::Csv {
                return Err("CSV output needs --part".into());
            }
            let json = serde_json::to_string_pretty(&split)?;
            write_output(&json, output.output.as_deref())
        }
    }
}

fn cmd_run(
    input: &InputArgs,
    plan_path: &Path,
    output: &OutputArgs,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let plan = TransformPlan::from_json(&fs::read_to_string(plan_path)?)?;
    let table = input.load()?;
    let report = run_plan(&table, &plan)?;
    write_table(&report.table, output, settings)
}

fn cmd_validate(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let content = fs::read_to_string(input)?;
    let data: Value = serde_json::from_str(&content)?;

    match validate_table(&data) {
        Ok(()) => {
            let rows = data.as_array().map(Vec::len).unwrap_or(0);
            log_success(format!("Valid table: {} rows", rows));
            Ok(())
        }
        Err(errors) => {
            for err in errors.iter().take(5) {
                log_error(err.clone());
            }
            Err(format!("{} schema violations in {}", errors.len(), input.display()).into())
        }
    }
}

fn cmd_example_plan() -> Result<(), Box<dyn std::error::Error>> {
    let plan = matchstats::example_plan();
    println!("{}", plan.to_json()?);
    Ok(())
}

fn cmd_operations() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", matchstats::operations_description());
    Ok(())
}

fn warn_missing_columns(table: &Table, columns: &[String]) {
    let present = table.columns();
    for column in columns {
        if !present.contains(column) {
            log_warning(format!("Column '{}' not found, skipped", column));
        }
    }
}

fn write_table(
    table: &Table,
    output: &OutputArgs,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = render(table, output.resolve_format(settings))?;
    write_output(content.trim_end_matches('\n'), output.output.as_deref())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, format!("{}\n", content))?;
            log_success(format!("Output written to: {}", p.display()));
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output_args(format: Option<OutputFormat>) -> OutputArgs {
        OutputArgs { output: None, format }
    }

    #[test]
    fn test_format_falls_back_to_settings() {
        let settings = Settings {
            output_format: OutputFormat::Csv,
            ..Settings::default()
        };
        assert_eq!(output_args(None).resolve_format(&settings), OutputFormat::Csv);
        assert_eq!(
            output_args(Some(OutputFormat::Json)).resolve_format(&settings),
            OutputFormat::Json
        );
    }

    #[test]
    fn test_split_without_part_rejects_configured_csv() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("matches.csv");
        fs::write(&csv_path, "Data,Home\n02/10/2019,Inter\n").unwrap();

        let input = InputArgs { input: csv_path, auto_encoding: false };
        let settings = Settings {
            output_format: OutputFormat::Csv,
            ..Settings::default()
        };
        let output = output_args(None);
        let err = cmd_split(&input, "Data", "02/20/2019", "%m/%d/%Y", None, &output, &settings)
            .unwrap_err();
        assert!(err.to_string().contains("--part"));
    }
}
