use std::path::PathBuf;

use clap::{Parser, Subcommand};
use crdb_zoho::batch::{BatchConverter, BatchOptions, LogFileSink};
use crdb_zoho::convert::{self, Outcome};
use crdb_zoho::{ConvertError, Result, inspect};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .try_init()
        .map_err(|error| ConvertError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Convert(args) => execute_convert(args),
        Command::Batch(args) => execute_batch(args),
        Command::Inspect(args) => execute_inspect(args),
    }
}

fn execute_convert(args: ConvertArgs) -> Result<()> {
    let output = args
        .output
        .unwrap_or_else(|| convert::default_output_path(&args.input));
    match convert::convert_file(&args.input, &output, args.force)? {
        Outcome::Converted { records } => {
            println!("Wrote: {} ({records} records)", output.display())
        }
        Outcome::Skipped => println!(
            "Skipped: {} exists (use --force to overwrite)",
            output.display()
        ),
    }
    Ok(())
}

fn execute_batch(args: BatchArgs) -> Result<()> {
    let options = BatchOptions::new(args.source, args.dest).with_force(args.force);
    let log_path = args
        .log_file
        .unwrap_or_else(|| options.default_log_path());
    let sink = LogFileSink::open(log_path)?;
    let mut converter = BatchConverter::new(options, sink);
    let summary = converter.run()?;
    println!("{summary}");
    println!("Log: {}", converter.sink().path().display());
    Ok(())
}

fn execute_inspect(args: InspectArgs) -> Result<()> {
    if !args.input.exists() {
        return Err(ConvertError::MissingInput(args.input));
    }
    let report = inspect::inspect_file(&args.input)?;
    print!("{report}");
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Convert CRDB XLS statements to Zoho Books CSV imports."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a single statement.
    Convert(ConvertArgs),
    /// Convert every statement in a directory.
    Batch(BatchArgs),
    /// Show how the header locator reads a statement.
    Inspect(InspectArgs),
}

#[derive(clap::Args)]
struct ConvertArgs {
    /// Statement workbook to convert.
    #[arg(short, long)]
    input: PathBuf,

    /// Output CSV path. Defaults to the input path with a `.csv` extension.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite the output if it already exists.
    #[arg(short, long)]
    force: bool,
}

#[derive(clap::Args)]
struct BatchArgs {
    /// Directory holding the `.xls` statements.
    #[arg(long)]
    source: PathBuf,

    /// Directory receiving the converted `.csv` files.
    #[arg(long)]
    dest: PathBuf,

    /// Log file path. Defaults to `conversion.log` under the destination.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Overwrite outputs that already exist.
    #[arg(short, long)]
    force: bool,
}

#[derive(clap::Args)]
struct InspectArgs {
    /// Statement workbook to inspect.
    #[arg(short, long)]
    input: PathBuf,
}
