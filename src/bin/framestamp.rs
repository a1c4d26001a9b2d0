use std::{
    io::BufReader,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use framestamp::{CompactArgs, OverlayDocument, StampError, StampOptions};

#[derive(Parser, Debug)]
#[command(name = "framestamp", version, about = "Stamp text and crosshair overlays onto raw RGB8 frames")]
struct Cli {
    /// Log every primitive drawn.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Stamp the overlays of a JSON document.
    Render(RenderArgs),
    /// Stamp a batch of centered labels given as `~`-separated lists.
    Compact(CompactCmd),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Overlay document; read from stdin when omitted or `-`.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Also write the stamped frame as a PNG.
    #[arg(long)]
    preview: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CompactCmd {
    #[command(flatten)]
    args: CompactArgs,

    /// Also write the stamped frame as a PNG.
    #[arg(long)]
    preview: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.cmd) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            let code = err.downcast_ref::<StampError>().map_or(1, StampError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cmd: Command) -> anyhow::Result<()> {
    let (doc, preview) = match cmd {
        Command::Render(args) => (read_doc(args.in_path.as_deref())?, args.preview),
        Command::Compact(cmd) => (cmd.args.into_document()?, cmd.preview),
    };
    stamp(&doc, preview)
}

fn read_doc(path: Option<&Path>) -> anyhow::Result<OverlayDocument> {
    match path {
        Some(p) if p != Path::new("-") => Ok(framestamp::load_document(p)?),
        _ => {
            let stdin = std::io::stdin().lock();
            Ok(framestamp::read_document(BufReader::new(stdin))?)
        }
    }
}

fn stamp(doc: &OverlayDocument, preview: Option<PathBuf>) -> anyhow::Result<()> {
    let opts = StampOptions {
        preview_png: preview,
    };
    let report = framestamp::stamp_document_with(doc, &opts)
        .with_context(|| format!("stamp '{}'", doc.data_filename.display()))?;

    println!(
        "stamped {}/{} overlays onto {}",
        report.drawn,
        report.dispatched,
        doc.data_filename.display()
    );
    Ok(())
}
