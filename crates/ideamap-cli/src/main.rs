use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use ideamap_cli::{animation_frames, layout_document, read_document, resolve_settings};
use ideamap_core::LayoutKind;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute final positions for a graph document
    Layout {
        #[command(flatten)]
        common: CommonArgs,

        /// Write positions here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print one JSON line per animation frame toward the layout
    Animate {
        #[command(flatten)]
        common: CommonArgs,

        #[arg(long, default_value_t = 60)]
        fps: u32,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Graph document with `nodes` and `links`
    #[arg(short, long)]
    input: PathBuf,

    /// Layout to run: tree, radial or force
    #[arg(short, long, default_value = "tree")]
    kind: String,

    /// Layout settings file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the force layout
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Layout { common, output } => {
            let settings = resolve_settings(common.config.as_deref(), common.seed)?;
            let mut doc = read_document(&common.input)?;
            let kind = LayoutKind::from_tag(&common.kind);

            let positions = layout_document(&mut doc, kind, &settings)?;
            let json = serde_json::to_string_pretty(&positions)?;
            match output {
                Some(path) => std::fs::write(&path, json)
                    .with_context(|| format!("writing positions to {:?}", path))?,
                None => println!("{}", json),
            }
        }
        Command::Animate { common, fps } => {
            let settings = resolve_settings(common.config.as_deref(), common.seed)?;
            let mut doc = read_document(&common.input)?;
            let kind = LayoutKind::from_tag(&common.kind);

            let frames = animation_frames(&mut doc, kind, &settings, fps)?;
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            for frame in &frames {
                writeln!(out, "{}", serde_json::to_string(frame)?)?;
            }
        }
    }

    Ok(())
}
