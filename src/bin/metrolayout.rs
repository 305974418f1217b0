use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "metrolayout", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve a layout and print placements as JSON.
    Place(PlaceArgs),
    /// Solve a layout and write a debug PNG preview.
    Preview(PreviewArgs),
}

#[derive(Parser, Debug)]
struct PlaceArgs {
    /// Input layout JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Input layout JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Palette seed.
    #[arg(long, default_value_t = 255)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Place(args) => cmd_place(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_layout_json(path: &Path) -> anyhow::Result<metrolayout::LayoutDocument> {
    let f = File::open(path).with_context(|| format!("open layout '{}'", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse layout JSON")?;
    let doc = metrolayout::LayoutDocument::from_json_value(value)
        .with_context(|| format!("load layout '{}'", path.display()))?;
    Ok(doc)
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_place(args: PlaceArgs) -> anyhow::Result<()> {
    let doc = read_layout_json(&args.in_path)?;
    let output = doc.solve()?;
    let json = output.to_json_string_pretty()?;

    match args.out {
        Some(out) => {
            ensure_parent_dir(&out)?;
            std::fs::write(&out, json + "\n")
                .with_context(|| format!("write placements '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let doc = read_layout_json(&args.in_path)?;
    let output = doc.solve()?;

    let opts = metrolayout::PreviewOptions {
        seed: args.seed,
        ..metrolayout::PreviewOptions::default()
    };
    let img = metrolayout::render_preview(&output, &opts).context("render preview")?;

    ensure_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
