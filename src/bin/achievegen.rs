use std::path::PathBuf;

use clap::Parser;

use achievegen::{CardError, CardRequest, Composer, FontSet, output};

/// Generate a Steam-style achievement card PNG.
#[derive(Parser, Debug)]
#[command(name = "achievegen", version)]
struct Cli {
    /// Achievement name (shown in bold).
    #[arg(long)]
    name: String,

    /// Achievement description.
    #[arg(long)]
    description: String,

    /// Path to the achievement icon image (PNG/JPEG/... or SVG).
    #[arg(long)]
    image: PathBuf,

    /// Apply the golden border and glow used for rare unlocks.
    #[arg(long, default_value_t = false)]
    rare: bool,

    /// Directory for timestamped output files.
    #[arg(long, default_value = "output")]
    out_dir: PathBuf,

    /// Explicit output PNG path (bypasses the timestamped name).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Override the regular font file.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Override the bold font file.
    #[arg(long)]
    font_bold: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let icon = std::fs::read(&cli.image).map_err(|e| {
        CardError::invalid_input(format!("failed to read icon '{}': {e}", cli.image.display()))
    })?;
    let fonts = FontSet::resolve(cli.font_bold.as_deref(), cli.font.as_deref())?;

    let mut composer = Composer::new(fonts);
    let raster = composer.compose(&CardRequest {
        name: &cli.name,
        description: &cli.description,
        icon: &icon,
        rare: cli.rare,
    })?;

    let path = match &cli.out {
        Some(p) => output::write_card_to(&raster, p)?,
        None => output::write_card(&raster, &cli.out_dir)?,
    };

    eprintln!("wrote {}", path.display());
    Ok(())
}
