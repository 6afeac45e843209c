use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use bfont::bfont::{self as codec, DecodeMode};
use bfont::config::{Config, FONT_SIZES};
use bfont::fonts::{default_output_name, list_font_resources};
use bfont::layout::{PREVIEW_ORIGIN, VIEWER_ORIGIN};
use bfont::truetype::TrueTypeRasterizer;
use bfont::{render, Canvas, FontSet, FontSetBuilder, PRINTABLE};
use clap::{Args, Parser, Subcommand};
use log::info;

#[derive(Parser)]
#[command(name = "bfont", version, about = "Generate and view .bfont bitmap fonts")]
struct Cli {
    /// Settings file; missing files fall back to defaults.
    #[arg(long, global = true, default_value = "bfont.toml")]
    config: PathBuf,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the TrueType fonts in a folder.
    List {
        #[arg(long)]
        folder: Option<PathBuf>,
    },
    /// Rasterize ASCII 0..127 from a TrueType font into a .bfont file.
    Generate {
        font: PathBuf,
        #[command(flatten)]
        raster: RasterArgs,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render the printable glyphs of a TrueType font to a PNG.
    Preview {
        font: PathBuf,
        #[command(flatten)]
        raster: RasterArgs,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Render the printable glyphs of a .bfont file to a PNG.
    View {
        file: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        /// Accept trailing bytes and pixel values other than 0 and 1.
        #[arg(long)]
        lenient: bool,
    },
    /// Print the header of a .bfont file.
    Inspect {
        file: PathBuf,
        #[arg(long)]
        lenient: bool,
    },
}

#[derive(Args)]
struct RasterArgs {
    #[arg(short, long, value_parser = font_size_parser())]
    size: Option<u8>,
    #[arg(short, long)]
    threshold: Option<u8>,
}

fn font_size_parser() -> clap::builder::RangedI64ValueParser<u8> {
    clap::value_parser!(u8).range(i64::from(*FONT_SIZES.start())..=i64::from(*FONT_SIZES.end()))
}

impl RasterArgs {
    fn builder(&self, config: &Config) -> FontSetBuilder {
        FontSetBuilder::new(
            self.size.unwrap_or(config.generator.font_size),
            self.threshold.unwrap_or(config.generator.threshold),
        )
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = Config::load_or_default(&cli.config)
        .with_context(|| format!("failed to read {}", cli.config.display()))?;

    match cli.command {
        Command::List { folder } => list(&config, folder),
        Command::Generate {
            font,
            raster,
            output,
        } => {
            let builder = raster.builder(&config);
            let font_set = build(&config, &font, builder)?;
            let name = font.file_name().and_then(|n| n.to_str()).unwrap_or("font");
            let output = output.unwrap_or_else(|| default_output_name(name, builder.point_size));
            codec::save(&font_set, &output)
                .with_context(|| format!("failed to write {}", output.display()))?;
            info!("wrote {}", output.display());
            Ok(())
        }
        Command::Preview {
            font,
            raster,
            output,
        } => {
            let font_set = build(&config, &font, raster.builder(&config))?;
            save_rendering(&config, &font_set, PREVIEW_ORIGIN, &output)
        }
        Command::View {
            file,
            output,
            lenient,
        } => {
            let font_set = load(&file, lenient)?;
            println!("Font Size: {}", font_set.font_size());
            save_rendering(&config, &font_set, VIEWER_ORIGIN, &output)
        }
        Command::Inspect { file, lenient } => {
            let font_set = load(&file, lenient)?;
            inspect(&font_set);
            Ok(())
        }
    }
}

fn list(config: &Config, folder: Option<PathBuf>) -> anyhow::Result<()> {
    let Some(folder) = folder.or_else(|| config.font_folder()) else {
        bail!("no font folder known for this platform, pass --folder");
    };

    let names = list_font_resources(&folder)
        .with_context(|| format!("failed to list {}", folder.display()))?;
    for name in names {
        println!("{name}");
    }

    Ok(())
}

/// Relative font paths are looked up in the configured font folder when
/// they don't exist as given.
fn resolve_font(config: &Config, font: &Path) -> PathBuf {
    if font.is_relative() && !font.exists() {
        if let Some(folder) = config.font_folder() {
            return folder.join(font);
        }
    }

    font.to_path_buf()
}

fn build(config: &Config, font: &Path, builder: FontSetBuilder) -> anyhow::Result<FontSet> {
    let path = resolve_font(config, font);
    let rasterizer = TrueTypeRasterizer::load(&path)
        .with_context(|| format!("failed to load {}", path.display()))?;

    builder
        .build(&rasterizer)
        .with_context(|| format!("failed to rasterize {}", path.display()))
}

fn load(file: &Path, lenient: bool) -> anyhow::Result<FontSet> {
    let mode = if lenient {
        DecodeMode::Lenient
    } else {
        DecodeMode::Strict
    };

    codec::load(file, mode).with_context(|| format!("failed to load {}", file.display()))
}

fn save_rendering(
    config: &Config,
    font_set: &FontSet,
    origin: embedded_graphics::prelude::Point,
    output: &Path,
) -> anyhow::Result<()> {
    let canvas = Canvas::new(config.canvas.width, config.canvas.height);
    let canvas = render(font_set, canvas, origin);
    canvas
        .to_image()
        .save(output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!(
        "rendered {}x{} canvas to {}",
        canvas.width(),
        canvas.height(),
        output.display()
    );

    Ok(())
}

fn inspect(font_set: &FontSet) {
    println!("height: {}", font_set.height());
    println!("font size: {}", font_set.font_size());
    println!("encoded length: {}", codec::encoded_len(font_set));
    for code_point in PRINTABLE {
        if let Some(glyph) = font_set.glyph(code_point) {
            println!("{:>3} {:?} width {}", code_point, char::from(code_point), glyph.width());
        }
    }
}
