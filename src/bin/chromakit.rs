//! chromakit: color toolkit on the command line
//!
//! Conversions, contrast checks, palettes, harmonies, photo color
//! extraction, gradients and a persistent list of saved colors.
//!
//! Install: `cargo install chromakit --features cli`
//! Run: `chromakit convert "#2E8B57"`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chromakit::config::Config;
use chromakit::prelude::*;

/// chromakit: color toolkit
#[derive(Parser, Debug)]
#[command(name = "chromakit")]
#[command(author = "PAIML Team")]
#[command(version)]
#[command(about = "Color conversions, contrast, palettes and extraction", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show a color as hex, RGB, HSL and HSV
    Convert {
        /// Hex color, e.g. #2E8B57
        color: String,
    },

    /// WCAG contrast between text and background
    Contrast {
        /// Text color
        foreground: String,
        /// Background color
        background: String,
    },

    /// Rule-based palette from a base color
    Palette {
        /// Base color
        base: String,
        /// monochromatic, analogous, complementary, triadic or tetradic
        #[arg(short, long, default_value = "monochromatic")]
        scheme: String,
        /// Write the palette as JSON into the export directory
        #[arg(long)]
        export: bool,
        /// Export directory (overrides config)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Color-wheel harmony for a hue
    Harmony {
        /// Hue in degrees
        #[arg(allow_hyphen_values = true)]
        hue: f64,
        /// complementary, analogous, triadic or split-complementary
        #[arg(short = 't', long = "type", default_value = "complementary")]
        harmony: String,
    },

    /// Color psychology for a hue
    Psychology {
        /// Hue in degrees
        #[arg(allow_hyphen_values = true)]
        hue: f64,
    },

    /// Dominant colors of a PNG image
    Extract {
        /// PNG file
        image: PathBuf,
        /// Number of colors (overrides config)
        #[arg(short)]
        k: Option<usize>,
        /// RNG seed for reproducible output (overrides config)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Linear gradient between two colors
    Gradient {
        /// Start color
        start: String,
        /// End color
        end: String,
        /// CSS direction, e.g. "to right" or 135deg
        #[arg(short, long, default_value = "to right")]
        direction: String,
        /// Print this many evenly spaced stops
        #[arg(long)]
        stops: Option<usize>,
        /// Render a PNG preview to this path
        #[arg(long)]
        png: Option<PathBuf>,
        /// Preview width
        #[arg(long, default_value = "400")]
        width: u32,
        /// Preview height
        #[arg(long, default_value = "200")]
        height: u32,
    },

    /// Manage saved colors
    Saved {
        #[command(subcommand)]
        action: SavedAction,
    },

    /// Random colors
    Random {
        /// Number of colors
        #[arg(short, default_value = "12")]
        n: usize,
        /// RNG seed
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Subcommand, Debug)]
enum SavedAction {
    /// List saved colors with their indices
    List,
    /// Save a color
    Add {
        /// Hex color
        color: String,
    },
    /// Remove the color at an index
    Remove {
        /// Index shown by `saved list`
        index: usize,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match cli.config.as_ref() {
        Some(path) => Config::load(path)?,
        None => Config::default_path().map(Config::load_or_default).unwrap_or_default(),
    };

    run(cli.command, &config)
}

/// Log to stderr so command output stays pipeable.
fn init_tracing() {
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Convert { color } => {
            let rgb: Rgb = color.parse()?;
            let hsv = rgb.to_hsv();
            println!("hex  {rgb}");
            println!("rgb  {}", rgb.css());
            println!("hsl  {}", rgb.to_hsl().css());
            println!("hsv  hsv({}, {}%, {}%)", hsv.h, hsv.s, hsv.v);
        }
        Command::Contrast {
            foreground,
            background,
        } => {
            let report = ContrastReport::new(foreground.parse()?, background.parse()?);
            println!("{}", report.ratio_label());
            for level in WcagLevel::ALL {
                let mark = if report.passes(level) { "pass" } else { "fail" };
                println!("{:<11} {mark}", level.label());
            }
        }
        Command::Palette {
            base,
            scheme,
            export,
            out,
        } => {
            let palette = Palette::generate(base.parse()?, scheme.parse()?);
            for entry in &palette.entries {
                println!("{:<9} {}", entry.label, entry.color);
            }
            if export {
                let dir = out.unwrap_or_else(|| config.export.directory.clone());
                let path = palette.export().write_to_dir(&dir)?;
                println!("exported {}", path.display());
            }
        }
        Command::Harmony { hue, harmony } => {
            let harmony: Harmony = harmony.parse()?;
            for color in harmony.colors(hue) {
                println!("{color}");
            }
        }
        Command::Psychology { hue } => {
            let record = psychology_for_hue(hue);
            println!("{}", record.name);
            println!("emotions  {}", record.emotions);
            println!("usage     {}", record.usage);
            println!("cultural  {}", record.cultural);
        }
        Command::Extract { image, k, seed } => {
            let mut settings = config.extraction.clone();
            if let Some(k) = k {
                settings.k = k;
            }
            if seed.is_some() {
                settings.seed = seed;
            }

            let buffer = PixelBuffer::open(&image).with_context(|| format!("reading {}", image.display()))?;
            let colors = settings.extractor().extract_image(&buffer)?;
            if colors.is_empty() {
                println!("no opaque pixels sampled");
            }
            for dominant in colors {
                println!("{}  {}", dominant.color, dominant.count);
            }
        }
        Command::Gradient {
            start,
            end,
            direction,
            stops,
            png,
            width,
            height,
        } => {
            let gradient = Gradient::new(start.parse()?, end.parse()?, direction.parse()?);
            println!("{}", gradient.declaration());
            if let Some(n) = stops {
                for color in gradient.stops(n) {
                    println!("{color}");
                }
            }
            if let Some(path) = png {
                gradient.render(width, height)?.write_png(&path)?;
                println!("wrote {}", path.display());
            }
        }
        Command::Saved { action } => {
            let mut store = SavedColors::open(config.store.backend())?;
            match action {
                SavedAction::List => {
                    if store.is_empty() {
                        println!("no saved colors");
                    }
                    for (i, hex) in store.list().iter().enumerate() {
                        println!("{i:>3}  {hex}");
                    }
                }
                SavedAction::Add { color } => match store.add(&color)? {
                    AddOutcome::Added => println!("saved"),
                    AddOutcome::AlreadyPresent => println!("already saved"),
                },
                SavedAction::Remove { index } => {
                    let removed = store.remove_at(index)?;
                    println!("removed {removed}");
                }
            }
        }
        Command::Random { n, seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            for color in random_palette(&mut rng, n) {
                println!("{color}");
            }
        }
    }
    Ok(())
}
