//! tagtile - bitmap conversion and dataset export tool
//!
//! Exposes the label/scalar-field/mask renderers, crop and coordinate
//! helpers, and the export settings dialog from the command line.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "tagtile")]
#[command(author, version, about = "Bitmap conversion and dataset export tool")]
#[command(long_about = "
Renders label maps, scalar fields and masks into packed 32-bit bitmaps,
and hosts the \"Export New Dataset\" settings dialog.

Grids are plain text: one row per line, values separated by whitespace or
commas, '#' starts a comment line. Use '-' to read from stdin.

Bitmaps are written as raw B,G,R,A bytes with -o, or printed as hex.

Examples:
  tagtile labels seg.txt -o seg.bgra        # Label ids -> colours
  tagtile floatmap dem.txt --nodata -9999   # Heightmap -> grey
  tagtile mask mask.txt                     # 0/1 mask -> black/white
  tagtile crop seg.bgra --size 640x480 --area 10,20,100,50 -o crop.bgra
  tagtile clamp -- -5 -5 100 50             # -> 0,0
  tagtile date 2024-02-29 2023-02-29
  tagtile polyline --rows 0,0 --cols 0,5
  tagtile area 10.7 2.2 300.9 150.1         # -> 10,2,300,150
  tagtile dialog --area 0,0,512,512
  tagtile dialog --saved                    # Last session's settings
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a label id grid with the label colour table
    #[command(visible_alias = "l")]
    Labels(LabelsArgs),

    /// Render a float grid (heightmap) as normalized grey
    #[command(visible_alias = "f")]
    Floatmap(FloatmapArgs),

    /// Render a 0/1 mask or an 8-bit grey grid
    #[command(visible_alias = "m")]
    Mask(MaskArgs),

    /// Crop a raw bitmap to a working area
    Crop(CropArgs),

    /// Clamp a point into [0, max_x] x [0, max_y]
    Clamp(ClampArgs),

    /// Validate YYYY-MM-DD dates
    Date(DateArgs),

    /// Rasterize an open polyline into grid cells
    #[command(visible_alias = "p")]
    Polyline(PolylineArgs),

    /// Format or parse working-area text
    Area(AreaArgs),

    /// Open the export settings dialog
    #[command(visible_alias = "d")]
    Dialog(DialogArgs),
}

/// Where a rendered bitmap goes.
#[derive(Args)]
struct OutputArgs {
    /// Output file for raw B,G,R,A bytes (prints hex when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct LabelsArgs {
    /// Label id grid ('-' for stdin)
    input: PathBuf,

    #[command(flatten)]
    out: OutputArgs,
}

#[derive(Args)]
struct FloatmapArgs {
    /// Float grid ('-' for stdin)
    input: PathBuf,

    /// No-data sentinel value
    #[arg(long, allow_negative_numbers = true)]
    nodata: Option<f32>,

    /// Fail on a flat field instead of rendering black
    #[arg(long)]
    strict: bool,

    #[command(flatten)]
    out: OutputArgs,
}

#[derive(Args)]
struct MaskArgs {
    /// Mask grid ('-' for stdin)
    input: PathBuf,

    /// Treat values as 0-255 grey levels instead of a 0/1 mask
    #[arg(long)]
    gray: bool,

    #[command(flatten)]
    out: OutputArgs,
}

#[derive(Args)]
struct CropArgs {
    /// Raw B,G,R,A bitmap
    input: PathBuf,

    /// Bitmap size as WIDTHxHEIGHT
    #[arg(short, long)]
    size: String,

    /// Pixel format of the input
    #[arg(short, long, default_value = "rgb32")]
    format: String,

    /// Working area as top,left,width,height
    #[arg(short, long)]
    area: String,

    /// Write interleaved R,G,B bytes instead of B,G,R,A
    #[arg(long)]
    rgb: bool,

    #[command(flatten)]
    out: OutputArgs,
}

#[derive(Args)]
struct ClampArgs {
    /// X coordinate
    #[arg(allow_negative_numbers = true)]
    x: i64,
    /// Y coordinate
    #[arg(allow_negative_numbers = true)]
    y: i64,
    /// Largest allowed X (inclusive)
    #[arg(allow_negative_numbers = true)]
    max_x: i64,
    /// Largest allowed Y (inclusive)
    #[arg(allow_negative_numbers = true)]
    max_y: i64,
}

#[derive(Args)]
struct DateArgs {
    /// Dates to check
    #[arg(required = true)]
    dates: Vec<String>,

    /// Exit with an error if any date is invalid
    #[arg(long)]
    check: bool,
}

#[derive(Args)]
struct PolylineArgs {
    /// Vertex rows, comma separated
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true, required = true)]
    rows: Vec<f64>,

    /// Vertex columns, comma separated
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true, required = true)]
    cols: Vec<f64>,

    /// Label grid to stamp the curve onto (renders a bitmap)
    #[arg(long, requires = "bbox")]
    mask: Option<PathBuf>,

    /// Global top,left,width,height of the mask grid
    #[arg(long)]
    bbox: Option<String>,

    #[command(flatten)]
    out: OutputArgs,
}

#[derive(Args)]
struct AreaArgs {
    /// Either one "top,left,width,height" string or four numbers
    #[arg(required = true, num_args = 1..=4, allow_negative_numbers = true)]
    fields: Vec<String>,
}

#[derive(Args)]
struct DialogArgs {
    /// Initial working area as top,left,width,height
    #[arg(short, long)]
    area: Option<String>,

    /// Label grid shown as preview
    #[arg(short, long)]
    preview: Option<PathBuf>,

    /// Print the settings saved by the last session and exit
    #[arg(long, conflicts_with_all = ["area", "preview"])]
    saved: bool,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Labels(args) => commands::labels::run(args, cli.verbose),
        Commands::Floatmap(args) => commands::floatmap::run(args, cli.verbose),
        Commands::Mask(args) => commands::mask::run(args, cli.verbose),
        Commands::Crop(args) => commands::crop::run(args, cli.verbose),
        Commands::Clamp(args) => commands::clamp::run(args),
        Commands::Date(args) => commands::date::run(args),
        Commands::Polyline(args) => commands::polyline::run(args, cli.verbose),
        Commands::Area(args) => commands::area::run(args),
        Commands::Dialog(args) => commands::dialog::run(args, cli.verbose),
    }
}
