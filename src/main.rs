use anyhow::Context as _;
use clap::{Parser, Subcommand};
use std::f64::consts::PI;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use wheeler::config;
use wheeler::gui::canvas::CairoCanvas;
use wheeler::gui::entry::{Entry, EntryContext};
use wheeler::gui::{DrawArgs, EntryGeometry, Point};
use wheeler::item::{InventoryItemFactory, InventorySnapshot};

#[derive(Parser, Debug)]
#[command(name = "wheeler", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render one persisted wheel entry to a PNG.
    Preview {
        /// Entry JSON as written by the wheel (`selecteditem` + `items`)
        state: PathBuf,

        #[arg(short = 'o', long, default_value = "wheeler-preview.png")]
        out: PathBuf,

        /// Number of entries on the wheel
        #[arg(long, default_value_t = 8)]
        count: usize,

        /// Position of this entry on the wheel
        #[arg(long, default_value_t = 0)]
        index: usize,

        /// Render the entry as hovered (highlight + counter)
        #[arg(long)]
        hovered: bool,

        /// Image width and height in pixels
        #[arg(long, default_value_t = 800)]
        size: i32,
    },
    /// Write the default config file if none exists and print its path.
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Preview {
            state,
            out,
            count,
            index,
            hovered,
            size,
        } => preview(&state, &out, count, index, hovered, size),
        Commands::InitConfig => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn preview(
    state: &Path,
    out: &Path,
    count: usize,
    index: usize,
    hovered: bool,
    size: i32,
) -> anyhow::Result<()> {
    let config = Arc::new(config::load_or_default());

    let raw = fs_err::read_to_string(state)?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", state.display()))?;

    // activations are never triggered here; the receiver can go
    let (tx, _rx) = async_channel::unbounded();
    let factory = Arc::new(InventoryItemFactory::new(tx));
    let entry = Entry::deserialize(&value, EntryContext::new(config.clone(), factory))?;
    log::info!("loaded {} item(s) from {}", entry.len(), state.display());

    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, size, size)?;
    {
        let cr = cairo::Context::new(&surface)?;
        let mut canvas = CairoCanvas::new(&cr);
        let center = Point::new(size as f64 / 2.0, size as f64 / 2.0);
        let spacing = PI / 180.0;
        let geometry = EntryGeometry::wedge(index, count, center, spacing, &config.wheel);
        let inv = InventorySnapshot::new();

        entry.draw_background(&geometry, hovered, &inv, &mut canvas, DrawArgs::default())?;
        entry.draw_slot_and_highlight(
            geometry.wheel_center,
            geometry.item_center,
            hovered,
            &inv,
            &mut canvas,
            DrawArgs::default(),
        )?;
    }

    let mut file = fs_err::File::create(out)?;
    surface
        .write_to_png(&mut file)
        .with_context(|| format!("writing {}", out.display()))?;
    println!("{}", out.display());
    Ok(())
}
