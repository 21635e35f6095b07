use clap::Parser;
use log::info;
use shoreline::batch::seed_range;
use shoreline::render::save_png;
use shoreline::{Error, GenerationParams, GeographicSetting, TerrainBundle, generate_batch};
use std::fs;
use std::path::{Path, PathBuf};

/// Seeded terrain generator: ocean, coastline, lakes, rivers, contours and beaches
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML file with generation parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed (overrides the config file)
    #[arg(short, long, allow_negative_numbers = true)]
    seed: Option<i64>,

    /// Side of the square world in world units
    #[arg(long)]
    size: Option<f64>,

    /// Geographic setting, e.g. `coastal`, `bay_harbor`, `delta`
    #[arg(long)]
    setting: Option<GeographicSetting>,

    /// Write the bundle as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write a PNG preview
    #[arg(long)]
    png: Option<PathBuf>,

    /// Number of consecutive seeds to generate
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let mut params = if let Some(path) = &cli.config {
        info!("loading {}", path.display());
        GenerationParams::from_toml_file(path)?
    } else {
        GenerationParams::default()
    };
    if let Some(seed) = cli.seed {
        params.seed = seed;
    }
    if let Some(size) = cli.size {
        params.world_size = size;
    }
    if cli.setting.is_some() {
        params.setting = cli.setting;
    }
    params.validate()?;

    let seeds = seed_range(params.seed, cli.count.max(1));
    let bundles = generate_batch(&params, &seeds);
    let many = bundles.len() > 1;

    for bundle in &bundles {
        println!(
            "seed {}: {} ({} lakes, {} rivers)",
            bundle.seed,
            bundle.archetype,
            bundle.lakes().count(),
            bundle.rivers.len()
        );
        if let Some(path) = &cli.json {
            let path = output_path(path, bundle.seed, many);
            write_json(bundle, &path)?;
            info!("wrote {}", path.display());
        }
        if let Some(path) = &cli.png {
            let path = output_path(path, bundle.seed, many);
            save_png(bundle, params.render.image_size, &path)?;
            info!("wrote {}", path.display());
        }
    }
    Ok(())
}

/// `terrain.json` becomes `terrain-42.json` when several seeds are written.
fn output_path(path: &Path, seed: i64, many: bool) -> PathBuf {
    if !many {
        return path.to_path_buf();
    }
    let stem = path
        .file_stem()
        .map_or_else(|| "terrain".into(), |s| s.to_string_lossy());
    let name = if let Some(ext) = path.extension() {
        format!("{stem}-{seed}.{}", ext.to_string_lossy())
    } else {
        format!("{stem}-{seed}")
    };
    path.with_file_name(name)
}

fn write_json(bundle: &TerrainBundle, path: &Path) -> Result<(), Error> {
    let json = serde_json::to_string_pretty(bundle)?;
    fs::write(path, json).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
