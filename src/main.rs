use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pointswarm::{Config, ObjMesh, Scene, ViewerError};
use tracing_subscriber::EnvFilter;

/// Particles wandering across the point grid of a mesh.
#[derive(Parser, Debug)]
#[command(name = "pointswarm", version, about)]
struct Args {
    /// Wavefront OBJ model to sample.
    model: PathBuf,

    /// JSON configuration; missing fields keep their defaults.
    config: Option<PathBuf>,

    /// Seed for spawn points, colors and targets. Random if omitted.
    #[arg(long)]
    seed: Option<u64>,
}

fn run(args: Args) -> Result<(), ViewerError> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "starting");

    let mesh = ObjMesh::load(&args.model, true)?;
    let scene = Scene::new(config, &mesh, seed)?;
    pointswarm::viewer::run(scene)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
