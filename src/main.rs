use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use impactsim::{
    config::EngineConfig,
    engine::Engine,
    params::ImpactRequest,
    scenario::PresetLoader,
    web::{self, WebServerConfig},
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Asteroid impact consequence calculator")]
struct Cli {
    /// Calibration YAML file (built-in defaults when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute one impact and print the result as JSON
    Compute(ComputeArgs),
    /// Serve the HTTP API
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },
}

#[derive(Debug, clap::Args)]
struct ComputeArgs {
    /// Load the impactor from a preset (file stem or name); other flags override it
    #[arg(long)]
    preset: Option<String>,

    /// Directory holding preset YAML files
    #[arg(long, default_value = "presets")]
    preset_dir: PathBuf,

    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Impactor diameter (m)
    #[arg(long, required_unless_present = "preset")]
    size: Option<f64>,

    /// Entry speed (km/s)
    #[arg(long, required_unless_present = "preset")]
    speed: Option<f64>,

    /// Entry angle from the horizontal (degrees) [default: 45]
    #[arg(long)]
    angle: Option<f64>,

    /// stone, iron or ice [default: stone]
    #[arg(long)]
    material: Option<String>,

    /// ground, water, airburst or fragmentation [default: ground]
    #[arg(long)]
    scenario: Option<String>,

    /// Ground type: rock, sand or soil
    #[arg(long)]
    target: Option<String>,

    #[arg(long)]
    water_depth: Option<f64>,

    #[arg(long)]
    burst_height: Option<f64>,

    #[arg(long)]
    fragments: Option<u32>,

    /// Fix the random seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

impl ComputeArgs {
    fn request(&self) -> Result<ImpactRequest> {
        let mut request = match &self.preset {
            Some(key) => PresetLoader::new(&self.preset_dir).find(key)?.impact,
            None => ImpactRequest {
                lat: 0.0,
                lon: 0.0,
                size: self.size.context("--size is required")?,
                speed: self.speed.context("--speed is required")?,
                angle: 45.0,
                material: "stone".to_string(),
                scenario: "ground".to_string(),
                water_depth_m: None,
                burst_height_km: None,
                fragments: None,
                target: None,
            },
        };

        if let Some(lat) = self.lat {
            request.lat = lat;
        }
        if let Some(lon) = self.lon {
            request.lon = lon;
        }
        if let Some(size) = self.size {
            request.size = size;
        }
        if let Some(speed) = self.speed {
            request.speed = speed;
        }
        if let Some(angle) = self.angle {
            request.angle = angle;
        }
        if let Some(material) = &self.material {
            request.material = material.clone();
        }
        if let Some(scenario) = &self.scenario {
            request.scenario = scenario.clone();
        }
        if let Some(target) = &self.target {
            request.target = Some(target.clone());
        }
        request.water_depth_m = self.water_depth.or(request.water_depth_m);
        request.burst_height_km = self.burst_height.or(request.burst_height_km);
        request.fragments = self.fragments.or(request.fragments);
        Ok(request)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_yaml(path)?,
        None => EngineConfig::default(),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    match cli.command {
        Command::Compute(args) => {
            if let Some(seed) = args.seed {
                config.rng.seed = Some(seed);
            }
            let request = args.request()?;
            let engine = Engine::new(config)?;
            let result = engine.compute_request(&request)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Serve { host, port } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(web::run(WebServerConfig { config, host, port }))?;
        }
    }
    Ok(())
}
