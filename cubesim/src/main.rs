use cubesim::{Scenario, ScenarioConfig};
use cubesim::run_3d;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cubesim", about = "Bouncing, spinning cubes with gravity and elastic collisions")]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, default_value = "cube_scene.yaml")]
    file_name: String,

    /// Step on a fixed clock without opening a window
    #[arg(long)]
    headless: bool,

    /// Number of ticks for a headless run
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Log filter when RUST_LOG is unset
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("invalid log level `{level}`"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
    Ok(())
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level)?;

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg)?;

    if args.headless {
        let report = scenario.run_fixed(args.ticks);
        info!(
            ticks = args.ticks,
            reflections = report.reflections,
            collisions = report.collisions,
            "headless run finished"
        );
        for id in scenario.state.ids() {
            if let Some(b) = scenario.state.body(id) {
                let pose = b.pose();
                info!(
                    body = %b.label(id),
                    x = ?[pose.translation.x, pose.translation.y, pose.translation.z],
                    rotation = pose.angle_deg,
                    "final pose"
                );
            }
        }
    } else {
        run_3d(scenario);
    }

    Ok(())
}
