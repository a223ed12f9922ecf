use chainkit::{chain_summary, init_logging, load_transmission, MeasurementSystem};
use std::path::PathBuf;
use tracing::info;

const USAGE: &str = "usage: chainkit <layout.toml|layout.json> [mm|in]";

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| anyhow::anyhow!(USAGE))?;
    let units = match args.next() {
        Some(arg) => arg
            .parse::<MeasurementSystem>()
            .map_err(|e| anyhow::anyhow!("{}\n{}", e, USAGE))?,
        None => MeasurementSystem::Metric,
    };

    let (solution, layout) = load_transmission(&path)?;

    info!("{}", chain_summary(&solution, units));
    for sprocket in layout.sprockets() {
        info!(
            "Sprocket {}: {} teeth, rotate {:.4} deg",
            sprocket.index,
            sprocket.profile.teeth(),
            sprocket.rotation
        );
    }

    Ok(())
}
