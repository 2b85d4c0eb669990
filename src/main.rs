use clap::Parser;
use tracing_subscriber::EnvFilter;

use fractal_stream::{CliArgs, CliRenderController, PpmFilePresenter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = CliArgs::parse();
    let config = args.run_config()?;
    let mut controller = CliRenderController::new(PpmFilePresenter::new(), config);

    let metrics = controller.generate()?;
    tracing::info!(
        elapsed_ms = metrics.elapsed.as_millis() as u64,
        failed_batches = metrics.batches_failed,
        "render finished"
    );

    controller.write(&args.output)?;

    Ok(())
}
