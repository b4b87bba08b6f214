use anyhow::Result;
use gallery_thumbnailer::component::ThumbnailGenerator;
use gallery_thumbnailer::config::Config;
use gallery_thumbnailer::init;
use gallery_thumbnailer::signal::setup_shutdown_signal;
use log::info;

fn main() -> Result<()> {
    init::init();
    let shutdown_signal = setup_shutdown_signal()?;

    let config = Config::new()?;
    let generator = ThumbnailGenerator::new(config, shutdown_signal);
    let summary = generator.run()?;
    summary.ensure_completed()?;

    info!(
        "Program exited normally ({} failed images)",
        summary.total_failures()
    );
    Ok(())
}
