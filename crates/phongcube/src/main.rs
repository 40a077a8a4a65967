use anyhow::Result;
use clap::Parser;

use phongcube_engine::logging::init_logging;
use phongcube_engine::window::Runtime;

mod app;
mod config;

use app::CubeApp;
use config::{Args, DemoConfig};

fn main() -> Result<()> {
    let config = DemoConfig::from(Args::parse());

    init_logging(config.logging.clone());
    log::info!(
        "opening {:.0}x{:.0} window \"{}\"",
        config.runtime.initial_size.width,
        config.runtime.initial_size.height,
        config.runtime.title
    );

    let app = CubeApp::new(&config)?;
    Runtime::run(config.runtime, config.gpu, app)
}
