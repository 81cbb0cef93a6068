mod actions;
mod app;
mod cli;
mod component;
mod config;
mod page;
mod theme;
mod tui;
mod utils;

use app::{App, RootState};
use clap::Parser;
use color_eyre::eyre::{Context, Result};
use dotenv::dotenv;

#[cfg(not(tarpaulin_include))]
async fn run() -> Result<()> {
    use cli::ClapSource;

    let args = cli::Cli::parse();

    let config = crate::config::Config::new(Some(ClapSource::new(&args)))
        .context("Error when loading config")?;
    utils::logging::init(&config.config.data_dir).context("Error when setting up logging")?;

    let state = RootState::new(config);
    let mut app = App::new(
        state,
        tui::Tui::new()?
            .tick_rate(args.tick_rate)
            .frame_rate(args.frame_rate)
            .paste(true)
            .into(),
    );

    app.run().await
}

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> Result<()> {
    dotenv().ok();
    utils::errors::init()?;

    run().await
}
