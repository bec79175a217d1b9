use anyhow::Context;
use gpu_life::LifeConfig;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = LifeConfig::from_env();
    config.validate().context("invalid configuration")?;
    log::info!(
        "Starting {}x{} simulation in a {}x{} window at {} fps",
        config.sim_width,
        config.sim_height,
        config.window_width,
        config.window_height,
        config.fps
    );

    gpu_life::run(config).context("game of life terminated with an error")?;
    log::info!("Shut down cleanly");
    Ok(())
}
