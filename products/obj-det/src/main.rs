use {
    clap::Parser,
    obj_det::{Args, NodeConfig, constants, run, strip_ros_args},
    std::error::Error,
};

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse_from(strip_ros_args(std::env::args()));
    let config = NodeConfig::from_args(args)?;

    match &config.log_dir {
        Some(dir) => base::init_file_logger(dir, constants::NODE_NAME)?,
        None => base::init_stdout_logger(constants::NODE_NAME),
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let shutdown = runtime.block_on(run(config))?;
    log::debug!("stopped: {:?}", shutdown);

    Ok(())
}
