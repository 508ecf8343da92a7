use std::process::ExitCode;

use deltoid_demo::DemoConfig;
use deltoid_engine::logging::{init_logging, LoggingConfig};

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    log::info!("arrows move, W/S scale, A/D rotate");

    match deltoid_demo::run(DemoConfig::default()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
