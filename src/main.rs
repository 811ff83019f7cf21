use std::process::ExitCode;

use geolocator::config::{Cli, load_config};
use geolocator::errors::GeolocatorError;
use geolocator::runtime::run_server;
use geolocator::system::logging::init_logging;

#[actix_web::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let (cli, overrides) = Cli::try_parse_args(std::env::args_os()).unwrap_or_else(|e| e.exit());

    let config = match load_config(cli.config.as_deref(), &overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            return ExitCode::FAILURE;
        }
    };

    let _guard = match init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("[ERROR] Failed to initialize logging: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = run_server(&config).await {
        match e.downcast_ref::<GeolocatorError>() {
            Some(err) if err.is_fatal() => eprintln!("{}", err.format_colored()),
            Some(err) => eprintln!("[ERROR] {}", err.format_simple()),
            None => eprintln!("[ERROR] {:#}", e),
        }
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
