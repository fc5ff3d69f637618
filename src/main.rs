use anyhow::Result;

use commandstate::commands::{self, monitor};

fn main() -> Result<()> {
    let matches = monitor::command().get_matches();

    let config = match monitor::config_from_matches(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    commandstate::init_logging(config.log_file.as_deref())?;
    commands::monitor(&config)
}
