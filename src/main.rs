use color_eyre::Result;
use ssetap::cli::{parse_args, run_cli_command};
use ssetap::config::TapConfig;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    // Logs go to stderr so replayed events on stdout stay machine-readable
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let config = TapConfig::from_env()?;
    let stdout = std::io::stdout();
    run_cli_command(command, config, &mut stdout.lock())?;
    Ok(())
}
