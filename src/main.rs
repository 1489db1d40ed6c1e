//! BWE Souschef - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use bwe_souschef::{
    cli::Args,
    config::{validate_config, Config},
    convert::driver::run,
    error::{exit_codes, Result},
    output::{
        print_banner, print_config_summary, print_error, print_failures, print_info,
        print_run_stats, print_success, print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match execute().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

async fn execute() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration
    let config_path = args.config.clone();
    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        print_warning(&format!(
            "Configuration file not found: {}",
            config_path.display()
        ));
        print_info("Using built-in channel settings with CLI arguments");
        Config::default()
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    validate_config(&config)?;

    print_config_summary(
        &config.channel.name,
        &config.input.path.display().to_string(),
        &config.output_path().display().to_string(),
        config.options.row_limit,
    );

    let summary = run(&config).await?;

    print_run_stats(&summary.stats);
    print_failures(&summary.stats.failures);

    print_success(&format!("Zip created at {}", summary.output.display()));
    Ok(())
}
