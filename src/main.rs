use anyhow::Context;
use clap::Parser;
use spark_submit_plugin::config::{env_snapshot, SubmitConfig};
use spark_submit_plugin::plugin::{Outcome, Plugin, APP_NAME};
use spark_submit_plugin::subprocess::SubprocessManager;
use spark_submit_plugin::template::{CommandAssembler, SPARK_SUBMIT_BIN};
use tracing::{debug, error, trace};
use tracing_subscriber::EnvFilter;

/// Assemble and run a spark-submit command from plugin settings
#[derive(Parser)]
#[command(name = APP_NAME, version, long_about = None)]
struct Cli {
    /// Spark submit options (JSON object)
    #[arg(long = "plugin.spark.submit.options", env = "PLUGIN_SPARK_SUBMIT_OPTIONS", default_value = "")]
    submit_options: String,

    /// Spark submit spark configs (JSON object)
    #[arg(long = "plugin.spark.submit.configs", env = "PLUGIN_SPARK_SUBMIT_CONFIGS", default_value = "")]
    submit_configs: String,

    /// Spark submit application arguments (comma separated)
    #[arg(long = "plugin.spark.submit.app_args", env = "PLUGIN_SPARK_SUBMIT_APP_ARGS", default_value = "")]
    app_args: String,

    /// Path of the spark-submit binary
    #[arg(long, env = "PLUGIN_SPARK_SUBMIT_BIN", default_value = SPARK_SUBMIT_BIN)]
    spark_submit_bin: String,

    /// Print the assembled command instead of running it
    #[arg(
        long,
        env = "PLUGIN_DRY_RUN",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    dry_run: bool,

    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stdout)
        .with_target(cli.verbose >= 2)
        .init();

    debug!("{} started with verbosity level: {}", APP_NAME, cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = run(cli).await {
        error!("plugin execution failed with the error: {:#}", e);
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = SubmitConfig::from_raw(
        &cli.submit_options,
        &cli.submit_configs,
        &cli.app_args,
        env_snapshot(),
    )
    .context("failed to read plugin settings")?;

    let assembler = CommandAssembler::with_binary(cli.spark_submit_bin)?;
    let mut plugin = Plugin::new(config, assembler, SubprocessManager::production())
        .dry_run(cli.dry_run);

    match plugin.exec().await? {
        Outcome::DryRun { command } => println!("{command}"),
        Outcome::Submitted { .. } => debug!("spark submit finished successfully"),
    }

    Ok(())
}
