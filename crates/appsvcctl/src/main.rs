use anyhow::Result;
use appsvcctl_core::Config;
use clap::Parser;
use tracing::{debug, error, info, trace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod connection;
mod error;
mod output;

use cli::{Cli, Commands};
use connection::ConnectionManager;
use error::AppSvcCtlError;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level
    init_tracing(cli.verbose);

    // Load configuration from specified path or default location
    let (config, config_path) = if let Some(config_file) = &cli.config_file {
        let path = std::path::PathBuf::from(config_file);
        debug!("Loading config from explicit path: {:?}", path);
        let config = Config::load_from_path(&path)?;
        (config, Some(path))
    } else {
        debug!("Loading config from default location");
        (Config::load()?, None)
    };
    debug!(
        "Creating ConnectionManager with config_path: {:?}",
        config_path
    );
    let conn_mgr = ConnectionManager::with_config_path(config, config_path);

    if let Err(e) = execute_command(&cli, &conn_mgr).await {
        // A cancelled prompt is not an error; exit the way an
        // interrupted foreground process would
        if matches!(e, AppSvcCtlError::Cancelled) {
            std::process::exit(130);
        }
        eprintln!("{}", e.display_with_suggestions());
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    // Check for RUST_LOG env var first, then fall back to verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "appsvcctl=warn,appsvcctl_core=warn,azure_arm=warn",
            1 => "appsvcctl=info,appsvcctl_core=info,azure_arm=info",
            2 => "appsvcctl=debug,appsvcctl_core=debug,azure_arm=debug",
            _ => "appsvcctl=trace,appsvcctl_core=trace,azure_arm=trace",
        };
        tracing_subscriber::EnvFilter::new(level)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact(),
        )
        .init();

    debug!("Tracing initialized with verbosity level: {}", verbose);
}

async fn execute_command(cli: &Cli, conn_mgr: &ConnectionManager) -> error::Result<()> {
    trace!("Executing command: {:?}", cli.command);
    info!("Command: {}", format_command(&cli.command));

    let start = std::time::Instant::now();
    let result = match &cli.command {
        Commands::Version => {
            debug!("Showing version information");
            match cli.output {
                cli::OutputFormat::Json | cli::OutputFormat::Yaml => {
                    let output_data = serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "name": env!("CARGO_PKG_NAME"),
                    });
                    output::print_output(output_data, commands::render_format(cli.output))?;
                }
                _ => {
                    println!("appsvcctl {}", env!("CARGO_PKG_VERSION"));
                }
            }
            Ok(())
        }

        Commands::Webapp(webapp_cmd) => {
            commands::webapp::handle_webapp_command(
                webapp_cmd,
                conn_mgr,
                cli.profile.as_deref(),
                cli.output,
            )
            .await
        }

        Commands::Plan(plan_cmd) => {
            commands::plan::handle_plan_command(
                plan_cmd,
                conn_mgr,
                cli.profile.as_deref(),
                cli.output,
            )
            .await
        }

        Commands::Group(group_cmd) => {
            commands::group::handle_group_command(
                group_cmd,
                conn_mgr,
                cli.profile.as_deref(),
                cli.output,
            )
            .await
        }

        Commands::Subscription(sub_cmd) => {
            commands::subscription::handle_subscription_command(
                sub_cmd,
                conn_mgr,
                cli.profile.as_deref(),
                cli.output,
            )
            .await
        }

        Commands::Profile(profile_cmd) => {
            debug!("Executing profile command");
            commands::profile::handle_profile_command(profile_cmd, conn_mgr, cli.output).await
        }
    };

    let duration = start.elapsed();
    match &result {
        Ok(_) => info!("Command completed successfully in {:?}", duration),
        Err(AppSvcCtlError::Cancelled) => info!("Command cancelled after {:?}", duration),
        Err(e) => error!("Command failed after {:?}: {}", duration, e),
    }

    result
}

/// Format command for human-readable logging (without sensitive data)
fn format_command(command: &Commands) -> String {
    match command {
        Commands::Version => "version".to_string(),
        Commands::Webapp(cmd) => {
            use cli::WebappCommands::*;
            match cmd {
                Create { name, .. } => format!("webapp create {:?}", name),
                List { group } => format!("webapp list {:?}", group),
                Show { name, group } => format!("webapp show {} -g {}", name, group),
                Credentials { name, group } => {
                    format!("webapp credentials {} -g {} [output redacted]", name, group)
                }
                WaitState { name, state, .. } => format!("webapp wait-state {} {}", name, state),
            }
        }
        Commands::Plan(cmd) => format!("plan {:?}", cmd),
        Commands::Group(cmd) => format!("group {:?}", cmd),
        Commands::Subscription(cmd) => format!("subscription {:?}", cmd),
        Commands::Profile(cmd) => {
            use cli::ProfileCommands::*;
            match cmd {
                List => "profile list".to_string(),
                Path => "profile path".to_string(),
                Show { name } => format!("profile show {}", name),
                Set { name, .. } => format!("profile set {} [credentials redacted]", name),
                Remove { name } => format!("profile remove {}", name),
                Default { name } => format!("profile default {}", name),
            }
        }
    }
}
