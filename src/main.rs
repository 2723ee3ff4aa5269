use anyhow::Result;
use clap::Parser;
use ricorda::cli::commands::Cli;
use ricorda::cli::commands::Commands;
use ricorda::cli::handlers;
use ricorda::config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default();

    if cli.verbose {
        ricorda::logging::init_logging_with_level("debug")?;
    } else {
        ricorda::logging::init_logging_with_config(Some(&config))?;
    }

    match cli.command {
        Commands::Remember { namespace, text } => {
            handlers::handle_remember_command(&config, &namespace, &text).await?;
        }
        Commands::Search {
            namespace,
            query,
            limit,
            threshold,
        } => {
            handlers::handle_search_command(&config, &namespace, &query, limit, threshold).await?;
        }
        Commands::Forget { namespace, force } => {
            handlers::handle_forget_command(&config, &namespace, force).await?;
        }
        Commands::Draft {
            brief,
            namespace,
            phase,
            variants,
        } => {
            handlers::handle_draft_command(&config, &brief, &namespace, phase.as_deref(), variants)
                .await?;
        }
        Commands::Phase { value, namespace } => {
            handlers::handle_phase_command(&config, &namespace, value.as_deref());
        }
        Commands::Status => {
            handlers::handle_status_command(&config);
        }
    }

    Ok(())
}
