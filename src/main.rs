use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

use gist::config::Config;
use gist::model::bundle::BundleModel;
use gist::params::ParamsStore;
use gist::wrapper::ModelsWrapper;

/// gist: topic and summary API backend.
///
/// Serves topics, related documents, and extractive summaries from an
/// offline-trained model bundle.
#[derive(Parser)]
#[command(name = "gist", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,

        /// Port to listen on
        #[arg(long, default_value = "5000")]
        port: u16,
    },

    /// Validate that the configured params file and model bundle load cleanly
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gist=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind, port } => {
            let config = Config::load()?;
            config.require_params()?;
            config.require_model()?;

            let wrapper = Arc::new(ModelsWrapper::from_config(&config)?);
            gist::web::run_server(config, wrapper, &bind, port).await?;
        }

        Commands::Check => {
            let config = Config::load()?;

            println!("Checking configuration...");
            println!("  Params file:  {}", config.params_file.display());
            println!("  Model bundle: {}", config.model_bundle_path.display());
            println!("  Static root:  {}", config.static_root.display());
            println!();

            let mut failed = false;

            match config.require_params().and_then(|_| {
                // Touch one key of every bounds triple the wrapper uses.
                let store = ParamsStore::new(&config.params_file);
                for name in [
                    "topics.text.num_keywords.default",
                    "topics.wordcloud.num_keywords.default",
                    "topics.documents.num_documents.default",
                    "topics.documents.num_summary_sentences.default",
                    "text.num_related_documents.default",
                    "text.num_summary_sentences.default",
                ] {
                    store.get(name)?;
                }
                Ok(())
            }) {
                Ok(()) => println!("  {} params file readable, all keys present", "✓".green()),
                Err(e) => {
                    failed = true;
                    println!("  {} params file: {e:#}", "✗".red());
                }
            }

            match config
                .require_model()
                .and_then(|_| BundleModel::load(&config.model_bundle_path))
            {
                Ok(model) => {
                    use gist::model::traits::TopicModel;
                    println!(
                        "  {} model bundle loads ({} topics)",
                        "✓".green(),
                        model.num_topics()
                    );
                }
                Err(e) => {
                    failed = true;
                    println!("  {} model bundle: {e:#}", "✗".red());
                }
            }

            if failed {
                anyhow::bail!("Configuration check failed");
            }
            println!("\n{}", "Configuration is ready. Run: gist serve".bold());
        }
    }

    Ok(())
}
