use anyhow::Context;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use healthbot::config::{Config, LoggingConfig};
use healthbot::frontend::{ChatSession, LocalAssistant, RemoteAssistant, empty_query_warning};
use healthbot::services::RemoteAskClient;
use healthbot::{AppState, build_pipeline, build_router};

#[derive(Parser)]
#[command(name = "healthbot", version, about = "Bilingual (English/Tamil) healthcare assistant")]
struct Cli {
    /// Path to config.toml (defaults to conf/config.toml or ./config.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API
    Serve,
    /// Ask a single question and print the answer
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Interactive console chat
    Chat {
        /// Send questions to a running server instead of calling the backends directly
        #[arg(long, num_args = 0..=1, default_missing_value = "")]
        remote: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _ = dotenvy::dotenv();

    let config = load_config(cli.config.as_deref(), std::io::stderr)?;
    let _guard = init_tracing(&config.logging)?;
    config.log_summary();

    match cli.command {
        Command::Serve => serve(config).await,
        Command::Ask { question } => {
            let pipeline = build_pipeline(&config);
            let question = question.join(" ");
            if question.trim().is_empty() {
                println!("{}", empty_query_warning());
                return Ok(());
            }
            println!("{}", pipeline.answer(&question).await);
            Ok(())
        },
        Command::Chat { remote: Some(url) } => {
            let url = if url.is_empty() { config.client.api_url.clone() } else { url };
            tracing::info!("Chatting through remote backend {}", url);
            let client = RemoteAskClient::new(url, config.remote_timeout());
            ChatSession::new(RemoteAssistant::new(client)).run_stdio().await
        },
        Command::Chat { remote: None } => {
            let pipeline = Arc::new(build_pipeline(&config));
            ChatSession::new(LocalAssistant::new(pipeline)).run_stdio().await
        },
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let state = Arc::new(AppState { pipeline: Arc::new(build_pipeline(&config)) });
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("🩺 Healthbot listening on http://{}", addr);
    tracing::info!("📖 API docs at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Load the config under a plain console subscriber; the configured one needs
/// the logging section first.
fn load_config<W>(path: Option<&str>, writer: W) -> anyhow::Result<Config>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let bootstrap = fmt().with_writer(writer).with_ansi(false).finish();
    tracing::subscriber::with_default(bootstrap, || Config::load(path))
}

/// Console logging always; daily-rolling file logging when `logging.file` is set.
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&logging.level))?;

    let (file_layer, guard) = match &logging.file {
        Some(file) => {
            let path = Path::new(file);
            let dir =
                path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let name = path
                .file_name()
                .map(|n| n.to_os_string())
                .unwrap_or_else(|| "healthbot.log".into());
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

            let appender = tracing_appender::rolling::daily(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard))
        },
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(guard)
}
