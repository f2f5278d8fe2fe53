use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mapamente_app::{
    commands::{Command, ParseError},
    config::Config,
    shell::{Flow, Shell},
    state::AppState,
};

#[derive(Parser)]
#[command(name = "mapamente", version, about = "Chat with a local model and build mind-maps")]
struct Cli {
    /// Config file to use instead of config/default.toml and config/{ENV}.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding chats.json and user.json
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load .env file
    dotenvy::dotenv().ok();

    let loaded = match &cli.config {
        Some(path) => Config::from_file(path).map(Config::with_env_secrets),
        None => Config::load(),
    };
    let mut config = loaded.map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = dir;
    }

    init_logging(&config);

    tracing::info!("Starting Mapamente");
    tracing::info!(
        llm = %config.llm.base_url,
        model = %config.llm.model,
        mindmap_model = %config.llm.mindmap_model,
        "Config loaded"
    );

    let state = AppState::new(config)?;
    if let Some(user) = &state.user {
        tracing::info!(user = %user.email, "restored user");
    }
    let mut shell = Shell::new(state);

    let mut stdout = std::io::stdout();
    writeln!(stdout, "Mapamente. Type /help for commands.")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(ParseError::Empty) => continue,
            Err(e) => {
                writeln!(stdout, "{}", e)?;
                continue;
            }
        };

        match shell.execute(command, &mut stdout).await {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => {
                tracing::error!("Command failed: {:#}", e);
                writeln!(stdout, "error: {:#}", e)?;
            }
        }
    }

    tracing::info!("Bye");
    Ok(())
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    // stdout belongs to the conversation
    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }
}
