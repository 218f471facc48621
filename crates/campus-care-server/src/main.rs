// crates/campus-care-server/src/main.rs
// Campus Care server and command-line tools

use anyhow::{Context, Result, bail};
use campus_care::{
    CareError,
    assessment::{self, InMemoryProgress},
    config::{CareConfig, EnvConfig},
    crisis::CrisisDetector,
    llm, web,
};
use campus_care_types::AssessmentResponse;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "campus-care")]
#[command(about = "Campus mental-health support: crisis triage, chat proxy, assessment scoring")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server (default)
    ///
    /// Submitted assessments are held in memory (most recent 10000) and
    /// are lost on restart.
    Serve {
        /// Port to listen on (overrides CAMPUS_CARE_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Score a questionnaire and print the result as JSON
    Score {
        /// Instrument: who5, gad7 or phq9
        #[arg(short, long)]
        instrument: String,

        /// Answers as id=value pairs, e.g. 1=3 2=0
        responses: Vec<String>,
    },

    /// Check whether text trips the crisis gate
    Check {
        /// Text to check
        text: String,
    },
}

/// Parse `id=value` pairs into a response map
fn parse_responses(pairs: &[String]) -> Result<AssessmentResponse> {
    let mut responses = AssessmentResponse::new();
    for pair in pairs {
        let invalid = |what: &str| CareError::InvalidInput(format!("{} in '{}'", what, pair));
        let (id, value) = pair.split_once('=').ok_or_else(|| invalid("expected id=value"))?;
        let id: u32 = id.trim().parse().map_err(|_| invalid("bad question id"))?;
        let value: u32 = value.trim().parse().map_err(|_| invalid("bad value"))?;
        responses.insert(id, value);
    }
    Ok(responses)
}

fn build_detector(file: &CareConfig) -> CrisisDetector {
    let detector = CrisisDetector::with_extra_phrases(&file.crisis.extra_phrases);
    if !file.crisis.extra_phrases.is_empty() {
        info!(phrases = detector.phrase_count(), "Crisis gate extended from config file");
    }
    detector
}

async fn run_server(port: Option<u16>) -> Result<()> {
    let env = EnvConfig::load();
    let file = CareConfig::load();

    let validation = env.validate();
    for w in &validation.warnings {
        warn!("{}", w);
    }
    if !validation.is_valid() {
        bail!("Invalid configuration:\n{}", validation.report());
    }

    let detector = Arc::new(build_detector(&file));
    let client = llm::build_client(&env.llm, &file);
    let progress = Arc::new(InMemoryProgress::new());
    warn!(
        capacity = progress.capacity(),
        "Assessment progress is kept in memory only and is lost on restart"
    );

    let state = web::state::AppState::new(detector, client, progress);
    let app = web::create_router(state);

    let addr = format!("{}:{}", env.server.host, port.unwrap_or(env.server.port));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("Campus Care API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl+C, shutting down");
}

fn run_score(instrument: &str, pairs: &[String]) -> Result<()> {
    let instrument = assessment::parse_instrument(instrument)?;
    let responses = parse_responses(pairs)?;
    let result = assessment::score(&responses, instrument);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn run_check(text: &str) -> Result<()> {
    let detector = build_detector(&CareConfig::load());
    match detector.matched_phrase(text) {
        Some(phrase) => println!("crisis: matched \"{}\"", phrase),
        None => println!("no crisis phrase found"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env files (global first, then project - project overrides)
    let _ = dotenvy::from_path(CareConfig::config_dir().join(".env"));
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_level = match &cli.command {
        Some(Commands::Serve { .. }) | None => Level::INFO,
        Some(Commands::Score { .. }) | Some(Commands::Check { .. }) => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        None => run_server(None).await?,
        Some(Commands::Serve { port }) => run_server(port).await?,
        Some(Commands::Score { instrument, responses }) => run_score(&instrument, &responses)?,
        Some(Commands::Check { text }) => run_check(&text)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_responses() {
        let pairs = vec!["1=3".to_string(), " 2 = 0 ".to_string()];
        let responses = parse_responses(&pairs).unwrap();
        assert_eq!(responses.get(&1), Some(&3));
        assert_eq!(responses.get(&2), Some(&0));
    }

    #[test]
    fn test_parse_responses_rejects_garbage() {
        assert!(parse_responses(&["1:3".to_string()]).is_err());
        assert!(parse_responses(&["a=3".to_string()]).is_err());
        assert!(parse_responses(&["1=-1".to_string()]).is_err());
    }

    #[test]
    fn test_cli_parses_score() {
        let cli = Cli::try_parse_from(["campus-care", "score", "-i", "gad7", "1=3", "2=2"]).unwrap();
        match cli.command {
            Some(Commands::Score { instrument, responses }) => {
                assert_eq!(instrument, "gad7");
                assert_eq!(responses.len(), 2);
            }
            _ => panic!("expected score command"),
        }
    }
}
