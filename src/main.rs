use clap::{Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use archetype_quiz::api::{ApiClient, ApiError, QuizBackend};
use archetype_quiz::config::{self, Config};
use archetype_quiz::output;
use archetype_quiz::quiz::{Language, QuizFlow, ResponseSet, QUESTION_COUNT};
use archetype_quiz::scoring::score_responses;
use archetype_quiz::storage::{self, CacheStore, KeyValueStore, MemoryStore};
use archetype_quiz::sync::{SyncAgent, SyncEvent, SyncOp};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum OutputFormat {
    #[default]
    Table,
    Tsv,
    Json,
}

#[derive(Subcommand, Debug)]
enum RemoteCommand {
    /// Check that the quiz server is reachable
    Health,
    /// Show one stored submission
    Submission {
        /// Submission id returned when results were saved
        id: String,
    },
    /// List all submissions of a user
    History {
        user_id: String,
    },
    /// Aggregate statistics over all submissions
    Analytics,
    /// List every registered participant
    Users,
    /// Show one registered participant
    User {
        /// Id returned when the identity was registered
        id: String,
    },
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Take the quiz interactively (default if no subcommand)
    Take,
    /// Score a JSON object of question id -> answer (1-5)
    Score {
        /// File to read, or - for stdin
        file: String,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Show saved identity and progress
    Status,
    /// Forget saved identity and progress
    Reset,
    /// List the ten archetypes
    Archetypes,
    /// Query the quiz server
    Remote {
        #[command(subcommand)]
        command: RemoteCommand,
    },
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "archetype-quiz")]
#[command(about = "Discover your dominant mythological archetype", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/archetype-quiz/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Do not talk to the quiz server
    #[arg(long, global = true)]
    offline: bool,

    /// Keep progress in memory only; nothing is written to disk
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Display language (en or fa)
    #[arg(long, global = true)]
    lang: Option<Language>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "archetype_quiz=debug"
    } else {
        "warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open_store(cli: &Cli, config: &Config) -> Box<dyn KeyValueStore> {
    if cli.ephemeral {
        return Box::new(MemoryStore::new());
    }
    let path = config
        .data_dir
        .clone()
        .unwrap_or_else(storage::get_data_path);
    tracing::debug!(path = %path.display(), "using local store");
    Box::new(CacheStore::new(path))
}

fn request_timeout(config: &Config) -> Duration {
    // Already validated at startup
    config
        .api
        .timeout_duration()
        .unwrap_or(Duration::from_secs(10))
}

fn api_client(config: &Config) -> Result<ApiClient, ApiError> {
    ApiClient::new(&config.api.base_url, request_timeout(config))
}

fn sync_agent(cli: &Cli, config: &Config) -> SyncAgent {
    if cli.offline || !config.sync {
        tracing::debug!("remote sync disabled");
        return SyncAgent::offline();
    }
    match api_client(config) {
        Ok(client) => {
            let backend: Arc<dyn QuizBackend> = Arc::new(client);
            SyncAgent::new(Some(backend))
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not create API client, continuing offline");
            SyncAgent::offline()
        }
    }
}

/// Print the outcome of background sync. Failures are notices, never errors.
fn report_sync(agent: &mut SyncAgent, lang: Language) {
    for event in agent.drain_events() {
        match event {
            SyncEvent::Submitted { submission_id } => {
                println!(
                    "{} {}",
                    lang.pick("Results saved. Submission id:", "نتیجه ذخیره شد. شناسه:"),
                    submission_id
                );
            }
            SyncEvent::Failed {
                op: SyncOp::SubmitResults,
                error,
            } => {
                eprintln!(
                    "{} {}",
                    lang.pick(
                        "Notice: results could not be saved on the server:",
                        "توجه: نتیجه روی سرور ذخیره نشد:"
                    ),
                    error
                );
            }
            SyncEvent::Failed { op, error } => {
                tracing::debug!(%op, %error, "sync failure already reported");
            }
            _ => {}
        }
    }
}

fn read_responses(file: &str) -> anyhow::Result<ResponseSet> {
    use anyhow::Context;

    let content = if file == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file))?
    };

    serde_json::from_str(&content).with_context(|| format!("Invalid responses in {}", file))
}

async fn run_remote(command: RemoteCommand, config: &Config) -> i32 {
    let client = match api_client(config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create API client: {}", e);
            return EXIT_NETWORK;
        }
    };

    let result = match command {
        RemoteCommand::Health => client.health().await,
        RemoteCommand::Submission { id } => client.get_submission(&id).await,
        RemoteCommand::History { user_id } => client.user_submissions(&user_id).await,
        RemoteCommand::Analytics => client.analytics_summary().await,
        RemoteCommand::Users => client.welcome_submissions().await,
        RemoteCommand::User { id } => client.welcome_submission(&id).await,
    };

    match result {
        Ok(value) => {
            match serde_json::to_string_pretty(&value) {
                Ok(json) => println!("{}", json),
                Err(_) => println!("{}", value),
            }
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Request to {} failed: {}", client.base_url(), e);
            EXIT_NETWORK
        }
    }
}

fn print_status(store: &dyn KeyValueStore, lang: Language) {
    match storage::load_identity(store) {
        Some(record) => {
            let identity = &record.identity;
            println!(
                "Identity: {} {} ({}, {})",
                identity.first_name, identity.last_name, identity.city, identity.country
            );
            if let Some(id) = &record.submission_id {
                println!("User id: {}", id);
            }
        }
        None => println!("Identity: none saved"),
    }

    match storage::load_progress(store) {
        Some(progress) => {
            let saved_at = progress.saved_at.format("%Y-%m-%d %H:%M UTC");
            let flow = QuizFlow::resume(progress.current_question, progress.responses);
            println!(
                "Progress: {}/{} answered, at question {} (saved {})",
                flow.answered_count(),
                QUESTION_COUNT,
                flow.current_index() + 1,
                saved_at
            );
            if let Some(session_id) = &progress.session_id {
                println!("Session: {}", session_id);
            }
        }
        None => println!("Progress: none saved"),
    }

    println!("Language: {}", lang);
}

async fn reset(store: &dyn KeyValueStore, agent: &mut SyncAgent, timeout: Duration) {
    if let Some(session_id) = storage::load_progress(store).and_then(|p| p.session_id) {
        agent.adopt_session(session_id);
        agent.abandon_session();
        agent.finish(timeout).await;
    }

    let cleared = [
        storage::clear_progress(store),
        storage::clear_identity(store),
        storage::clear_language(store),
    ];
    for result in cleared {
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to clear saved state");
        }
    }
    println!("Saved quiz state cleared.");
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+); already installed is fine
    let _ = rustls::crypto::ring::default_provider().install_default();

    let mut cli = Cli::parse();
    init_tracing(cli.verbose);

    let command = cli.command.take().unwrap_or(Commands::Take);
    let config_path = cli.config.as_ref().map(PathBuf::from);

    if let Commands::Init = command {
        match config::init::run_init_wizard(config_path) {
            Ok(Some(path)) => tracing::debug!(path = %path.display(), "config written"),
            Ok(None) => tracing::debug!("init declined, existing config kept"),
            Err(e) => {
                eprintln!("Init failed: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let mut config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    config::apply_env_overrides(&mut config);

    if let Err(errors) = config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let store = open_store(&cli, &config);
    let lang = cli
        .lang
        .or_else(|| storage::load_language(store.as_ref()))
        .unwrap_or(config.language);
    let use_colors = output::should_use_colors();
    // Leave a little headroom over the per-request timeout for queued tasks
    let sync_timeout = request_timeout(&config) + Duration::from_secs(2);

    let code = match command {
        Commands::Take => {
            let mut agent = sync_agent(&cli, &config);
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut out = std::io::stdout();

            let result = archetype_quiz::take::run_take(
                &mut input,
                &mut out,
                store.as_ref(),
                &mut agent,
                lang,
                use_colors,
            )
            .await;

            if !agent.finish(sync_timeout).await {
                tracing::warn!("some results may not have reached the server");
            }
            let final_lang = result.as_ref().map(|o| o.language).unwrap_or(lang);
            report_sync(&mut agent, final_lang);

            match result {
                Ok(_) => EXIT_SUCCESS,
                Err(e) => {
                    eprintln!("{:#}", e);
                    EXIT_INPUT
                }
            }
        }
        Commands::Score { file, format } => match read_responses(&file) {
            Ok(responses) => {
                let results = score_responses(&responses);
                match format {
                    OutputFormat::Table => {
                        println!("{}", output::format_results_table(&results, lang, use_colors))
                    }
                    OutputFormat::Tsv => println!("{}", output::format_tsv(&results)),
                    OutputFormat::Json => match serde_json::to_string_pretty(&results) {
                        Ok(json) => println!("{}", json),
                        Err(e) => eprintln!("Failed to serialize results: {}", e),
                    },
                }
                EXIT_SUCCESS
            }
            Err(e) => {
                eprintln!("{:#}", e);
                EXIT_INPUT
            }
        },
        Commands::Status => {
            print_status(store.as_ref(), lang);
            EXIT_SUCCESS
        }
        Commands::Reset => {
            let mut agent = sync_agent(&cli, &config);
            reset(store.as_ref(), &mut agent, sync_timeout).await;
            EXIT_SUCCESS
        }
        Commands::Archetypes => {
            println!("{}", output::format_archetype_list(lang, use_colors));
            EXIT_SUCCESS
        }
        Commands::Remote { command } => run_remote(command, &config).await,
        Commands::Init => EXIT_SUCCESS,
    };

    std::process::exit(code);
}
