//! Search Agent CLI - run a Brave web search from the terminal

use clap::Parser;
use search_agent_lib::{
    SearchAgent, SearchClient, SearchConfig, SearchOutcome, SearchRequest, SearchResult,
};
use std::io::{self, BufRead};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_QUERY: &str = "can you please find me some good and cheap places to buy food \
    for home (not restaurant) in israel, i live Ha Shive street in tel aviv?";

#[derive(Parser)]
#[command(name = "search-agent")]
#[command(about = "Search the web with the Brave Search API", long_about = None)]
struct Cli {
    /// The search query (use "-" to read from stdin)
    #[arg(value_name = "QUERY")]
    query: Option<String>,

    /// Number of results to request (the API accepts 1-20)
    #[arg(short = 'n', long, default_value_t = 10)]
    count: u32,

    /// Pagination offset (the API accepts 0-9)
    #[arg(short, long, default_value_t = 0)]
    offset: u32,

    /// Brave Search API key [default: $BRAVE_API_KEY]
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(
        long,
        value_name = "SECS",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,

    /// Skip the agent banner
    #[arg(short, long)]
    quiet: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    log_verbosity: u8,

    /// Output logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn read_query_from_stdin() -> io::Result<String> {
    let stdin = io::stdin();
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Initialize tracing subscriber based on verbosity and output format
fn init_tracing(verbose: u8, json: bool) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,search_agent_lib=info".to_string(),
            2 => "info,search_agent_lib=debug".to_string(),
            _ => "debug,search_agent_lib=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_file(verbose >= 3)
                    .with_line_number(verbose >= 3)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}

fn print_results(query: &str, results: &[SearchResult]) {
    let rule = "=".repeat(70);
    println!("\n{rule}");
    println!("SEARCH RESULTS: '{query}'");
    println!("Found {} results", results.len());
    println!("{rule}");

    for (idx, result) in results.iter().enumerate() {
        println!("\n{}. {}", idx + 1, result.title);
        println!("   {}", result.url);
        println!("   {}", result.description);
    }

    println!("\n{rule}");
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_verbosity, cli.log_json);

    tracing::info!("Search agent CLI starting");

    let query = match cli.query.as_deref() {
        Some("-") => match read_query_from_stdin() {
            Ok(q) if !q.is_empty() => q,
            Ok(_) => {
                eprintln!("Error: No query provided on stdin");
                return ExitCode::FAILURE;
            }
            Err(e) => {
                eprintln!("Error reading from stdin: {}", e);
                return ExitCode::FAILURE;
            }
        },
        Some(q) => q.to_string(),
        None => DEFAULT_QUERY.to_string(),
    };

    let mut config = SearchConfig::default().with_timeout(Duration::from_secs(cli.timeout));
    if let Some(key) = cli.api_key {
        config = config.with_api_key(key);
    }

    let client = match SearchClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Set BRAVE_API_KEY or pass --api-key.");
            return ExitCode::FAILURE;
        }
    };
    let agent = SearchAgent::new(client);

    if !cli.quiet && !cli.json {
        println!("Agent: {}", agent.name());
        println!("Searching for: '{}'", query);
    }

    let request = SearchRequest::new(query.as_str())
        .with_count(cli.count)
        .with_offset(cli.offset);
    let outcome = agent.perform_task(request).await;

    if cli.json {
        match serde_json::to_string_pretty(&outcome) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing results: {}", e);
                return ExitCode::FAILURE;
            }
        }
        return if outcome.is_failed() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        };
    }

    match outcome {
        SearchOutcome::Failed(e) => {
            eprintln!("Search error: {}", e.error);
            ExitCode::FAILURE
        }
        SearchOutcome::Results(results) if results.is_empty() => {
            eprintln!("No search results returned.");
            ExitCode::FAILURE
        }
        SearchOutcome::Results(results) => {
            print_results(&query, &results);
            ExitCode::SUCCESS
        }
    }
}
