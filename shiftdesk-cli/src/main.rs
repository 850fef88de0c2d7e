//! shiftdesk-cli — operator frontend for the Shiftdesk support chat scheduler
//!
//! Talks to the Shiftdesk HTTP API. Customers would normally hit the API
//! directly; this binary is for operators poking at a running server.
//!
//! # Subcommands
//! - `create [--user <id>] [--json]` — request a new chat session
//! - `poll <session-id> [--json]`    — poll a session (counts as liveness)
//! - `status [--json]`               — show the scheduling status board
//! - `health`                        — check the server is up

use clap::{Parser, Subcommand};
use serde::Deserialize;

const DEFAULT_SERVER: &str = "http://127.0.0.1:8750";

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Debug, Parser)]
#[command(
    name = "shiftdesk-cli",
    version,
    about = "Shiftdesk support chat scheduler — operator CLI"
)]
struct Cli {
    /// Shiftdesk HTTP server URL (overrides SHIFTDESK_HTTP_URL env var)
    #[arg(long, env = "SHIFTDESK_HTTP_URL", default_value = DEFAULT_SERVER)]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Request a new chat session
    Create {
        /// Optional user id to attach to the session
        #[arg(long)]
        user: Option<String>,

        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// Poll a session, recording customer liveness
    Poll {
        /// Session id returned by `create`
        session_id: String,

        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// Show the scheduling status board
    Status {
        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// Check the server is reachable
    Health,
}

// ============================================================================
// API Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct SessionResponse {
    session_id: String,
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    assigned_agent_name: Option<String>,
    is_overflow: bool,
}

#[derive(Debug, Deserialize)]
struct AgentRow {
    name: String,
    seniority: String,
    current_chats: i32,
    max_concurrency: i32,
}

#[derive(Debug, Deserialize)]
struct StatusBoard {
    active_team: Option<String>,
    team_capacity: i32,
    max_queue_length: usize,
    queue_length: usize,
    overflow_queue_length: usize,
    active_sessions: usize,
    is_office_hours: bool,
    agents: Vec<AgentRow>,
}

// ============================================================================
// Commands
// ============================================================================

fn http_client(timeout_secs: u64) -> anyhow::Result<reqwest::blocking::Client> {
    Ok(reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()?)
}

/// POST /sessions and report the admission outcome.
fn do_create(server: &str, user: Option<String>, json_output: bool) -> anyhow::Result<()> {
    let client = http_client(10)?;
    let url = format!("{}/sessions", server);
    let body = serde_json::json!({ "user_id": user });

    let resp = match client.post(&url).json(&body).send() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("shiftdesk-cli: connection failed to {}: {}", url, e);
            std::process::exit(1);
        }
    };

    // 400 is a refusal, which is still a well-formed session response.
    let raw: serde_json::Value = resp.json()?;
    if json_output {
        println!("{}", serde_json::to_string_pretty(&raw)?);
        return Ok(());
    }

    let session: SessionResponse = serde_json::from_value(raw)?;
    println!("Session:  {}", session.session_id);
    println!("Status:   {}", render_status(&session.status, session.is_overflow));
    if let Some(message) = session.message {
        println!("Message:  {}", message);
    }
    Ok(())
}

/// GET /sessions/:id/poll and report the session state.
fn do_poll(server: &str, session_id: &str, json_output: bool) -> anyhow::Result<()> {
    let client = http_client(10)?;
    let url = format!("{}/sessions/{}/poll", server, session_id);

    let resp = match client.get(&url).send() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("shiftdesk-cli: connection failed to {}: {}", url, e);
            std::process::exit(1);
        }
    };

    if resp.status() == reqwest::StatusCode::NOT_FOUND {
        eprintln!("shiftdesk-cli: no session with id {}", session_id);
        std::process::exit(1);
    }
    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().unwrap_or_default();
        eprintln!("shiftdesk-cli: server returned {}: {}", status, body);
        std::process::exit(1);
    }

    let raw: serde_json::Value = resp.json()?;
    if json_output {
        println!("{}", serde_json::to_string_pretty(&raw)?);
        return Ok(());
    }

    let session: SessionResponse = serde_json::from_value(raw)?;
    println!("Session:  {}", session.session_id);
    println!("Status:   {}", render_status(&session.status, session.is_overflow));
    match session.assigned_agent_name {
        Some(name) => println!("Agent:    {}", name),
        None => println!("Agent:    (not yet assigned)"),
    }
    Ok(())
}

/// GET /status and render the status board.
fn do_status(server: &str, json_output: bool) -> anyhow::Result<()> {
    let client = http_client(10)?;
    let url = format!("{}/status", server);

    let resp = match client.get(&url).send() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("shiftdesk-cli: connection failed to {}: {}", url, e);
            std::process::exit(1);
        }
    };
    if !resp.status().is_success() {
        eprintln!("shiftdesk-cli: server returned {}", resp.status());
        std::process::exit(1);
    }

    let raw: serde_json::Value = resp.json()?;
    if json_output {
        println!("{}", serde_json::to_string_pretty(&raw)?);
        return Ok(());
    }

    let board: StatusBoard = serde_json::from_value(raw)?;
    println!(
        "Active team:     {}",
        board.active_team.as_deref().unwrap_or("(none on shift)")
    );
    println!("Office hours:    {}", if board.is_office_hours { "yes" } else { "no" });
    println!(
        "Team capacity:   {} (queue cap {})",
        board.team_capacity, board.max_queue_length
    );
    println!(
        "Queues:          {} main, {} overflow",
        board.queue_length, board.overflow_queue_length
    );
    println!("Active sessions: {}", board.active_sessions);
    println!();
    for agent in &board.agents {
        println!(
            "  {:<12} {:<10} {}",
            agent.name,
            agent.seniority,
            render_load(agent.current_chats, agent.max_concurrency)
        );
    }
    Ok(())
}

/// GET /health.
fn do_health(server: &str) -> anyhow::Result<()> {
    let client = http_client(5)?;
    let url = format!("{}/health", server);

    match client.get(&url).send() {
        Ok(r) if r.status().is_success() => {
            let body: serde_json::Value = r.json().unwrap_or_default();
            println!(
                "Shiftdesk server: {}",
                body["status"].as_str().unwrap_or("unknown")
            );
            println!("Version:          {}", body["version"].as_str().unwrap_or("?"));
        }
        Ok(r) => {
            eprintln!("shiftdesk-cli: server unhealthy (HTTP {})", r.status());
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("shiftdesk-cli: cannot reach {}: {}", url, e);
            std::process::exit(1);
        }
    }
    Ok(())
}

// ============================================================================
// Rendering Helpers
// ============================================================================

/// One-line status with the overflow flag folded in.
fn render_status(status: &str, is_overflow: bool) -> String {
    if is_overflow {
        format!("{} (overflow)", status)
    } else {
        status.to_string()
    }
}

/// "3/6 [###...]" style load bar.
fn render_load(current: i32, max: i32) -> String {
    let max = max.max(0);
    let current = current.clamp(0, max);
    let filled = current as usize;
    let empty = (max - current) as usize;
    format!("{}/{} [{}{}]", current, max, "#".repeat(filled), ".".repeat(empty))
}

// ============================================================================
// Main
// ============================================================================

fn main() {
    let cli = Cli::parse();
    let server = cli.server.trim_end_matches('/').to_string();

    let result = match cli.command {
        Commands::Create { user, json } => do_create(&server, user, json),
        Commands::Poll { session_id, json } => do_poll(&server, &session_id, json),
        Commands::Status { json } => do_status(&server, json),
        Commands::Health => do_health(&server),
    };

    if let Err(e) = result {
        eprintln!("shiftdesk-cli: {}", e);
        std::process::exit(1);
    }
}

// ============================================================================
// Tests
// ============================================================================
