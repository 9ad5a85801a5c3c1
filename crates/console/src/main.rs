//! QueueDeck - terminal console for the Queue Management System
//!
//! Every command is one authenticated round trip; after a successful
//! mutation the listing is re-fetched so the display always shows the
//! backend's view, never an optimistic local one.

mod render;
mod session;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use queuedeck_client::{ClientError, QueueClient};
use queuedeck_core::application::listing::{ListFilter, QueueStats};
use queuedeck_core::application::policy::{ensure_available, Action, Intent};
use queuedeck_core::application::shaper::{ClaimForm, CreateForm, MetadataForm, ProgressForm, RetryForm};
use queuedeck_core::domain::{Queue, Role, Session, StatusFilter};
use queuedeck_core::port::{SessionStore, SystemTimeProvider};

use crate::session::FileSessionStore;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";
const DEFAULT_SESSION_PATH: &str = "~/.queuedeck/session.json";

#[derive(Parser)]
#[command(name = "queuedeck")]
#[command(about = "Queue Management System console", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend API URL
    #[arg(long, env = "QUEUEDECK_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Session file path
    #[arg(long, env = "QUEUEDECK_SESSION_PATH", default_value = DEFAULT_SESSION_PATH)]
    session_path: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and persist the session
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },

    /// Clear the persisted session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Status summary across all queues
    Dashboard,

    /// List queue records
    List {
        /// Task name search text
        #[arg(long, default_value = "")]
        task_name: String,

        /// Status filter: pending, in_process, completed, failed or all
        #[arg(long, default_value = "all")]
        status: String,
    },

    /// Show one record in full
    Show {
        /// Record id or queue id
        id: String,
    },

    /// Create a queue record (admin only)
    Add {
        /// Human-readable queue id; the backend assigns one when omitted
        #[arg(long)]
        queue_id: Option<String>,

        #[arg(long)]
        task_name: String,

        #[arg(long, default_value = "")]
        details: String,
    },

    /// Edit task name and details on an in-process record (admin only)
    Edit {
        /// Record id or queue id
        id: String,

        #[arg(long)]
        task_name: Option<String>,

        #[arg(long)]
        details: Option<String>,
    },

    /// Claim a pending record with a scheduling window
    Claim {
        /// Record id or queue id
        id: String,

        /// Window start (RFC 3339, defaults to now)
        #[arg(long)]
        start: Option<DateTime<Utc>>,

        /// Window end (RFC 3339, defaults to 24h after now)
        #[arg(long)]
        end: Option<DateTime<Utc>>,
    },

    /// Move an in-process record to a new status, with notes
    SetStatus {
        /// Record id or queue id
        id: String,

        /// Target status: in_process, completed or failed
        #[arg(long)]
        status: String,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Requeue a failed record
    Retry {
        /// Record id or queue id
        id: String,

        /// Annotation explaining the retry
        #[arg(long)]
        notes: String,
    },

    /// Delete a record (admin only)
    Delete {
        /// Record id or queue id
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let store = FileSessionStore::new(&cli.session_path);

    if let Err(err) = run(cli, &store).await {
        // An expired token is the one session-fatal failure: tear the
        // session down and point back at login.
        if matches!(err.downcast_ref::<ClientError>(), Some(ClientError::Unauthorized)) {
            store.clear()?;
            eprintln!(
                "{}",
                "Session expired. Run `queuedeck login` to sign in again.".red()
            );
            std::process::exit(1);
        }
        return Err(err);
    }

    Ok(())
}

fn init_tracing() {
    let log_format = std::env::var("QUEUEDECK_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("queuedeck=warn"))
        .expect("Failed to create env filter");

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }
}

async fn run(cli: Cli, store: &FileSessionStore) -> Result<()> {
    let stored = store.load()?;

    match cli.command {
        Commands::Login { username, password } => {
            let client = QueueClient::new(&cli.api_url)?;

            match client.login(username, password).await {
                Ok(session) => {
                    store.save(&session)?;
                    success(&format!(
                        "Signed in as {} ({})",
                        session.username, session.role
                    ));
                }
                Err(ClientError::Unauthorized) => bail!("Invalid username or password"),
                Err(ClientError::Transport(_)) => {
                    bail!("No response from server. Please check your connection.")
                }
                Err(e) => return Err(e.into()),
            }
        }

        Commands::Logout => {
            store.clear()?;
            success("Signed out");
        }

        Commands::Whoami => match stored {
            Some(session) => println!("{} ({})", session.username, session.role),
            None => println!("Not signed in"),
        },

        Commands::Dashboard => {
            let (client, session) = authed(&cli.api_url, stored)?;
            let queues = fetch_listing(&client, &session, &ListFilter::new()).await?;
            print_stats(&QueueStats::tally(&queues));
        }

        Commands::List { task_name, status } => {
            let (client, session) = authed(&cli.api_url, stored)?;

            let mut filter = ListFilter::new();
            filter.type_search(task_name);
            filter.submit_search();
            filter.set_status(StatusFilter::parse(&status)?);

            let queues = fetch_listing(&client, &session, &filter).await?;
            print_listing(&queues, session.role);
        }

        Commands::Show { id } => {
            let (client, session) = authed(&cli.api_url, stored)?;
            let queue = find_record(&client, &session, &id).await?;
            let intent = Intent::for_action(Action::View, queue, session.role)?;
            print_detail(&intent, session.role);
        }

        Commands::Add {
            queue_id,
            task_name,
            details,
        } => {
            let (client, session) = authed(&cli.api_url, stored)?;
            if !session.role.is_admin() {
                bail!("Only admins can add queues");
            }

            let payload = CreateForm::new(queue_id, task_name, details).into_payload()?;
            client.create_queue(&payload).await?;

            success("Queue created");
            refetch(&client, &session).await?;
        }

        Commands::Edit {
            id,
            task_name,
            details,
        } => {
            let (client, session) = authed(&cli.api_url, stored)?;
            if !session.role.is_admin() {
                bail!("Only admins edit metadata; use set-status for in-process updates");
            }

            let queue = find_record(&client, &session, &id).await?;
            ensure_available(Action::Edit, queue.status, session.role)?;

            let mut form = MetadataForm::open(&queue);
            if let Some(task_name) = task_name {
                form.task_name = task_name;
            }
            if let Some(details) = details {
                form.details = details;
            }

            client.update_queue(&queue.id, &form.into_payload()).await?;

            success("Queue updated");
            refetch(&client, &session).await?;
        }

        Commands::Claim { id, start, end } => {
            let (client, session) = authed(&cli.api_url, stored)?;
            let queue = find_record(&client, &session, &id).await?;
            ensure_available(Action::Claim, queue.status, session.role)?;

            let form = ClaimForm::open(&queue, &SystemTimeProvider).with_window(start, end);
            client.claim_queue(&form.into_payload()).await?;

            success("Queue claimed");
            refetch(&client, &session).await?;
        }

        Commands::SetStatus { id, status, notes } => {
            let (client, session) = authed(&cli.api_url, stored)?;
            let queue = find_record(&client, &session, &id).await?;
            ensure_available(Action::Edit, queue.status, session.role)?;

            let mut form = ProgressForm::open(&queue);
            form.status = status.parse()?;
            if let Some(notes) = notes {
                form.notes = notes;
            }

            client.update_claimed(&queue.id, &form.into_payload()?).await?;

            success("Status updated");
            refetch(&client, &session).await?;
        }

        Commands::Retry { id, notes } => {
            let (client, session) = authed(&cli.api_url, stored)?;
            let queue = find_record(&client, &session, &id).await?;
            ensure_available(Action::Retry, queue.status, session.role)?;

            let mut form = RetryForm::open(&queue);
            form.notes = notes;

            client.requeue_queue(&queue.id, &form.into_payload()?).await?;

            success("Queue requeued");
            refetch(&client, &session).await?;
        }

        Commands::Delete { id, yes } => {
            let (client, session) = authed(&cli.api_url, stored)?;
            let queue = find_record(&client, &session, &id).await?;
            ensure_available(Action::Delete, queue.status, session.role)?;

            if !yes && !confirm(&format!("Delete queue {}?", queue.queue_id))? {
                println!("Aborted.");
                return Ok(());
            }

            client.delete_queue(&queue.id).await?;

            success("Queue deleted");
            refetch(&client, &session).await?;
        }
    }

    Ok(())
}

fn authed(api_url: &str, stored: Option<Session>) -> Result<(QueueClient, Session)> {
    let session = stored.context("Not signed in. Run `queuedeck login` first.")?;
    let client = QueueClient::new(api_url)?.with_session(&session);
    Ok((client, session))
}

/// Role picks the listing route; workers only ever see the worker-scoped
/// view.
async fn fetch_queues(
    client: &QueueClient,
    session: &Session,
    filter: &ListFilter,
) -> Result<Vec<Queue>> {
    let queues = match session.role {
        Role::Admin => client.list_queues(&filter.admin_payload()).await?,
        Role::Worker => client.list_worker_queues(&filter.worker_payload()).await?,
    };
    Ok(queues)
}

async fn find_record(client: &QueueClient, session: &Session, id: &str) -> Result<Queue> {
    let queues = fetch_queues(client, session, &ListFilter::new()).await?;
    queues
        .into_iter()
        .find(|queue| queue.id == id || queue.queue_id == id)
        .with_context(|| format!("Queue {} not found", id))
}

/// A failed list load is recoverable: show the cause and the manual retry
/// path instead of a bare error chain. 401 still propagates and tears the
/// session down.
async fn fetch_listing(
    client: &QueueClient,
    session: &Session,
    filter: &ListFilter,
) -> Result<Vec<Queue>> {
    match fetch_queues(client, session, filter).await {
        Ok(queues) => Ok(queues),
        Err(err) => {
            if matches!(err.downcast_ref::<ClientError>(), Some(ClientError::Unauthorized)) {
                return Err(err);
            }
            eprintln!("{}", format!("✗ Queue list failed to load: {:#}", err).red());
            eprintln!("Re-run the command to retry.");
            std::process::exit(1);
        }
    }
}

/// Post-mutation refresh: the authoritative list, never a local mutation
async fn refetch(client: &QueueClient, session: &Session) -> Result<()> {
    let queues = fetch_queues(client, session, &ListFilter::new()).await?;
    println!();
    print_listing(&queues, session.role);
    Ok(())
}

fn print_listing(queues: &[Queue], role: Role) {
    if queues.is_empty() {
        println!("No queues match the current filter.");
    } else {
        println!("{}", render::queue_table(queues, role));
    }
}

fn print_detail(intent: &Intent, role: Role) {
    let queue = intent.queue();

    println!("{}", format!("Queue {}", queue.queue_id).cyan().bold());
    println!();
    println!("  {} {}", "Task Name:".bold(), queue.task_name);
    println!("  {} {}", "Status:".bold(), render::status_badge(queue.status));
    println!("  {} {}", "Details:".bold(), queue.details);
    println!("  {} {}", "Notes:".bold(), queue.notes);
    println!(
        "  {} {}",
        "Assigned To:".bold(),
        queue.assigned_to_name.clone().unwrap_or_default()
    );
    println!(
        "  {} {}",
        "Assigned At:".bold(),
        render::format_date(queue.assigned_at)
    );
    println!(
        "  {} {} - {}",
        "Window:".bold(),
        render::format_date(queue.start_date),
        render::format_date(queue.end_date)
    );
    println!(
        "  {} {}",
        "Created:".bold(),
        render::format_date(Some(queue.created_at))
    );
    println!(
        "  {} {}",
        "Updated:".bold(),
        render::format_date(Some(queue.updated_at))
    );
    println!();
    println!(
        "  {} {}",
        "Actions:".bold(),
        render::actions_label(queue.status, role)
    );
}

fn print_stats(stats: &QueueStats) {
    println!("{}", "Queue Dashboard".cyan().bold());
    println!();
    println!("  {} {}", "Total:".bold(), stats.total);
    println!("  {} {}", "Pending:".bold(), stats.pending.to_string().yellow());
    println!(
        "  {} {}",
        "In Process:".bold(),
        stats.in_process.to_string().blue()
    );
    println!(
        "  {} {}",
        "Completed:".bold(),
        stats.completed.to_string().green()
    );
    println!("  {} {}", "Failed:".bold(), stats.failed.to_string().red());
}

fn success(message: &str) {
    println!("{}", format!("✓ {}", message).green().bold());
}

fn confirm(prompt: &str) -> Result<bool> {
    use std::io::Write;

    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"))
}
