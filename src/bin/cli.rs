//! Friendlog CLI
//!
//! Command-line interface for the friendlog backend:
//! - Log in / register / log out
//! - List, create and inspect friends
//! - Edit friend attributes
//! - Log and read conversations
//! - Chat with the assistant

use anyhow::{bail, Context};
use chrono::{Duration, Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use friendlog::models::{ChatMessage, Conversation, Friend, FriendDetails};
use friendlog::{ApiBase, AttributeDraft, ClientError, Config, FriendClient, LoggingConfig};

#[derive(Parser)]
#[command(name = "friendlog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Keep track of your friends and ask the assistant about them")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL (overrides FRIENDLOG_API_URL and the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: ~/.config/friendlog/config.toml, then ./friendlog.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and remember the session for 7 days
    Login {
        #[arg(short, long)]
        email: String,
        /// Password (prompted for when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Create an account and log in
    Register {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        /// Password (prompted for when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// List your friends
    Friends,

    /// Work with a single friend
    Friend {
        #[command(subcommand)]
        command: FriendCommand,
    },

    /// Log or read conversations
    Conversation {
        #[command(subcommand)]
        command: ConversationCommand,
    },

    /// Talk to the assistant
    Chat {
        #[command(subcommand)]
        command: ChatCommand,
    },

    /// Show the resolved API URL and session state
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum FriendCommand {
    /// Add a friend
    Add {
        /// Friend's name
        name: String,
    },

    /// Show a friend's attributes and conversations
    Show {
        /// Friend ID
        id: i64,
    },

    /// Set an attribute (adds it when missing)
    Set {
        /// Friend ID
        id: i64,
        /// Attribute name, e.g. "hobby"
        name: String,
        /// Attribute value
        value: String,
    },

    /// Remove an attribute
    Unset {
        /// Friend ID
        id: i64,
        /// Attribute name
        name: String,
    },
}

#[derive(Subcommand)]
pub enum ConversationCommand {
    /// Log a conversation with a friend
    Add {
        /// Friend ID
        friend_id: i64,
        /// What you talked about
        #[arg(short = 'x', long)]
        context: String,
        /// Date of the conversation: "today", "yesterday" or YYYY-MM-DD
        #[arg(short, long, default_value = "today")]
        date: String,
    },

    /// Show one logged conversation
    Show {
        /// Friend ID
        friend_id: i64,
        /// Position in the friend's conversation list (0-based)
        index: usize,
    },
}

#[derive(Subcommand)]
pub enum ChatCommand {
    /// Ask the assistant something
    Send {
        /// Message text
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// Show previous messages and answers
    History,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => Config::load_with_env(path),
        None => Config::load_default(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);

    if let Err(e) = run(cli, config).await {
        match e.downcast_ref::<ClientError>() {
            Some(client_err) if client_err.needs_login() => {
                eprintln!("{}", client_err);
                eprintln!();
                eprintln!("Log in first:");
                eprintln!("  friendlog login --email <EMAIL>");
                std::process::exit(2);
            }
            Some(ClientError::Unavailable) => {
                eprintln!("Cannot connect to the friendlog API");
                eprintln!("Check the URL with `friendlog status` or pass --api-url");
                std::process::exit(1);
            }
            _ => {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
        }
    }
}

fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("friendlog={}", logging.level)),
    );

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    // Needs neither a backend URL nor a session
    if let Commands::Config { output } = &cli.command {
        return write_default_config(output.as_ref());
    }

    let base = ApiBase::resolve(cli.api_url.as_deref(), &config)?;
    let client = FriendClient::from_config(&config, base)?;
    let format = cli.format;

    match cli.command {
        Commands::Login { email, password } => {
            let password = password_or_prompt(password)?;
            client.login(&email, &password).await?;
            println!("Logged in as {}", email.trim());
        }

        Commands::Register {
            name,
            email,
            password,
        } => {
            let password = password_or_prompt(password)?;
            client.register(&name, &email, &password).await?;
            println!("Registered and logged in as {}", email.trim());
        }

        Commands::Logout => {
            if client.logout().await? {
                println!("Logged out");
            } else {
                println!("Not logged in");
            }
        }

        Commands::Friends => {
            let friends = client.friends().await?;
            match format {
                OutputFormat::Json => print_json(&friends)?,
                OutputFormat::Table => print_friends(&friends),
            }
        }

        Commands::Friend { command } => match command {
            FriendCommand::Add { name } => {
                let friend = client.create_friend(&name).await?;
                match format {
                    OutputFormat::Json => print_json(&friend)?,
                    OutputFormat::Table => println!("Added {} (ID {})", friend.name, friend.id),
                }
            }
            FriendCommand::Show { id } => {
                let details = client.friend_details(id).await?;
                match format {
                    OutputFormat::Json => print_json(&details)?,
                    OutputFormat::Table => print_details(&details),
                }
            }
            FriendCommand::Set { id, name, value } => {
                let details = client.friend_details(id).await?;
                let mut draft = AttributeDraft::from(details.attributes);
                let previous = draft.set(&name, value.as_str())?;

                if !draft.is_dirty() {
                    println!("{} already has {} = {}", details.friend_name, name, value);
                    return Ok(());
                }

                client.update_attributes(id, draft.into_attributes()).await?;
                match previous {
                    Some(old) => println!("Updated {}: {} -> {}", name.trim(), old, value),
                    None => println!("Added {} = {}", name.trim(), value),
                }
            }
            FriendCommand::Unset { id, name } => {
                let details = client.friend_details(id).await?;
                let mut draft = AttributeDraft::from(details.attributes);

                if draft.unset(&name) == 0 {
                    bail!("{} has no attribute named {:?}", details.friend_name, name);
                }

                client.update_attributes(id, draft.into_attributes()).await?;
                println!("Removed {} from {}", name.trim(), details.friend_name);
            }
        },

        Commands::Conversation { command } => match command {
            ConversationCommand::Add {
                friend_id,
                context,
                date,
            } => {
                let date = parse_date(&date)?;
                client.add_conversation(friend_id, &context, date).await?;
                println!("Logged conversation on {}", date.format("%Y-%m-%d"));
            }
            ConversationCommand::Show { friend_id, index } => {
                let conversation = client.conversation(friend_id, index).await?;
                match format {
                    OutputFormat::Json => print_json(&conversation)?,
                    OutputFormat::Table => print_conversation(&conversation),
                }
            }
        },

        Commands::Chat { command } => match command {
            ChatCommand::Send { message } => {
                let reply = client.send_message(&message.join(" ")).await?;
                match format {
                    OutputFormat::Json => print_json(&reply)?,
                    OutputFormat::Table => {
                        println!("{}", reply.answer().unwrap_or("(no answer yet)"))
                    }
                }
            }
            ChatCommand::History => {
                let history = client.chat_history().await?;
                match format {
                    OutputFormat::Json => print_json(&history)?,
                    OutputFormat::Table => print_history(&history),
                }
            }
        },

        Commands::Status => {
            println!("Friendlog v{}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("API URL: {}", client.base());
            println!("Session file: {:?}", config.session.token_file);

            match client.current_session().await? {
                Some(session) => println!(
                    "Session: logged in (expires {})",
                    session
                        .expires_at
                        .with_timezone(&Local)
                        .format("%Y-%m-%d %H:%M")
                ),
                None => println!("Session: not logged in"),
            }
        }

        Commands::Config { .. } => unreachable!("config is written before the client is built"),
    }

    Ok(())
}

fn write_default_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let config = friendlog::config::generate_default_config();

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)
                .with_context(|| format!("writing config to {:?}", path))?;
            println!("Config written to {:?}", path);
        }
        None => print!("{}", config),
    }

    Ok(())
}

fn password_or_prompt(password: Option<String>) -> anyhow::Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }

    eprint!("Password: ");
    std::io::stderr().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();

    if password.is_empty() {
        bail!("password must not be empty");
    }
    Ok(password)
}

fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
    let today = Local::now().date_naive();

    match s.trim().to_lowercase().as_str() {
        "today" => Ok(today),
        "yesterday" => Ok(today - Duration::days(1)),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d")
            .with_context(|| format!("Invalid date: {}. Use: today, yesterday, YYYY-MM-DD", s)),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_friends(friends: &[Friend]) {
    if friends.is_empty() {
        println!("No friends yet.");
        println!();
        println!("Add your first one with:");
        println!("  friendlog friend add <NAME>");
        return;
    }

    println!("{:<8} {}", "ID", "Name");
    println!("{}", "-".repeat(40));
    for friend in friends {
        println!("{:<8} {}", friend.id, friend.name);
    }
}

fn print_details(details: &FriendDetails) {
    println!("{}", details.friend_name);
    println!();

    println!("Attributes:");
    if details.attributes.is_empty() {
        println!("  (none)");
    } else {
        let width = details
            .attributes
            .iter()
            .map(|a| a.attribute_name.chars().count())
            .max()
            .unwrap_or(0);
        for attribute in &details.attributes {
            println!(
                "  {:<width$}  {}",
                attribute.attribute_name,
                attribute.value,
                width = width
            );
        }
    }

    println!();
    println!("Conversations:");
    if details.conversations.is_empty() {
        println!("  (none)");
    } else {
        for (index, conversation) in details.conversations.iter().enumerate() {
            println!(
                "  [{}] {}  {}",
                index,
                conversation.conversation_date,
                preview(&conversation.context, 60)
            );
        }
    }
}

fn print_conversation(conversation: &Conversation) {
    println!("Date: {}", conversation.conversation_date);
    println!();
    println!("{}", conversation.context);
}

fn print_history(history: &[ChatMessage]) {
    if history.is_empty() {
        println!("No messages yet.");
        return;
    }

    for message in history {
        println!("[{}] you: {}", message.created_at, message.content);
        match &message.response {
            Some(response) => println!(
                "[{}] assistant: {}",
                response.created_at,
                response.final_answer.as_deref().unwrap_or("(no answer)")
            ),
            None => println!("  (waiting for answer)"),
        }
        println!();
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    let line = text.lines().next().unwrap_or("");
    if line.chars().count() > max_chars || text.lines().count() > 1 {
        let cut: String = line.chars().take(max_chars).collect();
        format!("{}...", cut)
    } else {
        line.to_string()
    }
}
