use clap::{Parser, Subcommand};
use notes_agent::config::NotesConfig;
use notes_agent::error::{NotesError, Result};
use notes_agent::health;
use notes_agent::notes::NoteStore;
use notes_agent::tools::notes::note_tools;
use notes_agent::tools::{ToolManager, ToolParameters};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// 个人笔记工具集：供 Agent 调用的 add / list / read / delete 笔记操作
#[derive(Parser)]
#[command(name = "notes-agent", version, about = "Personal notes store and agent tools")]
struct Cli {
    /// YAML 配置文件
    #[arg(long, short)]
    config: Option<String>,

    /// 笔记 JSON 文件（覆盖配置与 NOTES_FILE）
    #[arg(long, short)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new note with a title and content.
    Add { title: String, content: String },
    /// List all available note titles.
    List,
    /// Read the full content of a note by its title.
    Read { title: String },
    /// Delete a note by its title.
    Delete { title: String },
    /// Print the tool definitions offered to an agent, as JSON.
    Tools,
    /// Invoke a tool by name with JSON arguments, e.g. `call read_note '{"title":"x"}'`.
    Call {
        tool: String,
        #[arg(default_value = "{}")]
        args: String,
    },
    /// Report whether the note store is reachable, as JSON.
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => NotesConfig::load(path)?,
        None => NotesConfig::default(),
    }
    .apply_env()?;
    if let Some(store) = cli.store {
        config.store_path = store;
    }
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_str())),
        )
        .with_writer(std::io::stderr)
        .init();

    let store = Arc::new(NoteStore::open(&config.store_path));
    tracing::debug!(store = %store.location(), "🗒️ notes-agent 启动");

    match cli.command {
        Commands::Add { title, content } => println!("{}", store.add(&title, &content).await?),
        Commands::List => println!("{}", store.list().await?),
        Commands::Read { title } => println!("{}", store.read(&title).await?),
        Commands::Delete { title } => println!("{}", store.delete(&title).await?),
        Commands::Tools => {
            let manager = tool_manager(store, &config);
            println!(
                "{}",
                serde_json::to_string_pretty(&manager.get_tool_definitions())?
            );
        }
        Commands::Call { tool, args } => {
            let parameters: ToolParameters = serde_json::from_str(&args).map_err(|e| {
                NotesError::Other(format!("tool arguments must be a JSON object: {}", e))
            })?;
            let manager = tool_manager(store, &config);
            let result = manager.invoke(&tool, parameters).await;
            println!("{}", result.text());
            if !result.success {
                std::process::exit(1);
            }
        }
        Commands::Health => {
            let report = health::check(&store).await;
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.is_ok() {
                std::process::exit(1);
            }
        }
    }
    Ok(())
}

fn tool_manager(store: Arc<NoteStore>, config: &NotesConfig) -> ToolManager {
    let mut manager = ToolManager::new_with_config(config.tool_execution());
    manager.register_tools(note_tools(store));
    manager
}
