use clap::builder::NonEmptyStringValueParser;
use clap::{Args, Parser, Subcommand};

use crate::boards::Boards;
use crate::config::Overrides;
use crate::model::iteration::Iteration;
use crate::model::work_item::WorkItem;

/// azboards - Azure Boards work items from the terminal
#[derive(Parser)]
#[command(name = "azboards")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Connection settings are read from ~/.azboards/config.toml, or ./config.toml \
if that is missing (TOML keys: organization, project, pat, host). YAML config files are not read.")]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct ConnectionArgs {
    /// Organization name (overrides the config file)
    #[arg(long, global = true, env = "AZBOARDS_ORGANIZATION")]
    pub organization: Option<String>,

    /// Project name (overrides the config file)
    #[arg(long, global = true, env = "AZBOARDS_PROJECT")]
    pub project: Option<String>,

    /// Personal access token (overrides the config file)
    #[arg(long, global = true, env = "AZBOARDS_PAT", hide_env_values = true)]
    pub pat: Option<String>,

    /// Server root, e.g. https://dev.azure.com
    #[arg(long, global = true, env = "AZBOARDS_HOST")]
    pub host: Option<String>,
}

impl From<ConnectionArgs> for Overrides {
    fn from(args: ConnectionArgs) -> Self {
        Overrides {
            organization: args.organization,
            project: args.project,
            pat: args.pat,
            host: args.host,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List work items in the project, most recently changed first
    List {
        /// Run this WIQL text instead of the default project query
        #[arg(long)]
        query: Option<String>,
    },

    /// Get work items by ID
    Get {
        /// One or more work item IDs
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Create a new work item
    Create {
        /// Title of the work item
        #[arg(long, value_parser = NonEmptyStringValueParser::new())]
        title: String,

        /// Description of the work item
        #[arg(long, default_value = "")]
        description: String,

        /// Type of work item (Task, Bug, etc.)
        #[arg(long = "type", default_value = "Task")]
        item_type: String,
    },

    /// List the team's iterations
    Iterations,
}

/// Run one command. Backend failures are printed, not returned; the process
/// still exits cleanly.
pub async fn run(boards: &Boards, command: Commands) {
    match command {
        Commands::List { query } => handle_list(boards, query.as_deref()).await,
        Commands::Get { ids } => handle_get(boards, &ids).await,
        Commands::Create {
            title,
            description,
            item_type,
        } => handle_create(boards, &title, &description, &item_type).await,
        Commands::Iterations => handle_iterations(boards).await,
    }
}

async fn handle_list(boards: &Boards, query: Option<&str>) {
    let engine = boards.query_engine();
    let result = match query {
        Some(wiql) => engine.run_query(wiql).await,
        None => engine.list_all().await,
    };
    match result {
        Ok(items) => print!("{}", render_items(&items)),
        Err(e) => eprintln!("Error getting work items: {e}"),
    }
}

async fn handle_get(boards: &Boards, ids: &[String]) {
    match boards.query_engine().list_by_ids(ids).await {
        Ok(items) => print!("{}", render_items(&items)),
        Err(e) => eprintln!("Error getting work items: {e}"),
    }
}

async fn handle_create(boards: &Boards, title: &str, description: &str, item_type: &str) {
    match boards.creator().create(title, description, item_type).await {
        Ok(item) => println!("{}", render_created(&item)),
        Err(e) => eprintln!("Error creating work item: {e}"),
    }
}

async fn handle_iterations(boards: &Boards) {
    match boards.iterations().list_iterations().await {
        Ok(iterations) => print!("{}", render_iterations(&iterations)),
        Err(e) => eprintln!("Error listing iterations: {e}"),
    }
}

pub fn render_items(items: &[WorkItem]) -> String {
    if items.is_empty() {
        return "No work items found\n".to_string();
    }
    let mut out = String::from("Work Items:\n");
    for item in items {
        out.push_str(&format!(
            "#{}: {} [{}]\n",
            item.id, item.fields.title, item.fields.state
        ));
    }
    out
}

pub fn render_created(item: &WorkItem) -> String {
    format!("Created work item #{}: {}", item.id, item.fields.title)
}

pub fn render_iterations(iterations: &[Iteration]) -> String {
    if iterations.is_empty() {
        return "No iterations found\n".to_string();
    }
    let day = |d: Option<chrono::DateTime<chrono::Utc>>| {
        d.map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "?".to_string())
    };
    let mut out = String::from("Iterations:\n");
    for it in iterations {
        out.push_str(&format!(
            "{} [{}] {} → {}",
            it.name,
            it.path,
            day(it.attributes.start_date),
            day(it.attributes.finish_date)
        ));
        if let Some(frame) = &it.attributes.time_frame {
            out.push_str(&format!(" ({frame})"));
        }
        out.push('\n');
    }
    out
}
