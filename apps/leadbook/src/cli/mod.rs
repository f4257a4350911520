//! # Leadbook CLI Module
//!
//! This module implements the CLI interface for Leadbook.
//!
//! ## Available Commands
//!
//! - `list` - Leads ordered by follow-up urgency (optionally filtered)
//! - `show` - One lead in full
//! - `add` - Quick-add a lead
//! - `advance` - Move a lead one stage forward
//! - `schedule` - Set the next follow-up (today, tomorrow, three-days, a date, or clear)
//! - `note` / `promoter` - Edit notes or reassign (prompts when no value is given)
//! - `set` - Edit any free-text field
//! - `stage` - Manually set a stage
//! - `remove` - Delete a lead
//! - `links` - Dial and messaging links
//! - `promoters` - List promoters
//! - `mode` - Switch compact/detailed listing
//! - `status` - Storage and pipeline summary
//! - `reset` - Replace everything with seed data

mod commands;

use crate::config::{BackendKind, Config};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use leadbook_core::{Interest, LeadError, Stage};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Leadbook - lead tracking for real-estate promoters
///
/// Keeps a list of leads with contact info, sales stage and next follow-up,
/// ordered by how urgently each one needs contact.
#[derive(Parser, Debug)]
#[command(name = "leadbook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress confirmation messages of mutating commands
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "leadbook.toml")]
    pub config: PathBuf,

    /// Data directory (overrides config)
    #[arg(short = 'D', long, global = true)]
    pub data: Option<PathBuf>,

    /// Storage backend (overrides config)
    #[arg(short = 'B', long, global = true, value_enum)]
    pub backend: Option<BackendKind>,

    /// Date to treat as today (YYYY-MM-DD); defaults to the local date
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true, visible_alias = "json")]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Listing layout stored in the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListMode {
    /// One line per lead
    Simple,
    /// A card per lead with notes and links
    Detailed,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List leads, most urgent first
    List {
        /// Case-insensitive filter on name or phone
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Show one lead
    Show {
        /// Lead ID
        id: String,
    },

    /// Quick-add a lead
    Add {
        /// Full name
        #[arg(short, long)]
        name: String,

        /// Phone number
        #[arg(short, long)]
        phone: String,

        /// Interest (Compra, Venta, Renta)
        #[arg(short, long)]
        interest: Option<Interest>,

        /// Assigned promoter (defaults to the first promoter)
        #[arg(long)]
        promoter: Option<String>,

        /// First follow-up date (defaults to today + default_follow_up_days)
        #[arg(short, long)]
        follow_up: Option<NaiveDate>,

        /// Where the lead came from (defaults to config default_source)
        #[arg(short, long)]
        source: Option<String>,

        /// Email address
        #[arg(short, long)]
        email: Option<String>,

        /// Initial notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Move a lead one stage forward
    Advance {
        /// Lead ID
        id: String,
    },

    /// Set the next follow-up
    Schedule {
        /// Lead ID
        id: String,

        /// today, tomorrow, three-days, a YYYY-MM-DD date, or clear
        when: String,
    },

    /// Edit notes (prompts when TEXT is omitted)
    Note {
        /// Lead ID
        id: String,

        /// New notes
        text: Option<String>,
    },

    /// Reassign a lead (prompts when NAME is omitted)
    Promoter {
        /// Lead ID
        id: String,

        /// Promoter name
        name: Option<String>,
    },

    /// Edit a free-text field (notes, promoter, name, phone, email, source)
    Set {
        /// Lead ID
        id: String,

        /// Field to edit
        field: String,

        /// New value
        value: String,
    },

    /// Manually set a lead's stage
    Stage {
        /// Lead ID
        id: String,

        /// Stage label or short name (e.g. "Interesado", lost)
        stage: Stage,
    },

    /// Delete a lead
    Remove {
        /// Lead ID
        id: String,
    },

    /// Print dial and messaging links
    Links {
        /// Lead ID
        id: String,
    },

    /// List promoters
    Promoters,

    /// Switch listing layout
    Mode {
        #[arg(value_enum)]
        mode: ListMode,
    },

    /// Show storage and pipeline summary
    Status,

    /// Replace all data with the built-in sample data
    Reset {
        /// Required confirmation
        #[arg(short, long)]
        force: bool,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Resolved settings shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: Config,
    pub backend: BackendKind,
    pub data_dir: PathBuf,
    pub today: NaiveDate,
    pub json_mode: bool,
    pub verbose: bool,
    pub quiet: bool,
}

impl Context {
    /// Merge the config file with command-line overrides.
    pub fn resolve(cli: &Cli) -> Result<Self, LeadError> {
        let config = Config::load(&cli.config)?;
        let backend = cli.backend.unwrap_or(config.backend);
        let data_dir = cli.data.clone().unwrap_or_else(|| config.data_dir.clone());
        let today = cli
            .today
            .unwrap_or_else(|| chrono::Local::now().date_naive());

        Ok(Self {
            config,
            backend,
            data_dir,
            today,
            json_mode: cli.json_mode,
            verbose: cli.verbose,
            quiet: cli.quiet,
        })
    }
}

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), LeadError> {
    let ctx = Context::resolve(&cli)?;

    match cli.command {
        Some(Commands::List { query }) => cmd_list(&ctx, query.as_deref().unwrap_or("")),
        Some(Commands::Show { id }) => cmd_show(&ctx, &id),
        Some(Commands::Add {
            name,
            phone,
            interest,
            promoter,
            follow_up,
            source,
            email,
            notes,
        }) => cmd_add(
            &ctx,
            AddArgs {
                name,
                phone,
                interest,
                promoter,
                follow_up,
                source,
                email,
                notes,
            },
        ),
        Some(Commands::Advance { id }) => cmd_advance(&ctx, &id),
        Some(Commands::Schedule { id, when }) => cmd_schedule(&ctx, &id, &when),
        Some(Commands::Note { id, text }) => {
            cmd_edit(&ctx, &id, leadbook_core::EditField::Notes, text)
        }
        Some(Commands::Promoter { id, name }) => {
            cmd_edit(&ctx, &id, leadbook_core::EditField::Promoter, name)
        }
        Some(Commands::Set { id, field, value }) => {
            let field = field.parse()?;
            cmd_edit(&ctx, &id, field, Some(value))
        }
        Some(Commands::Stage { id, stage }) => cmd_stage(&ctx, &id, stage),
        Some(Commands::Remove { id }) => cmd_remove(&ctx, &id),
        Some(Commands::Links { id }) => cmd_links(&ctx, &id),
        Some(Commands::Promoters) => cmd_promoters(&ctx),
        Some(Commands::Mode { mode }) => cmd_mode(&ctx, mode),
        Some(Commands::Status) => cmd_status(&ctx),
        Some(Commands::Reset { force }) => cmd_reset(&ctx, force),
        None => {
            // No subcommand - list everything by default
            cmd_list(&ctx, "")
        }
    }
}
