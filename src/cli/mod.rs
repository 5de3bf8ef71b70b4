//! CLI module for sempro
//!
//! Provides the command-line interface using clap. Role-specific commands
//! are grouped under `student`, `lecturer` and `coordinator`.

pub mod commands;
mod context;
mod output;

pub use context::AppContext;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::schemas::{SeminarStatus, SeminarType};

/// sempro - thesis seminar portal client
#[derive(Parser, Debug)]
#[command(name = "sempro")]
#[command(version)]
#[command(about = "Register, submit, schedule and assess thesis seminars")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress info-level output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Directory holding config.json and the stored session
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store the session
    Login {
        /// NIM or NIP
        #[arg(short, long)]
        username: String,

        /// Password (prompted on stdin when omitted)
        #[arg(long, env = "SEMPRO_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Clear the stored session
    Logout,

    /// Show the logged-in user and the role the server reports
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the documents each seminar type requires
    Requirements {
        /// Only this seminar type (proposal or result)
        #[arg(long = "type")]
        seminar_type: Option<SeminarType>,
    },

    /// Student operations
    Student {
        #[command(subcommand)]
        command: StudentCommand,
    },

    /// Lecturer operations
    Lecturer {
        #[command(subcommand)]
        command: LecturerCommand,
    },

    /// Coordinator operations
    Coordinator {
        #[command(subcommand)]
        command: CoordinatorCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum StudentCommand {
    /// Show progress of both seminars
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Register or update research details
    Register {
        /// proposal or result
        #[arg(long = "type", default_value = "proposal")]
        seminar_type: SeminarType,

        /// Research title
        #[arg(long)]
        title: String,

        /// Advisor NIP (one or two)
        #[arg(long = "advisor", required = true)]
        advisors: Vec<String>,
    },

    /// Upload documents as DOCUMENT_ID=PATH pairs
    Upload {
        /// proposal or result
        #[arg(long = "type", default_value = "proposal")]
        seminar_type: SeminarType,

        /// e.g. KRS=./krs.pdf
        #[arg(required = true, value_parser = parse_upload_pair)]
        files: Vec<(String, PathBuf)>,
    },
}

/// Which of the lecturer's seminars to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LecturerView {
    Advised,
    Assessed,
    All,
}

#[derive(Subcommand, Debug)]
pub enum LecturerCommand {
    /// List seminars you advise or assess
    Seminars {
        #[arg(long, value_enum, default_value = "all")]
        view: LecturerView,

        /// Case-insensitive match on title or NIM
        #[arg(long)]
        search: Option<String>,

        #[arg(long = "type")]
        seminar_type: Option<SeminarType>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Submit your assessment for a held seminar
    Assess {
        /// Seminar ID
        id: i64,

        #[arg(long)]
        writing: String,

        #[arg(long)]
        presentation: String,

        #[arg(long = "title-score")]
        title: String,

        /// Required when you advise the seminar
        #[arg(long)]
        guidance: Option<String>,

        #[arg(long)]
        feedback: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CoordinatorCommand {
    /// List all seminars
    Seminars {
        #[arg(long)]
        status: Option<SeminarStatus>,

        #[arg(long = "type")]
        seminar_type: Option<SeminarType>,

        #[arg(long)]
        search: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Assign time, room and two assessors to a submitted seminar
    Schedule {
        /// Seminar ID
        id: i64,

        /// RFC 3339 timestamp or local "YYYY-MM-DD HH:MM"
        #[arg(long)]
        time: String,

        #[arg(long)]
        room: String,

        /// Assessor NIP (exactly two)
        #[arg(long = "assessor", required = true)]
        assessors: Vec<String>,
    },

    /// List students, or show one by NIM
    Students {
        nim: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// List lecturers, or show one by NIP
    Lecturers {
        nip: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Browse the security log
    Logs {
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Defaults to the configured page size
        #[arg(long)]
        per_page: Option<u32>,

        /// Include entries from every user
        #[arg(long)]
        all: bool,

        #[arg(long)]
        json: bool,
    },
}

fn parse_upload_pair(raw: &str) -> std::result::Result<(String, PathBuf), String> {
    match raw.split_once('=') {
        Some((id, path)) if !id.trim().is_empty() && !path.trim().is_empty() => {
            Ok((id.trim().to_ascii_uppercase(), PathBuf::from(path.trim())))
        }
        _ => Err(format!("expected DOCUMENT_ID=PATH, got '{}'", raw)),
    }
}
