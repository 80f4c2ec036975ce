//! CLI interface for qrdash

pub mod commands;
mod output;
pub mod shell;

pub use output::*;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::qr::QrStyle;

#[derive(Parser)]
#[command(name = "qrdash")]
#[command(author = "Krakaw")]
#[command(version)]
#[command(about = "Create, save and manage styled QR codes", long_about = None)]
pub struct Cli {
    /// Path to a qrdash.toml (defaults to searching upward from the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL, e.g. http://localhost:8000/api
    #[arg(long, global = true, env = "QRDASH_API_BASE")]
    pub api_base: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default qrdash.toml in the current directory
    Init,

    /// Log in and store the session token
    Login {
        #[arg(short, long)]
        username: String,

        /// Prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Create an account and store the session token
    Signup {
        #[arg(short, long)]
        username: String,

        /// Prompted for when omitted
        #[arg(short, long)]
        email: Option<String>,

        /// Prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Forget the stored session token
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Call GET /api/hello
    Hello,

    /// Call GET /api/time
    Time,

    /// Call POST /api/echo
    Echo {
        /// Text to echo back
        text: String,

        #[arg(short, long, default_value = "0")]
        number: i64,
    },

    /// Create and manage QR codes
    Qr {
        #[command(subcommand)]
        action: QrAction,
    },

    /// Interactive mode with dashboard, create and manage screens
    App,

    /// Start the reference API server
    Serve {
        /// Host to bind to (defaults to the config value)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (defaults to the config value)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[derive(Subcommand)]
pub enum QrAction {
    /// Render a QR code without saving it
    Create {
        /// URL or text to encode
        url: String,

        #[command(flatten)]
        style: StyleArgs,

        /// Directory to write qr-code.png into
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Render a QR code and save it to your account
    Save {
        /// URL or text to encode
        url: String,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// List saved QR codes
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Delete a saved QR code
    Delete {
        id: i64,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Write a saved QR code to qr-code-<url>.png
    Download {
        id: i64,

        /// Target directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
}

/// Style overrides; unset values come from the [qr] config section
#[derive(Args, Debug, Clone, Default)]
pub struct StyleArgs {
    /// square, rounded, circle or gapped
    #[arg(long)]
    pub dot_style: Option<QrStyle>,

    /// square, rounded, circle or gapped
    #[arg(long)]
    pub eye_style: Option<QrStyle>,

    /// Module color, e.g. #000000
    #[arg(long)]
    pub fill_color: Option<String>,

    /// Background color, e.g. #ffffff
    #[arg(long)]
    pub back_color: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}
