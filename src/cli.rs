// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skiff")]
#[command(about = "Deploy builds and provision a remote web host over SSH")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit machine-readable JSON output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new skiff.yml configuration file
    Init {
        /// Domain to pre-fill in the template
        #[arg(long)]
        domain: Option<String>,

        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Deploy the compiled front-end bundle
    Frontend {
        /// Local build directory to upload
        path: PathBuf,
    },

    /// Deploy the backend tree and run the provisioning sequence
    Backend {
        /// Local backend directory to upload
        path: PathBuf,
    },

    /// Issue a TLS certificate for the domain unless one exists
    Tls,

    /// Show hosting status for the configured server
    Status,

    /// Convert a document to audio and wait for the result
    Convert {
        /// Document to convert
        file: PathBuf,

        /// Voice to use
        #[arg(long)]
        voice: Option<String>,

        /// Speaking rate multiplier
        #[arg(long, default_value_t = 1.0)]
        rate: f64,

        /// Pitch multiplier
        #[arg(long, default_value_t = 1.0)]
        pitch: f64,
    },

    /// List the voices the conversion service offers
    Voices,

    /// Show past conversions
    History,
}
