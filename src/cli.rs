use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

/// Testimonials: render a customer review feed as a rotating carousel
#[derive(Parser, Debug, Clone)]
#[command(name = "testimonials")]
#[command(version)]
#[command(about = "Render a customer review feed as a testimonial carousel", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true, env = "TESTIMONIALS_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "TESTIMONIALS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Feed path, relative to the base
    #[arg(long, global = true, value_name = "PATH")]
    pub feed: Option<String>,

    /// Directory or http(s) URL the feed path is resolved against
    #[arg(long, global = true, value_name = "DIR|URL")]
    pub base: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Write the carousel as a static HTML page
    Render {
        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Page title
        #[arg(long, default_value = "Customer Reviews")]
        title: String,

        /// Emit only the carousel markup, without the surrounding page
        #[arg(long, default_value_t = false)]
        fragment: bool,
    },
    /// Load the feed and print a summary
    Check,
    /// Browse the carousel in the terminal
    Preview,
    /// Show the reviews as a continuously scrolling strip
    Ticker,
    /// Write the default configuration file if none exists
    InitConfig,
}

impl Command {
    /// Terminal views log to a file instead of stderr.
    pub fn is_interactive(&self) -> bool {
        matches!(self, Command::Preview | Command::Ticker)
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(feed) = &self.feed {
            config.feed.path = feed.clone();
        }
        if let Some(base) = &self.base {
            config.feed.base = base.clone();
        }
    }
}
