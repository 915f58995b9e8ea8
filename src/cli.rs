use clap::{Parser, Subcommand};

/// Quran content proxy — OAuth2 token caching and request forwarding
#[derive(Parser)]
#[command(name = "quran-proxy", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the proxy server
    Serve {
        /// Port to bind (overrides the PORT env var)
        #[arg(short, long)]
        port: Option<u16>,
    },
}
