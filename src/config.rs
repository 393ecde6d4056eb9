//! Server bind configuration

use clap::Parser;

/// Command line and environment configuration for the server binary.
#[derive(Debug, Parser)]
#[command(name = "item_manager", version, about = "Typed request binding demo server")]
pub struct ServerConfig {
    /// Host address to bind
    #[arg(long, env = "BIND_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// TCP port to listen on
    #[arg(long, env = "BIND_PORT", default_value_t = 3000)]
    pub port: u16,
}
