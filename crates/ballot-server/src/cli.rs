use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "ballot-server", about = "Self-hosted polls API server")]
pub struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "ballot.toml")]
    pub config: String,

    /// Override the bind address from the config file.
    #[arg(long)]
    pub bind: Option<String>,
}
