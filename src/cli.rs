use clap::Parser;

/// Command-line options for the medfinder web UI.
#[derive(Debug, Parser)]
#[command(
    name = "medfinder",
    version,
    about = "Look up medicines by active ingredient and export a one-page PDF prescription"
)]
pub struct Cli {
    /// Address to bind the web UI on.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
}
