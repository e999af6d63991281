use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use condenser_client::ClientSettings;

/// Submit a document to the condensation service and print the result.
#[derive(Debug, Parser)]
#[command(name = "condenser", version, about)]
pub struct Args {
    /// Local file to upload for condensation.
    #[arg(long, value_name = "PATH", conflicts_with = "url")]
    pub file: Option<PathBuf>,

    /// Remote URL to condense.
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Base address of the condensation service.
    #[arg(
        long,
        value_name = "ADDR",
        env = "CONDENSER_API_URL",
        default_value = "http://localhost:8030"
    )]
    pub api_url: String,

    /// Seconds between status polls for an asynchronous job.
    #[arg(long, value_name = "SECS", default_value_t = 3)]
    pub poll_interval_secs: u64,

    /// Directory where downloaded results are written.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Save the condensed text to the output directory on success.
    #[arg(long)]
    pub download: bool,
}

impl Args {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.api_url.clone(),
            poll_interval: Duration::from_secs(self.poll_interval_secs.max(1)),
            ..ClientSettings::default()
        }
    }
}
