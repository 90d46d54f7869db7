//! osspost CLI — upload a local file straight to OSS.
//!
//! Set OSS_BUCKET, OSS_ACCESS_KEY_ID, OSS_ACCESS_KEY_SECRET and
//! OSS_UPLOAD_HOST (a `.env` file works too).

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use osspost::{OssConfig, UploadClient, UploadProgress};

#[derive(Parser, Debug)]
#[command(name = "osspost")]
#[command(about = "Upload a file directly to OSS with a signed POST policy")]
struct Args {
    /// Path to the file to upload
    file: std::path::PathBuf,

    /// Suppress the in-progress indicator on stderr
    #[arg(long)]
    no_progress: bool,

    /// Print the full upload outcome as JSON instead of just the URL
    #[arg(long)]
    json: bool,
}

/// Stderr indicator so stdout stays parseable.
struct StderrProgress;

impl UploadProgress for StderrProgress {
    fn started(&self) {
        eprintln!("uploading...");
    }

    fn finished(&self) {
        eprintln!("done");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = OssConfig::from_env()?;
    let client = UploadClient::new(config)?.with_progress(Arc::new(StderrProgress));

    let path = args
        .file
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("file path is not valid UTF-8"))?;

    let outcome = client.upload(path, !args.no_progress).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", outcome.url);
    }

    Ok(())
}
