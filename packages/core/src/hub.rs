//! Fetches the public fallback model used when no local checkpoint exists.

use anyhow::{Result, bail};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::{AsyncWriteExt, BufWriter};

/// Well-known model loaded when checkpoint resolution comes up empty.
pub const DEFAULT_MODEL_ID: &str = "distilbert-base-uncased";

const HUB_BASE_URL: &str = "https://huggingface.co";

/// Files required by [`crate::OnnxClassifier::load`]: remote path in the
/// model repository, and the local name it is cached under.
const ARTIFACTS: [(&str, &str); 3] = [
    ("tokenizer.json", "tokenizer.json"),
    ("config.json", "config.json"),
    ("onnx/model.onnx", "model.onnx"),
];

/// Download the artifacts for `model_id` into the local cache, skipping files
/// that are already present, and return the cache directory.
///
/// Any failure here propagates to the caller; fetching the fallback happens
/// during startup, where failure is fatal.
pub async fn fetch_model(model_id: &str) -> Result<PathBuf> {
    let cache_dir = dirs_next::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("reply-classifier")
        .join(model_id.replace('/', "--"));
    fs::create_dir_all(&cache_dir).await?;

    let client = reqwest::Client::new();
    for (remote, local) in ARTIFACTS {
        let dest = cache_dir.join(local);
        if fs::try_exists(&dest).await? {
            tracing::debug!("{} already cached", dest.display());
            continue;
        }
        download(&client, model_id, remote, &dest).await?;
    }

    Ok(cache_dir)
}

async fn download(
    client: &reqwest::Client,
    model_id: &str,
    remote: &str,
    dest: &Path,
) -> Result<()> {
    let url = format!("{}/{}/resolve/main/{}", HUB_BASE_URL, model_id, remote);
    tracing::info!("Fetching {}", url);

    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        bail!("Hub responded with {} for {}", response.status(), url);
    }

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(dest)
        .await?;
    let mut writer = BufWriter::new(file);

    if let Err(err) = write_stream(response, &mut writer).await {
        // Don't leave a truncated file behind to be "cached" on the next boot.
        drop(writer);
        let _ = fs::remove_file(dest).await;
        return Err(err);
    }

    Ok(())
}

async fn write_stream(
    response: reqwest::Response,
    writer: &mut BufWriter<fs::File>,
) -> Result<()> {
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        writer.write_all(&chunk?).await?;
    }
    writer.flush().await?;
    Ok(())
}
