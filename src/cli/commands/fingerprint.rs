use anyhow::Context;
use serde_json::json;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

use crate::cli::{utils::output_value, OutputFormat};
use crate::middleware::fingerprint;

pub async fn handle(path: Option<PathBuf>, output_format: OutputFormat) -> anyhow::Result<()> {
    let bytes = match &path {
        Some(path) => tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut buf)
                .await
                .context("failed to read stdin")?;
            buf
        }
    };

    let etag = fingerprint(&bytes);
    output_value(
        output_format,
        &etag,
        json!({ "etag": etag, "bytes": bytes.len() }),
    )
}
