use std::path::PathBuf;

use anyhow::Context;
use log::info;
use tokenizers::Tokenizer;

use crate::config::ConfigPackager;

const TOKENIZER_FILE: &str = "tokenizer.json";

/// Locate `tokenizer.json`: the configured local file, or the hub repo's copy.
pub async fn tokenizer_path(config: &ConfigPackager) -> anyhow::Result<PathBuf> {
    if let Some(path) = &config.tokenizer_file {
        return Ok(path.clone());
    }
    info!(target: "packager", "Fetching {TOKENIZER_FILE} of {} from the hub", config.tokenizer_repo);
    let api = hf_hub::api::tokio::Api::new().context("init hf-hub api")?;
    api.model(config.tokenizer_repo.clone())
        .get(TOKENIZER_FILE)
        .await
        .with_context(|| format!("download {TOKENIZER_FILE} of {}", config.tokenizer_repo))
}

pub async fn load_tokenizer(config: &ConfigPackager) -> anyhow::Result<Tokenizer> {
    let path = tokenizer_path(config).await?;
    let tokenizer = Tokenizer::from_file(&path).map_err(anyhow::Error::from_boxed)?;
    info!(
        target: "packager",
        "Loaded tokenizer from {path:?} ({} tokens)",
        tokenizer.get_vocab_size(true)
    );
    Ok(tokenizer)
}
