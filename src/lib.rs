//! Dataset tooling for a small cybersecurity question-answering model.
//!
//! The pipeline runs in three stages:
//! [`collector`] scrapes pages into per-category records, [`corpus`] renders them
//! (plus curated and hand-written examples) into tagged Q/A strings, and [`dataset`]
//! tokenizes the result into `train.bin`/`val.bin` for the external trainer.

pub mod category;
pub mod collector;
pub mod config;
pub mod corpus;
pub mod dataset;
pub mod error;
pub mod prompt;
pub mod tokenizer;

#[cfg(test)]
mod test_utils;

use log::info;

use crate::{
    config::Config,
    corpus::{CorpusBuilder, DelimiterVocabulary},
    dataset::PackagedDataset,
};

/// Build the corpus, tokenize it and write the packaged dataset.
pub async fn prepare(config: &Config, vocab: &DelimiterVocabulary) -> anyhow::Result<PackagedDataset> {
    let corpus = CorpusBuilder::new(&config.corpus, vocab).build()?;
    let text = corpus.text();
    info!(target: "packager", "Total characters: {}", text.chars().count());

    let tokenizer = tokenizer::load_tokenizer(&config.packager).await?;
    let packaged = dataset::package(&text, &tokenizer, vocab, config.packager.train_percent)?;
    packaged.write(&config.packager.output_dir, &text)?;
    Ok(packaged)
}

/// Install the logger, defaulting to `info` when `RUST_LOG` is unset.
pub fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
