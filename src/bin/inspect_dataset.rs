use std::path::PathBuf;

use anyhow::Context;
use cyberbot::{
    config::Config,
    dataset::{split_index, DatasetMeta, TokenEncoder, TokenFile, TRAIN_FILE, VAL_FILE},
    tokenizer::load_tokenizer,
};

const PREVIEW_TOKENS: usize = 64;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    cyberbot::init_logger();
    let config = Config::load()?;
    let mut args = std::env::args();
    args.next();
    let dir = args.next().map(PathBuf::from).unwrap_or(config.packager.output_dir.clone());

    let meta = DatasetMeta::load_json(&dir)?;
    let train = TokenFile::open(dir.join(TRAIN_FILE))?;
    let val = TokenFile::open(dir.join(VAL_FILE))?;
    let tokenizer = load_tokenizer(&config.packager).await?;

    println!("dataset {dir:?}");
    println!(
        "vocab {} (tokenizer {}), train {}, val {}, total {}",
        meta.vocab_size,
        tokenizer.n_vocab(),
        train.len(),
        val.len(),
        meta.total_token_count
    );
    anyhow::ensure!(train.len() == meta.train_token_count, "train.bin disagrees with meta");
    anyhow::ensure!(val.len() == meta.val_token_count, "val.bin disagrees with meta");
    anyhow::ensure!(
        train.len() + val.len() == meta.total_token_count,
        "splits do not add up to the total"
    );
    if train.len() != split_index(meta.total_token_count, config.packager.train_percent) {
        println!("(split boundary differs from train_percent = {})", config.packager.train_percent);
    }

    for (name, file) in [("train", &train), ("val", &val)] {
        let head: Vec<u32> = file.iter().take(PREVIEW_TOKENS).map(u32::from).collect();
        let text = tokenizer.decode_ids(&head).context("decode preview")?;
        println!("#{name}: {head:?} => '{text}'");
    }
    Ok(())
}
