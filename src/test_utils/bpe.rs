//! Tokenizer fixture shared by the unit tests and `tests/pipeline.rs`.
//!
//! Depends on nothing but `tokenizers` so the integration tests can include it by path.

use tokenizers::{
    models::bpe::{BpeTrainerBuilder, BPE},
    normalizers::NFC,
    pre_tokenizers::byte_level::ByteLevel,
    Tokenizer, TokenizerBuilder,
};

/// A small byte-level BPE trained on `corpus`.
pub fn tiny_bpe(corpus: &[&str]) -> Tokenizer {
    let byte_level = ByteLevel::default().add_prefix_space(false);
    let mut tokenizer = TokenizerBuilder::new()
        .with_model(BPE::default())
        .with_normalizer(Some(NFC::default()))
        .with_pre_tokenizer(Some(byte_level.clone()))
        .with_post_processor(Some(byte_level.clone()))
        .with_decoder(Some(byte_level))
        .build()
        .unwrap();
    let mut trainer = BpeTrainerBuilder::new()
        .show_progress(false)
        .vocab_size(300)
        .min_frequency(1)
        .initial_alphabet(ByteLevel::alphabet().into_iter().collect())
        .build();
    tokenizer.train(&mut trainer, corpus.iter().copied()).unwrap();
    tokenizer.to_string(false).unwrap().parse().unwrap()
}
