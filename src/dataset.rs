/*! Tokenized dataset packaging

## About the token files

`train.bin` and `val.bin` are bare arrays of `u16` token ids with no header, in the
host's native byte order, so the training side can map them straight into memory.
The split is positional: the first `floor(total * train_percent / 100)` tokens go to
`train.bin` and the rest to `val.bin`. Nothing is shuffled.

**Note** that native endianness ties the files to the machine that produced them:
share the raw corpus and re-run the packager instead.
*/
use std::{fs, path::Path};

use anyhow::Context;
use log::info;
use memmap2::Mmap;
use serde::{Deserialize, Serialize};
use tokenizers::Tokenizer;

use crate::{corpus::DelimiterVocabulary, error::PipelineError};

pub const TRAIN_FILE: &str = "train.bin";
pub const VAL_FILE: &str = "val.bin";
pub const META_PICKLE_FILE: &str = "meta.pkl";
pub const META_JSON_FILE: &str = "meta.json";
pub const RAW_TEXT_FILE: &str = "raw_training_data.txt";

/// A fixed sub-word vocabulary.
pub trait TokenEncoder {
    fn encode_ids(&self, text: &str) -> anyhow::Result<Vec<u32>>;
    fn decode_ids(&self, ids: &[u32]) -> anyhow::Result<String>;
    fn n_vocab(&self) -> usize;
}

impl TokenEncoder for Tokenizer {
    fn encode_ids(&self, text: &str) -> anyhow::Result<Vec<u32>> {
        let encoding = self.encode(text, false).map_err(anyhow::Error::from_boxed)?;
        Ok(encoding.get_ids().to_vec())
    }

    fn decode_ids(&self, ids: &[u32]) -> anyhow::Result<String> {
        self.decode(ids, false).map_err(anyhow::Error::from_boxed)
    }

    fn n_vocab(&self) -> usize {
        self.get_vocab_size(true)
    }
}

/// Number of leading tokens that go to the training split.
pub fn split_index(n_tokens: usize, train_percent: u8) -> usize {
    n_tokens * train_percent as usize / 100
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetMeta {
    pub vocab_size: usize,
    #[serde(rename = "special_tokens")]
    pub delimiter_vocabulary: DelimiterVocabulary,
    #[serde(rename = "train_tokens")]
    pub train_token_count: usize,
    #[serde(rename = "val_tokens")]
    pub val_token_count: usize,
    #[serde(rename = "total_tokens")]
    pub total_token_count: usize,
}

impl DatasetMeta {
    pub fn load_json(dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = dir.as_ref().join(META_JSON_FILE);
        let file = fs::File::open(&path).with_context(|| format!("open {path:?}"))?;
        serde_json::from_reader(file).with_context(|| format!("parse {path:?}"))
    }
}

#[derive(Debug, Clone)]
pub struct PackagedDataset {
    pub train: Vec<u16>,
    pub val: Vec<u16>,
    pub meta: DatasetMeta,
}

/// Encode `text` and split the ids into training and validation ranges.
pub fn package(
    text: &str,
    encoder: &impl TokenEncoder,
    vocab: &DelimiterVocabulary,
    train_percent: u8,
) -> anyhow::Result<PackagedDataset> {
    info!(target: "packager", "Encoding text...");
    let ids = encoder.encode_ids(text)?;
    let tokens = ids
        .iter()
        .enumerate()
        .map(|(pos, &id)| u16::try_from(id).map_err(|_| PipelineError::TokenOverflow { id, pos }))
        .collect::<Result<Vec<u16>, _>>()?;
    info!(target: "packager", "Total tokens: {}", tokens.len());

    let k = split_index(tokens.len(), train_percent);
    let val = tokens[k..].to_vec();
    let mut train = tokens;
    train.truncate(k);

    let meta = DatasetMeta {
        vocab_size: encoder.n_vocab(),
        delimiter_vocabulary: vocab.clone(),
        train_token_count: train.len(),
        val_token_count: val.len(),
        total_token_count: train.len() + val.len(),
    };
    Ok(PackagedDataset { train, val, meta })
}

fn write_tokens(path: &Path, tokens: &[u16]) -> anyhow::Result<()> {
    let bytes: Vec<u8> = tokens.iter().flat_map(|t| t.to_ne_bytes()).collect();
    fs::write(path, bytes).with_context(|| format!("write {path:?}"))
}

impl PackagedDataset {
    /// Write both splits, the metadata (pickle and JSON) and the raw corpus into `dir`.
    pub fn write(&self, dir: impl AsRef<Path>, corpus_text: &str) -> anyhow::Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).with_context(|| format!("create output dir {dir:?}"))?;

        write_tokens(&dir.join(TRAIN_FILE), &self.train)?;
        write_tokens(&dir.join(VAL_FILE), &self.val)?;

        let pickle = serde_pickle::to_vec(&self.meta, serde_pickle::SerOptions::new())
            .context("pickle dataset meta")?;
        fs::write(dir.join(META_PICKLE_FILE), pickle).context("write meta.pkl")?;
        let json = serde_json::to_string_pretty(&self.meta)?;
        fs::write(dir.join(META_JSON_FILE), json).context("write meta.json")?;

        fs::write(dir.join(RAW_TEXT_FILE), corpus_text).context("write raw corpus")?;

        info!(target: "packager", "Training data saved to {dir:?}");
        info!(target: "packager", "Train tokens: {}", self.meta.train_token_count);
        info!(target: "packager", "Validation tokens: {}", self.meta.val_token_count);
        Ok(())
    }
}

/// Read-only view of a `.bin` token file.
///
/// The file is memory mapped; an empty file holds zero tokens.
#[derive(Debug)]
pub struct TokenFile {
    mmap: Option<Mmap>,
}

impl TokenFile {
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let fd = fs::File::open(path).with_context(|| format!("failed to open token file {path:?}"))?;
        // Special case: mapping a zero-length file is not portable
        if fd.metadata()?.len() == 0 {
            return Ok(Self { mmap: None });
        }
        let mmap = unsafe { Mmap::map(&fd) }.context("failed to mmap token file")?;
        if mmap.len() % size_of::<u16>() != 0 {
            anyhow::bail!("token file {path:?} has an odd length of {} bytes", mmap.len());
        }
        Ok(Self { mmap: Some(mmap) })
    }

    fn bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.bytes().len() / size_of::<u16>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.bytes().chunks_exact(size_of::<u16>()).map(|bs| u16::from_ne_bytes([bs[0], bs[1]]))
    }

    /// Widen to the id type the tokenizer works with.
    pub fn ids(&self) -> Vec<u32> {
        self.iter().map(u32::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::test_utils::{tiny_bpe, ByteEncoder};

    #[test]
    fn split_index_is_floor_of_ninety_percent() {
        for n in [0, 1, 2, 9, 10, 11, 19, 99, 100, 101, 12345] {
            assert_eq!(split_index(n, 90), (n as f64 * 0.9).floor() as usize, "n = {n}");
        }
        assert_eq!(split_index(1, 90), 0);
        assert_eq!(split_index(7, 100), 7);
    }

    #[test]
    fn counts_add_up() -> anyhow::Result<()> {
        let vocab = DelimiterVocabulary::default();
        let long = "abc".repeat(333);
        for text in ["", "x", "<Q>hi</Q>\n<A>there</A>", long.as_str()] {
            let ds = package(text, &ByteEncoder, &vocab, 90)?;
            let total = text.len();
            assert_eq!(ds.meta.total_token_count, total);
            assert_eq!(ds.train.len() + ds.val.len(), total);
            assert_eq!(ds.meta.train_token_count, split_index(total, 90));
            assert_eq!(ds.meta.val_token_count, ds.val.len());
        }
        Ok(())
    }

    #[test]
    fn single_token_goes_to_validation() -> anyhow::Result<()> {
        let ds = package("x", &ByteEncoder, &DelimiterVocabulary::default(), 90)?;
        assert!(ds.train.is_empty());
        assert_eq!(ds.val, vec![b'x' as u16]);
        Ok(())
    }

    struct HugeIds;

    impl TokenEncoder for HugeIds {
        fn encode_ids(&self, text: &str) -> anyhow::Result<Vec<u32>> {
            Ok(text.chars().map(|_| 70_000).collect())
        }
        fn decode_ids(&self, _: &[u32]) -> anyhow::Result<String> {
            Ok(String::new())
        }
        fn n_vocab(&self) -> usize {
            70_001
        }
    }

    #[test]
    fn ids_beyond_u16_are_rejected() {
        let err = package("ab", &HugeIds, &DelimiterVocabulary::default(), 90).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::TokenOverflow { id: 70_000, pos: 0 })
        ));
    }

    #[test]
    fn written_files_read_back() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let text = "<Q>How do I list files?</Q>\n<A><CMD>ls -la</CMD></A>";
        let ds = package(text, &ByteEncoder, &DelimiterVocabulary::default(), 90)?;
        ds.write(dir.path(), text)?;

        let train = TokenFile::open(dir.path().join(TRAIN_FILE))?;
        let val = TokenFile::open(dir.path().join(VAL_FILE))?;
        assert_eq!(train.iter().collect::<Vec<_>>(), ds.train);
        assert_eq!(val.iter().collect::<Vec<_>>(), ds.val);
        assert_eq!(fs::metadata(dir.path().join(TRAIN_FILE))?.len(), 2 * ds.train.len() as u64);
        assert_eq!(train.iter().next(), Some(b'<' as u16));

        let mut ids = train.ids();
        ids.extend(val.ids());
        assert_eq!(ByteEncoder.decode_ids(&ids)?, text);

        assert_eq!(fs::read_to_string(dir.path().join(RAW_TEXT_FILE))?, text);
        assert_eq!(DatasetMeta::load_json(dir.path())?, ds.meta);
        Ok(())
    }

    #[derive(Deserialize)]
    struct PickledMeta {
        vocab_size: usize,
        special_tokens: BTreeMap<String, String>,
        train_tokens: usize,
        val_tokens: usize,
        total_tokens: usize,
    }

    #[test]
    fn meta_pickle_uses_consumer_keys() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let ds = package("abcdefghijklmnopqrst", &ByteEncoder, &DelimiterVocabulary::default(), 90)?;
        ds.write(dir.path(), "abcdefghijklmnopqrst")?;
        let bytes = fs::read(dir.path().join(META_PICKLE_FILE))?;
        let meta: PickledMeta = serde_pickle::from_slice(&bytes, serde_pickle::DeOptions::new())?;
        assert_eq!(meta.vocab_size, 256);
        assert_eq!((meta.train_tokens, meta.val_tokens, meta.total_tokens), (18, 2, 20));
        assert_eq!(meta.special_tokens["question_start"], "<Q>");
        assert_eq!(meta.special_tokens.len(), 12);
        Ok(())
    }

    #[test]
    fn empty_token_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(VAL_FILE);
        fs::write(&path, [])?;
        let file = TokenFile::open(&path)?;
        assert!(file.is_empty());
        assert_eq!(file.iter().count(), 0);
        Ok(())
    }

    #[test]
    fn odd_length_file_is_rejected() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(TRAIN_FILE);
        fs::write(&path, [1u8, 2, 3])?;
        assert!(TokenFile::open(&path).is_err());
        Ok(())
    }

    #[test]
    fn bpe_tokens_are_stable_through_decode() -> anyhow::Result<()> {
        let text = concat!(
            "<Q>How do I check for open ports?</Q>\n<A><CMD>nmap -p- <target_ip></CMD></A>\n",
            "<Q>Show me an nmap example</Q>\n<A>nmap -sV 10.0.0.1</A>"
        );
        let tokenizer = tiny_bpe(&[text]);
        let vocab = DelimiterVocabulary::default();
        let ds = package(text, &tokenizer, &vocab, 90)?;
        assert_eq!(ds.meta.vocab_size, tokenizer.get_vocab_size(true));

        let ids: Vec<u32> = ds.train.iter().chain(&ds.val).map(|&t| u32::from(t)).collect();
        let decoded = tokenizer.decode_ids(&ids)?;
        assert_eq!(tokenizer.encode_ids(&decoded)?, ids);
        assert_eq!(decoded, text);
        Ok(())
    }
}
