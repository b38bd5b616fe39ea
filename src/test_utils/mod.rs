mod bpe;

pub use bpe::tiny_bpe;

use crate::dataset::TokenEncoder;

/// One token per byte.
pub struct ByteEncoder;

impl TokenEncoder for ByteEncoder {
    fn encode_ids(&self, text: &str) -> anyhow::Result<Vec<u32>> {
        Ok(text.bytes().map(u32::from).collect())
    }

    fn decode_ids(&self, ids: &[u32]) -> anyhow::Result<String> {
        let bytes = ids.iter().map(|&id| u8::try_from(id)).collect::<Result<Vec<u8>, _>>()?;
        Ok(String::from_utf8(bytes)?)
    }

    fn n_vocab(&self) -> usize {
        256
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_encoder_round_trips() {
        let ids = ByteEncoder.encode_ids("<Q>é</Q>").unwrap();
        assert_eq!(ids.len(), 9);
        assert_eq!(ByteEncoder.decode_ids(&ids).unwrap(), "<Q>é</Q>");
    }

    #[test]
    fn tiny_bpe_covers_every_byte() {
        let tokenizer = tiny_bpe(&["nmap -sV host"]);
        assert!(tokenizer.get_vocab_size(true) >= 256);
        let ids = tokenizer.encode_ids("ÿ~\n").unwrap();
        assert_eq!(tokenizer.decode_ids(&ids).unwrap(), "ÿ~\n");
    }
}
