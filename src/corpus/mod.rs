//! Corpus Builder
//!
//! Turns collector output and curated questions into tagged question/answer strings.
//! Order is `curated ++ scraped ++ hand-written` and is never shuffled: the packager
//! splits positionally, so the validation tail always comes from the generated part.

pub mod curated;
pub mod templates;
pub mod vocab;

use std::path::PathBuf;

use log::{info, warn};

pub use vocab::{DelimiterVocabulary, MarkerPair, Role, TrainingExample};

use crate::{
    category::ScrapedData,
    collector::persist,
    config::ConfigCorpus,
    error::PipelineError,
};

/// The rendered examples, curated first.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub examples: Vec<String>,
    pub curated: usize,
    pub scraped: usize,
    pub handwritten: usize,
}

impl Corpus {
    pub fn assemble(
        curated: &[TrainingExample],
        scraped: &[TrainingExample],
        handwritten: &[TrainingExample],
        vocab: &DelimiterVocabulary,
    ) -> Self {
        let examples =
            curated.iter().chain(scraped).chain(handwritten).map(|e| e.render(vocab)).collect();
        Self {
            examples,
            curated: curated.len(),
            scraped: scraped.len(),
            handwritten: handwritten.len(),
        }
    }

    /// Examples joined by newlines.
    pub fn text(&self) -> String {
        self.examples.join("\n")
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}

#[derive(Debug)]
pub struct CorpusBuilder<'a> {
    vocab: &'a DelimiterVocabulary,
    scraped_dir: PathBuf,
    curated_questions: PathBuf,
    require_scraped_data: bool,
}

impl<'a> CorpusBuilder<'a> {
    pub fn new(config: &ConfigCorpus, vocab: &'a DelimiterVocabulary) -> Self {
        Self {
            vocab,
            scraped_dir: config.scraped_dir.clone(),
            curated_questions: config.curated_questions.clone(),
            require_scraped_data: config.require_scraped_data,
        }
    }

    fn load_scraped(&self) -> anyhow::Result<ScrapedData> {
        let path = persist::data_path(&self.scraped_dir);
        if path.exists() {
            return persist::load(&self.scraped_dir);
        }
        if self.require_scraped_data {
            return Err(PipelineError::MissingScrapedData(path).into());
        }
        warn!(target: "corpus", "Scraped data file not found: {path:?}, building from curated data only");
        Ok(ScrapedData::default())
    }

    pub fn build(&self) -> anyhow::Result<Corpus> {
        info!(target: "corpus", "Loading scraped data...");
        let data = self.load_scraped()?;

        info!(target: "corpus", "Creating conversational data...");
        let scraped = templates::scraped_examples(&data, self.vocab);

        info!(target: "corpus", "Adding cybersecurity prompts...");
        let handwritten = templates::handwritten_examples(self.vocab);

        info!(target: "corpus", "Loading curated training questions...");
        let curated = curated::load_curated(&self.curated_questions);

        let corpus = Corpus::assemble(&curated, &scraped, &handwritten, self.vocab);
        info!(
            target: "corpus",
            "Total conversations: {} ({} curated, {} scraped, {} hand-written)",
            corpus.len(),
            corpus.curated,
            corpus.scraped,
            corpus.handwritten
        );
        Ok(corpus)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::category::{Category, ScrapedRecord};

    fn config(dir: &std::path::Path) -> ConfigCorpus {
        ConfigCorpus {
            scraped_dir: dir.to_path_buf(),
            curated_questions: dir.join("train_questions.txt"),
            require_scraped_data: true,
        }
    }

    #[test]
    fn curated_examples_come_first() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let mut data = ScrapedData::default();
        data.push(
            Category::LinuxCommands,
            ScrapedRecord::new(Category::LinuxCommands, "https://a", "chmod 600 ~/.ssh/id_rsa".into()),
        );
        persist::save(dir.path(), &data)?;
        fs::write(dir.path().join("train_questions.txt"), "User: CURATED-MARKER\nBot: yes\n")?;

        let vocab = DelimiterVocabulary::default();
        let corpus = CorpusBuilder::new(&config(dir.path()), &vocab).build()?;
        assert_eq!((corpus.curated, corpus.scraped, corpus.handwritten), (1, 3, 5));
        assert_eq!(corpus.examples[0], "<Q>CURATED-MARKER</Q>\n<A>yes</A>");

        let text = corpus.text();
        let curated_at = text.find("CURATED-MARKER").unwrap();
        let scraped_at = text.find("chmod 600").unwrap();
        let handwritten_at = text.find("How do I start a penetration test?").unwrap();
        assert!(curated_at < scraped_at && scraped_at < handwritten_at);
        assert_eq!(text.matches("\n<Q>").count(), corpus.len() - 1);
        Ok(())
    }

    #[test]
    fn missing_scraped_data_is_fatal_by_default() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("train_questions.txt"), "User: q\nBot: a\n")?;
        let vocab = DelimiterVocabulary::default();
        let err = CorpusBuilder::new(&config(dir.path()), &vocab).build().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::MissingScrapedData(_))
        ));
        Ok(())
    }

    #[test]
    fn missing_scraped_data_can_be_tolerated() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("train_questions.txt"), "User: q\nBot: a\n")?;
        let vocab = DelimiterVocabulary::default();
        let config = ConfigCorpus { require_scraped_data: false, ..config(dir.path()) };
        let corpus = CorpusBuilder::new(&config, &vocab).build()?;
        assert_eq!((corpus.curated, corpus.scraped, corpus.handwritten), (1, 0, 5));
        Ok(())
    }
}
