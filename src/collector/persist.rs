//! Whole-file writers for the collector output.

use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use log::info;

use crate::category::ScrapedData;

pub const DATA_FILE: &str = "cybersecurity_data.json";
pub const TEXT_FILE: &str = "training_data.txt";

pub fn data_path(dir: impl AsRef<Path>) -> PathBuf {
    dir.as_ref().join(DATA_FILE)
}

/// Render the human-readable mirror of every category.
pub fn render_text(data: &ScrapedData) -> String {
    let mut out = String::new();
    for (category, records) in data.iter() {
        let _ = writeln!(out, "\n# {}", category.name().to_uppercase());
        let _ = writeln!(out, "{}", "=".repeat(50));
        for record in records {
            let _ = writeln!(out, "Source: {}", record.source);
            let _ = writeln!(out, "Type: {}", record.kind);
            let _ = writeln!(out, "Content: {}", record.content);
            let _ = writeln!(out, "{}", "-".repeat(30));
        }
    }
    out
}

/// Write the JSON document, the combined text file and one text file per category.
pub fn save(dir: impl AsRef<Path>, data: &ScrapedData) -> anyhow::Result<()> {
    let dir = dir.as_ref();
    info!(target: "collector", "Saving scraped data to {dir:?}");
    fs::create_dir_all(dir).with_context(|| format!("create output dir {dir:?}"))?;

    let json_path = data_path(dir);
    let file = fs::File::create(&json_path).with_context(|| format!("create {json_path:?}"))?;
    serde_json::to_writer_pretty(file, data).context("write scraped json")?;

    fs::write(dir.join(TEXT_FILE), render_text(data)).context("write combined text file")?;

    for (category, records) in data.iter() {
        let body: String = records.iter().map(|r| format!("{}\n", r.content)).collect();
        let path = dir.join(format!("{}.txt", category.name()));
        fs::write(&path, body).with_context(|| format!("write {path:?}"))?;
    }

    info!(
        target: "collector",
        "Saved {} items across {} categories",
        data.total(),
        crate::category::Category::ALL.len()
    );
    for (category, records) in data.iter() {
        info!(target: "collector", "{}: {} items", category.name(), records.len());
    }
    Ok(())
}

pub fn load(dir: impl AsRef<Path>) -> anyhow::Result<ScrapedData> {
    let path = data_path(dir);
    let file = fs::File::open(&path).with_context(|| format!("open {path:?}"))?;
    serde_json::from_reader(std::io::BufReader::new(file)).with_context(|| format!("parse {path:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{Category, ScrapedRecord};

    fn sample() -> ScrapedData {
        let mut data = ScrapedData::default();
        data.push(
            Category::LinuxCommands,
            ScrapedRecord::new(Category::LinuxCommands, "https://a", "ls -la /tmp".into()),
        );
        data.push(
            Category::NmapCommands,
            ScrapedRecord::new(Category::NmapCommands, "https://b", "nmap -sV host".into()),
        );
        data
    }

    #[test]
    fn writes_every_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        save(dir.path(), &sample())?;
        assert!(dir.path().join(DATA_FILE).exists());
        assert!(dir.path().join(TEXT_FILE).exists());
        for category in Category::ALL {
            assert!(dir.path().join(format!("{}.txt", category.name())).exists());
        }
        assert_eq!(fs::read_to_string(dir.path().join("linux_commands.txt"))?, "ls -la /tmp\n");
        assert_eq!(fs::read_to_string(dir.path().join("bash_scripts.txt"))?, "");
        Ok(())
    }

    #[test]
    fn json_round_trips() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let data = sample();
        save(dir.path(), &data)?;
        assert_eq!(load(dir.path())?, data);
        Ok(())
    }

    #[test]
    fn text_mirror_layout() {
        let text = render_text(&sample());
        assert!(text.starts_with("\n# PENETRATION_TESTING\n"));
        assert!(text.contains(&format!(
            "# LINUX_COMMANDS\n{}\nSource: https://a\nType: linux_command\nContent: ls -la /tmp\n{}\n",
            "=".repeat(50),
            "-".repeat(30)
        )));
        assert!(text.ends_with(&format!("# BASH_SCRIPTS\n{}\n", "=".repeat(50))));
    }
}
