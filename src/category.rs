//! Scraped record categories and the per-category record store.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    PenetrationTesting,
    LinuxCommands,
    NmapCommands,
    CybersecurityGuides,
    BashScripts,
}

impl Category {
    /// Every category, in output order.
    pub const ALL: [Category; 5] = [
        Category::PenetrationTesting,
        Category::LinuxCommands,
        Category::NmapCommands,
        Category::CybersecurityGuides,
        Category::BashScripts,
    ];

    /// The key used in `cybersecurity_data.json` and the per-category file name.
    pub fn name(self) -> &'static str {
        match self {
            Category::PenetrationTesting => "penetration_testing",
            Category::LinuxCommands => "linux_commands",
            Category::NmapCommands => "nmap_commands",
            Category::CybersecurityGuides => "cybersecurity_guides",
            Category::BashScripts => "bash_scripts",
        }
    }

    /// The `type` label the collector stamps on records of this category.
    pub fn record_type(self) -> &'static str {
        match self {
            Category::PenetrationTesting => "command",
            Category::LinuxCommands => "linux_command",
            Category::NmapCommands => "nmap_command",
            Category::CybersecurityGuides => "guide",
            Category::BashScripts => "bash_script",
        }
    }

    /// Records must be strictly longer than this to become training examples.
    pub fn min_content_len(self) -> usize {
        match self {
            Category::PenetrationTesting => 20,
            Category::LinuxCommands => 10,
            Category::NmapCommands => 10,
            Category::CybersecurityGuides => 20,
            Category::BashScripts => 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedRecord {
    pub source: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ScrapedRecord {
    pub fn new(category: Category, source: &str, content: String) -> Self {
        Self { source: source.to_string(), content, kind: category.record_type().to_string() }
    }
}

/// Records bucketed by category.
///
/// One field per category keeps the key set closed: the JSON form always carries
/// all five keys, and absent keys read back as empty lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapedData {
    pub penetration_testing: Vec<ScrapedRecord>,
    pub linux_commands: Vec<ScrapedRecord>,
    pub nmap_commands: Vec<ScrapedRecord>,
    pub cybersecurity_guides: Vec<ScrapedRecord>,
    pub bash_scripts: Vec<ScrapedRecord>,
}

impl ScrapedData {
    pub fn records(&self, category: Category) -> &[ScrapedRecord] {
        match category {
            Category::PenetrationTesting => &self.penetration_testing,
            Category::LinuxCommands => &self.linux_commands,
            Category::NmapCommands => &self.nmap_commands,
            Category::CybersecurityGuides => &self.cybersecurity_guides,
            Category::BashScripts => &self.bash_scripts,
        }
    }

    pub fn records_mut(&mut self, category: Category) -> &mut Vec<ScrapedRecord> {
        match category {
            Category::PenetrationTesting => &mut self.penetration_testing,
            Category::LinuxCommands => &mut self.linux_commands,
            Category::NmapCommands => &mut self.nmap_commands,
            Category::CybersecurityGuides => &mut self.cybersecurity_guides,
            Category::BashScripts => &mut self.bash_scripts,
        }
    }

    pub fn push(&mut self, category: Category, record: ScrapedRecord) {
        self.records_mut(category).push(record);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &[ScrapedRecord])> {
        Category::ALL.into_iter().map(|c| (c, self.records(c)))
    }

    pub fn total(&self) -> usize {
        self.iter().map(|(_, records)| records.len()).sum()
    }
}
