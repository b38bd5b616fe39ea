//! Question templates for scraped records, and the hand-written bootstrap examples.

use crate::category::{Category, ScrapedData, ScrapedRecord};

use super::vocab::{DelimiterVocabulary, Role, TrainingExample};

/// A question asked about a record; `nest` wraps the record content in that role's markers.
struct Template {
    question: &'static str,
    nest: Option<Role>,
}

const fn nested(question: &'static str, role: Role) -> Template {
    Template { question, nest: Some(role) }
}

const fn plain(question: &'static str) -> Template {
    Template { question, nest: None }
}

const PENETRATION_TESTING: &[Template] = &[
    nested("How do I perform this penetration testing technique?", Role::Command),
    plain("What's a good penetration testing command for this scenario?"),
    plain("Show me a penetration testing example"),
];

const LINUX_COMMANDS: &[Template] = &[
    nested("What's the Linux command for this?", Role::Command),
    plain("How do I do this in Linux?"),
    plain("Give me a Linux command"),
];

const NMAP_COMMANDS: &[Template] = &[
    nested("What's a good nmap command for scanning?", Role::Nmap),
    plain("How do I scan with nmap?"),
    plain("Show me an nmap example"),
];

const CYBERSECURITY_GUIDES: &[Template] = &[
    nested("Explain this cybersecurity practice", Role::Guide),
    plain("Give me a cybersecurity tip"),
];

const BASH_SCRIPTS: &[Template] = &[
    nested("Write a bash script for cybersecurity", Role::Script),
    plain("Show me a security script"),
];

fn templates(category: Category) -> &'static [Template] {
    match category {
        Category::PenetrationTesting => PENETRATION_TESTING,
        Category::LinuxCommands => LINUX_COMMANDS,
        Category::NmapCommands => NMAP_COMMANDS,
        Category::CybersecurityGuides => CYBERSECURITY_GUIDES,
        Category::BashScripts => BASH_SCRIPTS,
    }
}

/// Whether a record of `category` is long enough (strictly) to be templated.
pub fn qualifies(category: Category, content: &str) -> bool {
    if content.chars().count() <= category.min_content_len() {
        return false;
    }
    category != Category::NmapCommands || content.to_lowercase().contains("nmap")
}

pub fn templated_examples(
    category: Category,
    record: &ScrapedRecord,
    vocab: &DelimiterVocabulary,
) -> Vec<TrainingExample> {
    if !qualifies(category, &record.content) {
        return vec![];
    }
    templates(category)
        .iter()
        .map(|t| {
            let response = match t.nest {
                Some(role) => vocab.wrap(role, &record.content),
                None => record.content.clone(),
            };
            TrainingExample::new(t.question, response)
        })
        .collect()
}

/// Every qualifying record of every category, in category then record order.
pub fn scraped_examples(data: &ScrapedData, vocab: &DelimiterVocabulary) -> Vec<TrainingExample> {
    data.iter()
        .flat_map(|(category, records)| {
            records.iter().flat_map(move |r| templated_examples(category, r, vocab))
        })
        .collect()
}

/// Fixed examples that give the model some coverage even when scraping found little.
pub fn handwritten_examples(vocab: &DelimiterVocabulary) -> Vec<TrainingExample> {
    let cmd = |c: &str| vocab.wrap(Role::Command, c);
    vec![
        TrainingExample::new(
            "How do I start a penetration test?",
            format!(
                "Start with reconnaissance using nmap: {} (authorized lab only)",
                cmd("nmap -sS -O <target_ip>")
            ),
        ),
        TrainingExample::new(
            "What are the phases of penetration testing?",
            concat!(
                "1. Reconnaissance 2. Scanning 3. Enumeration 4. Vulnerability Assessment ",
                "5. Exploitation 6. Post-exploitation 7. Reporting (only on authorized systems)"
            ),
        ),
        TrainingExample::new(
            "How do I check for open ports?",
            format!("{} or {} (lab use only)", cmd("nmap -p- <target_ip>"), cmd("netstat -tulpn")),
        ),
        TrainingExample::new(
            "How do I find hidden directories on a web server?",
            format!(
                "Use tools like: {} or {} (authorized testing only)",
                cmd("dirb http://<target>"),
                cmd("gobuster dir -u http://<target> -w /usr/share/wordlists/dirb/common.txt")
            ),
        ),
        TrainingExample::new(
            "How do I escalate privileges in Linux?",
            format!(
                "Check for: 1. SUID binaries: {} 2. Sudo privileges: {} 3. Cron jobs: {} (defensive analysis only)",
                cmd("find / -perm -u=s -type f 2>/dev/null"),
                cmd("sudo -l"),
                cmd("cat /etc/crontab")
            ),
        ),
    ]
}
