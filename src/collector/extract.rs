//! Text-span extraction heuristics, one per collector sub-task.
//!
//! All functions take the raw page body and return cleaned contents in page order.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Anything outside word characters, whitespace and common shell punctuation.
static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\w\s\-./$|<>\[\](){}=+*&%#@!?:;,]").expect("disallowed-char regex")
});

static COMMAND_LINES: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        // plain `cmd args`
        Regex::new(r"^\s*[\w-]+\s+[-\w\s.${}/]+").expect("command regex"),
        Regex::new(r"^\s*sudo\s+[\w\-\s]+").expect("sudo regex"),
        // `$ cmd args`
        Regex::new(r"^\s*\$\s+[-\w\s.${}/]+").expect("prompt regex"),
    ]
});

static CODE_BLOCKS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("code, pre, div").expect("code block selector"));
static SCRIPT_BLOCKS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("pre, code").expect("script block selector"));
static PARAGRAPHS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("paragraph selector"));

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>()
}

/// Collapse whitespace runs and drop characters outside the allow-list.
pub fn clean_text(text: &str) -> String {
    let text = WHITESPACE.replace_all(text, " ");
    let text = DISALLOWED.replace_all(&text, "");
    text.trim().to_string()
}

/// All text nodes of the page, concatenated.
pub fn page_text(html: &str) -> String {
    Html::parse_document(html).root_element().text().collect()
}

/// `code`/`pre`/`div` elements whose class mentions `code` or `command`.
pub fn code_blocks(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    doc.select(&CODE_BLOCKS)
        .filter(|el| {
            el.value().attr("class").is_some_and(|class| {
                let class = class.to_lowercase();
                class.contains("code") || class.contains("command")
            })
        })
        .map(|el| clean_text(&element_text(el)))
        .filter(|text| char_len(text) > 10)
        .collect()
}

/// Page lines that look like shell commands, between 5 and 199 characters.
pub fn command_lines(html: &str) -> Vec<String> {
    page_text(html)
        .lines()
        .map(str::trim)
        .filter(|line| (5..200).contains(&char_len(line)))
        .filter(|line| COMMAND_LINES.iter().any(|re| re.is_match(line)))
        .map(clean_text)
        .collect()
}

/// Page lines mentioning `keyword` (case-insensitively) and longer than 10 characters.
pub fn keyword_lines(html: &str, keyword: &str) -> Vec<String> {
    let keyword = keyword.to_lowercase();
    page_text(html)
        .lines()
        .map(str::trim)
        .filter(|line| char_len(line) > 10 && line.to_lowercase().contains(&keyword))
        .map(clean_text)
        .collect()
}

/// `pre`/`code` blocks that carry a shebang or mention bash, longer than 50 characters.
pub fn script_blocks(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    doc.select(&SCRIPT_BLOCKS)
        .map(element_text)
        .map(|text| text.trim().to_string())
        .filter(|text| {
            (text.contains("#!/") || text.to_lowercase().contains("bash")) && char_len(text) > 50
        })
        .map(|text| clean_text(&text))
        .collect()
}

/// Prose paragraphs longer than 20 characters, for guide pages.
pub fn paragraphs(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    doc.select(&PARAGRAPHS)
        .map(|el| clean_text(&element_text(el)))
        .filter(|text| char_len(text) > 20)
        .collect()
}
