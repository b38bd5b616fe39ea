use std::collections::HashMap;

use serde::{de::Error as _, ser::SerializeMap, Deserialize, Deserializer, Serialize, Serializer};

/// The semantic role a marker pair denotes inside a training string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Command,
    Script,
    Nmap,
    Guide,
    Question,
    Answer,
}

impl Role {
    pub const ALL: [Role; 6] =
        [Role::Command, Role::Script, Role::Nmap, Role::Guide, Role::Question, Role::Answer];

    pub fn name(self) -> &'static str {
        match self {
            Role::Command => "command",
            Role::Script => "script",
            Role::Nmap => "nmap",
            Role::Guide => "guide",
            Role::Question => "question",
            Role::Answer => "answer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPair {
    pub open: String,
    pub close: String,
}

impl MarkerPair {
    /// `<TAG>` / `</TAG>`
    pub fn tag(tag: &str) -> Self {
        Self { open: format!("<{tag}>"), close: format!("</{tag}>") }
    }
}

/// Open/close markers for every [`Role`].
///
/// Built once at startup and passed by reference; serialises as the flat
/// `command_start`, `command_end`, ... table the training side expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimiterVocabulary {
    command: MarkerPair,
    script: MarkerPair,
    nmap: MarkerPair,
    guide: MarkerPair,
    question: MarkerPair,
    answer: MarkerPair,
}

impl Default for DelimiterVocabulary {
    fn default() -> Self {
        Self {
            command: MarkerPair::tag("CMD"),
            script: MarkerPair::tag("SCRIPT"),
            nmap: MarkerPair::tag("NMAP"),
            guide: MarkerPair::tag("GUIDE"),
            question: MarkerPair::tag("Q"),
            answer: MarkerPair::tag("A"),
        }
    }
}

impl DelimiterVocabulary {
    pub fn pair(&self, role: Role) -> &MarkerPair {
        match role {
            Role::Command => &self.command,
            Role::Script => &self.script,
            Role::Nmap => &self.nmap,
            Role::Guide => &self.guide,
            Role::Question => &self.question,
            Role::Answer => &self.answer,
        }
    }

    pub fn wrap(&self, role: Role, text: &str) -> String {
        let pair = self.pair(role);
        format!("{}{text}{}", pair.open, pair.close)
    }

    /// `(name, marker)` entries in serialisation order.
    pub fn table(&self) -> Vec<(String, &str)> {
        Role::ALL
            .into_iter()
            .flat_map(|role| {
                let pair = self.pair(role);
                [
                    (format!("{}_start", role.name()), pair.open.as_str()),
                    (format!("{}_end", role.name()), pair.close.as_str()),
                ]
            })
            .collect()
    }
}

impl Serialize for DelimiterVocabulary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let table = self.table();
        let mut map = serializer.serialize_map(Some(table.len()))?;
        for (name, marker) in table {
            map.serialize_entry(&name, marker)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DelimiterVocabulary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut table = HashMap::<String, String>::deserialize(deserializer)?;
        let mut take = |role: Role| -> Result<MarkerPair, D::Error> {
            let mut get = |suffix: &str| {
                let key = format!("{}_{suffix}", role.name());
                table.remove(&key).ok_or_else(|| D::Error::custom(format!("missing marker {key}")))
            };
            Ok(MarkerPair { open: get("start")?, close: get("end")? })
        };
        Ok(Self {
            command: take(Role::Command)?,
            script: take(Role::Script)?,
            nmap: take(Role::Nmap)?,
            guide: take(Role::Guide)?,
            question: take(Role::Question)?,
            answer: take(Role::Answer)?,
        })
    }
}

/// One question/answer pair.
///
/// `response` may already contain nested marker pairs; rendering only adds the
/// question and answer markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingExample {
    pub prompt: String,
    pub response: String,
}

impl TrainingExample {
    pub fn new(prompt: impl Into<String>, response: impl Into<String>) -> Self {
        Self { prompt: prompt.into(), response: response.into() }
    }

    pub fn render(&self, vocab: &DelimiterVocabulary) -> String {
        format!(
            "{}\n{}",
            vocab.wrap(Role::Question, &self.prompt),
            vocab.wrap(Role::Answer, &self.response)
        )
    }
}
