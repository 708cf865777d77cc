use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Input languages an SME may describe a task in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Shona,
    Ndebele,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Shona, Language::Ndebele];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Shona => "Shona",
            Language::Ndebele => "Ndebele",
        }
    }

    /// English is the model's working language; anything else needs translating.
    pub fn needs_translation(&self) -> bool {
        !matches!(self, Language::English)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language '{0}' (expected English, Shona or Ndebele)")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Language::ALL
            .into_iter()
            .find(|lang| lang.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownLanguage(wanted.to_string()))
    }
}
