//! Healthcare Q&A Scenario - brief or detailed prompt selection
//!
//! The detailed template is chosen when the lower-cased query contains any
//! configured cue substring. This is keyword presence, not intent detection:
//! "more" inside an unrelated sentence still selects the detailed template.

use serde::Serialize;

const BRIEF_PROMPT: &str = include_str!("brief_prompt.md");
const DETAILED_PROMPT: &str = include_str!("detailed_prompt.md");
const QUERY_PLACEHOLDER: &str = "{query}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStyle {
    Brief,
    Detailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub style: ResponseStyle,
    pub text: String,
}

pub struct PromptBuilder {
    cues: Vec<String>,
}

impl PromptBuilder {
    pub fn new<I, S>(cues: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cues = cues
            .into_iter()
            .map(|c| c.as_ref().trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect();
        Self { cues }
    }

    pub fn style_for(&self, query: &str) -> ResponseStyle {
        let lowered = query.to_lowercase();
        if self.cues.iter().any(|cue| lowered.contains(cue.as_str())) {
            ResponseStyle::Detailed
        } else {
            ResponseStyle::Brief
        }
    }

    pub fn build(&self, query: &str) -> Prompt {
        let style = self.style_for(query);
        let template = match style {
            ResponseStyle::Brief => BRIEF_PROMPT,
            ResponseStyle::Detailed => DETAILED_PROMPT,
        };
        Prompt { style, text: template.trim_end().replace(QUERY_PLACEHOLDER, query) }
    }
}
