use super::gig::Difficulty;
use super::language::Language;
use crate::providers::Schema;

pub const MIN_BUDGET_USD: u32 = 5;
pub const MAX_BUDGET_USD: u32 = 50;

/// Directive sent to the model for one shaping request
pub fn build_directive(description: &str, language: Language) -> String {
    let translation = if language.needs_translation() {
        format!(
            "The owner wrote in {}. Translate the description into English before structuring it.",
            language
        )
    } else {
        "The owner wrote in English.".to_string()
    };

    format!(
        "You are an expert gig-structuring assistant for Tangira, a marketplace in Zimbabwe \
connecting small businesses with junior digital talent.
A local SME owner has described a task. The input may be English, Shona or Ndebele.
Current input language: {language}. {translation}

Break the task down into 1 to 3 specific, independent, actionable micro-gigs suitable \
for entry-level digital workers.

The description is: \"{description}\"

Return a JSON array of gig objects. Each object must have:
- title: short and professional, in English
- description: clear instructions in English; say so explicitly if knowledge of a local language is required
- budget: a number in USD between {min} and {max}
- skills: a non-empty array of skill tags, e.g. \"Data Entry\", \"Canva\", \"Excel\", \"Shona Translation\"
- duration: estimated time to complete, e.g. \"2h\" or \"1 week\"
- difficulty: one of {levels}",
        language = language,
        translation = translation,
        description = description.trim(),
        min = MIN_BUDGET_USD,
        max = MAX_BUDGET_USD,
        levels = Difficulty::ALL.map(|d| d.as_str()).join(", "),
    )
}

/// Response shape for a batch of gig proposals
pub fn proposal_schema() -> Schema {
    let difficulties = Difficulty::ALL.map(|d| d.as_str());

    Schema::array(Schema::object(vec![
        ("title", Schema::string()),
        ("description", Schema::string()),
        ("budget", Schema::number()),
        ("skills", Schema::array(Schema::string())),
        ("duration", Schema::string()),
        ("difficulty", Schema::string_enum(&difficulties)),
    ]))
}
