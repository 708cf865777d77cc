use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = GigValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| GigValidationError::UnknownDifficulty(wanted.to_string()))
    }
}

/// Lifecycle of a gig on the marketplace
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GigStatus {
    #[default]
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

/// A validated gig suggestion produced by task shaping.
///
/// `id` is minted locally; upstream identifiers are never trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GigProposal {
    pub id: Uuid,
    pub status: GigStatus,
    pub title: String,
    pub description: String,
    pub budget: f64,
    pub skills: Vec<String>,
    pub duration: String,
    pub difficulty: Difficulty,
}

impl GigProposal {
    /// Promote an approved proposal to a marketplace gig owned by `posted_by`.
    pub fn post(self, posted_by: &str) -> Gig {
        Gig {
            id: self.id,
            title: self.title,
            description: self.description,
            budget: self.budget,
            skills: self.skills,
            duration: self.duration,
            difficulty: self.difficulty,
            status: GigStatus::Open,
            posted_by: posted_by.to_string(),
            applicants: 0,
            posted_at: Utc::now(),
        }
    }
}

/// A first-class marketplace gig, owned by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gig {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub budget: f64,
    pub skills: Vec<String>,
    pub duration: String,
    pub difficulty: Difficulty,
    pub status: GigStatus,
    pub posted_by: String,
    pub applicants: u32,
    pub posted_at: DateTime<Utc>,
}

impl Gig {
    /// A learner may take the gig only when they hold every required skill.
    pub fn is_unlocked_for<S: AsRef<str>>(&self, learner_skills: &[S]) -> bool {
        self.missing_skills(learner_skills).is_empty()
    }

    /// Required skills the learner does not hold yet, in the gig's order.
    pub fn missing_skills<S: AsRef<str>>(&self, learner_skills: &[S]) -> Vec<&str> {
        self.skills
            .iter()
            .filter(|required| !learner_skills.iter().any(|held| held.as_ref() == required.as_str()))
            .map(String::as_str)
            .collect()
    }
}

/// Why a decoded item was dropped from a shaping batch
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GigValidationError {
    #[error("item does not match the gig shape: {0}")]
    Malformed(String),

    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("field '{0}' is empty")]
    EmptyField(&'static str),

    #[error("budget must be a positive amount, got {0}")]
    NonPositiveBudget(f64),

    #[error("at least one skill tag is required")]
    NoSkills,

    #[error("unknown difficulty '{0}'")]
    UnknownDifficulty(String),
}

/// Gig as decoded from model output, before any checks
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawGig {
    pub title: Option<String>,
    pub description: Option<String>,
    pub budget: Option<f64>,
    pub skills: Option<Vec<String>>,
    pub duration: Option<String>,
    pub difficulty: Option<String>,
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, GigValidationError> {
    let value = value.ok_or(GigValidationError::MissingField(field))?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GigValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

impl RawGig {
    /// Decode one array element's JSON text.
    pub fn parse(json: &str) -> Result<Self, GigValidationError> {
        serde_json::from_str(json).map_err(|e| GigValidationError::Malformed(e.to_string()))
    }

    /// Check every invariant and mint a fresh identity for the gig.
    pub fn validate(self) -> Result<GigProposal, GigValidationError> {
        let title = required_text(self.title, "title")?;
        let description = required_text(self.description, "description")?;

        let budget = self.budget.ok_or(GigValidationError::MissingField("budget"))?;
        if !budget.is_finite() || budget <= 0.0 {
            return Err(GigValidationError::NonPositiveBudget(budget));
        }

        let skills: Vec<String> = self
            .skills
            .ok_or(GigValidationError::MissingField("skills"))?
            .into_iter()
            .map(|skill| skill.trim().to_string())
            .filter(|skill| !skill.is_empty())
            .collect();
        if skills.is_empty() {
            return Err(GigValidationError::NoSkills);
        }

        let duration = self
            .duration
            .ok_or(GigValidationError::MissingField("duration"))?
            .trim()
            .to_string();

        let difficulty = self
            .difficulty
            .ok_or(GigValidationError::MissingField("difficulty"))?
            .parse::<Difficulty>()?;

        Ok(GigProposal {
            id: Uuid::new_v4(),
            status: GigStatus::Open,
            title,
            description,
            budget,
            skills,
            duration,
            difficulty,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawGig {
        RawGig::parse(&value.to_string()).unwrap()
    }

    fn valid() -> serde_json::Value {
        json!({
            "title": "Excel Clean-up",
            "description": "Format a customer list of 50 rows.",
            "budget": 10,
            "skills": ["Excel", " Data Entry "],
            "duration": "2h",
            "difficulty": "Intermediate"
        })
    }

    #[test]
    fn test_valid_item_gets_fresh_id_and_open_status() {
        let a = raw(valid()).validate().unwrap();
        let b = raw(valid()).validate().unwrap();

        assert_ne!(a.id, b.id);

        let upstream_id = "3f1c9a52-0000-4000-8000-000000000001";
        let mut with_id = valid();
        with_id["id"] = json!(upstream_id);
        with_id["status"] = json!("In Progress");
        let c = raw(with_id).validate().unwrap();
        assert_ne!(c.id.to_string(), upstream_id);
        assert_eq!(c.id.get_version_num(), 4);
        assert_eq!(c.status, GigStatus::Open);

        assert_eq!(a.status, GigStatus::Open);
        assert_eq!(a.budget, 10.0);
        assert_eq!(a.skills, vec!["Excel", "Data Entry"]);
        assert_eq!(a.difficulty, Difficulty::Intermediate);
    }

    #[test]
    fn test_invariant_violations_are_reported() {
        let mut negative = valid();
        negative["budget"] = json!(-5);
        assert_eq!(
            raw(negative).validate(),
            Err(GigValidationError::NonPositiveBudget(-5.0))
        );

        let mut blank_title = valid();
        blank_title["title"] = json!("   ");
        assert_eq!(raw(blank_title).validate(), Err(GigValidationError::EmptyField("title")));

        let mut no_skills = valid();
        no_skills["skills"] = json!(["", "  "]);
        assert_eq!(raw(no_skills).validate(), Err(GigValidationError::NoSkills));

        let mut bad_level = valid();
        bad_level["difficulty"] = json!("Expert");
        assert_eq!(
            raw(bad_level).validate(),
            Err(GigValidationError::UnknownDifficulty("Expert".to_string()))
        );

        let mut no_description = valid();
        no_description.as_object_mut().unwrap().remove("description");
        assert_eq!(
            raw(no_description).validate(),
            Err(GigValidationError::MissingField("description"))
        );
    }

    #[test]
    fn test_wrongly_typed_item_is_malformed() {
        let mut stringly = valid();
        stringly["budget"] = json!("ten dollars");
        assert!(matches!(
            RawGig::parse(&stringly.to_string()),
            Err(GigValidationError::Malformed(_))
        ));
    }

    #[test]
    fn test_posting_and_skill_gating() {
        let gig = raw(valid()).validate().unwrap().post("Harare Fresh Veggies");
        assert_eq!(gig.posted_by, "Harare Fresh Veggies");
        assert_eq!(gig.applicants, 0);
        assert_eq!(gig.status, GigStatus::Open);

        assert!(gig.is_unlocked_for(&["Data Entry", "Excel", "Shona"]));
        assert!(!gig.is_unlocked_for(&["Excel"]));
        assert_eq!(gig.missing_skills(&["Excel"]), vec!["Data Entry"]);
    }

    #[test]
    fn test_proposal_and_gig_share_camel_case_keys() {
        let proposal = raw(valid()).validate().unwrap();
        let proposal_json = serde_json::to_value(&proposal).unwrap();
        let gig_json = serde_json::to_value(proposal.post("Bulawayo Prints")).unwrap();

        assert_eq!(gig_json["postedBy"], json!("Bulawayo Prints"));
        assert!(gig_json.get("postedAt").is_some());
        assert!(gig_json.get("posted_by").is_none());
        for key in ["id", "status", "title", "budget", "skills", "difficulty"] {
            assert_eq!(proposal_json[key], gig_json[key], "key {key}");
        }
    }

    #[test]
    fn test_status_serializes_like_the_marketplace() {
        assert_eq!(serde_json::to_value(GigStatus::InProgress).unwrap(), json!("In Progress"));
        assert_eq!(serde_json::to_value(GigStatus::Open).unwrap(), json!("Open"));
    }
}
