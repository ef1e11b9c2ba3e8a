//! View-models over server JSON: submissions, authors, verifiers, categories.
//!
//! The client holds no authoritative state; these types mirror the REST
//! payloads loosely (unknown fields ignored, ids accepted as strings or numbers).

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use serde::{Deserialize, Deserializer, Serialize};

/// Anything a list can render and select by id.
pub trait Entity {
    fn id(&self) -> &str;
}

/// Review lifecycle of a submission.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    Draft,
    Pending,
    UnderReview,
    Accepted,
    Rejected,
    /// Unrecognized or missing on the wire. Never passes a status precondition.
    #[default]
    #[serde(other)]
    Unknown,
}

impl ReviewStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Pending => "PENDING",
            Self::UnderReview => "UNDER_REVIEW",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
            Self::Unknown => "UNKNOWN",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Pending => "Pending",
            Self::UnderReview => "Under review",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
            Self::Unknown => "Unknown",
        }
    }
}

/// One of the five fixed abstract content sections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Introduction,
    AimsObjectives,
    MaterialsMethods,
    Results,
    Conclusion,
}

impl SectionKind {
    pub const ALL: [SectionKind; 5] = [
        SectionKind::Introduction,
        SectionKind::AimsObjectives,
        SectionKind::MaterialsMethods,
        SectionKind::Results,
        SectionKind::Conclusion,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Introduction => "Introduction",
            Self::AimsObjectives => "Aims & Objectives",
            Self::MaterialsMethods => "Materials & Methods",
            Self::Results => "Results",
            Self::Conclusion => "Conclusion",
        }
    }
}

/// Markdown bodies of the five content sections.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSections {
    pub introduction: String,
    pub aims_objectives: String,
    pub materials_methods: String,
    pub results: String,
    pub conclusion: String,
}

impl ContentSections {
    pub fn get(&self, kind: SectionKind) -> &str {
        match kind {
            SectionKind::Introduction => &self.introduction,
            SectionKind::AimsObjectives => &self.aims_objectives,
            SectionKind::MaterialsMethods => &self.materials_methods,
            SectionKind::Results => &self.results,
            SectionKind::Conclusion => &self.conclusion,
        }
    }

    pub fn set(&mut self, kind: SectionKind, text: impl Into<String>) {
        let text = text.into();
        match kind {
            SectionKind::Introduction => self.introduction = text,
            SectionKind::AimsObjectives => self.aims_objectives = text,
            SectionKind::MaterialsMethods => self.materials_methods = text,
            SectionKind::Results => self.results = text,
            SectionKind::Conclusion => self.conclusion = text,
        }
    }

    /// Sections in display order, paired with their kind.
    pub fn iter(&self) -> impl Iterator<Item = (SectionKind, &str)> {
        SectionKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}

/// Author row of a submission.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub affiliation: Option<String>,
    #[serde(default)]
    pub is_presenter: bool,
    #[serde(default)]
    pub is_corresponding: bool,
}

impl Author {
    pub fn named(name: &str) -> Self {
        Self { name: name.to_owned(), ..Self::default() }
    }
}

/// Submission category (track) offered in the wizard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
}

/// Reviewer reference embedded in a submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierRef {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, alias = "username")]
    pub name: String,
}

/// An abstract or best-paper submission as listed by the API.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_category_name")]
    pub category: Option<String>,
    #[serde(default)]
    pub status: ReviewStatus,
    #[serde(default, alias = "submitter_name")]
    pub submitter: Option<String>,
    #[serde(default, alias = "created_at")]
    pub submitted_at: Option<String>,
    #[serde(default)]
    pub review_phase: Option<u32>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub sections: Option<ContentSections>,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub pdf_path: Option<String>,
    #[serde(default)]
    pub verifiers: Vec<VerifierRef>,
}

impl Entity for Submission {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Reviewer account that can be linked to submissions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verifier {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, alias = "username")]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub assigned_count: u32,
}

impl Entity for Verifier {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Accept ids as JSON strings or integers.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Int(value) => value.to_string(),
    })
}

/// Category arrives either as a plain name or as `{ id, name }`.
fn deserialize_category_name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCategory {
        Name(String),
        Object { name: String },
    }

    Ok(Option::<RawCategory>::deserialize(deserializer)?.map(|raw| match raw {
        RawCategory::Name(name) | RawCategory::Object { name } => name,
    }))
}
