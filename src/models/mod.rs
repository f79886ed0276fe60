use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};

mod preview;

pub use preview::Preview;

// ============================================================================
// Tag Models
// ============================================================================

/// Quality verdict for a single tag. The set is closed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TagStatus {
    Good,
    Warning,
    Error,
}

/// Where a tag was found in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TagType {
    Title,
    Link,
    Meta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaTag {
    pub name: String,
    pub content: String,
    pub status: TagStatus,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub tag_type: Option<TagType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

impl MetaTag {
    pub fn new(name: impl Into<String>, content: impl Into<String>, status: TagStatus) -> Self {
        MetaTag {
            name: name.into(),
            content: content.into(),
            status,
            tag_type: None,
            recommendation: None,
        }
    }

    pub fn with_type(mut self, tag_type: TagType) -> Self {
        self.tag_type = Some(tag_type);
        self
    }

    pub fn with_recommendation(mut self, recommendation: Option<&str>) -> Self {
        self.recommendation = recommendation.map(str::to_owned);
        self
    }
}

// ============================================================================
// Buckets
// ============================================================================

/// The five tag categories, in the order they are reported.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    General,
    Opengraph,
    Twitter,
    Structured,
    Other,
}

/// Tags partitioned by [`Category`]. Each list keeps document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaTagBuckets {
    pub general: Vec<MetaTag>,
    pub opengraph: Vec<MetaTag>,
    pub twitter: Vec<MetaTag>,
    pub structured: Vec<MetaTag>,
    pub other: Vec<MetaTag>,
}

impl MetaTagBuckets {
    pub fn bucket(&self, category: Category) -> &[MetaTag] {
        match category {
            Category::General => &self.general,
            Category::Opengraph => &self.opengraph,
            Category::Twitter => &self.twitter,
            Category::Structured => &self.structured,
            Category::Other => &self.other,
        }
    }

    pub fn push(&mut self, category: Category, tag: MetaTag) {
        let bucket = match category {
            Category::General => &mut self.general,
            Category::Opengraph => &mut self.opengraph,
            Category::Twitter => &mut self.twitter,
            Category::Structured => &mut self.structured,
            Category::Other => &mut self.other,
        };
        bucket.push(tag);
    }

    /// Every tag with its category, bucket by bucket.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &MetaTag)> + '_ {
        use strum::IntoEnumIterator;

        Category::iter().flat_map(move |c| self.bucket(c).iter().map(move |tag| (c, tag)))
    }

    pub fn len(&self) -> usize {
        self.general.len()
            + self.opengraph.len()
            + self.twitter.len()
            + self.structured.len()
            + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First tag named `name` in the given bucket.
    pub fn find(&self, category: Category, name: &str) -> Option<&MetaTag> {
        self.bucket(category).iter().find(|tag| tag.name == name)
    }

    pub fn contains(&self, category: Category, name: &str) -> bool {
        self.find(category, name).is_some()
    }
}

// ============================================================================
// Recommendation Models
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

// ============================================================================
// Analysis Result
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagStats {
    pub implemented: usize,
    pub warnings: usize,
    pub critical: usize,
}

impl TagStats {
    pub fn record(&mut self, status: TagStatus) {
        match status {
            TagStatus::Good => self.implemented += 1,
            TagStatus::Warning => self.warnings += 1,
            TagStatus::Error => self.critical += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.implemented + self.warnings + self.critical
    }
}

/// Human label for an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum ScoreRating {
    Excellent,
    #[serde(rename = "Very Good")]
    #[strum(serialize = "Very Good")]
    VeryGood,
    Good,
    Fair,
    #[serde(rename = "Needs Work")]
    #[strum(serialize = "Needs Work")]
    NeedsWork,
    Poor,
}

/// Full output of one page analysis, as returned by `GET /api/analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub url: String,
    pub meta_tags_count: usize,
    pub stats: TagStats,
    pub meta_tags: MetaTagBuckets,
    pub preview: Preview,
    pub recommendations: Vec<Recommendation>,
    pub score: u8,
    pub rating: ScoreRating,
}
