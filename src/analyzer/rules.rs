//! Per-tag grading.
//!
//! Meta elements are classified by an ordered table of [`ClassRule`]s; the
//! first rule whose key matcher accepts the element decides both its bucket
//! and how it is graded. Social length checks live in their own table so
//! new heuristics only need a new row.

use crate::models::{Category, MetaTag, TagStatus, TagType};

use super::document::MetaElement;

const TITLE_MIN: usize = 10;
const TITLE_MAX: usize = 60;
const DESCRIPTION_MIN: usize = 50;
const DESCRIPTION_MAX: usize = 160;
const SOCIAL_TITLE_MIN: usize = 10;
const SOCIAL_TITLE_MAX: usize = 60;
const SOCIAL_DESCRIPTION_MIN: usize = 50;
const SOCIAL_DESCRIPTION_MAX: usize = 200;

const ESSENTIAL_KEYS: &[&str] = &["viewport", "robots", "charset", "language", "author"];

/// Length in UTF-16 code units, the unit browsers and search engines report.
fn text_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// `Good` only strictly inside `(min, max)`. The advice texts fire strictly
/// outside, so a length equal to either bound is a warning with no advice.
fn length_verdict(
    len: usize,
    min: usize,
    max: usize,
    too_short: &'static str,
    too_long: &'static str,
) -> (TagStatus, Option<&'static str>) {
    let status = if len > min && len < max {
        TagStatus::Good
    } else {
        TagStatus::Warning
    };
    let advice = if len < min {
        Some(too_short)
    } else if len > max {
        Some(too_long)
    } else {
        None
    };
    (status, advice)
}

// ============================================================================
// Title & canonical
// ============================================================================

pub fn grade_title(title: Option<&str>) -> MetaTag {
    let Some(title) = title else {
        return MetaTag::new("title", "", TagStatus::Error)
            .with_type(TagType::Title)
            .with_recommendation(Some(
                "Missing title tag. Add a descriptive title between 50-60 characters.",
            ));
    };

    let (status, advice) = length_verdict(
        text_len(title),
        TITLE_MIN,
        TITLE_MAX,
        "Title is too short. Aim for 50-60 characters.",
        "Title is too long. Keep it under 60 characters for optimal display in search results.",
    );

    MetaTag::new("title", title, status)
        .with_type(TagType::Title)
        .with_recommendation(advice)
}

pub fn grade_canonical(href: Option<&str>) -> MetaTag {
    match href {
        Some(href) => MetaTag::new("canonical", href, TagStatus::Good).with_type(TagType::Link),
        None => MetaTag::new("canonical", "", TagStatus::Warning)
            .with_type(TagType::Link)
            .with_recommendation(Some(
                "Add a canonical URL to prevent duplicate content issues.",
            )),
    }
}

// ============================================================================
// Meta element classification
// ============================================================================

enum KeyMatch {
    Prefix(&'static str),
    Exact(&'static str),
    OneOf(&'static [&'static str]),
    Any,
}

impl KeyMatch {
    fn matches(&self, key: &str) -> bool {
        match self {
            KeyMatch::Prefix(prefix) => key.starts_with(prefix),
            KeyMatch::Exact(exact) => key == *exact,
            KeyMatch::OneOf(keys) => keys.contains(&key),
            KeyMatch::Any => true,
        }
    }
}

struct ClassRule {
    matcher: KeyMatch,
    category: Category,
    grade: fn(&MetaElement) -> MetaTag,
}

static CLASS_RULES: &[ClassRule] = &[
    ClassRule {
        matcher: KeyMatch::Prefix("og:"),
        category: Category::Opengraph,
        grade: grade_social,
    },
    ClassRule {
        matcher: KeyMatch::Prefix("twitter:"),
        category: Category::Twitter,
        grade: grade_social,
    },
    ClassRule {
        matcher: KeyMatch::Exact("description"),
        category: Category::General,
        grade: grade_description,
    },
    ClassRule {
        matcher: KeyMatch::OneOf(ESSENTIAL_KEYS),
        category: Category::General,
        grade: grade_essential,
    },
    ClassRule {
        matcher: KeyMatch::Any,
        category: Category::Other,
        grade: grade_informational,
    },
];

/// Bucket and grade one meta element. Every key lands in exactly one bucket
/// because the last rule matches anything.
pub fn classify_meta(meta: &MetaElement) -> (Category, MetaTag) {
    let rule = CLASS_RULES
        .iter()
        .find(|rule| rule.matcher.matches(&meta.key))
        .unwrap_or(&CLASS_RULES[CLASS_RULES.len() - 1]);
    (rule.category, (rule.grade)(meta))
}

struct SocialRule {
    key: &'static str,
    fires: fn(&str) -> bool,
    advice: &'static str,
}

fn social_title_out_of_range(content: &str) -> bool {
    let len = text_len(content);
    len < SOCIAL_TITLE_MIN || len > SOCIAL_TITLE_MAX
}

fn social_description_out_of_range(content: &str) -> bool {
    let len = text_len(content);
    len < SOCIAL_DESCRIPTION_MIN || len > SOCIAL_DESCRIPTION_MAX
}

// Empty content is graded `Error` before this table is consulted, so the
// image rows never fire. They are kept so the advice text exists if that
// ordering changes.
static SOCIAL_RULES: &[SocialRule] = &[
    SocialRule {
        key: "og:title",
        fires: social_title_out_of_range,
        advice: "Your Open Graph title should be between 10-60 characters for optimal display.",
    },
    SocialRule {
        key: "og:description",
        fires: social_description_out_of_range,
        advice: "Your Open Graph description should be between 50-200 characters for optimal display.",
    },
    SocialRule {
        key: "og:image",
        fires: str::is_empty,
        advice: "Add an Open Graph image for better social media sharing.",
    },
    SocialRule {
        key: "twitter:title",
        fires: social_title_out_of_range,
        advice: "Your Twitter title should be between 10-60 characters for optimal display.",
    },
    SocialRule {
        key: "twitter:description",
        fires: social_description_out_of_range,
        advice: "Your Twitter description should be between 50-200 characters for optimal display.",
    },
    SocialRule {
        key: "twitter:image",
        fires: str::is_empty,
        advice: "Add a Twitter image for better display when shared on Twitter.",
    },
];

fn social_advice(key: &str, content: &str) -> Option<&'static str> {
    SOCIAL_RULES
        .iter()
        .find(|rule| rule.key == key)
        .filter(|rule| (rule.fires)(content))
        .map(|rule| rule.advice)
}

fn grade_social(meta: &MetaElement) -> MetaTag {
    if meta.content.is_empty() {
        return MetaTag::new(&meta.key, "", TagStatus::Error);
    }

    let advice = social_advice(&meta.key, &meta.content);
    let status = if advice.is_some() {
        TagStatus::Warning
    } else {
        TagStatus::Good
    };
    MetaTag::new(&meta.key, &meta.content, status).with_recommendation(advice)
}

fn grade_description(meta: &MetaElement) -> MetaTag {
    let (status, advice) = length_verdict(
        text_len(&meta.content),
        DESCRIPTION_MIN,
        DESCRIPTION_MAX,
        "Description is too short. Aim for 50-160 characters.",
        "Description is too long. Keep it under 160 characters for optimal display in search results.",
    );
    MetaTag::new(&meta.key, &meta.content, status)
        .with_type(TagType::Meta)
        .with_recommendation(advice)
}

fn grade_essential(meta: &MetaElement) -> MetaTag {
    let status = if meta.content.is_empty() {
        TagStatus::Error
    } else {
        TagStatus::Good
    };
    MetaTag::new(&meta.key, &meta.content, status).with_type(TagType::Meta)
}

fn grade_informational(meta: &MetaElement) -> MetaTag {
    MetaTag::new(&meta.key, &meta.content, TagStatus::Good).with_type(TagType::Meta)
}
