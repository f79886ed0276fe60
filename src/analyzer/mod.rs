//! The meta tag analysis engine.
//!
//! [`analyze`] is a pure function of `(html, url)`: it parses the document,
//! buckets and grades every tag, derives the preview card and appends the
//! missing-tag recommendations. Identical inputs give identical results.

pub mod document;
pub mod recommendations;
pub mod rules;
pub mod score;
pub mod structured;

use url::Url;

use crate::models::{
    AnalysisResult, Category, MetaTagBuckets, Preview, ScoreRating, TagStats,
};

use document::PageSignals;

pub use score::calculate_score;

/// Analyze `html` fetched from `url`.
pub fn analyze(html: &str, url: &str) -> AnalysisResult {
    let signals = PageSignals::extract(html);
    let meta_tags = classify(&signals);

    let mut stats = TagStats::default();
    for (_, tag) in meta_tags.iter() {
        stats.record(tag.status);
    }

    let score = calculate_score(&stats);
    let preview = build_preview(&meta_tags, url);
    let recommendations = recommendations::missing_tag_recommendations(&meta_tags);

    tracing::debug!(
        url,
        tags = meta_tags.len(),
        implemented = stats.implemented,
        warnings = stats.warnings,
        critical = stats.critical,
        "Analyzed document"
    );

    AnalysisResult {
        url: url.to_string(),
        meta_tags_count: meta_tags.len(),
        stats,
        meta_tags,
        preview,
        recommendations,
        score,
        rating: ScoreRating::from_score(score),
    }
}

/// Place every signal in its bucket, in document order within each bucket.
fn classify(signals: &PageSignals) -> MetaTagBuckets {
    let mut buckets = MetaTagBuckets::default();

    buckets.push(
        Category::General,
        rules::grade_title(signals.title.as_deref()),
    );
    buckets.push(
        Category::General,
        rules::grade_canonical(signals.canonical.as_deref()),
    );

    for meta in &signals.metas {
        let (category, tag) = rules::classify_meta(meta);
        buckets.push(category, tag);
    }

    for block in &signals.json_ld {
        buckets.push(Category::Structured, structured::grade_json_ld(block));
    }

    buckets
}

/// Content of the first tag in the chain that exists and is non-empty.
fn first_content<'a>(buckets: &'a MetaTagBuckets, chain: &[(Category, &str)]) -> Option<&'a str> {
    chain
        .iter()
        .filter_map(|(category, name)| buckets.find(*category, name))
        .map(|tag| tag.content.as_str())
        .find(|content| !content.is_empty())
}

fn build_preview(buckets: &MetaTagBuckets, url: &str) -> Preview {
    let title = first_content(
        buckets,
        &[(Category::Opengraph, "og:title"), (Category::General, "title")],
    );
    let description = first_content(
        buckets,
        &[
            (Category::Opengraph, "og:description"),
            (Category::General, "description"),
        ],
    );
    let image = first_content(
        buckets,
        &[
            (Category::Opengraph, "og:image"),
            (Category::Twitter, "twitter:image"),
        ],
    );

    Preview {
        title: title.unwrap_or_default().to_string(),
        description: description.unwrap_or_default().to_string(),
        url: url.to_string(),
        image: image.map(str::to_string),
        domain: display_domain(url),
    }
}

fn display_domain(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}
