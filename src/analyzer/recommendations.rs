use crate::models::{Category, MetaTagBuckets, Priority, Recommendation};

/// A tag whose absence from its bucket produces a recommendation.
struct RequiredTag {
    category: Category,
    name: &'static str,
    id: &'static str,
    priority: Priority,
    title: &'static str,
    description: &'static str,
    example: &'static str,
}

/// Evaluated top to bottom; the output keeps this order.
static REQUIRED_TAGS: &[RequiredTag] = &[
    RequiredTag {
        category: Category::General,
        name: "description",
        id: "missing-description",
        priority: Priority::High,
        title: "Add a meta description",
        description: "Your page is missing a meta description, which is important for SEO and click-through rates from search results.",
        example: r#"<meta name="description" content="A concise description of your page content in 50-160 characters.">"#,
    },
    RequiredTag {
        category: Category::Opengraph,
        name: "og:title",
        id: "missing-og-title",
        priority: Priority::Medium,
        title: "Add Open Graph title",
        description: "Open Graph title tag is missing. This affects how your content appears when shared on social media.",
        example: r#"<meta property="og:title" content="Your page title for social media">"#,
    },
    RequiredTag {
        category: Category::Opengraph,
        name: "og:description",
        id: "missing-og-description",
        priority: Priority::Medium,
        title: "Add Open Graph description",
        description: "Open Graph description tag is missing. This affects how your content appears when shared on social media.",
        example: r#"<meta property="og:description" content="A compelling description for social media shares">"#,
    },
    RequiredTag {
        category: Category::Opengraph,
        name: "og:image",
        id: "missing-og-image",
        priority: Priority::Medium,
        title: "Add Open Graph image",
        description: "Open Graph image tag is missing. Visual content significantly increases engagement when shared on social platforms.",
        example: r#"<meta property="og:image" content="https://example.com/image.jpg">"#,
    },
    RequiredTag {
        category: Category::Twitter,
        name: "twitter:card",
        id: "missing-twitter-card",
        priority: Priority::Medium,
        title: "Add Twitter Card markup",
        description: "Twitter Card meta tag is missing. This controls how your content appears when shared on Twitter.",
        example: r#"<meta name="twitter:card" content="summary_large_image">"#,
    },
];

impl RequiredTag {
    fn to_recommendation(&self) -> Recommendation {
        Recommendation {
            id: self.id.to_string(),
            priority: self.priority,
            title: self.title.to_string(),
            description: self.description.to_string(),
            example: Some(self.example.to_string()),
        }
    }
}

/// Recommendations for required tags missing from `buckets`. Presence is all
/// that matters; a required tag graded `Error` still satisfies its check.
pub fn missing_tag_recommendations(buckets: &MetaTagBuckets) -> Vec<Recommendation> {
    REQUIRED_TAGS
        .iter()
        .filter(|required| !buckets.contains(required.category, required.name))
        .map(RequiredTag::to_recommendation)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MetaTag, TagStatus};

    fn ids(recs: &[Recommendation]) -> Vec<&str> {
        recs.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn empty_buckets_fire_every_rule_in_order() {
        let recs = missing_tag_recommendations(&MetaTagBuckets::default());
        assert_eq!(
            ids(&recs),
            vec![
                "missing-description",
                "missing-og-title",
                "missing-og-description",
                "missing-og-image",
                "missing-twitter-card",
            ]
        );
        assert_eq!(recs[0].priority, Priority::High);
        assert!(recs[1..].iter().all(|r| r.priority == Priority::Medium));
        assert!(recs.iter().all(|r| r.example.is_some()));
    }

    #[test]
    fn present_tag_suppresses_its_rule_even_when_erroring() {
        let mut buckets = MetaTagBuckets::default();
        buckets.push(Category::Opengraph, MetaTag::new("og:image", "", TagStatus::Error));
        let recs = missing_tag_recommendations(&buckets);
        assert!(!ids(&recs).contains(&"missing-og-image"));
        assert_eq!(recs.len(), 4);
    }

    #[test]
    fn tag_in_wrong_bucket_does_not_count() {
        let mut buckets = MetaTagBuckets::default();
        buckets.push(Category::Other, MetaTag::new("description", "x", TagStatus::Good));
        let recs = missing_tag_recommendations(&buckets);
        assert_eq!(recs[0].id, "missing-description");
    }
}
