use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

static TITLE: Lazy<Selector> = Lazy::new(|| selector("title"));
static CANONICAL: Lazy<Selector> = Lazy::new(|| selector(r#"link[rel="canonical"]"#));
static META: Lazy<Selector> = Lazy::new(|| selector("meta"));
static JSON_LD: Lazy<Selector> =
    Lazy::new(|| selector(r#"script[type="application/ld+json"]"#));

fn selector(css: &str) -> Selector {
    // Only ever called with the literals above.
    Selector::parse(css).expect("static selector must parse")
}

/// A `<meta>` element reduced to its lookup key and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaElement {
    /// First non-empty of `name`, `property`, `http-equiv`.
    pub key: String,
    /// `content` attribute, or empty when absent.
    pub content: String,
}

/// Raw SEO signals pulled out of one HTML document, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSignals {
    pub title: Option<String>,
    pub canonical: Option<String>,
    pub metas: Vec<MetaElement>,
    pub json_ld: Vec<String>,
}

impl PageSignals {
    /// Parse `html` leniently. html5ever never rejects input, so malformed
    /// markup just yields fewer signals.
    pub fn extract(html: &str) -> Self {
        let document = Html::parse_document(html);

        PageSignals {
            title: get_title(&document),
            canonical: get_canonical(&document),
            metas: document.select(&META).filter_map(meta_element).collect(),
            json_ld: document
                .select(&JSON_LD)
                .map(|el| el.text().collect::<String>())
                .collect(),
        }
    }
}

fn get_title(doc: &Html) -> Option<String> {
    doc.select(&TITLE)
        .next()
        .map(|el| el.text().collect::<String>())
        .filter(|s| !s.is_empty())
}

fn get_canonical(doc: &Html) -> Option<String> {
    doc.select(&CANONICAL)
        .next()
        .and_then(|el| el.value().attr("href"))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn meta_element(el: ElementRef<'_>) -> Option<MetaElement> {
    let attrs = el.value();
    let key = ["name", "property", "http-equiv"]
        .into_iter()
        .filter_map(|attr| attrs.attr(attr))
        .find(|value| !value.is_empty())?;

    Some(MetaElement {
        key: key.to_string(),
        content: attrs.attr("content").unwrap_or_default().to_string(),
    })
}
