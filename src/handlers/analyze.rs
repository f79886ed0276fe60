use std::net::IpAddr;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::info;
use url::{Host, Url};
use validator::Validate;

use crate::analyzer;
use crate::error::{AppError, AppResult};
use crate::models::AnalysisResult;
use crate::state::AppState;

/// Redirect hops followed before the fetch is abandoned.
const MAX_REDIRECTS: usize = 10;

// ── Public helpers ─────────────────────────────────────────────────────────

/// Returns `true` if `ip` is a private, loopback, or link-local address.
pub fn is_private_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            let o = v4.octets();
            matches!(
                o,
                [127, ..]
                    | [10, ..]
                    | [169, 254, ..]
                    | [192, 168, ..]
                    | [0, ..]
                    | [255, 255, 255, 255]
            ) || (o[0] == 172 && (16..=31).contains(&o[1]))
        }
        IpAddr::V6(v6) => {
            if let Some(v4) = v6.to_ipv4_mapped() {
                return is_private_ip(IpAddr::V4(v4));
            }
            v6.is_loopback()
                || v6.is_unspecified()
                || (v6.segments()[0] & 0xfe00 == 0xfc00)
                || (v6.segments()[0] & 0xffc0 == 0xfe80)
        }
    }
}

fn validation_error(e: validator::ValidationErrors) -> AppError {
    AppError::Validation(
        e.field_errors()
            .values()
            .flat_map(|v| v.iter())
            .filter_map(|e| e.message.as_ref())
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(", "),
    )
}

/// Check the query string and return the target as a parsed http(s) URL.
pub fn parse_target(params: &AnalyzeQuery) -> AppResult<Url> {
    params.validate().map_err(validation_error)?;

    let parsed = Url::parse(params.url.as_deref().unwrap_or_default())
        .map_err(|_| AppError::Validation("Invalid URL format".into()))?;
    ensure_http_scheme(parsed)
}

fn ensure_http_scheme(url: Url) -> AppResult<Url> {
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(AppError::Validation(
            "Only http/https URLs are supported".into(),
        )),
    }
}

/// Resolve the target host and reject it if any address is private.
async fn ensure_public_host(url: &Url) -> AppResult<()> {
    let port = url.port_or_known_default().unwrap_or(80);

    let ips: Vec<IpAddr> = match url.host() {
        Some(Host::Ipv4(ip)) => vec![IpAddr::V4(ip)],
        Some(Host::Ipv6(ip)) => vec![IpAddr::V6(ip)],
        Some(Host::Domain(domain)) => tokio::net::lookup_host((domain, port))
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, host = domain, "Failed to resolve URL host");
                AppError::Fetch(e.to_string())
            })?
            .map(|addr| addr.ip())
            .collect(),
        None => return Err(AppError::Validation("URL has no host".into())),
    };

    if ips.into_iter().any(is_private_ip) {
        return Err(AppError::Validation(
            "URL resolves to a private or reserved address".into(),
        ));
    }
    Ok(())
}

/// Resolve a `Location` header against the URL that returned it, applying
/// the same scheme and host checks as the original target.
async fn redirect_hop(current: &Url, location: &str, block_private_hosts: bool) -> AppResult<Url> {
    let next = current
        .join(location)
        .map_err(|e| AppError::Fetch(format!("Invalid redirect location: {e}")))?;
    let next = ensure_http_scheme(next)?;

    if block_private_hosts {
        ensure_public_host(&next).await?;
    }
    Ok(next)
}

/// GET the page and return its body as text, capped at `max_body_bytes`.
///
/// Redirects are followed here rather than by the client so every hop is
/// checked against the private-host policy.
async fn fetch_page(state: &AppState, url: &Url) -> AppResult<String> {
    let max_body_bytes = state.config.max_body_bytes;
    let mut current = url.clone();
    let mut hops = 0;

    let mut response = loop {
        let response = state
            .http_client
            .get(current.as_str())
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = ?e, url = %current, "Failed to fetch URL for analysis");
                AppError::Fetch(e.to_string())
            })?;

        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        match location {
            Some(location) if response.status().is_redirection() => {
                if hops == MAX_REDIRECTS {
                    return Err(AppError::Fetch("Too many redirects".into()));
                }
                hops += 1;
                current =
                    redirect_hop(&current, &location, state.config.block_private_hosts).await?;
                tracing::debug!(url = %current, hops, "Following redirect");
            }
            _ => break response,
        }
    };

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::Upstream {
            status: status.as_u16(),
            message: format!(
                "Failed to fetch URL: {}",
                status.canonical_reason().unwrap_or("Unknown status")
            ),
        });
    }

    let too_large = || AppError::Fetch(format!("Response body exceeds {max_body_bytes} bytes"));

    if response
        .content_length()
        .is_some_and(|len| len > max_body_bytes as u64)
    {
        return Err(too_large());
    }

    let mut body = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| AppError::Fetch(e.to_string()))?
    {
        if body.len() + chunk.len() > max_body_bytes {
            return Err(too_large());
        }
        body.extend_from_slice(&chunk);
    }

    Ok(String::from_utf8_lossy(&body).into_owned())
}

// ── Query params ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct AnalyzeQuery {
    #[validate(
        required(message = "URL parameter is required"),
        length(min = 1, message = "URL parameter is required")
    )]
    pub url: Option<String>,
}

// ── Handler ────────────────────────────────────────────────────────────────

/// GET /api/analyze?url=<encoded-url>
///
/// Fetches the page and returns its meta tag analysis.
/// Rejects private/loopback targets unless `BLOCK_PRIVATE_HOSTS=false`.
pub async fn analyze_url(
    State(state): State<AppState>,
    Query(params): Query<AnalyzeQuery>,
) -> AppResult<Json<AnalysisResult>> {
    let target = parse_target(&params)?;

    if state.config.block_private_hosts {
        ensure_public_host(&target).await?;
    }

    let html = fetch_page(&state, &target).await?;

    // Echo the URL exactly as the caller sent it.
    let url_str = params.url.unwrap_or_default();

    // Parsing is CPU-bound; keep it off the async workers.
    let result = tokio::task::spawn_blocking(move || analyzer::analyze(&html, &url_str))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    info!(
        url = %result.url,
        tags = result.meta_tags_count,
        score = result.score,
        recommendations = result.recommendations.len(),
        "Analysis complete"
    );

    Ok(Json(result))
}

// ── Unit tests ─────────────────────────────────────────────────────────────
