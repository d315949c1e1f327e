// File: silcrow-vite/src/inject.rs
// Purpose: Rewrite outgoing HTML responses to carry the Vite tags before </head>

use crate::extension::Vite;
use crate::host::request_host;
use crate::tags::HEADER_MARKER;
use axum::body::{Body, HttpBody};
use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::{debug, error, warn};

const HEAD_CLOSE: &str = "</head>";

/// Why a response was passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    Status,
    NotHtml,
    /// Already compressed by an inner layer.
    Encoded,
    /// Body length unknown up front.
    Streaming,
    TooLarge,
}

/// Insert `tag` and a newline right before the first `</head>`.
///
/// Returns `None` when the page has no `</head>`, and when the head already
/// carries the header marker (tags placed by the template itself).
pub fn inject_tag(html: &str, tag: &str) -> Option<String> {
    let at = html.find(HEAD_CLOSE)?;
    if html[..at].contains(HEADER_MARKER) {
        return None;
    }

    let mut out = String::with_capacity(html.len() + tag.len() + 1);
    out.push_str(&html[..at]);
    out.push_str(tag);
    out.push('\n');
    out.push_str(&html[at..]);
    Some(out)
}

/// Checks everything that can be decided without reading the body.
pub fn check_eligible(response: &Response, max_body_bytes: usize) -> Result<(), Skip> {
    if response.status() != StatusCode::OK {
        return Err(Skip::Status);
    }

    let is_html = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|content_type| {
            content_type
                .trim_start()
                .to_ascii_lowercase()
                .starts_with("text/html")
        });
    if !is_html {
        return Err(Skip::NotHtml);
    }

    if response.headers().contains_key(header::CONTENT_ENCODING) {
        return Err(Skip::Encoded);
    }

    match response.body().size_hint().exact() {
        None => Err(Skip::Streaming),
        Some(len) if len > max_body_bytes as u64 => Err(Skip::TooLarge),
        Some(_) => Ok(()),
    }
}

/// Middleware injecting the tag fragment into eligible HTML responses.
///
/// ```rust,ignore
/// use axum::middleware::from_fn_with_state;
///
/// Router::new()
///     .route("/", get(index))
///     .layer(from_fn_with_state(vite.clone(), inject_tags))
/// ```
///
/// Must sit inside any compression layer.
pub async fn inject_tags(State(vite): State<Vite>, request: Request, next: Next) -> Response {
    let host = request_host(request.headers(), request.uri()).map(str::to_string);
    let response = next.run(request).await;

    match check_eligible(&response, vite.config().max_body_bytes) {
        Ok(()) => {}
        Err(Skip::TooLarge) => {
            warn!(
                limit = vite.config().max_body_bytes,
                "html response exceeds max_body_bytes, vite tags not injected"
            );
            return response;
        }
        Err(reason) => {
            debug!(?reason, status = %response.status(), "vite tags not injected");
            return response;
        }
    }

    let tag = match vite.tags(false, host.as_deref()) {
        Ok(tag) => tag.into_string(),
        Err(e) => return e.into_response(),
    };

    rewrite_body(response, &tag).await
}

async fn rewrite_body(response: Response, tag: &str) -> Response {
    let (mut parts, body) = response.into_parts();

    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(error = %e, "failed to read response body for vite tag injection");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let injected = std::str::from_utf8(&bytes)
        .ok()
        .and_then(|html| inject_tag(html, tag));

    match injected {
        Some(html) => {
            debug!(bytes = html.len(), "vite tags injected");
            parts
                .headers
                .insert(header::CONTENT_LENGTH, HeaderValue::from(html.len()));
            Response::from_parts(parts, Body::from(html))
        }
        None => {
            debug!("no </head> in utf-8 body or tags already present, response left as is");
            Response::from_parts(parts, Body::from(bytes))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::Html;
    use pretty_assertions::assert_eq;

    const TAG: &str = "<!-- FLASK_VITE_HEADER -->\n<script></script>";

    #[test]
    fn test_inject_before_head_close() {
        let html = "<html><head><title>x</title></head><body></body></html>";
        assert_eq!(
            inject_tag(html, TAG).unwrap(),
            "<html><head><title>x</title><!-- FLASK_VITE_HEADER -->\n<script></script>\n</head><body></body></html>"
        );
    }

    #[test]
    fn test_inject_only_first_head_close() {
        let html = "<head></head><pre>&lt;/head&gt; </head></pre>";
        let out = inject_tag(html, TAG).unwrap();

        assert_eq!(out.matches("FLASK_VITE_HEADER").count(), 1);
        assert!(out.starts_with(&format!("<head>{}\n</head>", TAG)));
        assert!(out.ends_with(" </head></pre>"));
    }

    #[test]
    fn test_no_head_close_is_noop() {
        assert_eq!(inject_tag("<p>fragment</p>", TAG), None);
        assert_eq!(inject_tag("<HEAD></HEAD>", TAG), None);
    }

    #[test]
    fn test_existing_marker_is_noop() {
        let html = format!("<head>{}</head>", TAG);
        assert_eq!(inject_tag(&html, TAG), None);
    }

    #[test]
    fn test_marker_in_body_still_injects() {
        let html = "<html><head><title>x</title></head><body><pre><!-- FLASK_VITE_HEADER --></pre></body></html>";
        let out = inject_tag(html, TAG).unwrap();

        assert_eq!(
            out,
            html.replacen("</head>", &format!("{}\n</head>", TAG), 1)
        );
        assert_eq!(out.matches(HEADER_MARKER).count(), 2);
    }

    #[test]
    fn test_eligibility() {
        let limit = 1024;

        let ok = Html("<head></head>").into_response();
        assert_eq!(check_eligible(&ok, limit), Ok(()));

        let not_found = (StatusCode::NOT_FOUND, Html("<head></head>")).into_response();
        assert_eq!(check_eligible(&not_found, limit), Err(Skip::Status));

        let created = (StatusCode::CREATED, Html("<head></head>")).into_response();
        assert_eq!(check_eligible(&created, limit), Err(Skip::Status));

        let text = "<head></head>".into_response();
        assert_eq!(check_eligible(&text, limit), Err(Skip::NotHtml));

        let big = Html("x".repeat(limit + 1)).into_response();
        assert_eq!(check_eligible(&big, limit), Err(Skip::TooLarge));

        let gzipped = ([(header::CONTENT_ENCODING, "gzip")], Html("<head></head>")).into_response();
        assert_eq!(check_eligible(&gzipped, limit), Err(Skip::Encoded));
    }

    #[test]
    fn test_streaming_body_skipped() {
        let chunks = vec![Ok::<_, std::io::Error>("<head>"), Ok("</head>")];
        let body = Body::from_stream(futures::stream::iter(chunks));
        let response = Response::builder()
            .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
            .body(body)
            .unwrap();

        assert_eq!(check_eligible(&response, 1024), Err(Skip::Streaming));
    }
}
