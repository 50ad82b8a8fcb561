use axum::http::{HeaderMap, Uri, header};

/// Scheme and authority the client used to reach us, e.g. `http://localhost:3333`.
///
/// Lookup order for the host: `X-Forwarded-Host`, `Host`, then the request
/// URI's authority (HTTP/2 `:authority`), then `localhost`. The scheme comes
/// from `X-Forwarded-Proto`, then the URI, then `http`.
///
/// Forwarded headers are taken as sent, so any client can choose the result.
/// Links that must not be spoofable should come from a configured public URL.
pub fn request_base_url(uri: &Uri, headers: &HeaderMap) -> String {
    let scheme = first_value(headers, "x-forwarded-proto")
        .or_else(|| uri.scheme_str())
        .unwrap_or("http");
    let host = first_value(headers, "x-forwarded-host")
        .or_else(|| headers.get(header::HOST).and_then(|v| v.to_str().ok()))
        .or_else(|| uri.authority().map(|a| a.as_str()))
        .unwrap_or("localhost");

    format!("{}://{}", scheme, host)
}

fn first_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
