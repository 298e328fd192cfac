// URL helpers shared by the endpoint operations.

/// Join `base` and `path` with exactly one `/` between them.
///
/// Both `"https://sxcu.net/"` + `"/api"` and `"https://sxcu.net"` + `"api"`
/// give `"https://sxcu.net/api"`. `path` must not be empty.
pub fn join_url(base: &str, path: &str) -> String {
    debug_assert!(!path.is_empty(), "join_url called with an empty path");
    let base = base.strip_suffix('/').unwrap_or(base);
    let path = path.strip_prefix('/').unwrap_or(path);
    format!("{base}/{path}")
}

/// Extract a file id from a file URL such as `https://sxcu.net/QNeo92` or
/// `https://sxcu.net/api/files/QNeo92.json`. A bare id is returned as is.
///
/// Returns `None` when there is nothing after the host.
pub fn file_id_from_url(url: &str) -> Option<&str> {
    let url = url.split(['?', '#']).next().unwrap_or(url);
    let url = url.trim_end_matches('/');
    let path = match url.split_once("://") {
        Some((_, rest)) => rest.split_once('/').map(|(_, path)| path)?,
        None => url,
    };
    let segment = path.rsplit('/').next().unwrap_or(path);
    let id = segment.strip_suffix(".json").unwrap_or(segment);
    (!id.is_empty()).then_some(id)
}

/// Drop the last `count` path segments of `url`.
///
/// `.sxcu` files carry the full upload URL (`https://host/api/files/create`);
/// removing the trailing three segments gives the base domain.
pub(crate) fn strip_segments(url: &str, count: usize) -> String {
    let parts: Vec<&str> = url.split('/').collect();
    let keep = parts.len().saturating_sub(count);
    parts[..keep].join("/")
}
