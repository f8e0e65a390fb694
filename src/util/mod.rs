pub(crate) fn now_ms() -> u64 {
    js_sys::Date::now().max(0.0).round() as u64
}

/// Last non-empty path segment, ignoring any query string or fragment.
pub(crate) fn last_path_segment(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.rsplit('/').find(|s| !s.is_empty()).unwrap_or_default()
}
