//! Environment variable expansion for string config values.
//!
//! Supports `${VAR}` (value of VAR, empty when unset) and
//! `${VAR:-default}` (value of VAR, or the default when unset or
//! empty). Expanding to empty rather than failing keeps missing
//! credentials a soft condition: the caller maps empty to "not
//! configured".

/// Expand using the process environment.
pub(crate) fn expand(input: &str) -> String {
    expand_with(input, |name| std::env::var(name).ok())
}

/// Expand with an injectable variable lookup (used by tests).
pub(crate) fn expand_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            // Unterminated expression: keep the text as written.
            out.push_str(&rest[start..]);
            return out;
        };

        let expr = &after[..end];
        let (name, default) = match expr.split_once(":-") {
            Some((name, default)) => (name, Some(default)),
            None => (expr, None),
        };

        match lookup(name).filter(|v| !v.is_empty()) {
            Some(value) => out.push_str(&value),
            None => out.push_str(default.unwrap_or_default()),
        }

        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}
