// ABOUTME: Environment variable interpolation for raw configuration text.
// ABOUTME: Expands ${VAR} and ${VAR:-default} before the YAML is parsed.

use crate::error::{Error, Result};

/// Expand `${VAR}` and `${VAR:-default}` references from the process environment.
///
/// `$$` produces a literal `$`. A `$` not followed by `{` or `$` is kept as is.
pub fn interpolate(raw: &str) -> Result<String> {
    interpolate_with(raw, |name| std::env::var(name).ok())
}

/// Expand references using a custom lookup.
pub fn interpolate_with<F>(raw: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(stripped) = after.strip_prefix('$') {
            out.push('$');
            rest = stripped;
            continue;
        }

        let Some(body) = after.strip_prefix('{') else {
            out.push('$');
            rest = after;
            continue;
        };

        let end = body.find('}').ok_or_else(|| {
            Error::InvalidConfig(format!(
                "unterminated variable reference near \"${{{}\"",
                truncate(body)
            ))
        })?;
        let reference = &body[..end];
        let (name, default) = match reference.split_once(":-") {
            Some((name, default)) => (name, Some(default)),
            None => (reference, None),
        };

        if name.is_empty() {
            return Err(Error::InvalidConfig(
                "empty variable reference \"${}\"".to_string(),
            ));
        }

        match (lookup(name), default) {
            (Some(value), _) => out.push_str(&value),
            (None, Some(default)) => out.push_str(default),
            (None, None) => return Err(Error::MissingEnvVar(name.to_string())),
        }

        rest = &body[end + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

fn truncate(s: &str) -> &str {
    match s.char_indices().nth(16) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn replaces_set_variable() {
        let out =
            interpolate_with("project: ${PROJECT}", lookup(&[("PROJECT", "Shop")])).unwrap();
        assert_eq!(out, "project: Shop");
    }

    #[test]
    fn uses_default_when_unset() {
        let out = interpolate_with("trigger: ${MODE:-current}", lookup(&[])).unwrap();
        assert_eq!(out, "trigger: current");
    }

    #[test]
    fn missing_variable_without_default_fails() {
        let err = interpolate_with("project: ${PROJECT}", lookup(&[])).unwrap_err();
        assert!(matches!(err, Error::MissingEnvVar(ref name) if name == "PROJECT"));
    }

    #[test]
    fn double_dollar_escapes() {
        let out = interpolate_with("cost: $$5 and $HOME", lookup(&[])).unwrap();
        assert_eq!(out, "cost: $5 and $HOME");
    }

    #[test]
    fn unterminated_reference_fails() {
        assert!(interpolate_with("x: ${OPEN", lookup(&[])).is_err());
    }

    #[test]
    fn text_without_references_is_unchanged() {
        let raw = "releases:\n  - crontab: \"*/5 * * * *\"\n";
        assert_eq!(interpolate_with(raw, lookup(&[])).unwrap(), raw);
    }
}
