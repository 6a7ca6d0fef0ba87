use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Failure while expanding `{{ env.VAR }}` placeholders
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExpandError {
    /// Variable is unset and the placeholder carries no default
    #[error("environment variable not found: `{0}`")]
    Missing(String),

    /// Placeholder is not scoped with `env.`
    #[error("only variables scoped with 'env.' are supported: `{0}`")]
    UnsupportedScope(String),
}

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // 1: scoped key, 2: optional default("...")
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*([a-zA-Z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#)
            .expect("placeholder pattern is valid")
    })
}

/// Expand `{{ env.VAR }}` and `{{ env.VAR | default("x") }}` in raw TOML text
///
/// Comment lines are passed through untouched, so a commented-out credential
/// never forces its variable to be set.
pub fn expand_env(input: &str) -> Result<String, ExpandError> {
    expand_with(input, |name| std::env::var(name).ok())
}

/// Expansion with an injected variable lookup
pub(crate) fn expand_with<F>(input: &str, lookup: F) -> Result<String, ExpandError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut lines = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_owned());
            continue;
        }

        lines.push(expand_line(line, &lookup)?);
    }

    let mut output = lines.join("\n");
    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}

fn expand_line<F>(line: &str, lookup: &F) -> Result<String, ExpandError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut error = None;

    let expanded = placeholder().replace_all(line, |captures: &Captures<'_>| {
        match resolve(captures, lookup) {
            Ok(value) => value,
            Err(e) => {
                error.get_or_insert(e);
                String::new()
            }
        }
    });

    match error {
        Some(e) => Err(e),
        None => Ok(expanded.into_owned()),
    }
}

fn resolve<F>(captures: &Captures<'_>, lookup: &F) -> Result<String, ExpandError>
where
    F: Fn(&str) -> Option<String>,
{
    let key = &captures[1];
    let default = captures.get(2).map(|m| m.as_str());

    let Some(name) = key.strip_prefix("env.").filter(|name| !name.contains('.')) else {
        return Err(ExpandError::UnsupportedScope(key.to_owned()));
    };

    lookup(name)
        .or_else(|| default.map(str::to_owned))
        .ok_or_else(|| ExpandError::Missing(name.to_owned()))
}

/// Read the first non-empty variable among `names`
///
/// Blank values count as unset, matching how a `.env` line like `KEY=` is
/// usually meant.
pub fn first_var(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .map(|value| value.trim().to_owned())
        .find(|value| !value.is_empty())
}
