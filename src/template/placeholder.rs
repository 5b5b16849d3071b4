//! Strict `{{ .NAME }}` placeholder substitution.
//!
//! Configuration keys, values and application arguments may reference
//! environment variables with the `{{ .NAME }}` syntax. Whitespace inside the
//! braces is insignificant. Unlike the command template, resolution is strict:
//! a reference to an undefined variable is an error and never expands to an
//! empty string.
//!
//! # Examples
//!
//! ```
//! use spark_submit_plugin::template::resolve;
//! use std::collections::HashMap;
//!
//! let env: HashMap<String, String> = [("NAMESPACE".into(), "jobs".into())].into();
//!
//! let resolved = resolve("spark.kubernetes.namespace={{ .NAMESPACE }}", &env).unwrap();
//! assert_eq!(resolved, "spark.kubernetes.namespace=jobs");
//! assert!(resolve("{{ .MISSING }}", &env).is_err());
//! ```

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*\.([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("Valid regex pattern")
});

/// Resolve every placeholder in `text` against `env` in a single pass.
///
/// Substituted values are not scanned again, so a value that itself looks like
/// a placeholder is inserted literally.
pub fn resolve(text: &str, env: &HashMap<String, String>) -> Result<String> {
    if !text.contains("{{") {
        return Ok(text.to_string());
    }

    tracing::trace!("resolving placeholders in: [{}]", text);

    if let Some(missing) = PLACEHOLDER_REGEX
        .captures_iter(text)
        .map(|cap| cap[1].to_string())
        .find(|name| !env.contains_key(name))
    {
        return Err(Error::TemplateResolution {
            placeholder: missing,
            input: text.to_string(),
            field: None,
        });
    }

    let resolved = PLACEHOLDER_REGEX.replace_all(text, |cap: &Captures| {
        env.get(&cap[1]).cloned().unwrap_or_default()
    });

    Ok(resolved.into_owned())
}
