//! Placeholder resolution across all configuration fields.

use super::SubmitConfig;
use crate::error::{Error, FieldError, Result};
use crate::template::resolve;
use std::collections::{BTreeMap, HashMap};

impl SubmitConfig {
    /// Resolve `{{ .NAME }}` placeholders in option and config keys/values and
    /// in every app argument, using the configuration's own environment.
    ///
    /// Fails on the first undefined reference. Fields processed before the
    /// failure keep their resolved form.
    pub fn process_templates(&mut self) -> Result<()> {
        tracing::debug!("processing configurations given as templates");
        self.submit_options = resolve_map("submit_options", &self.submit_options, &self.env)?;
        self.spark_config = resolve_map("spark_config", &self.spark_config, &self.env)?;

        tracing::debug!("processing app args given as templates");
        resolve_args("app_args", &mut self.app_args, &self.env)
    }
}

/// Resolve keys and values into a fresh map.
///
/// Originals are visited in key order, so if two keys resolve to the same
/// name the entry with the greater original key wins. A key that resolves to
/// an empty name is rejected.
fn resolve_map(
    field: &str,
    map: &BTreeMap<String, String>,
    env: &HashMap<String, String>,
) -> Result<BTreeMap<String, String>> {
    let mut resolved = BTreeMap::new();
    for (key, value) in map {
        let new_key = resolve(key, env).map_err(|e| e.in_field(field))?;
        if new_key.trim().is_empty() {
            return Err(Error::Validation(vec![FieldError::new(
                field,
                format!("key '{key}' resolved to an empty name"),
            )]));
        }
        let new_value = resolve(value, env).map_err(|e| e.in_field(field))?;
        if new_key != *key {
            tracing::trace!("key [ {} ] resolved to [ {} ]", key, new_key);
        }
        if let Some(previous) = resolved.insert(new_key, new_value) {
            tracing::debug!("resolved key collision, dropping value [ {} ]", previous);
        }
    }
    Ok(resolved)
}

fn resolve_args(field: &str, args: &mut [String], env: &HashMap<String, String>) -> Result<()> {
    for arg in args.iter_mut() {
        *arg = resolve(arg, env).map_err(|e| e.in_field(field))?;
    }
    Ok(())
}
