//! Rendering of the final `spark-submit` command line.

use crate::config::SubmitConfig;
use crate::error::Result;
use tera::{Context, Tera};

pub const SPARK_SUBMIT_BIN: &str = "/opt/spark/bin/spark-submit";

pub const SPARK_SUBMIT_TEMPLATE_NAME: &str = "spark-submit";

/// Options render as `--key value`, spark configs as `--conf key=value`,
/// app args follow in order. Nothing is quoted or escaped.
pub const SPARK_SUBMIT_TEMPLATE: &str = concat!(
    "{{ binary }} --verbose --deploy-mode cluster",
    "{% for key, value in options %} --{{ key }} {{ value }}{% endfor %}",
    "{% for key, value in settings %} --conf {{ key }}={{ value }}{% endfor %}",
    "{% for arg in arguments %} {{ arg }}{% endfor %}",
);

/// Renders a [`SubmitConfig`] into a single command line.
pub struct CommandAssembler {
    binary: String,
    tera: Tera,
}

impl CommandAssembler {
    /// Assembler for the stock spark distribution path.
    pub fn new() -> Result<Self> {
        Self::with_binary(SPARK_SUBMIT_BIN)
    }

    pub fn with_binary(binary: impl Into<String>) -> Result<Self> {
        Self::with_template(binary, SPARK_SUBMIT_TEMPLATE)
    }

    /// Build an assembler from a custom template. The template sees `binary`,
    /// `options`, `settings` and `arguments`.
    pub fn with_template(binary: impl Into<String>, template: &str) -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_template(SPARK_SUBMIT_TEMPLATE_NAME, template)
            .map_err(|e| {
                tracing::error!("couldn't parse the submit command template, err: {}", e);
                e
            })?;

        Ok(Self {
            binary: binary.into(),
            tera,
        })
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn assemble(&self, config: &SubmitConfig) -> Result<String> {
        tracing::debug!("assembling the spark submit command ...");

        let mut context = Context::new();
        context.insert("binary", &self.binary);
        context.insert("options", &config.submit_options);
        context.insert("settings", &config.spark_config);
        context.insert("arguments", &config.app_args);

        let command = self
            .tera
            .render(SPARK_SUBMIT_TEMPLATE_NAME, &context)
            .map_err(|e| {
                tracing::error!("couldn't execute the submit command template, err: {}", e);
                e
            })?;

        tracing::debug!("successfully assembled the spark submit command: {}", command);
        Ok(command)
    }
}
