//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
/// Later sources override these keys; unknown keys are ignored on deserialize.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("generation.model", crate::config::default_model())?
        .set_default("generation.base_url", crate::config::default_base_url())?
        .set_default("generation.dispatch", "sequential")?
        .set_default("generation.connect_timeout_secs", 10_i64)?
        .set_default("generation.request_timeout_secs", 120_i64)?
        .set_default("intake.max_bytes", 10_i64 * 1024 * 1024)
}
