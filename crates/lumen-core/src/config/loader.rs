//! Configuration loader with environment variable expansion
//!
//! Loads configuration from `.lumen.toml` in the project root or the user
//! config directory.

use super::types::LumenConfig;
use crate::error::{LumenError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};

/// Project-level config file name
pub const PROJECT_CONFIG_FILE: &str = ".lumen.toml";

const ENV_PATTERN: &str = r"\$\{([^}]+)\}";

/// Load configuration from various sources
///
/// Priority order:
/// 1. Project-level `.lumen.toml`
/// 2. User-level `~/.config/lumen/config.toml`
/// 3. Default configuration
///
/// Environment overrides apply in every case, then the result is validated.
pub fn load_config(project_dir: &Path) -> Result<LumenConfig> {
    let project_config = project_dir.join(PROJECT_CONFIG_FILE);
    if project_config.exists() {
        return load_from_file(&project_config);
    }

    if let Some(user_config) = user_config_path() {
        if user_config.exists() {
            return load_from_file(&user_config);
        }
    }

    let config = apply_env_overrides(LumenConfig::default(), env_lookup)?;
    config.validate()?;
    Ok(config)
}

/// User config file path
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lumen").join("config.toml"))
}

/// Load configuration from a specific file
pub fn load_from_file(path: &Path) -> Result<LumenConfig> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content, env_lookup)?;
    tracing::info!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Parse, expand, override and validate a TOML document
pub fn parse_config<F>(content: &str, lookup: F) -> Result<LumenConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config: LumenConfig = toml::from_str(content)?;
    expand_env_vars(&mut config, &lookup)?;
    let config = apply_env_overrides(config, &lookup)?;
    config.validate()?;
    Ok(config)
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn env_regex() -> Result<Regex> {
    Regex::new(ENV_PATTERN).map_err(|e| LumenError::config(e.to_string()))
}

/// Expand ${VAR} patterns in string values
fn expand_env_vars<F>(config: &mut LumenConfig, lookup: &F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let regex = env_regex()?;

    if let Some(catalog) = config.workspace.catalog.take() {
        let expanded = expand_string(&catalog.to_string_lossy(), &regex, lookup);
        config.workspace.catalog = Some(PathBuf::from(expanded));
    }

    let assistant = &mut config.assistant;
    assistant.model = expand_string(&assistant.model, &regex, lookup);
    assistant.agent = expand_string(&assistant.agent, &regex, lookup);
    assistant.reply = expand_string(&assistant.reply, &regex, lookup);
    config.console.echo_prefix = expand_string(&config.console.echo_prefix, &regex, lookup);
    Ok(())
}

/// Expand environment variables in a single string
///
/// Unknown variables are left as written.
fn expand_string<F>(s: &str, regex: &Regex, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    regex
        .replace_all(s, |caps: &regex::Captures| {
            let var_name = &caps[1];
            lookup(var_name).unwrap_or_else(|| format!("${{{}}}", var_name))
        })
        .to_string()
}

/// Apply environment variable overrides
///
/// - LUMEN_CONVERSATION_DELAY_MS -> session.conversation_delay_ms
/// - LUMEN_CONSOLE_DELAY_MS -> session.console_delay_ms
/// - LUMEN_CATALOG -> workspace.catalog
/// - LUMEN_MODEL -> assistant.model
fn apply_env_overrides<F>(mut config: LumenConfig, lookup: F) -> Result<LumenConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(ms) = non_empty("LUMEN_CONVERSATION_DELAY_MS") {
        config.session.conversation_delay_ms = parse_ms("LUMEN_CONVERSATION_DELAY_MS", &ms)?;
    }
    if let Some(ms) = non_empty("LUMEN_CONSOLE_DELAY_MS") {
        config.session.console_delay_ms = parse_ms("LUMEN_CONSOLE_DELAY_MS", &ms)?;
    }
    if let Some(catalog) = non_empty("LUMEN_CATALOG") {
        config.workspace.catalog = Some(PathBuf::from(catalog));
    }
    if let Some(model) = non_empty("LUMEN_MODEL") {
        config.assistant.model = model;
    }

    Ok(config)
}

fn parse_ms(var: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| LumenError::config(format!("{} must be milliseconds, got '{}'", var, value)))
}

/// Create a sample configuration file content
pub fn sample_config() -> &'static str {
    r#"# Lumen Configuration
# Place this file in your project root as .lumen.toml
# or in ~/.config/lumen/config.toml for global settings

[session]
# Follow-up latency in milliseconds (max 60000)
conversation_delay_ms = 1000
console_delay_ms = 100

# Bounded notification queue size
notification_capacity = 256

# Open the demo tabs and seed chat/console history
seed_demo_history = true

[assistant]
model = "Claude 3.5 Sonnet"
models = ["Claude 3.5 Sonnet", "GPT-4", "GPT-3.5 Turbo"]
agent = "Builder"
agents = ["Builder", "Validator"]
reply = "I understand your request. Let me analyze the code and provide suggestions."

[console]
echo_prefix = "Executing: "

[workspace]
# JSON or TOML catalog; the demo project is used when unset
# catalog = "${HOME}/project.catalog.json"
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = LumenConfig::default();
        assert_eq!(config.session.conversation_delay_ms, 1000);
        assert_eq!(config.session.console_delay_ms, 100);
        assert_eq!(config.assistant.model, "Claude 3.5 Sonnet");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sample_matches_defaults() {
        let config = parse_config(sample_config(), vars(&[])).unwrap();
        assert_eq!(config, LumenConfig::default());
    }

    #[test]
    fn test_defaults_round_trip_through_toml() {
        let text = LumenConfig::default().to_toml_string().unwrap();
        let back = parse_config(&text, vars(&[])).unwrap();
        assert_eq!(back, LumenConfig::default());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = parse_config("", vars(&[])).unwrap();
        assert_eq!(config, LumenConfig::default());
    }

    #[test]
    fn test_expand_env_var() {
        let regex = env_regex().unwrap();
        let lookup = vars(&[("TEST_VAR", "test_value")]);
        let result = expand_string("prefix_${TEST_VAR}_suffix", &regex, &lookup);
        assert_eq!(result, "prefix_test_value_suffix");
    }

    #[test]
    fn test_missing_env_var() {
        let regex = env_regex().unwrap();
        let result = expand_string("${NONEXISTENT_VAR}", &regex, &vars(&[]));
        assert_eq!(result, "${NONEXISTENT_VAR}");
    }

    #[test]
    fn test_catalog_path_is_expanded() {
        let text = r#"
[workspace]
catalog = "${PROJECTS}/demo.json"
"#;
        let config = parse_config(text, vars(&[("PROJECTS", "/srv/projects")])).unwrap();
        assert_eq!(
            config.workspace.catalog,
            Some(PathBuf::from("/srv/projects/demo.json"))
        );
    }

    #[test]
    fn test_env_overrides() {
        let lookup = vars(&[
            ("LUMEN_CONVERSATION_DELAY_MS", "250"),
            ("LUMEN_CONSOLE_DELAY_MS", " 5 "),
            ("LUMEN_MODEL", "GPT-4"),
            ("LUMEN_CATALOG", "tree.toml"),
        ]);
        let config = parse_config("", lookup).unwrap();
        assert_eq!(config.session.conversation_delay_ms, 250);
        assert_eq!(config.session.console_delay_ms, 5);
        assert_eq!(config.assistant.model, "GPT-4");
        assert_eq!(config.workspace.catalog, Some(PathBuf::from("tree.toml")));
    }

    #[test]
    fn test_bad_override_is_config_error() {
        let err = parse_config("", vars(&[("LUMEN_CONSOLE_DELAY_MS", "soon")])).unwrap_err();
        assert!(matches!(err, LumenError::Config(_)));
    }

    #[test]
    fn test_rejects_unknown_model() {
        let text = r#"
[assistant]
model = "Mystery-9"
"#;
        let err = parse_config(text, vars(&[])).unwrap_err();
        assert!(err.to_string().contains("Mystery-9"));
    }

    #[test]
    fn test_rejects_long_delay_and_zero_capacity() {
        let slow = "[session]\nconversation_delay_ms = 60001\n";
        assert!(parse_config(slow, vars(&[])).is_err());

        let tiny = "[session]\nnotification_capacity = 0\n";
        assert!(parse_config(tiny, vars(&[])).is_err());
    }

    #[test]
    fn test_load_prefers_project_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(PROJECT_CONFIG_FILE),
            "[session]\nconsole_delay_ms = 42\n",
        )
        .unwrap();

        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.session.console_delay_ms, 42);
    }
}
