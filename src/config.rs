use serde::{Deserialize, Serialize};

use std::{env, fs, path::Path, path::PathBuf};

const ENV_PREFIX: &str = "NOTES_";
const CONFIG_PATH_VAR: &str = "NOTES_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Port of the local REST server; unused under Lambda
    #[serde(default = "default_port")]
    pub port: u16,
    /// JSON file with the notes to serve instead of the built-in samples
    #[serde(default)]
    pub data_file: Option<PathBuf>,
}

const fn default_port() -> u16 {
    8000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            data_file: None,
        }
    }
}

fn parse_file(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    serde_yaml::from_str(&contents).map_err(Into::into)
}

fn load_from_env<I>(vars: I) -> Result<Config, envy::Error>
where
    I: IntoIterator<Item = (String, String)>,
{
    envy::prefixed(ENV_PREFIX).from_iter(vars)
}

pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    load_config_from(Path::new("."), env::vars())
}

/// Resolves config file names relative to `dir` and falls back to `vars`
/// when none of them exist.
fn load_config_from<I>(dir: &Path, vars: I) -> Result<Config, Box<dyn std::error::Error>>
where
    I: IntoIterator<Item = (String, String)>,
{
    let vars: Vec<(String, String)> = vars.into_iter().collect();

    // Retrieve env variable
    let config_path = vars
        .iter()
        .find(|(key, _)| key == CONFIG_PATH_VAR)
        .map_or_else(|| "config.yaml".to_string(), |(_, value)| value.clone());

    // Try env path
    let path = dir.join(&config_path);
    if path.exists() {
        return parse_file(&path);
    }

    // Fallback to config.yaml
    let path = dir.join("config.yaml");
    if path.exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to 'config.yaml'",
            config_path
        );
        return parse_file(&path);
    }

    // Fallback to config.example.yaml
    let path = dir.join("config.example.yaml");
    if path.exists() {
        tracing::warn!(
            "Config file '{}' and 'config.yaml' not found, falling back to 'config.example.yaml'",
            config_path
        );
        return parse_file(&path);
    }

    // Fallback to environment variables, missing ones take defaults
    tracing::info!("No config file found, loading configuration from environment variables");
    load_from_env(vars).map_err(|e| {
        format!(
            "Config file not found and environment variables are invalid. \
             Tried: '{config_path}', 'config.yaml', 'config.example.yaml'. Error: {e}"
        )
        .into()
    })
}
