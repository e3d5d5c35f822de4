use anyhow::{Context, Result};
use fs_err as fs;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub transcript_root: String,
    pub out_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: "https://generativelanguage.googleapis.com".into(),
            model: "gemini-1.5-pro".into(),
            temperature: 0.3,
            timeout_secs: 120,
            transcript_root: ".".into(),
            out_file: "policy_memo.md".into(),
        }
    }
}

/// Defaults, overlaid with a TOML file when one is given. Partial files are
/// fine; absent keys keep their defaults.
pub fn load(path: Option<&str>) -> Result<Config> {
    match path {
        None => Ok(Config::default()),
        Some(p) => {
            let raw = fs::read_to_string(p)?;
            toml::from_str(&raw).with_context(|| format!("parsing config file {p}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_toml_keeps_defaults_for_the_rest() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "model = \"gemini-1.5-flash\"\ntemperature = 0.7").unwrap();

        let cfg = load(file.path().to_str()).unwrap();
        assert_eq!(cfg.model, "gemini-1.5-flash");
        assert_eq!(cfg.temperature, 0.7);
        assert_eq!(cfg.out_file, "policy_memo.md");
        assert_eq!(cfg.api_base, "https://generativelanguage.googleapis.com");
    }

    #[test]
    fn no_path_means_defaults() {
        let cfg = load(None).unwrap();
        assert_eq!(cfg.model, "gemini-1.5-pro");
        assert_eq!(cfg.timeout_secs, 120);
    }
}
