use anyhow::Context;
use attendance_core::config::{resolve_config_path, ConsoleConfig};
use std::path::{Path, PathBuf};

/// Build the effective config.
///
/// Priority for each setting: command-line flag / env var, then the config
/// file found by [`resolve_config_path`], then built-in defaults.
pub fn load_config(
    explicit: Option<&Path>,
    base_url: Option<String>,
    timeout: Option<u64>,
) -> anyhow::Result<ConsoleConfig> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let path = resolve_config_path(explicit, &cwd);
    let mut config = ConsoleConfig::load_or_default(path.as_deref())
        .with_context(|| match &path {
            Some(p) => format!("failed to load config from {}", p.display()),
            None => "failed to load config".to_string(),
        })?;

    if let Some(url) = base_url {
        config.base_url = url;
    }
    if let Some(secs) = timeout {
        config.request_timeout_secs = secs;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn flags_override_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("console.yaml");
        std::fs::write(
            &path,
            "base_url: http://file.example\nrequest_timeout_secs: 20\n",
        )
        .unwrap();

        let cfg = load_config(Some(&path), Some("http://flag.example".into()), None).unwrap();
        assert_eq!(cfg.base_url, "http://flag.example");
        assert_eq!(cfg.request_timeout_secs, 20);

        let cfg = load_config(Some(&path), None, Some(3)).unwrap();
        assert_eq!(cfg.base_url, "http://file.example");
        assert_eq!(cfg.request_timeout_secs, 3);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = load_config(Some(&dir.path().join("nope.yaml")), None, None).unwrap_err();
        assert!(format!("{err:#}").contains("config file not found"));
    }
}
