use crate::error::{ConsoleError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// File locations
// ---------------------------------------------------------------------------

pub const LOCAL_CONFIG_FILE: &str = "attendance-admin.yaml";
pub const USER_CONFIG_DIR: &str = ".config/attendance-admin";
pub const USER_CONFIG_FILE: &str = "config.yaml";

/// `~/.config/attendance-admin/config.yaml`
pub fn user_config_path() -> Result<PathBuf> {
    let home = home::home_dir().ok_or(ConsoleError::HomeNotFound)?;
    Ok(home.join(USER_CONFIG_DIR).join(USER_CONFIG_FILE))
}

/// Resolve which config file to read.
///
/// Priority:
/// 1. `--config` flag / `ATTENDANCE_CONFIG` env var (passed in as `explicit`)
/// 2. `attendance-admin.yaml` in `cwd`
/// 3. `~/.config/attendance-admin/config.yaml`
///
/// Returns `None` when no file exists; callers fall back to defaults.
pub fn resolve_config_path(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.to_path_buf());
    }

    let local = cwd.join(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    user_config_path().ok().filter(|p| p.is_file())
}

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// ConsoleConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Scheme, host and port of the attendance backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path prefix shared by every admin endpoint.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_dismiss_after")]
    pub notification_dismiss_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_api_base() -> String {
    "/api/admin/system".to_string()
}

fn default_request_timeout() -> u64 {
    15
}

fn default_dismiss_after() -> u64 {
    5
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_base: default_api_base(),
            request_timeout_secs: default_request_timeout(),
            notification_dismiss_secs: default_dismiss_after(),
        }
    }
}

impl ConsoleConfig {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConsoleError::ConfigNotFound(path.display().to_string()));
        }
        let data = std::fs::read_to_string(path)?;
        let cfg: ConsoleConfig = serde_yaml::from_str(&data)?;
        tracing::info!(path = %path.display(), base_url = %cfg.base_url, "loaded config");
        Ok(cfg)
    }

    /// Load `path` if given, otherwise return the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn dismiss_after(&self) -> Duration {
        Duration::from_secs(self.notification_dismiss_secs)
    }

    /// Absolute URL for an endpoint path such as `/teacher/remove`.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.api_base.trim_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "base_url '{}' must start with http:// or https://",
                    self.base_url
                ),
            });
        }

        if !self.api_base.starts_with('/') {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!("api_base '{}' should start with '/'", self.api_base),
            });
        }

        if self.request_timeout_secs == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "request_timeout_secs must be greater than 0".to_string(),
            });
        } else if self.request_timeout_secs > 120 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "request_timeout_secs={} (>120 is unusual)",
                    self.request_timeout_secs
                ),
            });
        }

        if self.notification_dismiss_secs == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "notification_dismiss_secs=0 hides notifications immediately"
                    .to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_backend() {
        let cfg = ConsoleConfig::default();
        assert_eq!(cfg.base_url, "http://localhost:5000");
        assert_eq!(cfg.api_base, "/api/admin/system");
        assert_eq!(cfg.request_timeout(), Duration::from_secs(15));
        assert_eq!(cfg.dismiss_after(), Duration::from_secs(5));
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let cfg: ConsoleConfig = serde_yaml::from_str("base_url: https://school.example\n").unwrap();
        assert_eq!(cfg.base_url, "https://school.example");
        assert_eq!(cfg.api_base, "/api/admin/system");
        assert_eq!(cfg.request_timeout_secs, 15);
    }

    #[test]
    fn endpoint_url_joins_without_double_slashes() {
        let cfg = ConsoleConfig {
            base_url: "http://127.0.0.1:8080/".into(),
            api_base: "/api/admin/system/".into(),
            ..Default::default()
        };
        assert_eq!(
            cfg.endpoint_url("/teacher/remove"),
            "http://127.0.0.1:8080/api/admin/system/teacher/remove"
        );
    }

    #[test]
    fn load_reads_yaml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(LOCAL_CONFIG_FILE);
        std::fs::write(&path, "request_timeout_secs: 30\nnotification_dismiss_secs: 8\n").unwrap();
        let cfg = ConsoleConfig::load(&path).unwrap();
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.notification_dismiss_secs, 8);
    }

    #[test]
    fn load_missing_file_errors() {
        let dir = TempDir::new().unwrap();
        let err = ConsoleConfig::load(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, ConsoleError::ConfigNotFound(_)));
    }

    #[test]
    fn explicit_path_wins() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(LOCAL_CONFIG_FILE), "").unwrap();
        let explicit = dir.path().join("custom.yaml");
        let resolved = resolve_config_path(Some(&explicit), dir.path());
        assert_eq!(resolved, Some(explicit));
    }

    #[test]
    fn local_file_found_in_cwd() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(LOCAL_CONFIG_FILE), "").unwrap();
        let resolved = resolve_config_path(None, dir.path());
        assert_eq!(resolved, Some(dir.path().join(LOCAL_CONFIG_FILE)));
    }

    #[test]
    fn validate_default_config_no_warnings() {
        assert!(ConsoleConfig::default().validate().is_empty());
    }

    #[test]
    fn validate_rejects_bad_scheme_and_zero_timeout() {
        let cfg = ConsoleConfig {
            base_url: "localhost:5000".into(),
            request_timeout_secs: 0,
            ..Default::default()
        };
        let warnings = cfg.validate();
        assert_eq!(
            warnings.iter().filter(|w| w.level == WarnLevel::Error).count(),
            2
        );
    }

    #[test]
    fn validate_warns_on_long_timeout() {
        let cfg = ConsoleConfig {
            request_timeout_secs: 600,
            ..Default::default()
        };
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, WarnLevel::Warning);
        assert!(warnings[0].message.contains("600"));
    }
}
