use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use crate::{Config, Secret};

/// Ordered list of config file locations searched from lowest to highest
/// priority.  Later files override earlier ones.
fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // 1. System-wide default
    paths.push(PathBuf::from("/etc/jenq/config.toml"));

    // 2. XDG / home
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".config/jenq/config.toml"));
    }
    if let Some(cfg) = dirs::config_dir() {
        paths.push(cfg.join("jenq/config.toml"));
    }

    // 3. Workspace-local
    paths.push(PathBuf::from(".jenq/config.toml"));
    paths.push(PathBuf::from("jenq.toml"));

    paths
}

/// Load configuration by merging all discovered TOML files, then applying
/// environment overrides.  The `extra` argument may provide an explicit path
/// (e.g. `--config` CLI flag), which takes priority over everything on disk.
///
/// Credentials follow the usual Jenkins conventions: `JENKINS_URL`,
/// `JENKINS_USERNAME` and `JENKINS_TOKEN` override whatever the files say,
/// so tokens never need to live in a versioned config file.
pub fn load(extra: Option<&Path>) -> anyhow::Result<Config> {
    let mut merged = toml::Value::Table(toml::map::Map::new());

    for path in config_search_paths() {
        if path.is_file() {
            debug!(path = %path.display(), "loading config layer");
            merge_toml(&mut merged, read_layer(&path)?);
        }
    }

    if let Some(p) = extra {
        debug!(path = %p.display(), "loading explicit config");
        merge_toml(&mut merged, read_layer(p)?);
    }

    let mut config: Config = merged.try_into().unwrap_or_default();
    apply_env_overrides(&mut config);
    Ok(config)
}

fn read_layer(path: &Path) -> anyhow::Result<toml::Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Deep-merge `src` into `dst`; src wins on scalar conflicts.
fn merge_toml(dst: &mut toml::Value, src: toml::Value) {
    match (dst, src) {
        (toml::Value::Table(d), toml::Value::Table(s)) => {
            for (k, v) in s {
                let entry = d
                    .entry(k)
                    .or_insert(toml::Value::Table(toml::map::Map::new()));
                merge_toml(entry, v);
            }
        }
        (dst, src) => *dst = src,
    }
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(url) = std::env::var("JENKINS_URL") {
        if !url.is_empty() {
            config.jenkins.url = url;
        }
    }
    if let Ok(user) = std::env::var("JENKINS_USERNAME") {
        if !user.is_empty() {
            config.jenkins.username = user;
        }
    }
    if let Ok(token) = std::env::var("JENKINS_TOKEN") {
        if !token.is_empty() {
            config.jenkins.token = Secret::new(token);
        }
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn val(s: &str) -> toml::Value {
        toml::from_str(s).unwrap()
    }

    #[test]
    fn merge_scalar_src_wins() {
        let mut dst = val(r#"x = 1"#);
        let src = val(r#"x = 2"#);
        merge_toml(&mut dst, src);
        assert_eq!(dst["x"].as_integer(), Some(2));
    }

    #[test]
    fn merge_preserves_keys_not_in_src() {
        let mut dst = val("a = 1\nb = 2");
        let src = val("b = 99");
        merge_toml(&mut dst, src);
        assert_eq!(dst["a"].as_integer(), Some(1));
        assert_eq!(dst["b"].as_integer(), Some(99));
    }

    #[test]
    fn merge_nested_tables() {
        let mut dst = val(
            r#"[jenkins]
url = "http://a"
username = "u""#,
        );
        let src = val(
            r#"[jenkins]
url = "http://b""#,
        );
        merge_toml(&mut dst, src);
        assert_eq!(dst["jenkins"]["url"].as_str(), Some("http://b"));
        assert_eq!(dst["jenkins"]["username"].as_str(), Some("u"));
    }

    #[test]
    fn load_missing_explicit_path_is_an_error() {
        let result = load(Some(Path::new("/tmp/jenq_nonexistent_config_xyz.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn load_explicit_file_overrides_defaults() {
        use std::io::Write;
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            f,
            r#"[jenkins]
url = "https://ci.example.com"
username = "ci-bot"
token = "abc"

[log]
level = "debug""#
        )
        .unwrap();
        let cfg = load(Some(f.path())).unwrap();
        assert_eq!(cfg.jenkins.url, "https://ci.example.com");
        assert_eq!(cfg.jenkins.username, "ci-bot");
        assert_eq!(cfg.jenkins.token.expose(), "abc");
        assert_eq!(cfg.log.level, "debug");
    }
}
