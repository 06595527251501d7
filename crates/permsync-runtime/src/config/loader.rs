//! Layered configuration loading.
//!
//! Layers are applied in order, each one overriding the last:
//!
//! | Layer     | Source                                  |
//! |-----------|-----------------------------------------|
//! | defaults  | [`PermsyncConfig::default`]             |
//! | global    | `~/.permsync/config.toml` or `--config` |
//! | project   | `<project>/.permsync/config.toml`       |
//! | env       | `PERMSYNC_*`                            |

use super::{
    default_config_path, ConfigError, PermsyncConfig, PROJECT_CONFIG_DIR, PROJECT_CONFIG_FILE,
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A configuration source that can be skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Global,
    Project,
    Env,
}

impl Layer {
    fn as_str(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Project => "project",
            Self::Env => "env",
        }
    }
}

/// Environment variables that overwrite a string field verbatim.
type StringField = fn(&mut PermsyncConfig) -> &mut String;

const ENV_STRINGS: &[(&str, StringField)] = &[
    ("PERMSYNC_ORIGIN", |c| &mut c.storage.origin),
    ("PERMSYNC_DRIVE_ID", |c| &mut c.storage.drive_id),
    ("PERMSYNC_API_VERSION", |c| &mut c.storage.api_version),
    ("PERMSYNC_TOKEN_ENV", |c| &mut c.auth.token_env),
    ("PERMSYNC_LOG_LEVEL", |c| &mut c.logging.level),
];

/// Builds a [`PermsyncConfig`] from files and the environment.
///
/// ```no_run
/// use permsync_runtime::config::ConfigLoader;
///
/// # fn main() -> Result<(), permsync_runtime::config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_project_root("/srv/sync")
///     .skip_env_vars()
///     .load()?;
/// # let _ = config;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    global_config_path: Option<PathBuf>,
    project_root: Option<PathBuf>,
    skipped: Vec<Layer>,
}

impl ConfigLoader {
    /// Creates a loader reading every layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the global layer from `path` instead of `~/.permsync/config.toml`.
    #[must_use]
    pub fn with_global_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.global_config_path = Some(path.into());
        self
    }

    /// Directory whose `.permsync/config.toml` forms the project layer.
    /// Without it the project layer is empty.
    #[must_use]
    pub fn with_project_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_root = Some(path.into());
        self
    }

    #[must_use]
    pub fn skip_env_vars(self) -> Self {
        self.skip(Layer::Env)
    }

    #[must_use]
    pub fn skip_global_config(self) -> Self {
        self.skip(Layer::Global)
    }

    #[must_use]
    pub fn skip_project_config(self) -> Self {
        self.skip(Layer::Project)
    }

    fn skip(mut self, layer: Layer) -> Self {
        if !self.skipped.contains(&layer) {
            self.skipped.push(layer);
        }
        self
    }

    fn reads(&self, layer: Layer) -> bool {
        !self.skipped.contains(&layer)
    }

    /// File layers in merge order.
    fn file_layers(&self) -> Vec<(Layer, PathBuf)> {
        let mut layers = Vec::with_capacity(2);
        if self.reads(Layer::Global) {
            let path = self
                .global_config_path
                .clone()
                .unwrap_or_else(default_config_path);
            layers.push((Layer::Global, path));
        }
        if let (true, Some(root)) = (self.reads(Layer::Project), &self.project_root) {
            layers.push((
                Layer::Project,
                root.join(PROJECT_CONFIG_DIR).join(PROJECT_CONFIG_FILE),
            ));
        }
        layers
    }

    /// Merges every enabled layer over the defaults.
    ///
    /// Files are overlaid key by key: a key a file sets wins over lower
    /// layers even when it spells out the default value.
    ///
    /// # Errors
    ///
    /// A config file that exists but cannot be read or parsed, or a
    /// `PERMSYNC_*` variable with an unusable value. Absent files are
    /// skipped.
    pub fn load(&self) -> Result<PermsyncConfig, ConfigError> {
        let mut merged = toml::Table::new();
        let mut last_file = None;

        for (layer, path) in self.file_layers() {
            if let Some(table) = read_layer(&path)? {
                debug!(
                    layer = layer.as_str(),
                    path = %path.display(),
                    keys = table.len(),
                    "Loaded config file"
                );
                overlay(&mut merged, table);
                last_file = Some(path);
            }
        }

        let mut config = PermsyncConfig::from_table(merged)
            .map_err(|e| ConfigError::parse_toml(last_file.unwrap_or_default(), e))?;

        if self.reads(Layer::Env) {
            apply_env_vars(&mut config, |name| std::env::var(name).ok())?;
        }

        Ok(config)
    }
}

/// Reads one config file as the keys it sets.
///
/// The file is also checked against the schema on its own, so a type
/// error names the file that caused it.
fn read_layer(path: &Path) -> Result<Option<toml::Table>, ConfigError> {
    if !path.is_file() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let table: toml::Table =
        toml::from_str(&text).map_err(|e| ConfigError::parse_toml(path, e))?;
    PermsyncConfig::from_table(table.clone()).map_err(|e| ConfigError::parse_toml(path, e))?;
    Ok(Some(table))
}

/// Writes every key of `layer` into `base`, descending into tables.
fn overlay(base: &mut toml::Table, layer: toml::Table) {
    for (key, value) in layer {
        match value {
            toml::Value::Table(section) => match base.get_mut(&key) {
                Some(toml::Value::Table(existing)) => overlay(existing, section),
                _ => {
                    base.insert(key, toml::Value::Table(section));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
}

/// Applies `PERMSYNC_*` overrides looked up through `lookup`.
fn apply_env_vars(
    config: &mut PermsyncConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    for &(name, field) in ENV_STRINGS {
        if let Some(value) = lookup(name) {
            *field(config) = value;
        }
    }

    if let Some(value) = lookup("PERMSYNC_DEBUG") {
        config.debug = parse_flag(&value)
            .ok_or_else(|| ConfigError::invalid_env_var("PERMSYNC_DEBUG", "expected bool"))?;
    }

    if let Some(value) = lookup("PERMSYNC_TIMEOUT_SECS") {
        config.http.timeout_secs = value.trim().parse().map_err(|_| {
            ConfigError::invalid_env_var("PERMSYNC_TIMEOUT_SECS", "expected integer seconds")
        })?;
    }

    Ok(())
}

/// `true/false`, `1/0`, `yes/no`, `on/off`, any case.
fn parse_flag(value: &str) -> Option<bool> {
    const TRUE: [&str; 4] = ["true", "1", "yes", "on"];
    const FALSE: [&str; 4] = ["false", "0", "no", "off"];

    let value = value.trim();
    if TRUE.iter().any(|t| value.eq_ignore_ascii_case(t)) {
        Some(true)
    } else if FALSE.iter().any(|f| value.eq_ignore_ascii_case(f)) {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MissingItemPolicy, DEFAULT_ORIGIN};
    use std::collections::HashMap;
    use tempfile::TempDir;

    /// A temp home with an optional global file and a project root.
    struct Layout {
        dir: TempDir,
    }

    impl Layout {
        fn new() -> Self {
            Self {
                dir: TempDir::new().unwrap(),
            }
        }

        fn global(&self, toml: &str) -> PathBuf {
            let path = self.dir.path().join("global.toml");
            std::fs::write(&path, toml).unwrap();
            path
        }

        fn project(&self, toml: &str) -> PathBuf {
            let root = self.dir.path().join("project");
            let config_dir = root.join(PROJECT_CONFIG_DIR);
            std::fs::create_dir_all(&config_dir).unwrap();
            std::fs::write(config_dir.join(PROJECT_CONFIG_FILE), toml).unwrap();
            root
        }
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn every_layer_skipped_gives_defaults() {
        let config = ConfigLoader::new()
            .skip_global_config()
            .skip_project_config()
            .skip_env_vars()
            .load()
            .unwrap();

        assert_eq!(config, PermsyncConfig::default());
    }

    #[test]
    fn global_file_is_read() {
        let layout = Layout::new();
        let global = layout.global("debug = true\n[storage]\ndrive_id = \"b!global\"\n");

        let config = ConfigLoader::new()
            .with_global_config(&global)
            .skip_env_vars()
            .load()
            .unwrap();

        assert!(config.debug);
        assert_eq!(config.storage.drive_id, "b!global");
    }

    #[test]
    fn project_wins_over_global_field_by_field() {
        let layout = Layout::new();
        let global = layout.global(
            r#"
[storage]
drive_id = "b!global"

[http]
timeout_secs = 5
"#,
        );
        let root = layout.project(
            r#"
[storage]
drive_id = "b!project"

[reconcile]
missing_item = "treat_as_empty"
"#,
        );

        let config = ConfigLoader::new()
            .with_global_config(&global)
            .with_project_root(&root)
            .skip_env_vars()
            .load()
            .unwrap();

        assert_eq!(config.storage.drive_id, "b!project");
        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.reconcile.missing_item, MissingItemPolicy::TreatAsEmpty);
    }

    #[test]
    fn project_can_restore_default_values() {
        let layout = Layout::new();
        let global = layout.global(
            r#"
debug = true

[storage]
origin = "http://127.0.0.1:8080"
drive_id = "b!global"

[reconcile]
missing_item = "treat_as_empty"
"#,
        );
        let root = layout.project(
            r#"
debug = false

[storage]
origin = "https://graph.microsoft.com"

[reconcile]
missing_item = "fail"
"#,
        );

        let config = ConfigLoader::new()
            .with_global_config(&global)
            .with_project_root(&root)
            .skip_env_vars()
            .load()
            .unwrap();

        assert!(!config.debug);
        assert_eq!(config.storage.origin, DEFAULT_ORIGIN);
        assert_eq!(config.storage.drive_id, "b!global");
        assert_eq!(config.reconcile.missing_item, MissingItemPolicy::Fail);
    }

    #[test]
    fn schema_error_names_the_offending_file() {
        let layout = Layout::new();
        let global = layout.global("[http]\ntimeout_secs = \"soon\"\n");

        let err = ConfigLoader::new()
            .with_global_config(&global)
            .skip_env_vars()
            .load()
            .unwrap_err();

        assert!(matches!(err, ConfigError::ParseToml { .. }), "got: {err}");
        assert!(err.to_string().contains("global.toml"), "got: {err}");
    }

    #[test]
    fn overlay_descends_into_sections() {
        let mut base: toml::Table =
            toml::from_str("[storage]\norigin = \"a\"\ndrive_id = \"d\"").unwrap();
        let layer: toml::Table = toml::from_str("[storage]\norigin = \"b\"").unwrap();

        overlay(&mut base, layer);

        assert_eq!(base["storage"]["origin"].as_str(), Some("b"));
        assert_eq!(base["storage"]["drive_id"].as_str(), Some("d"));
    }

    #[test]
    fn skipped_project_layer_is_not_read() {
        let layout = Layout::new();
        let root = layout.project("[storage\n");

        let config = ConfigLoader::new()
            .with_project_root(&root)
            .skip_global_config()
            .skip_project_config()
            .skip_env_vars()
            .load()
            .unwrap();

        assert_eq!(config, PermsyncConfig::default());
    }

    #[test]
    fn absent_files_are_ignored() {
        let config = ConfigLoader::new()
            .with_global_config("/nonexistent/permsync/config.toml")
            .with_project_root("/nonexistent/project")
            .skip_env_vars()
            .load()
            .unwrap();

        assert_eq!(config, PermsyncConfig::default());
    }

    #[test]
    fn broken_toml_names_the_file() {
        let layout = Layout::new();
        let global = layout.global("[storage\ndrive_id = ");

        let err = ConfigLoader::new()
            .with_global_config(&global)
            .skip_env_vars()
            .load()
            .unwrap_err();

        assert!(matches!(err, ConfigError::ParseToml { .. }), "got: {err}");
        assert!(err.to_string().contains("global.toml"), "got: {err}");
    }

    #[test]
    fn env_overrides_string_and_typed_fields() {
        let mut config = PermsyncConfig::default();
        config.storage.drive_id = "from-file".into();

        apply_env_vars(
            &mut config,
            env(&[
                ("PERMSYNC_DRIVE_ID", "from-env"),
                ("PERMSYNC_ORIGIN", "http://127.0.0.1:8080"),
                ("PERMSYNC_API_VERSION", "beta"),
                ("PERMSYNC_TOKEN_ENV", "GRAPH_TOKEN"),
                ("PERMSYNC_LOG_LEVEL", "info"),
                ("PERMSYNC_TIMEOUT_SECS", " 7 "),
                ("PERMSYNC_DEBUG", "Yes"),
            ]),
        )
        .unwrap();

        assert_eq!(config.storage.drive_id, "from-env");
        assert_eq!(config.storage.origin, "http://127.0.0.1:8080");
        assert_eq!(config.storage.api_version, "beta");
        assert_eq!(config.auth.token_env, "GRAPH_TOKEN");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.http.timeout_secs, 7);
        assert!(config.debug);
    }

    #[test]
    fn env_rejects_unparsable_values() {
        let mut config = PermsyncConfig::default();

        let err = apply_env_vars(&mut config, env(&[("PERMSYNC_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar { .. }));
        assert!(err.to_string().contains("PERMSYNC_TIMEOUT_SECS"));

        let err = apply_env_vars(&mut config, env(&[("PERMSYNC_DEBUG", "maybe")])).unwrap_err();
        assert!(err.to_string().contains("expected bool"));
    }

    #[test]
    fn flag_spellings() {
        for yes in ["true", "TRUE", "1", "on", "Yes"] {
            assert_eq!(parse_flag(yes), Some(true), "{yes}");
        }
        for no in ["false", "0", "OFF", "no"] {
            assert_eq!(parse_flag(no), Some(false), "{no}");
        }
        assert_eq!(parse_flag("maybe"), None);
    }
}
