use crate::error::{MaintenanceError, Result};
use crate::types::config::MaintenanceConfig;
use std::path::{Path, PathBuf};
use toml::{Table, Value};
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "maintcalc.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".maintcalc/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/maintcalc/config.toml";

/// Layers the global file, the project file (or `explicit` in its place) and
/// the local override, later layers winning.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<MaintenanceConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, explicit, global.as_deref())
}

pub(crate) fn load_config_with_global(
    root: &Path,
    explicit: Option<&Path>,
    global_path: Option<&Path>,
) -> Result<MaintenanceConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(MaintenanceError::ConfigNotFound(path.display().to_string()));
        }
    }

    let project = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.join(DEFAULT_CONFIG_FILE));
    let layers = [
        global_path.map(Path::to_path_buf),
        Some(project),
        Some(root.join(DEFAULT_LOCAL_FILE)),
    ];

    let mut merged = Table::new();
    for path in layers.iter().flatten().filter(|path| path.exists()) {
        debug!(path = %path.display(), "applying config layer");
        overlay_table(&mut merged, read_layer(path)?);
    }

    let cfg: MaintenanceConfig = Value::Table(merged)
        .try_into()
        .map_err(|e: toml::de::Error| MaintenanceError::ConfigParse(e.to_string()))?;
    cfg.validate()?;
    Ok(cfg)
}

fn read_layer(path: &Path) -> Result<Table> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str::<Table>(&content)
        .map_err(|e| MaintenanceError::ConfigParse(format!("{}: {}", path.display(), e)))
}

// Sections merge key by key; any other value in a later layer replaces the
// earlier one, arrays included.
fn overlay_table(base: &mut Table, layer: Table) {
    for (key, value) in layer {
        match value {
            Value::Table(incoming) => match base.get_mut(&key) {
                Some(Value::Table(section)) => overlay_table(section, incoming),
                _ => {
                    base.insert(key, Value::Table(incoming));
                }
            },
            other => {
                base.insert(key, other);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_config_falls_back_to_defaults_when_no_files() {
        let dir = TempDir::new().expect("temp dir should be created");
        let cfg = load_config_with_global(dir.path(), None, None).expect("load should not fail");
        assert_eq!(cfg.closed_form.low_rate, 0.06);
        assert_eq!(cfg.eligibility.max_age, 21);
    }

    #[test]
    fn load_config_merges_global_repo_and_local_in_order() {
        let root = TempDir::new().expect("root temp dir should be created");
        let global_root = TempDir::new().expect("global temp dir should be created");
        let global_path = global_root.path().join("config.toml");

        fs::write(
            &global_path,
            r#"
[closed_form]
low_rate = 0.05
low_floor = 100.0

[eligibility]
max_age = 18
"#,
        )
        .expect("global config should write");

        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[closed_form]
low_floor = 200.0

[point_estimate]
clamp = "fixed"
"#,
        )
        .expect("repo config should write");

        fs::create_dir_all(root.path().join(".maintcalc")).expect("local dir should create");
        fs::write(
            root.path().join(DEFAULT_LOCAL_FILE),
            r#"
[eligibility]
max_age = 21
"#,
        )
        .expect("local override should write");

        let cfg = load_config_with_global(root.path(), None, Some(&global_path))
            .expect("load should succeed");

        assert_eq!(cfg.closed_form.low_rate, 0.05);
        assert_eq!(cfg.closed_form.low_floor, 200.0);
        assert_eq!(cfg.closed_form.high_rate, 0.08);
        assert_eq!(cfg.eligibility.max_age, 21);
        assert_eq!(
            cfg.point_estimate.clamp,
            crate::types::config::ClampMode::Fixed
        );
    }

    #[test]
    fn explicit_path_replaces_repo_file() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            "[closed_form]\nhigh_rate = 0.10\n",
        )
        .expect("repo config should write");
        let explicit = root.path().join("custom.toml");
        fs::write(&explicit, "[closed_form]\nhigh_rate = 0.09\n").expect("custom should write");

        let cfg = load_config_with_global(root.path(), Some(&explicit), None)
            .expect("load should succeed");
        assert_eq!(cfg.closed_form.high_rate, 0.09);
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let root = TempDir::new().expect("root temp dir should be created");
        let missing = root.path().join("nope.toml");
        let err = load_config_with_global(root.path(), Some(&missing), None)
            .expect_err("load should fail");
        assert!(matches!(err, MaintenanceError::ConfigNotFound(_)));
    }

    #[test]
    fn invalid_merged_config_fails_validation() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            "[closed_form]\nlow_rate = 0.2\nhigh_rate = 0.1\n",
        )
        .expect("repo config should write");
        let err = load_config_with_global(root.path(), None, None).expect_err("load should fail");
        assert!(err.to_string().contains("low_rate cannot exceed"));
    }

    #[test]
    fn later_layer_replaces_arrays_whole() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            "[weights]\noverrides = [{ age = 2, weight = 1.4 }, { age = 3, weight = 1.3 }]\n",
        )
        .expect("repo config should write");
        fs::create_dir_all(root.path().join(".maintcalc")).expect("local dir should create");
        fs::write(
            root.path().join(DEFAULT_LOCAL_FILE),
            "[weights]\noverrides = [{ age = 3, weight = 1.1 }]\n",
        )
        .expect("local override should write");

        let cfg = load_config_with_global(root.path(), None, None).expect("load should succeed");
        assert_eq!(cfg.weights.overrides.len(), 1);
        assert_eq!(cfg.weights.overrides[0].weight, 1.1);
        assert_eq!(cfg.weights.brackets.len(), 3);
    }

    #[test]
    fn malformed_toml_reports_path() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(root.path().join(DEFAULT_CONFIG_FILE), "[closed_form\n")
            .expect("repo config should write");
        let err = load_config_with_global(root.path(), None, None).expect_err("load should fail");
        assert!(err.to_string().contains(DEFAULT_CONFIG_FILE));
    }
}
