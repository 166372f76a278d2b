//! LCS configuration setup.
//!
//! Templates that ship `setup.sh`, `setup.js` and `.lcsconf.schema.json`
//! are configured through schema-derived prompts. The answers are written
//! to `.lcsconf.json` and the template's own `pnpm setup` script is run.

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use lcs_core::{ConfigObject, SchemaNode};
use tokio::process::Command;
use tracing::{debug, info};

pub const SETUP_SH: &str = "setup.sh";
pub const SETUP_JS: &str = "setup.js";
pub const SCHEMA_FILE: &str = ".lcsconf.schema.json";
pub const CONFIG_FILE: &str = ".lcsconf.json";

const SETUP_FILES: [&str; 3] = [SETUP_SH, SETUP_JS, SCHEMA_FILE];

/// Which setup files a template provides
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupDetection {
    /// All three setup files are present
    Complete,
    /// Some, but not all, setup files are present
    Partial { found: Vec<&'static str> },
    /// No setup files
    Absent,
}

/// Inspect a template directory for LCS setup files
pub fn detect_setup(template_dir: &Utf8Path) -> SetupDetection {
    let found: Vec<&'static str> = SETUP_FILES
        .into_iter()
        .filter(|name| template_dir.join(name).is_file())
        .collect();

    debug!("Setup files found in {}: {:?}", template_dir, found);
    match found.len() {
        0 => SetupDetection::Absent,
        n if n == SETUP_FILES.len() => SetupDetection::Complete,
        _ => SetupDetection::Partial { found },
    }
}

/// Copy the setup files into the project
pub fn install_setup_files(template_dir: &Utf8Path, project_dir: &Utf8Path) -> Result<()> {
    for name in SETUP_FILES {
        std::fs::copy(template_dir.join(name), project_dir.join(name))?;
    }
    Ok(())
}

/// Parse the template's configuration schema
pub fn load_schema(template_dir: &Utf8Path) -> Result<SchemaNode> {
    Ok(SchemaNode::from_file(template_dir.join(SCHEMA_FILE))?)
}

/// Render a configuration object the way `.lcsconf.json` is stored:
/// two-space indentation, schema key order, trailing newline
pub fn render_config(config: &ConfigObject) -> Result<String> {
    let mut rendered = serde_json::to_string_pretty(config)?;
    rendered.push('\n');
    Ok(rendered)
}

/// Write `.lcsconf.json` into the project
pub fn write_config(project_dir: &Utf8Path, config: &ConfigObject) -> Result<Utf8PathBuf> {
    let path = project_dir.join(CONFIG_FILE);
    std::fs::write(&path, render_config(config)?)?;
    info!("Wrote {}", path);
    Ok(path)
}

/// Run the template's `pnpm setup` script inside the project
pub async fn run_template_setup(project_dir: &Utf8Path) -> Result<()> {
    which::which("pnpm").map_err(|_| Error::command_not_found("pnpm"))?;

    debug!("Running: pnpm setup in {}", project_dir);
    let status = Command::new("pnpm")
        .arg("setup")
        .current_dir(project_dir)
        .status()
        .await?;

    if !status.success() {
        return Err(Error::command_failed(
            "pnpm setup",
            status.code().unwrap_or(-1),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn temp_dir() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_detect_setup() {
        let (_guard, dir) = temp_dir();
        assert_eq!(detect_setup(&dir), SetupDetection::Absent);

        std::fs::write(dir.join(SETUP_SH), "#!/bin/sh\n").unwrap();
        assert_eq!(
            detect_setup(&dir),
            SetupDetection::Partial {
                found: vec![SETUP_SH]
            }
        );

        std::fs::write(dir.join(SETUP_JS), "").unwrap();
        std::fs::write(dir.join(SCHEMA_FILE), "{}").unwrap();
        assert_eq!(detect_setup(&dir), SetupDetection::Complete);
    }

    #[test]
    fn test_render_config_format() {
        let mut config = ConfigObject::new();
        config.insert("serviceName".into(), json!("svc"));
        config.insert("aws".into(), json!({ "region": "eu-west-1" }));

        assert_eq!(
            render_config(&config).unwrap(),
            "{\n  \"serviceName\": \"svc\",\n  \"aws\": {\n    \"region\": \"eu-west-1\"\n  }\n}\n"
        );
    }

    #[test]
    fn test_install_and_load_schema() {
        let (_t, template) = temp_dir();
        let (_p, project) = temp_dir();
        std::fs::write(template.join(SETUP_SH), "").unwrap();
        std::fs::write(template.join(SETUP_JS), "").unwrap();
        std::fs::write(
            template.join(SCHEMA_FILE),
            r#"{"properties":{"name":{"type":"string"}}}"#,
        )
        .unwrap();

        install_setup_files(&template, &project).unwrap();
        assert!(project.join(SCHEMA_FILE).is_file());

        let schema = load_schema(&project).unwrap();
        assert_eq!(schema.leaf_count(), 1);
    }
}
