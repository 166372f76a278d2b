//! package.json patching

use crate::error::Result;
use camino::Utf8Path;
use serde_json::Value;
use tracing::{debug, warn};

pub const PACKAGE_JSON: &str = "package.json";

/// Set the `name` field of the project's package.json.
///
/// Other fields and their order are left untouched. Returns `false` when
/// the project has no package.json.
pub fn set_package_name(project_dir: &Utf8Path, name: &str) -> Result<bool> {
    let path = project_dir.join(PACKAGE_JSON);
    if !path.is_file() {
        warn!("No {} found in {}", PACKAGE_JSON, project_dir);
        return Ok(false);
    }

    let content = std::fs::read_to_string(&path)?;
    let patched = patch_package_name(&content, name)?;
    std::fs::write(&path, patched)?;

    debug!("Set package name to {}", name);
    Ok(true)
}

/// Rewrite the `name` field of a package.json document
pub fn patch_package_name(content: &str, name: &str) -> Result<String> {
    let mut manifest: Value = serde_json::from_str(content)?;
    if let Value::Object(fields) = &mut manifest {
        fields.insert("name".to_string(), Value::String(name.to_string()));
    }

    let mut rendered = serde_json::to_string_pretty(&manifest)?;
    rendered.push('\n');
    Ok(rendered)
}
