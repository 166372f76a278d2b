//! GitHub Actions workflow placeholder substitution.

use crate::error::Result;
use crate::onboarding::ProjectPlan;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

pub const WORKFLOWS_DIR: &str = ".github/workflows";

pub const SERVICE_NAME_PLACEHOLDER: &str = "YOUR_SERVICE_NAME_PLACEHOLDER";
pub const AWS_REGION_PLACEHOLDER: &str = "YOUR_AWS_REGION_PLACEHOLDER";
pub const AWS_ROLE_ARN_PLACEHOLDER: &str = "YOUR_AWS_ROLE_ARN_PLACEHOLDER";
pub const ECR_REPO_NAME_PLACEHOLDER: &str = "YOUR_ECR_REPO_NAME_PLACEHOLDER";

const AWS_TODO: &str =
    "# TODO: Configure AWS credentials (region, role ARN or secrets) - see todo.md\n";
const ECR_TODO: &str = "# TODO: Configure ECR repository name - see todo.md\n";

/// Apply the plan's values to one workflow document.
///
/// Placeholders without a value are left in place. A TODO banner is
/// prepended only when the operator said they have no credentials or no
/// ECR repository at all.
pub fn rewrite_workflow(content: &str, plan: &ProjectPlan) -> String {
    let mut rewritten = content.replace(SERVICE_NAME_PLACEHOLDER, &plan.service_name);

    if let Some((region, role_arn)) = plan.aws_credentials() {
        rewritten = rewritten
            .replace(AWS_REGION_PLACEHOLDER, region)
            .replace(AWS_ROLE_ARN_PLACEHOLDER, role_arn);
    } else if !plan.has_aws_credentials {
        rewritten.insert_str(0, AWS_TODO);
    }

    if let Some(repo) = plan.ecr_repo() {
        rewritten = rewritten.replace(ECR_REPO_NAME_PLACEHOLDER, repo);
    } else if !plan.has_ecr_details {
        rewritten.insert_str(0, ECR_TODO);
    }

    rewritten
}

/// Workflow files (`.yml`/`.yaml`) in the project, sorted by name.
///
/// Returns `None` when the project has no workflows directory.
pub fn workflow_files(project_dir: &Utf8Path) -> Result<Option<Vec<Utf8PathBuf>>> {
    let dir = project_dir.join(WORKFLOWS_DIR);
    if !dir.is_dir() {
        return Ok(None);
    }

    let mut files = Vec::new();
    for entry in dir.read_dir_utf8()? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && matches!(path.extension(), Some("yml" | "yaml")) {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(Some(files))
}

/// Rewrite every workflow file in place, returning the files touched
pub fn rewrite_workflows(
    project_dir: &Utf8Path,
    plan: &ProjectPlan,
) -> Result<Option<Vec<Utf8PathBuf>>> {
    let Some(files) = workflow_files(project_dir)? else {
        return Ok(None);
    };

    for file in &files {
        let content = std::fs::read_to_string(file)?;
        std::fs::write(file, rewrite_workflow(&content, plan))?;
        debug!("Rewrote workflow {}", file);
    }

    Ok(Some(files))
}
