//! README.md and todo.md generation for the new project
//!
//! Both documents are Tera templates embedded at compile time.

use crate::copy::PreservedDocs;
use crate::error::Result;
use crate::onboarding::ProjectPlan;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use tera::{Context, Tera};
use tracing::debug;

pub const README_FILE: &str = "README.md";
pub const TODO_FILE: &str = "todo.md";

const NOT_PROVIDED: &str = "not provided";

/// Template context shared by both documents
#[derive(Debug, Serialize)]
struct DocsContext<'a> {
    service_name: &'a str,
    project_dir: &'a str,
    has_original_readme: bool,
    has_original_todo: bool,
    has_aws_credentials: bool,
    aws_region: &'a str,
    aws_role_arn: &'a str,
    has_ecr_details: bool,
    ecr_repo_name: &'a str,
}

impl<'a> DocsContext<'a> {
    fn new(plan: &'a ProjectPlan, preserved: PreservedDocs) -> Self {
        Self {
            service_name: &plan.service_name,
            project_dir: &plan.project_dir,
            has_original_readme: preserved.readme,
            has_original_todo: preserved.todo,
            has_aws_credentials: plan.has_aws_credentials,
            aws_region: plan.aws_region.as_deref().unwrap_or(NOT_PROVIDED),
            aws_role_arn: plan.aws_role_arn.as_deref().unwrap_or(NOT_PROVIDED),
            has_ecr_details: plan.has_ecr_details,
            ecr_repo_name: plan.ecr_repo_name.as_deref().unwrap_or(NOT_PROVIDED),
        }
    }

    fn to_tera_context(&self) -> Result<Context> {
        Ok(Context::from_serialize(self)?)
    }
}

/// Whether the project gets a generated todo.md
pub fn needs_todo(plan: &ProjectPlan, preserved: PreservedDocs) -> bool {
    !plan.has_aws_credentials || !plan.has_ecr_details || preserved.todo
}

/// Template registry for the generated project documents
pub struct DocsRegistry {
    tera: Tera,
}

impl DocsRegistry {
    /// Create a registry with the embedded templates
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (README_FILE, include_str!("../templates/readme.md.tera")),
            (TODO_FILE, include_str!("../templates/todo.md.tera")),
        ])?;
        Ok(Self { tera })
    }

    pub fn render_readme(&self, plan: &ProjectPlan, preserved: PreservedDocs) -> Result<String> {
        self.render(README_FILE, plan, preserved)
    }

    pub fn render_todo(&self, plan: &ProjectPlan, preserved: PreservedDocs) -> Result<String> {
        self.render(TODO_FILE, plan, preserved)
    }

    /// Write README.md into the project
    pub fn write_readme(
        &self,
        project_dir: &Utf8Path,
        plan: &ProjectPlan,
        preserved: PreservedDocs,
    ) -> Result<Utf8PathBuf> {
        let path = project_dir.join(README_FILE);
        std::fs::write(&path, self.render_readme(plan, preserved)?)?;
        Ok(path)
    }

    /// Write todo.md into the project when [`needs_todo`] says so
    pub fn write_todo(
        &self,
        project_dir: &Utf8Path,
        plan: &ProjectPlan,
        preserved: PreservedDocs,
    ) -> Result<Option<Utf8PathBuf>> {
        if !needs_todo(plan, preserved) {
            return Ok(None);
        }
        let path = project_dir.join(TODO_FILE);
        std::fs::write(&path, self.render_todo(plan, preserved)?)?;
        Ok(Some(path))
    }

    fn render(&self, name: &str, plan: &ProjectPlan, preserved: PreservedDocs) -> Result<String> {
        debug!("Rendering {} for service {}", name, plan.service_name);
        let context = DocsContext::new(plan, preserved).to_tera_context()?;
        let rendered = self.tera.render(name, &context)?;
        Ok(format!("{}\n", rendered.trim_end()))
    }
}
