//! # lcs-projects
//!
//! Project scaffolding library for create-lcs providing:
//! - The template catalog and the onboarding question set
//! - Template cloning and filtered copy into the new project
//! - LCS setup detection, `.lcsconf.json` persistence and `pnpm setup`
//! - package.json, GitHub workflow and README/todo rewriting
//!
//! # Examples
//!
//! ## Clone a template
//!
//! ```no_run
//! use lcs_projects::catalog::TemplateCatalog;
//! use lcs_projects::git::{clone_repository, CloneOptions};
//! use camino::Utf8Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = TemplateCatalog::from_embedded()?;
//! let template = &catalog.templates[0];
//!
//! clone_repository(
//!     &template.url,
//!     Utf8Path::new("/tmp/lcs-template"),
//!     &CloneOptions { depth: Some(1), ..Default::default() },
//! ).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Rewrite workflow placeholders
//!
//! ```no_run
//! use lcs_projects::onboarding::ProjectPlan;
//! use lcs_projects::workflow::rewrite_workflows;
//! use camino::Utf8Path;
//!
//! # fn example(plan: &ProjectPlan) -> lcs_projects::Result<()> {
//! if let Some(files) = rewrite_workflows(Utf8Path::new("my-lcs-service"), plan)? {
//!     println!("Updated {} workflow(s)", files.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod copy;
pub mod docs;
pub mod error;
pub mod git;
pub mod manifest;
pub mod onboarding;
pub mod setup;
pub mod workflow;

pub use error::{Error, Result};

pub use catalog::{TemplateCatalog, TemplateEntry};
pub use copy::PreservedDocs;
pub use docs::DocsRegistry;
pub use onboarding::ProjectPlan;
pub use setup::SetupDetection;
