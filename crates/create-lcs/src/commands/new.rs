//! `create-lcs new` command handler

use anyhow::{anyhow, Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use lcs_core::{derive_prompts, materialize};
use lcs_projects::copy::{copy_template, preserve_original_docs, PreservedDocs};
use lcs_projects::docs::{needs_todo, DocsRegistry, README_FILE, TODO_FILE};
use lcs_projects::git::{clone_repository, CloneOptions, WorkDir, WORK_DIR_PREFIX};
use lcs_projects::onboarding::{confirmation_question, keys, onboarding_questions, ProjectPlan};
use lcs_projects::setup::{self, SetupDetection};
use lcs_projects::{manifest, workflow, TemplateCatalog};
use tracing::{debug, warn};

use crate::cli::NewArgs;
use crate::output;
use crate::prompt::ask_all;

/// Ask the onboarding questions and scaffold the project
pub async fn run(args: NewArgs) -> Result<()> {
    output::header("Create Lambda Container Service");

    let catalog = load_catalog(args.templates.as_deref())?;
    let answers = ask_all(&onboarding_questions(&catalog), args.yes)?;
    let plan = ProjectPlan::from_answers(&answers, &catalog)?;

    show_summary(&plan);

    let confirmation = ask_all(&[confirmation_question()], args.yes)?;
    if !confirmation.is_truthy(keys::CONFIRM) {
        output::info("Project creation cancelled.");
        return Ok(());
    }

    let work_parent = match args.work_dir {
        Some(dir) => dir,
        None => system_temp_dir()?,
    };
    let project_dir = current_dir()?.join(&plan.project_dir);

    // Dropping the work directory on an early return removes it as well
    let work_dir = if args.dry_run {
        None
    } else {
        let work_dir = WorkDir::create_in(&work_parent).with_context(|| {
            format!("Failed to create a work directory under {}", work_parent)
        })?;
        Some(work_dir)
    };
    let template_dir = match &work_dir {
        Some(work_dir) => work_dir.clone_dir(),
        None => work_parent.join(format!("{}*", WORK_DIR_PREFIX)),
    };

    let scaffold = Scaffold {
        plan: &plan,
        template_dir: &template_dir,
        project_dir: &project_dir,
        dry_run: args.dry_run,
        accept_defaults: args.yes,
    };

    let result = scaffold.run().await;

    if let Some(work_dir) = work_dir {
        let path = work_dir.path().to_path_buf();
        match work_dir.close() {
            Ok(()) => debug!("Cleaned up temporary directory {}", path),
            Err(e) => warn!("Failed to remove {}: {}", path, e),
        }
    }

    result.context("Error during project creation")?;

    println!();
    output::success("Project setup complete!");
    output::info(&format!(
        "Next steps: cd {}, review files, create GitHub repository, push code.",
        plan.project_dir
    ));

    Ok(())
}

fn load_catalog(path: Option<&Utf8Path>) -> Result<TemplateCatalog> {
    match path {
        Some(path) => TemplateCatalog::from_file(path)
            .with_context(|| format!("Failed to load template catalog {}", path)),
        None => TemplateCatalog::from_embedded().context("Failed to load built-in templates"),
    }
}

fn show_summary(plan: &ProjectPlan) {
    output::header("Creating project with the following details");
    output::kv("Template", &plan.template.name);
    output::kv("Project Directory", &plan.project_dir);
    output::kv("Service Name", &plan.service_name);

    if plan.has_aws_credentials {
        output::kv("AWS Region", plan.aws_region.as_deref().unwrap_or("not provided"));
        output::kv("AWS Role ARN", plan.aws_role_arn.as_deref().unwrap_or("not provided"));
    } else {
        output::info("AWS credentials details will be added to todo.md");
    }

    if plan.has_ecr_details {
        output::kv(
            "ECR Repository Name",
            plan.ecr_repo_name.as_deref().unwrap_or("not provided"),
        );
    } else {
        output::info("ECR repository name will be added to todo.md");
    }
    println!();
}

fn system_temp_dir() -> Result<Utf8PathBuf> {
    let dir = std::env::temp_dir();
    Utf8PathBuf::from_path_buf(dir)
        .map_err(|p| anyhow!("Temporary directory is not valid UTF-8: {}", p.display()))
}

fn current_dir() -> Result<Utf8PathBuf> {
    let dir = std::env::current_dir().context("Failed to read current directory")?;
    Utf8PathBuf::from_path_buf(dir)
        .map_err(|p| anyhow!("Current directory is not valid UTF-8: {}", p.display()))
}

/// One scaffolding run: template clone in `template_dir`, output in `project_dir`
struct Scaffold<'a> {
    plan: &'a ProjectPlan,
    template_dir: &'a Utf8Path,
    project_dir: &'a Utf8Path,
    dry_run: bool,
    accept_defaults: bool,
}

impl Scaffold<'_> {
    async fn run(&self) -> Result<()> {
        self.clone_template().await?;
        let preserved = self.copy_files()?;
        self.configure_lcs().await?;
        self.patch_manifest()?;
        self.rewrite_workflows()?;
        self.write_docs(preserved)?;
        Ok(())
    }

    async fn clone_template(&self) -> Result<()> {
        let url = &self.plan.template.url;
        if self.dry_run {
            output::dry_run(&format!(
                "clone template repository from {} to {}",
                url, self.template_dir
            ));
            return Ok(());
        }

        let spinner = output::spinner(&format!("Cloning template repository from {}...", url));
        let cloned = clone_repository(url, self.template_dir, &CloneOptions::default()).await;
        spinner.finish_and_clear();

        cloned.with_context(|| format!("Failed to clone {}", url))?;
        output::success("Cloning complete.");
        Ok(())
    }

    fn copy_files(&self) -> Result<PreservedDocs> {
        if self.dry_run {
            output::dry_run(&format!("create project directory {}", self.project_dir));
            output::dry_run(&format!(
                "copy template files from {} to {}",
                self.template_dir, self.project_dir
            ));
            output::dry_run(
                "rename template README.md and todo.md to ORIGINAL_README.md and ORIGINAL_todo.md",
            );
            return Ok(PreservedDocs::default());
        }

        output::info(&format!("Copying template files to {}...", self.project_dir));
        let copied = copy_template(self.template_dir, self.project_dir)
            .context("Failed to copy template files")?;
        for name in &copied {
            debug!("Copied {}", name);
        }

        let preserved = preserve_original_docs(self.template_dir, self.project_dir)?;
        if preserved.readme {
            output::info("Renamed template README.md to ORIGINAL_README.md");
        }
        if preserved.todo {
            output::info("Renamed template todo.md to ORIGINAL_todo.md");
        }
        Ok(preserved)
    }

    async fn configure_lcs(&self) -> Result<()> {
        if self.dry_run {
            output::dry_run(
                "set up LCS configuration with schema-based prompts and run pnpm setup",
            );
            return Ok(());
        }

        output::info("Checking for LCS configuration setup files...");
        match setup::detect_setup(self.template_dir) {
            SetupDetection::Absent => return Ok(()),
            SetupDetection::Partial { found } => {
                output::warning(&format!(
                    "Partial LCS setup files detected. Expected {}, {} and {}",
                    setup::SETUP_SH,
                    setup::SETUP_JS,
                    setup::SCHEMA_FILE
                ));
                for name in found {
                    output::kv("Found", name);
                }
                return Ok(());
            }
            SetupDetection::Complete => {}
        }

        output::info("Detected LCS configuration setup files. Setting up configuration...");
        setup::install_setup_files(self.template_dir, self.project_dir)?;

        let schema = setup::load_schema(self.template_dir)
            .context("Failed to parse configuration schema")?;
        let prompts = derive_prompts(&schema);
        if prompts.is_empty() {
            output::info("No configuration questions found in schema.");
            return Ok(());
        }

        output::header("Template Configuration");
        output::info("Please provide the following configuration details for this template:");
        let answers = ask_all(&prompts, self.accept_defaults)?;

        let config = materialize(&answers, &schema);
        setup::write_config(self.project_dir, &config)?;
        output::success(&format!(
            "Generated {} with your configuration.",
            setup::CONFIG_FILE
        ));

        output::info("Running template setup...");
        match setup::run_template_setup(self.project_dir).await {
            Ok(()) => output::success("Template setup completed successfully."),
            Err(e) => {
                output::warning(&format!("Template setup failed: {}", e));
                output::info(
                    "You may need to run \"pnpm setup\" manually in your project directory.",
                );
            }
        }
        Ok(())
    }

    fn patch_manifest(&self) -> Result<()> {
        let name = &self.plan.service_name;
        if self.dry_run {
            output::dry_run(&format!(
                "set the {} name in {} to {}",
                manifest::PACKAGE_JSON,
                self.project_dir,
                name
            ));
            return Ok(());
        }

        if manifest::set_package_name(self.project_dir, name)
            .context("Failed to update package.json")?
        {
            output::success("Modified package.json.");
        } else {
            output::warning("package.json not found in template.");
        }
        Ok(())
    }

    fn rewrite_workflows(&self) -> Result<()> {
        if self.dry_run {
            output::dry_run(&format!(
                "rewrite GitHub Actions workflow files in {}",
                self.project_dir.join(workflow::WORKFLOWS_DIR)
            ));
            return Ok(());
        }

        match workflow::rewrite_workflows(self.project_dir, self.plan)? {
            Some(files) => {
                for file in files {
                    let name = file.file_name().unwrap_or(file.as_str());
                    output::success(&format!("Modified {}", name));
                }
            }
            None => output::warning(".github/workflows directory not found in template."),
        }
        Ok(())
    }

    fn write_docs(&self, preserved: PreservedDocs) -> Result<()> {
        if self.dry_run {
            if needs_todo(self.plan, preserved) {
                output::dry_run(&format!(
                    "create todo.md at {} with setup instructions",
                    self.project_dir.join(TODO_FILE)
                ));
            }
            output::dry_run(&format!(
                "generate README.md at {} with project details and instructions",
                self.project_dir.join(README_FILE)
            ));
            return Ok(());
        }

        let registry = DocsRegistry::new()?;
        if registry
            .write_todo(self.project_dir, self.plan, preserved)?
            .is_some()
        {
            output::success("Created todo.md with instructions.");
        }

        registry.write_readme(self.project_dir, self.plan, preserved)?;
        output::success("Generated README.md.");
        Ok(())
    }
}
