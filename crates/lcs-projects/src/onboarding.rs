//! Fixed onboarding questions and their interpretation.
//!
//! Follow-up questions are gated on earlier answers: the AWS region is only
//! asked when the operator has credentials, the role ARN only once a region
//! was given, and the ECR repository only when the operator has one. A
//! skipped question leaves its key out of the answers, and [`ProjectPlan`]
//! reads an absent key as "not provided".

use crate::catalog::{TemplateCatalog, TemplateEntry};
use crate::error::{Error, Result};
use lcs_core::{Answers, PromptDescriptor};
use serde::Serialize;

/// Answer keys of the onboarding session
pub mod keys {
    pub const TEMPLATE: &str = "template";
    pub const PROJECT_DIR: &str = "projectDir";
    pub const SERVICE_NAME: &str = "serviceName";
    pub const HAS_AWS_CREDENTIALS: &str = "hasAwsCredentials";
    pub const AWS_REGION: &str = "awsRegion";
    pub const AWS_ROLE_ARN: &str = "awsRoleArn";
    pub const HAS_ECR_DETAILS: &str = "hasEcrDetails";
    pub const ECR_REPO_NAME: &str = "ecrRepoName";
    pub const CONFIRM: &str = "confirm";
}

pub const DEFAULT_PROJECT_DIR: &str = "my-lcs-service";
pub const DEFAULT_SERVICE_NAME: &str = "my-service";

/// Build the onboarding question sequence for a catalog
pub fn onboarding_questions(catalog: &TemplateCatalog) -> Vec<PromptDescriptor> {
    vec![
        PromptDescriptor::select(
            keys::TEMPLATE,
            "Which template would you like to use?",
            catalog.names(),
            0,
        ),
        PromptDescriptor::text(
            keys::PROJECT_DIR,
            "Where would you like to create your lambda-container-service project?",
            DEFAULT_PROJECT_DIR,
        ),
        PromptDescriptor::text(
            keys::SERVICE_NAME,
            "What is the name of your service?",
            DEFAULT_SERVICE_NAME,
        ),
        PromptDescriptor::confirm(
            keys::HAS_AWS_CREDENTIALS,
            "Do you already have your AWS credentials details (Region, IAM Role ARN or Access Keys) for GitHub Actions?",
            true,
        ),
        PromptDescriptor::text(keys::AWS_REGION, "What is your AWS Region?", "")
            .when(|answers| answers.is_truthy(keys::HAS_AWS_CREDENTIALS)),
        PromptDescriptor::text(
            keys::AWS_ROLE_ARN,
            "What is your AWS IAM Role ARN for OIDC authentication?",
            "",
        )
        .when(|answers| answers.is_truthy(keys::AWS_REGION)),
        PromptDescriptor::confirm(
            keys::HAS_ECR_DETAILS,
            "Do you already have your ECR repository name?",
            true,
        ),
        PromptDescriptor::text(keys::ECR_REPO_NAME, "What is your ECR repository name?", "")
            .when(|answers| answers.is_truthy(keys::HAS_ECR_DETAILS)),
    ]
}

/// Final go/no-go question shown after the summary
pub fn confirmation_question() -> PromptDescriptor {
    PromptDescriptor::confirm(keys::CONFIRM, "Proceed with project creation?", true)
}

/// Everything the scaffolding flow needs from the onboarding answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectPlan {
    pub template: TemplateEntry,
    pub project_dir: String,
    pub service_name: String,
    pub has_aws_credentials: bool,
    pub aws_region: Option<String>,
    pub aws_role_arn: Option<String>,
    pub has_ecr_details: bool,
    pub ecr_repo_name: Option<String>,
}

impl ProjectPlan {
    /// Interpret onboarding answers against the catalog they were asked from
    pub fn from_answers(answers: &Answers, catalog: &TemplateCatalog) -> Result<Self> {
        let template_key = required_text(answers, keys::TEMPLATE)?;
        let template = catalog
            .find(template_key)
            .cloned()
            .ok_or_else(|| Error::template_not_found(template_key))?;

        Ok(Self {
            template,
            project_dir: required_text(answers, keys::PROJECT_DIR)?.to_string(),
            service_name: required_text(answers, keys::SERVICE_NAME)?.to_string(),
            has_aws_credentials: answers.flag(keys::HAS_AWS_CREDENTIALS).unwrap_or(false),
            aws_region: optional_text(answers, keys::AWS_REGION),
            aws_role_arn: optional_text(answers, keys::AWS_ROLE_ARN),
            has_ecr_details: answers.flag(keys::HAS_ECR_DETAILS).unwrap_or(false),
            ecr_repo_name: optional_text(answers, keys::ECR_REPO_NAME),
        })
    }

    /// Region and role ARN, when the operator supplied both
    pub fn aws_credentials(&self) -> Option<(&str, &str)> {
        if !self.has_aws_credentials {
            return None;
        }
        match (self.aws_region.as_deref(), self.aws_role_arn.as_deref()) {
            (Some(region), Some(arn)) => Some((region, arn)),
            _ => None,
        }
    }

    /// ECR repository name, when the operator supplied one
    pub fn ecr_repo(&self) -> Option<&str> {
        if self.has_ecr_details {
            self.ecr_repo_name.as_deref()
        } else {
            None
        }
    }
}

fn required_text<'a>(answers: &'a Answers, key: &str) -> Result<&'a str> {
    answers
        .text(key)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| Error::missing_answer(key))
}

fn optional_text(answers: &Answers, key: &str) -> Option<String> {
    answers
        .text(key)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
