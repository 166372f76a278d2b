//! Prompt derivation from a schema document.
//!
//! [`derive_prompts`] walks a [`SchemaNode`] depth-first in declaration
//! order and emits one [`PromptDescriptor`] per leaf. Object nodes with
//! properties are containers only: they contribute a dotted path prefix and
//! an upper-cased breadcrumb to the labels of their descendants.
//!
//! Breadcrumbs join every ancestor object key, so a leaf at `a.b.c` is
//! labelled `[A > B] ...`. Only one level of nesting is relied upon by the
//! templates this tool targets; deeper breadcrumbs follow the same rule but
//! are not a compatibility guarantee.

use crate::answers::Answers;
use crate::schema::{SchemaKind, SchemaNode};
use regex::Regex;
use serde_json::{Number, Value};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Predicate deciding whether a prompt is asked, given earlier answers
pub type Condition = Arc<dyn Fn(&Answers) -> bool + Send + Sync>;

/// Patterns with a friendlier rejection message than the generic one
const KNOWN_PATTERNS: &[(&str, &str)] = &[
    ("^[0-9]{12}$", "AWS Account ID must be exactly 12 digits"),
    (
        "^[a-z0-9-]+$",
        "Must contain only lowercase letters, numbers, and hyphens",
    ),
    ("^#[0-9a-fA-F]{6}$", "Must be a valid hex color (e.g., #FF5733)"),
];

/// How the question is presented to the operator
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionKind {
    /// Closed choice among the listed values
    Select { choices: Vec<String> },
    /// Free text
    Text,
    /// Numeric input
    Number,
    /// Yes/no confirmation
    Confirm,
}

impl QuestionKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Select { .. } => "select",
            Self::Text => "text",
            Self::Number => "number",
            Self::Confirm => "confirm",
        }
    }
}

/// Value pre-filled or pre-selected when the question is shown
#[derive(Debug, Clone, PartialEq)]
pub enum InitialValue {
    /// Index into the select choices
    Index(usize),
    Text(String),
    Number(Number),
    Bool(bool),
}

impl fmt::Display for InitialValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "#{}", i),
            Self::Text(s) => write!(f, "{:?}", s),
            Self::Number(n) => write!(f, "{}", n),
            Self::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Check applied to free-text answers before they are accepted
#[derive(Debug, Clone)]
pub enum Validator {
    /// Answer must match a schema `pattern`
    Pattern {
        pattern: String,
        regex: Regex,
        message: String,
    },
    /// Answer must be an absolute URL (`format: "uri"`)
    Uri,
}

impl Validator {
    /// Build a pattern validator.
    ///
    /// Returns `None` when the pattern does not compile; the prompt then
    /// accepts any text.
    pub fn pattern(pattern: &str) -> Option<Self> {
        let regex = match Regex::new(pattern) {
            Ok(regex) => regex,
            Err(e) => {
                warn!("Ignoring invalid schema pattern {:?}: {}", pattern, e);
                return None;
            }
        };

        let message = KNOWN_PATTERNS
            .iter()
            .find(|(known, _)| *known == pattern)
            .map(|(_, message)| message.to_string())
            .unwrap_or_else(|| format!("Value must match pattern: {}", pattern));

        Some(Self::Pattern {
            pattern: pattern.to_string(),
            regex,
            message,
        })
    }

    /// Accept the input or return the message to show the operator
    pub fn check(&self, input: &str) -> Result<(), String> {
        match self {
            Self::Pattern { regex, message, .. } => {
                if regex.is_match(input) {
                    Ok(())
                } else {
                    Err(message.clone())
                }
            }
            Self::Uri => match url::Url::parse(input) {
                Ok(_) => Ok(()),
                Err(_) => Err("Please enter a valid URL".to_string()),
            },
        }
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern { pattern, .. } => write!(f, "pattern {}", pattern),
            Self::Uri => f.write_str("uri"),
        }
    }
}

/// One interactive question
#[derive(Clone)]
pub struct PromptDescriptor {
    /// Dotted key path; the join key between prompts, answers and output
    pub path: String,
    pub kind: QuestionKind,
    pub label: String,
    pub initial: InitialValue,
    pub validator: Option<Validator>,
    condition: Option<Condition>,
}

impl fmt::Debug for PromptDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromptDescriptor")
            .field("path", &self.path)
            .field("kind", &self.kind)
            .field("label", &self.label)
            .field("initial", &self.initial)
            .field("validator", &self.validator)
            .field("conditional", &self.condition.is_some())
            .finish()
    }
}

impl PromptDescriptor {
    pub fn new(
        path: impl Into<String>,
        kind: QuestionKind,
        label: impl Into<String>,
        initial: InitialValue,
    ) -> Self {
        Self {
            path: path.into(),
            kind,
            label: label.into(),
            initial,
            validator: None,
            condition: None,
        }
    }

    /// Free-text question
    pub fn text(
        path: impl Into<String>,
        label: impl Into<String>,
        initial: impl Into<String>,
    ) -> Self {
        Self::new(
            path,
            QuestionKind::Text,
            label,
            InitialValue::Text(initial.into()),
        )
    }

    /// Yes/no question
    pub fn confirm(path: impl Into<String>, label: impl Into<String>, initial: bool) -> Self {
        Self::new(
            path,
            QuestionKind::Confirm,
            label,
            InitialValue::Bool(initial),
        )
    }

    /// Closed-choice question with `initial` as the preselected index
    pub fn select(
        path: impl Into<String>,
        label: impl Into<String>,
        choices: Vec<String>,
        initial: usize,
    ) -> Self {
        Self::new(
            path,
            QuestionKind::Select { choices },
            label,
            InitialValue::Index(initial),
        )
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Only ask this question when `condition` holds for the answers so far
    pub fn when<F>(mut self, condition: F) -> Self
    where
        F: Fn(&Answers) -> bool + Send + Sync + 'static,
    {
        self.condition = Some(Arc::new(condition));
        self
    }

    pub fn is_conditional(&self) -> bool {
        self.condition.is_some()
    }

    /// Whether the question should be asked given the answers so far
    pub fn is_active(&self, answers: &Answers) -> bool {
        self.condition.as_ref().is_none_or(|condition| condition(answers))
    }

    /// Run the attached validator, accepting anything when there is none
    pub fn validate(&self, input: &str) -> Result<(), String> {
        match &self.validator {
            Some(validator) => validator.check(input),
            None => Ok(()),
        }
    }

    /// The initial value expressed as a raw answer
    pub fn initial_answer(&self) -> Value {
        match (&self.initial, &self.kind) {
            (InitialValue::Index(i), QuestionKind::Select { choices }) => choices
                .get(*i)
                .or_else(|| choices.first())
                .map(|c| Value::String(c.clone()))
                .unwrap_or(Value::Null),
            (InitialValue::Index(i), _) => Value::from(*i),
            (InitialValue::Text(s), _) => Value::String(s.clone()),
            (InitialValue::Number(n), _) => Value::Number(n.clone()),
            (InitialValue::Bool(b), _) => Value::Bool(*b),
        }
    }
}

/// Derive the ordered prompt sequence for a schema document
pub fn derive_prompts(schema: &SchemaNode) -> Vec<PromptDescriptor> {
    let mut prompts = Vec::new();
    let mut ancestors = Vec::new();
    collect_prompts(schema, &mut ancestors, &mut prompts);
    debug!("Derived {} prompts from schema", prompts.len());
    prompts
}

fn collect_prompts<'a>(
    node: &'a SchemaNode,
    ancestors: &mut Vec<&'a str>,
    prompts: &mut Vec<PromptDescriptor>,
) {
    for (key, child) in &node.properties {
        if !child.is_leaf() {
            ancestors.push(key.as_str());
            collect_prompts(child, ancestors, prompts);
            ancestors.pop();
            continue;
        }

        let path = if ancestors.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", ancestors.join("."), key)
        };

        let mut prompt = leaf_prompt(path, child);
        if !ancestors.is_empty() {
            let section = ancestors
                .iter()
                .map(|s| s.to_uppercase())
                .collect::<Vec<_>>()
                .join(" > ");
            prompt.label = format!("[{}] {}", section, prompt.label);
        }
        prompts.push(prompt);
    }
}

/// Build the prompt for a single leaf, ignoring any section context
pub fn leaf_prompt(path: String, node: &SchemaNode) -> PromptDescriptor {
    let label = node
        .description
        .clone()
        .unwrap_or_else(|| format!("Enter value for {}:", path));

    match node.kind {
        SchemaKind::String if !node.enum_values.is_empty() => {
            let initial = node
                .default
                .as_ref()
                .and_then(Value::as_str)
                .and_then(|d| node.enum_values.iter().position(|v| v == d))
                .unwrap_or(0);
            PromptDescriptor::select(path, label, node.enum_values.clone(), initial)
        }
        SchemaKind::String => {
            let initial = node
                .default
                .as_ref()
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let mut prompt = PromptDescriptor::text(path, label, initial);
            prompt.validator = string_validator(node);
            prompt
        }
        SchemaKind::Number | SchemaKind::Integer => {
            let initial = match &node.default {
                Some(Value::Number(n)) => n.clone(),
                _ => Number::from(0),
            };
            PromptDescriptor::new(path, QuestionKind::Number, label, InitialValue::Number(initial))
        }
        SchemaKind::Boolean => {
            let initial = node.default.as_ref().and_then(Value::as_bool).unwrap_or(true);
            PromptDescriptor::confirm(path, label, initial)
        }
        SchemaKind::Array => {
            let message = node
                .description
                .clone()
                .unwrap_or_else(|| format!("Enter values for {}", path));
            let initial = match &node.default {
                Some(Value::Array(items)) => items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(", "),
                _ => String::new(),
            };
            PromptDescriptor::text(path, format!("{} (comma-separated):", message), initial)
        }
        SchemaKind::Object | SchemaKind::Unknown => {
            let initial = node
                .default
                .as_ref()
                .map(Value::to_string)
                .unwrap_or_default();
            PromptDescriptor::text(path, label, initial)
        }
    }
}

fn string_validator(node: &SchemaNode) -> Option<Validator> {
    if let Some(pattern) = &node.pattern {
        return Validator::pattern(pattern);
    }
    if node.format.as_deref() == Some("uri") {
        return Some(Validator::Uri);
    }
    None
}
