//! Interactive prompt backend using dialoguer

use dialoguer::{Confirm, Input, Select};
use lcs_core::{
    AcceptDefaults, Answers, InitialValue, PromptBackend, PromptDescriptor, QuestionKind,
};
use serde_json::{Number, Value};
use std::io;

/// Asks every question on the terminal
#[derive(Debug, Default)]
pub struct DialoguerBackend;

impl PromptBackend for DialoguerBackend {
    fn ask(&mut self, prompt: &PromptDescriptor) -> lcs_core::Result<Value> {
        let answer = match &prompt.kind {
            QuestionKind::Select { choices } => {
                let default = match prompt.initial {
                    InitialValue::Index(i) if i < choices.len() => i,
                    _ => 0,
                };
                let selection = Select::new()
                    .with_prompt(&prompt.label)
                    .items(choices.as_slice())
                    .default(default)
                    .interact()
                    .map_err(|e| interaction_error(prompt, e))?;

                choices
                    .get(selection)
                    .cloned()
                    .map(Value::String)
                    .unwrap_or(Value::Null)
            }
            QuestionKind::Text => Value::String(ask_text(prompt, |input| prompt.validate(input))?),
            QuestionKind::Number => {
                let input = ask_text(prompt, |input| {
                    parse_number(input)
                        .map(|_| ())
                        .ok_or_else(|| "Please enter a number".to_string())
                })?;
                parse_number(&input)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
            QuestionKind::Confirm => {
                let default = matches!(prompt.initial, InitialValue::Bool(true));
                let confirmed = Confirm::new()
                    .with_prompt(&prompt.label)
                    .default(default)
                    .interact()
                    .map_err(|e| interaction_error(prompt, e))?;
                Value::Bool(confirmed)
            }
        };

        Ok(answer)
    }
}

/// Run `prompts` on the terminal, or take every initial value when
/// `accept_defaults` is set
pub fn ask_all(prompts: &[PromptDescriptor], accept_defaults: bool) -> lcs_core::Result<Answers> {
    if accept_defaults {
        lcs_core::run_session(prompts, AcceptDefaults)
    } else {
        lcs_core::run_session(prompts, DialoguerBackend)
    }
}

fn ask_text<F>(prompt: &PromptDescriptor, mut check: F) -> lcs_core::Result<String>
where
    F: FnMut(&str) -> Result<(), String>,
{
    let mut input = Input::<String>::new()
        .with_prompt(&prompt.label)
        .allow_empty(true)
        .validate_with(move |input: &String| check(input));

    let initial = initial_text(prompt);
    if !initial.is_empty() {
        input = input.default(initial);
    }

    input
        .interact_text()
        .map_err(|e| interaction_error(prompt, e))
}

/// Initial value as the text pre-filled in an input field
fn initial_text(prompt: &PromptDescriptor) -> String {
    match prompt.initial_answer() {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Parse operator input into a JSON number, keeping integers integral
fn parse_number(input: &str) -> Option<Number> {
    let trimmed = input.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(Number::from(i));
    }
    trimmed.parse::<f64>().ok().and_then(Number::from_f64)
}

fn interaction_error(prompt: &PromptDescriptor, err: dialoguer::Error) -> lcs_core::Error {
    match err {
        dialoguer::Error::IO(e) if e.kind() == io::ErrorKind::Interrupted => {
            lcs_core::Error::interrupted(prompt.path.clone())
        }
        other => lcs_core::Error::prompt(prompt.path.clone(), other.to_string()),
    }
}
