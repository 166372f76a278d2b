//! Sequential prompt sessions.
//!
//! A session walks an ordered list of [`PromptDescriptor`]s, skipping any
//! whose condition is false for the answers collected so far, and asks the
//! rest through a [`PromptBackend`]. Skipped prompts leave no key behind.

use crate::answers::Answers;
use crate::error::Result;
use crate::prompt::PromptDescriptor;
use serde_json::Value;
use tracing::{debug, trace};

/// Something that can put a question to the operator
pub trait PromptBackend {
    /// Ask a single question and return the raw answer.
    ///
    /// Free-text answers must already satisfy `prompt.validate`.
    fn ask(&mut self, prompt: &PromptDescriptor) -> Result<Value>;
}

/// Backend that answers every question with its initial value
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptDefaults;

impl PromptBackend for AcceptDefaults {
    fn ask(&mut self, prompt: &PromptDescriptor) -> Result<Value> {
        Ok(prompt.initial_answer())
    }
}

impl<B: PromptBackend + ?Sized> PromptBackend for &mut B {
    fn ask(&mut self, prompt: &PromptDescriptor) -> Result<Value> {
        (**self).ask(prompt)
    }
}

/// Run `prompts` in order against `backend`, collecting their answers
pub fn run_session<B: PromptBackend>(
    prompts: &[PromptDescriptor],
    mut backend: B,
) -> Result<Answers> {
    let mut answers = Answers::new();

    for prompt in prompts {
        if !prompt.is_active(&answers) {
            debug!("Skipping prompt '{}'", prompt.path);
            continue;
        }

        let answer = backend.ask(prompt)?;
        trace!("Answer for '{}': {}", prompt.path, answer);
        answers.insert(prompt.path.clone(), answer);
    }

    Ok(answers)
}
