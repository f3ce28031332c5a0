use crate::domain::ports::NameResolver;
use crate::utils::error::{PlannerError, Result};
use std::collections::VecDeque;

/// Answers name requests from a fixed queue, recording every request.
#[derive(Debug, Clone, Default)]
pub struct ScriptedNameResolver {
    answers: VecDeque<String>,
    prompts: Vec<String>,
    rejected: Vec<String>,
}

impl ScriptedNameResolver {
    pub fn new<I, T>(answers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Codes a name was requested for, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }
}

impl NameResolver for ScriptedNameResolver {
    fn request_course_name(&mut self, code: &str) -> Result<String> {
        self.prompts.push(code.to_string());
        self.answers.pop_front().ok_or_else(|| PlannerError::InputError {
            message: format!("no course name available for {}", code),
        })
    }

    fn reject_course_name(&mut self, name: &str, _reason: &str) {
        self.rejected.push(name.to_string());
    }
}
