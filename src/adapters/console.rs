use crate::domain::ports::NameResolver;
use crate::utils::error::{PlannerError, Result};
use std::io::{self, BufRead, Write};

/// Terminal front end: reads command lines and answers course name requests
/// from the same input so neither can steal the other's lines.
pub struct Console<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints `prompt` and returns the next line, or `None` at end of input.
    pub fn read_command(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        self.read_line()
    }

    pub fn print(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl<R: BufRead, W: Write> NameResolver for Console<R, W> {
    fn request_course_name(&mut self, code: &str) -> Result<String> {
        writeln!(
            self.output,
            "{} is not in the course list yet. Please enter its course name:",
            code
        )?;
        self.output.flush()?;

        self.read_line()?.ok_or_else(|| PlannerError::InputError {
            message: format!("input ended before a name was given for {}", code),
        })
    }

    fn reject_course_name(&mut self, _name: &str, reason: &str) {
        if let Err(e) = writeln!(self.output, "Invalid course name: {}. Please try again.", reason) {
            tracing::debug!("Failed to print rejection: {}", e);
        }
    }
}
