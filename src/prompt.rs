use bankbook::Result;

use std::io::{BufRead, Write};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("End of input")]
    EndOfInput,
}

/// Line-oriented question and answer over any reader/writer pair
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        return Self { input, output };
    }

    pub fn say(&mut self, text: &str) -> Result {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;

        return Ok(());
    }

    /// Writes `question` and returns the next line without its line ending
    pub fn ask(&mut self, question: &str) -> Result<String> {
        self.say(question)?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            Err(PromptError::EndOfInput)?
        }

        let answer = line.trim_end_matches(&['\r', '\n'][..]).to_string();
        log::debug!("Answered {question:?} with {answer:?}");

        return Ok(answer);
    }

    /// Keeps asking until `parse` accepts the answer, showing `retry` after each rejection
    pub fn ask_until<T>(
        &mut self,
        question: &str,
        retry: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<T> {
        let mut answer = self.ask(question)?;

        loop {
            if let Some(value) = parse(&answer) {
                return Ok(value);
            }

            answer = self.ask(retry)?;
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        return self.output;
    }
}
