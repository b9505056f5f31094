//! Learner input
//!
//! The add-card and review flows talk to the learner through an
//! [`InputProvider`]. [`ConsoleInput`] reads from a terminal; [`ScriptedInput`]
//! replays canned answers.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::error::{LeitnerError, LeitnerResult};
use crate::models::{Card, ReviewOutcome};
use crate::scheduler::AnswerProvider;

pub trait InputProvider {
    /// Ask a yes/no question until a valid reply is given
    fn ask_yes_no(&mut self, prompt: &str) -> LeitnerResult<bool>;

    /// Ask for a line of text (trimmed)
    fn ask_text(&mut self, prompt: &str) -> LeitnerResult<String>;

    /// Show a message to the learner
    fn show(&mut self, message: &str) -> LeitnerResult<()>;
}

/// Parse a yes/no reply; `None` for anything else
pub fn parse_yes_no(reply: &str) -> Option<bool> {
    match reply.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Line-oriented console input
pub struct ConsoleInput<R, W> {
    reader: R,
    writer: W,
}

impl ConsoleInput<io::StdinLock<'static>, io::Stdout> {
    /// Console bound to the process's stdin and stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    fn read_line(&mut self, prompt: &str) -> LeitnerResult<String> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let mut input = String::new();
        let read = self.reader.read_line(&mut input)?;
        if read == 0 {
            return Err(LeitnerError::Io("Input closed".into()));
        }

        Ok(input.trim().to_string())
    }
}

impl<R: BufRead, W: Write> InputProvider for ConsoleInput<R, W> {
    fn ask_yes_no(&mut self, prompt: &str) -> LeitnerResult<bool> {
        loop {
            let reply = self.read_line(&format!("{} (y/n): ", prompt))?;
            match parse_yes_no(&reply) {
                Some(answer) => return Ok(answer),
                None => writeln!(self.writer, "Please answer 'y' or 'n'.")?,
            }
        }
    }

    fn ask_text(&mut self, prompt: &str) -> LeitnerResult<String> {
        self.read_line(prompt)
    }

    fn show(&mut self, message: &str) -> LeitnerResult<()> {
        writeln!(self.writer, "{}", message)?;
        Ok(())
    }
}

/// Replays a fixed list of replies and records what was shown
#[derive(Debug, Default)]
pub struct ScriptedInput {
    replies: VecDeque<String>,
    pub prompts: Vec<String>,
    pub shown: Vec<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: replies.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            shown: Vec::new(),
        }
    }

    fn next_reply(&mut self, prompt: &str) -> LeitnerResult<String> {
        self.prompts.push(prompt.to_string());
        self.replies
            .pop_front()
            .ok_or_else(|| LeitnerError::Io("Input closed".into()))
    }
}

impl InputProvider for ScriptedInput {
    fn ask_yes_no(&mut self, prompt: &str) -> LeitnerResult<bool> {
        loop {
            let reply = self.next_reply(prompt)?;
            if let Some(answer) = parse_yes_no(&reply) {
                return Ok(answer);
            }
        }
    }

    fn ask_text(&mut self, prompt: &str) -> LeitnerResult<String> {
        Ok(self.next_reply(prompt)?.trim().to_string())
    }

    fn show(&mut self, message: &str) -> LeitnerResult<()> {
        self.shown.push(message.to_string());
        Ok(())
    }
}

/// Review answers typed by the learner
///
/// Shows each question, reads the answer and reports whether it was right.
pub struct PromptedAnswers<'a> {
    input: &'a mut dyn InputProvider,
}

impl<'a> PromptedAnswers<'a> {
    pub fn new(input: &'a mut dyn InputProvider) -> Self {
        Self { input }
    }
}

impl AnswerProvider for PromptedAnswers<'_> {
    fn answer(&mut self, card: &Card) -> LeitnerResult<String> {
        self.input.show(card.question())?;
        self.input.ask_text("Your answer: ")
    }

    fn on_result(&mut self, card: &Card, outcome: &ReviewOutcome) -> LeitnerResult<()> {
        if outcome.correct {
            self.input.show("Correct!")
        } else {
            self.input
                .show(&format!("Incorrect. The correct answer is {}", card.answer()))
        }
    }
}
