//! User-facing side of the flows: drawing, acknowledgements, confirmations.

use crate::render::ListingView;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use tracing::warn;

/// What the form controller needs from whoever is showing the listings.
///
/// `confirm` blocks until the user answers; there is no timeout.
pub trait UserInterface: Send {
    fn draw(&mut self, view: &ListingView);

    /// Blocking success message after a flow completes
    fn acknowledge(&mut self, message: &str);

    /// Non-fatal problem the user should know about
    fn notice(&mut self, message: &str);

    fn confirm(&mut self, question: &str) -> bool;

    /// Bring the form into view so the user can continue editing
    fn focus_form(&mut self);
}

/// Line-oriented terminal interface
pub struct TerminalUi<R, W> {
    input: R,
    output: W,
    assume_yes: bool,
}

impl TerminalUi<io::BufReader<io::Stdin>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead + Send, W: Write + Send> TerminalUi<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            assume_yes: false,
        }
    }

    /// Answer every confirmation with yes without asking
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    /// Ask for a value, keeping `default` when the answer is empty
    pub fn prompt(&mut self, label: &str, default: &str) -> io::Result<String> {
        if default.is_empty() {
            write!(self.output, "{}: ", label)?;
        } else {
            write!(self.output, "{} [{}]: ", label, default)?;
        }
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        let answer = line.trim_end_matches(['\r', '\n']);
        Ok(if answer.trim().is_empty() {
            default.to_string()
        } else {
            answer.to_string()
        })
    }

    fn say(&mut self, text: &str) {
        if let Err(e) = writeln!(self.output, "{}", text) {
            warn!("Could not write to terminal: {}", e);
        }
    }
}

impl<R: BufRead + Send, W: Write + Send> UserInterface for TerminalUi<R, W> {
    fn draw(&mut self, view: &ListingView) {
        let text = view.to_string();
        if let Err(e) = write!(self.output, "{}", text) {
            warn!("Could not write to terminal: {}", e);
        }
    }

    fn acknowledge(&mut self, message: &str) {
        self.say(message);
    }

    fn notice(&mut self, message: &str) {
        self.say(&format!("warning: {}", message));
    }

    fn confirm(&mut self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        if write!(self.output, "{} [y/N]: ", question)
            .and_then(|_| self.output.flush())
            .is_err()
        {
            return false;
        }
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(_) => matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                warn!("Could not read confirmation: {}", e);
                false
            }
        }
    }

    fn focus_form(&mut self) {
        self.say("Editing property, update the fields below.");
    }
}

/// Everything a [`RecordingUi`] was asked to do, in order
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Draw(ListingView),
    Acknowledge(String),
    Notice(String),
    Confirm(String),
    FocusForm,
}

/// Scripted interface that records calls instead of talking to a person
#[derive(Debug, Default)]
pub struct RecordingUi {
    pub events: Vec<UiEvent>,
    answers: VecDeque<bool>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue answers for upcoming confirmations; unanswered ones decline
    pub fn answering(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            events: Vec::new(),
            answers: answers.into_iter().collect(),
        }
    }

    pub fn last_view(&self) -> Option<&ListingView> {
        self.events.iter().rev().find_map(|e| match e {
            UiEvent::Draw(view) => Some(view),
            _ => None,
        })
    }

    pub fn notices(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                UiEvent::Notice(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl UserInterface for RecordingUi {
    fn draw(&mut self, view: &ListingView) {
        self.events.push(UiEvent::Draw(view.clone()));
    }

    fn acknowledge(&mut self, message: &str) {
        self.events.push(UiEvent::Acknowledge(message.to_string()));
    }

    fn notice(&mut self, message: &str) {
        self.events.push(UiEvent::Notice(message.to_string()));
    }

    fn confirm(&mut self, question: &str) -> bool {
        self.events.push(UiEvent::Confirm(question.to_string()));
        self.answers.pop_front().unwrap_or(false)
    }

    fn focus_form(&mut self) {
        self.events.push(UiEvent::FocusForm);
    }
}
