//! Terminal views. Each view renders into any `io::Write` and reads form
//! input through a [`Prompter`], so the same code drives the REPL and the
//! tests.

pub mod admin;
pub mod articles;
pub mod auth;
pub mod home;
pub mod layout;

use anyhow::Result;

/// Source of form input
pub trait Prompter {
    /// Read one line. `None` means the user cancelled (Ctrl-C / Ctrl-D).
    fn ask(&mut self, label: &str) -> Result<Option<String>>;

    /// Read one line that must not be kept in history
    fn ask_secret(&mut self, label: &str) -> Result<Option<String>>;
}

/// Ask until a non-blank answer is given or the user cancels
pub fn ask_required(input: &mut dyn Prompter, label: &str) -> Result<Option<String>> {
    loop {
        match input.ask(&format!("{}: ", label))? {
            Some(answer) if !answer.trim().is_empty() => return Ok(Some(answer.trim().to_string())),
            Some(_) => continue,
            None => return Ok(None),
        }
    }
}

/// Optional field; blank answers become `None`
pub fn ask_optional(input: &mut dyn Prompter, label: &str) -> Result<Option<Option<String>>> {
    Ok(input.ask(&format!("{}: ", label))?.map(|answer| {
        let answer = answer.trim();
        if answer.is_empty() {
            None
        } else {
            Some(answer.to_string())
        }
    }))
}

/// Read lines until one containing only `.`; at least one line is required
pub fn ask_multiline(input: &mut dyn Prompter, label: &str) -> Result<Option<String>> {
    loop {
        let mut lines: Vec<String> = Vec::new();
        let mut prompt = format!("{}:\n| ", label);
        loop {
            match input.ask(&prompt)? {
                Some(line) if line.trim() == "." => break,
                Some(line) => lines.push(line),
                None => return Ok(None),
            }
            prompt = "| ".to_string();
        }
        let text = lines.join("\n");
        if !text.trim().is_empty() {
            return Ok(Some(text.trim_end().to_string()));
        }
    }
}

/// Cut `s` to `width` characters, marking the cut with an ellipsis
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let cut: String = s.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

#[cfg(test)]
pub mod testing {
    use super::Prompter;
    use anyhow::Result;
    use std::collections::VecDeque;

    /// Prompter replaying canned answers; `None` entries simulate Ctrl-C
    #[derive(Default)]
    pub struct ScriptedInput {
        answers: VecDeque<Option<String>>,
        pub labels: Vec<String>,
    }

    impl ScriptedInput {
        pub fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(|a| Some(a.to_string())).collect(),
                labels: Vec::new(),
            }
        }

        pub fn then_cancel(mut self) -> Self {
            self.answers.push_back(None);
            self
        }

        pub fn remaining(&self) -> usize {
            self.answers.len()
        }
    }

    impl Prompter for ScriptedInput {
        fn ask(&mut self, label: &str) -> Result<Option<String>> {
            self.labels.push(label.to_string());
            Ok(self.answers.pop_front().unwrap_or(None))
        }

        fn ask_secret(&mut self, label: &str) -> Result<Option<String>> {
            self.ask(label)
        }
    }
}
