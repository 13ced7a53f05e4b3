//! Overwrite confirmation on the terminal.

use std::io::{self, BufRead};
use std::path::Path;

use console::{Style, Term};
use qcreportlib::OverwritePrompt;

/// Asks on stdout and reads the answer from the terminal, or from stdin when
/// it is not a terminal. End of input counts as "no".
pub struct TerminalPrompt {
    term: Term,
    warning: Style,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
            warning: Style::new().yellow().bold(),
        }
    }

    fn read_answer(&self) -> io::Result<Option<String>> {
        if self.term.is_term() {
            return self.term.read_line().map(Some);
        }
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line)? {
            0 => Ok(None),
            _ => Ok(Some(line)),
        }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl OverwritePrompt for TerminalPrompt {
    fn confirm_overwrite(&mut self, module: &str, _dir: &Path) -> qcreportlib::Result<bool> {
        let question = format!(
            "WARNING: {} module directory exists in output directory, any report files in \
             the directory will be overwritten. Proceed (Y/N)? ",
            module
        );
        loop {
            self.term
                .write_str(&self.warning.apply_to(&question).to_string())?;
            self.term.flush()?;

            let Some(answer) = self.read_answer()? else {
                self.term.write_line("")?;
                return Ok(false);
            };
            if let Some(proceed) = parse_answer(&answer) {
                return Ok(proceed);
            }
        }
    }
}

/// `y` or `n`, either case; anything else is no answer.
fn parse_answer(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" => Some(true),
        "n" => Some(false),
        _ => None,
    }
}
