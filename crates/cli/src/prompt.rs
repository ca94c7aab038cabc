//! Line-oriented prompting over any reader/writer pair.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use grocer_core::{DomainError, DomainResult};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `prompt` and read one line. `None` at end of input.
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Parse a typed number, reporting `InputFormat` with what was expected.
pub fn parse_number<T: FromStr>(raw: &str, what: &str) -> DomainResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| DomainError::input_format(format!("'{}' is not a valid {what}", raw.trim())))
}
