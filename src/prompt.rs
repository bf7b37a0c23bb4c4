//! Console prompting for missing paths and the exit pause.

use std::io::{BufRead, Write};

use crate::config::PromptConfig;
use crate::error::{Result, SubEmbedError};

pub struct Prompter<R, W> {
    input: R,
    output: W,
    directory_hint: String,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W, config: &PromptConfig) -> Self {
        Self {
            input,
            output,
            directory_hint: config.directory_hint.clone(),
        }
    }

    /// Ask for a path, showing the configured directory hint.
    ///
    /// Surrounding whitespace and one pair of matching quotes are removed.
    pub fn ask_path(&mut self, label: &str) -> Result<String> {
        write!(self.output, "Enter {} [ {} ]: ", label, self.directory_hint)?;
        self.output.flush()?;

        let line = self.read_line()?
            .ok_or_else(|| SubEmbedError::Prompt(format!("input closed while reading {}", label)))?;
        Ok(unquote(line.trim()).to_string())
    }

    /// Fill in whichever of the two paths is missing
    pub fn resolve_paths(
        &mut self,
        movie: Option<String>,
        subtitle: Option<String>,
    ) -> Result<(String, String)> {
        if movie.is_none() || subtitle.is_none() {
            writeln!(self.output, "Please enter the file paths.")?;
        }

        let movie = match movie {
            Some(path) => path,
            None => self.ask_path("Movie File Path")?,
        };
        let subtitle = match subtitle {
            Some(path) => path,
            None => self.ask_path("Subtitle File Path")?,
        };

        Ok((movie, subtitle))
    }

    /// Wait for Enter. A closed input is not an error.
    pub fn pause(&mut self) -> Result<()> {
        write!(self.output, "\nPress Enter to exit...")?;
        self.output.flush()?;
        self.read_line()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
