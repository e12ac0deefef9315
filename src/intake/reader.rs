//! Validated input reader.
//!
//! Owns the operator-facing streams instead of touching ambient stdin, so
//! collectors and the menu loop can be driven by scripted input in tests.
//! Every read method loops until a conforming answer arrives; an optional
//! prompt left blank short-circuits to `None` without type checking.

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use crate::models::enums::Category;

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<BufReader<Stdin>, Stdout> {
    /// Prompter over the process stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the prompter and hand back the output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Section banner.
    pub fn section_header(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.output, "\n{}", "=".repeat(60))?;
        writeln!(self.output, "{title}")?;
        writeln!(self.output, "{}", "=".repeat(60))
    }

    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// One prompt/answer exchange. EOF on the input stream is an error —
    /// the caller unwinds and the process ends instead of spinning.
    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "entrada encerrada",
            ));
        }
        Ok(buf.trim().to_string())
    }

    /// Free text; blank answer means absent.
    pub fn read_text(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let answer = self.ask(prompt)?;
        Ok(if answer.is_empty() { None } else { Some(answer) })
    }

    /// Free text that must not be blank; reprompts until it isn't.
    pub fn read_required_text(&mut self, prompt: &str) -> io::Result<String> {
        loop {
            match self.read_text(prompt)? {
                Some(answer) => return Ok(answer),
                None => self.line("Este campo é obrigatório!")?,
            }
        }
    }

    /// Integer with optional inclusive bounds, each enforced independently.
    pub fn read_integer(
        &mut self,
        prompt: &str,
        min: Option<i64>,
        max: Option<i64>,
    ) -> io::Result<Option<i64>> {
        loop {
            let answer = match self.read_text(prompt)? {
                Some(answer) => answer,
                None => return Ok(None),
            };
            let number: i64 = match answer.parse() {
                Ok(number) => number,
                Err(_) => {
                    self.line("Por favor, digite um número válido!")?;
                    continue;
                }
            };
            if let Some(min) = min {
                if number < min {
                    self.line(&format!(
                        "Por favor, digite um número maior ou igual a {min}!"
                    ))?;
                    continue;
                }
            }
            if let Some(max) = max {
                if number > max {
                    self.line(&format!(
                        "Por favor, digite um número menor ou igual a {max}!"
                    ))?;
                    continue;
                }
            }
            return Ok(Some(number));
        }
    }

    pub fn read_decimal(&mut self, prompt: &str) -> io::Result<Option<f64>> {
        loop {
            let answer = match self.read_text(prompt)? {
                Some(answer) => answer,
                None => return Ok(None),
            };
            match answer.parse::<f64>() {
                Ok(number) => return Ok(Some(number)),
                Err(_) => self.line("Por favor, digite um número decimal válido!")?,
            }
        }
    }

    /// Case-insensitive s/sim → true, n/não/nao → false.
    pub fn read_yes_no(&mut self, prompt: &str) -> io::Result<Option<bool>> {
        loop {
            let answer = match self.read_text(prompt)? {
                Some(answer) => answer,
                None => return Ok(None),
            };
            match answer.to_lowercase().as_str() {
                "s" | "sim" => return Ok(Some(true)),
                "n" | "não" | "nao" => return Ok(Some(false)),
                _ => self.line("Por favor, digite 's' ou 'n'!")?,
            }
        }
    }

    /// One label out of a closed category set.
    pub fn read_category<T: Category>(&mut self, prompt: &str) -> io::Result<Option<T>> {
        loop {
            let answer = match self.read_text(prompt)? {
                Some(answer) => answer,
                None => return Ok(None),
            };
            match T::parse_input(&answer) {
                Some(category) => return Ok(Some(category)),
                None => self.line(&format!(
                    "Opção inválida! Valores aceitos: {}.",
                    T::accepted_labels()
                ))?,
            }
        }
    }
}
