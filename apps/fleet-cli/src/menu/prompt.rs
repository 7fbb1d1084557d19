//! # Console
//!
//! Line-based prompts over any async reader/writer pair.
//!
//! Every typed prompt re-asks until it gets a usable answer, so menus only
//! ever see valid choices, numbers and amounts. The one error a prompt
//! returns besides terminal I/O is end of input
//! (`io::ErrorKind::UnexpectedEof`), which ends the session.
//!
//! Passwords typed at a real terminal go through `rpassword` and are not
//! echoed. Scripted consoles read them like any other line.

use colored::Colorize;
use std::io::{self, IsTerminal};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use fleet_core::Money;

type Input = Box<dyn AsyncBufRead + Unpin + Send>;
type Output = Box<dyn AsyncWrite + Unpin + Send>;

/// Interactive terminal, or a scripted one in tests.
pub struct Console {
    input: Input,
    output: Output,
    hide_secrets: bool,
}

impl Console {
    pub fn new(
        input: impl AsyncBufRead + Unpin + Send + 'static,
        output: impl AsyncWrite + Unpin + Send + 'static,
    ) -> Self {
        Console {
            input: Box::new(input),
            output: Box::new(output),
            hide_secrets: false,
        }
    }

    /// Process stdin/stdout. Passwords are hidden when stdin is a terminal.
    pub fn stdio() -> Self {
        let mut console = Console::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());
        console.hide_secrets = io::stdin().is_terminal();
        console
    }

    pub fn hides_secrets(&self) -> bool {
        self.hide_secrets
    }

    /// Prints a line.
    pub async fn say(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        self.output.write_all(text.as_ref().as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await
    }

    /// Prints a success line (`✓ message`).
    pub async fn ok(&mut self, message: impl std::fmt::Display) -> io::Result<()> {
        self.say(format!("✓ {}", message).green().to_string()).await
    }

    /// Prints a failure line (`✗ message`).
    pub async fn fail(&mut self, message: impl std::fmt::Display) -> io::Result<()> {
        self.say(format!("✗ {}", message).red().to_string()).await
    }

    /// Prints a section heading.
    pub async fn heading(&mut self, title: &str) -> io::Result<()> {
        self.say("").await?;
        self.say(format!("=== {} ===", title).bold().to_string()).await
    }

    /// Shows `prompt` and reads one line, without its line ending.
    pub async fn line(&mut self, prompt: &str) -> io::Result<String> {
        self.output.write_all(prompt.as_bytes()).await?;
        self.output.flush().await?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf).await? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }

        Ok(buf.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Reads a password, without echo on a terminal.
    pub async fn password(&mut self, prompt: &str) -> io::Result<String> {
        if !self.hide_secrets {
            return self.line(prompt).await;
        }

        self.output.flush().await?;
        let prompt = prompt.to_string();
        // rpassword talks to the tty directly and blocks until Enter
        tokio::task::spawn_blocking(move || rpassword::prompt_password(prompt))
            .await
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?
    }

    /// Reads a trimmed line.
    pub async fn text(&mut self, prompt: &str) -> io::Result<String> {
        Ok(self.line(prompt).await?.trim().to_string())
    }

    /// Reads an integer within `min..=max`.
    pub async fn int(&mut self, prompt: &str, min: i64, max: i64) -> io::Result<i64> {
        loop {
            let answer = self.text(prompt).await?;
            match answer.parse::<i64>() {
                Ok(n) if (min..=max).contains(&n) => return Ok(n),
                Ok(_) => self.say(format!("Enter a number between {} and {}.", min, max)).await?,
                Err(_) => self.say("Enter a whole number.").await?,
            }
        }
    }

    /// Reads a menu choice, `1..=count`.
    pub async fn choice(&mut self, prompt: &str, count: usize) -> io::Result<usize> {
        let n = self.int(prompt, 1, count as i64).await?;
        Ok(n as usize)
    }

    /// Reads a non-negative amount such as `350000` or `349999.50`.
    pub async fn money(&mut self, prompt: &str) -> io::Result<Money> {
        loop {
            let answer = self.text(prompt).await?;
            match Money::parse(&answer) {
                Ok(amount) if !amount.is_negative() => return Ok(amount),
                Ok(_) => self.say("Amount must not be negative.").await?,
                Err(e) => self.say(format!("{}.", e)).await?,
            }
        }
    }

    /// Asks a y/n question.
    pub async fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        loop {
            match self.text(&format!("{} (y/n): ", prompt)).await?.to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.say("Please answer y or n.").await?,
            }
        }
    }

    /// Reads one of `options`, case-insensitively. Returns the option as listed.
    pub async fn pick<'a>(&mut self, prompt: &str, options: &'a [String]) -> io::Result<&'a str> {
        loop {
            let answer = self.text(prompt).await?;
            if let Some(found) = options.iter().find(|o| o.eq_ignore_ascii_case(&answer)) {
                return Ok(found.as_str());
            }
            self.say(format!("Choose one of: {}", options.join(", "))).await?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    fn scripted(script: &'static str) -> (Console, tokio::io::DuplexStream) {
        let (writer, reader) = tokio::io::duplex(64 * 1024);
        (Console::new(script.as_bytes(), writer), reader)
    }

    #[tokio::test]
    async fn test_int_reprompts_until_valid() {
        let (mut console, mut out) = scripted("abc\n9\n2\n");
        assert_eq!(console.int("> ", 1, 3).await.unwrap(), 2);
        drop(console);

        let mut transcript = String::new();
        out.read_to_string(&mut transcript).await.unwrap();
        assert!(transcript.contains("Enter a whole number."));
        assert!(transcript.contains("Enter a number between 1 and 3."));
    }

    #[tokio::test]
    async fn test_money_rejects_negative() {
        let (mut console, _out) = scripted("-5\n350000.5\n");
        assert_eq!(console.money("Price: ").await.unwrap(), Money::from_cents(35_000_050));
    }

    #[tokio::test]
    async fn test_confirm() {
        let (mut console, _out) = scripted("maybe\nY\nno\n");
        assert!(console.confirm("Proceed?").await.unwrap());
        assert!(!console.confirm("Proceed?").await.unwrap());
    }

    #[tokio::test]
    async fn test_pick_is_case_insensitive() {
        let options = vec!["MPV".to_string(), "SUV".to_string()];
        let (mut console, _out) = scripted("van\nsuv\n");
        assert_eq!(console.pick("Category: ", &options).await.unwrap(), "SUV");
    }

    #[tokio::test]
    async fn test_eof() {
        let (mut console, _out) = scripted("");
        let err = console.line("> ").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[tokio::test]
    async fn test_scripted_password_is_read_as_a_line() {
        let (mut console, mut out) = scripted(" s3cret pass \n");
        assert!(!console.hides_secrets());
        assert_eq!(console.password("Password: ").await.unwrap(), " s3cret pass ");
        drop(console);

        let mut transcript = String::new();
        out.read_to_string(&mut transcript).await.unwrap();
        assert_eq!(transcript, "Password: ");
    }

    #[tokio::test]
    async fn test_line_strips_crlf() {
        let (mut console, _out) = scripted("  hello \r\n");
        assert_eq!(console.line("> ").await.unwrap(), "  hello ");
    }
}
