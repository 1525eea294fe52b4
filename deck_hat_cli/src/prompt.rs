use std::io::{self, BufRead, StdinLock, Stdout, Write};

/// Line-oriented console. Generic so menus can be driven by scripted input in tests.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, text: &str) {
        let _ = writeln!(self.output, "{text}");
    }

    /// Prints `prompt` and reads one trimmed line. `None` on end of input.
    pub fn line(&mut self, prompt: &str) -> Option<String> {
        let _ = write!(self.output, "{prompt}");
        let _ = self.output.flush();

        let mut buf = String::new();
        match self.input.read_line(&mut buf) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(buf.trim().to_string()),
        }
    }

    /// Blank input falls back to `default`.
    pub fn line_or(&mut self, prompt: &str, default: &str) -> Option<String> {
        self.line(prompt)
            .map(|s| if s.is_empty() { default.to_string() } else { s })
    }

    pub fn yes_no(&mut self, prompt: &str) -> bool {
        let ans = self.line(prompt).unwrap_or_default().to_lowercase();
        matches!(ans.as_str(), "y" | "yes")
    }

    /// Asks until the answer is a number in `min..=max`. `None` on end of input.
    pub fn number(&mut self, prompt: &str, min: u32, max: u32) -> Option<u32> {
        loop {
            let line = self.line(prompt)?;
            match line.parse::<u32>() {
                Ok(val) if (min..=max).contains(&val) => return Some(val),
                Ok(_) => self.say(&format!("Please enter a number between {min} and {max}.")),
                Err(_) => self.say("Please enter a number."),
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
pub(crate) fn scripted(lines: &[&str]) -> Console<io::Cursor<Vec<u8>>, Vec<u8>> {
    let mut input = lines.join("\n");
    input.push('\n');
    Console::new(io::Cursor::new(input.into_bytes()), Vec::new())
}
