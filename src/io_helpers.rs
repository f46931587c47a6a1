use std::io::{self, Write};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub fn read_input_line(
    editor: Option<&mut DefaultEditor>,
    prompt: &str,
) -> io::Result<Option<String>> {
    if let Some(editor) = editor {
        let line = match editor.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => return Ok(Some(String::new())),
            Err(ReadlineError::Eof) => return Ok(None),
            Err(err) => return Err(io::Error::other(err)),
        };
        Ok(Some(line))
    } else {
        let mut line = String::new();
        let bytes = io::stdin().read_line(&mut line)?;
        if bytes == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

/// Print the tokens joined by `separator`, or just their number.
pub fn write_tokens<W: Write>(
    out: &mut W,
    tokens: &[String],
    separator: &str,
    count: bool,
) -> io::Result<()> {
    if count {
        writeln!(out, "{}", tokens.len())?;
    } else if !tokens.is_empty() {
        out.write_all(tokens.join(separator).as_bytes())?;
        out.write_all(b"\n")?;
    }
    out.flush()
}
