use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use log::debug;
use rustyline::{Config as EditorConfig, DefaultEditor, EditMode};

use crate::config::{apply_aliases, Config};
use crate::io_helpers::{read_input_line, write_tokens};

pub(crate) struct Session {
    pub(crate) config: Config,
    // Echo words and tokens on stderr, like `sh -x`.
    pub(crate) trace: bool,
    pub(crate) count: bool,
    // Lines or arguments that failed to expand.
    pub(crate) failures: usize,
}

impl Session {
    pub(crate) fn new(config: Config, trace: bool, count: bool) -> Self {
        Self {
            config,
            trace,
            count,
            failures: 0,
        }
    }

    /// Expand each word on its own and concatenate the results in order.
    pub(crate) fn expand_words(&self, words: Vec<String>) -> Result<Vec<String>, String> {
        let words = apply_aliases(words, &self.config.aliases);
        self.trace_tokens("input words", &words);
        let mut tokens = Vec::new();
        for word in &words {
            let names = sexpand::expand(word).map_err(|err| err.display_with_input(word))?;
            tokens.extend(names);
        }
        debug!(
            "line event=expanded words={} tokens={}",
            words.len(),
            tokens.len()
        );
        self.trace_tokens("expanded tokens", &tokens);
        Ok(tokens)
    }

    pub(crate) fn run_words<W: Write>(&mut self, words: Vec<String>, out: &mut W) -> io::Result<()> {
        match self.expand_words(words) {
            Ok(tokens) => write_tokens(out, &tokens, &self.config.separator, self.count),
            Err(msg) => {
                eprintln!("error: {msg}");
                self.failures += 1;
                Ok(())
            }
        }
    }

    /// Blank lines and `#` comments are skipped; other lines split on whitespace.
    pub(crate) fn run_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<()> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(());
        }
        let words = trimmed.split_whitespace().map(str::to_string).collect();
        self.run_words(words, out)
    }

    fn trace_tokens(&self, label: &str, tokens: &[String]) {
        if self.trace {
            eprintln!("trace: {label}: {tokens:?}");
        }
    }
}

pub(crate) fn run_lines(session: &mut Session, interactive: bool) -> io::Result<()> {
    let mut editor = if interactive {
        Some(build_editor()?)
    } else {
        None
    };
    let history_path = history_path();
    if let (Some(editor), Some(path)) = (editor.as_mut(), history_path.as_ref()) {
        let _ = editor.load_history(path);
    }

    let prompt = session.config.prompt.clone();
    let stdout = io::stdout();
    while let Some(line) = read_input_line(editor.as_mut(), &prompt)? {
        session.run_line(&line, &mut stdout.lock())?;
    }

    if let (Some(editor), Some(path)) = (editor.as_mut(), history_path.as_ref()) {
        if let Err(err) = editor.save_history(path) {
            debug!("history event=save error={}", err);
        }
    }
    Ok(())
}

fn build_editor() -> io::Result<DefaultEditor> {
    let edit_mode = match env::var("SEXPAND_EDITMODE").ok().as_deref() {
        Some("vi") | Some("VI") => EditMode::Vi,
        _ => EditMode::Emacs,
    };
    let config = EditorConfig::builder()
        .auto_add_history(true)
        .edit_mode(edit_mode)
        .build();
    DefaultEditor::with_config(config).map_err(io::Error::other)
}

fn history_path() -> Option<PathBuf> {
    env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".sexpand_history"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        let mut config = Config::default();
        config
            .aliases
            .insert("gpu".to_string(), "g[1-2]".to_string());
        Session::new(config, false, false)
    }

    #[test]
    fn words_expand_in_order() {
        let session = session();
        let words = vec!["n[01-02]".to_string(), "gpu".to_string(), "login".to_string()];
        assert_eq!(
            session.expand_words(words).unwrap(),
            vec!["n01", "n02", "g1", "g2", "login"]
        );
    }

    #[test]
    fn error_names_the_word() {
        let session = session();
        let err = session
            .expand_words(vec!["n[01-02".to_string()])
            .unwrap_err();
        assert!(err.starts_with("Unbalanced bracket: unmatched '['"));
        assert!(err.contains("near: 'n[01-02'"));
    }

    #[test]
    fn run_line_writes_and_counts_failures() {
        let mut session = session();
        let mut out = Vec::new();
        session.run_line("  n[1-3]\tlogin \n", &mut out).unwrap();
        session.run_line("# comment\n", &mut out).unwrap();
        session.run_line("\n", &mut out).unwrap();
        session.run_line("n[3-1]\n", &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "n1\nn2\nn3\nlogin\n");
        assert_eq!(session.failures, 1);
    }

    #[test]
    fn count_mode() {
        let mut session = Session::new(Config::default(), false, true);
        let mut out = Vec::new();
        session.run_line("n[001-100],login[1-2]", &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "102\n");
    }
}
