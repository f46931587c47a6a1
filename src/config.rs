use std::collections::HashMap;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sexpand::check_brackets;

pub const DEFAULT_PROMPT: &str = "sexpand> ";
pub const ALIAS_SIGIL: char = '@';

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub separator: String,
    pub prompt: String,
    // Alias name to the expression it stands for.
    pub aliases: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            separator: "\n".to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
            aliases: HashMap::new(),
        }
    }
}

/// `$SEXPAND_RC` when set (empty disables the rc file), else `~/.sexpandrc`.
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var("SEXPAND_RC") {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return None;
        }
        return Some(PathBuf::from(trimmed));
    }
    let home = env::var("HOME").ok()?;
    Some(Path::new(&home).join(".sexpandrc"))
}

pub fn load_config(config: &mut Config) -> io::Result<()> {
    let Some(path) = config_path() else {
        return Ok(());
    };
    load_config_from(config, &path)
}

pub fn load_config_from(config: &mut Config, path: &Path) -> io::Result<()> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err),
    };

    for (idx, raw) in content.lines().enumerate() {
        if let Err(err) = apply_directive(config, raw, idx + 1) {
            eprintln!("config:{}: {err}", idx + 1);
        }
    }
    Ok(())
}

pub fn apply_directive(config: &mut Config, raw: &str, line: usize) -> Result<(), String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(());
    }
    if let Some(rest) = trimmed.strip_prefix("alias ") {
        return parse_alias(&mut config.aliases, rest, line);
    }
    if let Some((key, value)) = trimmed.split_once('=') {
        let key = key.trim();
        let value = strip_quotes(value.trim());
        if key.eq_ignore_ascii_case("separator") || key.eq_ignore_ascii_case("sep") {
            config.separator = unescape(value);
            return Ok(());
        }
        if key.eq_ignore_ascii_case("prompt") {
            config.prompt = value.to_string();
            return Ok(());
        }
        return Err(format!("unknown setting '{key}' on line {line}"));
    }
    Err("unrecognized directive".to_string())
}

/// Replace every word naming an alias (bare or `@name`) with its expression.
pub fn apply_aliases(words: Vec<String>, aliases: &HashMap<String, String>) -> Vec<String> {
    if aliases.is_empty() {
        return words;
    }
    words
        .into_iter()
        .map(|word| {
            let name = word.strip_prefix(ALIAS_SIGIL).unwrap_or(&word);
            match aliases.get(name) {
                Some(expression) => expression.clone(),
                None => word,
            }
        })
        .collect()
}

fn parse_alias(
    aliases: &mut HashMap<String, String>,
    input: &str,
    line: usize,
) -> Result<(), String> {
    let (name, value) = input
        .split_once('=')
        .ok_or_else(|| format!("alias missing '=' on line {line}"))?;
    let name = name.trim();
    if !is_valid_alias_name(name) {
        return Err(format!("invalid alias name '{name}' on line {line}"));
    }
    let value = strip_quotes(value.trim());
    if value.is_empty() {
        return Err(format!("alias '{name}' empty on line {line}"));
    }
    check_brackets(value).map_err(|err| format!("alias parse error on line {line}: {err}"))?;
    aliases.insert(name.to_string(), value.to_string());
    Ok(())
}

fn is_valid_alias_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|ch| ch == '_' || ch == '-' || ch.is_ascii_alphanumeric())
}

fn strip_quotes(input: &str) -> &str {
    let bytes = input.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &input[1..bytes.len() - 1];
        }
    }
    input
}

/// Understand `\n`, `\t`, `\r`, `\0` and `\\` in separators.
pub fn unescape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
