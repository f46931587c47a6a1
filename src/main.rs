use std::env;
use std::io;
use std::process::ExitCode;

mod config;
mod io_helpers;
mod repl;

use config::{load_config, unescape, Config};
use repl::{run_lines, Session};

const USAGE: &str = "usage: sexpand [-x] [-c] [-s SEP | --separator=SEP] [EXPRESSION...]

Expands node lists such as n[01-04],login[1,2].
Without expressions, one line at a time is read from stdin.

  -s, --separator=SEP  join names with SEP (default: newline)
  -c, --count          print only the number of names
  -x                   trace words and names on stderr
  -h, --help           show this help";

#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    trace: bool,
    count: bool,
    help: bool,
    separator: Option<String>,
    expressions: Vec<String>,
}

fn main() -> ExitCode {
    init_logging();
    let options = match parse_args(env::args().skip(1)) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };
    if options.help {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let mut config = Config::default();
    if let Err(err) = load_config(&mut config) {
        eprintln!("config error: {err}");
    }
    if let Some(separator) = options.separator {
        config.separator = unescape(&separator);
    }

    let mut session = Session::new(config, options.trace, options.count);
    let interactive =
        options.expressions.is_empty() && unsafe { libc::isatty(libc::STDIN_FILENO) == 1 };
    let result = if options.expressions.is_empty() {
        run_lines(&mut session, interactive)
    } else {
        session.run_words(options.expressions, &mut io::stdout().lock())
    };

    match result {
        // A closed pipe (`sexpand n[1-9999] | head`) is a normal way to stop.
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => return ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
        Ok(()) => {}
    }
    if session.failures > 0 && !interactive {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn init_logging() {
    let env = env_logger::Env::default().filter_or("SEXPAND_LOG", "warn");
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init();
}

fn parse_args<I>(args: I) -> Result<Options, String>
where
    I: IntoIterator<Item = String>,
{
    let mut options = Options::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--" {
            options.expressions.extend(args.by_ref());
            break;
        }
        match arg.as_str() {
            "-x" => options.trace = true,
            "-c" | "--count" => options.count = true,
            "-h" | "--help" => options.help = true,
            "-s" | "--separator" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("{arg} requires a value"))?;
                options.separator = Some(value);
            }
            _ => {
                if let Some(value) = arg.strip_prefix("--separator=") {
                    options.separator = Some(value.to_string());
                } else if arg.starts_with('-') && arg.len() > 1 {
                    return Err(format!("unknown option: {arg}"));
                } else {
                    options.expressions.push(arg);
                }
            }
        }
    }
    Ok(options)
}
