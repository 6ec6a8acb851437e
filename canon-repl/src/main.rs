mod line;
mod options;

use ariadne::Source;
use options::{Options, USAGE};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::io::{self, BufRead, IsTerminal};
use tracing_subscriber::EnvFilter;

/// Processes one line of input, printing the result to stdout or the error report to stderr.
fn read_eval(input: &str, options: &Options) {
    match line::process(input, options) {
        Ok(output) => println!("{}", output),
        Err(err) => {
            let report = err.build_report("input");
            if let Err(io_err) = report.eprint(("input", Source::from(input))) {
                eprintln!("{}: {}", err, io_err);
            }
        },
    }
}

/// Installs a subscriber that writes logs to stderr, filtered by `RUST_LOG`.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() {
    init_logging();

    let options = match Options::from_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{}\n\n{}", err, USAGE);
            std::process::exit(2);
        },
    };
    if options.help {
        println!("{}", USAGE);
        return;
    }

    if !io::stdin().is_terminal() {
        // read one expression per line from stdin
        for input in io::stdin().lock().lines() {
            match input {
                Ok(input) if input.trim().is_empty() => {},
                Ok(input) => read_eval(&input, &options),
                Err(err) => {
                    eprintln!("{}", err);
                    break;
                },
            }
        }
    } else {
        // run the repl / interactive mode
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("{}", err);
                std::process::exit(1);
            },
        };

        fn process_line(rl: &mut DefaultEditor, options: &Options) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            read_eval(&input, options);
            Ok(())
        }

        loop {
            if let Err(err) = process_line(&mut rl, &options) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
    }
}
