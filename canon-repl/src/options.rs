//! Command-line options.

use std::fmt;

/// The usage message printed by `--help`.
pub const USAGE: &str = "\
usage: canon-repl [options]

Reads one expression per line and prints its canonical form. A line may end with
values for its variables, as in `x^2 + y; x = 3, y = 1/2`.

options:
  --simplify         apply the exponent laws before printing
  --tree             print how the expression is stored instead of its text form
  --max-depth <n>    allow at most <n> nested parentheses (default 256)
  --help             print this message";

/// Options controlling how each line is processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Whether to simplify the result before printing it.
    pub simplify: bool,

    /// Whether to print the result as a tree of nodes.
    pub tree: bool,

    /// The maximum nesting depth passed to the parser.
    pub max_depth: usize,

    /// Whether `--help` was given.
    pub help: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            simplify: false,
            tree: false,
            max_depth: canon_parser::ParseOptions::default().max_depth,
            help: false,
        }
    }
}

/// An invalid command-line argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgsError {
    /// The argument is not a known option.
    Unknown(String),

    /// The option needs a value, but none was given.
    MissingValue(&'static str),

    /// The value given to the option is not valid.
    InvalidValue(&'static str, String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(arg) => write!(f, "unknown option `{}`", arg),
            Self::MissingValue(option) => write!(f, "`{}` needs a value", option),
            Self::InvalidValue(option, value) => {
                write!(f, "`{}` is not a valid value for `{}`", value, option)
            },
        }
    }
}

impl std::error::Error for ArgsError {}

impl Options {
    /// Parses options from the given arguments, not including the program name.
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Result<Self, ArgsError> {
        let mut options = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--simplify" => options.simplify = true,
                "--tree" => options.tree = true,
                "--help" | "-h" => options.help = true,
                "--max-depth" => {
                    let value = args.next().ok_or(ArgsError::MissingValue("--max-depth"))?;
                    options.max_depth = value.parse()
                        .map_err(|_| ArgsError::InvalidValue("--max-depth", value.clone()))?;
                },
                _ => return Err(ArgsError::Unknown(arg)),
            }
        }

        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn defaults() {
        assert_eq!(Options::from_args(args(&[])).unwrap(), Options::default());
        assert_eq!(Options::default().max_depth, 256);
    }

    #[test]
    fn flags() {
        let options = Options::from_args(args(&["--tree", "--max-depth", "8", "--simplify"])).unwrap();
        assert_eq!(options, Options { simplify: true, tree: true, max_depth: 8, help: false });
    }

    #[test]
    fn bad_arguments() {
        assert_eq!(
            Options::from_args(args(&["--fast"])),
            Err(ArgsError::Unknown("--fast".to_string())),
        );
        assert_eq!(
            Options::from_args(args(&["--max-depth"])),
            Err(ArgsError::MissingValue("--max-depth")),
        );
        assert_eq!(
            Options::from_args(args(&["--max-depth", "deep"])),
            Err(ArgsError::InvalidValue("--max-depth", "deep".to_string())),
        );
    }
}
