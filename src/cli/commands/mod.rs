pub mod config;
pub mod entry;
pub mod history;
pub mod report;
pub mod system;

use crate::cli::core::CommandError;
use crate::cli::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let groups = [
        entry::definitions(),
        history::definitions(),
        report::definitions(),
        config::definitions(),
        system::definitions(),
    ];
    for entry in groups.into_iter().flatten() {
        registry.register(entry);
    }
}

/// Positional arguments and `--flag`s of one command line, kept apart.
pub(crate) struct ParsedArgs<'a> {
    pub positional: Vec<&'a str>,
    flags: Vec<&'a str>,
}

impl<'a> ParsedArgs<'a> {
    pub fn parse(args: &[&'a str]) -> Self {
        let (flags, positional) = args
            .iter()
            .copied()
            .partition(|arg: &&str| arg.starts_with("--") || *arg == "-y");
        Self { positional, flags }
    }

    pub fn has(&self, flag: &str) -> bool {
        self.flags.iter().any(|candidate| *candidate == flag)
    }

    pub fn assume_yes(&self) -> bool {
        self.has("--yes") || self.has("-y")
    }

    pub fn reject_unknown(&self, known: &[&str]) -> Result<(), CommandError> {
        match self.flags.iter().find(|flag| !known.contains(*flag)) {
            Some(flag) => Err(CommandError::InvalidArguments(format!(
                "unknown option `{}`",
                flag
            ))),
            None => Ok(()),
        }
    }
}

pub(crate) fn required<'a>(
    args: &[&'a str],
    index: usize,
    usage: &str,
) -> Result<&'a str, CommandError> {
    args.get(index)
        .copied()
        .ok_or_else(|| CommandError::InvalidArguments(format!("usage: {}", usage)))
}

pub(crate) fn parse_quantity(raw: &str) -> Result<u32, CommandError> {
    raw.trim().parse::<u32>().map_err(|_| {
        CommandError::InvalidArguments(format!("`{}` is not a whole number of units", raw))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_are_separated_from_positionals() {
        let parsed = ParsedArgs::parse(&["abc123", "--yes"]);
        assert_eq!(parsed.positional, vec!["abc123"]);
        assert!(parsed.assume_yes());
        assert!(parsed.reject_unknown(&["--yes", "-y"]).is_ok());
        assert!(ParsedArgs::parse(&["--force"]).reject_unknown(&["--yes"]).is_err());
    }

    #[test]
    fn quantities_must_be_non_negative_integers() {
        assert_eq!(parse_quantity("42").unwrap(), 42);
        assert!(parse_quantity("-3").is_err());
        assert!(parse_quantity("2.5").is_err());
    }
}
