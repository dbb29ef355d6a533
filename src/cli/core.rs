//! Core CLI dispatch, error reporting, and shell context construction.

use std::{
    env, io,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Confirm};
use strsim::levenshtein;

use crate::{
    config::{Config, ConfigManager},
    core::{
        errors::{CliError, WorklogError},
        time::{Clock, FixedClock},
        utils::PathResolver,
    },
    currency::{self, CurrencyFormat},
    domain::RecordDraft,
    storage::{FileStore, RecordStore},
};

use super::commands;
use super::io as cli_io;
use super::output::{self, OutputPreferences};
use super::registry::CommandRegistry;
use super::system_clock::SystemClock;
pub use super::shell_context::{CliMode, ShellContext};

/// Pins "today" for scripted sessions, e.g. `WORKLOG_TODAY=2024-01-31`.
pub const TODAY_ENV: &str = "WORKLOG_TODAY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] WorklogError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let clock: Box<dyn Clock> = match env::var(TODAY_ENV) {
            Ok(raw) => {
                let today = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
                    CliError::Input(format!("{TODAY_ENV} must be a YYYY-MM-DD date, got `{raw}`"))
                })?;
                Box::new(FixedClock::new(today))
            }
            Err(_) => Box::new(SystemClock),
        };
        Self::with_base_dir(mode, PathResolver::base_dir(), clock)
    }

    /// Builds a context rooted at `base`, loading configuration and opening the store.
    pub fn with_base_dir(
        mode: CliMode,
        base: PathBuf,
        clock: Box<dyn Clock>,
    ) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config_manager = ConfigManager::with_base_dir(base.clone())?;
        let config = config_manager.load()?;
        let store = open_store(&base, &config)?;
        let draft = RecordDraft::new(clock.today());

        let context = ShellContext {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            store,
            config_manager,
            config,
            clock,
            draft,
            running: true,
        };
        context.apply_output_preferences();
        tracing::debug!(base = %base.display(), ?mode, "shell context ready");
        Ok(context)
    }

    pub(crate) fn apply_output_preferences(&self) {
        let plain_mode = !self.config.color_enabled || self.mode == CliMode::Script;
        output::set_preferences(OutputPreferences { plain_mode });
    }

    /// Re-opens the store after settings that shape it have changed.
    pub(crate) fn reload_store(&mut self) -> Result<(), CommandError> {
        let base = self.store.backend().base_dir().to_path_buf();
        self.store = open_store(&base, &self.config)?;
        Ok(())
    }

    pub(crate) fn persist_config(&self) -> Result<(), CommandError> {
        self.config_manager
            .save(&self.config)
            .map_err(CommandError::from)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names()
    }

    pub(crate) fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub(crate) fn rate(&self) -> f64 {
        self.config.rate_per_unit
    }

    pub(crate) fn format_amount(&self, amount: f64) -> String {
        CurrencyFormat::from_config(&self.config).format(amount)
    }

    pub(crate) fn format_date(&self, date: NaiveDate) -> String {
        currency::format_date(date, &self.config.date_format)
    }

    pub(crate) fn parse_date(&self, input: &str) -> Result<NaiveDate, CommandError> {
        currency::parse_date(input, &self.config.date_format).ok_or_else(|| {
            CommandError::InvalidArguments(format!(
                "`{}` is not a date (use YYYY-MM-DD)",
                input
            ))
        })
    }

    /// Asks before a destructive action. Script mode cannot prompt, so it
    /// proceeds only when the command carried `--yes`.
    pub(crate) fn confirm_destructive(
        &self,
        prompt: &str,
        assume_yes: bool,
    ) -> Result<bool, CommandError> {
        if assume_yes {
            return Ok(true);
        }
        match self.mode {
            CliMode::Interactive => cli_io::confirm_action(&self.theme, prompt, false),
            CliMode::Script => {
                cli_io::print_warning(format!("{prompt} Re-run with --yes to confirm."));
                Ok(false)
            }
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = crate::cli::shell::parse_command_line(line)
            .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
        let Some((raw, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        self.dispatch(&raw.to_lowercase(), raw, &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!("Unknown command `{}`.", input));
        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .into_iter()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= 3 {
                cli_io::print_hint(format!("Did you mean `{}`?", name));
                return;
            }
        }
        cli_io::print_hint("Type `help` to list available commands.");
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt("Exit shell?")
            .default(true)
            .interact()?)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Core(WorklogError::Validation(message)) => {
                cli_io::print_error(format!("Cannot save: {}.", message));
                cli_io::print_hint("Set a quantity with `quantity <n>` first.");
                Ok(())
            }
            other => {
                cli_io::print_error(other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }
}

fn open_store(base: &Path, config: &Config) -> Result<RecordStore<FileStore>, WorklogError> {
    let backend = FileStore::new(Some(base.to_path_buf()), Some(config.backup_retention))?;
    Ok(RecordStore::with_key(backend, config.storage_key.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    pub(crate) fn script_context() -> (ShellContext, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        let context =
            ShellContext::with_base_dir(CliMode::Script, temp.path().to_path_buf(), Box::new(clock))
                .expect("context");
        (context, temp)
    }

    #[test]
    fn unknown_commands_do_not_fail_the_loop() {
        let (mut context, _guard) = script_context();
        assert_eq!(context.process_line("histroy").unwrap(), LoopControl::Continue);
    }

    #[test]
    fn exit_command_stops_the_loop() {
        let (mut context, _guard) = script_context();
        assert_eq!(context.process_line("exit").unwrap(), LoopControl::Exit);
    }

    #[test]
    fn register_then_delete_round_trip() {
        let (mut context, _guard) = script_context();
        context.process_line("register 10 2024-01-08").unwrap();
        let records = context.store.list();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].total_value, 50.0);

        let id = records[0].short_id().to_string();
        context.process_line(&format!("delete {id}")).unwrap();
        assert_eq!(context.store.list().len(), 1, "script mode needs --yes");
        context.process_line(&format!("delete {id} --yes")).unwrap();
        assert!(context.store.list().is_empty());
    }

    #[test]
    fn draft_flow_saves_and_keeps_date() {
        let (mut context, _guard) = script_context();
        context.process_line("date 2024-01-14").unwrap();
        let err = context.process_line("save").unwrap_err();
        assert!(matches!(err, CommandError::Core(WorklogError::Validation(_))));

        context.process_line("quantity 20").unwrap();
        context.process_line("save").unwrap();
        let records = context.store.list();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 1, 14).unwrap());
        assert_eq!(context.draft.quantity, None);
        assert_eq!(context.draft.date, NaiveDate::from_ymd_opt(2024, 1, 14).unwrap());
    }

    #[test]
    fn rate_change_applies_only_to_new_records() {
        let (mut context, _guard) = script_context();
        context.process_line("register 4 2024-01-10").unwrap();
        context.process_line("config set rate_per_unit 7.5").unwrap();
        context.process_line("register 4 2024-01-11").unwrap();
        let totals: Vec<f64> = context.store.list().iter().map(|r| r.total_value).collect();
        assert_eq!(totals, vec![30.0, 20.0]);
        assert_eq!(context.config_manager.load().unwrap().rate_per_unit, 7.5);
    }

    #[test]
    fn changing_storage_key_switches_collections() {
        let (mut context, _guard) = script_context();
        context.process_line("register 1 2024-01-10").unwrap();
        context.process_line("config set storage_key side_jobs").unwrap();
        assert!(context.store.list().is_empty());
        assert_eq!(context.store.key(), "side_jobs");
    }

    #[test]
    fn invalid_arguments_are_reported_as_errors() {
        let (mut context, _guard) = script_context();
        assert!(context.process_line("register abc").is_err());
        assert!(context.process_line("register 0").is_err());
        assert!(context.process_line("report 2024-02-01 2024-01-01").is_err());
        assert!(context.store.list().is_empty());
    }
}
