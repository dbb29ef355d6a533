use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{Config, ConfigManager},
    core::time::Clock,
    domain::RecordDraft,
    storage::{FileStore, RecordStore},
};

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Session state shared by every command handler.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub store: RecordStore<FileStore>,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub clock: Box<dyn Clock>,
    pub draft: RecordDraft,
    pub running: bool,
}

impl ShellContext {
    pub fn prompt(&self) -> String {
        if self.draft.is_ready() || !self.draft.photos.is_empty() {
            "worklog (draft)> ".to_string()
        } else {
            "worklog> ".to_string()
        }
    }
}
