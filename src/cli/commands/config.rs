use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::table_renderer::{Table, TableColumn};
use crate::config::CONFIG_KEYS;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change preferences",
        "config [show|set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        return show_config(context);
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}> <value>",
                    CONFIG_KEYS.join("|")
                )));
            }
            let key = args[1].to_lowercase();
            let value = args[2..].join(" ");
            set_value(context, &key, value.trim())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{}`",
            other
        ))),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    output_section("Configuration");
    let mut table = Table::new(vec![TableColumn::left("Key"), TableColumn::left("Value")]);
    for (key, value) in context.config.entries() {
        table.push_row(vec![key.to_string(), value]);
    }
    io::print_info(table.render());
    io::print_info(format!("File: {}", context.config_manager.path().display()));
    Ok(())
}

fn set_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let mut updated = context.config.clone();
    updated.set(key, value)?;
    context.config = updated;
    context.persist_config()?;
    context.apply_output_preferences();
    if matches!(key, "storage_key" | "backup_retention") {
        context.reload_store()?;
    }
    tracing::info!(key, value, "configuration updated");
    io::print_success(format!("{} = {}", key, value));
    Ok(())
}
