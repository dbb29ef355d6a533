use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::table_renderer::{Table, TableColumn};
use crate::utils::build_info;

use super::{required, ParsedArgs};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "backups",
            "List stored backups of the record collection",
            "backups",
            cmd_backups,
        ),
        CommandEntry::new(
            "restore",
            "Replace the records with a backup",
            "restore <backup> [--yes]",
            cmd_restore,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit).with_aliases(&["quit"]),
    ]
}

fn cmd_backups(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let backups = context
        .store
        .backend()
        .list_backups(context.store.key())?;
    output_section(format!(
        "Backups of `{}` (keeping {})",
        context.store.key(),
        context.store.backend().retention()
    ));
    if backups.is_empty() {
        io::print_info("No backups yet.");
        return Ok(());
    }
    let mut table = Table::new(vec![TableColumn::left("Name"), TableColumn::left("Created")]);
    for backup in backups {
        let created = backup
            .created_at
            .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "-".into());
        table.push_row(vec![backup.name, created]);
    }
    io::print_info(table.render());
    Ok(())
}

fn cmd_restore(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args);
    parsed.reject_unknown(&["--yes", "-y"])?;
    let name = required(&parsed.positional, 0, "restore <backup> [--yes]")?;
    let prompt = format!("Replace all current records with backup `{}`?", name);
    if !context.confirm_destructive(&prompt, parsed.assume_yes())? {
        io::print_info("Restore cancelled.");
        return Ok(());
    }
    let key = context.store.key().to_string();
    context.store.backend().restore(&key, name)?;
    io::print_success(format!(
        "Restored `{}`; {} record(s) loaded.",
        name,
        context.store.list().len()
    ));
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output_section(format!("Worklog {}", meta.version));
    io::print_info(format!(
        "  Build hash   : {} ({})",
        meta.git_hash, meta.git_status
    ));
    io::print_info(format!("  Built at     : {}", meta.timestamp));
    io::print_info(format!("  Target       : {}", meta.target));
    io::print_info(format!("  Profile      : {}", meta.profile));
    io::print_info(format!("  Rustc        : {}", meta.rustc));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.registry.get(&name.to_lowercase()) {
            Some(entry) => {
                io::print_info(format!("{} - {}", entry.name, entry.description));
                io::print_info(format!("usage: {}", entry.usage));
                if !entry.aliases.is_empty() {
                    io::print_info(format!("aliases: {}", entry.aliases.join(", ")));
                }
            }
            None => context.suggest_command(name),
        }
        return Ok(());
    }

    output_section("Commands");
    let mut table = Table::new(vec![
        TableColumn::left("Usage"),
        TableColumn::left("Description"),
    ]);
    for entry in context.registry.list() {
        table.push_row(vec![entry.usage.to_string(), entry.description.to_string()]);
    }
    io::print_info(table.render());
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
