use std::path::Path;

use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::detail_view::DetailView;
use crate::cli::ui::table_renderer::{Table, TableColumn};
use crate::core::{photos, services::RecordService};

use super::{required, ParsedArgs};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "history",
            "List records, newest first, optionally filtered",
            "history [term]",
            cmd_history,
        )
        .with_aliases(&["list"]),
        CommandEntry::new("show", "Show one record", "show <id>", cmd_show),
        CommandEntry::new(
            "delete",
            "Delete a record permanently",
            "delete <id> [--yes]",
            cmd_delete,
        )
        .with_aliases(&["rm"]),
        CommandEntry::new(
            "photos",
            "Export a record's photos to a directory",
            "photos <id> <directory>",
            cmd_photos,
        ),
    ]
}

fn cmd_history(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let term = args.join(" ");
    let records = RecordService::search(&context.store.list(), term.trim());
    output_section("History");
    if records.is_empty() {
        io::print_info("No records found.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        TableColumn::left("ID"),
        TableColumn::left("Date"),
        TableColumn::right("Quantity"),
        TableColumn::right("Value"),
        TableColumn::right("Photos"),
    ]);
    for record in &records {
        table.push_row(vec![
            record.short_id().to_string(),
            context.format_date(record.date),
            record.quantity.to_string(),
            context.format_amount(record.total_value),
            record.photos.len().to_string(),
        ]);
    }
    io::print_info(table.render());
    io::print_info(format!("{} record(s)", records.len()));
    Ok(())
}

fn cmd_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let record = context.store.resolve(required(args, 0, "show <id>")?)?;
    let view = DetailView::new(format!("Record {}", record.short_id()))
        .with_field("ID", record.id.as_str())
        .with_field("Date", context.format_date(record.date))
        .with_field("Quantity", record.quantity.to_string())
        .with_field("Value", context.format_amount(record.total_value))
        .with_field("Photos", record.photos.len().to_string());
    io::print_info(view.render());
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args);
    parsed.reject_unknown(&["--yes", "-y"])?;
    let record = context
        .store
        .resolve(required(&parsed.positional, 0, "delete <id> [--yes]")?)?;

    let prompt = format!(
        "Delete the record of {} ({} units)? This cannot be undone.",
        context.format_date(record.date),
        record.quantity
    );
    if !context.confirm_destructive(&prompt, parsed.assume_yes())? {
        io::print_info("Deletion cancelled.");
        return Ok(());
    }
    context.store.remove(&record.id)?;
    io::print_success(format!("Deleted record {}.", record.short_id()));
    Ok(())
}

fn cmd_photos(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "photos <id> <directory>";
    let record = context.store.resolve(required(args, 0, usage)?)?;
    let dir = Path::new(required(args, 1, usage)?);
    if !record.has_photos() {
        io::print_info(format!("Record {} has no photos.", record.short_id()));
        return Ok(());
    }
    let written = photos::export_photos(&record, dir)?;
    for path in &written {
        io::print_info(format!("  {}", path.display()));
    }
    io::print_success(format!("Exported {} photo(s).", written.len()));
    Ok(())
}
