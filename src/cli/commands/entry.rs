//! Record entry: the one-shot `register` and the step-by-step draft commands.

use std::path::Path;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::detail_view::DetailView;
use crate::core::{photos, services::RecordService};
use crate::domain::{DailyRecord, RecordDraft};

use super::{parse_quantity, required};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "register",
            "Save a record immediately",
            "register <quantity> [date]",
            cmd_register,
        ),
        CommandEntry::new(
            "draft",
            "Show the pending record and its value",
            "draft",
            cmd_draft,
        ),
        CommandEntry::new("date", "Set the draft date", "date <YYYY-MM-DD>", cmd_date),
        CommandEntry::new(
            "quantity",
            "Set the draft quantity",
            "quantity <units>",
            cmd_quantity,
        ),
        CommandEntry::new(
            "attach",
            "Attach image files to the draft",
            "attach <path>...",
            cmd_attach,
        ),
        CommandEntry::new(
            "detach",
            "Remove an attached photo from the draft",
            "detach <number>",
            cmd_detach,
        ),
        CommandEntry::new("save", "Save the draft as a record", "save", cmd_save),
        CommandEntry::new("discard", "Clear the draft", "discard", cmd_discard),
    ]
}

fn cmd_register(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "register <quantity> [date]";
    let quantity = parse_quantity(required(args, 0, usage)?)?;
    let date = match args.get(1) {
        Some(raw) => context.parse_date(raw)?,
        None => context.today(),
    };
    let mut draft = RecordDraft::new(date);
    draft.quantity = Some(quantity);
    let record = RecordService::register(&context.store, &mut draft, context.rate())?;
    announce_saved(context, &record);
    Ok(())
}

fn cmd_draft(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let draft = &context.draft;
    let quantity = draft
        .quantity
        .map(|quantity| quantity.to_string())
        .unwrap_or_else(|| "-".to_string());
    let view = DetailView::new("Pending record")
        .with_field("Date", context.format_date(draft.date))
        .with_field("Quantity", quantity)
        .with_field("Rate", context.format_amount(context.rate()))
        .with_field("Value", context.format_amount(draft.preview_total(context.rate())))
        .with_field("Photos", draft.photos.len().to_string())
        .with_field("Ready", if draft.is_ready() { "yes" } else { "no" });
    io::print_info(view.render());
    Ok(())
}

fn cmd_date(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw = required(args, 0, "date <YYYY-MM-DD>")?;
    context.draft.date = context.parse_date(raw)?;
    io::print_info(format!("Draft date: {}", context.format_date(context.draft.date)));
    Ok(())
}

fn cmd_quantity(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let quantity = parse_quantity(required(args, 0, "quantity <units>")?)?;
    context.draft.quantity = Some(quantity);
    io::print_info(format!(
        "Draft quantity: {} ({})",
        quantity,
        context.format_amount(context.draft.preview_total(context.rate()))
    ));
    if !context.draft.is_ready() {
        io::print_warning("Quantity must be greater than zero before saving.");
    }
    Ok(())
}

fn cmd_attach(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    required(args, 0, "attach <path>...")?;
    let mut attached = 0;
    for raw in args {
        match photos::load_photo(Path::new(raw)) {
            Ok(payload) => {
                context.draft.attach(payload);
                attached += 1;
            }
            Err(err) => io::print_warning(format!("Skipped `{}`: {}", raw, err)),
        }
    }
    io::print_info(format!(
        "Attached {} photo(s); draft has {}.",
        attached,
        context.draft.photos.len()
    ));
    Ok(())
}

fn cmd_detach(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw = required(args, 0, "detach <number>")?;
    let position: usize = raw.parse().ok().filter(|n| *n > 0).ok_or_else(|| {
        CommandError::InvalidArguments(format!("`{}` is not a photo number", raw))
    })?;
    context.draft.detach(position - 1)?;
    io::print_info(format!(
        "Removed photo {}; draft has {}.",
        position,
        context.draft.photos.len()
    ));
    Ok(())
}

fn cmd_save(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let rate = context.rate();
    let record = RecordService::register(&context.store, &mut context.draft, rate)?;
    announce_saved(context, &record);
    Ok(())
}

fn cmd_discard(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.draft = RecordDraft::new(context.today());
    io::print_info("Draft cleared.");
    Ok(())
}

fn announce_saved(context: &ShellContext, record: &DailyRecord) {
    io::print_success(format!(
        "Saved record {}: {} units on {} = {}",
        record.short_id(),
        record.quantity,
        context.format_date(record.date),
        context.format_amount(record.total_value)
    ));
}
