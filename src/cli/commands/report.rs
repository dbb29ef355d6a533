use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::detail_view::DetailView;
use crate::cli::ui::table_renderer::{Table, TableColumn};
use crate::core::services::ReportService;
use crate::domain::DateRange;

use super::ParsedArgs;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "report",
        "Totals and weekly summaries for a date range",
        "report [start] [end] [--json]",
        cmd_report,
    )]
}

fn cmd_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args);
    parsed.reject_unknown(&["--json"])?;
    let range = resolve_range(context, &parsed.positional)?;
    let report = ReportService::build_report(&context.store.list(), range);

    if parsed.has("--json") {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|err| CommandError::Message(format!("cannot render report: {}", err)))?;
        io::print_info(json);
        return Ok(());
    }

    output_section(format!(
        "Report {} - {}",
        context.format_date(range.start),
        context.format_date(range.end)
    ));
    let totals = DetailView::new("Totals")
        .with_field("Total value", context.format_amount(report.total_value))
        .with_field("Quantity", report.total_quantity.to_string())
        .with_field("Records", report.record_count().to_string())
        .with_field("Average", context.format_amount(report.average_value()));
    io::print_info(totals.render());

    if report.is_empty() {
        io::print_info("No records in this period.");
        return Ok(());
    }
    let mut table = Table::new(vec![
        TableColumn::left("Week"),
        TableColumn::right("Records"),
        TableColumn::right("Quantity"),
        TableColumn::right("Value"),
        TableColumn::right("Average"),
    ]);
    for week in &report.weeks {
        table.push_row(vec![
            format!(
                "{} - {}",
                context.format_date(week.week_start),
                context.format_date(week.week_end)
            ),
            week.count.to_string(),
            week.total_quantity.to_string(),
            context.format_amount(week.total_value),
            context.format_amount(week.average_value()),
        ]);
    }
    io::print_info(table.render());
    Ok(())
}

fn resolve_range(context: &ShellContext, positional: &[&str]) -> Result<DateRange, CommandError> {
    let today = context.today();
    match positional {
        [] => Ok(DateRange::trailing_days(
            today,
            context.config.report_window_days,
        )),
        [start] => Ok(DateRange::new(context.parse_date(start)?, today)?),
        [start, end] => Ok(DateRange::new(
            context.parse_date(start)?,
            context.parse_date(end)?,
        )?),
        _ => Err(CommandError::InvalidArguments(
            "usage: report [start] [end] [--json]".into(),
        )),
    }
}
