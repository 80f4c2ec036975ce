//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::app::manage_qr::format_created;
use crate::qr::QrRecord;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Spinner shown while a request is in flight
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print a table of saved QR codes
pub fn print_qr_table(records: &[QrRecord]) {
    if records.is_empty() {
        info("No QR codes generated yet. Save one with 'qrdash qr save <url>'");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").fg(Color::Cyan),
            Cell::new("Link").fg(Color::Cyan),
            Cell::new("Created").fg(Color::Cyan),
            Cell::new("Image").fg(Color::Cyan),
        ]);

    for record in records {
        table.add_row(vec![
            Cell::new(record.id),
            Cell::new(&record.url),
            Cell::new(format_created(record)),
            Cell::new(format!("{} KiB", record.qr_image.len() * 3 / 4 / 1024)),
        ]);
    }

    println!("{table}");
}

/// Print a labelled value
pub fn print_field(label: &str, value: &str) {
    println!("  {} {}", format!("{}:", label).bold(), value);
}

/// Print a screen heading
pub fn print_heading(title: &str) {
    println!();
    println!("{}", title.bold().underline());
    println!();
}

/// Confirm an action with the user. Any input error counts as "no".
pub fn confirm(message: &str) -> bool {
    dialoguer::Confirm::with_theme(&dialoguer::theme::ColorfulTheme::default())
        .with_prompt(message)
        .default(false)
        .interact()
        .unwrap_or(false)
}
