use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use crossterm::style::Stylize;
use std::io::{self, Write};

use crate::data::record::StudentRecord;

/// Narrow rendering seam the core drives. The terminal implementation owns
/// the table layout, page controls and transient notices; tests substitute
/// a recording implementation.
pub trait Presenter {
    fn render_page(&mut self, rows: &[&StudentRecord], current_page: usize, total_pages: usize);
    fn notify(&mut self, message: &str);
    fn notify_error(&mut self, message: &str);
    /// Explicit yes/no gate for destructive operations.
    fn confirm(&mut self, prompt: &str) -> bool;
}

pub struct TerminalPresenter {
    /// When false, destructive operations proceed without the y/n prompt.
    confirm_destructive: bool,
}

impl TerminalPresenter {
    pub fn new(confirm_destructive: bool) -> Self {
        Self {
            confirm_destructive,
        }
    }
}

impl Presenter for TerminalPresenter {
    fn render_page(&mut self, rows: &[&StudentRecord], current_page: usize, total_pages: usize) {
        if rows.is_empty() {
            println!("{}", "No records to display.".yellow());
        } else {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(
                [
                    "ID", "Name", "Age", "Course", "Email", "Phone", "Address", "Status",
                ]
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
            );

            for s in rows {
                table.add_row(vec![
                    s.id.to_string(),
                    s.name.clone(),
                    s.age.to_string(),
                    s.course.clone(),
                    s.email.clone(),
                    s.phone.clone(),
                    s.address_display(),
                    s.status.clone(),
                ]);
            }

            println!("{table}");
        }

        if total_pages > 0 {
            // one control per page, the current one rendered inert
            let controls: Vec<String> = (1..=total_pages)
                .map(|p| {
                    if p == current_page {
                        format!("[{p}]").dim().to_string()
                    } else {
                        format!(" {p} ")
                    }
                })
                .collect();
            println!("{}", controls.join(""));
        }

        println!(
            "{}",
            format!(
                "{} rows shown, page {} of {}",
                rows.len(),
                current_page,
                total_pages
            )
            .green()
        );
    }

    fn notify(&mut self, message: &str) {
        println!("{}", message.green());
    }

    fn notify_error(&mut self, message: &str) {
        println!("{}", message.red());
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        if !self.confirm_destructive {
            return true;
        }

        print!("{prompt} (y/n): ");
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            return false;
        }
        input.trim().eq_ignore_ascii_case("y")
    }
}
