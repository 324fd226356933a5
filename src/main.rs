use anyhow::Result;
use crossterm::style::Stylize;
use reedline::{
    Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus, Reedline, Signal,
};
use std::borrow::Cow;
use std::io::{self, Write};
use std::path::PathBuf;

use student_cli::app_state::{AppState, SaveOutcome};
use student_cli::config::Config;
use student_cli::data::export::CSV_FILENAME;
use student_cli::data::record::{Address, StudentRecord};
use student_cli::data::sort::SortColumn;
use student_cli::data::store::{LoadOutcome, SeedSource, StudentStore};
use student_cli::presenter::{Presenter, TerminalPresenter};
use student_cli::storage::JsonFileBackend;
use student_cli::utils::app_paths::AppPaths;

struct StudentPrompt;

impl Prompt for StudentPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed("students> ")
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _edit_mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("... ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!(
            "({}reverse search: {})",
            prefix, history_search.term
        ))
    }
}

enum Flow {
    Continue,
    Quit,
}

fn print_help() {
    println!("Commands:");
    println!("  list              Show the current page");
    println!("  search [text]     Free-text search over name/course/email/phone");
    println!("  course [value]    Filter by exact course (empty clears)");
    println!("  status [value]    Filter by exact status (empty clears)");
    println!("  filters           Show available course/status values");
    println!("  sort <column>     Sort by id|name|age|course|email|phone|status");
    println!("  page <n>          Jump to page n");
    println!("  pagesize <n>      Rows per page");
    println!("  add               Add a student (interactive form)");
    println!("  edit <id>         Edit a student by id");
    println!("  delete <id>       Delete a student by id");
    println!("  clear             Delete ALL students");
    println!("  export [file]     Export all students to CSV (default {CSV_FILENAME})");
    println!("  help              This text");
    println!("  quit              Exit");
}

/// One form field: show the current value, empty input keeps it.
fn prompt_field(label: &str, current: Option<&str>) -> Result<String> {
    match current {
        Some(value) => print!("{label} [{value}]: "),
        None => print!("{label}: "),
    }
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let trimmed = input.trim();

    if trimmed.is_empty() {
        Ok(current.unwrap_or("").to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

/// Field-by-field form. `current` pre-fills for edits; `id` is fixed by the
/// caller since the core never assigns ids itself.
fn record_form(id: u64, current: Option<&StudentRecord>) -> Result<StudentRecord> {
    let name = prompt_field("Name", current.map(|s| s.name.as_str()))?;
    let age_text = prompt_field(
        "Age",
        current.map(|s| s.age.to_string()).as_deref(),
    )?;
    let age: u32 = age_text
        .parse()
        .map_err(|_| anyhow::anyhow!("Age must be a number, got {age_text:?}"))?;
    let course = prompt_field("Course", current.map(|s| s.course.as_str()))?;
    let email = prompt_field("Email", current.map(|s| s.email.as_str()))?;
    let phone = prompt_field("Phone", current.map(|s| s.phone.as_str()))?;
    let city = prompt_field("City", current.map(|s| s.address.city.as_str()))?;
    let area = prompt_field("Area", current.map(|s| s.address.area.as_str()))?;
    let zip = prompt_field("ZIP", current.map(|s| s.address.zip.as_str()))?;
    let status = prompt_field(
        "Status",
        Some(current.map(|s| s.status.as_str()).unwrap_or("Active")),
    )?;

    Ok(StudentRecord {
        id,
        name,
        age,
        course,
        email,
        phone,
        address: Address { city, area, zip },
        status,
    })
}

fn next_id(app: &AppState) -> u64 {
    app.store().records().iter().map(|r| r.id).max().unwrap_or(0) + 1
}

fn handle_command(
    line: &str,
    app: &mut AppState,
    presenter: &mut TerminalPresenter,
) -> Result<Flow> {
    let mut parts = line.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or("");
    let rest = parts.next().unwrap_or("").trim();

    match command {
        "" => {}
        "help" => print_help(),
        "quit" | "exit" => return Ok(Flow::Quit),
        "list" => app.render(presenter),
        "search" => {
            let (course, status) = {
                let f = app.filters();
                (f.course.clone(), f.status.clone())
            };
            app.on_search(rest, &course, &status);
            app.render(presenter);
        }
        "course" => {
            let (query, status) = {
                let f = app.filters();
                (f.query.clone(), f.status.clone())
            };
            app.on_search(&query, rest, &status);
            app.render(presenter);
        }
        "status" => {
            let (query, course) = {
                let f = app.filters();
                (f.query.clone(), f.course.clone())
            };
            app.on_search(&query, &course, rest);
            app.render(presenter);
        }
        "filters" => {
            println!("Courses:  {}", app.store().distinct_courses().join(", "));
            println!("Statuses: {}", app.store().distinct_statuses().join(", "));
        }
        "sort" => match SortColumn::parse(rest) {
            Some(column) => {
                app.on_sort(column)?;
                app.render(presenter);
            }
            None => presenter.notify_error(&format!("Unknown sort column {rest:?}")),
        },
        "page" => match rest.parse::<usize>() {
            Ok(page) => {
                app.on_page(page);
                app.render(presenter);
            }
            Err(_) => presenter.notify_error("Usage: page <number>"),
        },
        "pagesize" => match rest.parse::<usize>() {
            Ok(size) if size > 0 => {
                app.on_page_size(size);
                app.render(presenter);
            }
            _ => presenter.notify_error("Usage: pagesize <positive number>"),
        },
        "add" => {
            let record = record_form(next_id(app), None)?;
            app.on_save(record)?;
            presenter.notify("Added");
            app.render(presenter);
        }
        "edit" => match rest.parse::<u64>() {
            Ok(id) => match app.on_edit(id) {
                Some(current) => match record_form(id, Some(&current)) {
                    Ok(record) => {
                        let outcome = app.on_save(record)?;
                        presenter.notify(match outcome {
                            SaveOutcome::Updated => "Updated",
                            SaveOutcome::Added => "Added",
                        });
                        app.render(presenter);
                    }
                    Err(e) => {
                        app.on_cancel_edit();
                        presenter.notify_error(&format!("{e:#}"));
                    }
                },
                None => presenter.notify_error(&format!("No student with id {id}")),
            },
            Err(_) => presenter.notify_error("Usage: edit <id>"),
        },
        "delete" => match rest.parse::<u64>() {
            Ok(id) => {
                if presenter.confirm("Delete this student?") {
                    if app.on_delete(id)? {
                        presenter.notify("Deleted");
                    } else {
                        presenter.notify_error(&format!("No student with id {id}"));
                    }
                    app.render(presenter);
                }
            }
            Err(_) => presenter.notify_error("Usage: delete <id>"),
        },
        "clear" => {
            if presenter.confirm("Delete ALL data?") {
                app.on_clear()?;
                presenter.notify("Cleared all");
                app.render(presenter);
            }
        }
        "export" => {
            let path = if rest.is_empty() {
                PathBuf::from(CSV_FILENAME)
            } else {
                PathBuf::from(rest)
            };
            match app.on_export(&path) {
                Ok(message) => presenter.notify(&message),
                Err(e) => presenter.notify_error(&format!("{e:#}")),
            }
        }
        other => presenter.notify_error(&format!("Unknown command {other:?}, try 'help'")),
    }

    Ok(Flow::Continue)
}

fn main() -> Result<()> {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format!("Could not load config, using defaults: {e:#}").yellow());
            Config::default()
        }
    };

    if let Err(e) = student_cli::logging::init_tracing() {
        eprintln!("{}", format!("Logging disabled: {e:#}").yellow());
    }

    let data_file = match &config.behavior.data_file {
        Some(path) => path.clone(),
        None => AppPaths::records_file()?,
    };
    let seed = match &config.behavior.seed_file {
        Some(path) => SeedSource::File(path.clone()),
        None => SeedSource::Bundled,
    };

    let mut presenter = TerminalPresenter::new(config.behavior.confirm_destructive);
    let mut store = StudentStore::new(Box::new(JsonFileBackend::new(data_file)));

    match store.load(&seed) {
        Ok(LoadOutcome::Persisted) => {}
        Ok(LoadOutcome::Seeded) => presenter.notify("Loaded demo data"),
        Ok(LoadOutcome::SeedFailed) => {
            presenter.notify_error("Failed to load seed data, starting with an empty list")
        }
        Err(e) => {
            presenter.notify_error(&format!("Could not read saved records: {e:#}"));
        }
    }

    let mut app = AppState::new(store, config.display.rows_per_page);
    app.render(&mut presenter);
    println!("Type 'help' for commands.");

    let mut line_editor = Reedline::create();
    let prompt = StudentPrompt;

    loop {
        match line_editor.read_line(&prompt)? {
            Signal::Success(line) => match handle_command(line.trim(), &mut app, &mut presenter) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                // failures are terminal for that one command, never for the app
                Err(e) => presenter.notify_error(&format!("{e:#}")),
            },
            Signal::CtrlC | Signal::CtrlD => break,
        }
    }

    Ok(())
}
