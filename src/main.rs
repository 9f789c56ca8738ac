mod app;
mod calendar;
mod colors;
mod components;
mod config;
mod event;
mod logging;
mod theme;
mod tui;

use std::path::PathBuf;
use std::time::Duration;

use app::{App, InputMode};
use chrono::Local;
use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use config::Config;
use crossterm::event::{KeyCode, KeyModifiers};
use event::AppEvent;
use ratatui::layout::{Constraint, Layout, Rect};
use tracing::info;

#[derive(Parser)]
#[command(name = "reminder-calendar")]
#[command(about = "Month calendar with reminders, in your terminal")]
struct Cli {
    /// Config file (defaults to <config dir>/reminder-calendar/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reminder storage file, overrides data_file from config
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Month to open, e.g. "2026-10"
    #[arg(short, long, value_parser = app::parse_month)]
    month: Option<chrono::NaiveDate>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(data) = cli.data {
        config.data_file = Some(data);
    }

    let data_file = config.data_file()?;
    let log_dir = config::data_dir()
        .or_else(|| data_file.parent().map(|p| p.to_path_buf()))
        .ok_or_else(|| eyre!("Could not determine a log directory"))?;
    logging::init(&log_dir.join("reminder-calendar.log"), &config.log_level)?;

    theme::init(config.theme.to_theme());

    let store = calendar::Store::open(&data_file)?;
    info!(path = %data_file.display(), "starting");

    let today = Local::now().date_naive();
    let mut app = App::new(store, config.week_start, config.default_time()?, today);
    if let Some(month) = cli.month {
        app.select_date(month);
    }

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    tui::restore()?;
    info!("exiting");
    result
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        let mut month_layout = None;
        terminal.draw(|frame| {
            let area = frame.area();

            // Main layout: content + status bar
            let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);

            month_layout = Some(render_calendar(frame, layout[0], app));

            if let Some(ref form) = app.dialog {
                components::ReminderForm::render(frame, area, form);
            }

            if app.show_help {
                components::Help::render(frame, area);
            }

            components::StatusBar::render(frame, layout[1], app);
        })?;
        if let Some(layout) = month_layout {
            app.month_layout = layout;
        }

        let Some(event) = event::next_event(Duration::from_millis(100))? else {
            continue;
        };

        match event {
            AppEvent::Resize => {}
            AppEvent::Click { column, row } => {
                if !app.show_help {
                    app.status_message = None;
                    app.handle_click(column, row);
                }
            }
            AppEvent::Key(key) => {
                // Clear status message on any key
                app.status_message = None;

                // Help overlay takes priority
                if app.show_help {
                    if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
                        app.show_help = false;
                    }
                    continue;
                }

                match app.input_mode() {
                    InputMode::Dialog => handle_dialog_input(app, key.code, key.modifiers),
                    InputMode::Normal => handle_normal_input(app, key.code, key.modifiers),
                }
            }
        }
    }

    Ok(())
}

fn handle_normal_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.running = false;
        }
        (KeyCode::Char('t'), _) => app.go_to_today(),
        (KeyCode::Enter, _) | (KeyCode::Char('o'), _) | (KeyCode::Char('e'), _) => app.open_selected(),
        (KeyCode::Char('n'), _) => app.handle_create_new_reminder(app.selected_date),
        (KeyCode::Char('x'), _) | (KeyCode::Delete, _) => app.delete_selected_reminder(),
        (KeyCode::Char('D'), _) => app.delete_all_reminders_at_day(app.selected_date),
        (KeyCode::Char('J'), _) | (KeyCode::Tab, _) => app.next_reminder(),
        (KeyCode::Char('K'), _) | (KeyCode::BackTab, _) => app.prev_reminder(),
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => app.prev_day(),
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => app.next_day(),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.prev_week(),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.next_week(),
        (KeyCode::Char('['), _) | (KeyCode::PageUp, _) => app.handle_prev_month(),
        (KeyCode::Char(']'), _) | (KeyCode::PageDown, _) => app.handle_next_month(),
        (KeyCode::Char('?'), _) => app.show_help = true,
        _ => {}
    }
}

fn handle_dialog_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    use components::reminder_form::FormField;

    match (code, modifiers) {
        (KeyCode::Esc, _) => app.handle_reminder_dialog_close(),
        (KeyCode::Enter, _) => app.submit_reminder_dialog(),
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => app.delete_reminder_in_dialog(),
        (KeyCode::Tab, _) | (KeyCode::Down, _) => app.form_tab(),
        (KeyCode::BackTab, _) | (KeyCode::Up, _) => app.form_backtab(),
        (KeyCode::Backspace, _) => app.form_backspace(),
        (KeyCode::Char(c), _) => {
            // Space (or any key) cycles colors on the color field
            let on_color = app
                .dialog
                .as_ref()
                .is_some_and(|f| f.active_field == FormField::Color);
            if on_color {
                if c == ' ' {
                    app.form_cycle_color();
                }
            } else {
                app.form_input_char(c);
            }
        }
        _ => {}
    }
}

/// Month grid, plus the day panel when there is room for it.
fn render_calendar(
    frame: &mut ratatui::Frame,
    area: Rect,
    app: &App,
) -> components::MonthLayout {
    let (grid_area, panel_area) = if area.width >= 110 {
        let cols = Layout::horizontal([Constraint::Min(70), Constraint::Length(36)]).split(area);
        (cols[0], Some(cols[1]))
    } else {
        (area, None)
    };

    let layout = components::MonthView::render(
        frame,
        grid_area,
        app.current_month,
        &app.month_days,
        app.selected_date,
        app.selected_reminder,
        app.week_start,
    );

    if let Some(panel) = panel_area {
        components::DayPanel::render(
            frame,
            panel,
            app.selected_date,
            app.selected_reminders(),
            app.selected_reminder.unwrap_or(usize::MAX),
        );
    }

    layout
}
