pub mod day_panel;
pub mod help;
pub mod month_view;
pub mod reminder_form;
pub mod status_bar;

pub use day_panel::DayPanel;
pub use help::Help;
pub use month_view::{MonthHit, MonthLayout, MonthView};
pub use reminder_form::{ReminderForm, ReminderFormState};
pub use status_bar::StatusBar;
