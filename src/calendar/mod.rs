pub mod grid;
pub mod reminder;
pub mod store;

pub use grid::{DayCell, WeekStart};
pub use reminder::Reminder;
pub use store::Store;
