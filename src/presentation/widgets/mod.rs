mod filter_bar;
mod footer_bar;
mod input;
mod status_bar;
mod student_form;
mod student_table;

pub use filter_bar::{FilterBar, FilterBarState};
pub use footer_bar::{FocusContext, FooterBar, FooterBarStyle};
pub use input::TextInput;
pub use status_bar::StatusBar;
pub use student_form::{StudentFormPanel, StudentFormState};
pub use student_table::{StudentTable, StudentTableState, birth_date_cell, format_date};
