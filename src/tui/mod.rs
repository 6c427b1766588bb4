pub mod app;
pub mod result_list;
pub mod terminal;
pub mod theme;

pub use app::{App, ViewState};
pub use result_list::ResultList;
pub use terminal::{run, TerminalGuard};
pub use theme::Theme;
