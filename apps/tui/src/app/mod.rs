// Application state and the background loads feeding it

pub mod actions;
pub mod form;
pub mod input;
pub mod state;

pub use actions::AppActions;
pub use input::handle_input;
pub use state::{App, AppScreen};
