use crate::app::input::screens::handle_global_keys;
use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_table_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Right | KeyCode::Char('n') | KeyCode::PageDown => {
            app.table.next_page();
        }
        KeyCode::Left | KeyCode::Char('p') | KeyCode::PageUp => {
            app.table.previous_page();
        }
        KeyCode::Home => app.table.first_page(),
        KeyCode::End => app.table.last_page(),
        other => handle_global_keys(app, other),
    }
}
