use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::app::state::{App, AppScreen, REFRESHING};
use crossterm::event::{KeyCode, KeyEvent};

mod filters;
mod help;
mod table;

pub fn dispatch_input(app: &mut App, key: KeyEvent) {
    if help::handle_help_toggle(app, key.code) {
        return;
    }

    if handle_navigation(app, key.code) {
        return;
    }

    match app.screen {
        AppScreen::Table => table::handle_table_input(app, key.code),
        AppScreen::Filters => filters::handle_filters_input(app, key),
        AppScreen::Dashboard | AppScreen::Alerts => handle_global_keys(app, key.code),
    }
}

/// Screen switching, available everywhere.
fn handle_navigation(app: &mut App, key: KeyCode) -> bool {
    let len = AppScreen::ALL.len();
    let target = match key {
        KeyCode::Tab => wrap_increment(app.screen.index(), len),
        KeyCode::BackTab => wrap_decrement(app.screen.index(), len),
        _ => return false,
    };
    if let Some(screen) = AppScreen::from_index(target) {
        app.switch_screen(screen);
    }
    true
}

/// Single-letter commands shared by every screen except the filters form,
/// where letters are text input.
pub(super) fn handle_global_keys(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('r') => {
            app.status_message = REFRESHING.to_string();
            app.refresh_all();
        }
        KeyCode::Char('f') => app.switch_screen(AppScreen::Filters),
        KeyCode::Char('e') => app.export_csv(),
        KeyCode::Char(digit @ '1'..='4') => {
            let index = digit as usize - '1' as usize;
            if let Some(screen) = AppScreen::from_index(index) {
                app.switch_screen(screen);
            }
        }
        _ => {}
    }
}
