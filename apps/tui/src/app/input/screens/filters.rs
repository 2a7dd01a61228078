use crate::app::form::FilterField;
use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::app::state::{App, AppScreen};
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn handle_filters_input(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('r') {
            app.reset_filters(Local::now().date_naive());
        }
        return;
    }

    let fields = FilterField::ALL.len();
    match key.code {
        KeyCode::Esc => app.switch_screen(AppScreen::Dashboard),
        KeyCode::Up => {
            let index = wrap_decrement(app.form.field.index(), fields);
            app.form.field = FilterField::from_index(index).unwrap_or(FilterField::State);
        }
        KeyCode::Down => {
            let index = wrap_increment(app.form.field.index(), fields);
            app.form.field = FilterField::from_index(index).unwrap_or(FilterField::State);
        }
        KeyCode::Left => cycle(app, false),
        KeyCode::Right => cycle(app, true),
        KeyCode::Enter => {
            if app.apply_filters() {
                app.switch_screen(AppScreen::Table);
            }
        }
        KeyCode::Backspace => match app.form.field {
            FilterField::State => app.form.state.pop(&app.options.states),
            FilterField::Biome => app.form.biome.pop(&app.options.biomes),
            FilterField::StartDate
            | FilterField::EndDate
            | FilterField::FrpMin
            | FilterField::FrpMax => {
                if let Some(input) = app.form.text_input_mut() {
                    input.pop();
                }
            }
            FilterField::Criticality => app.form.criticality = None,
        },
        KeyCode::Char(ch) => match app.form.field {
            FilterField::State => app.form.state.push(ch, &app.options.states),
            FilterField::Biome => app.form.biome.push(ch, &app.options.biomes),
            FilterField::StartDate
            | FilterField::EndDate
            | FilterField::FrpMin
            | FilterField::FrpMax => {
                if let Some(input) = app.form.text_input_mut() {
                    input.push(ch);
                }
            }
            FilterField::Criticality => {}
        },
        _ => {}
    }
}

fn cycle(app: &mut App, forward: bool) {
    match app.form.field {
        FilterField::State => app.form.state.cycle(&app.options.states, forward),
        FilterField::Biome => app.form.biome.cycle(&app.options.biomes, forward),
        FilterField::Criticality => app.form.cycle_criticality(forward),
        FilterField::StartDate
        | FilterField::EndDate
        | FilterField::FrpMin
        | FilterField::FrpMax => {}
    }
}
