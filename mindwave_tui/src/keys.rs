//! Key bindings. Form pages take typed characters, so navigation there moves
//! to the function keys and Esc goes back.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use mindwave::Route;

use crate::state::Intent;

fn function_key_route(n: u8) -> Option<Route> {
    Route::ALL.get(usize::from(n).checked_sub(1)?).copied()
}

/// Map a key press to an intent for the given page
pub fn intent_for(key: KeyEvent, route: Route) -> Option<Intent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Some(Intent::Quit);
    }
    if let KeyCode::F(n) = key.code {
        return function_key_route(n).map(Intent::Navigate);
    }

    if matches!(route, Route::Register | Route::Login) {
        return match key.code {
            KeyCode::Esc => Some(Intent::Back),
            KeyCode::Tab | KeyCode::Down => Some(Intent::FocusNext),
            KeyCode::BackTab | KeyCode::Up => Some(Intent::FocusPrev),
            KeyCode::Enter => Some(Intent::Submit),
            KeyCode::Backspace => Some(Intent::Backspace),
            KeyCode::Char('r') if ctrl => Some(Intent::ToggleReveal),
            KeyCode::Char(c) if !ctrl => Some(Intent::Input(c)),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Intent::Quit),
        KeyCode::Char(c @ '1'..='9') => Route::from_nav_key(c).map(Intent::Navigate),
        KeyCode::Tab => Some(Intent::NextPage),
        KeyCode::BackTab => Some(Intent::PrevPage),
        KeyCode::Char(' ') => Some(Intent::ToggleRun),
        KeyCode::Char('w') => Some(Intent::CycleSpan),
        KeyCode::Char('r') => Some(Intent::Reset),
        KeyCode::Left => Some(Intent::CarouselPrev),
        KeyCode::Right => Some(Intent::CarouselNext),
        KeyCode::Char('b') => Some(Intent::CycleBand),
        KeyCode::Char('a') => Some(Intent::ToggleAnalysis),
        KeyCode::Enter if route == Route::Home => Some(Intent::Navigate(Route::Register)),
        KeyCode::Enter => Some(Intent::ToggleAnalysis),
        KeyCode::Backspace => Some(Intent::Back),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_digits_navigate_outside_forms() {
        assert_eq!(
            intent_for(press(KeyCode::Char('2')), Route::Home),
            Some(Intent::Navigate(Route::Simulate))
        );
        assert_eq!(intent_for(press(KeyCode::Char('9')), Route::Home), None);
    }

    #[test]
    fn test_digits_are_typed_on_forms() {
        assert_eq!(
            intent_for(press(KeyCode::Char('1')), Route::Register),
            Some(Intent::Input('1'))
        );
        assert_eq!(
            intent_for(press(KeyCode::Char('q')), Route::Login),
            Some(Intent::Input('q'))
        );
        assert_eq!(intent_for(press(KeyCode::Tab), Route::Login), Some(Intent::FocusNext));
        assert_eq!(intent_for(press(KeyCode::Esc), Route::Login), Some(Intent::Back));
    }

    #[test]
    fn test_global_keys() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(intent_for(ctrl_c, Route::Register), Some(Intent::Quit));
        assert_eq!(
            intent_for(press(KeyCode::F(3)), Route::Login),
            Some(Intent::Navigate(Route::Results))
        );
        assert_eq!(intent_for(press(KeyCode::F(12)), Route::Home), None);
        assert_eq!(intent_for(press(KeyCode::Char(' ')), Route::Simulate), Some(Intent::ToggleRun));
    }
}
