use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::session::mode::FocusMode;
use crate::ui::traits::Action;

const VOLUME_STEP: f64 = 0.05;
const SPACE_STEP: f64 = 0.05;

/// Global key map, consulted after the active view declines a key. Skipped
/// entirely while a text-input view is active.
pub fn global_action(key: KeyEvent) -> Option<Action> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Action::Quit),
        (KeyCode::Char('q'), _) => Some(Action::Quit),
        (KeyCode::Char(' '), _) => Some(Action::TogglePlayPause),
        (KeyCode::Char('n'), _) => Some(Action::NextTrack),
        (KeyCode::Enter, _) => Some(Action::ToggleSession),
        (KeyCode::Tab, _) => Some(Action::CycleMode),
        (KeyCode::Char('1'), _) => Some(Action::SetMode(FocusMode::Deep)),
        (KeyCode::Char('2'), _) => Some(Action::SetMode(FocusMode::Light)),
        (KeyCode::Char('3'), _) => Some(Action::SetMode(FocusMode::Break)),
        (KeyCode::Char('h'), _) => Some(Action::OpenHistory),
        (KeyCode::Char('l'), _) => Some(Action::OpenLibrary),
        (KeyCode::Char('s'), _) => Some(Action::ToggleShuffle),
        (KeyCode::Char('-'), _) => Some(Action::NudgeVolume(-VOLUME_STEP)),
        (KeyCode::Char('='), _) | (KeyCode::Char('+'), _) => {
            Some(Action::NudgeVolume(VOLUME_STEP))
        }
        (KeyCode::Char('['), _) => Some(Action::NudgeSpace(-SPACE_STEP)),
        (KeyCode::Char(']'), _) => Some(Action::NudgeSpace(SPACE_STEP)),
        (KeyCode::Esc, _) => Some(Action::CloseOverlay),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn mode_selectors_map_to_the_three_programs() {
        assert_eq!(
            global_action(key(KeyCode::Char('1'))),
            Some(Action::SetMode(FocusMode::Deep))
        );
        assert_eq!(
            global_action(key(KeyCode::Char('2'))),
            Some(Action::SetMode(FocusMode::Light))
        );
        assert_eq!(
            global_action(key(KeyCode::Char('3'))),
            Some(Action::SetMode(FocusMode::Break))
        );
    }

    #[test]
    fn ctrl_c_always_quits() {
        let evt = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(global_action(evt), Some(Action::Quit));
    }

    #[test]
    fn unmapped_keys_fall_through() {
        assert_eq!(global_action(key(KeyCode::Char('z'))), None);
    }
}
