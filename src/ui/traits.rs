use async_trait::async_trait;
use ratatui::crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect};

use crate::event::events::Event;
use crate::session::mode::FocusMode;
use crate::ui::context::AppContext;
use crate::ui::state::AppState;

/// Everything a key press or pointer gesture can ask the app to do. Views
/// translate input into these; the event handler owns the mutations.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    TogglePlayPause,
    NextTrack,
    ToggleSession,
    SetMode(FocusMode),
    CycleMode,
    SetVolume(f64),
    NudgeVolume(f64),
    SetSpace(f64),
    NudgeSpace(f64),
    ToggleShuffle,
    OpenHistory,
    OpenLibrary,
    CloseOverlay,
    SubmitAuthInput(String),
    GoOffline,
    PlayPlaylist(String),
    PlatterPress(f64),
    PlatterDrag(f64),
    PlatterRelease,
}

// The context holds the ambience output stream, which is not Send, so view
// futures stay on the main task.
#[async_trait(?Send)]
pub trait View {
    fn render(&mut self, f: &mut Frame, area: Rect, state: &AppState, ctx: &AppContext);

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action>;

    fn handle_mouse(&mut self, _mouse: MouseEvent, _ctx: &AppContext) -> Option<Action> {
        None
    }

    async fn on_event(&mut self, _event: &Event, _ctx: &AppContext) {}

    /// Views that collect typed text claim printable keys for themselves;
    /// the global key map stays out of the way while one is active.
    fn wants_text_input(&self) -> bool {
        false
    }
}
