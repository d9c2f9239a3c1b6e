use async_trait::async_trait;
use ratatui::crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{Frame, layout::Rect};

use crate::deck::{knob, platter};
use crate::ui::components::{
    knob::KnobWidget,
    mode_row::{ModeRow, mode_at},
    platter::PlatterWidget,
    timer_ring::TimerWidget,
    track_info::TrackInfoWidget,
};
use crate::ui::context::AppContext;
use crate::ui::layout;
use crate::ui::state::AppState;
use crate::ui::traits::{Action, View};

#[derive(Clone, Copy, PartialEq)]
enum DragTarget {
    None,
    Platter,
    Volume,
    Space,
}

/// The main device face: platter, focus program readout, signal display
/// and the two rotary knobs. Remembers where it drew each control so
/// pointer gestures can be mapped back onto them.
pub struct DeckView {
    platter_area: Option<Rect>,
    mode_area: Option<Rect>,
    volume_area: Option<Rect>,
    space_area: Option<Rect>,
    drag: DragTarget,
}

impl DeckView {
    pub fn new() -> Self {
        Self {
            platter_area: None,
            mode_area: None,
            volume_area: None,
            space_area: None,
            drag: DragTarget::None,
        }
    }
}

impl Default for DeckView {
    fn default() -> Self {
        Self::new()
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x + area.width
        && row >= area.y
        && row < area.y + area.height
}

/// Pointer offset from the center of a control, with the terminal's 2:1
/// cell aspect folded in so circles behave like circles.
fn center_offset(area: Rect, column: u16, row: u16) -> (f64, f64) {
    let cx = area.x as f64 + area.width as f64 / 2.0;
    let cy = area.y as f64 + area.height as f64 / 2.0;
    let dx = column as f64 - cx;
    let dy = (row as f64 - cy) * 2.0;
    (dx, dy)
}

#[async_trait(?Send)]
impl View for DeckView {
    fn render(&mut self, f: &mut Frame, area: Rect, _state: &AppState, ctx: &AppContext) {
        let (platter_area, panel) = layout::deck_chunks(area);
        let (mode_area, timer_area, info_area, knobs) = layout::panel_chunks(panel);
        let (volume_area, space_area) = layout::knob_chunks(knobs);

        self.platter_area = Some(platter_area);
        self.mode_area = Some(mode_area);
        self.volume_area = Some(volume_area);
        self.space_area = Some(space_area);

        f.render_widget(ModeRow::new(ctx.timer.mode()), mode_area);

        let title = ctx
            .current_track()
            .map(|t| t.title.clone())
            .unwrap_or_else(|| "NO_SIGNAL".to_string());

        f.render_widget(
            PlatterWidget::new(ctx.platter.rotation(), &title, ctx.platter.is_dragging()),
            platter_area,
        );
        f.render_widget(TimerWidget::new(&ctx.timer), timer_area);
        f.render_widget(
            TrackInfoWidget::new(
                ctx.current_track(),
                ctx.progress(),
                ctx.is_playing(),
                ctx.shuffle,
            ),
            info_area,
        );
        f.render_widget(KnobWidget::new("VOL", ctx.volume), volume_area);
        f.render_widget(KnobWidget::new("SPC", ctx.space), space_area);
    }

    async fn handle_input(
        &mut self,
        _key: KeyEvent,
        _state: &AppState,
        _ctx: &AppContext,
    ) -> Option<Action> {
        None
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, _ctx: &AppContext) -> Option<Action> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(area) = self.mode_area
                    && contains(area, mouse.column, mouse.row)
                {
                    return mode_at(area, mouse.column).map(Action::SetMode);
                }
                if let Some(area) = self.platter_area
                    && contains(area, mouse.column, mouse.row)
                {
                    let (dx, dy) = center_offset(area, mouse.column, mouse.row);
                    self.drag = DragTarget::Platter;
                    return Some(Action::PlatterPress(platter::pointer_angle(dx, dy)));
                }
                if let Some(area) = self.volume_area
                    && contains(area, mouse.column, mouse.row)
                {
                    let (dx, dy) = center_offset(area, mouse.column, mouse.row);
                    self.drag = DragTarget::Volume;
                    return Some(Action::SetVolume(knob::value_from_pointer(dx, dy)));
                }
                if let Some(area) = self.space_area
                    && contains(area, mouse.column, mouse.row)
                {
                    let (dx, dy) = center_offset(area, mouse.column, mouse.row);
                    self.drag = DragTarget::Space;
                    return Some(Action::SetSpace(knob::value_from_pointer(dx, dy)));
                }
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => match self.drag {
                DragTarget::Platter => {
                    let area = self.platter_area?;
                    let (dx, dy) = center_offset(area, mouse.column, mouse.row);
                    Some(Action::PlatterDrag(platter::pointer_angle(dx, dy)))
                }
                DragTarget::Volume => {
                    let area = self.volume_area?;
                    let (dx, dy) = center_offset(area, mouse.column, mouse.row);
                    Some(Action::SetVolume(knob::value_from_pointer(dx, dy)))
                }
                DragTarget::Space => {
                    let area = self.space_area?;
                    let (dx, dy) = center_offset(area, mouse.column, mouse.row);
                    Some(Action::SetSpace(knob::value_from_pointer(dx, dy)))
                }
                DragTarget::None => None,
            },
            MouseEventKind::Up(MouseButton::Left) => {
                let was_platter = self.drag == DragTarget::Platter;
                self.drag = DragTarget::None;
                was_platter.then_some(Action::PlatterRelease)
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                let step = if mouse.kind == MouseEventKind::ScrollUp {
                    0.05
                } else {
                    -0.05
                };
                if let Some(area) = self.volume_area
                    && contains(area, mouse.column, mouse.row)
                {
                    return Some(Action::NudgeVolume(step));
                }
                if let Some(area) = self.space_area
                    && contains(area, mouse.column, mouse.row)
                {
                    return Some(Action::NudgeSpace(step));
                }
                None
            }
            _ => None,
        }
    }
}
