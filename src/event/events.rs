use crate::player::state::PlayerEvent;

/// App-wide events flowing over the flume channel, produced by background
/// tasks and consumed by the render loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// One second elapsed; the single interval task is the only sender.
    TimerTick,
    /// A PKCE round-trip started; the user has to open this URL.
    AuthUrl(String),
    /// Provider binding report.
    Player(PlayerEvent),
    /// Short status code for the footer readout.
    Status(String),
}
