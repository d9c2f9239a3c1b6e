use super::track::{Track, placeholder_tracks};

/// Virtual playback of the placeholder program, used while no provider is
/// connected. Progress advances once per second in proportion to the track
/// duration and rolls over to the next track at the end.
#[derive(Debug, Clone)]
pub struct LocalProgram {
    tracks: Vec<Track>,
    index: usize,
    /// Position within the current track. Integer milliseconds, so a
    /// 215-second track rolls over on exactly the 215th one-second tick.
    position_ms: u64,
    playing: bool,
}

impl Default for LocalProgram {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalProgram {
    pub fn new() -> Self {
        Self {
            tracks: placeholder_tracks(),
            index: 0,
            position_ms: 0,
            playing: false,
        }
    }

    pub fn current(&self) -> &Track {
        &self.tracks[self.index]
    }

    pub fn progress(&self) -> f64 {
        self.position_ms as f64 / self.current().duration_ms as f64
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    pub fn toggle(&mut self) {
        self.playing = !self.playing;
    }

    pub fn set_progress(&mut self, progress: f64) {
        let duration = self.current().duration_ms;
        self.position_ms = (progress.clamp(0.0, 1.0) * duration as f64) as u64;
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.tracks.len();
        self.position_ms = 0;
    }

    /// One second of virtual playback.
    pub fn tick(&mut self) {
        if !self.playing {
            return;
        }
        self.position_ms += 1000;
        if self.position_ms >= self.current().duration_ms {
            self.next();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::history::{HistoryStore, SessionHistory, SessionRecord};
    use crate::session::mode::FocusMode;
    use crate::session::timer::{FocusTimer, TimerEvent};
    use std::sync::{Arc, Mutex};

    #[test]
    fn progress_advances_and_rolls_over() {
        let mut program = LocalProgram::new();
        program.set_playing(true);
        let first = program.current().title.clone();

        // NIGHT_DRIVE runs 215 s.
        for _ in 0..214 {
            program.tick();
        }
        assert_eq!(program.current().title, first);
        assert!(program.progress() < 1.0);

        program.tick();
        assert_eq!(program.current().title, "VOID_ECHO");
        assert_eq!(program.progress(), 0.0);
    }

    #[test]
    fn paused_program_holds_position() {
        let mut program = LocalProgram::new();
        for _ in 0..10 {
            program.tick();
        }
        assert_eq!(program.progress(), 0.0);
    }

    #[test]
    fn scrub_is_clamped() {
        let mut program = LocalProgram::new();
        program.set_progress(1.7);
        assert_eq!(program.progress(), 1.0);
        program.set_progress(-0.3);
        assert_eq!(program.progress(), 0.0);
    }

    #[derive(Default, Clone)]
    struct MemoryStore {
        saved: Arc<Mutex<Option<Vec<SessionRecord>>>>,
    }

    impl HistoryStore for MemoryStore {
        fn load(&self) -> std::io::Result<Option<Vec<SessionRecord>>> {
            Ok(self.saved.lock().unwrap().clone())
        }

        fn save(&mut self, records: &[SessionRecord]) -> std::io::Result<()> {
            *self.saved.lock().unwrap() = Some(records.to_vec());
            Ok(())
        }
    }

    /// LIGHT program, full 15 minutes: exactly one record, configured
    /// duration, carrying the title active at completion.
    #[test]
    fn completed_light_session_logs_one_record() {
        let mut timer = FocusTimer::new(FocusMode::Light);
        let mut program = LocalProgram::new();
        let mut history = SessionHistory::load(Box::new(MemoryStore::default()));

        timer.start();
        program.set_playing(true);

        let mut completions = 0;
        for _ in 0..timer.total() {
            program.tick();
            if timer.tick() == Some(TimerEvent::Completed) {
                completions += 1;
                program.set_playing(false);
                history.record(SessionRecord::new(
                    timer.mode(),
                    1_700_000_000_000,
                    vec![program.current().title.clone()],
                ));
            }
        }

        assert_eq!(completions, 1);
        assert_eq!(history.len(), 1);
        let record = &history.records()[0];
        assert_eq!(record.duration_seconds, 900);
        assert_eq!(record.mode, FocusMode::Light);
        // 900 s into the looped program (215 + 180 + 240 + 215 = 850) the
        // second pass of VOID_ECHO is active.
        assert_eq!(record.tracks, vec!["VOID_ECHO"]);
    }
}
