use serde::{Deserialize, Serialize};

/// Timer presets of the device. Each program fixes a countdown length and
/// the base rotation speed of the platter while the program runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusMode {
    #[serde(rename = "DEEP FOCUS")]
    Deep,
    #[serde(rename = "LIGHT FOCUS")]
    Light,
    #[serde(rename = "BREAK MODE")]
    Break,
}

impl FocusMode {
    pub const ALL: [FocusMode; 3] = [FocusMode::Deep, FocusMode::Light, FocusMode::Break];

    pub fn duration_seconds(&self) -> u64 {
        match self {
            FocusMode::Deep => 50 * 60,
            FocusMode::Light => 15 * 60,
            FocusMode::Break => 5 * 60,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FocusMode::Deep => "PRGM_DEEP",
            FocusMode::Light => "PRGM_LIGHT",
            FocusMode::Break => "PRGM_BREAK",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FocusMode::Deep => "DEEP FOCUS",
            FocusMode::Light => "LIGHT FOCUS",
            FocusMode::Break => "BREAK MODE",
        }
    }

    /// Platter rotation in degrees per animation frame while playing.
    pub fn rotation_speed(&self) -> f64 {
        match self {
            FocusMode::Deep => 0.9,
            FocusMode::Light => 1.2,
            FocusMode::Break => 1.6,
        }
    }

    pub fn next(&self) -> FocusMode {
        match self {
            FocusMode::Deep => FocusMode::Light,
            FocusMode::Light => FocusMode::Break,
            FocusMode::Break => FocusMode::Deep,
        }
    }
}

impl Default for FocusMode {
    fn default() -> Self {
        FocusMode::Light
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_match_programs() {
        assert_eq!(FocusMode::Deep.duration_seconds(), 3000);
        assert_eq!(FocusMode::Light.duration_seconds(), 900);
        assert_eq!(FocusMode::Break.duration_seconds(), 300);
    }

    #[test]
    fn mode_serializes_to_display_name() {
        let json = serde_json::to_string(&FocusMode::Light).unwrap();
        assert_eq!(json, "\"LIGHT FOCUS\"");
        let back: FocusMode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, FocusMode::Light);
    }
}
