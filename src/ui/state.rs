/// Transient UI state that is not part of the domain model.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Short status readout for the footer, in the device's terse register.
    pub status: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            status: "SYSTEM READY".to_string(),
        }
    }
}
