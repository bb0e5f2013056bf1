//! Output mode.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show results and status lines.
    #[default]
    Normal,
    /// Show results only.
    Quiet,
}

impl OutputMode {
    /// Check if this mode shows status messages (headers, successes, warnings).
    ///
    /// Results and errors are always shown.
    pub fn shows_status(&self) -> bool {
        matches!(self, Self::Normal)
    }
}
