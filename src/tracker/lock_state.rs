/// Lock state for the single-target tracking lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockState {
    /// No target identity held; the next non-empty frame locks onto the
    /// largest candidate region
    #[default]
    Unlocked,
    /// A target identity is held and re-matched frame to frame
    Locked,
}
