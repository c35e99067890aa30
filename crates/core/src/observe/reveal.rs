use folio_protocol::SectionId;

/// Entrance animation length, in seconds. Mirrors the original one-second
/// fade/slide transition.
pub const REVEAL_DURATION: f64 = 1.0;

/// Intersection ratio at which a hidden block becomes visible.
pub const REVEAL_THRESHOLD: f64 = 0.10;

/// Vertical slide-in distance at progress 0, in page units.
pub const REVEAL_RISE: f64 = 64.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Hidden,
    Visible,
}

/// One-shot reveal latch for a single content block.
///
/// `Hidden` is the initial state, `Visible` the terminal one. The latch
/// fires the first time the block's intersection ratio reaches the
/// threshold and then ignores all further observations, including the
/// ratio dropping back to zero — entrance animations never replay.
#[derive(Debug, Clone)]
pub struct RevealController {
    state: RevealState,
    threshold: f64,
    revealed_at: Option<f64>,
}

impl RevealController {
    pub fn new() -> Self {
        Self::with_threshold(REVEAL_THRESHOLD)
    }

    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            state: RevealState::Hidden,
            threshold,
            revealed_at: None,
        }
    }

    /// Feed one intersection observation. `now` is the caller's clock in
    /// seconds (any monotonic origin); it anchors the entrance animation.
    /// Returns `true` exactly once, on the observation that fires the
    /// latch.
    pub fn observe(&mut self, ratio: f64, now: f64) -> bool {
        if self.state == RevealState::Visible {
            return false;
        }
        if ratio >= self.threshold {
            self.state = RevealState::Visible;
            self.revealed_at = Some(now);
            return true;
        }
        false
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == RevealState::Visible
    }

    /// Animation progress in `0.0..=1.0` at time `now`: 0.0 while hidden,
    /// ramping to 1.0 over [`REVEAL_DURATION`] after the latch fires.
    pub fn progress(&self, now: f64) -> f64 {
        match self.revealed_at {
            None => 0.0,
            Some(t0) => ((now - t0) / REVEAL_DURATION).clamp(0.0, 1.0),
        }
    }
}

impl Default for RevealController {
    fn default() -> Self {
        Self::new()
    }
}

/// Ease-out curve applied to reveal progress, approximating the original
/// CSS transition timing.
pub fn ease_out(p: f64) -> f64 {
    let p = p.clamp(0.0, 1.0);
    1.0 - (1.0 - p) * (1.0 - p)
}

/// Per-frame snapshot of each section's eased reveal progress, consumed
/// by the page view emitter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealFrame([f64; SectionId::ALL.len()]);

impl RevealFrame {
    /// Everything fully revealed; useful for non-animating hosts.
    pub fn all_visible() -> Self {
        Self([1.0; SectionId::ALL.len()])
    }

    pub fn hidden() -> Self {
        Self([0.0; SectionId::ALL.len()])
    }

    /// Capture eased progress from one controller per section, in
    /// declaration order.
    pub fn capture(controllers: &[RevealController], now: f64) -> Self {
        let mut frame = Self::hidden();
        for (slot, ctl) in frame.0.iter_mut().zip(controllers) {
            *slot = ease_out(ctl.progress(now));
        }
        frame
    }

    pub fn get(&self, id: SectionId) -> f64 {
        self.0[SectionId::ALL.iter().position(|&s| s == id).unwrap_or(0)]
    }

    pub fn set(&mut self, id: SectionId, progress: f64) {
        if let Some(i) = SectionId::ALL.iter().position(|&s| s == id) {
            self.0[i] = progress.clamp(0.0, 1.0);
        }
    }
}
