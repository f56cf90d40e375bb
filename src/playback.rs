//! The playback engine: the state shared with the button task, the frame
//! stepper, and the task that renders frames to the LED banks.
//!
//! Tracks loop forever. Hitting the sentinel raises the same restart flag a
//! confirmed button press raises, so "wrap to frame 0" and "start the newly
//! selected track" are one mechanism. The engine checks the flag between
//! energize passes, so a press takes effect within one frame's rendering
//! rather than waiting out the full pass count.

use portable_atomic::{AtomicBool, AtomicU8, Ordering};

use crate::tracks::{FRAME_SENTINEL, TrackId};

/// Soft-PWM passes spent on each frame. Empirically tuned for perceived
/// brightness: more passes hold each frame longer and look brighter, fewer
/// speed the animation up.
pub const ENERGIZE_PASSES: u32 = 130;

// ============================================================================
// SelectionShared - the only cross-task state
// ============================================================================

/// The selection state shared between the button task and the playback task.
///
/// Both fields are single-word atomics, so neither task needs a critical
/// section. The selector has one writer (the button task); the restart flag
/// is raised by both tasks and consumed by the playback task.
pub struct SelectionShared {
    track: AtomicU8,
    restart: AtomicBool,
}

impl SelectionShared {
    /// Shared state with track 0 selected and no restart pending.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            track: AtomicU8::new(0),
            restart: AtomicBool::new(false),
        }
    }

    /// Replaces the selection, without requesting a restart. Used once at
    /// startup to install the persisted selection.
    pub fn set_current(&self, id: TrackId) {
        self.track.store(id.index() as u8, Ordering::Release);
    }

    /// The currently selected track.
    #[must_use]
    pub fn current(&self) -> TrackId {
        TrackId::from_word(u16::from(self.track.load(Ordering::Acquire))).unwrap_or(TrackId::FIRST)
    }

    /// Advances the selection to the next track, wrapping past the last.
    /// Single writer: only the button task calls this.
    pub fn select_next(&self) -> TrackId {
        let next = self.current().next();
        self.track.store(next.index() as u8, Ordering::Release);
        next
    }

    /// Asks the playback task to restart the selected track from frame 0.
    pub fn request_restart(&self) {
        self.restart.store(true, Ordering::Release);
    }

    /// True while a restart request is pending.
    #[must_use]
    pub fn restart_pending(&self) -> bool {
        self.restart.load(Ordering::Acquire)
    }

    /// Consumes a pending restart request, returning whether one was set.
    pub fn take_restart(&self) -> bool {
        self.restart.swap(false, Ordering::AcqRel)
    }
}

impl Default for SelectionShared {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Player - the frame stepper
// ============================================================================

/// Steps a cursor through the selected track's frames.
///
/// Each outer iteration is [`begin_frame`](Self::begin_frame) (consume a
/// pending restart, fetch), render, then [`finish_frame`](Self::finish_frame)
/// (advance). The cursor is volatile working state; only the selection
/// persists.
pub struct Player {
    cursor: usize,
}

impl Player {
    /// A player positioned at the start of the selected track.
    #[must_use]
    pub const fn new() -> Self {
        Self { cursor: 0 }
    }

    /// Begins an iteration: a pending restart rewinds the cursor to 0, then
    /// the current frame is fetched. On the sentinel this requests the
    /// restart that loops the track and returns `None` without advancing.
    pub fn begin_frame(&mut self, shared: &SelectionShared) -> Option<u16> {
        if shared.take_restart() {
            self.cursor = 0;
        }
        let value = shared.current().track().frame(self.cursor);
        if value == FRAME_SENTINEL {
            shared.request_restart();
            return None;
        }
        Some(value)
    }

    /// Completes the iteration by advancing to the next frame.
    pub fn finish_frame(&mut self) {
        self.cursor = self.cursor.saturating_add(1);
    }

    /// Current frame offset into the selected track.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// The playback task
// ============================================================================

#[cfg(not(feature = "host"))]
mod engine {
    use defmt::info;

    use super::{ENERGIZE_PASSES, Player, SelectionShared};
    use crate::decode::decode;
    use crate::gauge::GaugeLeds;

    /// Renders the selected track forever, one energize cycle per frame.
    #[embassy_executor::task]
    pub async fn playback_task(
        mut leds: GaugeLeds<'static>,
        shared: &'static SelectionShared,
    ) -> ! {
        info!("playback: starting on track {}", shared.current().index());
        let mut player = Player::new();
        loop {
            let Some(value) = player.begin_frame(shared) else {
                // Sentinel: the next iteration rewinds to frame 0.
                continue;
            };
            let masks = decode(value);
            let mut pass = 0;
            while pass < ENERGIZE_PASSES && !shared.restart_pending() {
                leds.strobe(masks).await;
                pass += 1;
            }
            player.finish_frame();
        }
    }
}

#[cfg(not(feature = "host"))]
pub use engine::playback_task;
