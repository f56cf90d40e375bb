//! The track-advance button: debounced edge detection and the task that
//! applies confirmed presses.

use defmt::{error, info};
use embassy_rp::Peri;
use embassy_rp::gpio::{Input, Pull};
use embassy_time::{Duration, Timer};

use crate::flash_store::SelectionFlash;
use crate::playback::SelectionShared;
use crate::selector::SelectionStore;

/// Settle delay after a falling edge before the line is rechecked.
const SETTLE_DELAY: Duration = Duration::from_millis(10);

/// A device abstraction for the active-low track-advance button.
///
/// The pin uses the internal pull-up; pressing the button pulls the line to
/// ground.
pub struct AdvanceButton<'a> {
    input: Input<'a>,
}

impl<'a> AdvanceButton<'a> {
    /// Creates the button from its pin.
    #[must_use]
    pub fn new<P: embassy_rp::gpio::Pin>(pin: Peri<'a, P>) -> Self {
        Self {
            input: Input::new(pin, Pull::Up),
        }
    }

    /// Returns whether the button is currently pressed.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.input.is_low()
    }

    /// Waits for the next confirmed press.
    ///
    /// A falling edge arms the check; if the line still reads pressed after
    /// [`SETTLE_DELAY`], the press is confirmed. An edge whose line has
    /// returned high by then was contact bounce and produces no event.
    pub async fn wait_for_confirmed_press(&mut self) {
        loop {
            self.input.wait_for_falling_edge().await;
            Timer::after(SETTLE_DELAY).await;
            if self.is_pressed() {
                return;
            }
            // bounce; keep waiting
        }
    }
}

/// Watches the advance button and applies each confirmed press: select the
/// next track, persist the selection, raise the restart flag.
#[embassy_executor::task]
pub async fn advance_button_task(
    mut button: AdvanceButton<'static>,
    shared: &'static SelectionShared,
    mut store: SelectionFlash,
) -> ! {
    loop {
        button.wait_for_confirmed_press().await;
        let id = shared.select_next();
        if store.store_selection(id).is_err() {
            // The new selection still plays; it just won't survive a power cycle.
            error!("advance: selection not persisted");
        }
        shared.request_restart();
        info!("advance: track {} ({})", id.index(), id.track().name());
    }
}
