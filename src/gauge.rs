//! A device abstraction for the two LED banks: ten gauge lines plus four
//! accelerator lines.
//!
//! Rendering is soft-PWM: one pass drives each lit line high for one strobe
//! slot in turn, so at most one LED conducts at a time. That caps supply
//! current the same way the original hardware's strobing did, and repeated
//! passes give the persistence-of-vision brightness.

use embassy_rp::gpio::Output;
use embassy_time::{Duration, Timer};

use crate::decode::{ACCEL_LED_COUNT, GAUGE_LED_COUNT, LedMasks};

/// Time each line slot is held during one pass. Unlit lines idle for the same
/// slot, keeping pass duration independent of the frame contents.
const STROBE_SLOT: Duration = Duration::from_micros(2);

/// The 14 LED output lines.
///
/// The constructor's pin arrays are the wiring table: gauge index 0 is the
/// lowest gauge LED, and the accelerator order matches the `ACCEL_*` bits of
/// [`LedMasks`] (D0, D1, A0, A1).
pub struct GaugeLeds<'a> {
    gauge: [Output<'a>; GAUGE_LED_COUNT],
    accel: [Output<'a>; ACCEL_LED_COUNT],
}

impl<'a> GaugeLeds<'a> {
    /// Creates the LED banks from their output lines, all initially dark.
    #[must_use]
    pub fn new(gauge: [Output<'a>; GAUGE_LED_COUNT], accel: [Output<'a>; ACCEL_LED_COUNT]) -> Self {
        Self { gauge, accel }
    }

    /// Runs one soft-PWM pass over all 14 lines for the given masks.
    pub async fn strobe(&mut self, masks: LedMasks) {
        for (index, pin) in self.gauge.iter_mut().enumerate() {
            if masks.gauge & (1_u16 << index) != 0 {
                pin.set_high();
            }
            Timer::after(STROBE_SLOT).await;
            pin.set_low();
        }
        for (index, pin) in self.accel.iter_mut().enumerate() {
            if masks.accel & (1_u8 << index) != 0 {
                pin.set_high();
            }
            Timer::after(STROBE_SLOT).await;
            pin.set_low();
        }
    }
}
