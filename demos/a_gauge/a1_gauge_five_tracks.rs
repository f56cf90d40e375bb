#![allow(missing_docs)]
#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use core::{convert::Infallible, future, panic};
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use power_gauge::{
    Error, Result,
    button::{AdvanceButton, advance_button_task},
    flash_store::SelectionFlash,
    gauge::GaugeLeds,
    playback::{SelectionShared, playback_task},
    selector::restore_selection,
};
use {defmt_rtt as _, panic_probe as _};

/// The only state the two tasks share.
static SELECTION: SelectionShared = SelectionShared::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());

    // Restore the persisted selection before the button task exists; after
    // this, only that task writes the record.
    let mut store = SelectionFlash::new(p.FLASH);
    let restored = restore_selection(&mut store)?;
    SELECTION.set_current(restored);

    // Wiring table: gauge LEDs bottom to top on GPIO 2-11, then the
    // accelerator LEDs D0, D1, A0, A1 on GPIO 16-19.
    let gauge = [
        Output::new(p.PIN_2, Level::Low),
        Output::new(p.PIN_3, Level::Low),
        Output::new(p.PIN_4, Level::Low),
        Output::new(p.PIN_5, Level::Low),
        Output::new(p.PIN_6, Level::Low),
        Output::new(p.PIN_7, Level::Low),
        Output::new(p.PIN_8, Level::Low),
        Output::new(p.PIN_9, Level::Low),
        Output::new(p.PIN_10, Level::Low),
        Output::new(p.PIN_11, Level::Low),
    ];
    let accel = [
        Output::new(p.PIN_16, Level::Low),
        Output::new(p.PIN_17, Level::Low),
        Output::new(p.PIN_18, Level::Low),
        Output::new(p.PIN_19, Level::Low),
    ];
    let leds = GaugeLeds::new(gauge, accel);
    let button = AdvanceButton::new(p.PIN_13);

    spawner
        .spawn(playback_task(leds, &SELECTION))
        .map_err(Error::TaskSpawn)?;
    spawner
        .spawn(advance_button_task(button, &SELECTION, store))
        .map_err(Error::TaskSpawn)?;

    future::pending().await // Keep running
}
