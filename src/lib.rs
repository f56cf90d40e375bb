//! Device abstractions for an animated 14-LED power gauge on the Pico 1 and 2.
//!
//! Ten "gauge" LEDs render 10-bit frames from one of five built-in animation
//! tracks; four "accelerator" LEDs mirror the gauge at a coarser resolution.
//! A debounced button advances to the next track, and the selection survives
//! power cycles in the last flash sector.
//!
//! The pure core (pattern tables, bit decode, playback stepping, selection
//! validation) also compiles on the host behind the `host` feature, which is
//! how the integration tests under `tests/` run. The runnable firmware images
//! are in `demos/`.
#![cfg_attr(not(feature = "host"), no_std)]
#![cfg_attr(not(feature = "host"), no_main)]

// Compile-time checks: exactly one board must be selected (unless testing with host feature)
#[cfg(all(not(any(feature = "pico1", feature = "pico2")), not(feature = "host")))]
compile_error!("Must enable exactly one board feature: 'pico1' or 'pico2'");

#[cfg(all(feature = "pico1", feature = "pico2"))]
compile_error!("Cannot enable both 'pico1' and 'pico2' features simultaneously");

#[cfg(all(not(feature = "arm"), not(feature = "host")))]
compile_error!("Embedded builds require the 'arm' architecture feature");

// These modules require embassy_rp and are excluded when testing on host
#[cfg(not(feature = "host"))]
pub mod button;
pub mod decode;
mod error;
#[cfg(not(feature = "host"))]
pub mod flash_store;
#[cfg(not(feature = "host"))]
pub mod gauge;
pub mod logging;
pub mod playback;
pub mod selector;
pub mod tracks;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
