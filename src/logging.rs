//! Logging macros that resolve to `defmt` on the target and `log` on the host.
//!
//! Modules that compile in both worlds import from here; embedded-only
//! modules use `defmt` directly.

#[cfg(feature = "host")]
pub use log::{debug, error, info, trace, warn};

#[cfg(not(feature = "host"))]
pub use defmt::{debug, error, info, trace, warn};
