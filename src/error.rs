//! Error and result types shared across the library.

use derive_more::{Debug, Display, Error};

/// Errors produced by the power-gauge device abstractions.
#[derive(Debug, Display, Error)]
#[non_exhaustive]
pub enum Error {
    /// The flash driver failed while reading or writing the selection record.
    #[cfg(not(feature = "host"))]
    #[display("flash operation failed")]
    Flash(#[error(not(source))] embassy_rp::flash::Error),

    /// A background task could not be spawned.
    #[cfg(not(feature = "host"))]
    #[display("task spawn failed")]
    TaskSpawn(#[error(not(source))] embassy_executor::SpawnError),

    /// The selection record did not fit in its flash page.
    #[display("selection record too large")]
    RecordTooLarge,
}

/// Convenience alias used throughout the library.
pub type Result<T, E = Error> = core::result::Result<T, E>;
