//! Structured error type shared by the engine, the backends and the raw-value parsers.

/// Error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// Bad index, unknown enum value or out-of-range configuration field.
    InvalidConfig,

    /// Operation attempted before a successful `begin`.
    NotInitialized,

    /// Backend cannot accept a frame right now. Retried on the next tick.
    ResourceBusy,

    /// Backend reported a hardware failure.
    HardwareFault,

    /// Allocation failed while bringing up the backend.
    OutOfMemory,
}

/// An error with its category, a numeric detail and a static diagnostic.
///
/// `detail` carries the offending value where there is one (the bad index,
/// the unknown mode number, a driver error code) and `0` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedError {
    pub kind: ErrorKind,
    pub detail: i32,
    pub message: &'static str,
}

impl LedError {
    /// Creates an error.
    #[inline]
    pub const fn new(kind: ErrorKind, detail: i32, message: &'static str) -> Self {
        Self {
            kind,
            detail,
            message,
        }
    }

    pub const fn invalid_config(detail: i32, message: &'static str) -> Self {
        Self::new(ErrorKind::InvalidConfig, detail, message)
    }

    pub const fn not_initialized() -> Self {
        Self::new(ErrorKind::NotInitialized, 0, "begin not called")
    }

    pub const fn busy(message: &'static str) -> Self {
        Self::new(ErrorKind::ResourceBusy, 0, message)
    }

    pub const fn hardware_fault(detail: i32, message: &'static str) -> Self {
        Self::new(ErrorKind::HardwareFault, detail, message)
    }

    /// Returns true for the recoverable "try again next tick" condition.
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.kind == ErrorKind::ResourceBusy
    }
}

impl core::fmt::Display for LedError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let category = match self.kind {
            ErrorKind::InvalidConfig => "invalid config",
            ErrorKind::NotInitialized => "not initialized",
            ErrorKind::ResourceBusy => "resource busy",
            ErrorKind::HardwareFault => "hardware fault",
            ErrorKind::OutOfMemory => "out of memory",
        };
        write!(f, "{}: {} ({})", category, self.message, self.detail)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LedError {}

/// Result alias used across the crate.
pub type Result<T> = core::result::Result<T, LedError>;
