//! Verbosity levels and the global gate

use std::sync::atomic::{AtomicU8, Ordering};
use strum_macros::{Display, EnumIter, EnumString};

/// How much the janitor core reports, from silent to every node it touches
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    serde::Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(try_from = "String")]
#[repr(u8)]
pub enum Verbosity {
    None = 0,
    #[default]
    Info = 1,
    Verbose = 2,
    Debug = 3,
}

impl Verbosity {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Verbosity::None,
            1 => Verbosity::Info,
            2 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    }
}

impl TryFrom<String> for Verbosity {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Level attached to a single diagnostic message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum MessageLevel {
    Error,
    Warn,
    Info,
    Verbose,
    Debug,
}

impl MessageLevel {
    /// Minimum verbosity at which this level is emitted; `None` means never gated
    pub fn threshold(self) -> Option<Verbosity> {
        match self {
            MessageLevel::Error | MessageLevel::Warn => None,
            MessageLevel::Info => Some(Verbosity::Info),
            MessageLevel::Verbose => Some(Verbosity::Verbose),
            MessageLevel::Debug => Some(Verbosity::Debug),
        }
    }

    /// Whether a message at this level passes the current global verbosity
    pub fn enabled(self) -> bool {
        self.threshold().map_or(true, |min| verbosity() >= min)
    }
}

static VERBOSITY: AtomicU8 = AtomicU8::new(Verbosity::Info as u8);

/// Set the process-wide verbosity used to gate diagnostics
pub fn set_verbosity(level: Verbosity) {
    VERBOSITY.store(level as u8, Ordering::Relaxed);
}

/// Current process-wide verbosity
pub fn verbosity() -> Verbosity {
    Verbosity::from_u8(VERBOSITY.load(Ordering::Relaxed))
}
