//! # Lifecycle Flags
//!
//! On-ledger lifecycle flags for requests and responses.
//!
//! These are the raw flags stored by the ledger, not the richer derived
//! states the state machine produces. The decision layer only reads them;
//! every transition is enforced externally by the ledger program.
//!
//! # Lifecycles
//!
//! ```text
//! Request:  Constructed → Active → Canceled
//!
//! Response: Active → Canceled
//!             │
//!             └→ WaitingForLastLook → SettlingPreparations
//!                                        │
//!                                        └→ ReadyForSettling → Settled
//!                                                  │
//!                                                  └→ Defaulted
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ledger lifecycle flag of a negotiation request.
///
/// # Examples
///
/// ```
/// use rfq_settle::domain::value_objects::RequestLifecycle;
///
/// assert!(RequestLifecycle::Active.accepts_responses());
/// assert!(!RequestLifecycle::Canceled.accepts_responses());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum RequestLifecycle {
    /// Created but not yet finalized; legs may still change.
    #[default]
    Constructed = 0,

    /// Finalized and open for responses (until the active window lapses).
    Active = 1,

    /// Canceled by the taker.
    Canceled = 2,
}

impl RequestLifecycle {
    /// Returns true if the ledger would still accept responses
    /// (subject to the active window, which this flag does not encode).
    #[inline]
    #[must_use]
    pub const fn accepts_responses(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for RequestLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Constructed => "CONSTRUCTED",
            Self::Active => "ACTIVE",
            Self::Canceled => "CANCELED",
        };
        write!(f, "{s}")
    }
}

/// Ledger lifecycle flag of a response.
///
/// # Examples
///
/// ```
/// use rfq_settle::domain::value_objects::ResponseLifecycle;
///
/// assert!(ResponseLifecycle::SettlingPreparations.in_settlement_phase());
/// assert!(ResponseLifecycle::Settled.is_terminal());
/// assert!(!ResponseLifecycle::Active.in_settlement_phase());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum ResponseLifecycle {
    /// Quoted and standing; may still be canceled or confirmed.
    #[default]
    Active = 0,

    /// Canceled by the maker.
    Canceled = 1,

    /// Confirmed by the taker, awaiting the maker's last look.
    WaitingForLastLook = 2,

    /// Both parties are escrowing legs for settlement.
    SettlingPreparations = 3,

    /// All legs prepared on both sides; settlement can execute.
    ReadyForSettling = 4,

    /// Settlement completed (terminal).
    Settled = 5,

    /// One or both parties failed to prepare in time (terminal).
    Defaulted = 6,
}

impl ResponseLifecycle {
    /// Returns true if this is a terminal lifecycle flag.
    #[inline]
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Settled | Self::Defaulted | Self::Canceled)
    }

    /// Returns true if the response is past confirmation and inside the
    /// settlement phase.
    #[inline]
    #[must_use]
    pub const fn in_settlement_phase(&self) -> bool {
        matches!(
            self,
            Self::SettlingPreparations | Self::ReadyForSettling | Self::Settled | Self::Defaulted
        )
    }
}

impl fmt::Display for ResponseLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Active => "ACTIVE",
            Self::Canceled => "CANCELED",
            Self::WaitingForLastLook => "WAITING_FOR_LAST_LOOK",
            Self::SettlingPreparations => "SETTLING_PREPARATIONS",
            Self::ReadyForSettling => "READY_FOR_SETTLING",
            Self::Settled => "SETTLED",
            Self::Defaulted => "DEFAULTED",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod request_lifecycle {
        use super::*;

        #[test]
        fn only_active_accepts_responses() {
            assert!(!RequestLifecycle::Constructed.accepts_responses());
            assert!(RequestLifecycle::Active.accepts_responses());
            assert!(!RequestLifecycle::Canceled.accepts_responses());
        }

        #[test]
        fn default_is_constructed() {
            assert_eq!(RequestLifecycle::default(), RequestLifecycle::Constructed);
        }

        #[test]
        fn display_formats() {
            assert_eq!(RequestLifecycle::Constructed.to_string(), "CONSTRUCTED");
            assert_eq!(RequestLifecycle::Active.to_string(), "ACTIVE");
            assert_eq!(RequestLifecycle::Canceled.to_string(), "CANCELED");
        }
    }

    mod response_lifecycle {
        use super::*;

        #[test]
        fn terminal_flags() {
            assert!(ResponseLifecycle::Settled.is_terminal());
            assert!(ResponseLifecycle::Defaulted.is_terminal());
            assert!(ResponseLifecycle::Canceled.is_terminal());
            assert!(!ResponseLifecycle::Active.is_terminal());
            assert!(!ResponseLifecycle::SettlingPreparations.is_terminal());
        }

        #[test]
        fn settlement_phase_flags() {
            assert!(ResponseLifecycle::SettlingPreparations.in_settlement_phase());
            assert!(ResponseLifecycle::ReadyForSettling.in_settlement_phase());
            assert!(ResponseLifecycle::Settled.in_settlement_phase());
            assert!(ResponseLifecycle::Defaulted.in_settlement_phase());
            assert!(!ResponseLifecycle::Active.in_settlement_phase());
            assert!(!ResponseLifecycle::WaitingForLastLook.in_settlement_phase());
        }

        #[test]
        fn serde_roundtrip() {
            for flag in [
                ResponseLifecycle::Active,
                ResponseLifecycle::Canceled,
                ResponseLifecycle::WaitingForLastLook,
                ResponseLifecycle::SettlingPreparations,
                ResponseLifecycle::ReadyForSettling,
                ResponseLifecycle::Settled,
                ResponseLifecycle::Defaulted,
            ] {
                let json = serde_json::to_string(&flag).unwrap();
                let back: ResponseLifecycle = serde_json::from_str(&json).unwrap();
                assert_eq!(flag, back);
            }
        }
    }
}
