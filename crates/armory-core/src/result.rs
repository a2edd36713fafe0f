//! Outcome algebra returned by every behavior invocation.
//!
//! A [`PowerResult`] is one of a closed set of [`OutcomeKind`]s plus an
//! optional payload. Expected conditions such as an active cooldown or an
//! unaffordable cost are outcome kinds, never errors.
//!
//! # Dispatch
//!
//! The host trigger loop reads [`OutcomeKind::directive`]:
//!
//! | Kind | Directive |
//! |---|---|
//! | `Ok` | [`ChainDirective::Completed`], payload may be folded |
//! | `Noop` | [`ChainDirective::Continue`] |
//! | `Abort` | [`ChainDirective::Stop`] |
//! | `Cooldown`, `Cost`, `Fail` | [`ChainDirective::Attempted`] |
//!
//! # Example
//!
//! ```
//! use armory_core::result::{OutcomeKind, PowerResult};
//!
//! let fired: PowerResult = PowerResult::ok();
//! let with_damage = fired.with(4.5_f64);
//!
//! assert_eq!(with_damage.kind(), OutcomeKind::Ok);
//! assert_eq!(with_damage.payload(), Some(&4.5));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Outcome Kind
// =============================================================================

/// The closed set of invocation outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeKind {
    /// Completed.
    Ok,
    /// Declined; the next behavior in the chain should run.
    Noop,
    /// Blocked by an active cooldown.
    Cooldown,
    /// The cost could not be paid.
    Cost,
    /// Attempted and failed.
    Fail,
    /// Stop the whole chain immediately and successfully.
    Abort,
}

/// What the trigger loop should do after an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainDirective {
    /// The behavior completed.
    Completed,
    /// The behavior declined; move on.
    Continue,
    /// Stop the chain, treating it as successful.
    Stop,
    /// The behavior tried and did not complete; policy is the caller's.
    Attempted,
}

impl OutcomeKind {
    /// Returns the dispatch directive for this kind.
    #[must_use]
    pub const fn directive(self) -> ChainDirective {
        match self {
            Self::Ok => ChainDirective::Completed,
            Self::Noop => ChainDirective::Continue,
            Self::Abort => ChainDirective::Stop,
            Self::Cooldown | Self::Cost | Self::Fail => ChainDirective::Attempted,
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::Noop => write!(f, "NOOP"),
            Self::Cooldown => write!(f, "COOLDOWN"),
            Self::Cost => write!(f, "COST"),
            Self::Fail => write!(f, "FAIL"),
            Self::Abort => write!(f, "ABORT"),
        }
    }
}

// =============================================================================
// Power Result
// =============================================================================

/// Outcome of a single behavior invocation.
///
/// The payload type defaults to `()` for shapes that produce no value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerResult<T = ()> {
    kind: OutcomeKind,
    payload: Option<T>,
}

impl<T> PowerResult<T> {
    /// Completed without a payload.
    #[must_use]
    pub const fn ok() -> Self {
        Self::of(OutcomeKind::Ok)
    }

    /// Completed with a payload.
    #[must_use]
    pub const fn ok_with(payload: T) -> Self {
        Self {
            kind: OutcomeKind::Ok,
            payload: Some(payload),
        }
    }

    /// Declined.
    #[must_use]
    pub const fn noop() -> Self {
        Self::of(OutcomeKind::Noop)
    }

    /// Blocked by cooldown.
    #[must_use]
    pub const fn cooldown() -> Self {
        Self::of(OutcomeKind::Cooldown)
    }

    /// Cost could not be paid.
    #[must_use]
    pub const fn cost() -> Self {
        Self::of(OutcomeKind::Cost)
    }

    /// Failed.
    #[must_use]
    pub const fn fail() -> Self {
        Self::of(OutcomeKind::Fail)
    }

    /// Abort the chain.
    #[must_use]
    pub const fn abort() -> Self {
        Self::of(OutcomeKind::Abort)
    }

    /// An outcome of `kind` with no payload.
    #[must_use]
    pub const fn of(kind: OutcomeKind) -> Self {
        Self {
            kind,
            payload: None,
        }
    }

    /// Returns the outcome kind.
    #[must_use]
    pub const fn kind(&self) -> OutcomeKind {
        self.kind
    }

    /// Returns the payload, if any.
    #[must_use]
    pub const fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    /// Consumes the result, returning the payload.
    #[must_use]
    pub fn into_payload(self) -> Option<T> {
        self.payload
    }

    /// Re-tags this outcome with a new payload, keeping the kind.
    #[must_use]
    pub fn with<R>(self, payload: R) -> PowerResult<R> {
        PowerResult {
            kind: self.kind,
            payload: Some(payload),
        }
    }

    /// Drops the payload, keeping the kind.
    #[must_use]
    pub fn discard(self) -> PowerResult {
        PowerResult::of(self.kind)
    }

    /// Maps the payload, keeping the kind.
    #[must_use]
    pub fn map<R, F: FnOnce(T) -> R>(self, f: F) -> PowerResult<R> {
        PowerResult {
            kind: self.kind,
            payload: self.payload.map(f),
        }
    }

    /// Returns true for [`OutcomeKind::Ok`].
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.kind == OutcomeKind::Ok
    }

    /// Returns the dispatch directive for this outcome.
    #[must_use]
    pub const fn directive(&self) -> ChainDirective {
        self.kind.directive()
    }
}

impl<T> From<OutcomeKind> for PowerResult<T> {
    fn from(kind: OutcomeKind) -> Self {
        Self::of(kind)
    }
}

impl<T: fmt::Debug> fmt::Display for PowerResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            Some(payload) => write!(f, "{}({payload:?})", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}
