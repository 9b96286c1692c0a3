use crate::AuditError;

/// Classified result of one provider call
///
/// The orchestrator decides per provider what each variant means for the
/// audit: a degraded performance call is absorbed, a degraded page fetch is not.
#[derive(Debug)]
pub enum Outcome<T> {
    /// The provider produced a usable value
    Ready(T),

    /// The provider failed in a way that can be substituted
    Degraded { reason: String },

    /// The provider failed in a way that ends the audit
    Fatal(AuditError),
}

impl<T> Outcome<T> {
    pub fn degraded(reason: impl Into<String>) -> Self {
        Self::Degraded {
            reason: reason.into(),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Self::Ready(value) => Outcome::Ready(f(value)),
            Self::Degraded { reason } => Outcome::Degraded { reason },
            Self::Fatal(error) => Outcome::Fatal(error),
        }
    }
}
