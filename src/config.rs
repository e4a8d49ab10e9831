/// What [`crate::Registry::register`] does with a nil (`None`) entry.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum NilPolicy {
    /// Skip it silently.
    #[default]
    Skip,
    /// Reject it with [`crate::InvalidReason::Nil`].
    Reject,
}

/// Config for the injector and the registry
/// ## Fields
/// - `strict`:
///   If `true`, a marked field without a matching dependency fails the injection with
///   [`crate::InjectErrorKind::NoMatchFound`], a fatal error.
///   Otherwise the field is left empty and a warning is logged.
/// - `nil_policy`:
///   See [`NilPolicy`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Config {
    pub strict: bool,
    pub nil_policy: NilPolicy,
}

impl Config {
    #[inline]
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            strict: false,
            nil_policy: NilPolicy::Skip,
        }
    }

    #[inline]
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            strict: true,
            nil_policy: NilPolicy::Skip,
        }
    }

    #[inline]
    #[must_use]
    pub const fn with_nil_policy(mut self, nil_policy: NilPolicy) -> Self {
        self.nil_policy = nil_policy;
        self
    }
}
