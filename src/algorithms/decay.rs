use std::fmt;
use std::sync::Arc;

/// A distance-decay function: a `(mask, weight)` pair applied to a
/// shortest-path distance during aggregation.
///
/// `mask(d)` decides whether a target at cost `d` contributes at all;
/// `weight(d)` is the multiplicative coefficient applied to the
/// observation's value once it's through the mask. Kept as a closed enum
/// (rather than a trait object everywhere) so the hot aggregation loop
/// doesn't allocate or dynamically dispatch for the three built-in
/// variants — only [`DecayFn::Custom`] pays for a vtable call, and it's
/// already paying for a heap-boxed closure anyway.
#[derive(Clone)]
pub enum DecayFn {
    /// No decay: every target within `cutoff` is weighted `1.0`.
    NoDecay { cutoff: f64 },
    /// Linear decay: weight falls off linearly from `1.0` at the origin
    /// to `0.0` at `cutoff`.
    Linear { cutoff: f64 },
    /// Exponential decay: `weight(d) = exp(-(d / cutoff) * k)`.
    Exponential { cutoff: f64, k: f64 },
    /// A user-supplied `(mask, weight)` pair, for decay shapes not covered
    /// by the built-ins.
    Custom {
        mask: Arc<dyn Fn(f64) -> bool + Send + Sync>,
        weight: Arc<dyn Fn(f64) -> f64 + Send + Sync>,
    },
}

impl fmt::Debug for DecayFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecayFn::NoDecay { cutoff } => {
                f.debug_struct("NoDecay").field("cutoff", cutoff).finish()
            }
            DecayFn::Linear { cutoff } => {
                f.debug_struct("Linear").field("cutoff", cutoff).finish()
            }
            DecayFn::Exponential { cutoff, k } => f
                .debug_struct("Exponential")
                .field("cutoff", cutoff)
                .field("k", k)
                .finish(),
            DecayFn::Custom { .. } => f.debug_struct("Custom").finish_non_exhaustive(),
        }
    }
}

impl DecayFn {
    /// No decay within `cutoff`: a target at `cutoff` is weighted exactly
    /// as a target at the origin.
    pub fn no_decay(cutoff: f64) -> DecayFn {
        DecayFn::NoDecay { cutoff }
    }

    /// Linear decay to zero at `cutoff`.
    pub fn linear(cutoff: f64) -> DecayFn {
        DecayFn::Linear { cutoff }
    }

    /// Exponential decay with rate `k` (`k > 0`), reaching `exp(-k)` at
    /// `cutoff`.
    pub fn exponential(cutoff: f64, k: f64) -> DecayFn {
        DecayFn::Exponential { cutoff, k }
    }

    /// A custom decay built from an arbitrary mask/weight pair.
    pub fn custom(
        mask: impl Fn(f64) -> bool + Send + Sync + 'static,
        weight: impl Fn(f64) -> f64 + Send + Sync + 'static,
    ) -> DecayFn {
        DecayFn::Custom {
            mask: Arc::new(mask),
            weight: Arc::new(weight),
        }
    }

    /// The cutoff this decay is parameterised by, where applicable.
    /// `Custom` decays have no cutoff of their own to report.
    pub fn cutoff(&self) -> Option<f64> {
        match self {
            DecayFn::NoDecay { cutoff } | DecayFn::Linear { cutoff } => Some(*cutoff),
            DecayFn::Exponential { cutoff, .. } => Some(*cutoff),
            DecayFn::Custom { .. } => None,
        }
    }

    /// Whether a target at distance `d` contributes at all.
    #[inline]
    pub fn mask(&self, d: f64) -> bool {
        match self {
            DecayFn::NoDecay { cutoff } | DecayFn::Linear { cutoff } => d < *cutoff,
            DecayFn::Exponential { cutoff, .. } => d < *cutoff,
            DecayFn::Custom { mask, .. } => mask(d),
        }
    }

    /// The multiplicative weight applied to an observation at distance
    /// `d`. Only meaningful where [`DecayFn::mask`] is `true`.
    #[inline]
    pub fn weight(&self, d: f64) -> f64 {
        match self {
            DecayFn::NoDecay { .. } => 1.0,
            DecayFn::Linear { cutoff } => ((*cutoff - d) / *cutoff).max(0.0),
            DecayFn::Exponential { cutoff, k } => (-(d / *cutoff) * *k).exp(),
            DecayFn::Custom { weight, .. } => weight(d),
        }
    }
}
