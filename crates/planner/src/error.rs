use volley_types::EntityId;

/// Errors returned by the [`Planner`].
///
/// [`Planner`]: crate::Planner
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PlanError {
    /// The oracle failed to answer a query.
    #[error("oracle unavailable: {0}")]
    Oracle(#[source] Box<dyn core::error::Error + Send + Sync>),
    /// The source entity is unknown to the oracle.
    #[error("unknown source entity {0}")]
    UnknownSource(EntityId),
    /// The budget percentage is outside `0..=100`.
    #[error("budget percentage {0} is outside 0..=100")]
    InvalidBudget(f64),
}

impl PlanError {
    /// Box an oracle error.
    pub fn oracle<E>(error: E) -> Self
    where
        E: core::error::Error + Send + Sync + 'static,
    {
        Self::Oracle(Box::new(error))
    }
}
