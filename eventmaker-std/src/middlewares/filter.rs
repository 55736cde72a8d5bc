//! Filter middleware for payload pruning.

use eventmaker_core::{ActionRecord, BoxError, Flow, PipelineFn, Value};

/// A middleware that drops payload arguments failing a predicate.
///
/// The predicate receives each argument and its index. Applies to every event
/// unless narrowed with [`for_event`](FilterPayload::for_event).
pub struct FilterPayload<F> {
    predicate: F,
    event: Option<String>,
}

impl<F> FilterPayload<F>
where
    F: Fn(&Value, usize) -> bool + Send + Sync + 'static,
{
    /// Create a new filter middleware.
    pub fn new(predicate: F) -> Self {
        Self {
            predicate,
            event: None,
        }
    }

    /// Only filter emissions of `event`.
    pub fn for_event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }
}

impl<F> PipelineFn for FilterPayload<F>
where
    F: Fn(&Value, usize) -> bool + Send + Sync + 'static,
{
    fn run(&self, event: &str, action: &mut ActionRecord) -> Result<Flow, BoxError> {
        if self.event.as_deref().is_none_or(|only| only == event) {
            action.filter_payload(&self.predicate);
        }
        Ok(Flow::Next)
    }
}
