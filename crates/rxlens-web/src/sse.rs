//! Server-Sent Events (SSE) streaming for the review panel.
//!
//! A stream starts with one `review` event per resolved click, sent before
//! any lookup is awaited. Each knowledge lookup then produces a `lookup`
//! event as soon as it finishes, in completion order, and a final `done`
//! event closes the stream.

use std::convert::Infallible;
use std::time::Duration;

use axum::response::sse::{Event, KeepAlive, Sse};
use futures_core::Stream;
use rxlens_data::{ReviewRecord, Sex};
use rxlens_explore::{lookup_fragments, lookup_requests, review_fragments, Fragment, TermKind};
use rxlens_knowledge::lookup_stream;
use serde::{Deserialize, Serialize};
use tokio_stream::StreamExt;

use crate::state::SharedState;

/// Events pushed to the review panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PanelEvent {
    /// Review text, condition, and drug for one chart's click
    Review { sex: Sex, fragments: Vec<Fragment> },
    /// Outcome of one knowledge lookup
    Lookup { sex: Sex, kind: TermKind, term: String, fragments: Vec<Fragment> },
    /// No more events follow
    Done,
}

impl PanelEvent {
    pub fn name(&self) -> &'static str {
        match self {
            PanelEvent::Review { .. } => "review",
            PanelEvent::Lookup { .. } => "lookup",
            PanelEvent::Done => "done",
        }
    }

    fn into_sse(self) -> Option<Event> {
        serde_json::to_string(&self)
            .ok()
            .map(|data| Event::default().event(self.name()).data(data))
    }
}

/// Panel events for `resolved` reviews (male first), ending with `Done`.
pub fn panel_events(
    state: &SharedState,
    resolved: Vec<ReviewRecord>,
) -> impl Stream<Item = PanelEvent> + Send + 'static {
    let immediate: Vec<PanelEvent> = resolved
        .iter()
        .map(|r| PanelEvent::Review { sex: r.sex.clone(), fragments: review_fragments(r) })
        .collect();
    let requests = resolved.iter().flat_map(lookup_requests).collect();

    let lookups = lookup_stream(state.knowledge.clone(), requests, state.lookup_timeout).map(|o| {
        let fragments = lookup_fragments(o.key.kind, &o.term, &o.result);
        PanelEvent::Lookup { sex: o.key.sex, kind: o.key.kind, term: o.term, fragments }
    });

    tokio_stream::iter(immediate)
        .chain(lookups)
        .chain(tokio_stream::once(PanelEvent::Done))
}

/// Wrap panel events as an SSE response.
pub fn panel_sse(
    events: impl Stream<Item = PanelEvent> + Send + 'static,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = events.filter_map(|event| event.into_sse().map(Ok));

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_and_json() {
        let done = serde_json::to_value(PanelEvent::Done).unwrap();
        assert_eq!(done, serde_json::json!({"type": "done"}));
        assert_eq!(PanelEvent::Done.name(), "done");

        let review = PanelEvent::Review {
            sex: Sex::Female,
            fragments: vec![Fragment::paragraph("Condition: Flu")],
        };
        assert_eq!(review.name(), "review");
        let json = serde_json::to_value(&review).unwrap();
        assert_eq!(json["sex"], "Female");
        assert_eq!(json["fragments"][0]["text"], "Condition: Flu");
    }
}
