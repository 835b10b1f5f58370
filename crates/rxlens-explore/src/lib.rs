//! rxlens-explore — Selection logic behind the review explorer.
//!
//! Everything here is synchronous and pure over a borrowed
//! [`DatasetStore`](rxlens_data::DatasetStore):
//!
//! - [`cascade`]: condition → drug option sets and record filtering
//! - [`projection`]: filtered records → per-sex 3-D scatter series
//! - [`lookup`]: a clicked chart point → the review it came from
//! - [`panel`]: resolved reviews and knowledge outcomes → display fragments
//! - [`session`]: the explicit state/event graph tying the above together
//!
//! Network work (knowledge lookups) is described here as
//! [`LookupRequest`](rxlens_knowledge::LookupRequest)s and executed by the
//! caller.

pub mod cascade;
pub mod lookup;
pub mod panel;
pub mod projection;
pub mod session;

pub use cascade::{
    condition_options, drugs_for_condition, records_for, ConditionOptions, DrugOptions, SelectorOptions,
};
pub use lookup::{matches_for_click, resolve_click, ClickEvent, ClickPoint};
pub use panel::{
    lookup_fragments, lookup_requests, render_panel, review_fragments, Fragment, LookupSlot,
    TermKind,
};
pub use projection::{project, AxisLabels, ChartPoint, ChartSeries, Projection, MARKER_SIZE};
pub use session::{ExplorerState, ExplorerView, SelectionEvent};
