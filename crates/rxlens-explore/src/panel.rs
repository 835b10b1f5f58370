//! Review panel fragments.
//!
//! For every resolved click the panel shows the review with its condition
//! and drug straight away, followed by one knowledge block per term. Blocks
//! are ordered male then female; within a block the condition comes before
//! the drug.

use rxlens_data::{ReviewRecord, Sex};
use rxlens_knowledge::{LookupError, LookupOutcome, LookupRequest, Summary};
use serde::{Deserialize, Serialize};

/// One display unit of the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Fragment {
    Paragraph { text: String },
    /// Opened in a new tab by the renderer.
    Link { text: String, href: String },
}

impl Fragment {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Fragment::Paragraph { text: text.into() }
    }

    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        Fragment::Link { text: text.into(), href: href.into() }
    }

    pub fn text(&self) -> &str {
        match self {
            Fragment::Paragraph { text } | Fragment::Link { text, .. } => text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermKind {
    Condition,
    Drug,
}

impl TermKind {
    /// Capitalised, as used in headings.
    pub fn label(self) -> &'static str {
        match self {
            TermKind::Condition => "Condition",
            TermKind::Drug => "Drug",
        }
    }

    /// Lower case, as used mid-sentence.
    pub fn noun(self) -> &'static str {
        match self {
            TermKind::Condition => "condition",
            TermKind::Drug => "drug",
        }
    }
}

/// Which panel block a lookup belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LookupSlot {
    pub sex: Sex,
    pub kind: TermKind,
}

/// Fragments that need no network: the review text, condition, and drug.
pub fn review_fragments(record: &ReviewRecord) -> Vec<Fragment> {
    vec![
        Fragment::paragraph(format!("Selected Review ({}): {}", record.sex, record.reviews)),
        Fragment::paragraph(format!("Condition: {}", record.condition)),
        Fragment::paragraph(format!("Drug: {}", record.drug)),
    ]
}

/// The two knowledge lookups a resolved review needs, condition first.
pub fn lookup_requests(record: &ReviewRecord) -> Vec<LookupRequest<LookupSlot>> {
    vec![
        LookupRequest::new(
            LookupSlot { sex: record.sex.clone(), kind: TermKind::Condition },
            record.condition.clone(),
        ),
        LookupRequest::new(
            LookupSlot { sex: record.sex.clone(), kind: TermKind::Drug },
            record.drug.clone(),
        ),
    ]
}

/// Render one lookup result.
pub fn lookup_fragments(
    kind: TermKind,
    term: &str,
    result: &Result<Summary, LookupError>,
) -> Vec<Fragment> {
    match result {
        Ok(summary) => vec![
            Fragment::paragraph(format!("Wikipedia Summary ({}): {}", kind.label(), summary.summary)),
            Fragment::link(format!("Read More on Wikipedia ({})", kind.label()), summary.url.clone()),
        ],
        Err(LookupError::Ambiguous { .. }) => vec![Fragment::paragraph(format!(
            "Multiple Wikipedia options found for {} {}. Please refine your search.",
            kind.noun(),
            term
        ))],
        Err(LookupError::NotFound { .. }) => vec![Fragment::paragraph(format!(
            "No Wikipedia page found for {} {}.",
            kind.noun(),
            term
        ))],
        Err(LookupError::Unavailable { reason, .. }) => vec![Fragment::paragraph(format!(
            "Wikipedia is unavailable for {} {}: {}.",
            kind.noun(),
            term,
            reason
        ))],
    }
}

/// Assemble the full panel for already-resolved reviews.
///
/// `resolved` is expected in male, female order. Outcomes are matched to
/// their block by [`LookupSlot`]; a slot with no outcome renders nothing.
pub fn render_panel(
    resolved: &[&ReviewRecord],
    outcomes: &[LookupOutcome<LookupSlot>],
) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    for record in resolved {
        fragments.extend(review_fragments(record));
        for kind in [TermKind::Condition, TermKind::Drug] {
            let outcome = outcomes
                .iter()
                .find(|o| o.key.sex == record.sex && o.key.kind == kind);
            if let Some(o) = outcome {
                fragments.extend(lookup_fragments(kind, &o.term, &o.result));
            }
        }
    }
    fragments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ReviewRecord {
        ReviewRecord::new("Flu", "X", Sex::Male, Some(30.0), 5.0, "great")
    }

    fn texts(fragments: &[Fragment]) -> Vec<&str> {
        fragments.iter().map(Fragment::text).collect()
    }

    #[test]
    fn test_review_fragments() {
        assert_eq!(
            texts(&review_fragments(&record())),
            vec!["Selected Review (Male): great", "Condition: Flu", "Drug: X"]
        );
    }

    #[test]
    fn test_lookup_requests_condition_then_drug() {
        let reqs = lookup_requests(&record());
        assert_eq!(reqs.len(), 2);
        assert_eq!(reqs[0].term, "Flu");
        assert_eq!(reqs[0].key, LookupSlot { sex: Sex::Male, kind: TermKind::Condition });
        assert_eq!(reqs[1].term, "X");
        assert_eq!(reqs[1].key.kind, TermKind::Drug);
    }

    #[test]
    fn test_found_renders_summary_and_link() {
        let ok = Ok(Summary {
            title: "Influenza".into(),
            summary: "A viral infection.".into(),
            url: "https://en.wikipedia.org/wiki/Influenza".into(),
        });
        assert_eq!(
            lookup_fragments(TermKind::Condition, "Flu", &ok),
            vec![
                Fragment::paragraph("Wikipedia Summary (Condition): A viral infection."),
                Fragment::link(
                    "Read More on Wikipedia (Condition)",
                    "https://en.wikipedia.org/wiki/Influenza"
                ),
            ]
        );
    }

    #[test]
    fn test_error_messages() {
        let ambiguous = Err(LookupError::Ambiguous { term: "Depression".into(), candidates: vec![] });
        assert_eq!(
            texts(&lookup_fragments(TermKind::Condition, "Depression", &ambiguous)),
            vec!["Multiple Wikipedia options found for condition Depression. Please refine your search."]
        );

        let missing = Err(LookupError::NotFound { term: "Xyz".into() });
        assert_eq!(
            texts(&lookup_fragments(TermKind::Drug, "Xyz", &missing)),
            vec!["No Wikipedia page found for drug Xyz."]
        );

        let down = Err(LookupError::unavailable("X", "timed out after 4000 ms"));
        assert_eq!(
            texts(&lookup_fragments(TermKind::Drug, "X", &down)),
            vec!["Wikipedia is unavailable for drug X: timed out after 4000 ms."]
        );
    }

    #[test]
    fn test_render_panel_orders_blocks() {
        let male = record();
        let female = ReviewRecord::new("Flu", "Y", Sex::Female, Some(44.0), 2.0, "meh");
        let outcomes = vec![
            LookupOutcome {
                key: LookupSlot { sex: Sex::Female, kind: TermKind::Drug },
                term: "Y".into(),
                result: Err(LookupError::NotFound { term: "Y".into() }),
            },
            LookupOutcome {
                key: LookupSlot { sex: Sex::Male, kind: TermKind::Drug },
                term: "X".into(),
                result: Err(LookupError::NotFound { term: "X".into() }),
            },
            LookupOutcome {
                key: LookupSlot { sex: Sex::Male, kind: TermKind::Condition },
                term: "Flu".into(),
                result: Err(LookupError::NotFound { term: "Flu".into() }),
            },
        ];

        let panel = render_panel(&[&male, &female], &outcomes);
        assert_eq!(
            texts(&panel),
            vec![
                "Selected Review (Male): great",
                "Condition: Flu",
                "Drug: X",
                "No Wikipedia page found for condition Flu.",
                "No Wikipedia page found for drug X.",
                "Selected Review (Female): meh",
                "Condition: Flu",
                "Drug: Y",
                "No Wikipedia page found for drug Y.",
            ]
        );
    }

    #[test]
    fn test_nothing_resolved_renders_nothing() {
        assert!(render_panel(&[], &[]).is_empty());
    }

    #[test]
    fn test_fragment_json_shape() {
        let json = serde_json::to_value(Fragment::link("Read", "https://x")).unwrap();
        assert_eq!(json, serde_json::json!({"type": "link", "text": "Read", "href": "https://x"}));
    }
}
