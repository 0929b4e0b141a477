//! Result Reporter: turns [`ComplianceResult`]s into certificate text and
//! fields. Formatting only; nothing is recomputed here.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::validator::{ComplianceResult, Verdict};

/// A single reported field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Text(t) => write!(f, "{t}"),
        }
    }
}

/// Human-readable line plus raw fields for a certificate row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedResult {
    pub text: String,
    pub fields: BTreeMap<String, FieldValue>,
}

pub fn format_result(result: &ComplianceResult) -> FormattedResult {
    let m = &result.measurement;
    let mut fields = BTreeMap::new();
    let mut text_field = |k: &str, v: String| {
        fields.insert(k.to_string(), FieldValue::Text(v));
    };
    text_field("kind", m.kind.label().to_string());
    text_field("unit", m.unit.symbol().to_string());
    text_field("verdict", result.verdict.label().to_string());
    text_field("citation", result.limit_ref.citation());
    text_field("explanation", result.explanation.clone());
    if let Verdict::Indeterminate(reason) = &result.verdict {
        text_field("reason", reason.describe());
    }

    fields.insert("value".to_string(), FieldValue::Number(m.value));
    if let Some(limit) = result.limit_value() {
        fields.insert("limit".to_string(), FieldValue::Number(limit));
    }
    if let Some(margin) = result.margin {
        fields.insert("margin_pct".to_string(), FieldValue::Number(margin * 100.0));
    }

    FormattedResult {
        text: format!("[{}] {}", result.verdict.label(), result.explanation),
        fields,
    }
}

// =============================================================================
// Summaries
// =============================================================================

/// Verdict counts across a set of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    pub pass: usize,
    pub marginal: usize,
    pub fail: usize,
    pub indeterminate: usize,
}

impl ReportSummary {
    pub fn record(&mut self, verdict: &Verdict) {
        self.total += 1;
        match verdict {
            Verdict::Pass => self.pass += 1,
            Verdict::Marginal => self.marginal += 1,
            Verdict::Fail => self.fail += 1,
            Verdict::Indeterminate(_) => self.indeterminate += 1,
        }
    }

    /// Marginal readings should be re-tested before sign-off.
    pub fn needs_retest(&self) -> bool {
        self.marginal > 0
    }
}

pub fn summarize(results: &[ComplianceResult]) -> ReportSummary {
    let mut summary = ReportSummary::default();
    for result in results {
        summary.record(&result.verdict);
    }
    summary
}

/// Overall condition of an installation, as stated on a periodic report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Assessment {
    Satisfactory,
    Unsatisfactory,
    /// Nothing failed, but some readings could not be assessed (or none were given).
    Incomplete,
}

impl Assessment {
    pub fn label(self) -> &'static str {
        match self {
            Assessment::Satisfactory => "SATISFACTORY",
            Assessment::Unsatisfactory => "UNSATISFACTORY",
            Assessment::Incomplete => "INCOMPLETE",
        }
    }

    /// Any failure makes the installation unsatisfactory; otherwise any
    /// unassessed reading leaves it incomplete.
    pub fn from_summary(summary: &ReportSummary) -> Self {
        if summary.fail > 0 {
            Assessment::Unsatisfactory
        } else if summary.indeterminate > 0 || summary.total == 0 {
            Assessment::Incomplete
        } else {
            Assessment::Satisfactory
        }
    }
}

pub fn overall_assessment(results: &[ComplianceResult]) -> Assessment {
    Assessment::from_summary(&summarize(results))
}
