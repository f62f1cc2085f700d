//! Normalized record types produced by the extraction pipeline.
//!
//! These are the strict, defaulted shapes the normalizer coerces raw LLM
//! output into. Invariants shared by all three record types:
//!
//! - Every array field is present as a vector (possibly empty), never absent.
//! - Numeric fields are finite numbers or the documented unset default.
//! - String fields default to the empty string, or are omitted when optional.
//! - Budget payment line items with an empty name or non-positive amount are
//!   dropped during normalization, so downstream consumers may assume every
//!   retained item is billable.
//! - Currency fields default to `"USD"` when absent.

use serde::{Deserialize, Serialize};

/// Default currency applied when a document does not state one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Structured data extracted from a study protocol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProtocolData {
    /// Study title.
    pub name: String,
    /// Study phase, e.g. "Phase 2".
    pub phase: String,
    /// Condition under investigation.
    pub indication: String,
    /// Planned number of enrolled participants; 0 when not stated.
    pub target_enrollment: u32,
    /// Inclusion criteria, one entry per criterion.
    #[serde(default)]
    pub inclusion_criteria: Vec<String>,
    /// Exclusion criteria, one entry per criterion.
    #[serde(default)]
    pub exclusion_criteria: Vec<String>,
    /// Scheduled visits in protocol order.
    #[serde(default)]
    pub visit_schedule: Vec<String>,
    /// Sponsor-assigned protocol identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol_number: Option<String>,
    /// Sponsoring organization.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sponsor_name: Option<String>,
    /// ClinicalTrials.gov registry number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nct_number: Option<String>,
    /// Study design summary, when the document describes one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_design: Option<StudyDesign>,
    /// Treatment arms.
    #[serde(default)]
    pub study_arms: Vec<StudyArm>,
    /// Investigational product under study.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investigational_product: Option<String>,
    /// Primary endpoints.
    #[serde(default)]
    pub primary_endpoints: Vec<String>,
    /// Secondary endpoints.
    #[serde(default)]
    pub secondary_endpoints: Vec<String>,
    /// Concomitant medication rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concomitant_medications: Option<String>,
}

/// Study design details nested inside [`ProtocolData`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyDesign {
    /// Design type, e.g. "randomized controlled".
    #[serde(default)]
    pub design_type: String,
    /// Blinding scheme, e.g. "double-blind".
    #[serde(default)]
    pub blinding: String,
    /// Randomization ratio or method.
    #[serde(default)]
    pub randomization: String,
    /// Planned study duration.
    #[serde(default)]
    pub duration: String,
}

/// A single treatment arm.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyArm {
    /// Arm label.
    #[serde(default)]
    pub name: String,
    /// Intervention description.
    #[serde(default)]
    pub description: String,
}

/// Structured data extracted from a study budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetData {
    /// ISO currency code; `"USD"` when the document does not state one.
    pub currency: String,
    /// Total study budget, when stated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_budget: Option<f64>,
    /// Total payment per enrolled patient, when stated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_patient_total: Option<f64>,
    /// Per-procedure payment line items. Every retained item is billable.
    #[serde(default)]
    pub procedure_payments: Vec<PaymentItem>,
    /// Per-visit payment line items. Every retained item is billable.
    #[serde(default)]
    pub visit_payments: Vec<PaymentItem>,
    /// Milestone payment line items. Every retained item is billable.
    #[serde(default)]
    pub milestone_payments: Vec<PaymentItem>,
    /// Payment terms; always present, fields default to empty strings.
    #[serde(default)]
    pub payment_terms: PaymentTerms,
    /// Costs reimbursed outside the per-patient budget.
    #[serde(default)]
    pub pass_through_costs: Vec<String>,
    /// Free-form notes worth surfacing to coordinators.
    #[serde(default)]
    pub important_notes: Vec<String>,
}

impl Default for BudgetData {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            total_budget: None,
            per_patient_total: None,
            procedure_payments: Vec::new(),
            visit_payments: Vec::new(),
            milestone_payments: Vec::new(),
            payment_terms: PaymentTerms::default(),
            pass_through_costs: Vec::new(),
            important_notes: Vec::new(),
        }
    }
}

/// A single payment line item (procedure, visit, or milestone).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentItem {
    /// Line-item name.
    pub name: String,
    /// Payment amount in the budget's currency.
    pub amount: f64,
    /// Qualifying notes, empty when none.
    #[serde(default)]
    pub notes: String,
}

impl PaymentItem {
    /// The minimum-validity predicate applied during normalization: a line
    /// item is kept only when it has a name and a positive amount.
    #[inline]
    #[must_use = "the billability check result is returned but not used"]
    pub fn is_billable(&self) -> bool {
        !self.name.trim().is_empty() && self.amount > 0.0
    }
}

/// Payment terms nested inside [`BudgetData`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTerms {
    /// Payment schedule, e.g. "quarterly in arrears".
    #[serde(default)]
    pub schedule: String,
    /// Payment method, e.g. "ACH transfer".
    #[serde(default)]
    pub method: String,
    /// Additional terms.
    #[serde(default)]
    pub notes: String,
}

/// Structured data extracted from a clinical trial agreement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CtaData {
    /// Sponsoring organization.
    pub sponsor_name: String,
    /// ISO currency code; `"USD"` when the agreement does not state one.
    pub currency: String,
    /// Payment arrangement summary.
    pub payment_info: String,
    /// Agreement timeline summary.
    pub timeline: String,
    /// Requirements an invoice must satisfy to be payable.
    #[serde(default)]
    pub invoice_requirements: Vec<String>,
    /// Conditions under which payment may be withheld.
    #[serde(default)]
    pub payment_hold_conditions: Vec<String>,
    /// Free-form notes worth surfacing to coordinators.
    #[serde(default)]
    pub important_notes: Vec<String>,
}

impl Default for CtaData {
    fn default() -> Self {
        Self {
            sponsor_name: String::new(),
            currency: DEFAULT_CURRENCY.to_string(),
            payment_info: String::new(),
            timeline: String::new(),
            invoice_requirements: Vec::new(),
            payment_hold_conditions: Vec::new(),
            important_notes: Vec::new(),
        }
    }
}
