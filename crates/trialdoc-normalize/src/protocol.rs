//! Normalization into [`ProtocolData`].

use serde_json::Value;
use trialdoc_core::{ProtocolData, StudyArm, StudyDesign};

use crate::coerce;

/// Coerce a parsed extraction result into a [`ProtocolData`] record.
///
/// Missing and malformed fields default per the record's invariants; this
/// function cannot fail.
#[must_use = "the normalized record is returned but not used"]
pub fn normalize_protocol(value: &Value) -> ProtocolData {
    let empty = serde_json::Map::new();
    let obj = coerce::object(Some(value)).unwrap_or(&empty);

    ProtocolData {
        name: coerce::lenient_string(obj.get("name")),
        phase: coerce::lenient_string(obj.get("phase")),
        indication: coerce::lenient_string(obj.get("indication")),
        target_enrollment: coerce::count_or_zero(obj.get("target_enrollment")),
        inclusion_criteria: coerce::string_list(obj.get("inclusion_criteria")),
        exclusion_criteria: coerce::string_list(obj.get("exclusion_criteria")),
        visit_schedule: coerce::string_list(obj.get("visit_schedule")),
        protocol_number: coerce::optional_string(obj.get("protocol_number")),
        sponsor_name: coerce::optional_string(obj.get("sponsor_name")),
        nct_number: coerce::optional_string(obj.get("nct_number")),
        study_design: coerce::object(obj.get("study_design")).map(|design| StudyDesign {
            design_type: coerce::lenient_string(design.get("design_type")),
            blinding: coerce::lenient_string(design.get("blinding")),
            randomization: coerce::lenient_string(design.get("randomization")),
            duration: coerce::lenient_string(design.get("duration")),
        }),
        study_arms: study_arms(obj.get("study_arms")),
        investigational_product: coerce::optional_string(obj.get("investigational_product")),
        primary_endpoints: coerce::string_list(obj.get("primary_endpoints")),
        secondary_endpoints: coerce::string_list(obj.get("secondary_endpoints")),
        concomitant_medications: coerce::optional_string(obj.get("concomitant_medications")),
    }
}

fn study_arms(value: Option<&Value>) -> Vec<StudyArm> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let arm = coerce::object(Some(item)).map(|obj| StudyArm {
                name: coerce::lenient_string(obj.get("name")),
                description: coerce::lenient_string(obj.get("description")),
            })?;
            (!arm.name.is_empty() || !arm.description.is_empty()).then_some(arm)
        })
        .collect()
}
