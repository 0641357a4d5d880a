//! Opportunities

use crate::form::FieldSpec;
use crate::page_object::RecordPage;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("Opportunity Name").with_synonyms(&["Name"]).required(),
    FieldSpec::lookup("Account Name").with_synonyms(&["Account"]),
    FieldSpec::date("Close Date").required(),
    FieldSpec::picklist("Stage").required(),
    FieldSpec::text("Amount"),
    FieldSpec::text("Probability (%)").with_synonyms(&["Probability"]),
    FieldSpec::picklist("Type"),
    FieldSpec::picklist("Lead Source"),
    FieldSpec::picklist("Forecast Category"),
    FieldSpec::text("Next Step"),
    FieldSpec::checkbox("Private"),
    FieldSpec::lookup("Primary Campaign Source").with_synonyms(&["Campaign"]),
    FieldSpec::text_area("Description"),
];

/// Opportunity record page
#[derive(Debug, Clone, Copy, Default)]
pub struct OpportunityPage;

impl RecordPage for OpportunityPage {
    fn object_name(&self) -> &'static str {
        "Opportunities"
    }

    fn api_name(&self) -> &'static str {
        "Opportunity"
    }

    fn fields(&self) -> &'static [FieldSpec] {
        FIELDS
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["Deal", "Deals"]
    }
}
