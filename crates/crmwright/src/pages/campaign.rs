//! Campaigns

use crate::form::FieldSpec;
use crate::page_object::RecordPage;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("Campaign Name").with_synonyms(&["Name"]).required(),
    FieldSpec::checkbox("Active"),
    FieldSpec::picklist("Type"),
    FieldSpec::picklist("Status"),
    FieldSpec::date("Start Date"),
    FieldSpec::date("End Date"),
    FieldSpec::lookup("Parent Campaign"),
    FieldSpec::text("Expected Revenue in Campaign").with_synonyms(&["Expected Revenue"]),
    FieldSpec::text("Budgeted Cost in Campaign").with_synonyms(&["Budgeted Cost"]),
    FieldSpec::text("Actual Cost in Campaign").with_synonyms(&["Actual Cost"]),
    FieldSpec::text("Expected Response (%)").with_synonyms(&["Expected Response"]),
    FieldSpec::text("Num Sent in Campaign").with_synonyms(&["Num Sent"]),
    FieldSpec::text_area("Description"),
];

/// Campaign record page
#[derive(Debug, Clone, Copy, Default)]
pub struct CampaignPage;

impl RecordPage for CampaignPage {
    fn object_name(&self) -> &'static str {
        "Campaigns"
    }

    fn api_name(&self) -> &'static str {
        "Campaign"
    }

    fn fields(&self) -> &'static [FieldSpec] {
        FIELDS
    }
}
