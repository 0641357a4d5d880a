//! Leads

use crate::form::FieldSpec;
use crate::page_object::RecordPage;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::picklist("Salutation"),
    FieldSpec::text("First Name"),
    FieldSpec::text("Last Name").required(),
    FieldSpec::text("Company").required(),
    FieldSpec::text("Title"),
    FieldSpec::text("Email"),
    FieldSpec::text("Phone"),
    FieldSpec::text("Mobile"),
    FieldSpec::text("Website"),
    FieldSpec::picklist("Lead Status").with_synonyms(&["Status"]).required(),
    FieldSpec::picklist("Lead Source"),
    FieldSpec::picklist("Industry"),
    FieldSpec::picklist("Rating"),
    FieldSpec::text("No. of Employees").with_synonyms(&["Employees"]),
    FieldSpec::text("Annual Revenue"),
    FieldSpec::text_area("Street"),
    FieldSpec::text("City"),
    FieldSpec::text("State/Province").with_synonyms(&["State"]),
    FieldSpec::text("Zip/Postal Code").with_synonyms(&["Zip"]),
    FieldSpec::text("Country"),
    FieldSpec::text_area("Description"),
];

/// Lead record page
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadPage;

impl RecordPage for LeadPage {
    fn object_name(&self) -> &'static str {
        "Leads"
    }

    fn api_name(&self) -> &'static str {
        "Lead"
    }

    fn fields(&self) -> &'static [FieldSpec] {
        FIELDS
    }
}
