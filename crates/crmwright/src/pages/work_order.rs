//! Work orders (Field Service)

use crate::form::FieldSpec;
use crate::page_object::RecordPage;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::lookup("Account").with_synonyms(&["Account Name"]),
    FieldSpec::lookup("Contact").with_synonyms(&["Contact Name"]),
    FieldSpec::lookup("Case"),
    FieldSpec::lookup("Asset"),
    FieldSpec::lookup("Work Type"),
    FieldSpec::picklist("Status"),
    FieldSpec::picklist("Priority"),
    FieldSpec::text("Subject"),
    FieldSpec::text_area("Description"),
    FieldSpec::date("Start Date"),
    FieldSpec::date("End Date"),
    FieldSpec::text("Duration"),
    FieldSpec::picklist("Duration Type"),
    FieldSpec::text_area("Street"),
    FieldSpec::text("City"),
    FieldSpec::text("State/Province").with_synonyms(&["State"]),
    FieldSpec::text("Zip/Postal Code").with_synonyms(&["Zip", "Postal Code"]),
    FieldSpec::text("Country"),
];

/// Work order record page
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkOrderPage;

impl RecordPage for WorkOrderPage {
    fn object_name(&self) -> &'static str {
        "Work Orders"
    }

    fn api_name(&self) -> &'static str {
        "WorkOrder"
    }

    fn fields(&self) -> &'static [FieldSpec] {
        FIELDS
    }
}
