//! Cases

use crate::form::FieldSpec;
use crate::page_object::RecordPage;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::lookup("Contact Name").with_synonyms(&["Contact"]),
    FieldSpec::lookup("Account Name").with_synonyms(&["Account"]),
    FieldSpec::picklist("Status").required(),
    FieldSpec::picklist("Priority"),
    FieldSpec::picklist("Case Origin").with_synonyms(&["Origin"]).required(),
    FieldSpec::picklist("Type"),
    FieldSpec::picklist("Case Reason").with_synonyms(&["Reason"]),
    FieldSpec::text("Subject"),
    FieldSpec::text_area("Description"),
    FieldSpec::text_area("Internal Comments").with_synonyms(&["Comments"]),
    FieldSpec::text("Web Email"),
    FieldSpec::text("Web Name"),
    FieldSpec::text("Web Phone"),
    FieldSpec::text("Web Company"),
];

/// Case record page
#[derive(Debug, Clone, Copy, Default)]
pub struct CasePage;

impl RecordPage for CasePage {
    fn object_name(&self) -> &'static str {
        "Cases"
    }

    fn api_name(&self) -> &'static str {
        "Case"
    }

    fn fields(&self) -> &'static [FieldSpec] {
        FIELDS
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["Support Case"]
    }
}
