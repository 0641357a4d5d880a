//! Assets

use crate::form::FieldSpec;
use crate::page_object::RecordPage;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("Asset Name").with_synonyms(&["Name"]).required(),
    FieldSpec::lookup("Account").with_synonyms(&["Account Name"]),
    FieldSpec::lookup("Contact").with_synonyms(&["Contact Name"]),
    FieldSpec::lookup("Product"),
    FieldSpec::lookup("Parent Asset"),
    FieldSpec::text("Serial Number"),
    FieldSpec::text("Quantity"),
    FieldSpec::text("Price"),
    FieldSpec::picklist("Status"),
    FieldSpec::date("Install Date"),
    FieldSpec::date("Purchase Date"),
    FieldSpec::date("Usage End Date"),
    FieldSpec::checkbox("Competitor Asset"),
    FieldSpec::text_area("Description"),
];

/// Asset record page
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetPage;

impl RecordPage for AssetPage {
    fn object_name(&self) -> &'static str {
        "Assets"
    }

    fn api_name(&self) -> &'static str {
        "Asset"
    }

    fn fields(&self) -> &'static [FieldSpec] {
        FIELDS
    }
}
