//! Accounts

use crate::form::FieldSpec;
use crate::page_object::RecordPage;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("Account Name").with_synonyms(&["Name"]).required(),
    FieldSpec::text("Phone"),
    FieldSpec::text("Fax"),
    FieldSpec::text("Website"),
    FieldSpec::text("Account Number"),
    FieldSpec::text("Account Site").with_synonyms(&["Site"]),
    FieldSpec::picklist("Type"),
    FieldSpec::picklist("Industry"),
    FieldSpec::picklist("Rating"),
    FieldSpec::picklist("Ownership"),
    FieldSpec::lookup("Parent Account"),
    FieldSpec::text("Annual Revenue"),
    FieldSpec::text("Employees"),
    FieldSpec::text("Ticker Symbol"),
    FieldSpec::text("SIC Code"),
    FieldSpec::text_area("Billing Street"),
    FieldSpec::text("Billing City"),
    FieldSpec::text("Billing State/Province").with_synonyms(&["Billing State"]),
    FieldSpec::text("Billing Zip/Postal Code").with_synonyms(&["Billing Zip", "Billing Postal Code"]),
    FieldSpec::text("Billing Country"),
    FieldSpec::text_area("Shipping Street"),
    FieldSpec::text("Shipping City"),
    FieldSpec::text("Shipping State/Province").with_synonyms(&["Shipping State"]),
    FieldSpec::text("Shipping Zip/Postal Code").with_synonyms(&["Shipping Zip", "Shipping Postal Code"]),
    FieldSpec::text("Shipping Country"),
    FieldSpec::text_area("Description"),
];

/// Account record page
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountPage;

impl RecordPage for AccountPage {
    fn object_name(&self) -> &'static str {
        "Accounts"
    }

    fn api_name(&self) -> &'static str {
        "Account"
    }

    fn fields(&self) -> &'static [FieldSpec] {
        FIELDS
    }
}
