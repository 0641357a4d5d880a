//! Contacts

use crate::form::FieldSpec;
use crate::page_object::RecordPage;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::picklist("Salutation"),
    FieldSpec::text("First Name"),
    FieldSpec::text("Last Name").required(),
    FieldSpec::lookup("Account Name").with_synonyms(&["Account"]),
    FieldSpec::text("Title"),
    FieldSpec::text("Department"),
    FieldSpec::text("Email"),
    FieldSpec::text("Phone"),
    FieldSpec::text("Mobile"),
    FieldSpec::date("Birthdate"),
    FieldSpec::lookup("Reports To"),
    FieldSpec::picklist("Lead Source"),
    FieldSpec::text_area("Mailing Street"),
    FieldSpec::text("Mailing City"),
    FieldSpec::text("Mailing State/Province").with_synonyms(&["Mailing State"]),
    FieldSpec::text("Mailing Zip/Postal Code").with_synonyms(&["Mailing Zip"]),
    FieldSpec::text("Mailing Country"),
    FieldSpec::text_area("Description"),
];

/// Contact record page
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactPage;

impl RecordPage for ContactPage {
    fn object_name(&self) -> &'static str {
        "Contacts"
    }

    fn api_name(&self) -> &'static str {
        "Contact"
    }

    fn fields(&self) -> &'static [FieldSpec] {
        FIELDS
    }
}
