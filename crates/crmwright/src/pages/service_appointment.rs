//! Service appointments (Field Service)

use crate::form::FieldSpec;
use crate::page_object::RecordPage;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::lookup("Parent Record").required(),
    FieldSpec::text("Subject"),
    FieldSpec::picklist("Status"),
    FieldSpec::date("Earliest Start Permitted").required(),
    FieldSpec::date("Due Date").required(),
    FieldSpec::date("Scheduled Start"),
    FieldSpec::date("Scheduled End"),
    FieldSpec::date("Arrival Window Start").with_synonyms(&["Arrival Start"]),
    FieldSpec::date("Arrival Window End").with_synonyms(&["Arrival End"]),
    FieldSpec::text("Duration"),
    FieldSpec::picklist("Duration Type"),
    FieldSpec::lookup("Contact"),
    FieldSpec::lookup("Work Type"),
    FieldSpec::text_area("Description"),
];

/// Service appointment record page
#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceAppointmentPage;

impl RecordPage for ServiceAppointmentPage {
    fn object_name(&self) -> &'static str {
        "Service Appointments"
    }

    fn api_name(&self) -> &'static str {
        "ServiceAppointment"
    }

    fn fields(&self) -> &'static [FieldSpec] {
        FIELDS
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["Appointment", "Appointments"]
    }
}
