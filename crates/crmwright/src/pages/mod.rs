//! Concrete page objects, one per Salesforce entity.

mod account;
mod asset;
mod campaign;
mod case;
mod contact;
mod lead;
mod login;
mod opportunity;
mod product;
mod service_appointment;
mod work_order;

pub use account::AccountPage;
pub use asset::AssetPage;
pub use campaign::CampaignPage;
pub use case::CasePage;
pub use contact::ContactPage;
pub use lead::LeadPage;
pub use login::LoginPage;
pub use opportunity::OpportunityPage;
pub use product::{ProductCategoryPage, ProductPage};
pub use service_appointment::ServiceAppointmentPage;
pub use work_order::WorkOrderPage;

use crate::page_object::PageRegistry;

/// Registry holding every standard entity page
#[must_use]
pub fn standard_registry() -> PageRegistry {
    PageRegistry::new()
        .with(AccountPage)
        .with(ContactPage)
        .with(OpportunityPage)
        .with(CasePage)
        .with(WorkOrderPage)
        .with(LeadPage)
        .with(CampaignPage)
        .with(ProductPage)
        .with(ProductCategoryPage)
        .with(AssetPage)
        .with(ServiceAppointmentPage)
}
