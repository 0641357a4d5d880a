//! Step definitions.
//!
//! Data tables are two-column `| Label | Value |` rows read with rows-hash
//! semantics into a `FieldMap`.

use crate::world::SalesforceWorld;
use crmwright::{CrmError, CrmResult, FieldMap};
use cucumber::gherkin::Step;
use cucumber::{given, then, when};

fn table(step: &Step) -> CrmResult<FieldMap> {
    let table = step.table.as_ref().ok_or_else(|| CrmError::InvalidTable {
        row: 0,
        message: format!("step '{}' needs a data table", step.value),
    })?;
    FieldMap::from_rows(&table.rows)
}

// ---------------------------------------------------------------------------
// Given
// ---------------------------------------------------------------------------

#[given("I am logged in to Salesforce")]
async fn logged_in(world: &mut SalesforceWorld) -> CrmResult<()> {
    world.log_in().await
}

// ---------------------------------------------------------------------------
// When
// ---------------------------------------------------------------------------

#[when(expr = "I open {string} from the App Launcher")]
async fn open_from_launcher(world: &mut SalesforceWorld, name: String) -> CrmResult<()> {
    world.open_app(&name).await
}

#[when(expr = "I go to the {string} list")]
async fn open_list(world: &mut SalesforceWorld, entity: String) -> CrmResult<()> {
    world.open_list(&entity).await
}

#[when(expr = "I create a new {string} with:")]
async fn create_record(world: &mut SalesforceWorld, step: &Step, entity: String) -> CrmResult<()> {
    let map = table(step)?;
    let report = world.create(&entity, map).await?;
    tracing::info!(
        entity,
        filled = report.filled.len(),
        skipped = report.skipped_blank.len(),
        "record submitted"
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Then
// ---------------------------------------------------------------------------

#[then("the new record shows the entered values")]
async fn record_shows_values(world: &mut SalesforceWorld) -> CrmResult<()> {
    world.verify_last_record(false).await
}

#[then("the record details contain the entered values")]
async fn record_details_contain_values(world: &mut SalesforceWorld) -> CrmResult<()> {
    world.verify_last_record(true).await
}

#[then("I see:")]
async fn i_see(world: &mut SalesforceWorld, step: &Step) -> CrmResult<()> {
    let map = table(step)?;
    world.verify_visible(&map).await
}

#[then(expr = "a {string} record is open")]
async fn record_is_open(world: &mut SalesforceWorld, entity: String) -> CrmResult<()> {
    match world.record_id(&entity).await? {
        Some(id) => {
            tracing::info!(entity, id, "record open");
            Ok(())
        }
        None => Err(CrmError::assertion(format!(
            "expected a {entity} record page, got {}",
            world.page_url().await
        ))),
    }
}
