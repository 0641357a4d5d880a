//! App Launcher navigation.
//!
//! ```text
//! [waffle] -> View All -> search box <- name -> link "name"
//! ```

use crate::driver::PageDriver;
use crate::locator::Locator;
use crate::result::CrmResult;

/// Drives the Lightning App Launcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppLauncher {
    launcher_button: Locator,
    view_all: Locator,
    search_box: Locator,
}

impl Default for AppLauncher {
    fn default() -> Self {
        Self {
            launcher_button: Locator::button("App Launcher"),
            view_all: Locator::button("View All"),
            search_box: Locator::new("input[type='search'][placeholder^='Search apps']"),
        }
    }
}

impl AppLauncher {
    /// Create a launcher with the standard Lightning locators
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the launcher (waffle) button locator
    #[must_use]
    pub fn with_launcher_button(mut self, locator: Locator) -> Self {
        self.launcher_button = locator;
        self
    }

    /// Override the "View All" locator
    #[must_use]
    pub fn with_view_all(mut self, locator: Locator) -> Self {
        self.view_all = locator;
        self
    }

    /// Override the search box locator
    #[must_use]
    pub fn with_search_box(mut self, locator: Locator) -> Self {
        self.search_box = locator;
        self
    }

    /// Open an app or object by its launcher name.
    ///
    /// Each element waits up to the driver's action timeout.
    ///
    /// # Errors
    ///
    /// Returns a timeout when any launcher element does not appear
    pub async fn open_app<D: PageDriver + ?Sized>(&self, driver: &D, name: &str) -> CrmResult<()> {
        tracing::info!(app = name, "opening from app launcher");
        let timeout = driver.action_timeout();
        driver.click(&self.launcher_button.clone().with_timeout(timeout)).await?;
        driver.click(&self.view_all.clone().with_timeout(timeout)).await?;
        driver
            .fill(&self.search_box.clone().with_timeout(timeout), name)
            .await?;
        driver.click(&Locator::link(name).with_timeout(timeout)).await
    }

    /// Go straight to an object's list view.
    ///
    /// # Errors
    ///
    /// Returns the driver's navigation error
    pub async fn open_object_list<D: PageDriver + ?Sized>(
        &self,
        driver: &D,
        base_url: &str,
        api_name: &str,
    ) -> CrmResult<()> {
        let url = object_list_url(base_url, api_name);
        tracing::info!(object = api_name, %url, "opening list view");
        driver.goto(&url).await
    }
}

/// `<base>/lightning/o/<ApiName>/list`
#[must_use]
pub fn object_list_url(base_url: &str, api_name: &str) -> String {
    format!("{}/lightning/o/{api_name}/list", base_url.trim_end_matches('/'))
}

/// `<base>/lightning/page/home`
#[must_use]
pub fn home_url(base_url: &str) -> String {
    format!("{}/lightning/page/home", base_url.trim_end_matches('/'))
}
