//! Gherkin suite against a live Salesforce org.
//!
//! ```text
//! cargo test -p crmwright --features live --test cucumber
//! ```
//!
//! Needs `SF_LOGIN_URL`, `SF_USERNAME` and `SF_PASSWORD` (or `crmwright.yaml`
//! / `.env`) and a Chromium install. Scenarios tagged `@mode:serial` run one
//! at a time on their feature's shared page; the rest run concurrently, each
//! on a fresh page, up to `workers` at once. Every scenario that does not
//! pass leaves a screenshot under `<report_dir>/screenshots/`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod steps;
mod world;

use crmwright::{capture_on_failure, Browser, ExecutionMode, ScenarioStatus, SessionPool, SuiteConfig};
use cucumber::event::ScenarioFinished;
use cucumber::gherkin::{Feature, Rule, Scenario};
use cucumber::runner::basic::ScenarioType;
use cucumber::writer::Stats as _;
use cucumber::World as _;
use futures::FutureExt as _;
use std::sync::Arc;
use world::{SalesforceWorld, Session};

/// Execution mode from feature, rule and scenario tags
fn mode_of(feature: &Feature, rule: Option<&Rule>, scenario: &Scenario) -> ExecutionMode {
    let outer: Vec<&String> = feature
        .tags
        .iter()
        .chain(rule.map(|r| r.tags.iter()).into_iter().flatten())
        .collect();
    ExecutionMode::from_tags(&outer, &scenario.tags)
}

fn status_of(event: &ScenarioFinished) -> ScenarioStatus {
    match event {
        ScenarioFinished::StepPassed => ScenarioStatus::Passed,
        ScenarioFinished::StepSkipped => ScenarioStatus::Skipped,
        ScenarioFinished::StepFailed(_, _, err) if err.to_string().contains("Timed out after") => {
            ScenarioStatus::TimedOut
        }
        _ => ScenarioStatus::Failed,
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Arc::new(SuiteConfig::load(None).expect("invalid suite configuration"));
    let browser = Arc::new(
        Browser::launch(config.browser_config())
            .await
            .expect("failed to launch Chromium"),
    );
    let sessions: Arc<SessionPool<Session>> = Arc::new(SessionPool::new());

    let hooks = (Arc::clone(&config), Arc::clone(&browser), Arc::clone(&sessions));
    let screenshots = config.screenshot_dir();

    let writer = SalesforceWorld::cucumber()
        .max_concurrent_scenarios(config.effective_workers())
        .which_scenario(|feature, rule, scenario| {
            if mode_of(feature, rule, scenario).is_serial() {
                ScenarioType::Serial
            } else {
                ScenarioType::Concurrent
            }
        })
        .before(move |feature, rule, scenario, world| {
            let (config, browser, sessions) = (
                Arc::clone(&hooks.0),
                Arc::clone(&hooks.1),
                Arc::clone(&hooks.2),
            );
            let mode = mode_of(feature, rule, scenario);
            async move {
                let session = sessions
                    .page_for(&feature.name, mode, || async {
                        browser.new_page().await.map(Session::new)
                    })
                    .await
                    .expect("failed to open a browser page");
                tracing::info!(scenario = %scenario.name, %mode, "scenario starting");
                world.attach(config, session, mode);
            }
            .boxed_local()
        })
        .after(move |_feature, _rule, scenario, event, world| {
            let screenshots = screenshots.clone();
            let status = status_of(event);
            async move {
                let Some(world) = world else { return };
                let Some(session) = world.session.as_ref() else {
                    return;
                };
                let _ = capture_on_failure(&session.page, &screenshots, &scenario.name, status).await;
                tracing::info!(scenario = %scenario.name, %status, "scenario finished");
                if !world.mode.is_serial() {
                    if let Err(e) = session.page.close().await {
                        tracing::debug!(error = %e, "closing page");
                    }
                }
            }
            .boxed_local()
        })
        .run("tests/features")
        .await;

    for session in sessions.drain().await {
        let _ = session.page.close().await;
    }
    if let Ok(browser) = Arc::try_unwrap(browser) {
        if let Err(e) = browser.close().await {
            tracing::warn!(error = %e, "closing browser");
        }
    }

    if writer.execution_has_failed() {
        std::process::exit(1);
    }
}
