use crate::account_tables::AccountClients;
use crate::config::AppConfig;
use crate::framework::TableClient;
use crate::model::{Lesson, Section};
use crate::pages::{AccountPage, OnboardingPage};
use crate::screen::{AccessGate, LessonScreen, SectionScreen};
use crate::services::{MemoryStorage, SandboxPayments, SessionAuth};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    #[error("Table task failed: {0}")]
    TaskFailed(String),
}

/// Every table actor plus the in-process auth, storage and payments services.
///
/// # Wiring
///
/// Tables start with no dependencies except `lessons`, whose row hooks receive a
/// sections client so an insert or update can check its section reference.
///
/// # Example
///
/// ```ignore
/// let system = AdminSystem::new(AppConfig::from_env()?);
/// let mut sections = system.section_screen();
/// sections.activate().await;
/// drop(sections);
/// system.shutdown().await?;
/// ```
pub struct AdminSystem {
    pub config: AppConfig,
    pub sections: TableClient<Section>,
    pub lessons: TableClient<Lesson>,
    pub accounts: AccountClients,
    pub auth: Arc<SessionAuth>,
    pub storage: Arc<MemoryStorage>,
    pub payments: Arc<SandboxPayments>,
    /// Dependents come first so shutdown never waits on a table that is still referenced.
    handles: Vec<(&'static str, JoinHandle<()>)>,
}

impl AdminSystem {
    /// Spawns every table. Must be called inside a Tokio runtime.
    pub fn new(config: AppConfig) -> Self {
        let buffer = config.channel_buffer;
        let (section_actor, sections) = crate::section_table::new(buffer);
        let (lesson_actor, lessons) = crate::lesson_table::new(buffer);
        let (account_actors, accounts) = crate::account_tables::new(buffer);

        let handles = vec![
            ("lessons", tokio::spawn(lesson_actor.run(sections.clone()))),
            ("sections", tokio::spawn(section_actor.run(()))),
            ("users", tokio::spawn(account_actors.users.run(()))),
            ("onboarding", tokio::spawn(account_actors.onboarding.run(()))),
            ("products", tokio::spawn(account_actors.products.run(()))),
            ("prices", tokio::spawn(account_actors.prices.run(()))),
            ("subscriptions", tokio::spawn(account_actors.subscriptions.run(()))),
        ];
        info!(tables = handles.len(), buffer, "Admin system started");

        Self {
            auth: Arc::new(SessionAuth::new()),
            storage: Arc::new(MemoryStorage::new(config.storage_base_url.clone())),
            payments: Arc::new(SandboxPayments::new(
                config.payments_base_url.clone(),
                config.site_url.clone(),
            )),
            config,
            sections,
            lessons,
            accounts,
            handles,
        }
    }

    pub fn access_gate(&self) -> AccessGate {
        AccessGate::new(self.auth.clone(), self.accounts.users.clone())
    }

    pub fn section_screen(&self) -> SectionScreen {
        SectionScreen::new(
            self.sections.clone(),
            self.access_gate(),
            Some(self.storage.clone()),
        )
    }

    pub fn lesson_screen(&self) -> LessonScreen {
        LessonScreen::new(self.lessons.clone(), self.sections.clone(), self.access_gate())
    }

    pub fn onboarding_page(&self) -> OnboardingPage {
        OnboardingPage::new(
            self.auth.clone(),
            self.accounts.users.clone(),
            self.accounts.onboarding.clone(),
        )
    }

    pub fn account_page(&self) -> AccountPage {
        AccountPage::new(self.auth.clone(), self.accounts.clone(), self.payments.clone())
    }

    /// Drops the system's clients and waits for every table to drain.
    ///
    /// Screens and pages hold their own clients; drop them first or this waits forever.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down admin system");
        drop(self.sections);
        drop(self.lessons);
        drop(self.accounts);

        for (table, handle) in self.handles {
            if let Err(e) = handle.await {
                error!(table, error = ?e, "Table task failed");
                return Err(SystemError::TaskFailed(format!("{table}: {e}")));
            }
        }

        info!("Admin system shutdown complete");
        Ok(())
    }
}
