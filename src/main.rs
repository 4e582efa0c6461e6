//! Demo: an administrator builds a small course, then a student signs up and onboards.

use tracing::{error, info, Instrument};
use tutor_admin::config::AppConfig;
use tutor_admin::lifecycle::tracing::setup_tracing;
use tutor_admin::lifecycle::AdminSystem;
use tutor_admin::model::{Identity, LessonDraft, NewUser, SectionDraft};
use tutor_admin::pages::{AccountState, OnboardingState};
use tutor_admin::services::StagedFile;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = AppConfig::from_env()?;
    info!(?config, "Starting admin demo");
    let system = AdminSystem::new(config);

    let admin = system
        .accounts
        .users
        .insert(NewUser {
            full_name: Some("Grace".to_string()),
            is_admin: true,
        })
        .await?;
    system
        .auth
        .sign_in(Identity {
            id: admin.id.clone(),
            email: Some("grace@example.com".to_string()),
        })
        .await;

    let span = tracing::info_span!("catalogue_setup");
    async {
        let mut sections = system.section_screen();
        sections.activate().await;

        *sections.draft_mut() = SectionDraft::new("Numbers", 1);
        let logo = vec![0x89, 0x50, 0x4e, 0x47];
        sections.stage_asset(StagedFile::new("numbers.png", "image/png", logo))?;
        sections.create().await?;
        *sections.draft_mut() = SectionDraft::new("Shapes", 2);
        sections.create().await?;

        let mut lessons = system.lesson_screen();
        lessons.activate().await;
        let first_section = lessons.section_options().first().map(|s| s.id.clone());
        *lessons.draft_mut() = LessonDraft {
            title: "Counting to ten".to_string(),
            section_id: first_section,
            ..LessonDraft::default()
        };
        lessons.create().await?;

        for lesson in lessons.items() {
            info!(
                lesson = %lesson.title,
                section = lessons.section_title(&lesson.section_id).unwrap_or("?"),
                "Catalogue entry"
            );
        }
        Ok::<(), Box<dyn std::error::Error>>(())
    }
    .instrument(span)
    .await?;

    let student = system.accounts.users.insert(NewUser::default()).await?;
    system
        .auth
        .sign_in(Identity {
            id: student.id.clone(),
            email: Some("sam@example.com".to_string()),
        })
        .await;

    let span = tracing::info_span!("onboarding");
    async {
        let page = system.onboarding_page();
        if let OnboardingState::Form(mut form) = page.load().await? {
            form.name = "Sam".to_string();
            let next = page.submit(&form).await?;
            info!(?next, "Onboarding submitted");
        }
        match system.account_page().load().await? {
            AccountState::Loaded(view) => info!(summary = %view.plan_summary(), "Account loaded"),
            AccountState::Redirect(to) => error!(?to, "Unexpected redirect"),
        }
        Ok::<(), Box<dyn std::error::Error>>(())
    }
    .instrument(span)
    .await?;

    system.shutdown().await?;
    info!("Demo completed");
    Ok(())
}
