use tutor_admin::framework::mock::MockTable;
use tutor_admin::framework::{Query, RemoteError};
use tutor_admin::model::{Lesson, LessonFilter, LessonInsert, Section, SectionId};

fn numbers() -> Section {
    Section {
        id: SectionId::from("s1"),
        title: "Numbers".to_string(),
        description: None,
        order_index: 0,
        image_url: None,
    }
}

fn insert(title: &str, order_index: i32, section: &str) -> LessonInsert {
    LessonInsert {
        title: title.to_string(),
        content: None,
        video_url: None,
        order_index,
        section_id: SectionId::from(section),
    }
}

/// Real lessons table with a mocked sections table.
/// The section reference check in the row hooks is the only thing that talks to sections.
#[tokio::test]
async fn test_lessons_table_with_mocked_sections() {
    let mut sections = MockTable::<Section>::new();
    sections.expect_get().return_ok(Some(numbers()));
    sections.expect_get().return_ok(None);
    sections
        .expect_get()
        .return_err(RemoteError::Unavailable("timeout".into()));

    let (lesson_actor, lessons) = tutor_admin::lesson_table::new(8);
    let actor_handle = tokio::spawn(lesson_actor.run(sections.client()));

    let created = lessons
        .insert(insert("Counting", 3, "s1"))
        .await
        .expect("section s1 exists");
    assert_eq!(created.id.as_str(), "l1");

    let orphan = lessons.insert(insert("Orphan", 0, "s9")).await;
    match orphan {
        Err(RemoteError::Rejected(e)) => assert_eq!(e.to_string(), "Unknown section: s9"),
        other => panic!("Expected rejection, got {other:?}"),
    }

    let outage = lessons.insert(insert("Later", 0, "s1")).await;
    assert!(matches!(outage, Err(RemoteError::Rejected(_))));

    let listed = lessons
        .select(Query::filtered(LessonFilter::Section(SectionId::from("s1"))).order_by_index())
        .await
        .expect("select");
    assert_eq!(listed, vec![created]);

    sections.verify();
    drop(lessons);
    actor_handle.await.expect("lessons table exits cleanly");
}

/// Deleting lessons never consults sections.
#[tokio::test]
async fn test_lesson_delete_needs_no_section_lookup() {
    let mut sections = MockTable::<Section>::new();
    sections.expect_get().return_ok(Some(numbers()));

    let (lesson_actor, lessons) = tutor_admin::lesson_table::new(8);
    tokio::spawn(lesson_actor.run(sections.client()));

    let created: Lesson = lessons.insert(insert("Counting", 0, "s1")).await.expect("insert");
    lessons.delete(created.id.clone()).await.expect("delete");
    assert!(lessons.get(created.id).await.expect("get").is_none());
    assert_eq!(sections.request_count(), 1);
    sections.verify();
}
