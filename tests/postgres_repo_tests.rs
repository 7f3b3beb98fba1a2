//! Run with `DATABASE_URL=postgres://... cargo test -- --ignored`.

use chrono::NaiveDate;
use portfolio_api::{
    entities::{
        contact_message::ContactForm,
        project::ProjectRequest,
        skill::SkillRequest,
    },
    errors::AppError,
    repositories::{
        contact_message::ContactRepository,
        project::ProjectRepository,
        skill::SkillRepository,
        sqlx_repo::{SqlxContactRepo, SqlxProjectRepo, SqlxSkillRepo},
    },
    use_cases::seed::{seed_if_empty, SeedOutcome},
};
use sqlx::PgPool;

fn project(title: &str, date: NaiveDate, technologies: &[&str]) -> ProjectRequest {
    ProjectRequest {
        title: title.into(),
        description: "desc".into(),
        long_description: "long desc".into(),
        technologies: technologies.iter().map(|t| t.to_string()).collect(),
        image_url: None,
        github_url: "https://github.com/example/repo".into(),
        live_url: None,
        featured: false,
        category: "Backend".into(),
        date,
    }
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn technologies_round_trip_in_order(pool: PgPool) {
    let repo = SqlxProjectRepo::new(pool);

    let created = repo
        .create_project(&project("Ordered", ymd(2024, 1, 1), &["Zig", "Ada", "Rust"]).prepare_for_insert())
        .await
        .unwrap();
    let fetched = repo.get_project_by_id(created.id).await.unwrap();

    assert_eq!(fetched.technologies, vec!["Zig", "Ada", "Rust"]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn projects_list_newest_date_first(pool: PgPool) {
    let repo = SqlxProjectRepo::new(pool);
    for (title, date) in [("Old", ymd(2023, 1, 1)), ("New", ymd(2025, 1, 1)), ("Mid", ymd(2024, 1, 1))] {
        repo.create_project(&project(title, date, &[]).prepare_for_insert()).await.unwrap();
    }

    let titles: Vec<String> = repo.list_projects().await.unwrap().into_iter().map(|p| p.title).collect();

    assert_eq!(titles, vec!["New", "Mid", "Old"]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn update_of_missing_project_is_not_found(pool: PgPool) {
    let repo = SqlxProjectRepo::new(pool);

    let result = repo
        .update_project(404, &project("Ghost", ymd(2024, 1, 1), &["Rust"]).prepare_for_update())
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert_eq!(repo.count_projects().await.unwrap(), 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn cleanup_keeps_the_lowest_id(pool: PgPool) {
    let repo = SqlxProjectRepo::new(pool);
    let first = repo
        .create_project(&project("Twin", ymd(2024, 1, 1), &["Rust"]).prepare_for_insert())
        .await
        .unwrap();
    repo.create_project(&project("Twin", ymd(2024, 2, 1), &["Go"]).prepare_for_insert())
        .await
        .unwrap();

    let report = repo.remove_duplicate_projects().await.unwrap();

    assert_eq!((report.before, report.removed, report.after), (2, 1, 1));
    let remaining = repo.list_projects().await.unwrap();
    assert_eq!(remaining[0].id, first.id);
    assert_eq!(remaining[0].technologies, vec!["Rust"]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn duplicate_skill_name_is_conflict(pool: PgPool) {
    let repo = SqlxSkillRepo::new(pool);
    let java = SkillRequest::new("Java", 90, "Languages", "fab fa-java", "#f89820");

    repo.create_skill(&java.prepare_for_insert()).await.unwrap();
    let again = repo.create_skill(&java.prepare_for_insert()).await;

    assert!(matches!(again, Err(AppError::Conflict(_))));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn seeding_is_idempotent(pool: PgPool) {
    let projects = SqlxProjectRepo::new(pool.clone());
    let skills = SqlxSkillRepo::new(pool);

    seed_if_empty(&projects, &skills).await.unwrap();
    let second = seed_if_empty(&projects, &skills).await.unwrap();

    assert_eq!(second.projects, SeedOutcome::Skipped(3));
    assert_eq!(second.skills, SeedOutcome::Skipped(8));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn concurrent_seeding_inserts_samples_once(pool: PgPool) {
    let (projects_a, skills_a) = (SqlxProjectRepo::new(pool.clone()), SqlxSkillRepo::new(pool.clone()));
    let (projects_b, skills_b) = (SqlxProjectRepo::new(pool.clone()), SqlxSkillRepo::new(pool.clone()));

    let (a, b) = tokio::join!(
        seed_if_empty(&projects_a, &skills_a),
        seed_if_empty(&projects_b, &skills_b),
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    let seeded = [a.projects, b.projects]
        .iter()
        .filter(|o| matches!(o, SeedOutcome::Seeded(_)))
        .count();
    assert_eq!(seeded, 1);
    assert_eq!(projects_a.count_projects().await.unwrap(), 3);
    assert_eq!(skills_a.count_skills().await.unwrap(), 8);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn renaming_skill_onto_existing_name_is_conflict(pool: PgPool) {
    let repo = SqlxSkillRepo::new(pool);
    repo.create_skill(&SkillRequest::new("Java", 90, "Languages", "fab fa-java", "#f89820").prepare_for_insert())
        .await
        .unwrap();
    let go = repo
        .create_skill(&SkillRequest::new("Go", 70, "Languages", "fab fa-golang", "#00add8").prepare_for_insert())
        .await
        .unwrap();

    let renamed = repo
        .update_skill(go.id, &SkillRequest::new("Java", 70, "Languages", "fab fa-golang", "#00add8").prepare_for_update())
        .await;

    assert!(matches!(renamed, Err(AppError::Conflict(_))));
    assert_eq!(repo.get_skill_by_id(go.id).await.unwrap().name, "Go");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn overlong_column_value_is_a_validation_error(pool: PgPool) {
    let repo = SqlxProjectRepo::new(pool);
    let long_title = "T".repeat(300);

    let result = repo
        .create_project(&project(&long_title, ymd(2024, 1, 1), &["Rust"]).prepare_for_insert())
        .await;

    assert!(matches!(result, Err(AppError::ValidationError(_))));
    assert_eq!(repo.count_projects().await.unwrap(), 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn unread_count_follows_mark_read(pool: PgPool) {
    let repo = SqlxContactRepo::new(pool);
    let form = ContactForm {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        subject: "Hi".into(),
        message: "Hello".into(),
    };

    let saved = repo.create_contact_message(&form.prepare_for_insert()).await.unwrap();
    assert_eq!(repo.count_unread_contact_messages().await.unwrap(), 1);

    let read = repo.mark_contact_message_read(saved.id).await.unwrap();
    assert!(read.is_read);
    assert_eq!(repo.count_unread_contact_messages().await.unwrap(), 0);
}
