
use actix_web::test;
use portfolio_api::{
    entities::{project::Project, skill::Skill},
    repositories::{project::ProjectRepository, skill::SkillRepository},
    use_cases::seed::{seed_if_empty, SeedOutcome},
};
use test_utils::{date, read_plain_text, stored_project, TestContext};

#[actix_rt::test]
async fn seeding_twice_never_duplicates() {
    let ctx = TestContext::new();

    let first = seed_if_empty(ctx.projects.as_ref(), ctx.skills.as_ref()).await.unwrap();
    assert_eq!(first.projects, SeedOutcome::Seeded(3));
    assert_eq!(first.skills, SeedOutcome::Seeded(8));

    let second = seed_if_empty(ctx.projects.as_ref(), ctx.skills.as_ref()).await.unwrap();
    assert_eq!(second.projects, SeedOutcome::Skipped(3));
    assert_eq!(second.skills, SeedOutcome::Skipped(8));

    assert_eq!(ctx.projects.count_projects().await.unwrap(), 3);
    assert_eq!(ctx.skills.count_skills().await.unwrap(), 8);
}

#[actix_rt::test]
async fn concurrent_seeds_insert_samples_once() {
    let ctx = TestContext::new();

    let (a, b) = tokio::join!(
        seed_if_empty(ctx.projects.as_ref(), ctx.skills.as_ref()),
        seed_if_empty(ctx.projects.as_ref(), ctx.skills.as_ref()),
    );
    let mut outcomes = vec![a.unwrap().projects, b.unwrap().projects];
    outcomes.sort_by_key(|o| matches!(o, SeedOutcome::Skipped(_)));

    assert_eq!(outcomes, vec![SeedOutcome::Seeded(3), SeedOutcome::Skipped(3)]);
    assert_eq!(ctx.projects.count_projects().await.unwrap(), 3);
    assert_eq!(ctx.skills.count_skills().await.unwrap(), 8);
}

#[actix_rt::test]
async fn tables_are_seeded_independently() {
    let ctx = TestContext::new();
    ctx.projects.insert_raw(stored_project(1, "Mine"));

    let report = seed_if_empty(ctx.projects.as_ref(), ctx.skills.as_ref()).await.unwrap();

    assert_eq!(report.projects, SeedOutcome::Skipped(1));
    assert_eq!(report.skills, SeedOutcome::Seeded(8));
}

#[actix_rt::test]
async fn seeded_data_is_listed_in_sort_order() {
    let ctx = TestContext::new();
    seed_if_empty(ctx.projects.as_ref(), ctx.skills.as_ref()).await.unwrap();

    let projects = ctx.projects.list_projects().await.unwrap();
    let titles: Vec<_> = projects.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["HealthBridge", "Spring Boot Payment Gateway", "SmartBank"]);
    assert_eq!(projects[0].date, date(2025, 4, 1));

    let skills = ctx.skills.list_skills().await.unwrap();
    assert_eq!(skills.first().map(|s| s.level), Some(90));
    assert_eq!(skills.last().map(|s| s.name.as_str()), Some("Git"));
}

#[actix_rt::test]
async fn seed_endpoint_reports_counts() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let req = test::TestRequest::post().uri("/projects/seed").to_request();
    let body = read_plain_text(test::call_service(&app, req).await).await;
    assert_eq!(body, "Projects seeded successfully! Count: 3");

    let req = test::TestRequest::post().uri("/projects/seed").to_request();
    let body = read_plain_text(test::call_service(&app, req).await).await;
    assert_eq!(body, "Projects already exist. Count: 3");

    let req = test::TestRequest::get().uri("/projects").to_request();
    let projects: Vec<Project> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(projects.len(), 3);
}

#[actix_rt::test]
async fn reset_then_seed_restores_samples() {
    let ctx = TestContext::new();
    seed_if_empty(ctx.projects.as_ref(), ctx.skills.as_ref()).await.unwrap();
    let app = test_app!(ctx);

    let req = test::TestRequest::get().uri("/projects/reset").to_request();
    test::call_service(&app, req).await;
    assert!(ctx.projects.ids().is_empty());

    seed_if_empty(ctx.projects.as_ref(), ctx.skills.as_ref()).await.unwrap();

    assert_eq!(ctx.projects.count_projects().await.unwrap(), 3);
    let req = test::TestRequest::get().uri("/skills").to_request();
    let skills: Vec<Skill> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(skills.len(), 8);
}
