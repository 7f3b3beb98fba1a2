
use actix_web::{http::StatusCode, test};
use portfolio_api::entities::skill::Skill;
use test_utils::{read_plain_text, skill_body, today, TestContext};

#[actix_rt::test]
async fn level_above_hundred_is_rejected() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/skills")
        .set_json(skill_body("Rust", 120, "Languages"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json["details"][0]["field"], "level");
}

#[actix_rt::test]
async fn created_skill_is_returned_with_dates() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/skills")
        .set_json(skill_body("Rust", 70, "Languages"))
        .to_request();
    let skill: Skill = test::call_and_read_body_json(&app, req).await;

    assert_eq!(skill.id, 1);
    assert_eq!(skill.level, 70);
    assert_eq!(skill.created_at, today());
}

#[actix_rt::test]
async fn duplicate_name_is_conflict() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    for expected in [StatusCode::OK, StatusCode::CONFLICT] {
        let req = test::TestRequest::post()
            .uri("/skills")
            .set_json(skill_body("Java", 90, "Languages"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), expected);
    }
}

#[actix_rt::test]
async fn list_is_highest_level_first() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    for (name, level) in [("Git", 75), ("Java", 90), ("React", 80)] {
        let req = test::TestRequest::post()
            .uri("/skills")
            .set_json(skill_body(name, level, "Tools"))
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::get().uri("/skills").to_request();
    let skills: Vec<Skill> = test::call_and_read_body_json(&app, req).await;

    let levels: Vec<_> = skills.iter().map(|s| s.level).collect();
    assert_eq!(levels, vec![90, 80, 75]);
}

#[actix_rt::test]
async fn category_routes_are_not_shadowed_by_id_route() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    for (name, category) in [("Java", "Languages"), ("React", "Frontend"), ("Go", "Languages")] {
        let req = test::TestRequest::post()
            .uri("/skills")
            .set_json(skill_body(name, 50, category))
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::get().uri("/skills/categories").to_request();
    let categories: Vec<String> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(categories, vec!["Frontend", "Languages"]);

    let req = test::TestRequest::get().uri("/skills/category/Languages").to_request();
    let languages: Vec<Skill> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(languages.len(), 2);
}

#[actix_rt::test]
async fn update_and_delete_missing_skill_are_404() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let req = test::TestRequest::put()
        .uri("/skills/5")
        .set_json(skill_body("Rust", 70, "Languages"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete().uri("/skills/5").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn update_replaces_level() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/skills")
        .set_json(skill_body("Rust", 40, "Languages"))
        .to_request();
    let created: Skill = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::put()
        .uri(&format!("/skills/{}", created.id))
        .set_json(skill_body("Rust", 65, "Languages"))
        .to_request();
    let updated: Skill = test::call_and_read_body_json(&app, req).await;

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.level, 65);
}

#[actix_rt::test]
async fn renaming_onto_existing_name_is_conflict() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let mut ids = Vec::new();
    for name in ["Java", "Go"] {
        let req = test::TestRequest::post()
            .uri("/skills")
            .set_json(skill_body(name, 80, "Languages"))
            .to_request();
        let created: Skill = test::call_and_read_body_json(&app, req).await;
        ids.push(created.id);
    }

    let req = test::TestRequest::put()
        .uri(&format!("/skills/{}", ids[1]))
        .set_json(skill_body("Java", 80, "Languages"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::get().uri(&format!("/skills/{}", ids[1])).to_request();
    let unchanged: Skill = test::call_and_read_body_json(&app, req).await;
    assert_eq!(unchanged.name, "Go");
}

#[actix_rt::test]
async fn overlong_color_is_a_validation_error() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let mut body = skill_body("Rust", 70, "Languages");
    body["color"] = serde_json::json!("#".repeat(65));

    let req = test::TestRequest::post().uri("/skills").set_json(body).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json["details"][0]["field"], "color");
}

#[actix_rt::test]
async fn malformed_json_is_bad_request() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/skills")
        .insert_header(("content-type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json["error"], "Invalid request body");
}

#[actix_rt::test]
async fn health_is_plain_text() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let req = test::TestRequest::get().uri("/skills/health").to_request();
    let body = read_plain_text(test::call_service(&app, req).await).await;

    assert_eq!(body, "Skills service is running");
}
