mod test_utils;

use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::*;
use uuid::Uuid;

#[actix_rt::test]
async fn health_and_departments_are_public() {
    let Some(app) = TestApp::spawn().await else { return };

    let health = app.client.get(app.url("/api/health")).send().await.unwrap();
    assert_eq!(health.status(), StatusCode::OK);

    let departments: Vec<Value> = app.client
        .get(app.url("/api/departments"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(departments.iter().any(|d| d["name"] == "Computer Science"));
}

#[actix_rt::test]
async fn register_sets_session_and_returns_profile() {
    let Some(app) = TestApp::spawn().await else { return };
    let cs = app.department_id("Computer Science").await;

    let student = app.create_user("student", Some(cs)).await;

    let response = app.client
        .get(app.url("/api/current_user"))
        .header("Cookie", &student.cookie)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let profile: Value = response.json().await.unwrap();
    assert_eq!(profile["email"], student.email);
    assert_eq!(profile["department"], "Computer Science");
    assert_eq!(profile["role"], "student");
}

#[actix_rt::test]
async fn duplicate_email_is_a_conflict() {
    let Some(app) = TestApp::spawn().await else { return };
    let student = app.create_user("student", None).await;

    let response = app.register(&json!({
        "name": "Someone Else",
        "email": student.email,
        "password": "another",
        "role": "faculty",
    }))
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(&student.email)
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[actix_rt::test]
async fn register_rejects_missing_fields_and_unknown_department() {
    let Some(app) = TestApp::spawn().await else { return };

    let missing = app.register(&json!({ "email": "not-an-email", "role": "student" })).await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

    let unknown = app.register(&json!({
        "name": "Lost",
        "email": format!("lost-{}@campus.test", Uuid::new_v4()),
        "password": "pw",
        "role": "student",
        "department_id": i64::MAX,
    }))
    .await;
    assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn login_requires_matching_role() {
    let Some(app) = TestApp::spawn().await else { return };
    let student = app.create_user("student", None).await;

    let wrong_role = app.client
        .post(app.url("/api/login"))
        .json(&json!({ "email": student.email, "password": student.password, "role": "faculty" }))
        .send()
        .await
        .unwrap();
    assert_eq!(wrong_role.status(), StatusCode::UNAUTHORIZED);

    let ok = app.client
        .post(app.url("/api/login"))
        .json(&json!({ "email": student.email, "password": student.password, "role": "student" }))
        .send()
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
    assert!(session_cookie(&ok).is_some());
}

#[actix_rt::test]
async fn protected_routes_require_a_session() {
    let Some(app) = TestApp::spawn().await else { return };

    let response = app.client.get(app.url("/api/skills")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.client.get(app.url("/api/submissions")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn submitted_skill_gets_exactly_one_pending_validation() {
    let Some(app) = TestApp::spawn().await else { return };
    let student = app.create_user("student", None).await;

    let response = app.submit_skill(&student, "Rust", "Intermediate", None).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let skill: Value = response.json().await.unwrap();
    assert_eq!(skill["skillName"], "Rust");
    assert_eq!(skill["status"], "Pending");
    assert!(skill["evidence"].is_null());

    let skill_id = skill["id"].as_i64().unwrap();
    let (_, status, feedback) = app.validation_row(skill_id).await.expect("validation row");
    assert_eq!(status, "Pending");
    assert!(feedback.is_none());

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM validations WHERE skill_id = $1")
        .bind(skill_id)
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[actix_rt::test]
async fn failed_validation_insert_leaves_no_skill_behind() {
    let Some(app) = TestApp::spawn().await else { return };
    app.fail_validation_inserts_for("rollback-check-").await;
    let student = app.create_user("student", None).await;
    let skill_name = format!("rollback-check-{}", Uuid::new_v4());

    let response = app.submit_skill(&student, &skill_name, "Beginner", None).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("Could not save skill"));

    let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM skills WHERE skill_name = $1")
        .bind(&skill_name)
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(orphans, 0);
}

#[actix_rt::test]
async fn skill_submission_validates_text_fields() {
    let Some(app) = TestApp::spawn().await else { return };
    let student = app.create_user("student", None).await;

    let response = app.submit_skill(&student, "", "Beginner", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.submit_skill(&student, "   ", "  ", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let too_long = "x".repeat(101);
    let response = app.submit_skill(&student, &too_long, "Beginner", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn faculty_cannot_submit_skills() {
    let Some(app) = TestApp::spawn().await else { return };
    let faculty = app.create_user("faculty", None).await;

    let response = app.submit_skill(&faculty, "Rust", "Expert", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn evidence_is_sanitized_and_served_back() {
    let Some(app) = TestApp::spawn().await else { return };
    let student = app.create_user("student", None).await;
    let original = format!("../My Cert {}.TXT", Uuid::new_v4());

    let response = app
        .submit_skill(&student, "SQL", "Advanced", Some((original.as_str(), b"certified".as_slice())))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let skill: Value = response.json().await.unwrap();
    let stored = skill["evidence"].as_str().expect("evidence stored").to_string();
    assert!(stored.starts_with("my-cert-"));
    assert!(stored.ends_with(".txt"));

    let file = app.client
        .get(app.url(&format!("/uploads/{stored}")))
        .header("Cookie", &student.cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(file.status(), StatusCode::OK);
    assert_eq!(file.bytes().await.unwrap().as_ref(), b"certified");
}

#[actix_rt::test]
async fn disallowed_evidence_is_ignored() {
    let Some(app) = TestApp::spawn().await else { return };
    let student = app.create_user("student", None).await;

    let response = app
        .submit_skill(&student, "Bash", "Beginner", Some(("run.sh", b"echo hi".as_slice())))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let skill: Value = response.json().await.unwrap();
    assert!(skill["evidence"].is_null());
}

#[actix_rt::test]
async fn faculty_without_department_sees_nothing() {
    let Some(app) = TestApp::spawn().await else { return };
    let cs = app.department_id("Computer Science").await;
    let student = app.create_user("student", Some(cs)).await;
    app.submit_skill(&student, "Rust", "Beginner", None).await;

    let faculty = app.create_user("faculty", None).await;
    let submissions: Vec<Value> = app.client
        .get(app.url("/api/submissions"))
        .header("Cookie", &faculty.cookie)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(submissions.is_empty());
}

#[actix_rt::test]
async fn faculty_sees_only_their_department() {
    let Some(app) = TestApp::spawn().await else { return };
    let cs = app.department_id("Computer Science").await;
    let electronics = app.department_id("Electronics").await;
    let marker = Uuid::new_v4().to_string();

    let cs_student = app.create_user("student", Some(cs)).await;
    let other_student = app.create_user("student", Some(electronics)).await;
    app.submit_skill(&cs_student, &format!("cs-{marker}"), "Beginner", None).await;
    app.submit_skill(&other_student, &format!("ece-{marker}"), "Beginner", None).await;

    let faculty = app.create_user("faculty", Some(cs)).await;
    let submissions: Vec<Value> = app.client
        .get(app.url("/api/submissions"))
        .header("Cookie", &faculty.cookie)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let names: Vec<&str> = submissions.iter()
        .filter_map(|s| s["skillName"].as_str())
        .filter(|n| n.ends_with(&marker))
        .collect();
    assert_eq!(names, vec![format!("cs-{marker}").as_str()]);

    let own = submissions.iter()
        .find(|s| s["skillName"] == format!("cs-{marker}"))
        .unwrap();
    assert_eq!(own["studentEmail"], cs_student.email);
    assert!(own["validation_id"].as_i64().is_some());
}

#[actix_rt::test]
async fn status_update_decides_once() {
    let Some(app) = TestApp::spawn().await else { return };
    let student = app.create_user("student", None).await;
    let faculty = app.create_user("faculty", None).await;

    let skill: Value = app.submit_skill(&student, "Go", "Beginner", None).await.json().await.unwrap();
    let (validation_id, _, _) = app.validation_row(skill["id"].as_i64().unwrap()).await.unwrap();
    let status_url = app.url(&format!("/api/validation/{validation_id}/status"));

    let invalid = app.client
        .put(&status_url)
        .header("Cookie", &faculty.cookie)
        .json(&json!({ "status": "Approved" }))
        .send()
        .await
        .unwrap();
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    let (_, status, _) = app.validation_row(skill["id"].as_i64().unwrap()).await.unwrap();
    assert_eq!(status, "Pending");

    let decided = app.client
        .put(&status_url)
        .header("Cookie", &faculty.cookie)
        .json(&json!({ "status": "Validated" }))
        .send()
        .await
        .unwrap();
    assert_eq!(decided.status(), StatusCode::OK);
    let validation: Value = decided.json().await.unwrap();
    assert_eq!(validation["status"], "Validated");
    assert_eq!(validation["faculty_id"], faculty.id);

    let again = app.client
        .put(&status_url)
        .header("Cookie", &faculty.cookie)
        .json(&json!({ "status": "Rejected" }))
        .send()
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::CONFLICT);
    let (_, status, _) = app.validation_row(skill["id"].as_i64().unwrap()).await.unwrap();
    assert_eq!(status, "Validated");

    let missing = app.client
        .put(app.url("/api/validation/999999999/status"))
        .header("Cookie", &faculty.cookie)
        .json(&json!({ "status": "Validated" }))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn feedback_keeps_only_the_latest_text() {
    let Some(app) = TestApp::spawn().await else { return };
    let student = app.create_user("student", None).await;
    let faculty = app.create_user("faculty", None).await;

    let skill: Value = app.submit_skill(&student, "Python", "Expert", None).await.json().await.unwrap();
    let skill_id = skill["id"].as_i64().unwrap();
    let (validation_id, _, _) = app.validation_row(skill_id).await.unwrap();
    let feedback_url = app.url(&format!("/api/validation/{validation_id}/feedback"));

    for text in ["Needs a certificate", "Looks good now"] {
        let response = app.client
            .post(&feedback_url)
            .header("Cookie", &faculty.cookie)
            .json(&json!({ "feedback": text }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let (_, status, feedback) = app.validation_row(skill_id).await.unwrap();
    assert_eq!(status, "Pending");
    assert_eq!(feedback.as_deref(), Some("Looks good now"));

    let skills: Vec<Value> = app.client
        .get(app.url("/api/skills"))
        .header("Cookie", &student.cookie)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(skills.len(), 1);
    assert_eq!(skills[0]["feedback"], "Looks good now");
}

#[actix_rt::test]
async fn withdrawing_a_skill_removes_its_validation() {
    let Some(app) = TestApp::spawn().await else { return };
    let student = app.create_user("student", None).await;
    let other = app.create_user("student", None).await;

    let skill: Value = app.submit_skill(&student, "Haskell", "Beginner", None).await.json().await.unwrap();
    let skill_id = skill["id"].as_i64().unwrap();

    let foreign = app.client
        .delete(app.url(&format!("/api/skills/{skill_id}")))
        .header("Cookie", &other.cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(foreign.status(), StatusCode::NOT_FOUND);

    let own = app.client
        .delete(app.url(&format!("/api/skills/{skill_id}")))
        .header("Cookie", &student.cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(own.status(), StatusCode::NO_CONTENT);
    assert!(app.validation_row(skill_id).await.is_none());
}

#[actix_rt::test]
async fn logout_clears_the_session_cookie() {
    let Some(app) = TestApp::spawn().await else { return };
    let student = app.create_user("student", None).await;

    let response = app.client
        .post(app.url("/api/logout"))
        .header("Cookie", &student.cookie)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(session_cookie(&response).as_deref(), Some("skill_tracker_session="));
}
