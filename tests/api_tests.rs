// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use chrono::NaiveDate;
use common::{MockServer, dec, session, ts};
use pennywise::api::ApiClient;
use pennywise::config::Config;
use pennywise::error::ApiError;
use pennywise::models::{
    Category, Credentials, Expense, ExpenseDraft, Goal, Income, IncomeSource, ProfileUpdate,
};

#[test]
fn login_returns_session_and_posts_credentials() {
    let server = MockServer::start(vec![(
        200,
        r#"{"_id":"u1","name":"Asha","email":"asha@example.com","token":"tok-abc"}"#,
    )]);
    let mut api = server.client(None);
    let creds = Credentials::new("asha@example.com", "secret").unwrap();
    let s = api.login(&creds).unwrap();
    assert_eq!(s.token, "tok-abc");
    assert_eq!(s.user.id, "u1");
    assert_eq!(api.session(), Some(&s));

    let reqs = server.finish();
    assert_eq!(reqs[0].method, "POST");
    assert_eq!(reqs[0].path, "/auth/login");
    assert_eq!(reqs[0].header("authorization"), None);
    assert_eq!(reqs[0].json()["email"], "asha@example.com");
}

#[test]
fn failed_login_reports_server_message() {
    let server = MockServer::start(vec![(401, r#"{"message":"Invalid credentials"}"#)]);
    let mut api = server.client(None);
    let creds = Credentials::new("asha@example.com", "wrong").unwrap();
    match api.login(&creds) {
        Err(ApiError::Status { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("unexpected {:?}", other.map(|s| s.token)),
    }
    assert!(api.session().is_none());
    server.finish();
}

#[test]
fn list_sends_bearer_and_parses_records() {
    let server = MockServer::start(vec![(
        200,
        r#"[
            {"_id":"i1","description":"Pay","amount":2500,"date":"2024-03-01T00:00:00.000Z","source":"Salary","user":"u1"},
            {"_id":"i2","description":"Gig","amount":"300.5","date":"2024-03-05","source":"Freelance"}
        ]"#,
    )]);
    let api = server.client(Some(session()));
    let incomes = api.list::<Income>().unwrap();
    assert_eq!(incomes.len(), 2);
    assert_eq!(incomes[0].amount, dec("2500"));
    assert_eq!(incomes[1].source, IncomeSource::Freelance);
    assert_eq!(incomes[1].date, ts("2024-03-05"));

    let reqs = server.finish();
    assert_eq!(reqs[0].method, "GET");
    assert_eq!(reqs[0].path, "/incomes");
    assert_eq!(reqs[0].header("authorization"), Some("Bearer tok-123"));
}

#[test]
fn resource_calls_need_a_session() {
    let api = ApiClient::new(&Config::default(), None).unwrap();
    assert!(matches!(api.list::<Goal>(), Err(ApiError::NotAuthenticated)));
    assert!(matches!(api.delete::<Goal>("g1"), Err(ApiError::NotAuthenticated)));
}

#[test]
fn rejected_token_is_unauthorized() {
    let server = MockServer::start(vec![(401, r#"{"message":"Token expired"}"#)]);
    let api = server.client(Some(session()));
    assert!(matches!(api.list::<Expense>(), Err(ApiError::Unauthorized)));
    server.finish();
}

#[test]
fn malformed_record_fails_validation() {
    let server = MockServer::start(vec![(
        200,
        r#"[{"_id":"e7","description":"Taxi","amount":"twelve","date":"2024-03-01","category":"Transport"}]"#,
    )]);
    let api = server.client(Some(session()));
    match api.list::<Expense>() {
        Err(ApiError::Validation(v)) => {
            assert_eq!(v.field, "amount");
            assert_eq!(v.record, "e7");
        }
        other => panic!("unexpected {:?}", other.map(|v| v.len())),
    }
    server.finish();
}

#[test]
fn non_json_body_is_a_decode_error() {
    let server = MockServer::start(vec![(200, "<html>maintenance</html>")]);
    let api = server.client(Some(session()));
    assert!(matches!(api.list::<Goal>(), Err(ApiError::Decode { .. })));
    server.finish();
}

#[test]
fn create_posts_draft_and_returns_record() {
    let server = MockServer::start(vec![(
        201,
        r#"{"_id":"e1","description":"Groceries","amount":42.1,"date":"2024-03-09T00:00:00.000Z","category":"Food"}"#,
    )]);
    let api = server.client(Some(session()));
    let draft = ExpenseDraft::new(
        "Groceries",
        dec("42.10"),
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        Category::Food,
    )
    .unwrap();
    let created = api.create::<Expense>(&draft).unwrap();
    assert_eq!(created.id, "e1");
    assert_eq!(created.amount, dec("42.1"));

    let reqs = server.finish();
    assert_eq!(reqs[0].method, "POST");
    assert_eq!(reqs[0].path, "/expenses");
    let body = reqs[0].json();
    assert_eq!(body["amount"], 42.1);
    assert_eq!(body["date"], "2024-03-09");
    assert_eq!(body["category"], "Food");
}

#[test]
fn update_and_delete_address_the_record() {
    let server = MockServer::start(vec![
        (
            200,
            r#"{"_id":"e1","description":"Groceries","amount":50,"date":"2024-03-09","category":"Food"}"#,
        ),
        (200, r#"{"message":"Expense removed"}"#),
    ]);
    let api = server.client(Some(session()));
    let draft = ExpenseDraft::new(
        "Groceries",
        dec("50"),
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        Category::Food,
    )
    .unwrap();
    let updated = api.update::<Expense>("e1", &draft).unwrap();
    assert_eq!(updated.amount, dec("50"));
    api.delete::<Expense>("e1").unwrap();

    let reqs = server.finish();
    assert_eq!((reqs[0].method.as_str(), reqs[0].path.as_str()), ("PUT", "/expenses/e1"));
    assert_eq!((reqs[1].method.as_str(), reqs[1].path.as_str()), ("DELETE", "/expenses/e1"));
}

#[test]
fn profile_update_keeps_existing_token() {
    let server = MockServer::start(vec![(
        200,
        r#"{"_id":"u1","name":"Asha R","email":"asha@example.com"}"#,
    )]);
    let mut api = server.client(Some(session()));
    let update = ProfileUpdate::new(Some("Asha R"), None, None).unwrap();
    let s = api.update_profile(&update).unwrap();
    assert_eq!(s.token, "tok-123");
    assert_eq!(s.user.name, "Asha R");

    let reqs = server.finish();
    assert_eq!(reqs[0].method, "PUT");
    assert_eq!(reqs[0].path, "/users/profile");
    assert_eq!(reqs[0].header("authorization"), Some("Bearer tok-123"));
}

#[test]
fn logout_drops_the_session() {
    let mut api = ApiClient::new(&Config::default(), Some(session())).unwrap();
    assert_eq!(api.logout().map(|s| s.token), Some("tok-123".to_string()));
    assert!(api.session().is_none());
}
