//! 后台 API 集成测试：认证、CRUD、收件箱、统计

mod common;

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use serde_json::{Value, json};

use common::{TEST_PASSWORD, admin, api, peer, product_input, read_json, temp_storage};
use handline::api::constants::{ACCESS_COOKIE_NAME, REFRESH_COOKIE_NAME};
use handline::api::jwt::get_jwt_service;

fn bearer() -> (&'static str, String) {
    let token = get_jwt_service()
        .generate_access_token()
        .expect("generate access token");
    ("Authorization", format!("Bearer {}", token))
}

#[actix_rt::test]
async fn test_requests_without_token_are_rejected() {
    let env = temp_storage().await;
    let app = init_app!(env);

    let req = TestRequest::get().uri(&admin("/products")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(read_json(resp).await["code"], 1001);

    let req = TestRequest::get()
        .uri(&admin("/products"))
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_preflight_bypasses_auth() {
    let env = temp_storage().await;
    let app = init_app!(env);

    let req = TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri(&admin("/products"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[actix_rt::test]
async fn test_login_sets_cookies_and_verify_accepts_them() {
    let env = temp_storage().await;
    let app = init_app!(env);

    let req = TestRequest::post()
        .uri(&admin("/auth/login"))
        .peer_addr(peer())
        .set_json(json!({ "password": "wrong" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(read_json(resp).await["code"], 2000);

    let req = TestRequest::post()
        .uri(&admin("/auth/login"))
        .peer_addr(peer())
        .set_json(json!({ "password": TEST_PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookies: Vec<Cookie<'static>> = resp
        .response()
        .cookies()
        .map(|c| c.into_owned())
        .collect();
    let access = cookies
        .iter()
        .find(|c| c.name() == ACCESS_COOKIE_NAME)
        .expect("access cookie")
        .clone();
    let refresh = cookies
        .iter()
        .find(|c| c.name() == REFRESH_COOKIE_NAME)
        .expect("refresh cookie")
        .clone();
    assert!(access.http_only().unwrap_or(false));
    assert!(refresh.path().unwrap_or_default().ends_with("/v1/auth"));

    let body = read_json(resp).await;
    assert_eq!(body["data"]["expires_in"], 15 * 60);

    let req = TestRequest::get()
        .uri(&admin("/auth/verify"))
        .cookie(access)
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["method"], "cookie");

    let req = TestRequest::post()
        .uri(&admin("/auth/refresh"))
        .peer_addr(peer())
        .cookie(refresh)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_refresh_rejects_access_token() {
    let env = temp_storage().await;
    let app = init_app!(env);
    let access = get_jwt_service().generate_access_token().unwrap();

    let req = TestRequest::post()
        .uri(&admin("/auth/refresh"))
        .peer_addr(peer())
        .cookie(Cookie::new(REFRESH_COOKIE_NAME, access))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(read_json(resp).await["code"], 2002);
}

#[actix_rt::test]
async fn test_logout_clears_cookies() {
    let env = temp_storage().await;
    let app = init_app!(env);

    let req = TestRequest::post().uri(&admin("/auth/logout")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cleared: Vec<_> = resp
        .response()
        .cookies()
        .filter(|c| c.value().is_empty())
        .map(|c| c.name().to_string())
        .collect();
    assert!(cleared.contains(&ACCESS_COOKIE_NAME.to_string()));
    assert!(cleared.contains(&REFRESH_COOKIE_NAME.to_string()));
}

#[actix_rt::test]
async fn test_product_crud() {
    let env = temp_storage().await;
    let app = init_app!(env);

    let req = TestRequest::post()
        .uri(&admin("/products"))
        .insert_header(bearer())
        .set_json(product_input("Cut Master 5", "cut"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = read_json(resp).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(created["data"]["slug"], "cut-master-5");

    // 同名产品 → slug 冲突
    let req = TestRequest::post()
        .uri(&admin("/products"))
        .insert_header(bearer())
        .set_json(product_input("Cut Master 5", "cut"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(read_json(resp).await["code"], 3001);

    let mut update = serde_json::to_value(product_input("Cut Master 5", "cut")).unwrap();
    update["published"] = Value::Bool(false);
    let req = TestRequest::put()
        .uri(&admin(&format!("/products/{}", id)))
        .insert_header(bearer())
        .set_json(&update)
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["published"], false);

    // 未发布产品不在公开接口中
    let req = TestRequest::get()
        .uri(&api("/products/cut-master-5"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = TestRequest::get()
        .uri(&admin("/products?search=master"))
        .insert_header(bearer())
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["pagination"]["total"], 1);

    let req = TestRequest::get()
        .uri(&admin("/products/export"))
        .insert_header(bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let csv = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(csv.starts_with("id,slug,name"));
    assert!(csv.contains("cut-master-5"));

    let req = TestRequest::delete()
        .uri(&admin(&format!("/products/{}", id)))
        .insert_header(bearer())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = TestRequest::get()
        .uri(&admin(&format!("/products/{}", id)))
        .insert_header(bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(resp).await["code"], 3000);
}

#[actix_rt::test]
async fn test_post_crud_per_kind() {
    let env = temp_storage().await;
    let app = init_app!(env);

    let req = TestRequest::post()
        .uri(&admin("/posts/careers"))
        .insert_header(bearer())
        .set_json(json!({
            "title": { "en": "Warehouse Operator", "it": "Operatore di magazzino" },
            "department": "Logistics",
            "author": "ignored for careers",
            "requirements": { "en": ["Forklift licence"], "it": [] },
            "published": true
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = read_json(resp).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["kind"], "career");
    assert_eq!(body["data"]["details"]["department"], "Logistics");
    assert!(body["data"]["details"].get("author").is_none());
    assert!(body["data"]["published_at"].is_string());

    let req = TestRequest::get()
        .uri(&admin(&format!("/posts/careers/{}", id)))
        .insert_header(bearer())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    // 错误的 kind 找不到
    let req = TestRequest::get()
        .uri(&admin(&format!("/posts/blog/{}", id)))
        .insert_header(bearer())
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = TestRequest::get()
        .uri(&admin("/posts/news"))
        .insert_header(bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(resp).await["code"], 4002);

    let req = TestRequest::delete()
        .uri(&admin(&format!("/posts/careers/{}", id)))
        .insert_header(bearer())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_ppe_category_with_sections() {
    let env = temp_storage().await;
    let app = init_app!(env);

    let req = TestRequest::post()
        .uri(&admin("/ppe/categories"))
        .insert_header(bearer())
        .set_json(json!({ "title": { "en": "Eye protection", "it": "Protezione occhi" } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let id = read_json(resp).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let req = TestRequest::post()
        .uri(&admin(&format!("/ppe/categories/{}/sections", id)))
        .insert_header(bearer())
        .set_json(json!({ "title": { "en": "Standards", "it": "" }, "sort_order": 2 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = TestRequest::get()
        .uri(&admin(&format!("/ppe/categories/{}", id)))
        .insert_header(bearer())
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["slug"], "eye-protection");
    assert_eq!(body["data"]["sections"][0]["title"], "Standards");

    let req = TestRequest::post()
        .uri(&admin("/ppe/categories/does-not-exist/sections"))
        .insert_header(bearer())
        .set_json(json!({ "title": { "en": "Orphan", "it": "" } }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = TestRequest::delete()
        .uri(&admin(&format!("/ppe/categories/{}", id)))
        .insert_header(bearer())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_brand_validation() {
    let env = temp_storage().await;
    let app = init_app!(env);

    let req = TestRequest::post()
        .uri(&admin("/brands"))
        .insert_header(bearer())
        .set_json(json!({ "name": "  " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(resp).await["code"], 4003);
}

#[actix_rt::test]
async fn test_inbox_workflow_and_stats() {
    let env = temp_storage().await;
    let app = init_app!(env);

    let req = TestRequest::post()
        .uri(&api("/contact"))
        .peer_addr(peer())
        .set_json(json!({
            "name": "Sara",
            "email": "sara@example.com",
            "subject": "Quote",
            "body": "Price for 500 pairs?"
        }))
        .to_request();
    let id = read_json(test::call_service(&app, req).await).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let req = TestRequest::get()
        .uri(&admin("/messages?unread_only=true"))
        .insert_header(bearer())
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["data"][0]["subject"], "Quote");

    let req = TestRequest::put()
        .uri(&admin(&format!("/messages/{}/read", id)))
        .insert_header(bearer())
        .set_json(json!({ "read": true }))
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["read"], true);

    let req = TestRequest::get()
        .uri(&admin("/stats"))
        .insert_header(bearer())
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["messages"], 1);
    assert_eq!(body["data"]["unread_messages"], 0);

    let req = TestRequest::delete()
        .uri(&admin(&format!("/messages/{}", id)))
        .insert_header(bearer())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = TestRequest::get()
        .uri(&admin(&format!("/messages/{}", id)))
        .insert_header(bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(resp).await["code"], 5000);
}
