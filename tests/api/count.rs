use anyhow::Result;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};
use wiremock::{
    matchers::{any, header, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::{TestApp, TEST_BASIC_AUTH, TEST_LIST_ID};

fn contactslist_path() -> String {
    format!("/contactslist/{TEST_LIST_ID}")
}

#[tokio::test]
async fn api_count_returns_the_subscriber_count() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(path(contactslist_path()))
        .and(method("GET"))
        .and(header("Authorization", TEST_BASIC_AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Count": 1,
            "Data": [{
                "Address": "xyz",
                "ID": 10234,
                "IsDeleted": false,
                "Name": "waitlist",
                "SubscriberCount": 1337,
            }],
            "Total": 1,
        })))
        .expect(1)
        .mount(&app.mailjet_server)
        .await;

    let res = app.get_count().await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(json!({"count": 1337}), body);

    Ok(())
}

#[tokio::test]
async fn api_count_returns_zero_when_count_is_absent() -> Result<()> {
    let vendor_bodies = [
        json!({"Count": 0, "Data": [], "Total": 0}),
        json!({"Count": 1, "Data": [{"Name": "waitlist"}], "Total": 1}),
    ];

    for vendor_body in vendor_bodies {
        let app = TestApp::spawn().await?;

        Mock::given(path(contactslist_path()))
            .respond_with(ResponseTemplate::new(200).set_body_json(vendor_body.clone()))
            .expect(1)
            .mount(&app.mailjet_server)
            .await;

        let res = app.get_count().await?;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = res.json().await?;
        assert_eq!(json!({"count": 0}), body, "for vendor body: {vendor_body}");
    }

    Ok(())
}

#[tokio::test]
async fn api_count_vendor_error_returns_400() -> Result<()> {
    let app = TestApp::spawn().await?;
    let payload = json!({
        "ErrorInfo": "",
        "ErrorMessage": "API key authentication/authorization failure.",
        "StatusCode": 401,
    });

    Mock::given(path(contactslist_path()))
        .respond_with(ResponseTemplate::new(401).set_body_json(payload.clone()))
        .expect(1)
        .mount(&app.mailjet_server)
        .await;

    let res = app.get_count().await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(Some(&payload), body.get("error"));

    Ok(())
}

#[tokio::test]
async fn api_count_vendor_unreachable_returns_500() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(30)))
        .mount(&app.mailjet_server)
        .await;

    let res = app.get_count().await?;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await?;
    assert!(body.get("error").is_some_and(Value::is_string));

    Ok(())
}

#[tokio::test]
async fn api_count_missing_secret_returns_500() -> Result<()> {
    let app = TestApp::spawn_with(|config| config.mailjet_config.list_id = None).await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.mailjet_server)
        .await;

    let res = app.get_count().await?;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await?;
    assert_eq!(Some(&json!("Missing environment variables")), body.get("error"));

    Ok(())
}

#[tokio::test]
async fn api_count_non_get_methods_return_405() -> Result<()> {
    let app = TestApp::spawn().await?;

    for method in [Method::POST, Method::PUT, Method::DELETE] {
        let res = app
            .http_client
            .request(method.clone(), app.url("/api/count"))
            .send()
            .await?;

        assert_eq!(
            res.status(),
            StatusCode::METHOD_NOT_ALLOWED,
            "for method: {method}"
        );
    }

    Ok(())
}
