use anyhow::Result;
use reqwest::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn home_serves_the_waitlist_form() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app.http_client.get(app.url("/")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let content_type = res
        .headers()
        .get("content-type")
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"), "got: {content_type}");

    let body = res.text().await?;
    assert!(body.contains(r#"id="waitlist-form""#));
    assert!(body.contains(r#"data-subscribe-endpoint="&#x2F;api&#x2F;subscribe""#));

    Ok(())
}

#[tokio::test]
async fn home_renders_without_mailjet_secrets() -> Result<()> {
    let app = TestApp::spawn_with(|config| config.mailjet_config.api_key = None).await?;

    let res = app.http_client.get(app.url("/")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    Ok(())
}
