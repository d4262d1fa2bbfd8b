//! End-to-end tests for `POST /send-selection-email/`

mod support;

use axum::http::StatusCode;
use axum_test::multipart::MultipartForm;
use image::ImageFormat;
use serde_json::{json, Value};
use selection_mailer::prelude::*;

use support::{corrupt_png, image_bytes, screenshot_part, server_with, server_with_config, text_fields, valid_form, StubSender};

const PATH: &str = "/send-selection-email/";

fn field_messages(body: &Value, field: &str) -> Vec<String> {
    body["message"][field]
        .as_array()
        .unwrap_or_else(|| panic!("no errors for {field} in {body}"))
        .iter()
        .map(|m| m.as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_valid_submission_is_sent_via_primary() {
    let smtp = StubSender::succeeding("SMTP");
    let ses = StubSender::succeeding("SES");
    let server = server_with(&[smtp.clone(), ses.clone()]);

    let response = server.post(PATH).multipart(valid_form()).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({"status": "success", "message": "Email sent to 2 recipients"})
    );
    assert_eq!(smtp.calls(), 1);
    assert_eq!(ses.calls(), 0);
}

#[tokio::test]
async fn test_sent_email_carries_fields_and_inline_screenshot() {
    let smtp = StubSender::succeeding("SMTP");
    let server = server_with(&[smtp.clone()]);

    server.post(PATH).multipart(valid_form()).await.assert_status_ok();

    let sent = smtp.sent();
    assert_eq!(sent.len(), 1);
    let email = &sent[0];

    assert_eq!(
        email.subject.as_deref(),
        Some("Python Backend Engineer Selection Task - Grace Hopper")
    );
    assert_eq!(email.to, vec!["reviewer@gmail.com", "careers@accelx.net"]);
    assert_eq!(email.from.as_deref(), Some("noreply@example.com"));

    let html = email.html.as_deref().unwrap();
    assert!(html.contains("Grace Hopper"));
    assert!(html.contains("A compiler that reads English"));
    assert!(html.contains("cid:github_screenshot"));
    assert!(email.text.as_deref().unwrap().contains("Arlington, Virginia"));

    assert_eq!(email.inline_images.len(), 1);
    assert_eq!(email.inline_images[0].content_id, "github_screenshot");
    assert_eq!(email.inline_images[0].content_type, "image/png");
    assert_eq!(email.inline_images[0].data.as_ref(), image_bytes(ImageFormat::Png).as_slice());
    assert_eq!(
        email.inline_images[0].filename.as_deref(),
        Some("github_profile_screenshot.png")
    );
}

#[tokio::test]
async fn test_fallback_used_when_primary_fails() {
    let smtp = StubSender::failing("SMTP");
    let ses = StubSender::succeeding("SES");
    let server = server_with(&[smtp.clone(), ses.clone()]);

    let response = server.post(PATH).multipart(valid_form()).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["message"], "Email sent to 2 recipients");
    assert_eq!(smtp.calls(), 1);
    assert_eq!(ses.calls(), 1);
}

#[tokio::test]
async fn test_all_providers_failing_is_500() {
    let smtp = StubSender::failing("SMTP");
    let ses = StubSender::failing("SES");
    let server = server_with(&[smtp, ses]);

    let response = server.post(PATH).multipart(valid_form()).await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({"status": "error", "message": "Failed to send email through all providers"})
    );
}

#[tokio::test]
async fn test_unconfigured_fallback_is_500_when_primary_fails() {
    let server = server_with(&[StubSender::failing("SMTP")]);

    let response = server.post(PATH).multipart(valid_form()).await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_missing_text_field_is_400() {
    let smtp = StubSender::succeeding("SMTP");
    let server = server_with(&[smtp.clone()]);

    let form = MultipartForm::new()
        .add_text("name", "Grace Hopper")
        .add_text("contact", "+1 202 555 0143")
        .add_text("address", "Arlington, Virginia")
        .add_text("project_idea", "A compiler")
        .add_part(
            "screenshot",
            screenshot_part(image_bytes(ImageFormat::Png), "a.png", "image/png"),
        )
        .add_text("recipients", "reviewer@gmail.com");

    let response = server.post(PATH).multipart(form).await;
    let body = response.json::<Value>();

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(field_messages(&body, "education"), vec!["This field is required."]);
    assert!(body["message"].get("name").is_none());
    assert_eq!(smtp.calls(), 0);
}

#[tokio::test]
async fn test_non_image_screenshot_is_400() {
    let server = server_with(&[StubSender::succeeding("SMTP")]);

    let form = text_fields()
        .add_part(
            "screenshot",
            screenshot_part(b"%PDF-1.4 not an image".to_vec(), "cv.png", "image/png"),
        )
        .add_text("recipients", "reviewer@gmail.com");

    let response = server.post(PATH).multipart(form).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        field_messages(&response.json::<Value>(), "screenshot"),
        vec!["Invalid image file."]
    );
}

#[tokio::test]
async fn test_png_with_corrupt_body_is_400() {
    let smtp = StubSender::succeeding("SMTP");
    let server = server_with(&[smtp.clone()]);

    let form = text_fields()
        .add_part("screenshot", screenshot_part(corrupt_png(), "shot.png", "image/png"))
        .add_text("recipients", "reviewer@gmail.com");

    let response = server.post(PATH).multipart(form).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        field_messages(&response.json::<Value>(), "screenshot"),
        vec!["Invalid image file."]
    );
    assert_eq!(smtp.calls(), 0);
}

#[tokio::test]
async fn test_gif_screenshot_is_rejected_by_format() {
    let server = server_with(&[StubSender::succeeding("SMTP")]);

    let form = text_fields()
        .add_part(
            "screenshot",
            screenshot_part(image_bytes(ImageFormat::Gif), "anim.png", "image/png"),
        )
        .add_text("recipients", "reviewer@gmail.com");

    let response = server.post(PATH).multipart(form).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        field_messages(&response.json::<Value>(), "screenshot"),
        vec!["Only JPG and PNG files are allowed."]
    );
}

#[tokio::test]
async fn test_oversized_screenshot_is_400() {
    let server = server_with(&[StubSender::succeeding("SMTP")]);

    let mut data = image_bytes(ImageFormat::Jpeg);
    data.resize(6 * 1024 * 1024, 0);

    let form = text_fields()
        .add_part("screenshot", screenshot_part(data, "big.jpg", "image/jpeg"))
        .add_text("recipients", "reviewer@gmail.com");

    let response = server.post(PATH).multipart(form).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        field_messages(&response.json::<Value>(), "screenshot"),
        vec!["Image size should not exceed 5MB."]
    );
}

#[tokio::test]
async fn test_jpeg_screenshot_is_accepted() {
    let smtp = StubSender::succeeding("SMTP");
    let server = server_with(&[smtp.clone()]);

    let form = text_fields()
        .add_part(
            "screenshot",
            screenshot_part(image_bytes(ImageFormat::Jpeg), "shot.jpg", "image/jpeg"),
        )
        .add_text("recipients", "reviewer@yahoo.com");

    let response = server.post(PATH).multipart(form).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["message"], "Email sent to 1 recipients");
    let sent = smtp.sent();
    assert_eq!(sent[0].inline_images[0].content_type, "image/jpeg");
    assert_eq!(
        sent[0].inline_images[0].filename.as_deref(),
        Some("github_profile_screenshot.jpg")
    );
}

#[tokio::test]
async fn test_disallowed_recipients_are_named() {
    let smtp = StubSender::succeeding("SMTP");
    let server = server_with(&[smtp.clone()]);

    let form = text_fields()
        .add_part(
            "screenshot",
            screenshot_part(image_bytes(ImageFormat::Png), "a.png", "image/png"),
        )
        .add_text("recipients", "reviewer@gmail.com")
        .add_text("recipients", "cto@startup.io")
        .add_text("recipients", "hr@accelx.net");

    let response = server.post(PATH).multipart(form).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let messages = field_messages(&response.json::<Value>(), "recipients");
    assert_eq!(messages.len(), 1);
    assert!(messages[0].ends_with("Invalid emails: cto@startup.io, hr@accelx.net"));
    assert!(!messages[0].contains("reviewer@gmail.com"));
    assert_eq!(smtp.calls(), 0);
}

#[tokio::test]
async fn test_missing_recipients_is_400() {
    let server = server_with(&[StubSender::succeeding("SMTP")]);

    let form = text_fields().add_part(
        "screenshot",
        screenshot_part(image_bytes(ImageFormat::Png), "a.png", "image/png"),
    );

    let response = server.post(PATH).multipart(form).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        field_messages(&response.json::<Value>(), "recipients"),
        vec!["At least one recipient is required."]
    );
}

#[tokio::test]
async fn test_recipients_as_json_list() {
    let smtp = StubSender::succeeding("SMTP");
    let server = server_with(&[smtp.clone()]);

    let form = text_fields()
        .add_part(
            "screenshot",
            screenshot_part(image_bytes(ImageFormat::Png), "a.png", "image/png"),
        )
        .add_text("recipients", r#"["a@gmail.com", "b@hotmail.com", "careers@accelx.net"]"#);

    let response = server.post(PATH).multipart(form).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["message"], "Email sent to 3 recipients");
    assert_eq!(smtp.sent()[0].to.len(), 3);
}

#[tokio::test]
async fn test_every_invalid_field_reported_at_once() {
    let server = server_with(&[StubSender::succeeding("SMTP")]);

    let response = server
        .post(PATH)
        .multipart(MultipartForm::new().add_text("name", "   "))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body = response.json::<Value>();
    assert_eq!(field_messages(&body, "name"), vec!["This field may not be blank."]);
    for field in ["education", "contact", "address", "project_idea", "screenshot", "recipients"] {
        assert!(body["message"].get(field).is_some(), "{field} missing from {body}");
    }
}

#[tokio::test]
async fn test_non_multipart_body_is_400() {
    let server = server_with(&[StubSender::succeeding("SMTP")]);

    let response = server
        .post(PATH)
        .json(&json!({"name": "Grace Hopper"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["status"], "error");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_configured_allow_list_is_used() {
    let mut config = AppConfig::default();
    config.mail.allowed_domains = vec!["example.org".to_string()];
    config.mail.allowed_special_emails = vec![];

    let smtp = StubSender::succeeding("SMTP");
    let server = server_with_config(config, &[smtp.clone()]);

    let form = text_fields()
        .add_part(
            "screenshot",
            screenshot_part(image_bytes(ImageFormat::Png), "a.png", "image/png"),
        )
        .add_text("recipients", "team@example.org");

    let response = server.post(PATH).multipart(form).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(smtp.calls(), 1);
}

#[tokio::test]
async fn test_health() {
    let server = server_with(&[]);

    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({"status": "ok", "version": env!("CARGO_PKG_VERSION")})
    );
}
