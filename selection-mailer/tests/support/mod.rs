//! Shared helpers for integration tests

#![allow(dead_code)]

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use image::{DynamicImage, ImageFormat, RgbImage};
use selection_mailer::prelude::*;

/// Transport that records calls and either accepts or rejects every message
pub struct StubSender {
    name: &'static str,
    succeed: bool,
    calls: AtomicUsize,
    sent: Mutex<Vec<Email>>,
}

impl StubSender {
    pub fn succeeding(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            succeed: true,
            calls: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            succeed: false,
            calls: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<Email> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for StubSender {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn send(&self, email: &Email) -> Result<(), EmailError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.succeed {
            self.sent.lock().unwrap().push(email.clone());
            Ok(())
        } else {
            Err(EmailError::smtp(format!("{} unavailable", self.name)))
        }
    }
}

/// Test server with the given transports, in order
pub fn server_with(transports: &[Arc<StubSender>]) -> TestServer {
    server_with_config(AppConfig::default(), transports)
}

pub fn server_with_config(config: AppConfig, transports: &[Arc<StubSender>]) -> TestServer {
    let validator = SubmissionValidator::from_settings(&config.mail);
    let mut dispatcher = Dispatcher::new(config.mail.from_address.clone());
    for transport in transports {
        dispatcher.push(transport.clone());
    }

    let state = AppState::new(config, validator, dispatcher);
    TestServer::new(selection_mailer::handlers::router(state)).unwrap()
}

/// A small image encoded in `format`
pub fn image_bytes(format: ImageFormat) -> Vec<u8> {
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, image::Rgb([10, 120, 200])));
    let mut buffer = Vec::new();
    image.write_to(&mut Cursor::new(&mut buffer), format).unwrap();
    buffer
}

/// A PNG whose header is intact but whose pixel data is garbage
pub fn corrupt_png() -> Vec<u8> {
    let mut data = image_bytes(ImageFormat::Png)[..41].to_vec();
    data.extend_from_slice(&[0xAB; 64]);
    data
}

pub fn screenshot_part(data: Vec<u8>, file_name: &str, mime: &str) -> Part {
    Part::bytes(data).file_name(file_name).mime_type(mime)
}

/// Form with every text field filled in, without screenshot or recipients
pub fn text_fields() -> MultipartForm {
    MultipartForm::new()
        .add_text("name", "Grace Hopper")
        .add_text("education", "PhD Mathematics, Yale")
        .add_text("contact", "+1 202 555 0143")
        .add_text("address", "Arlington, Virginia")
        .add_text("project_idea", "A compiler that reads English")
}

/// A complete, valid form with two recipients
pub fn valid_form() -> MultipartForm {
    text_fields()
        .add_part(
            "screenshot",
            screenshot_part(image_bytes(ImageFormat::Png), "github.png", "image/png"),
        )
        .add_text("recipients", "reviewer@gmail.com")
        .add_text("recipients", "careers@accelx.net")
}
