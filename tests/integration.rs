// SPDX-License-Identifier: MPL-2.0
use image_rs::{Rgba, RgbaImage};
use snapbooth::app::command::{self, ComposeArgs, Source};
use snapbooth::app::{Command, Outcome, Session};
use snapbooth::application::port::BoothApi;
use snapbooth::config::{self, CompositeMode, Config, OUTPUT_HEIGHT, OUTPUT_WIDTH};
use snapbooth::domain::compositing::OverlayBox;
use snapbooth::infrastructure::http::{
    ApiError, Asset, Comment, GalleryItem, GalleryPage, UserImage,
};
use snapbooth::infrastructure::{NoCamera, StillCamera};
use snapbooth::media::capture::ComposeUpload;
use snapbooth::media::{decode_rgba, encode_png};
use snapbooth::ui::editor::{EditorSettings, StageMessage};
use std::cell::RefCell;
use tempfile::tempdir;

const HAT_ID: u64 = 4;

/// In-memory booth server.
struct FakeBooth {
    assets: Vec<Asset>,
    overlay_png: Vec<u8>,
    gallery: GalleryPage,
    reject_session: bool,
    uploads: RefCell<Vec<ComposeUpload>>,
    likes: RefCell<Vec<u64>>,
    comments: RefCell<Vec<(u64, String)>>,
}

impl FakeBooth {
    fn new() -> Self {
        let overlay = RgbaImage::from_pixel(400, 200, Rgba([255, 0, 0, 255]));
        Self {
            assets: vec![Asset {
                id: HAT_ID,
                name: "Hat".into(),
                path: "/assets/hat.png".into(),
            }],
            overlay_png: encode_png(&overlay).expect("encode overlay"),
            gallery: GalleryPage {
                items: vec![gallery_item(10, false), gallery_item(11, true)],
                has_more: true,
            },
            reject_session: false,
            uploads: RefCell::new(Vec::new()),
            likes: RefCell::new(Vec::new()),
            comments: RefCell::new(Vec::new()),
        }
    }

    fn rejecting_session() -> Self {
        Self {
            reject_session: true,
            ..Self::new()
        }
    }

    fn check_session(&self) -> Result<(), ApiError> {
        if self.reject_session {
            Err(ApiError::AuthRequired)
        } else {
            Ok(())
        }
    }
}

fn gallery_item(id: u64, liked: bool) -> GalleryItem {
    GalleryItem {
        id,
        path: format!("/uploads/{id}.png"),
        author: "mia".into(),
        created_at: None,
        likes: 2,
        liked,
        comments: vec![Comment {
            author: "leo".into(),
            body: "great".into(),
            created_at: None,
        }],
    }
}

impl BoothApi for FakeBooth {
    async fn list_assets(&self) -> Result<Vec<Asset>, ApiError> {
        Ok(self.assets.clone())
    }

    async fn fetch_bytes(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        match path {
            "/assets/hat.png" => Ok(self.overlay_png.clone()),
            _ => Err(ApiError::Server(format!("no file at {path}"))),
        }
    }

    async fn compose(&self, upload: &ComposeUpload) -> Result<String, ApiError> {
        self.check_session()?;
        self.uploads.borrow_mut().push(upload.clone());
        Ok(format!("/uploads/{}.png", self.uploads.borrow().len()))
    }

    async fn user_images(&self) -> Result<Vec<UserImage>, ApiError> {
        self.check_session()?;
        Ok(vec![UserImage {
            id: 1,
            path: "/uploads/old.png".into(),
        }])
    }

    async fn gallery_page(&self, _page: u32) -> Result<GalleryPage, ApiError> {
        Ok(self.gallery.clone())
    }

    async fn like(&self, image_id: u64) -> Result<(), ApiError> {
        self.check_session()?;
        self.likes.borrow_mut().push(image_id);
        Ok(())
    }

    async fn comment(&self, image_id: u64, body: &str) -> Result<(), ApiError> {
        self.check_session()?;
        self.comments.borrow_mut().push((image_id, body.to_string()));
        Ok(())
    }

    async fn upload_asset(
        &self,
        _name: Option<&str>,
        _file_name: &str,
        _mime_type: &str,
        _bytes: Vec<u8>,
    ) -> Result<String, ApiError> {
        Ok("Asset uploaded".into())
    }

    fn base_url(&self) -> &str {
        "http://booth.test"
    }
}

fn settings(mode: CompositeMode) -> EditorSettings {
    let mut config = Config::default();
    config.capture.mode = Some(mode);
    config.capture.retry_ms = Some(1);
    config.capture.max_retries = Some(5);
    EditorSettings::from_config(&config)
}

fn portrait() -> RgbaImage {
    RgbaImage::from_pixel(640, 480, Rgba([20, 120, 40, 255]))
}

#[test]
fn config_round_trips_through_settings_file() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let mut original = Config::default();
    original.server.base_url = Some("http://booth.test".into());
    original.editor.zoom_step = Some(25.0);
    original.capture.mode = Some(CompositeMode::Client);
    config::save_to_path(&original, &path).expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("Failed to load config file");
    assert_eq!(loaded, original);

    let (fallback, warning) = config::load_with_override(Some(dir.path().join("missing")));
    assert_eq!(fallback, Config::default());
    assert!(warning.is_none());
}

#[tokio::test]
async fn webcam_capture_is_uploaded_with_overlay_box() {
    let camera = StillCamera::new(portrait());
    let booth = FakeBooth::new();
    let mut session = Session::new(settings(CompositeMode::Server), camera.clone(), &booth);

    session.start().await.expect("start");
    assert_eq!(session.editor().thumbnails(), ["/uploads/old.png"]);

    session.open_webcam().await.expect("open webcam");
    assert_eq!(camera.open_streams(), 1);
    session.select_asset(HAT_ID).await.expect("select");

    let outcome = session.capture().await.expect("capture");
    assert_eq!(
        outcome,
        Outcome::Uploaded {
            path: "/uploads/1.png".into()
        }
    );

    let uploads = booth.uploads.borrow();
    let upload = &uploads[0];
    assert_eq!(upload.asset_id, HAT_ID);
    assert_eq!(
        upload.overlay,
        OverlayBox {
            x: 405,
            y: 293,
            w: 270,
            h: 135
        }
    );
    let base = decode_rgba(&upload.png).expect("decode base");
    assert_eq!(base.dimensions(), (OUTPUT_WIDTH, OUTPUT_HEIGHT));
    assert_eq!(
        session.editor().thumbnails(),
        ["/uploads/1.png", "/uploads/old.png"]
    );

    drop(session);
    assert_eq!(camera.open_streams(), 0, "camera released on drop");
}

#[tokio::test]
async fn capture_waits_for_webcam_frames() {
    let camera = StillCamera::new(portrait()).with_warmup(3);
    let booth = FakeBooth::new();
    let mut session = Session::new(settings(CompositeMode::Server), camera, &booth);

    session.start().await.expect("start");
    session.open_webcam().await.expect("open webcam");
    session.select_asset(HAT_ID).await.expect("select");

    let outcome = session.capture().await.expect("capture");
    assert!(matches!(outcome, Outcome::Uploaded { .. }));
    assert_eq!(booth.uploads.borrow().len(), 1);
}

#[tokio::test]
async fn dragged_overlay_moves_the_uploaded_box() {
    let booth = FakeBooth::new();
    let mut session = Session::new(
        settings(CompositeMode::Server),
        StillCamera::new(portrait()),
        &booth,
    );
    session.start().await.expect("start");
    session.open_webcam().await.expect("open webcam");
    session.select_asset(HAT_ID).await.expect("select");

    // Press inside the overlay, then move: only the overlay follows.
    for message in [
        StageMessage::PointerPressed { x: 500.0, y: 350.0 },
        StageMessage::PointerMoved { x: 520.0, y: 340.0 },
        StageMessage::PointerReleased,
    ] {
        session.dispatch(message).await.expect("gesture");
    }
    session.capture().await.expect("capture");

    let uploads = booth.uploads.borrow();
    assert_eq!(uploads[0].overlay.x, 425);
    assert_eq!(uploads[0].overlay.y, 283);
}

#[tokio::test]
async fn expired_session_stops_the_driver() {
    let booth = FakeBooth::rejecting_session();
    let mut session = Session::new(
        settings(CompositeMode::Server),
        StillCamera::new(portrait()),
        &booth,
    );

    let err = session.start().await.expect_err("previous images need a session");
    assert!(err.is_auth_required());
    assert!(session.editor().auth_required());
}

#[tokio::test]
async fn missing_webcam_falls_back_to_uploads() {
    let booth = FakeBooth::new();
    let mut session = Session::new(settings(CompositeMode::Server), NoCamera, &booth);
    session.start().await.expect("start");
    session.open_webcam().await.expect("open webcam");

    assert!(session.editor().fallback_message().is_some());
    assert_eq!(session.capture().await.expect("capture"), Outcome::Idle);
    assert!(booth.uploads.borrow().is_empty());
}

#[tokio::test]
async fn client_compose_writes_a_composited_png() {
    let dir = tempdir().expect("tempdir");
    let source = dir.path().join("me.png");
    let output = dir.path().join("out.png");
    std::fs::write(&source, encode_png(&portrait()).expect("encode")).expect("write source");

    let booth = FakeBooth::new();
    let mut out = Vec::new();
    command::execute(
        Command::Compose(ComposeArgs {
            source: Source::Image(source),
            asset_id: HAT_ID,
            script: None,
            client: true,
            output: Some(output.clone()),
        }),
        settings(CompositeMode::Server),
        &booth,
        &mut out,
    )
    .await
    .expect("compose");

    assert!(booth.uploads.borrow().is_empty(), "client mode never uploads");
    let written = decode_rgba(&std::fs::read(&output).expect("read output")).expect("decode");
    assert_eq!(written.dimensions(), (OUTPUT_WIDTH, OUTPUT_HEIGHT));
    // Overlay centre is red.
    let centre = written.get_pixel(540, 360);
    assert!(centre[0] > 250 && centre[1] < 5, "got {centre:?}");
    let report = String::from_utf8(out).expect("utf8");
    assert!(report.contains("Wrote"));
}

#[tokio::test]
async fn compose_with_unknown_asset_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let source = dir.path().join("me.png");
    std::fs::write(&source, encode_png(&portrait()).expect("encode")).expect("write source");

    let booth = FakeBooth::new();
    let mut out = Vec::new();
    let err = command::execute(
        Command::Compose(ComposeArgs {
            source: Source::Image(source),
            asset_id: 99,
            script: None,
            client: false,
            output: None,
        }),
        settings(CompositeMode::Server),
        &booth,
        &mut out,
    )
    .await
    .expect_err("no asset selected");

    assert_eq!(err.to_string(), "Please select a superposable image first");
}

#[tokio::test]
async fn gallery_lists_items_and_next_page() {
    let booth = FakeBooth::new();
    let mut out = Vec::new();
    command::execute(
        Command::Gallery { page: 1 },
        EditorSettings::default(),
        &booth,
        &mut out,
    )
    .await
    .expect("gallery");

    let report = String::from_utf8(out).expect("utf8");
    assert!(report.contains("#10 by mia (2 likes) /uploads/10.png"));
    assert!(report.contains("#11 by mia (2 likes, liked)"));
    assert!(report.contains("    leo: great"));
    assert!(report.contains("More on page 2."));
}

#[tokio::test]
async fn like_and_comment_reach_the_server_once() {
    let booth = FakeBooth::new();
    let mut out = Vec::new();

    command::execute(
        Command::Like {
            image_id: 10,
            page: 1,
        },
        EditorSettings::default(),
        &booth,
        &mut out,
    )
    .await
    .expect("like");
    command::execute(
        Command::Like {
            image_id: 11,
            page: 1,
        },
        EditorSettings::default(),
        &booth,
        &mut out,
    )
    .await
    .expect("already liked");
    command::execute(
        Command::Comment {
            image_id: 10,
            body: "  lovely  ".into(),
            page: 1,
        },
        EditorSettings::default(),
        &booth,
        &mut out,
    )
    .await
    .expect("comment");

    assert_eq!(*booth.likes.borrow(), [10]);
    assert_eq!(*booth.comments.borrow(), [(10, "lovely".to_string())]);
    let report = String::from_utf8(out).expect("utf8");
    assert!(report.contains("Liked #10 (3 likes)."));
    assert!(report.contains("Already liked #11."));
}

#[tokio::test]
async fn asset_upload_reports_and_relists() {
    let dir = tempdir().expect("tempdir");
    let file = dir.path().join("crown.png");
    std::fs::write(&file, encode_png(&portrait()).expect("encode")).expect("write asset");

    let booth = FakeBooth::new();
    let mut out = Vec::new();
    command::execute(
        Command::UploadAsset {
            file,
            name: Some("Crown".into()),
        },
        EditorSettings::default(),
        &booth,
        &mut out,
    )
    .await
    .expect("upload asset");

    let report = String::from_utf8(out).expect("utf8");
    assert!(report.starts_with("Asset uploaded\n"));
    assert!(report.contains("4\tHat\t/assets/hat.png"));
}

#[tokio::test]
async fn asset_upload_rejects_bad_file_names_locally() {
    let dir = tempdir().expect("tempdir");
    let file = dir.path().join("my crown.png");
    std::fs::write(&file, encode_png(&portrait()).expect("encode")).expect("write asset");

    let booth = FakeBooth::new();
    let mut out = Vec::new();
    let err = command::execute(
        Command::UploadAsset { file, name: None },
        EditorSettings::default(),
        &booth,
        &mut out,
    )
    .await
    .expect_err("space in file name");

    assert_eq!(err.to_string(), "Please rename the file before uploading thanks!");
}
