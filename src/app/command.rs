// SPDX-License-Identifier: MPL-2.0
//! Command-line commands.
//!
//! [`Cli::parse`] turns `pico_args` arguments into a [`Command`];
//! [`execute`] runs it against a [`BoothApi`] and writes a plain-text report.

use super::script;
use super::session::{Outcome, Session};
use crate::application::port::{BoothApi, Camera};
use crate::config::CompositeMode;
use crate::error::{Error, Result};
use crate::infrastructure::http::{ApiError, GalleryItem};
use crate::infrastructure::{NoCamera, StillCamera};
use crate::media::load_rgba;
use crate::media::validation::{validate_candidate, UploadCandidate};
use crate::ui::editor::EditorSettings;
use crate::ui::gallery::{self, Feed};
use crate::ui::notifications::{self, Severity};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File written by `compose --client` when no `--output` is given.
pub const DEFAULT_OUTPUT: &str = "snapbooth.png";

pub const USAGE: &str = "\
snapbooth - photo-booth compositing client

USAGE:
  snapbooth [--config-dir DIR] [--server URL] <COMMAND>

COMMANDS:
  assets                          List overlay assets
  compose --asset ID [SOURCE]     Place an overlay and capture
      --image FILE                  Use an image file as the source
      --virtual-camera FILE         Stream FILE as a webcam
      --webcam                      Use the webcam (default)
      --script FILE                 Replay gestures before capturing
      --client                      Composite locally instead of uploading
      --output FILE                 Write the resulting image to FILE
  gallery [--page N]              Show a gallery page
  like ID [--page N]              Like an image on a gallery page
  comment ID BODY [--page N]      Comment on an image on a gallery page
  my-images                       List your saved captures
  upload-asset FILE [--name NAME] Upload a new overlay asset
";

/// Where the compose stage gets its picture from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Webcam,
    Image(PathBuf),
    VirtualCamera(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeArgs {
    pub source: Source,
    pub asset_id: u64,
    pub script: Option<PathBuf>,
    pub client: bool,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Command {
    #[default]
    Help,
    Assets,
    Compose(ComposeArgs),
    Gallery {
        page: u32,
    },
    Like {
        image_id: u64,
        page: u32,
    },
    Comment {
        image_id: u64,
        body: String,
        page: u32,
    },
    MyImages,
    UploadAsset {
        file: PathBuf,
        name: Option<String>,
    },
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cli {
    pub config_dir: Option<String>,
    pub server: Option<String>,
    pub command: Command,
}

impl Cli {
    pub fn parse(mut args: pico_args::Arguments) -> Result<Self> {
        if args.contains(["-h", "--help"]) {
            return Ok(Self::default());
        }

        let config_dir = args.opt_value_from_str("--config-dir")?;
        let server = args.opt_value_from_str("--server")?;
        let subcommand = args.subcommand()?;

        let command = match subcommand.as_deref() {
            None | Some("help") => Command::Help,
            Some("assets") => Command::Assets,
            Some("compose") => Command::Compose(parse_compose(&mut args)?),
            Some("gallery") => Command::Gallery {
                page: page_arg(&mut args)?,
            },
            Some("like") => {
                let page = page_arg(&mut args)?;
                Command::Like {
                    image_id: args.free_from_str()?,
                    page,
                }
            }
            Some("comment") => {
                let page = page_arg(&mut args)?;
                let image_id = args.free_from_str()?;
                Command::Comment {
                    image_id,
                    body: args.free_from_str()?,
                    page,
                }
            }
            Some("my-images") => Command::MyImages,
            Some("upload-asset") => {
                let name = args.opt_value_from_str("--name")?;
                Command::UploadAsset {
                    file: args.free_from_str()?,
                    name,
                }
            }
            Some(other) => return Err(Error::Usage(format!("unknown command '{other}'"))),
        };

        let rest = args.finish();
        if !rest.is_empty() {
            return Err(Error::Usage(format!("unexpected arguments: {rest:?}")));
        }

        Ok(Self {
            config_dir,
            server,
            command,
        })
    }
}

fn page_arg(args: &mut pico_args::Arguments) -> Result<u32> {
    let page: u32 = args.opt_value_from_str("--page")?.unwrap_or(1);
    if page == 0 {
        return Err(Error::Usage("pages start at 1".to_string()));
    }
    Ok(page)
}

fn parse_compose(args: &mut pico_args::Arguments) -> Result<ComposeArgs> {
    let image: Option<PathBuf> = args.opt_value_from_str("--image")?;
    let virtual_camera: Option<PathBuf> = args.opt_value_from_str("--virtual-camera")?;
    let webcam = args.contains("--webcam");

    let source = match (image, virtual_camera, webcam) {
        (None, None, _) => Source::Webcam,
        (Some(path), None, false) => Source::Image(path),
        (None, Some(path), false) => Source::VirtualCamera(path),
        _ => {
            return Err(Error::Usage(
                "choose one of --image, --virtual-camera or --webcam".to_string(),
            ))
        }
    };

    Ok(ComposeArgs {
        source,
        asset_id: args.value_from_str("--asset")?,
        script: args.opt_value_from_str("--script")?,
        client: args.contains("--client"),
        output: args.opt_value_from_str("--output")?,
    })
}

/// Runs `command` and writes its report to `out`.
pub async fn execute<A: BoothApi, W: Write>(
    command: Command,
    settings: EditorSettings,
    api: &A,
    out: &mut W,
) -> Result<()> {
    match command {
        Command::Help => {
            out.write_all(USAGE.as_bytes())?;
            Ok(())
        }
        Command::Assets => list_assets(api, out).await,
        Command::Compose(args) => match &args.source {
            Source::VirtualCamera(path) => {
                let camera = StillCamera::new(load_rgba(path)?);
                compose(camera, &args, settings, api, out).await
            }
            Source::Webcam | Source::Image(_) => {
                compose(NoCamera, &args, settings, api, out).await
            }
        },
        Command::Gallery { page } => {
            let feed = load_feed(api, page).await?;
            print_feed(&feed, out)
        }
        Command::Like { image_id, page } => like(api, image_id, page, out).await,
        Command::Comment {
            image_id,
            body,
            page,
        } => comment(api, image_id, &body, page, out).await,
        Command::MyImages => {
            let images = api.user_images().await?;
            if images.is_empty() {
                writeln!(out, "No saved images yet.")?;
            }
            for image in images {
                writeln!(out, "{}\t{}", image.id, image.path)?;
            }
            Ok(())
        }
        Command::UploadAsset { file, name } => {
            let bytes = fs::read(&file)?;
            let candidate = UploadCandidate::from_path_and_bytes(&file, bytes);
            validate_candidate(&candidate).map_err(|err| Error::Rejected(err.user_message().into()))?;
            let message = api
                .upload_asset(
                    name.as_deref(),
                    &candidate.file_name,
                    &candidate.mime_type,
                    candidate.bytes,
                )
                .await?;
            writeln!(out, "{message}")?;
            list_assets(api, out).await
        }
    }
}

async fn list_assets<A: BoothApi, W: Write>(api: &A, out: &mut W) -> Result<()> {
    let assets = api.list_assets().await?;
    if assets.is_empty() {
        writeln!(out, "No assets available.")?;
    }
    for asset in assets {
        writeln!(out, "{}\t{}\t{}", asset.id, asset.name, asset.path)?;
    }
    Ok(())
}

async fn compose<C: Camera, A: BoothApi, W: Write>(
    camera: C,
    args: &ComposeArgs,
    mut settings: EditorSettings,
    api: &A,
    out: &mut W,
) -> Result<()> {
    let gestures = match &args.script {
        Some(path) => script::load(path)?,
        None => Vec::new(),
    };
    if args.client {
        settings.mode = CompositeMode::Client;
    }

    let mut session = Session::new(settings, camera, api);
    session.start().await?;
    match &args.source {
        Source::Image(path) => {
            let bytes = fs::read(path)?;
            let candidate = UploadCandidate::from_path_and_bytes(path, bytes);
            session.place_upload(candidate).await?;
        }
        Source::Webcam | Source::VirtualCamera(_) => {
            session.open_webcam().await?;
        }
    }
    session.select_asset(args.asset_id).await?;
    for gesture in gestures {
        session.dispatch(gesture).await?;
    }
    log::debug!("Capturing with overlay box {:?}", session.editor().overlay_box());
    let outcome = session.capture().await?;

    let failure = report_notifications(session.editor_mut().notifications_mut(), out)?;
    match outcome {
        Outcome::Uploaded { path } => {
            writeln!(out, "Saved {path}")?;
            if let Some(output) = &args.output {
                let bytes = api.fetch_bytes(&path).await?;
                write_output(output, &bytes, out)?;
            }
            Ok(())
        }
        Outcome::Composed { png } => {
            let output = args
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
            write_output(&output, &png, out)
        }
        Outcome::Idle => Err(Error::Rejected(
            failure.unwrap_or_else(|| "Nothing was captured".to_string()),
        )),
    }
}

fn write_output<W: Write>(path: &Path, bytes: &[u8], out: &mut W) -> Result<()> {
    fs::write(path, bytes)?;
    writeln!(out, "Wrote {}", path.display())?;
    Ok(())
}

/// Prints and clears pending notifications; returns the last error message.
fn report_notifications<W: Write>(
    manager: &mut notifications::Manager,
    out: &mut W,
) -> Result<Option<String>> {
    let mut last_error = None;
    for notification in manager.drain() {
        writeln!(
            out,
            "[{}] {}",
            notification.severity().label(),
            notification.message()
        )?;
        if notification.severity() == Severity::Error {
            last_error = Some(notification.message().to_string());
        }
    }
    Ok(last_error)
}

async fn load_feed<A: BoothApi>(api: &A, page: u32) -> Result<Feed> {
    let mut feed = Feed::new();
    if let Some(request) = feed.begin_load(page, false) {
        let result = api.gallery_page(page).await;
        if feed.finish_load(request, result) == gallery::Event::AuthRequired {
            return Err(Error::Api(ApiError::AuthRequired));
        }
    }
    if let Some(status) = feed.status() {
        return Err(Error::Rejected(status.to_string()));
    }
    Ok(feed)
}

fn print_feed<W: Write>(feed: &Feed, out: &mut W) -> Result<()> {
    if feed.is_empty() {
        writeln!(out, "No images yet.")?;
        return Ok(());
    }
    for item in feed.items() {
        print_item(item, out)?;
    }
    if feed.has_more() {
        writeln!(out, "More on page {}.", feed.page() + 1)?;
    }
    Ok(())
}

fn print_item<W: Write>(item: &GalleryItem, out: &mut W) -> Result<()> {
    let liked = if item.liked { ", liked" } else { "" };
    let date = item
        .created_at
        .map(|at| format!(" on {}", at.format("%Y-%m-%d")))
        .unwrap_or_default();
    writeln!(
        out,
        "#{} by {}{date} ({} likes{liked}) {}",
        item.id, item.author, item.likes, item.path
    )?;
    for comment in &item.comments {
        writeln!(out, "    {}: {}", comment.author, comment.body)?;
    }
    Ok(())
}

/// Turns a feed event plus any error notification into a command result.
fn settle(feed: &mut Feed, event: gallery::Event) -> Result<()> {
    if event == gallery::Event::AuthRequired {
        return Err(Error::Api(ApiError::AuthRequired));
    }
    match feed
        .notifications_mut()
        .drain()
        .into_iter()
        .find(|n| n.severity() == Severity::Error)
    {
        Some(notification) => Err(Error::Rejected(notification.message().to_string())),
        None => Ok(()),
    }
}

async fn like<A: BoothApi, W: Write>(api: &A, image_id: u64, page: u32, out: &mut W) -> Result<()> {
    let mut feed = load_feed(api, page).await?;
    let Some(item) = feed.item(image_id) else {
        return Err(Error::Usage(format!("image {image_id} is not on page {page}")));
    };
    if item.liked {
        writeln!(out, "Already liked #{image_id}.")?;
        return Ok(());
    }
    if !feed.begin_like(image_id) {
        return Ok(());
    }

    let result = api.like(image_id).await;
    let event = feed.finish_like(image_id, result);
    settle(&mut feed, event)?;
    let likes = feed.item(image_id).map_or(0, |item| item.likes);
    writeln!(out, "Liked #{image_id} ({likes} likes).")?;
    Ok(())
}

async fn comment<A: BoothApi, W: Write>(
    api: &A,
    image_id: u64,
    body: &str,
    page: u32,
    out: &mut W,
) -> Result<()> {
    let mut feed = load_feed(api, page).await?;
    if feed.item(image_id).is_none() {
        return Err(Error::Usage(format!("image {image_id} is not on page {page}")));
    }
    let Some(body) = feed.begin_comment(image_id, body) else {
        return Err(Error::Usage("comment body is empty".to_string()));
    };

    let result = api.comment(image_id, &body).await;
    let event = feed.finish_comment(image_id, body, result);
    settle(&mut feed, event)?;
    writeln!(out, "Comment added to #{image_id}.")?;
    Ok(())
}
