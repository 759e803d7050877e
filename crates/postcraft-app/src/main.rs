//! Postcraft - headless template preview
//!
//! Loads a template document, replays a recorded pointer script through the
//! preview editor, simulates playback up to a point in time and writes a
//! preview snapshot plus the edited document.

mod compositor;

use anyhow::{Context, Result};
use clap::Parser;
use postcraft_core::{
    fit_container, PreviewConfig, PreviewLayout, Rect, TemplateDocument, Vec2,
};
use postcraft_editor::{EditorAction, MetadataSink, PointerEvent, PreviewSurface};
use postcraft_mask::{AlphaMask, MaskStore};
use postcraft_playback::{MediaError, PlaybackCoordinator, SimulatedMedia};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::compositor::{render_snapshot, Scene};

/// Host clock step used while simulating playback.
const TICK_SECS: f64 = 1.0 / 30.0;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Template document (JSON)
    #[arg(value_name = "TEMPLATE")]
    template: PathBuf,

    /// Pointer event script to replay through the editor
    #[arg(long, value_name = "FILE")]
    gestures: Option<PathBuf>,

    /// First frame of the primary media
    #[arg(long, value_name = "IMAGE")]
    frame: Option<PathBuf>,

    /// Simulate playback up to this many seconds
    #[arg(long, value_name = "SECS")]
    at: Option<f64>,

    /// Preview snapshot output
    #[arg(long, value_name = "PNG")]
    out: Option<PathBuf>,

    /// Directory for exported avatar masks
    #[arg(long, value_name = "DIR")]
    masks: Option<PathBuf>,

    /// Write the edited document here instead of stdout
    #[arg(long, value_name = "FILE")]
    save: Option<PathBuf>,

    /// Preview configuration (JSON)
    #[arg(long, env = "POSTCRAFT_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => PreviewConfig::load_from_file(path)
            .context("failed to load preview config")?,
        None => PreviewConfig::default(),
    };

    let mut doc = TemplateDocument::load_from_file(&args.template)
        .with_context(|| format!("failed to load {}", args.template.display()))?;
    info!(
        path = %args.template.display(),
        overlays = doc.metadata.overlays.len(),
        footer = doc.metadata.footer_config.enabled,
        "Template loaded"
    );

    let frame = match &args.frame {
        Some(path) => Some(
            image::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?
                .to_rgba8(),
        ),
        None => None,
    };
    let natural = frame
        .as_ref()
        .map(|f| Vec2::new(f.width() as f32, f.height() as f32));

    if let Some(path) = &args.gestures {
        replay_gestures(path, &mut doc, natural, &config)?;
    }
    let layout = layout_for(&doc, natural);

    let mut coordinator = PlaybackCoordinator::new(config);
    register_media(&mut coordinator, &doc);
    coordinator.configure_audio(doc.audio_config.clone());
    let first_frame = frame
        .as_ref()
        .ok_or_else(|| MediaError::NotReady("no preview frame given".into()));
    if let Some(patch) = coordinator.on_primary_loaded(first_frame, &doc.metadata) {
        doc.metadata.dispatch([EditorAction::UpdateFooter { patch }]);
    }

    let now = match args.at {
        Some(at) => simulate_playback(&mut coordinator, &doc, &layout, at),
        None => 0.0,
    };

    if let Some(out) = &args.out {
        let offset_of = |id: &str| coordinator.overlay_offset(id, now);
        let scene = Scene {
            frame: frame.as_ref(),
            background: coordinator.background(),
            offset_of: &offset_of,
        };
        let snapshot = render_snapshot(&doc, &layout, &scene, &mut MaskStore::new())?;
        snapshot
            .save(out)
            .with_context(|| format!("failed to write {}", out.display()))?;
        info!(path = %out.display(), "Snapshot written");
    }

    if let Some(dir) = &args.masks {
        export_masks(&doc, &layout, dir)?;
    }

    match &args.save {
        Some(path) => {
            doc.save_to_file(path)?;
            info!(path = %path.display(), "Document saved");
        }
        None => println!("{}", String::from_utf8_lossy(&doc.to_json()?)),
    }
    Ok(())
}

/// Container of the canvas aspect inside the reference canvas, moved to the
/// origin so pointer scripts are written in container pixels.
fn layout_for(doc: &TemplateDocument, natural: Option<Vec2>) -> PreviewLayout {
    let canvas = &doc.metadata.canvas;
    let reference = canvas.reference_size();
    let ratio = canvas.aspect_ratio.value(natural, reference);
    let fitted = fit_container(Rect::from_min_size(Vec2::ZERO, reference), ratio);
    PreviewLayout::new(
        Rect::from_min_size(Vec2::ZERO, fitted.size()),
        &doc.metadata.footer_config,
    )
}

fn replay_gestures(
    path: &Path,
    doc: &mut TemplateDocument,
    natural: Option<Vec2>,
    config: &PreviewConfig,
) -> Result<()> {
    let data = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let events: Vec<PointerEvent> =
        serde_json::from_slice(&data).context("gesture script is not a list of pointer events")?;

    let mut surface = PreviewSurface::new(layout_for(doc, natural), config.clone());
    let mut applied = 0usize;
    for event in events {
        let actions = surface.handle(event, &doc.metadata);
        applied += actions.len();
        doc.metadata.dispatch(actions);
        // Footer edits move the media box under the pointer.
        surface.set_layout(layout_for(doc, natural));
    }
    info!(applied, selected = ?surface.selected(), "Gesture script replayed");
    Ok(())
}

/// Attach simulated elements for every media role the document declares.
fn register_media(coordinator: &mut PlaybackCoordinator, doc: &TemplateDocument) {
    let media = coordinator.media_mut();
    media.set_primary(Some(Box::new(SimulatedMedia::new(None))));
    for overlay in &doc.metadata.overlays {
        if overlay.mask_video_url().is_some() {
            media.set_overlay_mask(&overlay.id, Box::new(SimulatedMedia::new(None)));
        }
    }
    if doc.metadata.footer_config.mask_video_url.is_some() {
        media.set_footer_mask(Some(Box::new(SimulatedMedia::new(None))));
    }
    if doc.audio_config.as_ref().is_some_and(|a| a.file.is_some()) {
        media.set_audio(Some(Box::new(SimulatedMedia::new(None))));
    }
}

/// Press play at host time zero and tick the coordinator up to `at`.
/// Returns the host time the snapshot is taken at.
fn simulate_playback(
    coordinator: &mut PlaybackCoordinator,
    doc: &TemplateDocument,
    layout: &PreviewLayout,
    at: f64,
) -> f64 {
    let at = at.max(0.0);
    coordinator.play(0.0, &doc.metadata, layout.media.size());
    let mut now = 0.0;
    while now < at {
        if coordinator.tick(now, &doc.metadata) {
            debug!(now, "Entrance transitions started");
        }
        now += TICK_SECS;
    }
    coordinator.tick(at, &doc.metadata);
    info!(at, phase = ?coordinator.phase(), "Playback simulated");
    at
}

/// Write each avatar's feather mask as `<id>-mask.png`, at the overlay's
/// pixel size in the preview.
fn export_masks(doc: &TemplateDocument, layout: &PreviewLayout, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    for overlay in &doc.metadata.overlays {
        let Some(cfg) = overlay.soft_edge() else {
            continue;
        };
        let (w, h) = layout.overlay_rect(overlay.geometry.sanitized()).raster_size();
        let png = AlphaMask::render(cfg, w, h).to_png_bytes()?;
        let path = dir.join(format!("{}-mask.png", overlay.id));
        std::fs::write(&path, png)?;
        info!(id = %overlay.id, strokes = cfg.strokes.len(), path = %path.display(), "Mask exported");
    }
    Ok(())
}
