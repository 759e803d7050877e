//! The interactive preview surface.
//!
//! Turns raw pointer events into gestures against the template metadata
//! and reports every change as an `EditorAction`. The surface never writes
//! to the metadata itself.

use postcraft_core::{FooterPatch, OverlayPatch, PreviewConfig, PreviewLayout, TemplateMetadata, Vec2};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::actions::EditorAction;
use crate::brush::{BrushCursor, BrushSession, BrushSettings};
use crate::gesture::{FooterGesture, GestureMode, OverlayGesture};
use crate::handles::{hit_test_handle, Handle};

// ── Input ──────────────────────────────────────────────────────

/// A pointer event in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up,
}

/// What a pointer position lands on.
#[derive(Debug, Clone, PartialEq)]
pub enum HitTarget {
    OverlayHandle { id: String, handle: Handle },
    Overlay { id: String },
    FooterHandle(Handle),
    Footer,
}

#[derive(Debug, Clone)]
enum ActiveGesture {
    Overlay { id: String, gesture: OverlayGesture },
    Footer(FooterGesture),
    Brush(BrushSession),
}

// ── State ──────────────────────────────────────────────────────

pub struct PreviewSurface {
    /// Disables every gesture; the surface only plays back.
    pub read_only: bool,
    layout: PreviewLayout,
    config: PreviewConfig,
    selected: Option<String>,
    active: Option<ActiveGesture>,
    brush_cursor: Option<BrushCursor>,
    cursor: &'static str,
}

impl PreviewSurface {
    /// An editable surface with nothing selected.
    pub fn new(layout: PreviewLayout, config: PreviewConfig) -> Self {
        Self {
            read_only: false,
            layout,
            config,
            selected: None,
            active: None,
            brush_cursor: None,
            cursor: "default",
        }
    }

    pub fn layout(&self) -> &PreviewLayout {
        &self.layout
    }

    /// Replace the layout after the host resized or the footer changed.
    /// A gesture in progress keeps the box size it started with.
    pub fn set_layout(&mut self, layout: PreviewLayout) {
        self.layout = layout;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_gesture_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn brush_cursor(&self) -> Option<&BrushCursor> {
        self.brush_cursor.as_ref()
    }

    /// CSS cursor for the last hovered position.
    pub fn cursor(&self) -> &'static str {
        self.cursor
    }

    pub fn handle(&mut self, event: PointerEvent, metadata: &TemplateMetadata) -> Vec<EditorAction> {
        match event {
            PointerEvent::Down { x, y } => self.pointer_down(Vec2::new(x, y), metadata),
            PointerEvent::Move { x, y } => self.pointer_move(Vec2::new(x, y), metadata),
            PointerEvent::Up => {
                self.pointer_up();
                Vec::new()
            }
        }
    }

    // ── Hit testing ────────────────────────────────────────────

    /// Resize handles of the selected overlay come first, then the topmost
    /// visible overlay, then the footer.
    pub fn hit_test(&self, pos: Vec2, metadata: &TemplateMetadata) -> Option<HitTarget> {
        let hit_px = self.config.handle_hit_px;

        if let Some(selected) = self.selected.as_deref().and_then(|id| metadata.overlay(id)) {
            if selected.visible {
                let rect = self.layout.overlay_rect(selected.geometry.sanitized());
                if let Some(handle) = hit_test_handle(rect, pos, hit_px, &Handle::ALL) {
                    return Some(HitTarget::OverlayHandle {
                        id: selected.id.clone(),
                        handle,
                    });
                }
            }
        }

        if let Some(overlay) = metadata
            .visible_overlays()
            .rev()
            .find(|o| self.layout.overlay_rect(o.geometry.sanitized()).contains(pos))
        {
            return Some(HitTarget::Overlay {
                id: overlay.id.clone(),
            });
        }

        let footer = self.layout.footer?;
        if let Some(handle) = hit_test_handle(footer, pos, hit_px, &Handle::FOOTER) {
            return Some(HitTarget::FooterHandle(handle));
        }
        footer.contains(pos).then_some(HitTarget::Footer)
    }

    // ── Pointer events ─────────────────────────────────────────

    /// Start a gesture on whatever is under `pos`: a handle of the selected
    /// overlay, an overlay body, a footer handle or the footer itself.
    /// Painting starts instead when the hit overlay is feathering.
    /// Clicking empty space clears the selection.
    pub fn pointer_down(&mut self, pos: Vec2, metadata: &TemplateMetadata) -> Vec<EditorAction> {
        if self.read_only {
            return Vec::new();
        }
        self.active = None;
        let mut actions = Vec::new();

        match self.hit_test(pos, metadata) {
            Some(HitTarget::OverlayHandle { id, handle }) => {
                if let Some(overlay) = metadata.overlay(&id) {
                    debug!(id = %id, ?handle, "Starting overlay resize");
                    let gesture = OverlayGesture::begin(
                        GestureMode::Resize(handle),
                        pos,
                        overlay.geometry,
                        self.layout.media.size(),
                        overlay.is_aspect_locked(),
                        self.config.overlay_limits(),
                    );
                    self.active = Some(ActiveGesture::Overlay { id, gesture });
                }
            }
            Some(HitTarget::Overlay { id }) => {
                actions.push(EditorAction::SelectOverlay { id: id.clone() });
                self.selected = Some(id.clone());
                if let Some(overlay) = metadata.overlay(&id) {
                    match overlay.soft_edge().filter(|cfg| cfg.enabled) {
                        Some(cfg) => {
                            debug!(id = %id, "Starting brush session");
                            let rect = self.layout.overlay_rect(overlay.geometry.sanitized());
                            self.active = Some(ActiveGesture::Brush(BrushSession::begin(
                                id.as_str(),
                                rect,
                                BrushSettings::from(cfg),
                            )));
                        }
                        None => {
                            debug!(id = %id, "Starting overlay move");
                            let gesture = OverlayGesture::begin(
                                GestureMode::Move,
                                pos,
                                overlay.geometry,
                                self.layout.media.size(),
                                overlay.is_aspect_locked(),
                                self.config.overlay_limits(),
                            );
                            self.active = Some(ActiveGesture::Overlay { id, gesture });
                        }
                    }
                }
            }
            Some(HitTarget::FooterHandle(handle)) => {
                self.begin_footer(GestureMode::Resize(handle), pos, metadata);
            }
            Some(HitTarget::Footer) => self.begin_footer(GestureMode::Move, pos, metadata),
            None => {
                trace!("Pointer down on empty canvas");
                self.selected = None;
            }
        }
        actions
    }

    fn begin_footer(&mut self, mode: GestureMode, pos: Vec2, metadata: &TemplateMetadata) {
        debug!(?mode, "Starting footer gesture");
        self.active = FooterGesture::begin(
            mode,
            pos,
            metadata.footer_config.geometry(),
            self.layout.container.size(),
            self.config.footer_limits(),
        )
        .map(ActiveGesture::Footer);
    }

    /// Continue the active gesture, or update hover state when idle.
    pub fn pointer_move(&mut self, pos: Vec2, metadata: &TemplateMetadata) -> Vec<EditorAction> {
        if self.read_only {
            return Vec::new();
        }
        self.update_hover(pos, metadata);

        match self.active.as_mut() {
            Some(ActiveGesture::Overlay { id, gesture }) => vec![EditorAction::UpdateOverlay {
                id: id.clone(),
                patch: OverlayPatch::Geometry(gesture.update(pos)),
            }],
            Some(ActiveGesture::Footer(gesture)) => vec![EditorAction::UpdateFooter {
                patch: FooterPatch::Geometry(gesture.update(pos)),
            }],
            Some(ActiveGesture::Brush(session)) => vec![EditorAction::UpdateOverlay {
                id: session.overlay_id.clone(),
                patch: OverlayPatch::AppendStroke(session.stroke_at(pos)),
            }],
            None => Vec::new(),
        }
    }

    /// End any gesture, wherever the pointer was released.
    pub fn pointer_up(&mut self) {
        if let Some(active) = self.active.take() {
            match active {
                ActiveGesture::Brush(session) => {
                    debug!(id = %session.overlay_id, strokes = session.strokes_painted(), "Brush session ended")
                }
                ActiveGesture::Overlay { id, .. } => debug!(id = %id, "Overlay gesture ended"),
                ActiveGesture::Footer(_) => debug!("Footer gesture ended"),
            }
        }
    }

    fn update_hover(&mut self, pos: Vec2, metadata: &TemplateMetadata) {
        let painting = match &self.active {
            Some(ActiveGesture::Brush(session)) => Some(session.overlay_id.as_str()),
            _ => None,
        };
        let hit = self.hit_test(pos, metadata);
        let hovered_id = painting.or(match &hit {
            Some(HitTarget::Overlay { id }) => Some(id.as_str()),
            _ => None,
        });

        self.brush_cursor = hovered_id
            .and_then(|id| metadata.overlay(id))
            .and_then(|overlay| {
                let cfg = overlay.soft_edge().filter(|cfg| cfg.enabled)?;
                let rect = self.layout.overlay_rect(overlay.geometry.sanitized());
                Some(BrushCursor::new(overlay.id.as_str(), rect, pos, cfg.brush_size))
            });

        self.cursor = if self.brush_cursor.is_some() {
            "none"
        } else {
            match (&self.active, hit) {
                (Some(ActiveGesture::Overlay { gesture, .. }), _) => mode_cursor(gesture.mode),
                (Some(ActiveGesture::Footer(gesture)), _) => mode_cursor(gesture.mode),
                (_, Some(HitTarget::OverlayHandle { handle, .. }))
                | (_, Some(HitTarget::FooterHandle(handle))) => handle.cursor(),
                (_, Some(HitTarget::Overlay { .. })) | (_, Some(HitTarget::Footer)) => "move",
                _ => "default",
            }
        };
    }
}

fn mode_cursor(mode: GestureMode) -> &'static str {
    match mode {
        GestureMode::Move => "move",
        GestureMode::Resize(handle) => handle.cursor(),
    }
}
