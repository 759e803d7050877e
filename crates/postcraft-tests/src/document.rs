//! Integration tests for template documents.
//!
//! Loads a document as the web host writes it and pushes it through the
//! editor and filter crates.

use postcraft_color::FilterPipeline;
use postcraft_core::{
    AnimationDirection, AspectRatio, AvatarShape, Color, FooterPatch, OverlayKind, OverlayPatch,
    PercentRect, Stroke, TemplateDocument,
};
use postcraft_editor::{EditorAction, MetadataSink};

const HOST_DOCUMENT: &str = r##"{
  "metadata": {
    "canvas": { "referenceWidth": 1080, "referenceHeight": 1920, "aspectRatio": "9:16" },
    "overlays": [
      {
        "id": "avatar", "type": "avatar", "shape": "round",
        "xPercent": 60, "yPercent": 55, "wPercent": 30, "hPercent": 16.875,
        "animation": { "enabled": true, "direction": "right", "speed": 0.8 },
        "avatarConfig": {
          "softEdgeConfig": {
            "enabled": true, "brushSize": 20, "blurStrength": 50, "opacity": 1,
            "strokes": [ { "x": 50, "y": 90, "r": 20, "blur": 50, "opacity": 1 } ]
          }
        },
        "maskVideoUrl": "https://cdn.example.com/avatar-mask.mp4"
      },
      { "id": "logo", "type": "logo", "xPercent": 5, "yPercent": 5, "wPercent": 20, "hPercent": 10 },
      {
        "id": "username", "type": "username", "text": "@ana",
        "xPercent": 5, "yPercent": 80, "wPercent": 40, "hPercent": 6,
        "textConfig": { "content": "@ana.studio", "fontSize": 24, "color": "#ffffff", "fontWeight": "bold" }
      },
      {
        "id": "image-1", "type": "image", "url": "https://cdn.example.com/sticker.png",
        "xPercent": 70, "yPercent": 5, "wPercent": 25, "hPercent": 25, "visible": false
      }
    ],
    "footerConfig": {
      "enabled": true, "backgroundColor": "", "heightPercent": 15, "wPercent": 100, "xPercent": 0
    }
  },
  "editMetadata": {
    "crop": { "ratio": "9:16", "zoomLevel": 1.2, "position": { "x": 50, "y": 40 } },
    "filters": {
      "preset": "clarendon",
      "adjustments": { "brightness": 1.1, "contrast": 1, "saturation": 1, "hueRotate": 0 }
    }
  },
  "audioConfig": {
    "file": "track.mp3", "enabled": true, "volume": 0.6,
    "crop": { "start": 12.5 }, "muteOriginalAudio": true
  }
}"##;

fn host_document() -> TemplateDocument {
    TemplateDocument::from_json(HOST_DOCUMENT.as_bytes()).unwrap()
}

#[test]
fn host_document_parses_every_overlay_kind() {
    let doc = host_document();
    let kinds: Vec<&str> = doc
        .metadata
        .overlays
        .iter()
        .map(|o| o.kind.type_name())
        .collect();
    assert_eq!(kinds, ["avatar", "logo", "username", "image"]);

    let avatar = doc.metadata.overlay("avatar").unwrap();
    assert!(matches!(
        avatar.kind,
        OverlayKind::Avatar {
            shape: AvatarShape::Round,
            ..
        }
    ));
    assert!(avatar.is_feathering());
    assert_eq!(avatar.soft_edge().unwrap().strokes.len(), 1);
    assert_eq!(avatar.animation.direction, AnimationDirection::Right);
    assert!(avatar.mask_video_url().is_some());

    let username = doc.metadata.overlay("username").unwrap();
    assert_eq!(username.display_text(), Some("@ana.studio"));
    assert!(username.is_aspect_locked());

    assert!(!doc.metadata.overlay("image-1").unwrap().visible);
    assert_eq!(doc.metadata.visible_overlays().count(), 3);
}

#[test]
fn host_document_reads_edit_and_audio_settings() {
    let doc = host_document();
    assert_eq!(doc.metadata.canvas.aspect_ratio, AspectRatio::STORY_9_16);
    assert_eq!(doc.edit_metadata.crop.zoom_level, 1.2);
    // An empty color string means "no explicit background".
    assert_eq!(doc.metadata.footer_config.background_color, None);

    let audio = doc.audio_config.as_ref().unwrap();
    assert!(audio.enabled && audio.mute_original_audio);
    assert_eq!(audio.start_offset(), 12.5);
}

#[test]
fn filters_follow_the_document() {
    let mut doc = host_document();
    let css = FilterPipeline::from_settings(&doc.edit_metadata.filters).css();
    assert!(css.contains("brightness(1.1"), "{css}");

    doc.edit_metadata.filters.preset = "no-such-look".into();
    doc.edit_metadata.filters.adjustments = Default::default();
    assert!(FilterPipeline::from_settings(&doc.edit_metadata.filters).is_identity());
}

#[test]
fn edited_document_roundtrips() {
    let mut doc = host_document();
    doc.metadata.dispatch([
        EditorAction::UpdateOverlay {
            id: "logo".into(),
            patch: OverlayPatch::Geometry(PercentRect::new(10.0, 10.0, 25.0, 12.0)),
        },
        EditorAction::UpdateOverlay {
            id: "avatar".into(),
            patch: OverlayPatch::AppendStroke(Stroke::new(10.0, 10.0, 15.0, 0.0, 0.5)),
        },
        EditorAction::UpdateFooter {
            patch: FooterPatch::BackgroundColor(Some(Color::from_rgba8(18, 52, 86, 255))),
        },
    ]);

    let json = doc.to_json().unwrap();
    let text = String::from_utf8(json.clone()).unwrap();
    assert!(text.contains("\"type\": \"avatar\""), "{text}");
    assert!(text.contains("\"backgroundColor\": \"#123456\""), "{text}");

    let back = TemplateDocument::from_json(&json).unwrap();
    assert_eq!(back, doc);
    assert_eq!(
        back.metadata.overlay("logo").unwrap().geometry,
        PercentRect::new(10.0, 10.0, 25.0, 12.0)
    );
    assert_eq!(
        back.metadata
            .overlay("avatar")
            .unwrap()
            .soft_edge()
            .unwrap()
            .strokes
            .len(),
        2
    );
}

#[test]
fn patches_against_unknown_overlays_leave_the_document_alone() {
    let mut doc = host_document();
    let before = doc.clone();
    doc.metadata.dispatch([EditorAction::UpdateOverlay {
        id: "ghost".into(),
        patch: OverlayPatch::Visible(false),
    }]);
    assert_eq!(doc, before);
}
