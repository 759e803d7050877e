//! Editor output: partial updates routed to the host.
//!
//! Every mutation the editor makes goes through `MetadataSink`, which is the
//! single writer path into the host's template metadata.

use postcraft_core::{FooterPatch, OverlayPatch, TemplateMetadata};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum EditorAction {
    UpdateOverlay { id: String, patch: OverlayPatch },
    UpdateFooter { patch: FooterPatch },
    SelectOverlay { id: String },
}

/// Receiver of editor callbacks.
pub trait MetadataSink {
    fn update_overlay(&mut self, id: &str, patch: OverlayPatch);

    fn update_footer(&mut self, patch: FooterPatch);

    fn select_overlay(&mut self, id: &str);

    fn dispatch(&mut self, actions: impl IntoIterator<Item = EditorAction>)
    where
        Self: Sized,
    {
        for action in actions {
            match action {
                EditorAction::UpdateOverlay { id, patch } => self.update_overlay(&id, patch),
                EditorAction::UpdateFooter { patch } => self.update_footer(patch),
                EditorAction::SelectOverlay { id } => self.select_overlay(&id),
            }
        }
    }
}

/// Merge updates straight into a document. Selection is view state and
/// does not touch the document.
impl MetadataSink for TemplateMetadata {
    fn update_overlay(&mut self, id: &str, patch: OverlayPatch) {
        if let Err(e) = self.apply_overlay_patch(id, patch) {
            warn!(id, error = %e, "Dropping overlay update");
        }
    }

    fn update_footer(&mut self, patch: FooterPatch) {
        self.apply_footer_patch(patch);
    }

    fn select_overlay(&mut self, _id: &str) {}
}

/// Record callbacks in order.
impl MetadataSink for Vec<EditorAction> {
    fn update_overlay(&mut self, id: &str, patch: OverlayPatch) {
        self.push(EditorAction::UpdateOverlay {
            id: id.to_string(),
            patch,
        });
    }

    fn update_footer(&mut self, patch: FooterPatch) {
        self.push(EditorAction::UpdateFooter { patch });
    }

    fn select_overlay(&mut self, id: &str) {
        self.push(EditorAction::SelectOverlay { id: id.to_string() });
    }
}
