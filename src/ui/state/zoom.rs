// SPDX-License-Identifier: MPL-2.0
//! Zoom controls for the editor stage.
//!
//! The zoom value itself lives in [`StageTransform`]; this module keeps the
//! configured step and the readout text shown next to the zoom buttons.

use crate::domain::compositing::StageTransform;
use crate::domain::ui::{ZoomPercent, ZoomStep};

/// Zoom button pressed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Zoom step and readout for the editor stage.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomState {
    /// Zoom step for zoom in/out operations (guaranteed valid by type).
    pub zoom_step: ZoomStep,

    /// Readout text, e.g. `"110%"`.
    readout: String,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::new(ZoomStep::default())
    }
}

impl ZoomState {
    #[must_use]
    pub fn new(zoom_step: ZoomStep) -> Self {
        Self {
            zoom_step,
            readout: format_readout(ZoomPercent::default()),
        }
    }

    /// Applies one zoom step to the stage and refreshes the readout.
    ///
    /// Returns `false` when the zoom was already at its limit.
    pub fn apply(&mut self, stage: &mut StageTransform, direction: ZoomDirection) -> bool {
        let before = stage.zoom;
        match direction {
            ZoomDirection::In => stage.zoom_in(self.zoom_step),
            ZoomDirection::Out => stage.zoom_out(self.zoom_step),
        }
        self.sync(stage.zoom);
        stage.zoom != before
    }

    /// Refreshes the readout from a zoom value.
    pub fn sync(&mut self, zoom: ZoomPercent) {
        self.readout = format_readout(zoom);
    }

    #[must_use]
    pub fn readout(&self) -> &str {
        &self.readout
    }
}

/// Formats a zoom value as a whole percentage, e.g. `"110%"`.
#[must_use]
pub fn format_readout(zoom: ZoomPercent) -> String {
    format!("{}%", zoom.value().round())
}
