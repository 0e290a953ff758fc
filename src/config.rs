//! Configuration for the stream tree panel.

use std::path::PathBuf;

use crate::events::EventController;
use crate::palette::PaletteStyle;

/// Configuration consumed by
/// [`StreamTreePanel::new`](crate::panel::StreamTreePanel::new).
#[derive(Clone)]
pub struct PanelConfig {
    /// Heading shown above the tree.
    pub header_label: String,
    /// Path to the JSON channel-name resource. `None` means no mapping:
    /// channels get bare `Ch-NN` labels. A path that cannot be read or
    /// parsed is a construction error.
    pub channel_map: Option<PathBuf>,
    /// Hue-wheel saturation/value for channel colors.
    pub palette: PaletteStyle,
    /// Event controller to publish through. When `None` the panel creates
    /// its own; retrieve it via
    /// [`StreamTreePanel::events`](crate::panel::StreamTreePanel::events).
    pub events: Option<EventController>,
    /// Show the sampling-rate status line under the tree.
    pub show_status: bool,
    /// Show the update button that requests a stream re-scan.
    pub show_refresh: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            header_label: "Streams".to_string(),
            channel_map: None,
            palette: PaletteStyle::default(),
            events: None,
            show_status: true,
            show_refresh: true,
        }
    }
}
