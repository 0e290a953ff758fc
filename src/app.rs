//! Standalone window wrapper for the stream tree panel.

use eframe::egui;

use crate::panel::StreamTreePanel;

/// Minimal eframe app: the panel on the left, an empty central area where a
/// host application would mount its plot widget.
pub struct StreamTreeApp {
    panel: StreamTreePanel,
}

impl StreamTreeApp {
    pub fn new(panel: StreamTreePanel) -> Self {
        Self { panel }
    }

    pub fn panel(&self) -> &StreamTreePanel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut StreamTreePanel {
        &mut self.panel
    }
}

impl eframe::App for StreamTreeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.panel.show(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.centered_and_justified(|ui| {
                ui.weak("Attach a plot widget here");
            });
        });
    }
}

/// Open a native window containing just the panel.
///
/// Construct the [`StreamTreePanel`] first (its channel-map load can fail);
/// embedders that want their own central widget should implement
/// `eframe::App` themselves and call [`StreamTreePanel::show`] per frame.
pub fn run_panel(title: &str, panel: StreamTreePanel) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([880.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        title,
        options,
        Box::new(move |_cc| Ok(Box::new(StreamTreeApp::new(panel)))),
    )
}
