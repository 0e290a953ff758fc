//! Demo: stream/channel selection panel driving a live plot.
//!
//! What it demonstrates
//! - Feeding stream metadata into the panel via `metadata_channel`.
//! - Answering the panel's update button through `RefreshController`.
//! - Consuming selection events to draw exactly the checked channels in
//!   their published colors.
//!
//! How to run
//! ```bash
//! cargo run --example eeg_panel
//! ```
//! The panel shows a mock EEG (8 channels @ 256 Hz) and ECG (1 channel
//! @ 128 Hz); toggle checkboxes to change which synthetic signals the
//! central plot renders.

use std::f64::consts::TAU;
use std::sync::mpsc::Receiver;
use std::time::Instant;

use eframe::egui::{self, Color32};
use egui_plot::{Legend, Line, Plot};
use sigtree::{
    metadata_channel, EventController, EventFilter, EventKind, MetadataUpdate, PanelConfig,
    PanelEvent, RefreshController, SelectionState, StreamInfo, StreamTreePanel,
};

struct DemoApp {
    panel: StreamTreePanel,
    selection_rx: Receiver<PanelEvent>,
    selection: Option<SelectionState>,
    start: Instant,
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Ok(event) = self.selection_rx.try_recv() {
            if let Some(selection) = event.selection {
                self.selection = Some(selection);
            }
        }

        self.panel.show(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            let t0 = self.start.elapsed().as_secs_f64();
            Plot::new("signals")
                .legend(Legend::default())
                .show(ui, |plot_ui| {
                    let Some(selection) = &self.selection else {
                        return;
                    };
                    for (slot, &channel) in selection.checked.iter().enumerate() {
                        let [r, g, b] = selection.colors[slot];
                        let freq = 1.0 + channel as f64 * 0.5;
                        let points: Vec<[f64; 2]> = (0..512)
                            .map(|i| {
                                let t = t0 + i as f64 / 128.0;
                                [t, (TAU * freq * t).sin() + channel as f64 * 2.2]
                            })
                            .collect();
                        plot_ui.line(
                            Line::new(format!("Ch-{:02}", channel + 1), points)
                                .color(Color32::from_rgb(r, g, b)),
                        );
                    }
                });
        });
        ctx.request_repaint();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let (sink, metadata_rx) = metadata_channel();
    let refresh = RefreshController::new();
    let events = EventController::new();

    // Mock data side: report the stream list once at startup and again on
    // every update-button press.
    {
        let refresh_rx = refresh.subscribe();
        std::thread::spawn(move || {
            let update = MetadataUpdate {
                streams: vec![
                    StreamInfo {
                        name: "Mock EEG".into(),
                        channel_count: 8,
                        sample_rate: 256.0,
                    },
                    StreamInfo {
                        name: "Mock ECG".into(),
                        channel_count: 1,
                        sample_rate: 128.0,
                    },
                ],
                default_index: 0,
            };
            let _ = sink.send(update.clone());
            while refresh_rx.recv().is_ok() {
                let _ = sink.send(update.clone());
            }
        });
    }

    let config = PanelConfig {
        channel_map: Some(
            concat!(env!("CARGO_MANIFEST_DIR"), "/demos/eeg_channels.json").into(),
        ),
        events: Some(events.clone()),
        ..Default::default()
    };
    let panel = StreamTreePanel::new(config, metadata_rx, refresh)?;

    let selection_rx = events.subscribe(EventFilter::only(
        EventKind::STREAM_EXPANDED | EventKind::SELECTION_CHANGED,
    ));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1100.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Real Time Signal Visualizer",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(DemoApp {
                panel,
                selection_rx,
                selection: None,
                start: Instant::now(),
            }))
        }),
    )?;
    Ok(())
}
