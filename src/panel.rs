//! egui adapter for the stream tree.
//!
//! [`StreamTreePanel`] renders the [`StreamTree`] as a collapsible left side
//! panel: one collapsing header per stream with the stream checkbox in the
//! header row, color-tinted channel checkboxes in the body, an update button
//! that requests a stream re-scan, and the sampling-rate status line.
//!
//! egui reports a checkbox edit as a single `changed()` response, so every
//! user toggle maps to exactly one controller call carrying the node and its
//! new state; there is no multi-callback coalescing to reconstruct.

use std::sync::mpsc::Receiver;
use std::time::Duration;

use eframe::egui;

use crate::channel_map::{ChannelMap, ChannelMapError};
use crate::config::PanelConfig;
use crate::events::EventController;
use crate::sink::{MetadataUpdate, RefreshController};
use crate::tree::StreamTree;

/// A user edit gathered during rendering, applied after the tree walk.
enum TreeAction {
    Expand(usize),
    Collapse(usize),
    StreamChecked(usize, bool),
    ChannelChecked(usize, usize, bool),
}

/// Stream selection side panel.
pub struct StreamTreePanel {
    tree: StreamTree,
    rx: Receiver<MetadataUpdate>,
    refresh: RefreshController,
    header_label: String,
    show_status: bool,
    show_refresh: bool,
    hidden: bool,
}

impl StreamTreePanel {
    /// Build the panel. Fails when `config.channel_map` names a resource
    /// that cannot be read or parsed.
    pub fn new(
        config: PanelConfig,
        rx: Receiver<MetadataUpdate>,
        refresh: RefreshController,
    ) -> Result<Self, ChannelMapError> {
        let channel_map = match &config.channel_map {
            Some(path) => ChannelMap::load(path)?,
            None => ChannelMap::empty(),
        };
        let events = config.events.clone().unwrap_or_default();
        Ok(Self {
            tree: StreamTree::new(channel_map, config.palette, events),
            rx,
            refresh,
            header_label: config.header_label,
            show_status: config.show_status,
            show_refresh: config.show_refresh,
            hidden: false,
        })
    }

    /// The event controller selection events are published through.
    pub fn events(&self) -> EventController {
        self.tree.events()
    }

    pub fn tree(&self) -> &StreamTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut StreamTree {
        &mut self.tree
    }

    /// Drain pending metadata updates, rebuilding the tree for each.
    pub fn poll_metadata(&mut self) {
        while let Ok(update) = self.rx.try_recv() {
            self.tree.rebuild(&update.streams, update.default_index);
        }
    }

    /// Render as a left side panel (collapsed to a narrow strip when hidden).
    pub fn show(&mut self, ctx: &egui::Context) {
        self.poll_metadata();
        // Keep polling for metadata while the window is otherwise idle.
        ctx.request_repaint_after(Duration::from_millis(200));

        if self.hidden {
            egui::SidePanel::left("sigtree_strip")
                .resizable(false)
                .exact_width(28.0)
                .show(ctx, |ui| {
                    if ui
                        .small_button("▶")
                        .on_hover_text("Show streams panel")
                        .clicked()
                    {
                        self.hidden = false;
                    }
                });
            return;
        }

        egui::SidePanel::left("sigtree_panel")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading(&self.header_label);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("◀").on_hover_text("Hide panel").clicked() {
                            self.hidden = true;
                        }
                        if self.show_refresh
                            && ui
                                .button("Update")
                                .on_hover_text("Re-scan available streams")
                                .clicked()
                        {
                            self.refresh.request_refresh();
                        }
                    });
                });
                ui.separator();
                egui::ScrollArea::vertical()
                    .auto_shrink([false, true])
                    .show(ui, |ui| self.tree_ui(ui));
                if self.show_status && !self.tree.status_line().is_empty() {
                    ui.separator();
                    ui.label(self.tree.status_line());
                }
            });
    }

    /// Render just the tree body (for embedding in a custom layout).
    pub fn tree_ui(&mut self, ui: &mut egui::Ui) {
        let mut actions: Vec<TreeAction> = Vec::new();

        for (idx, stream) in self.tree.streams().iter().enumerate() {
            let id = ui.make_persistent_id(("sigtree_stream", idx));
            let mut state = egui::collapsing_header::CollapsingState::load_with_default_open(
                ui.ctx(),
                id,
                stream.expanded,
            );
            // The tree model is the source of truth for openness.
            state.set_open(stream.expanded);

            let header = state.show_header(ui, |ui| {
                let mut checked = stream.checked;
                if ui.checkbox(&mut checked, &stream.name).changed() {
                    actions.push(TreeAction::StreamChecked(idx, checked));
                }
            });
            let (toggle, _header, _body) = header.body(|ui| {
                for channel in &stream.channels {
                    let mut checked = channel.checked;
                    let text = match channel.color {
                        Some([r, g, b]) => egui::RichText::new(&channel.label)
                            .color(egui::Color32::from_rgb(r, g, b)),
                        None => egui::RichText::new(&channel.label),
                    };
                    if ui.checkbox(&mut checked, text).changed() {
                        actions.push(TreeAction::ChannelChecked(idx, channel.index, checked));
                    }
                }
            });
            if toggle.clicked() {
                if stream.expanded {
                    actions.push(TreeAction::Collapse(idx));
                } else {
                    actions.push(TreeAction::Expand(idx));
                }
            }
        }

        for action in actions {
            match action {
                TreeAction::Expand(idx) => self.tree.expand(idx),
                TreeAction::Collapse(idx) => self.tree.collapse(idx),
                TreeAction::StreamChecked(idx, checked) => {
                    self.tree.set_stream_checked(idx, checked)
                }
                TreeAction::ChannelChecked(idx, ch, checked) => {
                    self.tree.set_channel_checked(idx, ch, checked)
                }
            }
        }
    }
}
