//! Stream/channel tree model and selection state machine.
//!
//! [`StreamTree`] owns the hierarchical model of streams and their channels,
//! reconciles checkbox edits (a stream-level toggle cascades to every child),
//! derives the ordered checked set and its palette, and publishes selection
//! events through an attached [`EventController`]. It is deliberately free of
//! any UI toolkit types; [`StreamTreePanel`](crate::panel::StreamTreePanel)
//! is the egui adapter on top.
//!
//! All mutation happens on the caller's thread; event handlers run to
//! completion before the next edit is processed.

use crate::channel_map::ChannelMap;
use crate::events::{EventController, EventKind, MetadataMeta, PanelEvent};
use crate::palette::{generate_palette_with, PaletteStyle};
use crate::sink::StreamInfo;

/// One channel row in the tree.
#[derive(Debug, Clone)]
pub struct ChannelNode {
    /// 0-based index within the owning stream (labels are 1-based).
    pub index: usize,
    /// Display label, e.g. `Ch-04` or `Ch-04:  P3`.
    pub label: String,
    pub checked: bool,
    /// Assigned display color while checked, `None` while unchecked.
    pub color: Option<[u8; 3]>,
}

/// One stream node with its ordered channel children.
#[derive(Debug, Clone)]
pub struct StreamNode {
    pub name: String,
    pub sample_rate: f64,
    /// State of the stream-level checkbox. Toggling it cascades to every
    /// child; child edits do not propagate back up.
    pub checked: bool,
    pub expanded: bool,
    pub channels: Vec<ChannelNode>,
}

/// The active selection, replaced wholesale on every recompute.
///
/// `checked` holds channel indices in ascending order; `colors` is always the
/// same length and paired positionally (`checked[k]` renders with
/// `colors[k]`). Colors are regenerated at the new length on every change,
/// never sliced from a previous palette.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    /// Name of the stream the selection belongs to.
    pub stream: String,
    pub checked: Vec<usize>,
    pub colors: Vec<[u8; 3]>,
}

/// Hierarchical stream/channel model with checkbox-cascade reconciliation.
pub struct StreamTree {
    streams: Vec<StreamNode>,
    selection: Option<SelectionState>,
    status: String,
    channel_map: ChannelMap,
    style: PaletteStyle,
    events: EventController,
}

impl StreamTree {
    pub fn new(channel_map: ChannelMap, style: PaletteStyle, events: EventController) -> Self {
        Self {
            streams: Vec::new(),
            selection: None,
            status: String::new(),
            channel_map,
            style,
            events,
        }
    }

    /// The attached event controller (cheap clone, shared subscriber list).
    pub fn events(&self) -> EventController {
        self.events.clone()
    }

    pub fn streams(&self) -> &[StreamNode] {
        &self.streams
    }

    /// The active selection, if any stream has been expanded or edited since
    /// the last rebuild.
    pub fn selection(&self) -> Option<&SelectionState> {
        self.selection.as_ref()
    }

    /// Status line for the default stream of the last rebuild
    /// (`"Sampling rate: {rate}Hz"`), empty before the first rebuild.
    pub fn status_line(&self) -> &str {
        &self.status
    }

    /// Index of the currently expanded stream, if any.
    pub fn expanded_index(&self) -> Option<usize> {
        self.streams.iter().position(|s| s.expanded)
    }

    /// Rebuild the entire tree from a metadata update.
    ///
    /// All prior selection bookkeeping is discarded first; repeated rebuilds
    /// never accumulate state. Every channel starts checked with a color from
    /// a palette sized to its stream's channel count. Exactly the stream at
    /// `default_index` ends up expanded (clamped to the last stream if out of
    /// range); an empty stream list clears the tree and expands nothing.
    ///
    /// Emits `METADATA_REBUILT`, then the expand's selection event.
    pub fn rebuild(&mut self, streams: &[StreamInfo], default_index: usize) {
        self.streams.clear();
        self.selection = None;
        self.status.clear();

        for info in streams {
            let palette = generate_palette_with(info.channel_count, self.style);
            let channels = (0..info.channel_count)
                .map(|i| ChannelNode {
                    index: i,
                    label: self.channel_map.label(i + 1),
                    checked: true,
                    color: Some(palette[i]),
                })
                .collect();
            self.streams.push(StreamNode {
                name: info.name.clone(),
                sample_rate: info.sample_rate,
                checked: true,
                expanded: false,
                channels,
            });
        }

        let stream_names: Vec<String> = self.streams.iter().map(|s| s.name.clone()).collect();

        if self.streams.is_empty() {
            self.events.emit(PanelEvent::metadata(MetadataMeta {
                stream_names,
                default_index: 0,
                status: String::new(),
            }));
            return;
        }

        let mut default_index = default_index;
        if default_index >= self.streams.len() {
            log::warn!(
                "default stream index {} out of range ({} streams), clamping",
                default_index,
                self.streams.len()
            );
            default_index = self.streams.len() - 1;
        }

        self.status = format!(
            "Sampling rate: {}Hz",
            self.streams[default_index].sample_rate
        );
        self.events.emit(PanelEvent::metadata(MetadataMeta {
            stream_names,
            default_index,
            status: self.status.clone(),
        }));

        self.expand(default_index);
    }

    /// Expand the stream at `index`, collapsing every other stream.
    ///
    /// Always publishes the freshly derived selection for that stream — even
    /// when its value is unchanged — so consumers re-sync to the newly
    /// focused stream. The `SELECTION_CHANGED` bit is set only when the value
    /// actually differs from the previous selection.
    pub fn expand(&mut self, index: usize) {
        if index >= self.streams.len() {
            log::debug!("expand: stream index {index} out of range");
            return;
        }
        for (i, stream) in self.streams.iter_mut().enumerate() {
            stream.expanded = i == index;
        }

        let derived = self.derive_selection(index);
        let mut kinds = EventKind::STREAM_EXPANDED;
        if self.selection.as_ref() != Some(&derived) {
            kinds |= EventKind::SELECTION_CHANGED;
        }
        self.apply_selection(index, derived, kinds);
    }

    /// Collapse the stream at `index`. No event: consumers only care about
    /// which stream gained focus, and the original tool signals on expand
    /// only. Afterwards zero streams may be expanded.
    pub fn collapse(&mut self, index: usize) {
        if let Some(stream) = self.streams.get_mut(index) {
            stream.expanded = false;
        }
    }

    /// Set the stream-level checkbox, forcing every child channel to the same
    /// state, then recompute and publish if the selection changed.
    pub fn set_stream_checked(&mut self, index: usize, checked: bool) {
        let Some(stream) = self.streams.get_mut(index) else {
            log::debug!("set_stream_checked: stream index {index} out of range");
            return;
        };
        stream.checked = checked;
        for channel in &mut stream.channels {
            channel.checked = checked;
        }
        self.recompute(index);
    }

    /// Set one channel checkbox, then recompute the owning stream and publish
    /// if the selection changed.
    pub fn set_channel_checked(&mut self, stream: usize, channel: usize, checked: bool) {
        let Some(node) = self
            .streams
            .get_mut(stream)
            .and_then(|s| s.channels.get_mut(channel))
        else {
            log::debug!("set_channel_checked: index ({stream}, {channel}) out of range");
            return;
        };
        node.checked = checked;
        self.recompute(stream);
    }

    /// Recompute the selection for `stream` and publish it when its value
    /// differs from the stored one. No redundant publish otherwise.
    fn recompute(&mut self, stream: usize) {
        let derived = self.derive_selection(stream);
        if self.selection.as_ref() == Some(&derived) {
            return;
        }
        self.apply_selection(stream, derived, EventKind::SELECTION_CHANGED);
    }

    /// Scan the stream's channels in index order and pair the checked indices
    /// with a freshly generated palette of matching length.
    fn derive_selection(&self, stream: usize) -> SelectionState {
        let node = &self.streams[stream];
        let checked: Vec<usize> = node
            .channels
            .iter()
            .filter(|c| c.checked)
            .map(|c| c.index)
            .collect();
        let colors = generate_palette_with(checked.len(), self.style);
        SelectionState {
            stream: node.name.clone(),
            checked,
            colors,
        }
    }

    /// Recolor the stream's channel rows from the new selection, store it
    /// wholesale, and emit.
    fn apply_selection(&mut self, stream: usize, selection: SelectionState, kinds: EventKind) {
        let node = &mut self.streams[stream];
        let mut position = 0;
        for channel in &mut node.channels {
            if channel.checked {
                channel.color = Some(selection.colors[position]);
                position += 1;
            } else {
                channel.color = None;
            }
        }

        self.events
            .emit(PanelEvent::selection(kinds, selection.clone()));
        self.selection = Some(selection);
    }
}
