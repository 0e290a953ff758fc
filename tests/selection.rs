use std::sync::mpsc::Receiver;

use sigtree::{
    generate_palette, ChannelMap, EventController, EventKind, PaletteStyle, PanelEvent,
    StreamInfo, StreamTree,
};

fn tree_with_events() -> (StreamTree, Receiver<PanelEvent>) {
    let events = EventController::new();
    let rx = events.subscribe_all();
    let tree = StreamTree::new(ChannelMap::empty(), PaletteStyle::default(), events);
    (tree, rx)
}

fn eeg_ecg() -> Vec<StreamInfo> {
    vec![
        StreamInfo {
            name: "EEG".into(),
            channel_count: 4,
            sample_rate: 256.0,
        },
        StreamInfo {
            name: "ECG".into(),
            channel_count: 1,
            sample_rate: 128.0,
        },
    ]
}

fn drain(rx: &Receiver<PanelEvent>) -> Vec<PanelEvent> {
    rx.try_iter().collect()
}

#[test]
fn rebuild_populates_tree_and_expands_default() {
    let (mut tree, rx) = tree_with_events();
    tree.rebuild(&eeg_ecg(), 0);

    assert_eq!(tree.streams().len(), 2);
    assert_eq!(tree.streams()[0].channels.len(), 4);
    assert_eq!(tree.streams()[1].channels.len(), 1);
    assert!(tree.streams()[0].expanded);
    assert!(!tree.streams()[1].expanded);
    assert_eq!(tree.status_line(), "Sampling rate: 256Hz");

    // Every channel of every stream starts checked, colored from a palette
    // sized to its stream's channel count.
    let eeg_palette = generate_palette(4);
    for (i, ch) in tree.streams()[0].channels.iter().enumerate() {
        assert!(ch.checked);
        assert_eq!(ch.color, Some(eeg_palette[i]));
    }
    assert!(tree.streams()[1].channels[0].checked);
    assert_eq!(tree.streams()[1].channels[0].color, Some(generate_palette(1)[0]));

    let events = drain(&rx);
    assert_eq!(events.len(), 2);
    assert!(events[0].kinds.contains(EventKind::METADATA_REBUILT));
    let meta = events[0].metadata.as_ref().unwrap();
    assert_eq!(meta.stream_names, vec!["EEG".to_string(), "ECG".to_string()]);
    assert_eq!(meta.default_index, 0);
    assert_eq!(meta.status, "Sampling rate: 256Hz");

    assert!(events[1].kinds.contains(EventKind::STREAM_EXPANDED));
    assert!(events[1].kinds.contains(EventKind::SELECTION_CHANGED));
    let sel = events[1].selection.as_ref().unwrap();
    assert_eq!(sel.stream, "EEG");
    assert_eq!(sel.checked, vec![0, 1, 2, 3]);
    assert_eq!(sel.colors, eeg_palette);
}

#[test]
fn expanding_another_stream_switches_focus() {
    let (mut tree, rx) = tree_with_events();
    tree.rebuild(&eeg_ecg(), 0);
    drain(&rx);

    tree.expand(1);

    assert!(!tree.streams()[0].expanded);
    assert!(tree.streams()[1].expanded);
    assert_eq!(tree.expanded_index(), Some(1));

    let events = drain(&rx);
    assert_eq!(events.len(), 1);
    assert!(events[0].kinds.contains(EventKind::STREAM_EXPANDED));
    let sel = events[0].selection.as_ref().unwrap();
    assert_eq!(sel.stream, "ECG");
    assert_eq!(sel.checked, vec![0]);
    assert_eq!(sel.colors.len(), 1);
}

#[test]
fn expand_republishes_even_when_unchanged() {
    let (mut tree, rx) = tree_with_events();
    tree.rebuild(&eeg_ecg(), 0);
    drain(&rx);

    // Same stream, same checked set: consumers still get a re-sync event,
    // but without the changed bit.
    tree.expand(0);

    let events = drain(&rx);
    assert_eq!(events.len(), 1);
    assert!(events[0].kinds.contains(EventKind::STREAM_EXPANDED));
    assert!(!events[0].kinds.contains(EventKind::SELECTION_CHANGED));
    assert_eq!(events[0].selection.as_ref().unwrap().checked, vec![0, 1, 2, 3]);
}

#[test]
fn unchecking_channel_regenerates_palette() {
    let (mut tree, rx) = tree_with_events();
    tree.rebuild(
        &[StreamInfo {
            name: "EEG".into(),
            channel_count: 3,
            sample_rate: 256.0,
        }],
        0,
    );
    drain(&rx);

    tree.set_channel_checked(0, 2, false);

    let events = drain(&rx);
    assert_eq!(events.len(), 1);
    assert!(events[0].kinds.contains(EventKind::SELECTION_CHANGED));
    let sel = events[0].selection.as_ref().unwrap();
    assert_eq!(sel.checked, vec![0, 1]);
    // A fresh 2-color palette, not a slice of the prior 3-color one.
    assert_eq!(sel.colors, generate_palette(2));
    assert_ne!(sel.colors, generate_palette(3)[..2].to_vec());

    // Node recoloring follows: checked rows take the new palette by
    // position, the unchecked row loses its color.
    assert_eq!(tree.streams()[0].channels[0].color, Some(generate_palette(2)[0]));
    assert_eq!(tree.streams()[0].channels[1].color, Some(generate_palette(2)[1]));
    assert_eq!(tree.streams()[0].channels[2].color, None);
}

#[test]
fn stream_toggle_off_then_on_restores_children() {
    let (mut tree, rx) = tree_with_events();
    tree.rebuild(&eeg_ecg(), 0);
    drain(&rx);

    tree.set_stream_checked(0, false);
    assert!(tree.streams()[0].channels.iter().all(|c| !c.checked));
    let off = drain(&rx);
    assert_eq!(off.len(), 1);
    let sel = off[0].selection.as_ref().unwrap();
    assert!(sel.checked.is_empty());
    assert!(sel.colors.is_empty());

    tree.set_stream_checked(0, true);
    assert!(tree.streams()[0].channels.iter().all(|c| c.checked));
    let on = drain(&rx);
    assert_eq!(on.len(), 1);
    let sel = on[0].selection.as_ref().unwrap();
    assert_eq!(sel.checked, vec![0, 1, 2, 3]);
    assert_eq!(sel.colors.len(), sel.checked.len());
}

#[test]
fn same_value_edit_publishes_nothing() {
    let (mut tree, rx) = tree_with_events();
    tree.rebuild(&eeg_ecg(), 0);
    drain(&rx);

    // Channel 1 is already checked; re-asserting the same value is not a
    // selection change.
    tree.set_channel_checked(0, 1, true);
    assert!(drain(&rx).is_empty());
}

#[test]
fn rebuild_resets_selection_state() {
    let (mut tree, rx) = tree_with_events();
    tree.rebuild(&eeg_ecg(), 0);
    tree.set_channel_checked(0, 2, false);
    drain(&rx);

    tree.rebuild(&eeg_ecg(), 0);

    // No bookkeeping survives the rebuild: the selection is the full
    // checked set again and never longer than the channel count.
    let sel = tree.selection().unwrap();
    assert_eq!(sel.checked, vec![0, 1, 2, 3]);
    assert_eq!(sel.colors.len(), 4);
    assert!(tree.streams()[0].channels.iter().all(|c| c.checked));
}

#[test]
fn default_index_out_of_range_clamps() {
    let (mut tree, rx) = tree_with_events();
    tree.rebuild(&eeg_ecg(), 5);

    assert_eq!(tree.expanded_index(), Some(1));
    assert_eq!(tree.status_line(), "Sampling rate: 128Hz");

    let events = drain(&rx);
    assert_eq!(events[0].metadata.as_ref().unwrap().default_index, 1);
    assert_eq!(events[1].selection.as_ref().unwrap().stream, "ECG");
}

#[test]
fn empty_stream_list_clears_tree() {
    let (mut tree, rx) = tree_with_events();
    tree.rebuild(&eeg_ecg(), 0);
    drain(&rx);

    tree.rebuild(&[], 0);

    assert!(tree.streams().is_empty());
    assert!(tree.selection().is_none());
    assert_eq!(tree.status_line(), "");

    let events = drain(&rx);
    assert_eq!(events.len(), 1);
    assert!(events[0].kinds.contains(EventKind::METADATA_REBUILT));
    assert!(events[0].metadata.as_ref().unwrap().stream_names.is_empty());
}

#[test]
fn out_of_range_operations_are_ignored() {
    let (mut tree, rx) = tree_with_events();
    tree.rebuild(&eeg_ecg(), 0);
    drain(&rx);

    tree.expand(7);
    tree.collapse(7);
    tree.set_stream_checked(7, false);
    tree.set_channel_checked(0, 99, false);
    tree.set_channel_checked(9, 0, false);

    assert!(drain(&rx).is_empty());
    assert_eq!(tree.expanded_index(), Some(0));
    assert!(tree.streams()[0].channels.iter().all(|c| c.checked));
}

#[test]
fn collapse_leaves_no_stream_expanded() {
    let (mut tree, rx) = tree_with_events();
    tree.rebuild(&eeg_ecg(), 0);
    drain(&rx);

    tree.collapse(0);

    assert_eq!(tree.expanded_index(), None);
    // Collapsing emits nothing; only expansion re-syncs consumers.
    assert!(drain(&rx).is_empty());
}

#[test]
fn colors_always_match_checked_length() {
    let (mut tree, rx) = tree_with_events();
    tree.rebuild(&eeg_ecg(), 0);

    for (channel, checked) in [(0, false), (2, false), (0, true), (3, false)] {
        tree.set_channel_checked(0, channel, checked);
        let sel = tree.selection().unwrap();
        assert_eq!(sel.colors.len(), sel.checked.len());
    }
    drain(&rx);
}

#[test]
fn edit_on_collapsed_stream_publishes_owning_stream() {
    let (mut tree, rx) = tree_with_events();
    tree.rebuild(&eeg_ecg(), 0);
    drain(&rx);

    // ECG is collapsed while EEG has focus; the published selection still
    // names the stream that owns the edited checkbox.
    tree.set_channel_checked(1, 0, false);

    let events = drain(&rx);
    assert_eq!(events.len(), 1);
    let sel = events[0].selection.as_ref().unwrap();
    assert_eq!(sel.stream, "ECG");
    assert!(sel.checked.is_empty());
}
