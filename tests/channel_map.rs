use std::collections::HashMap;
use std::io::Write;

use sigtree::{ChannelMap, ChannelMapError};

#[test]
fn bare_labels_are_zero_padded() {
    let map = ChannelMap::empty();
    assert_eq!(map.label(1), "Ch-01");
    assert_eq!(map.label(4), "Ch-04");
    assert_eq!(map.label(10), "Ch-10");
    assert_eq!(map.label(128), "Ch-128");
}

#[test]
fn mapped_channels_get_a_name_suffix() {
    let mut names = HashMap::new();
    names.insert("ch-1".to_string(), "Fp1".to_string());
    let map = ChannelMap::from_names(names);

    assert_eq!(map.label(1), "Ch-01:  Fp1");
    // A lookup miss is a silent bare label, not an error.
    assert_eq!(map.label(2), "Ch-02");
}

#[test]
fn keys_are_unpadded() {
    let mut names = HashMap::new();
    names.insert("ch-01".to_string(), "wrong".to_string());
    names.insert("ch-1".to_string(), "right".to_string());
    let map = ChannelMap::from_names(names);

    assert_eq!(map.name(1), Some("right"));
}

#[test]
fn load_from_json_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"ch-1": "Fp1", "ch-2": "Fp2"}}"#).unwrap();

    let map = ChannelMap::load(file.path()).unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map.name(1), Some("Fp1"));
    assert_eq!(map.label(2), "Ch-02:  Fp2");
}

#[test]
fn missing_file_is_an_io_error() {
    let err = ChannelMap::load("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, ChannelMapError::Io { .. }));
    assert!(err.to_string().contains("not/here.json"));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "channels: nope").unwrap();

    let err = ChannelMap::load(file.path()).unwrap_err();
    assert!(matches!(err, ChannelMapError::Parse { .. }));
}
