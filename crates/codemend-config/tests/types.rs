use proptest::prelude::*;

use codemend_config::types::{PLUGIN_PREFIX, PLUGIN_SUFFIX};
use codemend_config::{ConfigError, PluginDescriptor};

#[test]
fn descriptor_name_adds_prefix_and_suffix() {
    let plugin = PluginDescriptor::new("json");
    assert_eq!(plugin.descriptor_name(), "codemend-json-plugin");
}

#[test]
fn descriptor_name_is_a_noop_on_normalized_ids() {
    let plugin = PluginDescriptor::new("codemend-json-plugin");
    assert_eq!(plugin.descriptor_name(), "codemend-json-plugin");
}

#[test]
fn descriptor_name_completes_partial_ids() {
    assert_eq!(
        PluginDescriptor::new("codemend-json").descriptor_name(),
        "codemend-json-plugin"
    );
    assert_eq!(
        PluginDescriptor::new("json-plugin").descriptor_name(),
        "codemend-json-plugin"
    );
}

#[test]
fn descriptor_name_round_trips_through_from_descriptor_name() {
    let plugin = PluginDescriptor::from_descriptor_name("codemend-json-plugin");
    assert_eq!(plugin.artifact_id(), "json");
    assert_eq!(plugin.descriptor_name(), "codemend-json-plugin");
}

#[test]
fn parses_plugin_coordinates() {
    let plugin: PluginDescriptor = "json".parse().unwrap();
    assert_eq!(plugin.artifact_id(), "json");
    assert_eq!(plugin.group_id(), None);
    assert_eq!(plugin.version(), None);

    let plugin: PluginDescriptor = "org.codemend:json".parse().unwrap();
    assert_eq!(plugin.group_id(), Some("org.codemend"));
    assert_eq!(plugin.artifact_id(), "json");

    let plugin: PluginDescriptor = "org.codemend:json:1.2.0".parse().unwrap();
    assert_eq!(plugin.version(), Some("1.2.0"));
    assert_eq!(plugin.to_string(), "org.codemend:json:1.2.0");
}

#[test]
fn rejects_malformed_coordinates() {
    for bad in ["", ":json", "group:", "a:b:c:d", "group::1.0"] {
        let err = bad.parse::<PluginDescriptor>().unwrap_err();
        assert!(
            matches!(err, ConfigError::PluginCoordinates(_)),
            "expected coordinate error for {bad:?}"
        );
    }
}

#[test]
fn descriptors_order_lexicographically_by_artifact_id() {
    let mut plugins = std::collections::BTreeSet::new();
    plugins.insert(PluginDescriptor::new("zeta"));
    plugins.insert(PluginDescriptor::new("alpha"));
    plugins.insert(PluginDescriptor::new("json"));

    let order: Vec<&str> = plugins.iter().map(|p| p.artifact_id()).collect();
    assert_eq!(order, vec!["alpha", "json", "zeta"]);
}

proptest! {
    #[test]
    fn normalization_is_idempotent(artifact in "[a-z][a-z0-9-]{0,20}") {
        let once = PluginDescriptor::new(&artifact).descriptor_name();
        let twice = PluginDescriptor::new(&once).descriptor_name();
        prop_assert_eq!(&once, &twice);
        prop_assert!(once.starts_with(PLUGIN_PREFIX));
        prop_assert!(once.ends_with(PLUGIN_SUFFIX));
    }
}
