//! Shared test helpers for configuration tests.

use ortho_config::MergeComposer;
use serde_json::Value;

use crate::TriageConfig;

/// Applies a configuration layer to the composer based on the layer type.
pub fn apply_layer(composer: &mut MergeComposer, layer_type: &str, value: Value) {
    match layer_type {
        "defaults" => composer.push_defaults(value),
        "file" => composer.push_file(value, None),
        "environment" => composer.push_environment(value),
        "cli" => composer.push_cli(value),
        _ => panic!("unknown layer type: {layer_type}"),
    }
}

/// Helper to compose a [`TriageConfig`] from a sequence of `(layer_type, value)` pairs.
pub fn build_config_from_layers(layers: &[(&str, Value)]) -> TriageConfig {
    let mut composer = MergeComposer::new();

    for (layer_type, value) in layers {
        apply_layer(&mut composer, layer_type, value.clone());
    }

    TriageConfig::merge_from_layers(composer.layers()).expect("merge should succeed")
}

/// Runner variables that influence resolution and must be cleared in tests.
pub const RUNNER_VARIABLES: [&str; 10] = [
    "GITHUB_TOKEN",
    "GITHUB_EVENT_PATH",
    "GITHUB_OUTPUT",
    "INPUT_PROJECT-URL",
    "INPUT_GITHUB-TOKEN",
    "INPUT_LABELED",
    "INPUT_LABEL-OPERATOR",
    "INPUT_MILESTONED",
    "INPUT_REMOVE-UNMATCHED",
    "INPUT_FUZZY-MATCH",
];

/// Environment overrides with every runner variable unset except `set`.
///
/// Pass the result to `env_lock::lock_env` to serialise the test.
pub fn runner_env(
    set: &[(&'static str, &'static str)],
) -> [(&'static str, Option<&'static str>); 10] {
    RUNNER_VARIABLES.map(|name| {
        let value = set
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value);
        (name, value)
    })
}
