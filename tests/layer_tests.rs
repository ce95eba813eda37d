//! Hyper sublayer expansion and rule set assembly.

mod fixtures;

use fixtures::*;
use hyperkey::declarations;
use hyperkey::generator::serializer::render;
use hyperkey::generator::{HyperLayers, LayerBinding, ManipulatorOverride, RuleSet};
use hyperkey::models::{Action, Condition, Document, KeyReference};

#[test]
fn test_scenario_single_app_binding() {
    let hyper = hyper();
    let layers = HyperLayers::new(&hyper)
        .layer("o", [("g", LayerBinding::app("Google Chrome"))])
        .unwrap();

    let groups = RuleSet::new().push_layers(layers).build().unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].manipulators.len(), 1);

    let manipulator = &groups[0].manipulators[0];
    assert_eq!(manipulator.from, KeyReference::new("g").unwrap());
    assert_eq!(manipulator.conditions, vec![Condition::variable_if("hyper", 1)]);
    assert_eq!(manipulator.to, vec![Action::open_app("Google Chrome")]);
}

#[test]
fn test_expanded_manipulator_json() {
    let hyper = hyper();
    let groups = HyperLayers::new(&hyper)
        .layer("o", [("g", LayerBinding::app("Google Chrome"))])
        .unwrap()
        .expand();

    let value = serde_json::to_value(&groups[0]).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "description": "Hyper Key sublayer \"o\"",
            "manipulators": [{
                "type": "basic",
                "description": "Open Google Chrome",
                "from": { "key_code": "g" },
                "to": [{ "shell_command": "open -a 'Google Chrome.app'" }],
                "conditions": [{ "type": "variable_if", "name": "hyper", "value": 1 }]
            }]
        })
    );
}

#[test]
fn test_original_sublayers_collide() {
    // The three sublayers as first written share c, n, p, t, and k
    let hyper = hyper();
    let result = HyperLayers::new(&hyper)
        .layer(
            "o",
            [
                ("c", LayerBinding::app("Notion Calendar")),
                ("p", LayerBinding::app("Spotify")),
            ],
        )
        .and_then(|layers| {
            layers.layer(
                "s",
                [
                    ("p", LayerBinding::key("play_or_pause").unwrap()),
                    ("c", LayerBinding::open("raycast://extensions/raycast/system/open-camera")),
                ],
            )
        });

    let err = result.unwrap_err();
    assert!(err.is_config());
    assert!(err.to_string().contains("layer 's' key 'p'"), "{err}");
}

#[test]
fn test_collision_reported_before_serialization() {
    let hyper = hyper();
    let apps = HyperLayers::new(&hyper)
        .layer("o", [("t", LayerBinding::app("Terminal"))])
        .unwrap();
    let system = HyperLayers::new(&hyper)
        .layer(
            "s",
            [(
                "t",
                LayerBinding::open("raycast://extensions/raycast/system/toggle-system-appearance"),
            )],
        )
        .unwrap();

    let err = RuleSet::new()
        .push_static(hyper.group())
        .push_layers(apps)
        .push_layers(system)
        .build()
        .unwrap_err();

    assert!(err.is_config());
    let message = err.to_string();
    assert!(message.contains("Layer 's' key 't'"), "{message}");
    assert!(message.contains("'o'"), "{message}");
}

#[test]
fn test_override_binding_expands_with_activator() {
    let hyper = hyper();
    let body = ManipulatorOverride::to([Action::key("volume_increment").unwrap()]);
    let groups = HyperLayers::new(&hyper)
        .layer("s", [("u", LayerBinding::Override(body))])
        .unwrap()
        .expand();

    let manipulator = &groups[0].manipulators[0];
    assert_eq!(manipulator.to, vec![Action::key("volume_increment").unwrap()]);
    assert_eq!(manipulator.conditions, vec![Condition::variable_if("hyper", 1)]);
    assert!(manipulator.description.is_none());
}

#[test]
fn test_declaration_order_does_not_change_output() {
    let hyper = hyper();
    let forward = HyperLayers::new(&hyper)
        .layer("o", [("g", LayerBinding::app("Google Chrome")), ("s", LayerBinding::app("Slack"))])
        .unwrap()
        .layer("r", [("a", LayerBinding::open("raycast://ai"))])
        .unwrap();
    let backward = HyperLayers::new(&hyper)
        .layer("r", [("a", LayerBinding::open("raycast://ai"))])
        .unwrap()
        .layer("o", [("s", LayerBinding::app("Slack")), ("g", LayerBinding::app("Google Chrome"))])
        .unwrap();

    let left = render(&Document::with_default_profile(forward.expand())).unwrap();
    let right = render(&Document::with_default_profile(backward.expand())).unwrap();
    assert_eq!(left, right);
}

#[test]
fn test_declared_document_is_deterministic() {
    let first = render(&declarations::document().unwrap()).unwrap();
    let second = render(&declarations::document().unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_declared_sub_keys_are_unique() {
    let groups = declarations::rules().unwrap();
    let mut seen = std::collections::BTreeSet::new();

    for group in groups.iter().filter(|g| g.description.starts_with("Hyper Key sublayer")) {
        for manipulator in &group.manipulators {
            assert!(
                seen.insert(manipulator.from.key_code.clone()),
                "sub-key {} bound twice",
                manipulator.from.key_code
            );
        }
    }
    assert!(!seen.is_empty());
}
