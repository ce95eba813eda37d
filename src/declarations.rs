//! The compiled-in key map.
//!
//! Everything the generated document contains is declared here; the rest of
//! the crate only expands, validates, and writes it.

use crate::error::{GeneratorError, Result};
use crate::generator::{
    DisableOptions, HyperKey, HyperLayers, LayerBinding, ManipulatorOverride, RuleSet, Toggle,
};
use crate::models::{Action, Document, KeyReference, KeyStroke, Manipulator, Modifier, RuleGroup};

fn declared<T>(result: anyhow::Result<T>) -> Result<T> {
    result.map_err(|e| GeneratorError::config("declarations", e.to_string()))
}

fn key(code: &str) -> Result<KeyReference> {
    declared(KeyReference::new(code))
}

fn ctrl(code: &str) -> Result<KeyReference> {
    declared(KeyReference::with_mandatory(code, [Modifier::Control]))
}

fn stroke(code: &str) -> Result<KeyStroke> {
    declared(KeyStroke::new(code))
}

fn send(code: &str) -> Result<LayerBinding> {
    Ok(LayerBinding::Override(ManipulatorOverride::to([declared(
        Action::key(code),
    )?])))
}

fn caps_lock_to_control() -> Result<RuleGroup> {
    Ok(RuleGroup::new("Caps Lock to Control").with(
        Manipulator::new(declared(KeyReference::any_modifiers("caps_lock"))?)
            .with_description("⇪ -> ^")
            .to(declared(Action::key("left_control"))?),
    ))
}

fn vim_arrows() -> Result<RuleGroup> {
    let mut group = RuleGroup::new("Change ⌘^hjkl to arrow keys");
    for (from, to) in [
        ("h", "left_arrow"),
        ("j", "down_arrow"),
        ("k", "up_arrow"),
        ("l", "right_arrow"),
    ] {
        let trigger = declared(KeyReference::with_mandatory(
            from,
            [Modifier::Command, Modifier::Control],
        ))?
        .with_any();
        group = group.with(Manipulator::new(trigger).to(declared(Action::key(to))?));
    }
    Ok(group)
}

fn shift_lock(toggle: &Toggle) -> Result<RuleGroup> {
    let mut group = RuleGroup::new("Shift-lock toggle")
        .with(toggle.enable(ctrl("spacebar")?))
        .with(toggle.disable(ctrl("spacebar")?, DisableOptions::default()))
        .with(toggle.disable(key("escape")?, DisableOptions::default()))
        .with(toggle.disable(key("delete_or_backspace")?, DisableOptions::pass_through()))
        .with(toggle.disable(ctrl("g")?, DisableOptions::default()));

    for (from, to) in [
        ("n", "down_arrow"),
        ("p", "up_arrow"),
        ("f", "right_arrow"),
        ("b", "left_arrow"),
    ] {
        group = group.with(toggle.transform(ctrl(from)?, stroke(to)?));
    }

    for arrow in ["down_arrow", "up_arrow", "right_arrow", "left_arrow"] {
        group = group.with(toggle.transform(key(arrow)?, stroke(arrow)?));
    }

    Ok(group)
}

fn sublayers(hyper: &HyperKey) -> Result<HyperLayers> {
    HyperLayers::new(hyper)
        // o = "Open" applications
        .layer(
            "o",
            [
                ("1", LayerBinding::app("1Password")),
                ("g", LayerBinding::app("Google Chrome")),
                ("c", LayerBinding::app("Notion Calendar")),
                ("v", LayerBinding::app("Visual Studio Code")),
                ("s", LayerBinding::app("Slack")),
                ("n", LayerBinding::app("Notion")),
                ("t", LayerBinding::app("Terminal")),
                ("f", LayerBinding::app("Finder")),
                ("r", LayerBinding::app("Texts")),
                ("p", LayerBinding::app("Spotify")),
            ],
        )?
        // s = "System"
        .layer(
            "s",
            [
                ("u", send("volume_increment")?),
                ("j", send("volume_decrement")?),
                ("i", send("display_brightness_increment")?),
                ("k", send("display_brightness_decrement")?),
            ],
        )?
        // r = "Raycast"
        .layer(
            "r",
            [
                (
                    "a",
                    LayerBinding::open("raycast://extensions/raycast/raycast-ai/ai-chat"),
                ),
                (
                    "h",
                    LayerBinding::open(
                        "raycast://extensions/raycast/clipboard-history/clipboard-history",
                    ),
                ),
            ],
        )
}

/// Assembles every declared rule group in evaluation order.
///
/// # Errors
///
/// Returns a configuration error if a declaration is malformed or the
/// assembled set fails validation.
pub fn rules() -> Result<Vec<RuleGroup>> {
    let hyper = HyperKey::right_command()?;
    let toggle = Toggle::shift_lock();

    RuleSet::new()
        .push_static(caps_lock_to_control()?)
        .push_static(hyper.group())
        .push_static(vim_arrows()?)
        .push_toggle(&toggle, shift_lock(&toggle)?)
        .push_layers(sublayers(&hyper)?)
        .build()
}

/// The complete document written to the host's configuration file.
pub fn document() -> Result<Document> {
    Ok(Document::with_default_profile(rules()?))
}
