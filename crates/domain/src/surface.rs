//! Control surface: the concrete layout a card feature renders.
//!
//! Renderers produce an ordered list of [`Control`]s; the host turns them
//! into widgets. `None` in place of a surface means "render nothing".

use serde::Serialize;

use crate::climate::SetpointTarget;

/// Ordered controls making up one feature strip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlSurface {
    pub controls: Vec<Control>,
}

impl ControlSurface {
    #[must_use]
    pub fn new(controls: Vec<Control>) -> Self {
        Self { controls }
    }

    /// All number steppers, in layout order.
    pub fn steppers(&self) -> impl Iterator<Item = &NumberStepper> {
        self.controls.iter().filter_map(|control| match control {
            Control::NumberStepper(stepper) => Some(stepper),
            _ => None,
        })
    }

    /// The stepper bound to `target`, if rendered.
    #[must_use]
    pub fn stepper(&self, target: SetpointTarget) -> Option<&NumberStepper> {
        self.steppers().find(|s| s.target == Some(target))
    }

    /// Mode buttons of the given kind.
    #[must_use]
    pub fn mode_button(&self, kind: ModeKind) -> Option<&ModeButton> {
        self.controls.iter().find_map(|control| match control {
            Control::ModeButton(button) if button.kind == kind => Some(button),
            _ => None,
        })
    }

    /// Action names of the transport buttons, in layout order.
    #[must_use]
    pub fn actions(&self) -> Vec<&str> {
        self.controls
            .iter()
            .filter_map(|control| match control {
                Control::ActionButton(button) => Some(button.action),
                _ => None,
            })
            .collect()
    }
}

/// One interactive widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum Control {
    NumberStepper(NumberStepper),
    Slider(Slider),
    ModeButton(ModeButton),
    ActionButton(ActionButton),
    MuteToggle(MuteToggle),
}

/// `-` / value / `+` buttons editing a number.
///
/// A stepper without a value is an informational placeholder.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NumberStepper {
    pub target: Option<SetpointTarget>,
    pub value: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    /// Fraction digits shown for the value.
    pub precision: usize,
    pub unit: Option<&'static str>,
    /// Attribute the stepper edits, for the host to localise.
    pub label: Option<&'static str>,
    pub disabled: bool,
}

/// Horizontal slider over `min..=max`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slider {
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub disabled: bool,
}

/// Which mode list a cycle button walks through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeKind {
    Fan,
    Hvac,
}

/// Button showing the current mode; tapping advances to the next one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeButton {
    pub kind: ModeKind,
    pub mode: String,
    pub icon: &'static str,
}

/// Transport button dispatching a named media action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionButton {
    pub action: &'static str,
    pub icon: &'static str,
}

/// Mute on/off button.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MuteToggle {
    pub muted: bool,
    pub icon: &'static str,
    pub disabled: bool,
}
