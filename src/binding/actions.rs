//! Static action table and the per-action binding record.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

use crate::controller::snapshot::InputRef;

/// How the game interprets raw input edges for an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterPreset {
    Pressed,
    Previous,
    Next,
    Click,
    Hold,
    Up,
    Down,
    Left,
    Right,
    Forward,
    Back,
    Toggle,
    Select,
}

impl FilterPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterPreset::Pressed => "pressed",
            FilterPreset::Previous => "previous",
            FilterPreset::Next => "next",
            FilterPreset::Click => "click",
            FilterPreset::Hold => "hold",
            FilterPreset::Up => "up",
            FilterPreset::Down => "down",
            FilterPreset::Left => "left",
            FilterPreset::Right => "right",
            FilterPreset::Forward => "forward",
            FilterPreset::Back => "back",
            FilterPreset::Toggle => "toggle",
            FilterPreset::Select => "select",
        }
    }
}

impl Display for FilterPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the action table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionDef {
    pub name: &'static str,
    pub filter_preset: FilterPreset,
}

const fn def(name: &'static str, filter_preset: FilterPreset) -> ActionDef {
    ActionDef {
        name,
        filter_preset,
    }
}

/// Arma Reforger HOTAS actions in configuration order.
pub static ACTION_TABLE: &[ActionDef] = &[
    def("PerformAction", FilterPreset::Pressed),
    def("SelectAction", FilterPreset::Next),
    def("CharacterNextWeapon", FilterPreset::Click),
    def("CharacterFire", FilterPreset::Hold),
    def("CharacterNextFireMode", FilterPreset::Click),
    def("CharacterNextMuzzle", FilterPreset::Click),
    def("GadgetMap", FilterPreset::Select),
    def("HelicopterCollectiveIncrease", FilterPreset::Up),
    def("HelicopterCollectiveDecrease", FilterPreset::Down),
    def("HelicopterAntiTorqueLeft", FilterPreset::Left),
    def("HelicopterAntiTorqueRight", FilterPreset::Right),
    def("HelicopterCyclicForward", FilterPreset::Forward),
    def("HelicopterCyclicBack", FilterPreset::Back),
    def("HelicopterCyclicLeft", FilterPreset::Left),
    def("HelicopterCyclicRight", FilterPreset::Right),
    def("HelicopterWheelBrake", FilterPreset::Pressed),
    def("HelicopterWheelBrakePersistent", FilterPreset::Pressed),
    def("HelicopterAutohoverToggle", FilterPreset::Click),
    def("HelicopterLightsTaxiToggle", FilterPreset::Toggle),
    def("HelicopterLightsLandingToggle", FilterPreset::Toggle),
    def("WeaponToggleSightsIllumination", FilterPreset::Click),
    def("WeaponSwitchOptics", FilterPreset::Click),
    def("TurretFire", FilterPreset::Hold),
    def("TurretReload", FilterPreset::Click),
    def("TurretNextWeapon", FilterPreset::Click),
    def("TurretNextFireMode", FilterPreset::Click),
    def("TurretADS", FilterPreset::Click),
    def("TurretADSHold", FilterPreset::Hold),
    def("TurretRotateLeft", FilterPreset::Left),
    def("TurretRotateRight", FilterPreset::Right),
    def("TurretAimUp", FilterPreset::Up),
    def("TurretAimDown", FilterPreset::Down),
    def("TurretAimLeft", FilterPreset::Left),
    def("TurretAimRight", FilterPreset::Right),
    def("VONDirectToggle", FilterPreset::Click),
    def("VONChannel", FilterPreset::Hold),
    def("GetOut", FilterPreset::Click),
    def("JumpOut", FilterPreset::Click),
    def("HelicopterEngineStart", FilterPreset::Hold),
    def("HelicopterEngineStop", FilterPreset::Click),
];

/// What an action is bound to.
///
/// Imported configs may bind actions to keyboard or mouse references. Those
/// are kept as text so a re-export writes them back unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Binding {
    Joystick(InputRef),
    Raw(String),
}

impl Binding {
    pub fn joystick(&self) -> Option<InputRef> {
        match self {
            Binding::Joystick(input) => Some(*input),
            Binding::Raw(_) => None,
        }
    }
}

impl From<InputRef> for Binding {
    fn from(input: InputRef) -> Self {
        Binding::Joystick(input)
    }
}

impl Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Joystick(input) => Display::fmt(input, f),
            Binding::Raw(raw) => f.write_str(raw),
        }
    }
}

/// A game action and the input bound to it, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Action {
    pub name: String,
    pub filter_preset: FilterPreset,
    pub binding: Option<Binding>,
}

impl Action {
    pub fn new(name: impl Into<String>, filter_preset: FilterPreset) -> Self {
        Self {
            name: name.into(),
            filter_preset,
            binding: None,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }
}

impl From<&ActionDef> for Action {
    fn from(def: &ActionDef) -> Self {
        Action::new(def.name, def.filter_preset)
    }
}

/// Unbound actions for the whole table.
pub fn default_actions() -> Vec<Action> {
    ACTION_TABLE.iter().map(Action::from).collect()
}

/// Which rows the action list shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionFilter {
    #[default]
    All,
    Configured,
    Unconfigured,
}

impl ActionFilter {
    pub fn matches(&self, action: &Action) -> bool {
        match self {
            ActionFilter::All => true,
            ActionFilter::Configured => action.is_bound(),
            ActionFilter::Unconfigured => !action.is_bound(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActionFilter::All => "All",
            ActionFilter::Configured => "Configured",
            ActionFilter::Unconfigured => "Unconfigured",
        }
    }
}

/// Table indices of the actions matching `filter`, in table order.
pub fn filtered_indices(actions: &[Action], filter: ActionFilter) -> Vec<usize> {
    actions
        .iter()
        .enumerate()
        .filter(|(_, action)| filter.matches(action))
        .map(|(index, _)| index)
        .collect()
}

/// Counts shown next to the filter buttons.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Progress {
    pub configured: usize,
    pub total: usize,
}

impl Progress {
    pub fn of(actions: &[Action]) -> Self {
        Self {
            configured: actions.iter().filter(|a| a.is_bound()).count(),
            total: actions.len(),
        }
    }

    pub fn unconfigured(&self) -> usize {
        self.total - self.configured
    }

    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.configured as f32 / self.total as f32
        }
    }
}

/// "HelicopterCyclicLeft" -> "Helicopter Cyclic Left"
///
/// Every uppercase letter starts a new word, so acronyms come out spaced
/// ("VONChannel" -> "V O N Channel").
pub fn format_action_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 8);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push(' ');
        }
        out.push(c);
    }
    out.trim().to_string()
}
