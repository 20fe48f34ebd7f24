use std::fmt::Write;

use crate::binding::actions::{Action, FilterPreset};
use crate::codec::guid::GuidSource;

/// `HoldDuration` value meaning "hold until released".
pub const INFINITE_HOLD_DURATION: i32 = -1;

// Name fragments that select an extra filter clause. Matched as plain
// substrings of the action name, in this order.
const HOLD_FILTER_NAME_PARTS: &[&str] = &["Engine", "ADS"];
const INFINITE_HOLD_NAME_PART: &str = "ADSHold";
const SINGLE_CLICK_NAME_PART: &str = "Reset";
const HOLD_ONCE_NAME_PART: &str = "EngineStop";

/// Extra `Filter` clause nested in an input block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFilter {
    /// Press once (toggle actions)
    Down,
    Hold { duration: Option<i32> },
    SingleClick,
    HoldOnce,
}

impl InputFilter {
    /// Filter clause for an action, if it needs one.
    pub fn for_action(name: &str, preset: FilterPreset) -> Option<Self> {
        if preset == FilterPreset::Toggle {
            Some(InputFilter::Down)
        } else if preset == FilterPreset::Hold
            && HOLD_FILTER_NAME_PARTS.iter().any(|part| name.contains(part))
        {
            let duration = name
                .contains(INFINITE_HOLD_NAME_PART)
                .then_some(INFINITE_HOLD_DURATION);
            Some(InputFilter::Hold { duration })
        } else if name.contains(SINGLE_CLICK_NAME_PART) {
            Some(InputFilter::SingleClick)
        } else if name.contains(HOLD_ONCE_NAME_PART) {
            Some(InputFilter::HoldOnce)
        } else {
            None
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            InputFilter::Down => "InputFilterDown",
            InputFilter::Hold { .. } => "InputFilterHold",
            InputFilter::SingleClick => "InputFilterSingleClick",
            InputFilter::HoldOnce => "InputFilterHoldOnce",
        }
    }
}

/// Renders every bound action as an `ActionManager` config. Unbound actions
/// are left out.
pub fn encode(actions: &[Action], guids: &mut dyn GuidSource) -> String {
    let mut config = String::from("ActionManager {\n Actions {\n");

    for action in actions {
        let Some(binding) = &action.binding else {
            continue;
        };
        let source_guid = guids.next_guid();
        let value_guid = guids.next_guid();

        // Writing into a String cannot fail
        let _ = writeln!(config, "  Action {} {{", action.name);
        let _ = writeln!(config, "   InputSource InputSourceSum \"{}\" {{", source_guid);
        let _ = writeln!(config, "    Sources {{");
        let _ = writeln!(config, "     InputSourceValue \"{}\" {{", value_guid);
        let _ = writeln!(config, "      FilterPreset \"{}\"", action.filter_preset);
        let _ = writeln!(config, "      Input \"{}\"", binding);

        if let Some(filter) = InputFilter::for_action(&action.name, action.filter_preset) {
            let _ = writeln!(
                config,
                "      Filter {} \"{}\" {{",
                filter.type_name(),
                guids.next_guid()
            );
            if let InputFilter::Hold {
                duration: Some(duration),
            } = filter
            {
                let _ = writeln!(config, "       HoldDuration {}", duration);
            }
            let _ = writeln!(config, "      }}");
        }

        config.push_str("     }\n    }\n   }\n  }\n");
    }

    config.push_str(" }\n}\n");
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::guid::SequentialGuids;
    use crate::controller::snapshot::{AxisDirection, InputRef};

    #[test]
    fn empty_config_has_only_the_frame() {
        let actions = vec![Action::new("CharacterFire", FilterPreset::Hold)];
        assert_eq!(
            encode(&actions, &mut SequentialGuids::new()),
            "ActionManager {\n Actions {\n }\n}\n"
        );
    }

    #[test]
    fn renders_block_layout() {
        let mut fire = Action::new("CharacterFire", FilterPreset::Hold);
        fire.binding = Some(InputRef::button(0, 0).into());
        let mut lights = Action::new("HelicopterLightsTaxiToggle", FilterPreset::Toggle);
        lights.binding = Some(InputRef::axis(1, 2, AxisDirection::Negative).into());
        let unbound = Action::new("GetOut", FilterPreset::Click);

        let text = encode(&[fire, unbound, lights], &mut SequentialGuids::new());
        let expected = "\
ActionManager {
 Actions {
  Action CharacterFire {
   InputSource InputSourceSum \"{00000000-0000-0000-0000-000000000001}\" {
    Sources {
     InputSourceValue \"{00000000-0000-0000-0000-000000000002}\" {
      FilterPreset \"hold\"
      Input \"joystick0:button0\"
     }
    }
   }
  }
  Action HelicopterLightsTaxiToggle {
   InputSource InputSourceSum \"{00000000-0000-0000-0000-000000000003}\" {
    Sources {
     InputSourceValue \"{00000000-0000-0000-0000-000000000004}\" {
      FilterPreset \"toggle\"
      Input \"joystick1:axis2-\"
      Filter InputFilterDown \"{00000000-0000-0000-0000-000000000005}\" {
      }
     }
    }
   }
  }
 }
}
";
        assert_eq!(text, expected);
    }

    #[test]
    fn ads_hold_gets_infinite_duration() {
        let mut ads = Action::new("TurretADSHold", FilterPreset::Hold);
        ads.binding = Some(InputRef::button(0, 3).into());
        let text = encode(&[ads], &mut SequentialGuids::new());
        assert!(text.contains("      Filter InputFilterHold \"{00000000-0000-0000-0000-000000000003}\" {\n       HoldDuration -1\n      }\n"));
    }

    #[test]
    fn filter_clause_rules() {
        use FilterPreset::*;
        assert_eq!(
            InputFilter::for_action("HelicopterEngineStart", Hold),
            Some(InputFilter::Hold { duration: None })
        );
        assert_eq!(
            InputFilter::for_action("TurretADSHold", Hold),
            Some(InputFilter::Hold {
                duration: Some(INFINITE_HOLD_DURATION)
            })
        );
        assert_eq!(
            InputFilter::for_action("HelicopterEngineStop", Click),
            Some(InputFilter::HoldOnce)
        );
        // Hold rule wins over the engine-stop rule.
        assert_eq!(
            InputFilter::for_action("HelicopterEngineStop", Hold),
            Some(InputFilter::Hold { duration: None })
        );
        assert_eq!(
            InputFilter::for_action("TrimReset", Click),
            Some(InputFilter::SingleClick)
        );
        assert_eq!(
            InputFilter::for_action("TurretADS", Click),
            None
        );
        assert_eq!(InputFilter::for_action("CharacterFire", Hold), None);
        assert_eq!(
            InputFilter::for_action("HelicopterLightsLandingToggle", Toggle),
            Some(InputFilter::Down)
        );
    }
}
