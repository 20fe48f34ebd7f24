use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

use crate::binding::actions::{Action, Binding};
use crate::codec::error::CodecError;
use crate::controller::snapshot::InputRef;

// First `Input "<ref>"` after an `Action <Name> {` header, across nested blocks
static ACTION_INPUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"Action\s+(\w+)\s*\{[\s\S]*?Input\s+"([^"]+)""#)
        .unwrap_or_else(|e| unreachable!("static pattern is valid: {e}"))
});

/// Outcome of a successful import.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodeReport {
    /// Actions that received a binding
    pub bound: usize,
    /// Action names in the file that are not in the table
    pub unknown: Vec<String>,
    /// (action, input) pairs kept as raw text because the input is not a
    /// joystick reference
    pub foreign: Vec<(String, String)>,
}

/// Replaces all bindings in `actions` with the ones found in `text`.
///
/// The text is checked for balanced braces and closed strings first; on a
/// structural error nothing is changed. Actions missing from the file end up
/// unbound, names missing from the table are ignored. Inputs that are not
/// joystick references are bound as [`Binding::Raw`].
pub fn decode(text: &str, actions: &mut [Action]) -> Result<DecodeReport, CodecError> {
    check_structure(text)?;

    let index_by_name: HashMap<&str, usize> = actions
        .iter()
        .enumerate()
        .map(|(i, action)| (action.name.as_str(), i))
        .collect();

    let mut report = DecodeReport::default();
    let mut found: Vec<(usize, Binding)> = Vec::new();

    for captures in ACTION_INPUT.captures_iter(text) {
        let name = &captures[1];
        let raw_input = &captures[2];

        let Some(&index) = index_by_name.get(name) else {
            debug!("Ignoring unknown action {}", name);
            report.unknown.push(name.to_string());
            continue;
        };

        match raw_input.parse::<InputRef>() {
            Ok(input) => found.push((index, Binding::Joystick(input))),
            Err(e) => {
                debug!("Keeping input of {} as text: {}", name, e);
                report
                    .foreign
                    .push((name.to_string(), raw_input.to_string()));
                found.push((index, Binding::Raw(raw_input.to_string())));
            }
        }
    }

    for action in actions.iter_mut() {
        action.binding = None;
    }
    for (index, binding) in found {
        actions[index].binding = Some(binding);
    }
    report.bound = actions.iter().filter(|a| a.is_bound()).count();

    Ok(report)
}

fn check_structure(text: &str) -> Result<(), CodecError> {
    let mut open_braces: Vec<usize> = Vec::new();
    let mut string_start: Option<usize> = None;
    let mut line = 1;

    for c in text.chars() {
        if c == '\n' {
            line += 1;
        }
        if string_start.is_some() {
            if c == '"' {
                string_start = None;
            }
            continue;
        }
        match c {
            '"' => string_start = Some(line),
            '{' => open_braces.push(line),
            '}' => {
                if open_braces.pop().is_none() {
                    return Err(CodecError::UnmatchedClosingBrace { line });
                }
            }
            _ => {}
        }
    }

    if let Some(line) = string_start {
        return Err(CodecError::UnterminatedString { line });
    }
    if let Some(line) = open_braces.pop() {
        return Err(CodecError::UnbalancedBraces { line });
    }
    Ok(())
}
