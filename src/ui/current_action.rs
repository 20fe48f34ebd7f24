use egui::{Button, Label, ProgressBar, RichText, Ui};

use super::common::{create_frame, SessionView, UiColors, UiIntent};
use crate::binding::actions::format_action_name;
use crate::binding::session::{BindingSession, NavDirection, SessionPhase};
use crate::controller::snapshot::{describe_input, ConnectedDevice};

/// Right side panel: focused action, detected input and the session controls.
pub fn render(
    ui: &mut Ui,
    session: &BindingSession,
    view: &SessionView,
    intents: &mut Vec<UiIntent>,
) {
    let progress = session.progress();

    ui.vertical(|ui| {
        ui.heading("Configuration");
        ui.add(
            ProgressBar::new(progress.fraction())
                .text(format!("{} / {}", progress.configured, progress.total)),
        );

        let mut hat_mode = session.hat_mode();
        if ui
            .checkbox(&mut hat_mode, "Hat mode (detect 8-way hats reported as axes)")
            .changed()
        {
            intents.push(UiIntent::SetHatMode(hat_mode));
        }
        ui.separator();

        match session.current_action_index() {
            Some(index) => render_focused(ui, session, view, index, intents),
            None => render_idle(ui, session, intents),
        }
    });
}

fn render_idle(ui: &mut Ui, session: &BindingSession, intents: &mut Vec<UiIntent>) {
    let (label, hint) = match session.phase() {
        SessionPhase::Finished => (
            "Restart Configuration",
            "Configuration finished. Export the config or start again.",
        ),
        _ => (
            "Start Configuration",
            "Start to walk through every action and press the control you want for it.",
        ),
    };
    ui.add(Label::new(hint).wrap());
    if ui.button(label).clicked() {
        intents.push(UiIntent::Start);
    }
}

fn render_focused(
    ui: &mut Ui,
    session: &BindingSession,
    view: &SessionView,
    index: usize,
    intents: &mut Vec<UiIntent>,
) {
    let action = &session.actions()[index];
    let locked = session.is_transition_pending();

    create_frame(UiColors::INNER_BG, UiColors::HIGHLIGHT).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(format!("Action {} of {}", index + 1, session.actions().len()));
        ui.label(RichText::new(format_action_name(&action.name)).heading().strong());
        ui.label(format!("Preset: {}", action.filter_preset));

        if let Some(pending) = session.pending_input() {
            ui.label(
                RichText::new(pending.to_string())
                    .monospace()
                    .size(18.0)
                    .color(UiColors::PENDING),
            );
            ui.label(describe_input(&pending));
            ui.label("Press Space or Confirm to bind, or move another control to replace it.");
        } else if let Some(bound) = &action.binding {
            ui.label(
                RichText::new(bound.to_string())
                    .monospace()
                    .size(18.0)
                    .color(UiColors::ACTIVE),
            );
            match bound.joystick() {
                Some(input) => ui.label(describe_input(&input)),
                None => ui.label("Imported input, kept as is on export"),
            };
        } else if locked {
            ui.label("Saved.");
        } else {
            ui.label("Waiting for input...");
        }
    });

    ui.horizontal(|ui| {
        let can_confirm = !locked && session.pending_input().is_some();
        if ui.add_enabled(can_confirm, Button::new("Confirm")).clicked() {
            intents.push(UiIntent::Confirm);
        }
        if ui.add_enabled(!locked, Button::new("Skip")).clicked() {
            intents.push(UiIntent::Skip);
        }
        if ui.add_enabled(!locked, Button::new("Clear")).clicked() {
            intents.push(UiIntent::Clear);
        }
    });

    ui.horizontal(|ui| {
        if ui
            .add_enabled(!locked && index > 0, Button::new("Previous"))
            .clicked()
        {
            intents.push(UiIntent::Navigate(NavDirection::Previous));
        }
        if ui
            .add_enabled(
                !locked && index + 1 < session.actions().len(),
                Button::new("Next"),
            )
            .clicked()
        {
            intents.push(UiIntent::Navigate(NavDirection::Next));
        }
        if let Some(target) = view.resume_target() {
            let text = format!(
                "Resume at {}",
                format_action_name(&session.actions()[target].name)
            );
            if ui.add_enabled(!locked, Button::new(text)).clicked() {
                intents.push(UiIntent::Resume);
            }
        }
    });
}

/// Compact list of plugged devices.
pub fn render_devices(ui: &mut Ui, devices: &[ConnectedDevice]) {
    ui.heading("Devices");
    if devices.is_empty() {
        ui.add(
            Label::new(
                RichText::new("No joysticks detected. Connect a joystick and press any button.")
                    .color(UiColors::INACTIVE),
            )
            .wrap(),
        );
        return;
    }
    for device in devices {
        create_frame(UiColors::INNER_BG, UiColors::BORDER).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(&device.id).strong());
            ui.label(format!("Joystick {}", device.index));
        });
    }
}
