use egui::{RichText, ScrollArea, Sense, Ui};

use super::common::{create_frame, UiColors, UiIntent};
use crate::binding::actions::{format_action_name, ActionFilter};
use crate::binding::session::BindingSession;

const FILTERS: [ActionFilter; 3] = [
    ActionFilter::All,
    ActionFilter::Configured,
    ActionFilter::Unconfigured,
];

/// Left side list of all actions with their bindings.
#[derive(Default)]
pub struct ActionListPanel {
    // Row that was focused last frame, to scroll only when focus moves
    last_focused: Option<usize>,
}

impl ActionListPanel {
    pub fn render(
        &mut self,
        ui: &mut Ui,
        session: &BindingSession,
        filter: ActionFilter,
        intents: &mut Vec<UiIntent>,
    ) {
        let progress = session.progress();
        let configuring = session.is_configuring();
        let focused = session.current_action_index();
        let scroll_to_focus = focused.is_some() && focused != self.last_focused;
        self.last_focused = focused;

        ui.horizontal(|ui| {
            ui.heading("Actions");
            for candidate in FILTERS {
                let count = match candidate {
                    ActionFilter::All => progress.total,
                    ActionFilter::Configured => progress.configured,
                    ActionFilter::Unconfigured => progress.unconfigured(),
                };
                let text = format!("{} ({})", candidate.label(), count);
                if ui.selectable_label(filter == candidate, text).clicked() && filter != candidate
                {
                    intents.push(UiIntent::SetFilter(candidate));
                }
            }
        });

        let indices = session.filtered_indices(filter);
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if indices.is_empty() {
                    ui.label("No actions match this filter");
                }

                for index in indices {
                    let action = &session.actions()[index];
                    let is_focused = focused == Some(index);
                    let border = if is_focused {
                        UiColors::HIGHLIGHT
                    } else {
                        UiColors::BORDER
                    };

                    let row = create_frame(UiColors::EXTREME_BG, border).show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(format!("{:>2}", index + 1)).monospace());
                            ui.label(RichText::new(format_action_name(&action.name)).strong());
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                match &action.binding {
                                    Some(binding) => ui.label(
                                        RichText::new(binding.to_string())
                                            .monospace()
                                            .color(UiColors::ACTIVE),
                                    ),
                                    None => ui.label(
                                        RichText::new("Not configured").color(UiColors::INACTIVE),
                                    ),
                                };
                            });
                        });
                    });

                    let response = ui.interact(
                        row.response.rect,
                        ui.id().with(("action_row", index)),
                        Sense::click(),
                    );
                    if configuring && response.clicked() && !is_focused {
                        intents.push(UiIntent::JumpTo(index));
                    }
                    if is_focused && scroll_to_focus {
                        row.response.scroll_to_me(Some(egui::Align::Center));
                    }
                }
            });
    }
}
