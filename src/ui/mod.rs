//! # HotasBind User Interface
//!
//! Thin eframe/egui layer on top of the binding session. Every egui frame is
//! one sampler tick: the devices are polled, the session consumes the frame,
//! then the panels render from the session and hand back [`UiIntent`]s which
//! are applied before the frame ends. Status line, export availability and
//! the resume offer come from a [`SessionView`] on the session's change
//! channel.
//!
//! ## Layout
//! - **Top Panel**: start, import and export
//! - **Left Panel**: action list with filters
//! - **Central Panel**: focused action, detected input, devices
//! - **Bottom Panel**: status line
//!
//! File access goes through the [`PersistenceWorker`](crate::persistence::PersistenceWorker);
//! replies are polled with `try_recv` so the frame never waits on disk or dialogs.

pub mod action_list;
pub mod common;
pub mod current_action;

use color_eyre::Result;
use egui::{Button, Key, RichText, TextEdit};
use std::path::PathBuf;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::{debug, error, info, warn};

use crate::binding::session::{BindingSession, NavDirection};
use crate::codec::RandomGuids;
use crate::config::AppConfig;
use crate::controller::sampler::{DeviceSampler, Sampling};
use crate::controller::snapshot::ConnectedDevice;
use crate::persistence::{
    default_export_name, export_file_name, FileAction, FileOutcome, FileTarget, ImportedFile,
};
use action_list::ActionListPanel;
pub use common::{SessionView, StatusMessage, UiColors, UiIntent};

type Reply<T> = oneshot::Receiver<Result<T>>;

pub struct HotasBindUI {
    sampler: DeviceSampler<Sampling>,
    session: BindingSession,
    view: SessionView,

    /// Devices present in the last tick
    devices: Vec<ConnectedDevice>,

    config: AppConfig,
    config_path: Option<PathBuf>,

    /// Channel to the file worker
    file_sender: mpsc::Sender<FileAction>,
    pending_export: Option<Reply<FileOutcome<PathBuf>>>,
    pending_import: Option<Reply<FileOutcome<ImportedFile>>>,
    pending_settings: Option<Reply<()>>,

    /// Name typed into the export field
    export_name: String,
    action_list: ActionListPanel,
    status: Option<StatusMessage>,
}

impl HotasBindUI {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        sampler: DeviceSampler<Sampling>,
        config: AppConfig,
        config_path: Option<PathBuf>,
        file_sender: mpsc::Sender<FileAction>,
    ) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        let mut session = BindingSession::with_default_actions();
        session.set_hat_mode(config.hat_mode);
        let view = SessionView::new(session.subscribe());

        Self {
            devices: sampler.connected_devices(),
            sampler,
            session,
            view,
            config,
            config_path,
            file_sender,
            pending_export: None,
            pending_import: None,
            pending_settings: None,
            export_name: String::new(),
            action_list: ActionListPanel::default(),
            status: None,
        }
    }

    fn sample(&mut self, now: Instant) {
        let frame = self.sampler.poll();
        if !frame.changes.is_empty() {
            self.devices = self.sampler.connected_devices();
        }
        self.session.tick(&frame, now);
    }

    fn collect_keyboard(&self, ctx: &egui::Context, intents: &mut Vec<UiIntent>) {
        if !self.session.is_configuring() || ctx.wants_keyboard_input() {
            return;
        }
        ctx.input(|input| {
            if input.key_pressed(Key::Space) && self.session.pending_input().is_some() {
                intents.push(UiIntent::Confirm);
            }
            if input.key_pressed(Key::ArrowUp) {
                intents.push(UiIntent::Navigate(NavDirection::Previous));
            }
            if input.key_pressed(Key::ArrowDown) {
                intents.push(UiIntent::Navigate(NavDirection::Next));
            }
        });
    }

    fn apply(&mut self, intent: UiIntent, now: Instant) {
        let result = match intent {
            UiIntent::Start => {
                self.session.start();
                Ok(())
            }
            UiIntent::Confirm => self.session.confirm(now),
            UiIntent::Skip => self.session.skip(),
            UiIntent::Clear => self.session.clear(),
            UiIntent::Navigate(direction) => self.session.navigate(direction),
            UiIntent::JumpTo(index) => self.session.jump_to(index),
            UiIntent::Resume => self.session.resume(),
            UiIntent::SetFilter(filter) => {
                self.config.list_filter = filter;
                self.save_settings();
                Ok(())
            }
            UiIntent::SetHatMode(enabled) => {
                self.session.set_hat_mode(enabled);
                self.config.hat_mode = enabled;
                self.save_settings();
                Ok(())
            }
            UiIntent::Export => {
                self.request_export();
                Ok(())
            }
            UiIntent::Import => {
                self.request_import();
                Ok(())
            }
        };

        if let Err(e) = result {
            debug!("{:?} rejected: {}", intent, e);
        }
    }

    fn request_export(&mut self) {
        if self.pending_export.is_some() {
            return;
        }
        let default_name = default_export_name(&self.devices);
        let suggested_name = export_file_name(&self.export_name, &default_name);
        let contents = self.session.export(&mut RandomGuids);

        let (response_tx, response_rx) = oneshot::channel();
        let action = FileAction::Export {
            target: FileTarget::Dialog {
                suggested_name,
                start_dir: self.config.export_dir.clone(),
            },
            contents,
            response_tx,
        };
        if self.send_file_action(action) {
            self.pending_export = Some(response_rx);
        }
    }

    fn request_import(&mut self) {
        if self.pending_import.is_some() {
            return;
        }
        let (response_tx, response_rx) = oneshot::channel();
        let action = FileAction::Import {
            target: FileTarget::Dialog {
                suggested_name: String::new(),
                start_dir: self.config.export_dir.clone(),
            },
            response_tx,
        };
        if self.send_file_action(action) {
            self.pending_import = Some(response_rx);
        }
    }

    fn save_settings(&mut self) {
        let Some(path) = self.config_path.clone() else {
            return;
        };
        let (response_tx, response_rx) = oneshot::channel();
        let action = FileAction::SaveSettings {
            path,
            config: self.config.clone(),
            response_tx,
        };
        if self.send_file_action(action) {
            self.pending_settings = Some(response_rx);
        }
    }

    fn send_file_action(&mut self, action: FileAction) -> bool {
        match self.file_sender.try_send(action) {
            Ok(()) => true,
            Err(e) => {
                error!("File worker unavailable: {}", e);
                self.status = Some(StatusMessage::error("File worker is busy or stopped"));
                false
            }
        }
    }

    fn poll_file_replies(&mut self) {
        if let Some(reply) = poll_reply(&mut self.pending_export) {
            match reply {
                Ok(FileOutcome::Done(path)) => {
                    self.status = Some(StatusMessage::info(format!(
                        "Config saved to {}",
                        path.display()
                    )));
                    let dir = path.parent().map(|p| p.to_path_buf());
                    if dir.is_some() && dir != self.config.export_dir {
                        self.config.export_dir = dir;
                        self.save_settings();
                    }
                }
                Ok(FileOutcome::Cancelled) => {}
                Err(e) => {
                    error!("Export failed: {}", e);
                    self.status = Some(StatusMessage::error(format!("Export failed: {}", e)));
                }
            }
        }

        if let Some(reply) = poll_reply(&mut self.pending_import) {
            match reply {
                Ok(FileOutcome::Done(file)) => self.apply_import(file),
                Ok(FileOutcome::Cancelled) => {}
                Err(e) => {
                    error!("Import failed: {}", e);
                    self.status = Some(StatusMessage::error(format!("Import failed: {}", e)));
                }
            }
        }

        if let Some(Err(e)) = poll_reply(&mut self.pending_settings) {
            warn!("Could not save settings: {}", e);
        }
    }

    fn apply_import(&mut self, file: ImportedFile) {
        match self.session.import(&file.contents) {
            Ok(report) => {
                let mut text = format!("Config loaded: {} actions bound", report.bound);
                if !report.unknown.is_empty() {
                    text.push_str(&format!(", {} unknown actions ignored", report.unknown.len()));
                }
                if !report.foreign.is_empty() {
                    text.push_str(&format!(
                        ", {} non-joystick inputs kept as is",
                        report.foreign.len()
                    ));
                }
                info!("{} from {}", text, file.path.display());
                self.status = Some(StatusMessage::info(text));
            }
            Err(e) => {
                error!("Could not parse {}: {}", file.path.display(), e);
                self.status = Some(StatusMessage::error(format!("Error loading config: {}", e)));
            }
        }
    }

    fn render_top(&mut self, ui: &mut egui::Ui, intents: &mut Vec<UiIntent>) {
        let configuring = self.view.snapshot().phase.is_configuring();
        let can_export = self.view.can_export();
        let default_name = default_export_name(&self.devices);

        ui.horizontal_centered(|ui| {
            ui.heading("HOTAS Binding");
            ui.separator();

            if ui
                .add_enabled(!configuring, Button::new("Start Configuration"))
                .clicked()
            {
                intents.push(UiIntent::Start);
            }
            if ui
                .add_enabled(self.pending_import.is_none(), Button::new("Load Config"))
                .clicked()
            {
                intents.push(UiIntent::Import);
            }

            ui.separator();
            ui.add(
                TextEdit::singleline(&mut self.export_name)
                    .hint_text(default_name.as_str())
                    .desired_width(220.0),
            );
            if ui
                .add_enabled(
                    can_export && self.pending_export.is_none(),
                    Button::new("Export Config"),
                )
                .clicked()
            {
                intents.push(UiIntent::Export);
            }
        });
    }

    fn render_status(&mut self, ui: &mut egui::Ui, now: Instant) {
        if self.status.as_ref().is_some_and(|s| s.is_expired(now)) {
            self.status = None;
        }

        ui.horizontal_centered(|ui| {
            ui.label(format!("Joysticks: {}", self.devices.len()));
            ui.separator();
            match &self.status {
                Some(status) => {
                    ui.label(RichText::new(&status.text).color(status.color()));
                }
                None => {
                    if let Some(hint) = self.view.status_hint() {
                        ui.label(hint);
                    }
                }
            }
        });
    }
}

fn poll_reply<T>(slot: &mut Option<Reply<T>>) -> Option<Result<T>> {
    let receiver = slot.as_mut()?;
    match receiver.try_recv() {
        Ok(reply) => {
            *slot = None;
            Some(reply)
        }
        Err(TryRecvError::Empty) => None,
        Err(TryRecvError::Closed) => {
            *slot = None;
            Some(Err(color_eyre::eyre::eyre!("File worker dropped the request")))
        }
    }
}

impl eframe::App for HotasBindUI {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.sample(now);
        self.poll_file_replies();
        self.view.refresh();

        let mut intents = Vec::new();
        self.collect_keyboard(ctx, &mut intents);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.render_top(ui, &mut intents);
        });

        egui::TopBottomPanel::bottom("bottom_panel")
            .show_separator_line(false)
            .show(ctx, |ui| self.render_status(ui, now));

        egui::SidePanel::left("action_list")
            .resizable(true)
            .default_width(ctx.screen_rect().width() * 0.55)
            .show(ctx, |ui| {
                self.action_list.render(
                    ui,
                    &self.session,
                    self.config.list_filter,
                    &mut intents,
                );
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            current_action::render(ui, &self.session, &self.view, &mut intents);
            ui.separator();
            current_action::render_devices(ui, &self.devices);
        });

        for intent in intents {
            self.apply(intent, now);
        }

        ctx.request_repaint_after(self.config.repaint_interval());
    }
}
