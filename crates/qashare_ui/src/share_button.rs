use std::time::{Duration, Instant};

use egui::{Align2, Frame, Order, PopupCloseBehavior};
use qashare::i18n::keys;
use qashare::{AppLauncher, Clipboard, MenuItem, NativeShare, ShareLayout, ShareWidget, Translate};

use crate::qr_texture;

/// How often to repaint while a QR code is being generated
pub const QR_POLL_INTERVAL: Duration = Duration::from_millis(100);

const POPUP_MIN_WIDTH: f32 = 195.0;
const TOOLTIP_GAP: f32 = 4.0;

/// The host capabilities a share menu acts through
pub struct ShareHost<'a> {
    pub clipboard: &'a mut dyn Clipboard,
    pub launcher: &'a mut dyn AppLauncher,
    pub native: &'a mut dyn NativeShare,
}

/// Draws a [`ShareWidget`]: a dropdown in normal mode, inline items in
/// mobile mode.
pub struct ShareButton<'a> {
    widget: &'a mut ShareWidget,
    i18n: &'a mut dyn Translate,
    host: ShareHost<'a>,
}

impl<'a> ShareButton<'a> {
    pub fn new(
        widget: &'a mut ShareWidget,
        i18n: &'a mut dyn Translate,
        host: ShareHost<'a>,
    ) -> Self {
        Self { widget, i18n, host }
    }

    #[profiling::function]
    pub fn show(mut self, ui: &mut egui::Ui) -> egui::Response {
        let now = Instant::now();

        self.widget.probe_native_share(self.host.native);
        self.widget.sync_session();
        self.widget.poll_qr();

        if let Some(remaining) = self.widget.tick(now) {
            ui.ctx().request_repaint_after(remaining);
        }

        if self.widget.qr_pending() {
            ui.ctx().request_repaint_after(QR_POLL_INTERVAL);
        }

        let props = self.widget.props();
        let salt = (props.class_name.clone(), props.target.path());

        ui.push_id(salt, |ui| match self.widget.layout() {
            ShareLayout::Dropdown => self.show_dropdown(ui, now),
            ShareLayout::Inline => {
                ui.vertical(|ui| self.show_items(ui, now)).response
            }
        })
        .inner
    }

    fn show_dropdown(&mut self, ui: &mut egui::Ui, now: Instant) -> egui::Response {
        let popup_id = ui.make_persistent_id("share_popup");
        let toggle = ui.link(self.i18n.translate(keys::SHARE_NAME));

        if toggle.clicked() {
            self.widget.toggle_menu();
        }

        let popup_open = ui.memory(|m| m.is_popup_open(popup_id));
        if self.widget.state().menu_open && !popup_open {
            ui.memory_mut(|m| m.open_popup(popup_id));
        } else if !self.widget.state().menu_open && popup_open {
            ui.memory_mut(|m| m.close_popup());
        }

        egui::popup_below_widget(
            ui,
            popup_id,
            &toggle,
            PopupCloseBehavior::CloseOnClickOutside,
            |ui| {
                ui.set_min_width(POPUP_MIN_WIDTH);
                self.show_items(ui, now);
            },
        );

        // clicked outside
        if self.widget.state().menu_open && !ui.memory(|m| m.is_popup_open(popup_id)) {
            self.widget.close();
        }

        toggle
    }

    fn show_items(&mut self, ui: &mut egui::Ui, now: Instant) {
        for item in self.widget.menu_items() {
            let label = self.i18n.translate(item.label_key());

            match item {
                MenuItem::Copy => {
                    let resp = ui.button(label);
                    if resp.clicked() {
                        self.widget.copy(self.host.clipboard, now);
                    }

                    if self.widget.state().tooltip_visible {
                        let copied = self.i18n.translate(keys::SHARE_COPIED);
                        copied_tooltip(ui, &resp, copied);
                    }
                }

                MenuItem::MessagingApp => {
                    if ui.button(label).clicked() {
                        self.widget.share_to_messaging_app(
                            self.host.clipboard,
                            self.host.launcher,
                            now,
                        );
                    }
                }

                MenuItem::NativeShare => {
                    if ui.button(label).clicked() {
                        self.widget.native_share(self.host.native);
                    }
                }

                MenuItem::QrCode { size } => {
                    let Some(img) = self.widget.state().qr_image.as_ref() else {
                        continue;
                    };

                    let texture = qr_texture(ui.ctx(), ui.id().with("qr"), img);
                    let size = egui::vec2(size as f32, size as f32);
                    ui.add(egui::Image::new((texture.id(), size)).alt_text(label));
                }
            }
        }
    }
}

fn copied_tooltip(ui: &egui::Ui, anchor: &egui::Response, text: String) {
    egui::Area::new(anchor.id.with("copied"))
        .order(Order::Tooltip)
        .pivot(Align2::RIGHT_CENTER)
        .fixed_pos(anchor.rect.left_center() - egui::vec2(TOOLTIP_GAP, 0.0))
        .interactable(false)
        .show(ui.ctx(), |ui| {
            Frame::popup(ui.style()).show(ui, |ui| {
                ui.label(text);
            });
        });
}
