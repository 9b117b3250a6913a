//! Collaborators backed by the egui context. Both go through platform
//! output, so the integration (eframe, web) decides what really happens.

use qashare::{AppLauncher, Clipboard, ClipboardError, LaunchError};

#[derive(Clone)]
pub struct EguiClipboard {
    ctx: egui::Context,
}

impl EguiClipboard {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl Clipboard for EguiClipboard {
    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        tracing::debug!("copying '{text}' through egui");
        self.ctx.copy_text(text.to_owned());
        Ok(())
    }
}

#[derive(Clone)]
pub struct EguiLauncher {
    ctx: egui::Context,
}

impl EguiLauncher {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl AppLauncher for EguiLauncher {
    fn open_in_new_context(&mut self, url: &str) -> Result<(), LaunchError> {
        if url.is_empty() {
            tracing::error!("refusing to open an empty url");
            return Err(LaunchError::NoHandler(url.to_owned()));
        }

        self.ctx.open_url(egui::OpenUrl::new_tab(url));
        Ok(())
    }
}
