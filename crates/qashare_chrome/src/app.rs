use std::sync::Arc;

use qashare::{
    Clipboard, DataPath, Localization, NativeShare, QrCodeGenerator, Session, SessionUser,
    SettingsHandler, ShareArgs, ShareKind, ShareMode, ShareOptions, ShareProps, ShareTarget,
    ShareWidget, SharedSession,
};
use qashare_ui::{EguiClipboard, ShareButton, ShareHost};
use tracing::{error, info, warn};

use crate::platform::{MailShare, OpenerLauncher, SystemClipboard};

const DEMO_QUESTION: &str = "1";

/// Demo host: one item rendered both as a dropdown and inline
pub struct QaShareApp {
    i18n: Localization,
    session: SharedSession,
    demo_user: SessionUser,
    settings: SettingsHandler,
    options: ShareOptions,
    normal: ShareWidget,
    mobile: ShareWidget,
    clipboard: Box<dyn Clipboard>,
    launcher: OpenerLauncher,
    native: Box<dyn NativeShare>,
}

impl QaShareApp {
    pub fn new(ctx: &egui::Context, data_path: DataPath, args: &[String]) -> Self {
        let (parsed_args, unrecognized_args) = ShareArgs::parse(args);
        if !unrecognized_args.is_empty() {
            warn!("unrecognized args: {:?}", unrecognized_args);
        }

        let data_path = parsed_args
            .datapath
            .as_ref()
            .map(DataPath::new)
            .unwrap_or(data_path);

        let settings = SettingsHandler::new(&data_path).load();
        let origin = parsed_args
            .origin
            .clone()
            .unwrap_or_else(|| settings.settings().share_origin());

        let mut i18n = Localization::new();
        let wanted = match parsed_args.locale.clone() {
            Some(locale) => Some(locale),
            None => match settings.settings().locale.parse() {
                Ok(locale) => Some(locale),
                Err(err) => {
                    error!("bad locale in settings: {err}");
                    None
                }
            },
        };
        if let Some(wanted) = wanted {
            let locale = i18n.negotiate_locale(&[wanted]);
            if let Err(err) = i18n.set_locale(locale) {
                error!("{err}");
            }
        }

        let options = parsed_args.options;
        if options.contains(ShareOptions::LightTheme) {
            ctx.set_visuals(egui::Visuals::light());
        } else {
            ctx.set_visuals(egui::Visuals::dark());
        }

        let demo_user = parsed_args
            .user
            .clone()
            .unwrap_or_else(|| SessionUser::new("1", "demo"));
        let session = SharedSession::new(parsed_args.user.clone());

        let props = Self::props_from_args(&parsed_args);
        info!("sharing {} from {origin}", props.target.path());

        let generator = Arc::new(QrCodeGenerator);
        let normal = ShareWidget::new(
            props.clone().class_name("demo-normal"),
            origin.clone(),
            Box::new(session.clone()),
            generator.clone(),
        )
        .with_settings(settings.settings());
        let mobile = ShareWidget::new(
            props.class_name("demo-mobile").mode(ShareMode::Mobile),
            origin,
            Box::new(session.clone()),
            generator,
        )
        .with_settings(settings.settings());

        let clipboard: Box<dyn Clipboard> = match SystemClipboard::new() {
            Ok(clipboard) => Box::new(clipboard),
            Err(err) => {
                warn!("{err}, falling back to the egui clipboard");
                Box::new(EguiClipboard::new(ctx.clone()))
            }
        };

        let native = MailShare::new(options.contains(ShareOptions::NativeShare));

        Self {
            i18n,
            session,
            demo_user,
            settings,
            options,
            normal,
            mobile,
            clipboard,
            launcher: OpenerLauncher,
            native: Box::new(native),
        }
    }

    fn props_from_args(args: &ShareArgs) -> ShareProps {
        let qid = args.question.clone().unwrap_or(DEMO_QUESTION.to_owned());
        let kind = if args.answer.is_some() {
            ShareKind::Answer
        } else {
            ShareKind::Question
        };

        let target = match ShareTarget::from_parts(kind, qid, args.answer.clone()) {
            Ok(target) => target,
            Err(err) => {
                error!("{err}, sharing question {DEMO_QUESTION} instead");
                ShareTarget::question(DEMO_QUESTION)
            }
        };

        ShareProps::new(target, args.title.clone().unwrap_or_default())
    }

    pub fn normal(&self) -> &ShareWidget {
        &self.normal
    }

    pub fn mobile(&self) -> &ShareWidget {
        &self.mobile
    }

    pub fn i18n(&self) -> &Localization {
        &self.i18n
    }

    fn session_panel(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut signed_in = self.session.current_user().is_some();
            let label = format!("Signed in as {}", self.demo_user.username);
            if ui.checkbox(&mut signed_in, label).changed() {
                if signed_in {
                    self.session.sign_in(self.demo_user.clone());
                } else {
                    self.session.sign_out();
                }
            }

            ui.separator();

            let current = self.i18n.get_current_locale().clone();
            let mut selected = current.clone();
            egui::ComboBox::from_id_salt("locale")
                .selected_text(self.i18n.get_locale_native_name(&current).unwrap_or("?"))
                .show_ui(ui, |ui| {
                    for locale in self.i18n.get_available_locales() {
                        let name = self
                            .i18n
                            .get_locale_native_name(locale)
                            .unwrap_or("?")
                            .to_owned();
                        ui.selectable_value(&mut selected, locale.clone(), name);
                    }
                });

            if selected != current {
                match self.i18n.set_locale(selected.clone()) {
                    Ok(()) => self.settings.set_locale(selected.to_string()),
                    Err(err) => error!("{err}"),
                }
            }
        });
    }

    fn show_share(ui: &mut egui::Ui, widget: &mut ShareWidget, app: &mut Collaborators) {
        let host = ShareHost {
            clipboard: app.clipboard.as_mut(),
            launcher: &mut *app.launcher,
            native: app.native.as_mut(),
        };
        ShareButton::new(widget, &mut *app.i18n, host).show(ui);
    }
}

struct Collaborators<'a> {
    i18n: &'a mut Localization,
    clipboard: &'a mut Box<dyn Clipboard>,
    launcher: &'a mut OpenerLauncher,
    native: &'a mut Box<dyn NativeShare>,
}

impl eframe::App for QaShareApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("session").show(ctx, |ui| {
            self.session_panel(ui);
        });

        let mobile_only = self.options.contains(ShareOptions::Mobile);
        let debug = self.options.contains(ShareOptions::Debug);

        egui::CentralPanel::default().show(ctx, |ui| {
            let mut app = Collaborators {
                i18n: &mut self.i18n,
                clipboard: &mut self.clipboard,
                launcher: &mut self.launcher,
                native: &mut self.native,
            };

            ui.heading(self.normal.props().title.as_str());

            if !mobile_only {
                ui.label(egui::RichText::new("normal").weak());
                Self::show_share(ui, &mut self.normal, &mut app);
                ui.separator();
            }

            ui.label(egui::RichText::new("mobile").weak());
            Self::show_share(ui, &mut self.mobile, &mut app);

            if debug {
                ui.separator();
                ui.monospace(self.normal.url().as_str());
                ui.monospace(format!("{:?}", self.normal.state().menu_open));
            }
        });
    }
}
