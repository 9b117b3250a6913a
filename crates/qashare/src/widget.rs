use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::i18n::keys;
use crate::{
    AppLauncher, Clipboard, IntlKey, NativeShare, OneShotTimer, QrGenerator, QrImage, QrRequests,
    Session, SessionUser, ShareHint, ShareMode, ShareOrigin, SharePayload, ShareProps,
    ShareSettings, ShareUrl,
};

/// How long the "copied" tooltip stays up before the menu closes itself
pub const COPIED_TOOLTIP_DURATION: Duration = Duration::from_millis(1000);

/// Transient presentation state. Nothing here outlives the widget.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub menu_open: bool,
    pub tooltip_visible: bool,
    pub native_share_available: bool,
    pub qr_image: Option<QrImage>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ShareLayout {
    /// A toggle that opens a dropdown holding the items
    Dropdown,
    /// Bare items; the host supplies the container
    Inline,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MenuItem {
    Copy,
    MessagingApp,
    NativeShare,
    QrCode { size: u32 },
}

impl MenuItem {
    pub fn label_key(&self) -> IntlKey<'static> {
        match self {
            MenuItem::Copy => keys::SHARE_COPY,
            MenuItem::MessagingApp => keys::SHARE_WECHAT_APP,
            MenuItem::NativeShare => keys::SHARE_VIA,
            MenuItem::QrCode { .. } => keys::SHARE_WECHAT,
        }
    }
}

/// Headless share menu for one question or answer.
///
/// Owns the derived link, the transient [`UiState`], the auto-close timer
/// and the in-flight QR generations. Renderers drive it once per frame:
/// [`ShareWidget::sync_session`], [`ShareWidget::poll_qr`] and
/// [`ShareWidget::tick`], then forward user gestures to the action methods.
pub struct ShareWidget {
    props: ShareProps,
    origin: ShareOrigin,
    session: Box<dyn Session>,
    user: Option<SessionUser>,
    url: ShareUrl,

    site_name: String,
    messaging_app_url: String,

    state: UiState,
    probed: bool,
    close_timer: OneShotTimer,
    qr: QrRequests,
}

impl ShareWidget {
    pub fn new(
        props: ShareProps,
        origin: ShareOrigin,
        session: Box<dyn Session>,
        generator: Arc<dyn QrGenerator>,
    ) -> Self {
        let settings = ShareSettings::default();
        let user = session.current_user();
        let url = ShareUrl::compose(&origin, &props.target, user.as_ref());

        let mut widget = Self {
            props,
            origin,
            session,
            user,
            url,
            site_name: settings.site_name,
            messaging_app_url: settings.messaging_app_url,
            state: UiState::default(),
            probed: false,
            close_timer: OneShotTimer::new(),
            qr: QrRequests::new(generator),
        };

        widget.qr.request(&widget.url);
        widget
    }

    /// Take the site name and messaging app address from settings
    pub fn with_settings(mut self, settings: &ShareSettings) -> Self {
        self.site_name = settings.site_name.clone();
        self.messaging_app_url = settings.messaging_app_url.clone();
        self
    }

    pub fn props(&self) -> &ShareProps {
        &self.props
    }

    pub fn url(&self) -> &ShareUrl {
        &self.url
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn mode(&self) -> ShareMode {
        self.props.mode
    }

    pub fn layout(&self) -> ShareLayout {
        match self.props.mode {
            ShareMode::Normal => ShareLayout::Dropdown,
            ShareMode::Mobile => ShareLayout::Inline,
        }
    }

    /// The items to draw, in order
    pub fn menu_items(&self) -> Vec<MenuItem> {
        let mut items = vec![MenuItem::Copy, MenuItem::MessagingApp];

        if self.state.native_share_available {
            items.push(MenuItem::NativeShare);
        }

        if self.state.qr_image.is_some() {
            items.push(MenuItem::QrCode {
                size: self.props.mode.qr_display_size(),
            });
        }

        items
    }

    /// Replace the props, e.g. when the host navigates to another item
    pub fn set_props(&mut self, props: ShareProps) {
        if self.props == props {
            return;
        }

        self.props = props;
        self.recompute_url();
    }

    /// Re-read the signed in user; a change re-derives the link
    pub fn sync_session(&mut self) {
        let user = self.session.current_user();
        if user == self.user {
            return;
        }

        self.user = user;
        self.recompute_url();
    }

    fn recompute_url(&mut self) {
        let url = ShareUrl::compose(&self.origin, &self.props.target, self.user.as_ref());
        if url == self.url {
            return;
        }

        tracing::debug!("share url changed: {} -> {}", self.url, url);
        self.url = url;

        if self
            .state
            .qr_image
            .as_ref()
            .is_some_and(|img| img.text() != self.url.as_str())
        {
            self.state.qr_image = None;
        }

        self.qr.request(&self.url);
    }

    /// Ask the platform once whether it has a share sheet. Later calls are
    /// ignored.
    pub fn probe_native_share(&mut self, native: &dyn NativeShare) {
        if self.probed {
            return;
        }

        self.probed = true;
        self.state.native_share_available = native.supports_share(&ShareHint::default());
    }

    pub fn has_probed(&self) -> bool {
        self.probed
    }

    pub fn open_menu(&mut self) {
        self.state.menu_open = true;
    }

    pub fn toggle_menu(&mut self) {
        if self.state.menu_open {
            self.close();
        } else {
            self.open_menu();
        }
    }

    /// Hide the tooltip and close the menu. Any pending auto-close is
    /// cancelled.
    pub fn close(&mut self) {
        self.state.tooltip_visible = false;
        self.state.menu_open = false;
        self.close_timer.cancel();
    }

    pub fn copy_text(&self) -> String {
        self.url.copy_text(&self.props.title)
    }

    fn copy_and_confirm(&mut self, clipboard: &mut dyn Clipboard, now: Instant) {
        if clipboard.write(&self.copy_text()).is_err() {
            return;
        }

        self.state.tooltip_visible = true;
        self.close_timer.arm(now, COPIED_TOOLTIP_DURATION);
    }

    /// Copy the link. On success the tooltip shows and the menu closes
    /// itself after [`COPIED_TOOLTIP_DURATION`]. Failures change nothing.
    pub fn copy(&mut self, clipboard: &mut dyn Clipboard, now: Instant) {
        self.copy_and_confirm(clipboard, now);
    }

    /// Copy the link, then hand off to the messaging app so the user can
    /// paste it there
    pub fn share_to_messaging_app(
        &mut self,
        clipboard: &mut dyn Clipboard,
        launcher: &mut dyn AppLauncher,
        now: Instant,
    ) {
        self.copy_and_confirm(clipboard, now);
        if let Err(err) = launcher.open_in_new_context(&self.messaging_app_url) {
            tracing::debug!("messaging app not opened: {err}");
        }
    }

    pub fn native_share_payload(&self) -> SharePayload {
        SharePayload {
            title: self.props.title.clone(),
            text: format!("{} - {}：", self.props.title, self.site_name),
            url: self.url.to_string(),
        }
    }

    /// Hand the link to the platform share sheet. No-op when the probe
    /// found no share sheet.
    pub fn native_share(&mut self, native: &mut dyn NativeShare) {
        if !self.state.native_share_available {
            return;
        }

        native.share(self.native_share_payload());
    }

    /// Fire the auto-close timer if due. Returns how long until it fires
    /// otherwise.
    pub fn tick(&mut self, now: Instant) -> Option<Duration> {
        if self.close_timer.fire(now) {
            self.close();
        }

        self.close_timer.remaining(now)
    }

    /// Pick up finished QR generations. Returns true when the image changed.
    pub fn poll_qr(&mut self) -> bool {
        match self.qr.poll(&self.url) {
            Some(img) => {
                self.state.qr_image = Some(img);
                true
            }
            None => false,
        }
    }

    pub fn qr_pending(&self) -> bool {
        self.qr.is_pending()
    }

    /// Block until all QR generations finish, then poll. Headless hosts and
    /// tests only.
    pub fn wait_for_qr(&mut self) -> bool {
        self.qr.wait_for_pending();
        self.poll_qr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{MemoryClipboard, RecordingLauncher, RecordingShare};
    use crate::{AnonymousSession, QrCodeGenerator, QrError, QrOptions, SharedSession, ShareTarget};
    use pretty_assertions::assert_eq;

    const ORIGIN: &str = "https://answer.example.org";

    struct TinyGenerator;

    impl QrGenerator for TinyGenerator {
        fn generate(&self, text: &str, _opts: QrOptions) -> Result<QrImage, QrError> {
            Ok(QrImage::new(text, image::RgbaImage::new(1, 1)))
        }
    }

    struct BrokenGenerator;

    impl QrGenerator for BrokenGenerator {
        fn generate(&self, _text: &str, _opts: QrOptions) -> Result<QrImage, QrError> {
            Err(QrError::Encode("nope".to_owned()))
        }
    }

    fn origin() -> ShareOrigin {
        ShareOrigin::parse(ORIGIN).unwrap()
    }

    fn widget(props: ShareProps, session: Box<dyn Session>) -> ShareWidget {
        ShareWidget::new(props, origin(), session, Arc::new(TinyGenerator))
    }

    fn question(title: &str) -> ShareProps {
        ShareProps::new(ShareTarget::question("42"), title)
    }

    #[test]
    fn anonymous_question_copies_bare_link() {
        let mut w = widget(question(""), Box::new(AnonymousSession));
        let mut clipboard = MemoryClipboard::default();

        w.copy(&mut clipboard, Instant::now());

        assert_eq!(
            clipboard.last(),
            Some("https://answer.example.org/questions/42")
        );
    }

    #[test]
    fn signed_in_answer_copies_title_and_referral_link() {
        let session = SharedSession::new(Some(SessionUser::new("1", "alice")));
        let props = ShareProps::new(ShareTarget::answer("42", "7"), "Hello");
        let mut w = widget(props, Box::new(session));
        let mut clipboard = MemoryClipboard::default();

        assert_eq!(
            w.url().as_str(),
            "https://answer.example.org/questions/42/7?share=alice"
        );

        w.copy(&mut clipboard, Instant::now());
        assert_eq!(
            clipboard.last(),
            Some("Hello https://answer.example.org/questions/42/7?share=alice")
        );
    }

    #[test]
    fn copied_tooltip_closes_menu_after_a_second() {
        let start = Instant::now();
        let mut w = widget(question("Hello"), Box::new(AnonymousSession));
        let mut clipboard = MemoryClipboard::default();

        w.open_menu();
        w.copy(&mut clipboard, start);
        assert!(w.state().tooltip_visible);
        assert!(w.state().menu_open);

        assert_eq!(
            w.tick(start + Duration::from_millis(999)),
            Some(Duration::from_millis(1))
        );
        assert!(w.state().tooltip_visible);
        assert!(w.state().menu_open);

        assert_eq!(w.tick(start + COPIED_TOOLTIP_DURATION), None);
        assert!(!w.state().tooltip_visible);
        assert!(!w.state().menu_open);
    }

    #[test]
    fn failed_copy_changes_nothing() {
        let start = Instant::now();
        let mut w = widget(question("Hello"), Box::new(AnonymousSession));
        let mut clipboard = MemoryClipboard::failing();

        w.open_menu();
        w.copy(&mut clipboard, start);

        assert!(!w.state().tooltip_visible);
        assert_eq!(w.tick(start), None);
        assert!(w.state().menu_open);
    }

    #[test]
    fn messaging_app_copies_then_opens_app() {
        let start = Instant::now();
        let mut w = widget(question("Hello"), Box::new(AnonymousSession));
        let mut clipboard = MemoryClipboard::default();
        let mut launcher = RecordingLauncher::default();

        w.open_menu();
        w.share_to_messaging_app(&mut clipboard, &mut launcher, start);

        assert_eq!(
            clipboard.last(),
            Some("Hello https://answer.example.org/questions/42")
        );
        assert_eq!(launcher.opened(), &["weixin://".to_owned()]);
        assert!(w.state().tooltip_visible);

        w.tick(start + COPIED_TOOLTIP_DURATION);
        assert!(!w.state().menu_open);
        assert!(!w.state().tooltip_visible);
    }

    #[test]
    fn messaging_app_failures_are_silent() {
        let mut w = widget(question("Hello"), Box::new(AnonymousSession));
        let mut clipboard = MemoryClipboard::failing();
        let mut launcher = RecordingLauncher::failing();

        w.share_to_messaging_app(&mut clipboard, &mut launcher, Instant::now());
        assert!(!w.state().tooltip_visible);
    }

    #[test]
    fn launcher_failure_keeps_copy_confirmation() {
        let start = Instant::now();
        let mut w = widget(question("Hello"), Box::new(AnonymousSession));
        let mut clipboard = MemoryClipboard::default();
        let mut launcher = RecordingLauncher::failing();

        w.open_menu();
        w.share_to_messaging_app(&mut clipboard, &mut launcher, start);

        assert!(launcher.opened().is_empty());
        assert_eq!(
            clipboard.last(),
            Some("Hello https://answer.example.org/questions/42")
        );
        assert!(w.state().tooltip_visible);
        assert!(w.state().menu_open);
        assert_eq!(w.tick(start), Some(COPIED_TOOLTIP_DURATION));
    }

    #[test]
    fn messaging_app_url_comes_from_settings() {
        let settings = ShareSettings {
            messaging_app_url: "line://".to_owned(),
            ..ShareSettings::default()
        };
        let mut w = widget(question(""), Box::new(AnonymousSession)).with_settings(&settings);
        let mut launcher = RecordingLauncher::default();

        w.share_to_messaging_app(
            &mut MemoryClipboard::default(),
            &mut launcher,
            Instant::now(),
        );
        assert_eq!(launcher.opened(), &["line://".to_owned()]);
    }

    #[test]
    fn native_share_item_follows_probe() {
        let mut w = widget(question("Hello"), Box::new(AnonymousSession));
        assert!(!w.menu_items().contains(&MenuItem::NativeShare));

        w.probe_native_share(&crate::NoNativeShare);
        assert!(w.has_probed());
        assert!(!w.menu_items().contains(&MenuItem::NativeShare));

        let mut w = widget(question("Hello"), Box::new(AnonymousSession));
        let share = RecordingShare::new(true);
        w.probe_native_share(&share);
        w.probe_native_share(&share);
        assert_eq!(share.probes(), 1);
        assert_eq!(
            w.menu_items(),
            vec![MenuItem::Copy, MenuItem::MessagingApp, MenuItem::NativeShare]
        );
    }

    #[test]
    fn native_share_hands_over_payload() {
        let mut w = widget(question("Hello"), Box::new(AnonymousSession));
        let mut share = RecordingShare::new(true);

        // nothing happens before the probe says yes
        w.native_share(&mut share);
        assert!(share.shared().is_empty());

        w.probe_native_share(&share);
        w.native_share(&mut share);
        assert_eq!(
            share.shared(),
            &[SharePayload {
                title: "Hello".to_owned(),
                text: "Hello - Answer：".to_owned(),
                url: "https://answer.example.org/questions/42".to_owned(),
            }]
        );
    }

    #[test]
    fn close_hides_tooltip_and_cancels_timer() {
        let start = Instant::now();
        let mut w = widget(question(""), Box::new(AnonymousSession));
        w.open_menu();
        w.copy(&mut MemoryClipboard::default(), start);

        w.close();
        assert!(!w.state().menu_open);
        assert!(!w.state().tooltip_visible);

        // reopening must not be closed by the stale timer
        w.open_menu();
        w.tick(start + Duration::from_secs(5));
        assert!(w.state().menu_open);
    }

    #[test]
    fn toggle_opens_and_closes() {
        let mut w = widget(question(""), Box::new(AnonymousSession));
        w.toggle_menu();
        assert!(w.state().menu_open);
        w.toggle_menu();
        assert!(!w.state().menu_open);
    }

    #[test]
    fn mobile_renders_inline() {
        let w = widget(
            question("").mode(ShareMode::Mobile),
            Box::new(AnonymousSession),
        );
        assert_eq!(w.layout(), ShareLayout::Inline);

        let w = widget(question(""), Box::new(AnonymousSession));
        assert_eq!(w.layout(), ShareLayout::Dropdown);
    }

    #[test]
    fn session_change_rederives_link_and_qr() {
        let session = SharedSession::default();
        let mut w = widget(question(""), Box::new(session.clone()));
        assert!(w.wait_for_qr());
        assert_eq!(
            w.state().qr_image.as_ref().map(|i| i.text()),
            Some("https://answer.example.org/questions/42")
        );

        session.sign_in(SessionUser::new("9", "bob"));
        w.sync_session();
        assert_eq!(
            w.url().as_str(),
            "https://answer.example.org/questions/42?share=bob"
        );
        // the old bitmap encodes the old link and must not be shown
        assert_eq!(w.state().qr_image, None);

        assert!(w.wait_for_qr());
        assert_eq!(
            w.state().qr_image.as_ref().map(|i| i.text()),
            Some("https://answer.example.org/questions/42?share=bob")
        );
    }

    #[test]
    fn unchanged_session_does_not_regenerate() {
        let mut w = widget(question(""), Box::new(AnonymousSession));
        w.wait_for_qr();
        w.sync_session();
        assert!(!w.qr_pending());
    }

    #[test]
    fn set_props_rederives_link() {
        let mut w = widget(question(""), Box::new(AnonymousSession));
        w.set_props(ShareProps::new(ShareTarget::answer("42", "7"), ""));
        assert_eq!(w.url().as_str(), "https://answer.example.org/questions/42/7");
        assert!(w.qr_pending());
    }

    #[test]
    fn qr_item_uses_mode_size() {
        let mut w = ShareWidget::new(
            question("").mode(ShareMode::Mobile),
            origin(),
            Box::new(AnonymousSession),
            Arc::new(QrCodeGenerator),
        );
        assert!(w.wait_for_qr());
        assert_eq!(
            w.menu_items().last(),
            Some(&MenuItem::QrCode { size: 120 })
        );
        assert_eq!(w.state().qr_image.as_ref().map(|i| i.size()), Some(160));
    }

    #[test]
    fn qr_failure_shows_no_image() {
        let mut w = ShareWidget::new(
            question(""),
            origin(),
            Box::new(AnonymousSession),
            Arc::new(BrokenGenerator),
        );
        assert!(!w.wait_for_qr());
        assert_eq!(w.menu_items(), vec![MenuItem::Copy, MenuItem::MessagingApp]);
    }
}
