mod clipboard;
mod qr_texture;
mod share_button;

pub use clipboard::{EguiClipboard, EguiLauncher};
pub use qr_texture::qr_texture;
pub use share_button::{ShareButton, ShareHost, QR_POLL_INTERVAL};
