use eframe::NativeOptions;

const DESKTOP_SIZE: [f32; 2] = [720.0, 520.0];
const MOBILE_SIZE: [f32; 2] = [405.0, 915.0];

pub fn generate_native_options() -> NativeOptions {
    generate_native_options_with_size(DESKTOP_SIZE)
}

/// A phone sized window, for looking at the inline layout
pub fn generate_mobile_emulator_native_options() -> NativeOptions {
    generate_native_options_with_size(MOBILE_SIZE)
}

fn generate_native_options_with_size(size: [f32; 2]) -> NativeOptions {
    NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("qashare")
            .with_inner_size(size),
        ..Default::default()
    }
}
