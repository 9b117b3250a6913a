use qashare::QrImage;

#[derive(Clone)]
struct CachedQr {
    text: String,
    handle: egui::TextureHandle,
}

/// Upload `img` once per encoded link. The handle is kept in the context's
/// temp data under `id`; a bitmap for a different link replaces it.
#[profiling::function]
pub fn qr_texture(ctx: &egui::Context, id: egui::Id, img: &QrImage) -> egui::TextureHandle {
    let cached = ctx.data(|d| d.get_temp::<CachedQr>(id));
    if let Some(cached) = cached.filter(|c| c.text == img.text()) {
        return cached.handle;
    }

    let size = [img.image().width() as usize, img.image().height() as usize];
    let color = egui::ColorImage::from_rgba_unmultiplied(size, img.rgba());
    let handle = ctx.load_texture(
        format!("qashare-qr:{}", img.text()),
        color,
        egui::TextureOptions::NEAREST,
    );

    tracing::trace!("uploaded qr texture for {}", img.text());
    ctx.data_mut(|d| {
        d.insert_temp(
            id,
            CachedQr {
                text: img.text().to_owned(),
                handle: handle.clone(),
            },
        )
    });

    handle
}

#[cfg(test)]
mod tests {
    use super::*;

    fn img(text: &str) -> QrImage {
        QrImage::new(text, image::RgbaImage::new(4, 4))
    }

    #[test]
    fn uploads_once_per_link() {
        let ctx = egui::Context::default();
        let id = egui::Id::new("qr");

        let a = qr_texture(&ctx, id, &img("https://a.example/questions/1"));
        let again = qr_texture(&ctx, id, &img("https://a.example/questions/1"));
        assert_eq!(a.id(), again.id());
        assert_eq!(a.size(), [4, 4]);

        let b = qr_texture(&ctx, id, &img("https://a.example/questions/2"));
        assert_ne!(a.id(), b.id());
    }
}
