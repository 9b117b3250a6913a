use std::sync::Arc;

use poll_promise::Promise;

use super::{QrError, QrGenerator, QrImage, QrOptions};
use crate::ShareUrl;

struct PendingQr {
    /// The link this bitmap was requested for
    tag: ShareUrl,
    promise: Promise<Result<QrImage, QrError>>,
}

/// In-flight QR generations, each tagged with the link it encodes.
///
/// Completions can arrive in any order. Only a result whose tag matches the
/// link the caller currently shows is ever handed out.
pub struct QrRequests {
    generator: Arc<dyn QrGenerator>,
    options: QrOptions,
    pending: Vec<PendingQr>,
}

impl QrRequests {
    pub fn new(generator: Arc<dyn QrGenerator>) -> Self {
        Self {
            generator,
            options: QrOptions::default(),
            pending: Vec::new(),
        }
    }

    /// Start generating a bitmap for `url` on a background thread
    pub fn request(&mut self, url: &ShareUrl) {
        let generator = self.generator.clone();
        let options = self.options;
        let text = url.as_str().to_owned();

        tracing::debug!("requesting qr code for {}", url);
        let promise = Promise::spawn_thread("qashare-qr", move || {
            generator.generate(&text, options)
        });

        self.pending.push(PendingQr {
            tag: url.clone(),
            promise,
        });
    }

    /// Collect finished requests. Returns the newest successful bitmap for
    /// `current`, if one finished since the last poll. Stale results and
    /// failures are dropped.
    pub fn poll(&mut self, current: &ShareUrl) -> Option<QrImage> {
        let mut fresh = None;
        let mut still_pending = Vec::with_capacity(self.pending.len());

        for req in self.pending.drain(..) {
            let tag = req.tag;
            match req.promise.try_take() {
                Err(promise) => still_pending.push(PendingQr { tag, promise }),
                Ok(Err(err)) => {
                    tracing::debug!("qr generation for {tag} failed: {err}");
                }
                Ok(Ok(img)) if &tag == current => fresh = Some(img),
                Ok(Ok(_)) => {
                    tracing::trace!("discarding stale qr code for {tag}");
                }
            }
        }

        self.pending = still_pending;
        fresh
    }

    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Block until every in-flight request resolves. For headless hosts and
    /// tests; never call this from a frame.
    pub fn wait_for_pending(&self) {
        for req in &self.pending {
            req.promise.block_until_ready();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ShareOrigin, ShareTarget};
    use crossbeam_channel::{unbounded, Receiver, Sender};
    use std::sync::Mutex;

    fn url(qid: &str) -> ShareUrl {
        let origin = ShareOrigin::parse("https://answer.example.org").unwrap();
        ShareUrl::compose(&origin, &ShareTarget::question(qid), None)
    }

    /// Generates a 1x1 image per request, but only once the test releases it
    struct GatedGenerator {
        gates: Mutex<Vec<(String, Receiver<()>)>>,
    }

    impl GatedGenerator {
        fn new() -> Self {
            Self {
                gates: Mutex::new(vec![]),
            }
        }

        fn gate(&self, text: &str) -> Sender<()> {
            let (tx, rx) = unbounded();
            self.gates.lock().unwrap().push((text.to_owned(), rx));
            tx
        }
    }

    impl QrGenerator for GatedGenerator {
        fn generate(&self, text: &str, _opts: QrOptions) -> Result<QrImage, QrError> {
            let rx = {
                let gates = self.gates.lock().unwrap();
                gates
                    .iter()
                    .find(|(t, _)| t == text)
                    .map(|(_, rx)| rx.clone())
            };
            if let Some(rx) = rx {
                let _ = rx.recv();
            }
            Ok(QrImage::new(text, image::RgbaImage::new(1, 1)))
        }
    }

    struct FailingGenerator;

    impl QrGenerator for FailingGenerator {
        fn generate(&self, _text: &str, _opts: QrOptions) -> Result<QrImage, QrError> {
            Err(QrError::Encode("boom".to_owned()))
        }
    }

    #[test]
    fn out_of_order_completion_keeps_newest() {
        let gen = Arc::new(GatedGenerator::new());
        let first = url("1");
        let second = url("2");
        let release_first = gen.gate(first.as_str());
        let release_second = gen.gate(second.as_str());

        let mut reqs = QrRequests::new(gen.clone());
        reqs.request(&first);
        reqs.request(&second);
        assert_eq!(reqs.pending_count(), 2);

        // the newer request finishes first
        release_second.send(()).unwrap();
        let fresh = loop {
            if let Some(img) = reqs.poll(&second) {
                break img;
            }
            std::thread::yield_now();
        };
        assert_eq!(fresh.text(), second.as_str());
        assert_eq!(reqs.pending_count(), 1);

        // then the stale one lands and must be ignored
        release_first.send(()).unwrap();
        reqs.wait_for_pending();
        assert_eq!(reqs.poll(&second), None);
        assert!(!reqs.is_pending());
    }

    #[test]
    fn result_for_current_url_is_returned() {
        let mut reqs = QrRequests::new(Arc::new(GatedGenerator::new()));
        let current = url("42");
        reqs.request(&current);
        reqs.wait_for_pending();

        let img = reqs.poll(&current).expect("image");
        assert_eq!(img.text(), current.as_str());
        assert!(!reqs.is_pending());
    }

    #[test]
    fn failures_are_dropped_silently() {
        let mut reqs = QrRequests::new(Arc::new(FailingGenerator));
        let current = url("42");
        reqs.request(&current);
        reqs.wait_for_pending();

        assert_eq!(reqs.poll(&current), None);
        assert!(!reqs.is_pending());
    }
}
