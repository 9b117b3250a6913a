use qashare::{DataPath, DataPathType, ShareArgs, ShareOptions};
use qashare_chrome::{setup, QaShareApp};
use tracing_subscriber::EnvFilter;

fn setup_logging(path: &DataPath) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_appender::{
        non_blocking,
        rolling::{RollingFileAppender, Rotation},
    };
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let file_appender = RollingFileAppender::new(
        Rotation::DAILY,
        path.path(DataPathType::Log),
        format!("qashare-{}.log", env!("CARGO_PKG_VERSION")),
    );

    let (non_blocking_writer, guard) = non_blocking(file_appender);

    // Log to stdout (if you run with `RUST_LOG=debug`).
    let console_layer = fmt::layer().with_target(true).with_writer(std::io::stdout);

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(non_blocking_writer);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("qashare=info"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(env_filter)
        .init();

    guard
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    // the log directory has to be known before anything else logs
    let (parsed, _) = ShareArgs::parse(&args);
    let path = match &parsed.datapath {
        Some(datapath) => DataPath::new(datapath),
        None => DataPath::default(),
    };

    let _guard = setup_logging(&path);

    let native_options = if parsed.options.contains(ShareOptions::Mobile) {
        setup::generate_mobile_emulator_native_options()
    } else {
        setup::generate_native_options()
    };

    let res = eframe::run_native(
        "qashare",
        native_options,
        Box::new(move |cc| Ok(Box::new(QaShareApp::new(&cc.egui_ctx, path, &args)))),
    );

    if let Err(err) = res {
        tracing::error!("qashare exited with an error: {err}");
    }
}
