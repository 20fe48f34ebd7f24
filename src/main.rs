use color_eyre::{eyre::eyre, Result};
use hotasbind::config::AppConfig;
use hotasbind::controller::sampler::DeviceSampler;
use hotasbind::persistence::PersistenceWorker;
use hotasbind::ui::HotasBindUI;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let config_path = match AppConfig::default_path() {
        Ok(path) => Some(path),
        Err(e) => {
            warn!("Settings will not be saved: {}", e);
            None
        }
    };
    let config = match &config_path {
        Some(path) => AppConfig::load_or_init_at(path).await,
        None => AppConfig::default(),
    };

    let worker = PersistenceWorker::spawn();
    let file_sender = worker.get_sender();

    info!("Initializing joystick input");
    let sampler = DeviceSampler::with_gilrs()
        .map_err(|e| eyre!("Failed to start joystick input: {}", e))?
        .initialize();

    info!("Starting UI");
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("HOTAS Binding")
            .with_inner_size([1100.0, 720.0]),
        ..Default::default()
    };

    eframe::run_native(
        "HotasBind",
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(HotasBindUI::new(
                cc,
                sampler,
                config,
                config_path,
                file_sender,
            )))
        }),
    )
    .map_err(|e| eyre!("UI terminated with error: {}", e))?;

    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|value| value.parse::<Level>().ok())
        .unwrap_or(Level::INFO);

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}
