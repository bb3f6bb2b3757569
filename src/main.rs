use chrono::Local;
use color_eyre::{eyre::eyre, Result};
use padshim::controller::GilrsSource;
use padshim::hotkey::{Hotkey, SessionContext, SessionFlags};
use padshim::mapping::{DeviceKind, LogicalButton, Port};
use padshim::DriverConfig;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let config = load_config()?;
    let source = GilrsSource::new().map_err(|e| eyre!("Failed to open controllers: {}", e))?;
    let mut driver = padshim::init(&config, Box::new(source))?;

    let mut session = SessionContext::new(SessionFlags::default());
    let mut held = [false; LogicalButton::ALL.len()];
    let mut ticker = tokio::time::interval(FRAME_INTERVAL);

    let mut frame_count = 0u64;
    let mut last_log_time = Local::now();
    let log_interval = chrono::Duration::seconds(10);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    info!("Running frame loop, press Ctrl-C to stop");
    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = &mut ctrl_c => {
                info!("Ctrl-C received, shutting down");
                break;
            }
        }

        driver.poll();
        frame_count += 1;

        for (idx, button) in LogicalButton::ALL.into_iter().enumerate() {
            let pressed = driver.is_pressed(Port::One, DeviceKind::Joypad, 0, button);
            if pressed != held[idx] {
                info!(
                    "Player 1 {} {}",
                    button,
                    if pressed { "pressed" } else { "released" }
                );
                held[idx] = pressed;
            }
        }

        let mode_before = session.flags.run_mode;
        for hotkey in Hotkey::ALL {
            if driver.check(&mut session, hotkey) {
                debug!("Frame {}: {}", driver.frame(), hotkey);
            }
        }
        if session.flags.run_mode != mode_before {
            info!("Run mode changed: {} -> {}", mode_before, session.flags.run_mode);
        }

        let now = Local::now();
        if now - last_log_time > log_interval {
            info!(
                "Frame loop stats: {} frames in last {} seconds (avg {:.2}/sec)",
                frame_count,
                log_interval.num_seconds(),
                frame_count as f64 / log_interval.num_seconds() as f64
            );
            frame_count = 0;
            last_log_time = now;
        }
    }

    driver.free();
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
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}

/// First CLI argument, else the per-user config path
fn load_config() -> Result<DriverConfig> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(DriverConfig::default_path);

    match path {
        Some(path) => Ok(DriverConfig::load(&path)?),
        None => {
            warn!("No config directory available, using defaults");
            Ok(DriverConfig::default())
        }
    }
}
