//! Harmony Blocks entry point
//!
//! Sets up the file log and config, then hands the game loop to macroquad.

use std::fs::OpenOptions;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use harmony_blocks::consts::LOG_FILE;
use harmony_blocks::platform::desktop;
use harmony_blocks::{GameConfig, GameError};

/// Append-only log file, `timestamp - LEVEL - message`
fn init_logging(path: &Path) -> Result<(), GameError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| GameError::LogSink {
            path: path.to_path_buf(),
            source,
        })?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                buf.timestamp_millis(),
                record.level(),
                record.args()
            )
        })
        .init();
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = init_logging(Path::new(LOG_FILE)) {
        eprintln!("{}", err);
        return ExitCode::FAILURE;
    }

    let config = match GameConfig::load() {
        Ok(config) => config,
        Err(err) => {
            log::error!("{}", err);
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);

    // Frame failures are handled inside the loop; a panic escaping here is
    // either window creation or something between frames
    let conf = desktop::window_conf(&config);
    let loop_started = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&loop_started);
    let result = panic::catch_unwind(AssertUnwindSafe(move || {
        macroquad::Window::from_config(conf, desktop::run(config, seed, flag));
    }));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => {
            let err = desktop::launch_failure(loop_started.load(Ordering::SeqCst));
            log::error!("{}", err);
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
