#![forbid(unsafe_code)]

//! Animated braille demo.
//!
//! Sizes a surface from the terminal (or `--size`), then loops: render the
//! scene, present it, advance the animation. SIGINT and SIGTERM end the loop
//! and the screen is restored before exit.

pub mod cli;
pub mod error;
pub mod scene;

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use brl_render::presenter::Presenter;
use brl_render::surface::Surface;
use brl_tty::TeardownGuard;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

pub use cli::{CellSize, Cli};
pub use error::{DemoError, Result};
pub use scene::Scene;

/// Environment variable holding the log filter, e.g. `BRL_LOG=debug`.
pub const LOG_ENV: &str = "BRL_LOG";

pub fn run_from_env() -> Result<()> {
    run(Cli::parse())
}

pub fn run(cli: Cli) -> Result<()> {
    init_logging();

    let sprite = cli.bitmap.as_deref().map(brl_bmp::load).transpose()?;
    let (cols, rows) = match cli.size {
        Some(CellSize { cols, rows }) => (cols, rows),
        None => brl_tty::terminal_size().map_err(DemoError::Terminal)?,
    };
    info!(cols, rows, frames = cli.frames, "starting demo");

    let stop = Arc::new(AtomicBool::new(false));
    let _signals = SignalGuard::new(Arc::clone(&stop))?;

    let mut surface = Surface::new(cols, rows);
    let mut presenter = Presenter::new(io::stdout());
    let guard = TeardownGuard::new(io::stdout());
    let mut scene = Scene::new(sprite);
    let frame_time = Duration::from_millis(cli.frame_ms);

    let mut shown = 0u64;
    while !stop.load(Ordering::Relaxed) && (cli.frames == 0 || shown < cli.frames) {
        scene.render(&mut surface);
        let stats = presenter.present(&surface).map_err(DemoError::Output)?;
        debug!(frame = shown, bytes = stats.bytes, "frame presented");
        scene.step();
        shown += 1;
        thread::sleep(frame_time);
    }

    info!(frames = shown, "demo finished");
    guard.finish().map_err(DemoError::Output)
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));
    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Flips the shared stop flag on SIGINT or SIGTERM.
#[cfg(unix)]
struct SignalGuard {
    handle: signal_hook::iterator::Handle,
    thread: Option<thread::JoinHandle<()>>,
}

#[cfg(unix)]
impl SignalGuard {
    fn new(stop: Arc<AtomicBool>) -> Result<Self> {
        use signal_hook::consts::signal::{SIGINT, SIGTERM};
        use signal_hook::iterator::Signals;

        let mut signals = Signals::new([SIGINT, SIGTERM])
            .map_err(|e| DemoError::Signal(io::Error::other(e)))?;
        let handle = signals.handle();
        let thread = thread::spawn(move || {
            for signal in signals.forever() {
                debug!(signal, "termination signal received");
                stop.store(true, Ordering::Relaxed);
            }
        });
        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

#[cfg(unix)]
impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(not(unix))]
struct SignalGuard;

#[cfg(not(unix))]
impl SignalGuard {
    fn new(_stop: Arc<AtomicBool>) -> Result<Self> {
        Ok(Self)
    }
}
