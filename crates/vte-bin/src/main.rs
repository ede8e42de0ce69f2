//! vte entrypoint.
use anyhow::Result;
use clap::Parser;
use core_actions::Editor;
use core_config::load_from;
use core_terminal::{CrosstermBackend, TerminalBackend};
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

mod input;
mod render;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "vte", version, about = "Modal line-oriented text editor")]
struct Args {
    /// Files to open, each into its own buffer. The last one is current.
    pub paths: Vec<PathBuf>,
    /// Configuration file path (overrides discovery of `vte.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join("vte.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, "vte.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(_) => Some(guard),
        // Global tracing subscriber already installed; drop guard so writer shuts down.
        Err(_) => None,
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

/// Build the editor and open every path given on the command line.
fn bootstrap(args: &Args, cols: u16, rows: u16) -> Result<Editor> {
    let config = load_from(args.config.clone())?;
    info!(
        target: "runtime",
        config_override = args.config.is_some(),
        files = args.paths.len(),
        "bootstrap"
    );
    let mut editor = Editor::new(config, cols, rows);
    for path in &args.paths {
        editor.open(path);
    }
    Ok(editor)
}

fn run(editor: &mut Editor, backend: &CrosstermBackend) -> Result<()> {
    let mut out = stdout();
    let (mut cols, mut rows) = backend.size()?;
    render::paint(&mut out, &editor.frame(), cols, rows)?;
    loop {
        let event = crossterm::event::read()?;
        let Some(input) = input::translate(&event) else {
            continue;
        };
        if let core_events::InputEvent::Resize(c, r) = input {
            (cols, rows) = (c, r);
        }
        let result = editor.handle(input);
        if result.quit {
            info!(target: "runtime", "quit");
            return Ok(());
        }
        if result.dirty {
            render::paint(&mut out, &editor.frame(), cols, rows)?;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");

    let mut backend = CrosstermBackend::new();
    backend.set_title("vte")?;
    let (cols, rows) = backend.size()?;
    let mut editor = bootstrap(&args, cols, rows)?;

    let outcome = {
        let mut guard = backend.enter_guard()?;
        run(&mut editor, guard.backend())
    };
    if let Err(e) = &outcome {
        error!(target: "runtime", error = %e, "runtime_error");
    }
    editor.shutdown();
    info!(target: "runtime", "shutdown");
    outcome
}
