pub mod agent;
pub mod app;
pub mod components;
pub mod event;
pub mod i18n;
pub mod logging;
pub mod panels;
pub mod tui;
pub mod ui;

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use crossterm::event::EventStream;
use futures_util::StreamExt;
use log::{error, info, warn};

use agent::host::ENV_HOST_CONFIG;
use agent::{AgentSettings, HostConfig};
use app::App;
use event::Event;
use tui::Tui;
use ui::render;

#[tokio::main]
async fn main() -> Result<()> {
    let workspace_root = env::current_dir().context("failed to resolve working directory")?;
    let settings = AgentSettings::load(&workspace_root)?.apply_env(|key| env::var(key).ok());
    logging::init(&workspace_root, &settings)?;
    info!("Starting agente in {}", workspace_root.display());

    let host_config = host_config_path().and_then(|path| match HostConfig::load(&path) {
        Ok(config) => {
            info!("Loaded host config from {}", path.display());
            Some(config)
        }
        Err(err) => {
            warn!("{:#}", err);
            None
        }
    });

    let app = App::new(settings, host_config);

    let mut tui = tui::init()?;
    let result = run(&mut tui, app).await;
    tui::restore()?;
    if let Err(err) = &result {
        error!("UI loop failed: {:#}", err);
    }
    info!("agente stopped");
    result
}

/// First command-line argument, else the environment.
fn host_config_path() -> Option<PathBuf> {
    env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| env::var_os(ENV_HOST_CONFIG).map(PathBuf::from))
}

async fn run(tui: &mut Tui, mut app: App) -> Result<()> {
    let mut stream = EventStream::new();
    let mut interval = tokio::time::interval(app.settings.tick_rate());

    while !app.should_quit {
        tui.draw(|frame| render(frame, &mut app))?;

        let event = tokio::select! {
            _ = interval.tick() => Event::Tick,
            maybe_event = stream.next() => {
                match maybe_event {
                    Some(Ok(raw)) => match Event::from_crossterm(raw) {
                        Some(event) => event,
                        None => continue,
                    },
                    Some(Err(err)) => {
                        error!("Terminal event stream failed: {}", err);
                        break;
                    }
                    None => break,
                }
            }
        };

        match event {
            Event::Tick => app.on_tick(),
            Event::Key(key) => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            Event::Resize(..) => {}
        }
    }
    Ok(())
}
