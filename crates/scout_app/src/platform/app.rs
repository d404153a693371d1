use std::io::{self, BufRead};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use scout_core::{update, AppState, Msg, PositionId, UserId};
use scout_logging::{scout_info, scout_warn};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::input::{self, Command};
use super::render;

/// Everything the main loop reacts to, from any thread.
pub enum AppEvent {
    Dispatch(Msg),
    Line(String),
    InputClosed,
}

pub fn run_app(config: AppConfig) -> anyhow::Result<()> {
    let (app_tx, app_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(config.client_settings(), app_tx.clone())
        .context("failed to start the backend client")?;

    spawn_stdin_reader(app_tx.clone());
    spawn_poll_tick(app_tx.clone(), config.poll_interval());
    drop(app_tx);

    let state = AppState::new(UserId::new(config.viewer_id.as_str()))
        .with_debounce_window(config.debounce_window());
    scout_info!(
        "Scout started: base_url={} viewer={}",
        config.base_url,
        config.viewer_id
    );
    println!("{}", input::HELP);

    let mut app = App {
        state: Some(state),
        runner,
    };
    app.dispatch(Msg::Mounted);

    while let Ok(event) = app_rx.recv() {
        match event {
            AppEvent::Dispatch(msg) => app.dispatch(msg),
            AppEvent::Line(line) => {
                if !app.handle_line(&line) {
                    break;
                }
            }
            AppEvent::InputClosed => break,
        }
    }

    app.dispatch(Msg::Unmounted);
    scout_info!("Scout stopped");
    Ok(())
}

struct App {
    // Taken out while `update` owns it.
    state: Option<AppState>,
    runner: EffectRunner,
}

impl App {
    fn dispatch(&mut self, msg: Msg) {
        let Some(state) = self.state.take() else {
            return;
        };
        let (mut state, effects) = update(state, msg);
        self.runner.enqueue(effects);
        if state.consume_dirty() {
            for line in render::render(&state.view()) {
                println!("{line}");
            }
        }
        self.state = Some(state);
    }

    /// Returns `false` when the user asked to quit.
    fn handle_line(&mut self, line: &str) -> bool {
        match input::parse_line(line) {
            Ok(Command::Dispatch(msg)) => self.dispatch(msg),
            Ok(Command::ShowUser(target)) => self.show_user(&target),
            Ok(Command::ShowPosition { position, owner }) => self.show_position(&position, &owner),
            Ok(Command::Upload(path)) => self.upload(&path),
            Ok(Command::Help) => println!("{}", input::HELP),
            Ok(Command::Quit) => return false,
            Err(err) => println!("{err}"),
        }
        true
    }

    fn show_user(&self, target: &UserId) {
        let Some(state) = &self.state else { return };
        let status = state.viewer().relationship_to(target);
        println!(
            "{target}: {:?} -> {}",
            status,
            render::user_action_label(status.action())
        );
    }

    fn show_position(&self, position: &PositionId, owner: &UserId) {
        let Some(state) = &self.state else { return };
        let action = state.viewer().position_action(position, owner);
        println!("{position}: {}", render::position_action_label(action));
    }

    fn upload(&mut self, path: &Path) {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        match std::fs::read(path) {
            Ok(bytes) => self.dispatch(Msg::UploadRequested { file_name, bytes }),
            Err(err) => {
                scout_warn!("Cannot read {}: {}", path.display(), err);
                println!("cannot read {}: {err}", path.display());
            }
        }
    }
}

fn spawn_stdin_reader(app_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if app_tx.send(AppEvent::Line(line)).is_err() {
                return;
            }
        }
        let _ = app_tx.send(AppEvent::InputClosed);
    });
}

// Polls only reach the backend while a conversation is open.
fn spawn_poll_tick(app_tx: mpsc::Sender<AppEvent>, interval: Duration) {
    thread::spawn(move || loop {
        thread::sleep(interval);
        if app_tx.send(AppEvent::Dispatch(Msg::PollMessages)).is_err() {
            break;
        }
    });
}
