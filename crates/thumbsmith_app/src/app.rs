use std::process::ExitCode;
use std::sync::{mpsc, Arc};
use std::time::Duration;

use chrono::Utc;
use thumbsmith_core::{update, AppState, Msg};
use thumbsmith_engine::EngineConfig;

use crate::effects::EffectRunner;
use crate::persistence::{self, Settings};
use crate::{logging, render, Args};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub fn run(args: Args) -> ExitCode {
    logging::initialize(logging::LogDestination::File);

    // Flags win over saved settings; the merged values are saved back on
    // a clean exit.
    let saved = persistence::load_settings(&args.downloads_dir);
    let include_human = args.include_human || saved.include_human;
    let include_text = args.include_text || saved.include_text;
    let backend_url = args.backend.clone().or(saved.backend_url);

    let mut config = EngineConfig::default_with_download_dir(args.downloads_dir.clone());
    if let Some(url) = &backend_url {
        config.api.base_url = url.clone();
    }
    config.timestamp_millis = Arc::new(|| Utc::now().timestamp_millis() as u64);

    let (msg_tx, msg_rx) = mpsc::channel();
    let runner = EffectRunner::new(msg_tx, config);
    let mut driver = Driver {
        state: AppState::new(),
        runner,
    };

    driver.dispatch(Msg::IncludeHumanToggled(include_human));
    driver.dispatch(Msg::IncludeTextToggled(include_text));
    driver.dispatch(Msg::InputChanged(args.video_url.clone()));
    driver.dispatch(Msg::SubmitClicked);

    if driver.state.view().url_error.is_some() {
        return ExitCode::FAILURE;
    }

    driver.drain_while_loading(&msg_rx);
    if driver.state.view().error.is_some() {
        return ExitCode::FAILURE;
    }

    if args.generate || args.download {
        driver.dispatch(Msg::GenerateClicked);
        driver.drain_while_loading(&msg_rx);
        if driver.state.view().error.is_some() {
            return ExitCode::FAILURE;
        }
    }

    if args.download {
        let count = driver.state.view().generated.len();
        for index in 0..count {
            driver.dispatch(Msg::DownloadClicked { index });
        }
        driver.drain_until_downloads_settle(&msg_rx);
        println!();
        println!("Saved {count} thumbnails to {:?}", args.downloads_dir);
    }

    persistence::save_settings(
        &args.downloads_dir,
        &Settings {
            include_human,
            include_text,
            backend_url,
        },
    );
    ExitCode::SUCCESS
}

struct Driver {
    state: AppState,
    runner: EffectRunner,
}

impl Driver {
    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        self.runner.run(effects);
        if state.consume_dirty() {
            render::render(&state.view());
        }
        self.state = state;
    }

    /// Pumps engine messages until no request cycle is outstanding.
    /// There is no deadline: a hung backend keeps the session waiting,
    /// matching the always-interactive-but-patient UI contract.
    fn drain_while_loading(&mut self, msg_rx: &mpsc::Receiver<Msg>) {
        while self.state.view().loading {
            match msg_rx.recv_timeout(POLL_INTERVAL) {
                Ok(msg) => self.dispatch(msg),
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
            }
        }
    }

    /// Downloads never surface errors, but the process waits for them to
    /// finish writing before exiting.
    fn drain_until_downloads_settle(&mut self, msg_rx: &mpsc::Receiver<Msg>) {
        while self.runner.downloads_in_flight() > 0 {
            match msg_rx.recv_timeout(POLL_INTERVAL) {
                Ok(msg) => self.dispatch(msg),
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
            }
        }
    }
}
