// SPDX-License-Identifier: MPL-2.0
//! Headless demo: runs a scripted session on simulated ports and prints the
//! derived view after each step.

use scrub_player::application::port::MediaEvent;
use scrub_player::config::{self, PlayerConfig};
use scrub_player::i18n::Translations;
use scrub_player::infrastructure::{
    ManualClock, RecordingHost, SimulatedCapture, SimulatedFullscreen, SimulatedMedia,
};
use scrub_player::player::{format_hms, ControlsView, Key, SkipDirection};
use scrub_player::{Error, Player, PlayerMessage, PlayerPorts, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

const DEMO_SRC: &str = "https://example.invalid/demo.mp4";
const DEFAULT_DEMO_DURATION_SECS: f64 = 120.0;

const HELP: &str = "\
scrub_player - headless playback control demo

USAGE:
  scrub_player [OPTIONS]

OPTIONS:
  --config FILE      Load player configuration from a TOML file
  --src URL          Media source
  --lang TAG         UI language (en, pt, he)
  --autoplay         Start playing once ready
  --start SECS       Start position
  --duration SECS    Simulated media duration (default 120)
  -h, --help         Print this help
";

struct Flags {
    config_path: Option<PathBuf>,
    src: Option<String>,
    lang: Option<String>,
    autoplay: bool,
    start: Option<f64>,
    duration: f64,
}

fn parse_flags() -> std::result::Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }
    let flags = Flags {
        config_path: args.opt_value_from_str("--config")?,
        src: args.opt_value_from_str("--src")?,
        lang: args.opt_value_from_str("--lang")?,
        autoplay: args.contains("--autoplay"),
        start: args.opt_value_from_str("--start")?,
        duration: args
            .opt_value_from_str("--duration")?
            .unwrap_or(DEFAULT_DEMO_DURATION_SECS),
    };
    for extra in args.finish() {
        eprintln!("Warning: ignoring argument {:?}", extra);
    }
    Ok(Some(flags))
}

fn build_config(flags: &Flags) -> Result<PlayerConfig> {
    let mut config = match &flags.config_path {
        Some(path) => config::load_from_path(path)?,
        None => config::load()?.unwrap_or_else(|| PlayerConfig::new(DEMO_SRC)),
    };
    if let Some(src) = &flags.src {
        config.src.clone_from(src);
    }
    if let Some(lang) = &flags.lang {
        config.language = Some(lang.clone());
    }
    if flags.autoplay {
        config.autoplay = true;
    }
    if let Some(start) = flags.start {
        config.start_position = start;
    }
    Ok(config)
}

struct Session {
    player: Player,
    media: SimulatedMedia,
    capture: SimulatedCapture,
    clock: ManualClock,
    host: RecordingHost,
}

impl Session {
    fn start(config: PlayerConfig, duration_secs: f64) -> Result<Self> {
        let media = SimulatedMedia::new(duration_secs);
        let capture = SimulatedCapture::new();
        let clock = ManualClock::new();
        let host = RecordingHost::new();
        let ports = PlayerPorts::new(Box::new(clock.scheduler()), Box::new(host.clone()))
            .with_media(Box::new(media.clone()))
            .with_capture(Box::new(capture.clone()))
            .with_fullscreen(Box::new(SimulatedFullscreen::new()));
        let player = Player::mount(config, Translations::embedded()?, ports)?;
        Ok(Self {
            player,
            media,
            capture,
            clock,
            host,
        })
    }

    fn send(&mut self, message: PlayerMessage) {
        self.player.update(message);
    }

    /// Lets `elapsed` pass: media plays, timers fire, captures settle.
    fn run_for(&mut self, elapsed: Duration) {
        let mut remaining = elapsed;
        let step = Duration::from_millis(250);
        while !remaining.is_zero() {
            let slice = remaining.min(step);
            remaining -= slice;
            if let Some(event) = self.media.tick(slice.as_secs_f64()) {
                self.send(PlayerMessage::Media(event));
            }
            for fired in self.clock.advance(slice) {
                self.send(PlayerMessage::TimerFired(fired));
            }
            self.settle_captures();
        }
    }

    fn settle_captures(&mut self) {
        while let Some(event) = self.capture.complete_next() {
            self.send(PlayerMessage::Capture(event));
        }
    }

    fn print(&self, label: &str) {
        print_view(label, &self.player.view());
    }
}

fn print_view(label: &str, view: &ControlsView) {
    println!("== {}", label);
    println!(
        "   {} {} / {} (-{}, {:.0}%)",
        if view.playing { "playing" } else { "paused" },
        format_hms(view.progress_secs),
        format_hms(view.duration_secs),
        view.remaining_label,
        view.progress_percent
    );
    println!(
        "   controls: {}  spinner: {}  volume: {} {:?}  speed: {}",
        view.show_controls, view.show_spinner, view.volume, view.volume_icon, view.rate_label
    );
    if let Some(standby) = &view.standby {
        println!(
            "   standby: {} {} ({})",
            standby.heading,
            standby.title.as_deref().unwrap_or("-"),
            standby.paused_label
        );
    }
    if let Some(preview) = &view.preview {
        match &preview.thumbnail {
            Some(thumbnail) => println!(
                "   preview {}: {}x{} frame from {:.1}s",
                preview.time_label,
                thumbnail.width(),
                thumbnail.height(),
                thumbnail.time_secs()
            ),
            None => println!("   preview {}: loading", preview.time_label),
        }
    }
    if let Some(error) = &view.error {
        println!("   error: {}", error.message);
    }
}

fn run(flags: &Flags) -> Result<()> {
    let config = build_config(flags)?;
    let duration = flags.duration;
    if !duration.is_finite() || duration <= 0.0 {
        return Err(Error::Config(format!(
            "duration must be positive, got {}",
            duration
        )));
    }

    let mut session = Session::start(config, duration)?;
    session.print("mounted");

    session.send(PlayerMessage::Media(MediaEvent::Ready));
    session.settle_captures();
    session.print("ready");

    session.send(PlayerMessage::PointerActivity);
    session.send(PlayerMessage::ScrubHover(duration * 0.42));
    session.print("hovering the scrub bar");
    session.settle_captures();
    session.print("preview captured");
    session.send(PlayerMessage::ScrubLeave);

    if !session.player.state().playing {
        session.send(PlayerMessage::KeyPressed(Key::Space));
    }
    session.run_for(Duration::from_secs(6));
    session.print("after 6s of playback");

    session.send(PlayerMessage::KeyPressed(Key::Space));
    session.run_for(Duration::from_secs(4));
    session.print("paused and idle");

    session.send(PlayerMessage::Skip(SkipDirection::Forward));
    session.send(PlayerMessage::SeekTo(duration - 3.0));
    session.send(PlayerMessage::Media(MediaEvent::SeekCompleted));
    session.send(PlayerMessage::TogglePlay);
    session.run_for(Duration::from_secs(5));
    session.print("played to the end");

    println!("== host callbacks");
    for call in session.host.lifecycle_calls() {
        println!("   {:?}", call);
    }
    session.player.unmount();
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{}", HELP);
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("Error: {}\n\n{}", err, HELP);
            return ExitCode::FAILURE;
        }
    };

    match run(&flags) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
