//! Platform Jump entry point
//!
//! Headless driver: commands come from stdin, frames go to the log.
//! Run with `RUST_LOG=info` (or `debug` for spawns and landings).

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{debug, info, warn};

use platform_jump::{
    FileScoreStore, GameLoop, GameRunner, InputEvent, RenderSink, Settings, Snapshot,
};

/// Logs the HUD about once a second and whenever the run ends or restarts
struct LogSink {
    ticks_per_report: u64,
    was_game_over: bool,
}

impl LogSink {
    fn new(ticks_per_report: u64) -> Self {
        Self {
            ticks_per_report: ticks_per_report.max(1),
            was_game_over: false,
        }
    }
}

impl RenderSink for LogSink {
    fn present(&mut self, frame: &Snapshot) {
        if frame.game_over != self.was_game_over {
            self.was_game_over = frame.game_over;
            info!("{}", frame.status_line());
        } else if !frame.game_over && frame.tick % self.ticks_per_report == 0 {
            info!(
                "{}  (y={:.0}, {} platforms)",
                frame.status_line(),
                frame.player.y,
                frame.platforms.len()
            );
        }
        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(frame) {
                log::trace!("{}", json);
            }
        }
    }
}

#[derive(Debug, PartialEq)]
enum Command {
    Input(InputEvent),
    TogglePause,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    match line.trim().to_lowercase().as_str() {
        "p" | "pause" => Some(Command::TogglePause),
        "q" | "quit" | "exit" => Some(Command::Quit),
        key => InputEvent::from_key(key).map(Command::Input),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let settings_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(Settings::FILE_NAME));
    let settings = Settings::load(&settings_path);
    info!("Platform Jump starting ({:?})", settings);

    let store = FileScoreStore::new(&settings.score_file);
    let game = GameLoop::new(&settings, store);
    let ticks_per_second = 1000 / settings.tick_interval_ms;
    let handle =
        GameRunner::new(settings.tick_interval()).spawn(game, LogSink::new(ticks_per_second));

    println!("Controls: <enter>/j = jump, r = restart, p = pause/resume, q = quit");

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        match parse_command(&line) {
            Some(Command::Input(event)) => {
                handle.send(event);
            }
            Some(Command::TogglePause) => {
                let sent = if handle.is_paused() {
                    handle.resume()
                } else {
                    handle.pause()
                };
                if !sent {
                    warn!("Tick thread is gone, ignoring pause toggle");
                }
            }
            Some(Command::Quit) => break,
            None => debug!("Ignoring unknown command {:?}", line),
        }
    }

    let game = handle.shutdown().context("tick thread panicked")?;
    info!(
        "Exiting with score {} (top score {})",
        game.state().score,
        game.top_score()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command(""), Some(Command::Input(InputEvent::Jump)));
        assert_eq!(parse_command("R"), Some(Command::Input(InputEvent::Restart)));
        assert_eq!(parse_command(" p "), Some(Command::TogglePause));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
        assert_eq!(parse_command("fly"), None);
    }
}
