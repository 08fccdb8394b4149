//! Badge Breakout entry point
//!
//! Native stand-in for the board: keys from the terminal, frames as text in
//! the alternate screen, beeps and LEDs in the log. Runs until a quit key.

use std::io;
use std::path::PathBuf;
use std::thread;

use badge_breakout::game::{Game, Io};
use badge_breakout::platform::{LedRow, LogAudio, TerminalKeys, TerminalSession};
use badge_breakout::renderer::TextSurface;
use badge_breakout::Settings;

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => Settings::load(&path),
        None => Settings::default(),
    };
    log::info!("Badge Breakout starting ({:?})", settings);
    log::info!("Keys: a=start b=pause arrows=move down=stop q=quit");

    let session = TerminalSession::enter()?;
    let mut input = TerminalKeys::new(session.releases_reported());
    let mut surface = TextSurface::new(io::stdout());
    let mut audio = LogAudio::default();
    let mut lives = LedRow::default();

    let mut game = Game::new(settings);
    game.attach(&mut Io {
        input: &mut input,
        surface: &mut surface,
        audio: &mut audio,
        lives: &mut lives,
    });

    while !input.quit_requested() {
        let wait = game.step(&mut Io {
            input: &mut input,
            surface: &mut surface,
            audio: &mut audio,
            lives: &mut lives,
        });
        thread::sleep(wait);
    }

    drop(session);
    log::info!(
        "Quit: score {}, level {}, {} sounds played",
        game.state().score,
        game.state().level,
        audio.played
    );
    Ok(())
}
