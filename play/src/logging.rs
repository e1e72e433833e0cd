use env_logger::fmt::{Color, Formatter};
use lazy_static::lazy_static;
use log::{Level, Record};
use std::{
    io::{self, Write},
    sync::Mutex,
};

/// Game time from the latest packet, and how many packets have been seen.
#[derive(Debug, Default)]
struct GameClock {
    seconds: Option<f32>,
    ticks: u64,
}

impl GameClock {
    fn advance(&mut self, seconds: f32) {
        self.seconds = Some(seconds);
        self.ticks += 1;
    }

    fn stamp(&self) -> Option<String> {
        self.seconds.map(|s| format!("{:.3}s #{}", s, self.ticks))
    }
}

lazy_static! {
    static ref CLOCK: Mutex<GameClock> = Mutex::new(GameClock::default());
}

pub fn set_game_time(seconds: f32) {
    if let Ok(mut clock) = CLOCK.lock() {
        clock.advance(seconds);
    }
}

fn level_color(level: Level) -> Color {
    match level {
        Level::Error => Color::Red,
        Level::Warn => Color::Yellow,
        Level::Info => Color::Green,
        Level::Debug => Color::Cyan,
        Level::Trace => Color::White,
    }
}

/// `LEVEL [game clock] module: message`. Until the first packet arrives the
/// wall clock stands in for the game clock.
pub fn format(buf: &mut Formatter, record: &Record<'_>) -> io::Result<()> {
    let level = record.level();
    let mut level_style = buf.style();
    level_style
        .set_color(level_color(level))
        .set_bold(level == Level::Error);
    write!(buf, "{:>5} ", level_style.value(level))?;

    let stamp = CLOCK
        .lock()
        .ok()
        .and_then(|clock| clock.stamp())
        .unwrap_or_else(|| buf.timestamp().to_string());
    write!(buf, "[{}] ", stamp)?;

    let mut module_style = buf.style();
    module_style.set_dimmed(true);
    let module_path = record.module_path().unwrap_or("?");
    write!(buf, "{}: ", module_style.value(module_path))?;

    writeln!(buf, "{}", record.args())
}
