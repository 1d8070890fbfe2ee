//! Playback Timing Example
//!
//! Replays a few recorded timestamps at double speed, pausing halfway,
//! and prints the wall time each record is due.

use rewind_core::{Duration, Time};
use rewind_time::{ManualClock, PlaybackClock, PlaybackConfig, WallClock};

fn main() {
    println!("=== rewind Playback Timing ===\n");

    let recorded: Vec<Time> = (0..6)
        .map(|i| Time::from_secs(1_600_000_000) + Duration::from_millis(i * 400))
        .collect();

    let wall = ManualClock::new(Time::from_secs(1_700_000_000));
    let mut playback = PlaybackClock::with_clock(wall.clone(), PlaybackConfig::fast_forward(2.0))
        .expect("2.0 is a valid rate");
    playback.start(recorded[0]);

    println!("1. Schedule at 2x (start delay {})", playback.config().start_delay);
    for record in &recorded {
        println!("   record {} -> due {}", record, playback.schedule(*record));
    }

    println!("\n2. Pause for 5s after the third record");
    wall.set(playback.schedule(recorded[2]));
    playback.pause().expect("playback started");
    wall.advance(Duration::from_secs(5));
    let paused = playback.resume().expect("playback started");
    println!("   paused for {}", paused);

    for record in &recorded[3..] {
        println!(
            "   record {} -> due {} (wait {:?})",
            record,
            playback.schedule(*record),
            playback.wait_time(*record)
        );
    }

    println!("\n   now presenting {:?}", playback.current_real_time());
    println!("   wall clock {}", wall.now());
}
