//! Benchmarks for rewind time translation

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rewind_core::{Duration, Time};
use rewind_test::{RecordedLog, ReplaySimulator, SimulatorConfig};
use rewind_time::{ManualClock, PlaybackClock, PlaybackConfig, TimeTranslator};

fn bench_translate(c: &mut Criterion) {
    let mut translator = TimeTranslator::new();
    translator.set_real_start_time(Time::from_secs(1_700_000_000));
    translator.set_translated_start_time(Time::from_secs(1_800_000_000));
    translator.set_time_scale(1.5);
    let t = Time::from_secs(1_700_000_042);

    c.bench_function("translator_translate", |b| {
        b.iter(|| black_box(translator.translate(black_box(t))))
    });
}

fn bench_translate_realtime(c: &mut Criterion) {
    let translator = TimeTranslator::new();
    let t = Time::from_secs(1_700_000_042);

    c.bench_function("translator_translate_realtime", |b| {
        b.iter(|| black_box(translator.translate(black_box(t))))
    });
}

fn bench_shift(c: &mut Criterion) {
    let mut translator = TimeTranslator::new();
    let d = Duration::from_millis(1);

    c.bench_function("translator_shift", |b| {
        b.iter(|| translator.shift(black_box(d)))
    });
}

fn bench_playback_wait_time(c: &mut Criterion) {
    let wall = ManualClock::new(Time::from_secs(1_000));
    let mut playback = match PlaybackClock::with_clock(wall, PlaybackConfig::fast_forward(2.0)) {
        Ok(playback) => playback,
        Err(e) => panic!("invalid playback config: {}", e),
    };
    playback.start(Time::from_secs(10));
    let record = Time::from_secs(15);

    c.bench_function("playback_wait_time", |b| {
        b.iter(|| black_box(playback.wait_time(black_box(record)).ok()))
    });
}

fn bench_replay_simulation(c: &mut Criterion) {
    let log = RecordedLog::uniform(Time::from_secs(10), Duration::from_millis(10), 1_000);

    c.bench_function("replay_1000_records", |b| {
        b.iter(|| {
            let mut sim = match ReplaySimulator::new(Time::from_secs(1_000), SimulatorConfig::default()) {
                Ok(sim) => sim,
                Err(e) => panic!("invalid simulator config: {}", e),
            };
            black_box(sim.run(&log).map(|r| r.emitted()))
        })
    });
}

criterion_group!(
    benches,
    bench_translate,
    bench_translate_realtime,
    bench_shift,
    bench_playback_wait_time,
    bench_replay_simulation,
);
criterion_main!(benches);
