// Frame loop pacing and stop handling, driven by a manual clock.

use breath_core::*;
use std::time::Duration;

#[test]
fn interval_follows_fps() {
    assert!((FrameLoop::new(60).interval().as_secs_f64() - 1.0 / 60.0).abs() < 1e-9);
    assert_eq!(FrameLoop::new(0).interval(), Duration::from_secs(1));
    assert_eq!(FrameLoop::default().interval(), FrameLoop::new(DEFAULT_FRAMES_PER_SECOND).interval());
}

#[test]
fn manual_time_advances_on_wait() {
    let time = ManualTime::new(100.0);
    time.wait(Duration::from_millis(250));
    assert_eq!(time.now_ms(), 350.0);
    time.set(0.0);
    time.advance(5.0);
    assert_eq!(time.now_ms(), 5.0);
}

#[test]
fn run_stops_when_frame_returns_false() {
    let time = ManualTime::new(0.0);
    let frames = FrameLoop::new(50);
    let mut stamps = Vec::new();
    let count = frames.run(&time, |now| {
        stamps.push(now);
        stamps.len() < 5
    });
    assert_eq!(count, 5);
    assert_eq!(stamps.len(), 5);
    for pair in stamps.windows(2) {
        assert!((pair[1] - pair[0] - 20.0).abs() < 1e-6, "uneven pacing {pair:?}");
    }
    assert!(!frames.stop_handle().is_running());
}

#[test]
fn stop_handle_ends_loop_before_next_frame() {
    let time = ManualTime::new(0.0);
    let frames = FrameLoop::new(60);
    let handle = frames.stop_handle();
    let mut seen = 0;
    let count = frames.run(&time, |_| {
        seen += 1;
        if seen == 3 {
            handle.stop();
            handle.stop();
        }
        true
    });
    assert_eq!(count, 3);
    assert_eq!(seen, 3);
}

#[test]
fn stop_before_run_prevents_every_frame() {
    let time = ManualTime::new(0.0);
    let frames = FrameLoop::new(60);
    frames.stop_handle().stop();
    let mut seen = 0;
    let count = frames.run(&time, |_| {
        seen += 1;
        true
    });
    assert_eq!(count, 0);
    assert_eq!(seen, 0);
    assert_eq!(time.now_ms(), 0.0);

    let count = frames.run(&time, |_| {
        seen += 1;
        seen < 2
    });
    assert_eq!(count, 2, "the stop request is consumed by the run it ended");
}

#[test]
fn loop_drives_a_session_through_a_full_cycle() {
    let time = ManualTime::new(0.0);
    let mut session = BreathingSession::builtin().unwrap();
    session.select_pattern("box-breathing", 0.0).unwrap();
    session.start(time.now_ms());

    let mut cycles = 0;
    let mut kinds = Vec::new();
    FrameLoop::new(60).run(&time, |now| {
        if let Some(tick) = session.tick(now, None) {
            if tick.phase_changed {
                kinds.push(session.clock().current_phase().kind());
            }
            if tick.cycle_completed {
                cycles += 1;
            }
        }
        now < 16_050.0
    });
    assert_eq!(cycles, 1);
    assert_eq!(
        kinds,
        vec![
            PhaseKind::Hold,
            PhaseKind::Exhale,
            PhaseKind::Pause,
            PhaseKind::Inhale
        ]
    );
}
