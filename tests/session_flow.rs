//! End-to-end behavior of the drill session state machine: progress,
//! tolerance, debounce, repeated-note gating, looping, scoring, and
//! completion, all driven through the public API with fabricated clocks.

use std::time::{Duration, Instant};

use fretdrill::engine::{DrillSession, LoopRange, PitchSample, SessionConfig};
use fretdrill::music::Tuning;
use fretdrill::tab::{Drill, FrettedNote, StepState, TabSequence};

fn drill(sequence: TabSequence) -> Drill {
    Drill::new("flow-test", "Flow Test", sequence)
}

/// An in-tune sample for (string, fret), `cents` away from center.
fn sample(string: u8, fret: u8, cents: f64, onset: bool) -> PitchSample {
    let target = Tuning::STANDARD.fret_frequency(FrettedNote { string, fret });
    PitchSample {
        frequency: (target as f64 * (cents / 1200.0).exp2()) as f32,
        clarity: 0.9,
        onset,
    }
}

fn ms(t0: Instant, millis: u64) -> Instant {
    t0 + Duration::from_millis(millis)
}

#[test]
fn monotonic_progress_without_loop() {
    let seq = TabSequence::builder()
        .note(6, 0)
        .note(5, 2)
        .note(4, 2)
        .build()
        .unwrap();
    let mut session = DrillSession::new(drill(seq));
    let t0 = Instant::now();

    let plays = [(6u8, 0u8), (5, 2), (4, 2)];
    for (tick, &(string, fret)) in plays.iter().enumerate() {
        let before = session.current_index();
        let advance = session
            .submit_sample(Some(sample(string, fret, 0.0, false)), ms(t0, tick as u64 * 100))
            .unwrap();
        assert_eq!(advance.step_index, before);
        assert!(session.current_index() > before);
    }
    assert!(session.is_complete());
}

#[test]
fn out_of_tolerance_samples_are_idempotent() {
    let seq = TabSequence::builder().note(3, 2).note(2, 1).build().unwrap();
    let mut session = DrillSession::new(drill(seq));
    let t0 = Instant::now();

    // An octave off, hammered for two hundred ticks
    for tick in 0..200u64 {
        session.submit_sample(Some(sample(3, 2, 1200.0, tick % 2 == 0)), ms(t0, tick * 10));
    }

    assert_eq!(session.current_index(), 0);
    assert_eq!(session.score(), 0);
    assert_eq!(session.streak(), 0);
    assert_eq!(
        session.step_states(),
        &[StepState::Waiting, StepState::Waiting]
    );
}

#[test]
fn tolerance_boundary_accepts_edge_rejects_beyond() {
    let seq = TabSequence::builder().note(3, 2).note(3, 4).build().unwrap();
    let mut session = DrillSession::new(drill(seq));
    let t0 = Instant::now();

    // One cent beyond tolerance: rejected
    assert!(session
        .submit_sample(Some(sample(3, 2, 41.0, false)), t0)
        .is_none());

    // At the 40-cent edge (a hair inside, off the float knife edge): accepted
    let advance = session
        .submit_sample(Some(sample(3, 2, 39.999, false)), ms(t0, 100))
        .unwrap();
    assert_eq!(advance.step_index, 0);

    // Flat side behaves the same
    assert!(session
        .submit_sample(Some(sample(3, 4, -41.0, false)), ms(t0, 200))
        .is_none());
    assert!(session
        .submit_sample(Some(sample(3, 4, -39.999, false)), ms(t0, 300))
        .is_some());
}

#[test]
fn debounce_fifty_ms_apart_scores_once() {
    let seq = TabSequence::builder().note(6, 0).note(5, 2).build().unwrap();
    let mut session = DrillSession::new(drill(seq));
    let t0 = Instant::now();

    assert!(session
        .submit_sample(Some(sample(6, 0, 0.0, false)), t0)
        .is_some());
    // 50 ms later: perfect pitch for the next step, but inside the window
    assert!(session
        .submit_sample(Some(sample(5, 2, 0.0, false)), ms(t0, 50))
        .is_none());

    assert_eq!(session.current_index(), 1);
    assert_eq!(session.score(), 100);
}

#[test]
fn debounce_ninety_ms_apart_scores_twice() {
    let seq = TabSequence::builder().note(6, 0).note(5, 2).build().unwrap();
    let mut session = DrillSession::new(drill(seq));
    let t0 = Instant::now();

    assert!(session
        .submit_sample(Some(sample(6, 0, 0.0, false)), t0)
        .is_some());
    assert!(session
        .submit_sample(Some(sample(5, 2, 0.0, false)), ms(t0, 90))
        .is_some());

    assert!(session.is_complete());
    assert_eq!(session.score(), 100 + 110);
}

#[test]
fn repeated_note_stalls_until_fresh_attack() {
    // Same position twice in a row
    let seq = TabSequence::builder().note(3, 2).note(3, 2).build().unwrap();
    let mut session = DrillSession::new(drill(seq));
    let t0 = Instant::now();

    // First pluck: onset high on the attack tick
    assert!(session
        .submit_sample(Some(sample(3, 2, 0.0, true)), t0)
        .is_some());
    assert_eq!(session.current_index(), 1);

    // The string keeps ringing: in-tolerance pitch, onset low, for a
    // long stretch. Index must stall at 1.
    for tick in 1..30u64 {
        assert!(session
            .submit_sample(Some(sample(3, 2, 0.0, false)), ms(t0, tick * 100))
            .is_none());
    }
    assert_eq!(session.current_index(), 1);
    assert!(!session.is_complete());

    // A fresh attack: onset false -> true rising edge completes step 1
    let advance = session
        .submit_sample(Some(sample(3, 2, 0.0, true)), ms(t0, 3_000))
        .unwrap();
    assert_eq!(advance.step_index, 1);
    assert!(session.is_complete());
}

#[test]
fn distinct_consecutive_notes_need_no_onset() {
    let seq = TabSequence::builder().note(3, 2).note(3, 4).build().unwrap();
    let mut session = DrillSession::new(drill(seq));
    let t0 = Instant::now();

    // onset stays false throughout; both steps validate
    assert!(session
        .submit_sample(Some(sample(3, 2, 0.0, false)), t0)
        .is_some());
    assert!(session
        .submit_sample(Some(sample(3, 4, 0.0, false)), ms(t0, 100))
        .is_some());
    assert!(session.is_complete());
}

#[test]
fn repeat_gate_spans_a_double_stop() {
    // The second step is a double-stop containing the note just played:
    // it still demands a fresh attack.
    let seq = TabSequence::builder()
        .note(3, 2)
        .chord(&[(3, 2), (2, 1)])
        .build()
        .unwrap();
    let mut session = DrillSession::new(drill(seq));
    let t0 = Instant::now();

    assert!(session
        .submit_sample(Some(sample(3, 2, 0.0, true)), t0)
        .is_some());
    assert!(session
        .submit_sample(Some(sample(3, 2, 0.0, false)), ms(t0, 100))
        .is_none());
    assert!(session
        .submit_sample(Some(sample(3, 2, 0.0, true)), ms(t0, 200))
        .is_some());
    assert!(session.is_complete());
}

#[test]
fn loop_wrap_resets_range_and_counts() {
    let seq = TabSequence::builder()
        .note(6, 0)
        .note(5, 2)
        .note(4, 2)
        .note(3, 2)
        .note(2, 1)
        .note(1, 0)
        .build()
        .unwrap();
    let plays = [(6u8, 0u8), (5, 2), (4, 2), (3, 2), (2, 1), (1, 0)];

    let mut session = DrillSession::new(drill(seq));
    session.set_loop(LoopRange::new(1, 3));
    let t0 = Instant::now();

    // Steps 0..=2 advance normally
    for tick in 0..3u64 {
        let (string, fret) = plays[tick as usize];
        session
            .submit_sample(Some(sample(string, fret, 0.0, false)), ms(t0, tick * 100))
            .unwrap();
    }
    assert_eq!(session.current_index(), 3);

    // Completing step 3 wraps back to 1
    let advance = session
        .submit_sample(Some(sample(3, 2, 0.0, false)), ms(t0, 300))
        .unwrap();
    assert!(advance.wrapped);
    assert_eq!(session.current_index(), 1);
    assert_eq!(session.loop_count(), 1);
    assert!(!session.is_complete());

    // The wrapped range is re-armed; step 0 keeps its success
    assert_eq!(session.step_states()[0], StepState::Success);
    assert_eq!(
        &session.step_states()[1..=3],
        &[StepState::Waiting, StepState::Waiting, StepState::Waiting]
    );

    // Score and streak survive the wrap
    assert_eq!(session.streak(), 4);
    assert!(session.score() > 0);

    // Loop again to show it never completes
    for lap in 0..3u64 {
        for (offset, tick) in (1..=3u64).enumerate() {
            let (string, fret) = plays[tick as usize];
            session
                .submit_sample(
                    Some(sample(string, fret, 0.0, false)),
                    ms(t0, 400 + lap * 300 + offset as u64 * 100),
                )
                .unwrap();
        }
        assert!(!session.is_complete());
    }
    assert_eq!(session.loop_count(), 4);
}

#[test]
fn loop_wrap_reprimes_a_leading_repeat() {
    // Loop over [0, 1] where step 0 and step 1 are the same position.
    // After a wrap the gate history is cleared, so step 0 must validate
    // again without demanding an onset edge.
    let seq = TabSequence::builder().note(3, 2).note(3, 2).build().unwrap();
    let mut session = DrillSession::new(drill(seq));
    session.set_loop(LoopRange::new(0, 1));
    let t0 = Instant::now();

    session
        .submit_sample(Some(sample(3, 2, 0.0, true)), t0)
        .unwrap();
    // still ringing: blocked, no edge
    assert!(session
        .submit_sample(Some(sample(3, 2, 0.0, false)), ms(t0, 100))
        .is_none());
    // fresh attack: edge validates step 1 and wraps
    let advance = session
        .submit_sample(Some(sample(3, 2, 0.0, true)), ms(t0, 200))
        .unwrap();
    assert!(advance.wrapped);
    assert_eq!(session.loop_count(), 1);
    assert_eq!(session.current_index(), 0);

    // Post-wrap, a sustained tone validates step 0 with no edge at all.
    let advance = session
        .submit_sample(Some(sample(3, 2, 0.0, false)), ms(t0, 300))
        .unwrap();
    assert_eq!(advance.step_index, 0);
}

#[test]
fn scoring_scenario_from_the_manual() {
    let seq = TabSequence::builder().note(6, 0).note(5, 2).build().unwrap();
    let mut session = DrillSession::new(drill(seq));
    let t0 = Instant::now();

    let first = session
        .submit_sample(Some(sample(6, 0, 0.0, false)), t0)
        .unwrap();
    assert_eq!(first.points, 100);
    assert_eq!(session.streak(), 1);

    let second = session
        .submit_sample(Some(sample(5, 2, 0.0, false)), ms(t0, 100))
        .unwrap();
    assert_eq!(second.points, 110);
    assert_eq!(session.score(), 210);
}

#[test]
fn completion_after_exactly_n_matches() {
    let positions = [(6u8, 0u8), (5, 2), (4, 2), (3, 2), (2, 1)];
    let mut builder = TabSequence::builder();
    for &(string, fret) in &positions {
        builder = builder.note(string, fret);
    }
    let mut session = DrillSession::new(drill(builder.build().unwrap()));
    let t0 = Instant::now();

    for (tick, &(string, fret)) in positions.iter().enumerate() {
        assert!(!session.is_complete());
        session
            .submit_sample(Some(sample(string, fret, 0.0, false)), ms(t0, tick as u64 * 100))
            .unwrap();
    }
    assert!(session.is_complete());
    assert_eq!(session.current_index(), positions.len());
    assert_eq!(session.notes_validated(), positions.len() as u32);

    // Terminal: nothing moves anymore
    for tick in 10..20u64 {
        assert!(session
            .submit_sample(Some(sample(2, 1, 0.0, true)), ms(t0, tick * 100))
            .is_none());
    }
}

#[test]
fn custom_tolerance_is_respected() {
    let seq = TabSequence::builder().note(3, 2).build().unwrap();
    let config = SessionConfig {
        tuning: Tuning::STANDARD,
        pitch_tolerance_cents: 10.0,
    };
    let mut session = DrillSession::with_config(drill(seq), config);
    let t0 = Instant::now();

    assert!(session
        .submit_sample(Some(sample(3, 2, 25.0, false)), t0)
        .is_none());
    assert!(session
        .submit_sample(Some(sample(3, 2, 5.0, false)), ms(t0, 100))
        .is_some());
}

#[test]
fn alternate_tuning_moves_the_targets() {
    // String 6 open in drop D is D2; an E2 (standard) no longer matches.
    let seq = TabSequence::builder().note(6, 0).build().unwrap();
    let config = SessionConfig {
        tuning: Tuning::DROP_D,
        pitch_tolerance_cents: 40.0,
    };
    let mut session = DrillSession::with_config(drill(seq), config);
    let t0 = Instant::now();

    let e2_standard = Tuning::STANDARD.open_frequency(6);
    assert!(session
        .submit_sample(
            Some(PitchSample {
                frequency: e2_standard,
                clarity: 0.9,
                onset: false
            }),
            t0
        )
        .is_none());

    let d2 = Tuning::DROP_D.open_frequency(6);
    assert!(session
        .submit_sample(
            Some(PitchSample {
                frequency: d2,
                clarity: 0.9,
                onset: false
            }),
            ms(t0, 100)
        )
        .is_some());
}
