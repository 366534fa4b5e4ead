//! Integration tests for presets driven through the scheduler
//!
//! These tests verify that:
//! - Entrance presets move from their initial to their resting pose
//! - Positional stagger holds later items back
//! - An exit started mid-entrance continues from the in-flight pose

use agency_animation::{
    AnimationScheduler, Phase, PlayState, Pose, PoseAnimation, TransitionPreset,
};

fn entrance(preset: &TransitionPreset) -> PoseAnimation {
    PoseAnimation::new(
        preset.pose(Phase::Initial).cloned().unwrap_or_default(),
        preset.pose(Phase::Animate).cloned().unwrap_or_default(),
        preset.transition_for(Phase::Animate),
    )
}

fn run_frames(scheduler: &mut AnimationScheduler, frames: u32) {
    for _ in 0..frames {
        scheduler.tick(16.0);
    }
}

#[test]
fn test_fade_in_up_reaches_rest() {
    let mut scheduler = AnimationScheduler::new();
    let id = scheduler.start(entrance(&TransitionPreset::fade_in_up()));

    let start = scheduler.get(id).unwrap().current().clone();
    assert_eq!(start.resolved_opacity(), 0.0);
    assert_eq!(start.resolved_translate(), (0.0, 20.0));

    // 500 ms tween
    run_frames(&mut scheduler, 16);
    let mid = scheduler.get(id).unwrap();
    assert_eq!(mid.state(), PlayState::Running);
    assert!(mid.current().resolved_opacity() > 0.0);

    run_frames(&mut scheduler, 16);
    let done = scheduler.get(id).unwrap();
    assert!(done.is_finished());
    assert!(done.current().is_natural());
    assert!(!scheduler.has_active_animations());
}

#[test]
fn test_positional_stagger_holds_later_items() {
    let mut scheduler = AnimationScheduler::new();
    let ids: Vec<_> = (0..3)
        .map(|i| scheduler.start(entrance(&TransitionPreset::slide_from_left(i, 100))))
        .collect();

    // 160 ms in: the first two have started, the third is still waiting
    run_frames(&mut scheduler, 10);
    let states: Vec<_> = ids
        .iter()
        .map(|id| scheduler.get(*id).unwrap().state())
        .collect();
    assert_eq!(
        states,
        vec![PlayState::Running, PlayState::Running, PlayState::Delayed]
    );
    let waiting = scheduler.get(ids[2]).unwrap().current();
    assert_eq!(waiting.resolved_translate(), (-20.0, 0.0));
    assert_eq!(waiting.resolved_opacity(), 0.0);

    run_frames(&mut scheduler, 60);
    assert!(ids.iter().all(|id| scheduler.get(*id).unwrap().is_finished()));
}

#[test]
fn test_exit_interrupts_entrance() {
    let preset = TransitionPreset::page_transition(300);
    let mut scheduler = AnimationScheduler::new();
    let id = scheduler.start(entrance(&preset));

    run_frames(&mut scheduler, 5);
    let in_flight = scheduler.get(id).unwrap().current().clone();
    let opacity = in_flight.resolved_opacity();
    assert!(opacity > 0.0 && opacity < 1.0);

    let exit = preset.pose(Phase::Exit).cloned().unwrap();
    assert!(scheduler.retarget(id, exit.clone(), preset.transition_for(Phase::Exit)));
    // the exit starts where the entrance was
    assert_eq!(scheduler.get(id).unwrap().current(), &in_flight);

    run_frames(&mut scheduler, 20);
    let gone = scheduler.get(id).unwrap();
    assert!(gone.is_finished());
    assert_eq!(gone.current(), &exit);
    assert_eq!(gone.current().resolved_translate(), (0.0, -20.0));
}

#[test]
fn test_spring_preset_settles() {
    let mut scheduler = AnimationScheduler::new();
    let id = scheduler.start(entrance(&TransitionPreset::logo_spin()));
    assert_eq!(scheduler.get(id).unwrap().current(), &Pose::scale(0.0));

    run_frames(&mut scheduler, 500);
    let spun = scheduler.get(id).unwrap();
    assert!(spun.is_finished());
    assert_eq!(spun.current().resolved_rotate(), 360.0);
}
