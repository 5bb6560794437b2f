// Scroll timeline declaration, scrub sampling and the per-frame dirty flag.

mod common;

use common::*;
use glam::Vec3;
use showcase_core::*;
use std::time::Duration;

#[test]
fn binds_seven_transitions_in_declared_order() {
    let tl = bind_scroll_animation(DeviceClass::Desktop);
    let triggers: Vec<Section> = tl.transitions().iter().map(|t| t.window.trigger).collect();
    assert_eq!(
        triggers,
        vec![
            Section::Sound,
            Section::Sound,
            Section::Sound,
            Section::Sound,
            Section::Display,
            Section::Display,
            Section::Display,
        ]
    );
    for t in tl.transitions() {
        assert_eq!(t.window.scrub_sec, 2.0);
        assert_eq!(t.window.start, "top bottom".parse::<TriggerPoint>().unwrap());
        assert_eq!(t.window.end, "top top".parse::<TriggerPoint>().unwrap());
        assert!(!t.has_rendered());
    }
    assert_eq!(
        tl.transitions()[2].target,
        TransitionTarget::Opacity {
            section: Section::Jumbotron,
            to: 0.0
        }
    );
    assert_eq!(
        tl.transitions()[6].target,
        TransitionTarget::Opacity {
            section: Section::Display,
            to: 1.0
        }
    );
}

#[test]
fn only_position_transitions_raise_the_resync_flag() {
    let tl = bind_scroll_animation(DeviceClass::MobileOrTablet);
    let marks: Vec<(PoseField, DirtyMark)> = tl
        .transitions()
        .iter()
        .filter_map(|t| match t.target {
            TransitionTarget::Camera { field, mark, .. } => Some((field, mark)),
            _ => None,
        })
        .collect();
    assert_eq!(
        marks,
        vec![
            (PoseField::Position, DirtyMark::Mark),
            (PoseField::Target, DirtyMark::Skip),
            (PoseField::Position, DirtyMark::Mark),
            (PoseField::Target, DirtyMark::Skip),
        ]
    );
}

#[test]
fn device_selects_literal_variants() {
    let desktop = bind_scroll_animation(DeviceClass::Desktop);
    let mobile = bind_scroll_animation(DeviceClass::MobileOrTablet);
    let to = |tl: &ScrollTimeline, i: usize| match tl.transitions()[i].target {
        TransitionTarget::Camera { to, .. } => to,
        _ => panic!("transition {i} is not a camera transition"),
    };
    assert_eq!(to(&desktop, 0), Vec3::new(-3.38, -10.74, -5.93));
    assert_eq!(to(&mobile, 0), Vec3::new(-6.0, -12.2, -5.0));
    assert_eq!(to(&desktop, 1), Vec3::new(1.52, 0.77, -1.08));
    assert_eq!(to(&mobile, 1), Vec3::new(0.7, 1.9, 0.7));
    assert_eq!(to(&desktop, 4), Vec3::new(1.56, 5.0, 0.011));
    assert_eq!(to(&mobile, 5), Vec3::new(-1.62, 0.02, -0.06));
}

#[test]
fn nothing_renders_until_the_user_scrolls_into_range() {
    let mut c = ready(DeviceClass::Desktop);
    c.pre_frame();
    run(&mut c, 0.0, 1.0);
    assert_eq!(c.pose(), default_pose());
    assert_eq!(c.host().opacity_writes, 0);
    assert_eq!(c.engine().syncs(), 0);
    assert!(c.timeline().transitions().iter().all(|t| !t.has_rendered()));
}

#[test]
fn scrolling_through_sound_section_lands_on_sound_stop() {
    let mut c = ready(DeviceClass::Desktop);
    run(&mut c, SOUND_TOP, 3.0);
    assert_close(c.pose().position, Vec3::new(-3.38, -10.74, -5.93));
    assert_close(c.pose().target, Vec3::new(1.52, 0.77, -1.08));
    assert_eq!(c.engine().pose, c.pose());
    assert_eq!(c.host().opacity_of(Section::Jumbotron), 0.0);
    assert_eq!(c.host().opacity_of(Section::SoundContent), 1.0);
    assert_eq!(c.host().opacity_of(Section::Display), 0.0);
}

#[test]
fn scrub_follows_scroll_with_lag() {
    let mut c = ready(DeviceClass::Desktop);
    run(&mut c, SOUND_TOP, 0.25);
    let sound_pos = &c.timeline().transitions()[0];
    assert!(sound_pos.progress() > 0.0 && sound_pos.progress() < 1.0);
    run(&mut c, SOUND_TOP, 2.0);
    assert_eq!(c.timeline().transitions()[0].progress(), 1.0);
}

#[test]
fn display_progress_spans_exactly_its_trigger_window() {
    let mut c = ready(DeviceClass::Desktop);
    let start = DISPLAY_TOP - VIEWPORT;

    run(&mut c, start, 3.0);
    assert_eq!(c.timeline().transitions()[4].progress(), 0.0);
    assert!(!c.timeline().transitions()[4].has_rendered());

    run(&mut c, DISPLAY_TOP, 3.0);
    assert_eq!(c.timeline().transitions()[4].progress(), 1.0);
    assert_close(c.pose().position, Vec3::new(1.56, 5.0, 0.011));
    assert_eq!(c.host().opacity_of(Section::Display), 1.0);
}

#[test]
fn scrubbing_back_and_forth_reproduces_the_same_pose() {
    let mut c = ready(DeviceClass::Desktop);
    let midway = DISPLAY_TOP - VIEWPORT / 2.0;

    run(&mut c, DISPLAY_TOP, 3.0);
    run(&mut c, midway, 3.0);
    let first = c.pose();
    assert!((c.timeline().transitions()[4].progress() - 0.5).abs() < 1e-6);

    run(&mut c, DISPLAY_TOP, 3.0);
    run(&mut c, midway, 3.0);
    assert_eq!(c.pose(), first);
}

#[test]
fn one_resync_per_tick_regardless_of_dirty_writes() {
    let mut c = ready(DeviceClass::Desktop);
    c.pre_frame();
    let before = c.engine().syncs();
    for _ in 0..5 {
        c.mark_dirty();
    }
    assert!(c.is_dirty());
    assert!(c.pre_frame());
    assert!(!c.is_dirty());
    assert_eq!(c.engine().syncs(), before + 1);
    assert!(!c.pre_frame());
    assert_eq!(c.engine().syncs(), before + 1);
}

#[test]
fn scroll_frames_resync_once_each() {
    let mut c = ready(DeviceClass::Desktop);
    c.pre_frame();
    let snap = snapshot(SOUND_TOP);
    for _ in 0..10 {
        let before = c.engine().syncs();
        c.advance(FRAME, &snap).unwrap();
        assert!(c.is_dirty());
        c.pre_frame();
        assert_eq!(c.engine().syncs(), before + 1);
        assert!(!c.is_dirty());
    }
}

#[test]
fn target_only_write_does_not_raise_the_flag() {
    let mut rig = CameraRig::new(default_pose());
    rig.take_dirty();
    let mut host = MockHost::new();
    let mut tl = ScrollTimeline::new().then(ScrollTransition::camera(
        Section::Sound,
        PoseField::Target,
        Vec3::new(1.52, 0.77, -1.08),
        DirtyMark::Skip,
    ));
    let marked = tl
        .sample(&snapshot(SOUND_TOP), Duration::from_secs(3), true, &mut rig, &mut host)
        .unwrap();
    assert!(!marked);
    assert!(!rig.is_dirty());
    assert_close(rig.pose().target, Vec3::new(1.52, 0.77, -1.08));
}

#[test]
fn missing_section_element_surfaces_as_error() {
    let mut rig = CameraRig::new(default_pose());
    let mut host = MockHost::new();
    host.missing.push(Section::Jumbotron);
    let mut tl = bind_scroll_animation(DeviceClass::Desktop);
    let err = tl
        .sample(&snapshot(SOUND_TOP), FRAME, true, &mut rig, &mut host)
        .unwrap_err();
    assert!(err.to_string().contains(".jumbotron-section"));
}

#[test]
fn missing_trigger_layout_surfaces_as_error() {
    let mut rig = CameraRig::new(default_pose());
    let mut host = MockHost::new();
    let mut tl = resume_transitions(DeviceClass::Desktop);
    let snap = ScrollSnapshot::new(0.0, VIEWPORT);
    assert!(tl.sample(&snap, FRAME, true, &mut rig, &mut host).is_err());
}
