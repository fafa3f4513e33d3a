use super::*;
use crate::{
    actor::compose::compose_box,
    animation::alpha::{Alpha, AlphaFunc},
    animation::behaviour::RotateDirection,
    assets::texture::Texture,
    foundation::core::{Axis, Fps},
};

fn actor(size: f64) -> BoxActor {
    compose_box(&Texture::solid("t", 1, 1, [255; 4]), size, size, size / 4.0).unwrap()
}

fn timeline(frames: u64) -> Timeline {
    Timeline::new(frames, Fps::new(60, 1).unwrap()).unwrap()
}

fn spin(stage: &mut Stage, tl: TimelineId) -> BehaviourId {
    let alpha = Alpha::new(tl, AlphaFunc::RampInc);
    let b = Behaviour::rotate(alpha, Axis::Y, RotateDirection::Clockwise, 0.0, 180.0).unwrap();
    stage.add_behaviour(b).unwrap()
}

fn sink(stage: &mut Stage, tl: TimelineId) -> BehaviourId {
    let alpha = Alpha::new(tl, AlphaFunc::RampInc);
    stage
        .add_behaviour(Behaviour::depth(alpha, -400.0, 0.0).unwrap())
        .unwrap()
}

#[test]
fn behaviour_on_foreign_timeline_is_rejected() {
    let mut stage = Stage::new();
    let alpha = Alpha::new(TimelineId(3), AlphaFunc::RampInc);
    let err = stage
        .add_behaviour(Behaviour::depth(alpha, 0.0, 1.0).unwrap())
        .unwrap_err();
    assert!(matches!(
        err,
        BoxflyError::UnknownId {
            kind: "timeline",
            id: 3
        }
    ));
}

#[test]
fn one_behaviour_drives_many_boxes_identically() {
    let mut stage = Stage::new();
    let a = stage.add_box(actor(10.0));
    let b = stage.add_box(actor(20.0));
    let tl = stage.add_timeline(timeline(10));
    let rot = spin(&mut stage, tl);
    stage.apply(rot, a).unwrap();
    stage.apply(rot, b).unwrap();
    assert_eq!(stage.targets_of(rot).collect::<Vec<_>>(), vec![a, b]);

    stage.start_all();
    let first = stage.tick(1);
    assert_eq!(first.writes, 2);
    assert_eq!(stage.box_ref(a).unwrap().rotation(Axis::Y), 0.0);

    stage.tick(5);
    let ya = stage.box_ref(a).unwrap().rotation(Axis::Y);
    let yb = stage.box_ref(b).unwrap().rotation(Axis::Y);
    assert_eq!(ya, 90.0);
    assert_eq!(ya, yb);
}

#[test]
fn channel_conflicts_are_rejected() {
    let mut stage = Stage::new();
    let a = stage.add_box(actor(10.0));
    let tl = stage.add_timeline(timeline(10));
    let first = spin(&mut stage, tl);
    let second = spin(&mut stage, tl);
    let depth = sink(&mut stage, tl);

    stage.apply(first, a).unwrap();
    let err = stage.apply(second, a).unwrap_err();
    assert!(matches!(
        err,
        BoxflyError::BindingConflict {
            box_id: 0,
            channel: Channel::Rotation(Axis::Y)
        }
    ));
    assert!(stage.apply(first, a).is_err());
    stage.apply(depth, a).unwrap();
    assert_eq!(stage.bindings().len(), 2);
    assert_eq!(stage.behaviours_on(a).collect::<Vec<_>>(), vec![first, depth]);
}

#[test]
fn detached_box_keeps_last_value() {
    let mut stage = Stage::new();
    let a = stage.add_box(actor(10.0));
    let tl = stage.add_timeline(timeline(10));
    let depth = sink(&mut stage, tl);
    stage.apply(depth, a).unwrap();

    stage.start_all();
    stage.tick(0);
    stage.tick(5);
    assert_eq!(stage.box_ref(a).unwrap().depth(), -200.0);

    assert!(stage.detach(depth, a).unwrap());
    assert!(!stage.detach(depth, a).unwrap());
    stage.tick(5);
    assert_eq!(stage.box_ref(a).unwrap().depth(), -200.0);
}

#[test]
fn stopped_timeline_writes_nothing() {
    let mut stage = Stage::new();
    let a = stage.add_box(actor(10.0));
    let tl = stage.add_timeline(timeline(10));
    let depth = sink(&mut stage, tl);
    stage.apply(depth, a).unwrap();
    stage.box_mut(a).unwrap().set_depth(7.0);

    let report = stage.tick(3);
    assert!(report.events.is_empty());
    assert_eq!(report.writes, 0);
    assert_eq!(stage.box_ref(a).unwrap().depth(), 7.0);
}

#[test]
fn restart_resets_values_on_next_tick() {
    let mut stage = Stage::new();
    let a = stage.add_box(actor(10.0));
    let tl = stage.add_timeline(timeline(4));
    let rot = spin(&mut stage, tl);
    stage.apply(rot, a).unwrap();

    stage.start(tl).unwrap();
    stage.tick(0);
    let done = stage.tick(10);
    assert_eq!(done.completed().collect::<Vec<_>>(), vec![tl]);
    assert_eq!(stage.box_ref(a).unwrap().rotation(Axis::Y), 180.0);

    stage.restart(tl).unwrap();
    stage.tick(1);
    assert_eq!(stage.box_ref(a).unwrap().rotation(Axis::Y), 0.0);
    assert!(stage.timeline(tl).unwrap().is_playing());
}

#[test]
fn separate_timelines_advance_independently() {
    let mut stage = Stage::new();
    let a = stage.add_box(actor(10.0));
    let b = stage.add_box(actor(10.0));
    let ta = stage.add_timeline(timeline(10));
    let tb = stage.add_timeline(timeline(10));
    let ra = spin(&mut stage, ta);
    let rb = spin(&mut stage, tb);
    stage.apply(ra, a).unwrap();
    stage.apply(rb, b).unwrap();

    stage.start(ta).unwrap();
    stage.tick(0);
    stage.tick(10);
    assert_eq!(stage.box_ref(a).unwrap().rotation(Axis::Y), 180.0);
    assert_eq!(stage.box_ref(b).unwrap().rotation(Axis::Y), 0.0);
}

#[test]
fn tick_msecs_accumulates_partial_frames() {
    let mut stage = Stage::new();
    let a = stage.add_box(actor(10.0));
    let tl = stage.add_timeline(timeline(60));
    let depth = sink(&mut stage, tl);
    stage.apply(depth, a).unwrap();
    stage.start_all();
    stage.tick_msecs(0.0);

    // 60 fps: 10 ms is not a whole frame, 20 ms is.
    assert_eq!(stage.tick_msecs(10.0).writes, 0);
    assert_eq!(stage.tick_msecs(10.0).writes, 1);
    assert_eq!(stage.timeline(tl).unwrap().current_frame().0, 1);
}

#[test]
fn pick_prefers_nearest_then_latest() {
    let mut stage = Stage::new();
    let a = stage.add_box(actor(100.0));
    let b = stage.add_box(actor(100.0));
    let c = stage.add_box(actor(10.0));
    stage.box_mut(c).unwrap().set_position(Point::new(500.0, 500.0));

    // Equal depth: the later box wins.
    assert_eq!(stage.pick(Point::new(0.0, 0.0)), Some(b));

    stage.box_mut(a).unwrap().set_depth(10.0);
    assert_eq!(stage.pick(Point::new(0.0, 0.0)), Some(a));
    assert_eq!(stage.pick(Point::new(500.0, 500.0)), Some(c));
    assert_eq!(stage.pick(Point::new(300.0, 300.0)), None);
}

#[test]
fn interaction_lists_driving_timelines() {
    let mut stage = Stage::new();
    let a = stage.add_box(actor(10.0));
    let idle = stage.add_box(actor(10.0));
    let t0 = stage.add_timeline(timeline(10));
    let t1 = stage.add_timeline(timeline(10));
    let d = sink(&mut stage, t1);
    let r = spin(&mut stage, t0);
    stage.apply(d, a).unwrap();
    stage.apply(r, a).unwrap();

    let hit = stage.on_box_interacted(a, Point::new(1.0, 2.0)).unwrap();
    assert_eq!(hit.target, a);
    assert_eq!(hit.timelines, vec![t0, t1]);

    let none = stage.on_box_interacted(idle, Point::ZERO).unwrap();
    assert!(none.timelines.is_empty());
    assert!(stage.on_box_interacted(BoxId(9), Point::ZERO).is_err());
}

#[test]
fn teardown_reports_every_arena() {
    let tex = Texture::solid("shared", 2, 2, [1, 2, 3, 255]);
    let mut stage = Stage::new();
    let a = stage.add_box(compose_box(&tex, 4.0, 4.0, 1.0).unwrap());
    let tl = stage.add_timeline(timeline(10));
    let rot = spin(&mut stage, tl);
    let depth = sink(&mut stage, tl);
    stage.apply(rot, a).unwrap();
    stage.apply(depth, a).unwrap();
    assert_eq!(tex.handle_count(), 7);

    let report = stage.teardown();
    assert_eq!(
        report,
        TeardownReport {
            bindings: 2,
            behaviours: 2,
            timelines: 1,
            boxes: 1,
        }
    );
    assert_eq!(tex.handle_count(), 1);
}

#[test]
fn unknown_ids_are_errors() {
    let mut stage = Stage::new();
    assert!(stage.box_ref(BoxId(0)).is_err());
    assert!(stage.restart(TimelineId(0)).is_err());
    assert!(stage.detach_all(BehaviourId(0)).is_err());
}

#[test]
fn deserialized_path_behaviour_ticks_or_is_rejected() {
    let mut stage = Stage::new();
    let a = stage.add_box(actor(10.0));
    let tl = stage.add_timeline(timeline(10));
    let alpha = Alpha::new(tl, AlphaFunc::RampInc);
    let route = vec![Point::new(0.0, 0.0), Point::new(100.0, 50.0)];
    let json = serde_json::to_value(Behaviour::path(alpha, route).unwrap()).unwrap();

    let mut empty = json.clone();
    empty["kind"]["Path"]["waypoints"] = serde_json::json!([]);
    assert!(serde_json::from_value::<Behaviour>(empty).is_err());

    let fly = stage
        .add_behaviour(serde_json::from_value(json).unwrap())
        .unwrap();
    stage.apply(fly, a).unwrap();
    stage.start_all();
    stage.tick(0);
    stage.tick(10);
    assert_eq!(stage.box_ref(a).unwrap().position(), Point::new(100.0, 50.0));
}

#[test]
fn seek_updates_bound_boxes_on_zero_tick() {
    let mut stage = Stage::new();
    let a = stage.add_box(actor(10.0));
    let tl = stage.add_timeline(timeline(10));
    let rot = spin(&mut stage, tl);
    stage.apply(rot, a).unwrap();
    stage.start_all();
    stage.tick(0);

    stage
        .timeline_mut(tl)
        .unwrap()
        .seek(crate::foundation::core::FrameIndex(5));
    let report = stage.tick(0);
    assert_eq!(report.writes, 1);
    assert_eq!(stage.box_ref(a).unwrap().rotation(Axis::Y), 90.0);
}
