use super::*;
use crate::{
    actor::compose::compose_box,
    animation::alpha::{Alpha, AlphaFunc},
    animation::behaviour::Behaviour,
    animation::timeline::Timeline,
    assets::texture::Texture,
    foundation::core::{Fps, Point, Vec3},
};

fn stage() -> Stage {
    let mut stage = Stage::new();
    let b = stage.add_box(compose_box(&Texture::solid("t", 1, 1, [0; 4]), 40.0, 20.0, 10.0).unwrap());
    let tl = stage.add_timeline(Timeline::new(4, Fps::new(30, 1).unwrap()).unwrap());
    let path = Behaviour::path(
        Alpha::new(tl, AlphaFunc::RampInc),
        vec![Point::new(0.0, 0.0), Point::new(100.0, 40.0)],
    )
    .unwrap();
    let path = stage.add_behaviour(path).unwrap();
    stage.apply(path, b).unwrap();
    stage
}

#[test]
fn captures_every_box_face_and_timeline() {
    let mut stage = stage();
    stage.start_all();
    stage.tick(0);
    stage.tick(2);

    let snap = stage.snapshot();
    assert_eq!(snap.tick, 2);
    assert_eq!(snap.timelines.len(), 1);
    assert_eq!(snap.timelines[0].frame, FrameIndex(2));
    assert_eq!(snap.timelines[0].progress, 0.5);
    assert!(snap.timelines[0].playing);

    let b = snap.box_snapshot(BoxId(0)).unwrap();
    assert_eq!(b.state.position, Point::new(50.0, 20.0));
    assert_eq!(b.faces.len(), 6);
    assert_eq!(b.transform.translation(), Vec3::new(50.0, 20.0, 0.0));

    let front = &b.faces[0];
    assert_eq!(front.kind, FaceKind::Front);
    let centre = front.transform.transform_point(Vec3::new(20.0, 10.0, 0.0));
    assert_eq!(centre, Vec3::new(50.0, 20.0, 5.0));
}

#[test]
fn completed_timeline_is_reported() {
    let mut stage = stage();
    stage.start_all();
    stage.tick(0);
    stage.tick(9);
    let snap = FrameSnapshot::capture(&stage);
    assert!(snap.timelines[0].complete);
    assert!(!snap.timelines[0].playing);
    assert_eq!(snap.boxes[0].state.position, Point::new(100.0, 40.0));
    assert!(stage.is_idle());
}

#[test]
fn serializes_to_json() {
    let snap = stage().snapshot();
    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["tick"], 0);
    assert_eq!(json["boxes"][0]["faces"][1]["kind"], "back");
    assert_eq!(json["boxes"][0]["transform"]["cols"].as_array().unwrap().len(), 16);

    let back: FrameSnapshot = serde_json::from_value(json).unwrap();
    assert_eq!(back, snap);
}
