use super::*;
use crate::{foundation::core::Axis, scene::display::StaticDisplay};

fn hand() -> Texture {
    Texture::solid("redhand", 8, 8, [204, 0, 0, 255])
}

fn assemble(config: &SceneConfig) -> Scene {
    Scene::assemble(config, hand(), &StaticDisplay::default()).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn default_grid_shares_one_timeline() {
    let scene = assemble(&SceneConfig::default());
    let stage = scene.stage();
    assert_eq!(stage.box_count(), 4);
    assert_eq!(stage.timelines().count(), 1);
    // rotate y, rotate z and depth are shared; every box has its own path
    assert_eq!(stage.bindings().len(), 16);
    for (id, _) in stage.boxes() {
        assert_eq!(scene.timeline_for(id).unwrap(), TimelineId(0));
        assert_eq!(stage.behaviours_on(id).count(), 4);
    }

    let first = stage.box_ref(BoxId(0)).unwrap();
    assert_eq!(first.position(), Point::new(-1600.0, -1200.0));
    assert_eq!(first.depth(), -3200.0);
    assert_eq!(first.size().width, 800.0);
    assert_eq!(first.size().depth, 200.0);
}

#[test]
fn boxes_land_on_the_stage_centre() {
    let mut scene = assemble(&SceneConfig::default());
    scene.start();
    scene.tick(0);
    let report = scene.tick(180);
    assert_eq!(report.completed().count(), 1);
    assert!(scene.is_idle());

    for (_, b) in scene.stage().boxes() {
        assert_eq!(b.position(), Point::new(400.0, 300.0));
        assert_eq!(b.depth(), 0.0);
        assert_eq!(b.rotation(Axis::Y), 180.0);
        assert!(close(b.rotation(Axis::Z), 0.0));
    }
}

#[test]
fn half_way_peaks_the_z_tumble() {
    let mut scene = assemble(&SceneConfig::default());
    scene.start();
    scene.tick(0);
    scene.tick(90);
    let b = scene.stage().box_ref(BoxId(3)).unwrap();
    assert!(close(b.rotation(Axis::Z), 90.0));
    assert_eq!(b.rotation(Axis::Y), 90.0);
    assert_eq!(b.depth(), -1600.0);
}

#[test]
fn per_box_mode_gives_each_box_a_timeline() {
    let config = SceneConfig {
        timeline_mode: TimelineMode::PerBox,
        click_action: ClickAction::Replay,
        ..SceneConfig::default()
    };
    let mut scene = assemble(&config);
    assert_eq!(scene.stage().timelines().count(), 4);
    assert_eq!(scene.timeline_for(BoxId(2)).unwrap(), TimelineId(2));

    scene.start();
    scene.tick(0);
    scene.tick(180);

    // All boxes overlap at the centre with equal depth: the last one is on top.
    let outcome = scene.handle_click(Point::new(400.0, 300.0)).unwrap();
    assert_eq!(
        outcome,
        ClickOutcome::Replayed {
            box_id: BoxId(3),
            timelines: vec![TimelineId(3)],
        }
    );

    scene.tick(1);
    let replayed = scene.stage().box_ref(BoxId(3)).unwrap();
    assert_eq!(replayed.position(), Point::new(2400.0, 1800.0));
    assert_eq!(replayed.rotation(Axis::Y), 0.0);
    let settled = scene.stage().box_ref(BoxId(0)).unwrap();
    assert_eq!(settled.position(), Point::new(400.0, 300.0));
}

#[test]
fn single_box_replays_on_press() {
    let mut scene = assemble(&SceneConfig::single_box_replay());
    assert_eq!(scene.layout().cells[0].start, Point::new(400.0, 300.0));

    scene.start();
    scene.tick(0);
    scene.tick(200);
    assert!(scene.is_idle());

    let miss = scene.handle_click(Point::new(900.0, 700.0)).unwrap();
    assert_eq!(miss, ClickOutcome::Ignored);

    let hit = scene.handle_click(Point::new(10.0, 10.0)).unwrap();
    assert!(matches!(hit, ClickOutcome::Replayed { box_id: BoxId(0), .. }));
    assert!(!scene.is_idle());
    scene.tick(0);
    assert_eq!(scene.stage().box_ref(BoxId(0)).unwrap().depth(), -3200.0);
}

#[test]
fn quit_and_ignore_actions() {
    let mut scene = assemble(&SceneConfig::default());
    assert_eq!(scene.handle_click(Point::new(-5000.0, 0.0)).unwrap(), ClickOutcome::Quit);
    assert_eq!(
        scene.on_box_interacted(BoxId(1), Point::ZERO).unwrap(),
        ClickOutcome::Quit
    );

    let config = SceneConfig {
        click_action: ClickAction::Ignore,
        ..SceneConfig::default()
    };
    let mut scene = assemble(&config);
    assert_eq!(
        scene.handle_click(Point::new(400.0, 300.0)).unwrap(),
        ClickOutcome::Ignored
    );
    assert!(scene.on_box_interacted(BoxId(7), Point::ZERO).is_err());
}

#[test]
fn disabled_channels_are_not_bound() {
    let mut config = SceneConfig::single_box_replay();
    config.depth.enabled = false;
    config.path.enabled = false;
    config.rotations.clear();
    let scene = assemble(&config);
    assert!(scene.stage().bindings().is_empty());
    assert_eq!(scene.stage().box_ref(BoxId(0)).unwrap().depth(), 0.0);
}

#[test]
fn invalid_config_builds_nothing() {
    let tex = hand();
    let config = SceneConfig {
        rows: 0,
        ..SceneConfig::default()
    };
    let err = Scene::assemble(&config, tex.clone(), &StaticDisplay::default()).unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(tex.handle_count(), 1);
}

#[test]
fn teardown_releases_texture_last() {
    let tex = hand();
    let scene = Scene::assemble(&SceneConfig::default(), tex.clone(), &StaticDisplay::default())
        .unwrap();
    // the scene's handle plus six per box
    assert_eq!(tex.handle_count(), 1 + 1 + 24);

    let report = scene.teardown();
    assert_eq!(report.boxes, 4);
    assert_eq!(report.timelines, 1);
    assert_eq!(report.behaviours, 7);
    assert_eq!(report.bindings, 16);
    assert_eq!(tex.handle_count(), 1);
}
