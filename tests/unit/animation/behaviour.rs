use super::*;
use crate::animation::{alpha::AlphaFunc, timeline::TimelineId};

fn alpha() -> Alpha {
    Alpha::new(TimelineId(0), AlphaFunc::RampInc)
}

#[test]
fn two_point_path_endpoints_and_midpoint() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(400.0, 300.0);
    let path = Behaviour::path(alpha(), vec![a, b]).unwrap();
    assert_eq!(path.sample(0.0), ChannelValue::Position(a));
    assert_eq!(path.sample(1.0), ChannelValue::Position(b));
    assert_eq!(
        path.sample(0.5),
        ChannelValue::Position(Point::new(200.0, 150.0))
    );
    assert_eq!(path.channel(), Channel::Position);
}

#[test]
fn multi_point_path_is_piecewise_linear() {
    let pts = vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
    ];
    let path = Behaviour::path(alpha(), pts).unwrap();
    assert_eq!(
        path.sample(0.25),
        ChannelValue::Position(Point::new(5.0, 0.0))
    );
    assert_eq!(
        path.sample(0.5),
        ChannelValue::Position(Point::new(10.0, 0.0))
    );
    assert_eq!(
        path.sample(0.75),
        ChannelValue::Position(Point::new(10.0, 5.0))
    );
    assert_eq!(
        path.sample(1.0),
        ChannelValue::Position(Point::new(10.0, 10.0))
    );
}

#[test]
fn short_paths_are_rejected() {
    assert!(Behaviour::path(alpha(), vec![]).is_err());
    assert!(Behaviour::path(alpha(), vec![Point::ZERO]).is_err());
    assert!(Behaviour::path(alpha(), vec![Point::ZERO, Point::new(f64::NAN, 0.0)]).is_err());
}

#[test]
fn rotate_interpolates_angle_range() {
    let r = Behaviour::rotate(alpha(), Axis::Y, RotateDirection::Clockwise, 0.0, 180.0).unwrap();
    assert_eq!(r.channel(), Channel::Rotation(Axis::Y));
    assert_eq!(r.sample(0.0), ChannelValue::Rotation(Axis::Y, 0.0));
    assert_eq!(r.sample(0.5), ChannelValue::Rotation(Axis::Y, 90.0));
    assert_eq!(r.sample(1.0), ChannelValue::Rotation(Axis::Y, 180.0));
}

#[test]
fn rotate_direction_wraps_end_angle() {
    let cw = Behaviour::rotate(alpha(), Axis::Z, RotateDirection::Clockwise, 90.0, 0.0).unwrap();
    assert_eq!(cw.sample(1.0), ChannelValue::Rotation(Axis::Z, 360.0));

    let ccw =
        Behaviour::rotate(alpha(), Axis::Z, RotateDirection::CounterClockwise, 0.0, 90.0).unwrap();
    assert_eq!(ccw.sample(1.0), ChannelValue::Rotation(Axis::Z, -270.0));

    let ccw_down =
        Behaviour::rotate(alpha(), Axis::Z, RotateDirection::CounterClockwise, 90.0, 0.0)
            .unwrap();
    assert_eq!(ccw_down.sample(1.0), ChannelValue::Rotation(Axis::Z, 0.0));
}

#[test]
fn depth_interpolates() {
    let d = Behaviour::depth(alpha(), -3200.0, 0.0).unwrap();
    assert_eq!(d.channel(), Channel::Depth);
    assert_eq!(d.sample(0.0), ChannelValue::Depth(-3200.0));
    assert_eq!(d.sample(0.25), ChannelValue::Depth(-2400.0));
    assert_eq!(d.sample(1.0), ChannelValue::Depth(0.0));
    assert!(Behaviour::depth(alpha(), f64::INFINITY, 0.0).is_err());
}

#[test]
fn channel_value_reports_its_channel() {
    assert_eq!(
        ChannelValue::Rotation(Axis::X, 1.0).channel(),
        Channel::Rotation(Axis::X)
    );
    assert_eq!(ChannelValue::Depth(1.0).channel(), Channel::Depth);
    assert_eq!(Channel::Rotation(Axis::Z).to_string(), "rotation-z");
}

#[test]
fn deserialize_runs_constructor_checks() {
    let path = Behaviour::path(alpha(), vec![Point::new(0.0, 0.0), Point::new(8.0, 6.0)]).unwrap();
    let json = serde_json::to_value(&path).unwrap();
    let back: Behaviour = serde_json::from_value(json.clone()).unwrap();
    assert_eq!(back, path);

    for keep in [0, 1] {
        let mut short = json.clone();
        short["kind"]["Path"]["waypoints"]
            .as_array_mut()
            .unwrap()
            .truncate(keep);
        let err = serde_json::from_value::<Behaviour>(short).unwrap_err();
        assert!(err.to_string().contains("at least 2 waypoints"), "{err}");
    }

    let depth = Behaviour::depth(alpha(), -400.0, 0.0).unwrap();
    let mut json = serde_json::to_value(&depth).unwrap();
    json["kind"]["Depth"]["depth_start"] = serde_json::Value::Null;
    assert!(serde_json::from_value::<Behaviour>(json).is_err());
}

#[test]
fn short_waypoint_slices_do_not_panic() {
    assert_eq!(sample_path(&[], 0.5), Point::ZERO);
    let p = Point::new(3.0, 4.0);
    assert_eq!(sample_path(&[p], 0.5), p);
}
