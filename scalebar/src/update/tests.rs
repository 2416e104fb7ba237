use bevy::app::{self, App};
use bevy::asset::Assets;
use bevy::camera::Camera;
use bevy::camera::visibility::Visibility;
use bevy::ecs::resource::Resource;
use bevy::math::{Quat, Vec2, Vec3};
use bevy::sprite_render::ColorMaterial;
use bevy::transform::components::{GlobalTransform, Transform};
use math::GeoPos;
use strum::IntoEnumIterator;

use super::{
    BarFrame, LABEL_LAYER, TICK_LAYER, bar_span, corner_anchor, label_transform, part_transform,
    update_system,
};
use crate::bar::{Corner, ScaleBar, ScaleBarPart};
use crate::projection::{MapCamera, MapProjection};

const VIEWPORT: Vec2 = Vec2::new(800., 600.);
const MARGIN: Vec2 = Vec2::new(10., 10.);

#[test]
fn anchors_inset_by_margin() {
    for (corner, expect) in [
        (Corner::TopLeft, Vec2::new(10., 10.)),
        (Corner::TopRight, Vec2::new(790., 10.)),
        (Corner::BottomLeft, Vec2::new(10., 590.)),
        (Corner::BottomRight, Vec2::new(790., 590.)),
    ] {
        assert_eq!(corner_anchor(corner, VIEWPORT, MARGIN), expect, "{corner:?}");
    }
}

#[test]
fn spans_run_left_to_right() {
    for corner in Corner::iter() {
        let (origin, end) = bar_span(corner, VIEWPORT, MARGIN, 70.);
        assert!(origin.x < end.x, "{corner:?}: {origin} .. {end}");
        assert_eq!(end.x - origin.x, 70., "{corner:?}");
        assert_eq!(origin.y, end.y, "{corner:?}");
    }

    // Left corners grow rightwards from the anchor, right corners end at it.
    assert_eq!(
        bar_span(Corner::BottomLeft, VIEWPORT, MARGIN, 70.),
        (Vec2::new(10., 590.), Vec2::new(80., 590.))
    );
    assert_eq!(
        bar_span(Corner::BottomRight, VIEWPORT, MARGIN, 70.),
        (Vec2::new(720., 590.), Vec2::new(790., 590.))
    );
}

#[test]
fn frame_follows_world_ends() {
    let frame = BarFrame::compute(
        Vec2::new(1., 2.),
        Vec2::new(4., 6.),
        Vec2::new(0., 0.5),
        500.,
        Corner::BottomLeft,
    );
    assert_eq!(frame.root.translation, Vec3::new(1., 2., 500.));
    assert_eq!(frame.root.rotation, Quat::from_rotation_z(4f32.atan2(3.)));
    assert_eq!(frame.root.scale, Vec3::ONE);
    assert_eq!(frame.length, 5.);
    assert_eq!(frame.px, 0.5);
    assert_eq!(frame.inward, 1.);

    let top = BarFrame::compute(Vec2::ZERO, Vec2::X, Vec2::Y, 0., Corner::TopRight);
    assert_eq!(top.inward, -1.);
}

#[test]
fn parts_cover_the_span() {
    let bar = ScaleBar::default();
    let frame =
        BarFrame::compute(Vec2::ZERO, Vec2::new(50., 0.), Vec2::Y, 500., Corner::BottomLeft);

    let baseline = part_transform(ScaleBarPart::Baseline, &bar, &frame);
    assert_eq!(baseline.translation, Vec3::new(25., 1., 0.));
    assert_eq!(baseline.scale, Vec3::new(50., 2., 1.));

    let near = part_transform(ScaleBarPart::NearTick, &bar, &frame);
    assert_eq!(near.translation, Vec3::new(1., 4., TICK_LAYER));
    assert_eq!(near.scale, Vec3::new(2., 8., 1.));

    let far = part_transform(ScaleBarPart::FarTick, &bar, &frame);
    assert_eq!(far.translation, Vec3::new(49., 4., TICK_LAYER));

    let label = label_transform(&bar, &frame);
    assert_eq!(label.translation, Vec3::new(25., 10., LABEL_LAYER));
    assert_eq!(label.scale, Vec3::splat(0.5));
}

#[test]
fn top_corners_hang_downward() {
    let bar = ScaleBar { corner: Corner::TopLeft, ..ScaleBar::default() };
    let frame = BarFrame::compute(Vec2::ZERO, Vec2::new(50., 0.), Vec2::Y, 500., Corner::TopLeft);

    let baseline = part_transform(ScaleBarPart::Baseline, &bar, &frame);
    assert_eq!(baseline.translation.y, -1.);
    assert_eq!(label_transform(&bar, &frame).translation.y, -10.);
}

#[derive(Resource)]
struct FlatWorld;

impl MapProjection for FlatWorld {
    fn unproject(&self, world: Vec2) -> GeoPos {
        GeoPos { lat: f64::from(world.y), lng: f64::from(world.x) }
    }
}

#[test]
fn bars_hide_while_viewport_is_unavailable() {
    let mut app = App::new();
    app.insert_resource(FlatWorld);
    app.insert_resource(Assets::<ColorMaterial>::default());
    app.add_systems(app::Update, update_system::<FlatWorld>);
    app.world_mut().spawn((Camera::default(), GlobalTransform::default(), MapCamera));
    let bar = app
        .world_mut()
        .spawn((ScaleBar::default(), Transform::IDENTITY, Visibility::Visible))
        .id();

    // A camera that renders to no target reports no viewport, so the bar
    // cannot be measured and must disappear instead of going stale.
    app.update();
    assert_eq!(app.world().entity(bar).get::<Visibility>(), Some(&Visibility::Hidden));
}

#[test]
fn update_stands_down_without_camera() {
    let mut app = App::new();
    app.insert_resource(FlatWorld);
    app.insert_resource(Assets::<ColorMaterial>::default());
    app.add_systems(app::Update, update_system::<FlatWorld>);
    let bar = app
        .world_mut()
        .spawn((ScaleBar::default(), Transform::IDENTITY, Visibility::Visible))
        .id();

    app.update();
    assert_eq!(app.world().entity(bar).get::<Visibility>(), Some(&Visibility::Visible));
}
