use bevy::asset::Assets;
use bevy::camera::{Camera, ViewportConversionError};
use bevy::camera::visibility::Visibility;
use bevy::ecs::change_detection::{DetectChanges, DetectChangesMut, Ref};
use bevy::ecs::entity::Entity;
use bevy::ecs::hierarchy::Children;
use bevy::ecs::query::{With, Without};
use bevy::ecs::system::{Query, Res, ResMut, Single};
use bevy::math::{Quat, Vec2, Vec3};
use bevy::sprite::{Anchor, Text2d};
use bevy::sprite_render::{ColorMaterial, MeshMaterial2d};
use bevy::text::TextColor;
use bevy::transform::components::{GlobalTransform, Transform};
use math::ScaleFigure;

use crate::bar::{Corner, ScaleBar, ScaleBarLabel, ScaleBarPart};
use crate::projection::{MapCamera, MapProjection};

#[cfg(test)]
mod tests;

// Local Z offsets under the bar root, ordering the label over the ticks over
// the baseline.
const TICK_LAYER: f32 = 1e-4;
const LABEL_LAYER: f32 = 2e-4;

/// Gap between the tick tips and the label, in logical pixels.
const LABEL_GAP: f32 = 2.;

pub(crate) fn update_system<P: MapProjection>(
    camera_query: Single<(Ref<Camera>, Ref<GlobalTransform>), With<MapCamera>>,
    projection: Res<P>,
    bar_query: Query<(Entity, Ref<ScaleBar>, &mut Transform, &mut Visibility)>,
    children_query: Query<&Children>,
    mut part_query: Query<
        (&ScaleBarPart, &mut Transform, &MeshMaterial2d<ColorMaterial>),
        Without<ScaleBar>,
    >,
    mut label_query: Query<
        (&mut Text2d, &mut Transform, &mut Anchor, &mut TextColor),
        (With<ScaleBarLabel>, Without<ScaleBar>, Without<ScaleBarPart>),
    >,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let (camera, camera_tf) = camera_query.into_inner();
    let view_changed = camera.is_changed() || camera_tf.is_changed() || projection.is_changed();

    for (bar_entity, bar, mut bar_tf, mut visibility) in bar_query {
        if !view_changed && !bar.is_changed() {
            continue;
        }

        let Some(viewport) = camera.logical_viewport_size() else {
            visibility.set_if_neq(Visibility::Hidden);
            continue;
        };

        // Sample the widest admissible bar along the vertical center of the
        // viewport, where distortion of the projection is most representative.
        let center_y = viewport.y / 2.;
        let [near_geo, far_geo] = match (|| {
            Ok::<_, ViewportConversionError>([
                camera.viewport_to_world_2d(&camera_tf, Vec2::new(0., center_y))?,
                camera.viewport_to_world_2d(&camera_tf, Vec2::new(bar.max_width, center_y))?,
            ])
        })() {
            Ok(points) => points.map(|world| projection.unproject(world)),
            Err(err) => {
                bevy::log::error!("sample viewport for scale: {err:?}");
                continue;
            }
        };

        let Some(figure) = ScaleFigure::select(near_geo.distance_to(far_geo), bar.units) else {
            visibility.set_if_neq(Visibility::Hidden);
            continue;
        };

        #[expect(clippy::cast_possible_truncation, reason = "ratio is within (0, 1]")]
        let bar_px = bar.max_width * figure.ratio as f32;
        let (origin_px, end_px) = bar_span(bar.corner, viewport, bar.margin, bar_px);

        let [origin, end, above_origin] = match (|| {
            Ok::<_, ViewportConversionError>([
                camera.viewport_to_world_2d(&camera_tf, origin_px)?,
                camera.viewport_to_world_2d(&camera_tf, end_px)?,
                camera.viewport_to_world_2d(&camera_tf, origin_px - Vec2::new(0., 1.))?,
            ])
        })() {
            Ok(points) => points,
            Err(err) => {
                bevy::log::error!("place scale bar in world: {err:?}");
                continue;
            }
        };

        let frame = BarFrame::compute(origin, end, above_origin - origin, bar.z, bar.corner);

        visibility.set_if_neq(Visibility::Visible);
        bar_tf.set_if_neq(frame.root);

        let Ok(children) = children_query.get(bar_entity) else {
            bevy::log::error!("scale bar {bar_entity:?} lost its children");
            continue;
        };
        for &child in children {
            if let Ok((&part, mut part_tf, material_handle)) = part_query.get_mut(child) {
                part_tf.set_if_neq(part_transform(part, &bar, &frame));
                if bar.is_changed() {
                    let material = materials
                        .get_mut(&material_handle.0)
                        .expect("asset from strong handle must exist");
                    material.color = bar.color;
                }
            } else if let Ok((mut text, mut text_tf, mut anchor, mut text_color)) =
                label_query.get_mut(child)
            {
                if text.0 != figure.label {
                    text.0.clone_from(&figure.label);
                }
                text_tf.set_if_neq(label_transform(&bar, &frame));
                anchor.set_if_neq(bar.corner.label_anchor());
                if bar.is_changed() {
                    text_color.0 = bar.color;
                }
            }
        }
    }
}

/// World-space layout of one bar for the current view.
struct BarFrame {
    /// Transform of the bar root. Its local X axis runs along the baseline
    /// towards screen right, its local Y axis towards screen up.
    root:   Transform,
    /// Baseline length in world units.
    length: f32,
    /// World units per logical pixel.
    px:     f32,
    /// Local Y direction pointing from the anchored edge into the viewport.
    inward: f32,
}

impl BarFrame {
    fn compute(origin: Vec2, end: Vec2, screen_up: Vec2, z: f32, corner: Corner) -> Self {
        let along = end - origin;
        Self {
            root:   Transform {
                translation: origin.extend(z),
                rotation:    Quat::from_rotation_z(along.to_angle()),
                scale:       Vec3::ONE,
            },
            length: along.length(),
            px:     screen_up.length(),
            inward: if corner.is_top() { -1. } else { 1. },
        }
    }
}

/// Viewport position of `corner` inset by `margin`.
///
/// Viewport coordinates originate at the top left with Y growing downwards.
fn corner_anchor(corner: Corner, viewport: Vec2, margin: Vec2) -> Vec2 {
    Vec2 {
        x: if corner.is_left() { margin.x } else { viewport.x - margin.x },
        y: if corner.is_top() { margin.y } else { viewport.y - margin.y },
    }
}

/// Viewport positions of the two baseline ends, ordered left to right so that
/// label text is never rendered upside down.
fn bar_span(corner: Corner, viewport: Vec2, margin: Vec2, width: f32) -> (Vec2, Vec2) {
    let anchor = corner_anchor(corner, viewport, margin);
    let width = Vec2::new(width, 0.);
    if corner.is_left() { (anchor, anchor + width) } else { (anchor - width, anchor) }
}

fn part_transform(part: ScaleBarPart, bar: &ScaleBar, frame: &BarFrame) -> Transform {
    let thickness = bar.bar_height * frame.px;
    let tick_len = bar.tick_height * frame.px;
    match part {
        ScaleBarPart::Baseline => Transform {
            translation: Vec3::new(frame.length / 2., frame.inward * thickness / 2., 0.),
            rotation:    Quat::IDENTITY,
            scale:       Vec3::new(frame.length, thickness, 1.),
        },
        ScaleBarPart::NearTick => tick_transform(thickness / 2., thickness, tick_len, frame),
        ScaleBarPart::FarTick => {
            tick_transform(frame.length - thickness / 2., thickness, tick_len, frame)
        }
    }
}

fn tick_transform(x: f32, thickness: f32, tick_len: f32, frame: &BarFrame) -> Transform {
    Transform {
        translation: Vec3::new(x, frame.inward * tick_len / 2., TICK_LAYER),
        rotation:    Quat::IDENTITY,
        scale:       Vec3::new(thickness, tick_len, 1.),
    }
}

fn label_transform(bar: &ScaleBar, frame: &BarFrame) -> Transform {
    Transform {
        translation: Vec3::new(
            frame.length / 2.,
            frame.inward * (bar.tick_height + LABEL_GAP) * frame.px,
            LABEL_LAYER,
        ),
        rotation:    Quat::IDENTITY,
        scale:       Vec3::splat(bar.label_size * frame.px),
    }
}
