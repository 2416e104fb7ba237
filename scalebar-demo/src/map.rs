use bevy::app::{self, App, Plugin};
use bevy::asset::Assets;
use bevy::camera::{Camera, Camera2d};
use bevy::color::Color;
use bevy::ecs::message::MessageReader;
use bevy::ecs::query::With;
use bevy::ecs::resource::Resource;
use bevy::ecs::schedule::IntoScheduleConfigs;
use bevy::ecs::system::{Commands, Local, Res, ResMut, Single};
use bevy::input::ButtonInput;
use bevy::input::mouse::{MouseButton, MouseMotion, MouseWheel};
use bevy::math::{Vec2, Vec3};
use bevy::math::primitives::Rectangle;
use bevy::mesh::{Mesh, Mesh2d};
use bevy::sprite_render::{ColorMaterial, MeshMaterial2d};
use bevy::transform::components::{GlobalTransform, Transform};
use bevy::window::Window;
use math::GeoPos;
use scalebar::{MapCamera, MapProjection};

/// Scale applied per scroll line.
const SCROLL_STEP: f32 = 1.25;

pub struct Plug;

impl Plugin for Plug {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlateCarree>();
        app.add_systems(app::Startup, setup_system);
        app.add_systems(
            app::Update,
            zoom_system.before(drag_system).before(scalebar::SystemSets::Spawn),
        );
        app.add_systems(app::Update, drag_system.before(scalebar::SystemSets::Spawn));
    }
}

/// Equirectangular mapping, one world unit per degree.
#[derive(Resource, Default)]
pub struct PlateCarree;

impl MapProjection for PlateCarree {
    fn unproject(&self, world: Vec2) -> GeoPos {
        GeoPos { lat: f64::from(world.y).clamp(-90., 90.), lng: f64::from(world.x) }
    }
}

fn setup_system(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.spawn((
        Camera2d,
        MapCamera,
        Transform::from_translation(Vec3::new(9., 47., 0.)).with_scale(Vec3::splat(0.01)),
    ));

    // Graticule at 10 degree spacing, as a panning and zooming reference.
    let line = meshes.add(Rectangle::new(1., 1.));
    let material =
        materials.add(ColorMaterial { color: Color::srgb(0.25, 0.3, 0.35), ..Default::default() });

    for lng in (-180i16..=180).step_by(10) {
        commands.spawn((
            Mesh2d(line.clone()),
            MeshMaterial2d(material.clone()),
            Transform::from_translation(Vec3::new(f32::from(lng), 0., 0.))
                .with_scale(Vec3::new(0.05, 180., 1.)),
        ));
    }
    for lat in (-90i16..=90).step_by(10) {
        commands.spawn((
            Mesh2d(line.clone()),
            MeshMaterial2d(material.clone()),
            Transform::from_translation(Vec3::new(0., f32::from(lat), 0.))
                .with_scale(Vec3::new(360., 0.05, 1.)),
        ));
    }
}

#[derive(Clone, Copy)]
struct DraggingState {
    start_cursor_pos:  Vec2,
    start_translation: Vec3,
}

fn drag_system(
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion_messages: MessageReader<MouseMotion>,
    mut dragging: Local<Option<DraggingState>>,
    window: Option<Single<&Window>>,
    camera_query: Single<(&Camera, &GlobalTransform, &mut Transform), With<MapCamera>>,
) {
    let Some(window) = window else { return };
    let Some(cursor_pos) = window.cursor_position() else { return };
    let (camera, camera_global_tf, mut camera_tf) = camera_query.into_inner();

    match (&mut *dragging, buttons.pressed(MouseButton::Left)) {
        (option @ Some(_), false) => {
            // stop dragging
            *option = None;
        }
        (option @ None, true) => {
            // start dragging
            *option = Some(DraggingState {
                start_cursor_pos:  cursor_pos,
                start_translation: camera_tf.translation,
            });
        }
        (Some(_), true) // continue dragging
        | (None, false) => {} // not dragging
    }

    let Some(DraggingState { start_cursor_pos, start_translation }) = *dragging else {
        return;
    };

    let has_moved = motion_messages.read().count() > 0; // drain all messages in the iterator
    if !has_moved {
        return;
    }

    // Keep the grabbed world position under the cursor.
    let curr_world_pos = camera.viewport_to_world_2d(camera_global_tf, cursor_pos);
    let start_world_pos = camera.viewport_to_world_2d(camera_global_tf, start_cursor_pos);
    if let (Ok(curr_world_pos), Ok(start_world_pos)) = (curr_world_pos, start_world_pos) {
        camera_tf.translation =
            start_translation - Vec3::from((curr_world_pos - start_world_pos, 0.));
    }
}

fn zoom_system(
    mut wheel_messages: MessageReader<MouseWheel>,
    camera_query: Single<&mut Transform, With<MapCamera>>,
) {
    let mut camera_tf = camera_query.into_inner();
    for message in wheel_messages.read() {
        camera_tf.scale *= SCROLL_STEP.powf(-message.y);
    }
}
