use bevy::app::{self, App};
use bevy::asset::Assets;
use bevy::camera::visibility::Visibility;
use bevy::ecs::hierarchy::Children;
use bevy::mesh::Mesh;
use bevy::sprite_render::ColorMaterial;
use bevy::transform::components::Transform;
use math::UnitSystem;

use super::{Corner, Meshes, ScaleBar, ScaleBarLabel, ScaleBarPart, spawn_system};

fn test_app() -> App {
    let mut app = App::new();
    app.insert_resource(Assets::<Mesh>::default());
    app.insert_resource(Assets::<ColorMaterial>::default());
    app.init_resource::<Meshes>();
    app.add_systems(app::Startup, Meshes::init_system);
    app.add_systems(app::Update, spawn_system);
    app
}

#[test]
fn defaults_follow_convention() {
    let bar = ScaleBar::default();
    assert_eq!(bar.corner, Corner::BottomLeft);
    assert_eq!(bar.max_width, 100.);
    assert_eq!(bar.units, UnitSystem::Metric);
}

#[test]
fn spawn_attaches_children_once() {
    let mut app = test_app();
    let bar = app.world_mut().spawn(ScaleBar::default()).id();
    app.update();

    let children = app.world().entity(bar).get::<Children>().expect("children were spawned");
    assert_eq!(children.len(), 4);

    let world = app.world_mut();
    let mut part_query = world.query::<&ScaleBarPart>();
    let parts = part_query.iter(world).copied().collect::<Vec<_>>();
    for part in ScaleBarPart::ALL {
        assert!(parts.contains(&part), "{part:?} missing from {parts:?}");
    }
    let mut label_query = world.query::<&ScaleBarLabel>();
    assert_eq!(label_query.iter(world).count(), 1);

    // The Added filter must not fire again for the same bar.
    app.update();
    let children = app.world().entity(bar).get::<Children>().expect("children remain");
    assert_eq!(children.len(), 4);
}

#[test]
fn spawn_completes_the_root_bundle() {
    let mut app = test_app();
    let bar = app.world_mut().spawn(ScaleBar::default()).id();
    app.update();

    let root = app.world().entity(bar);
    assert!(root.get::<Transform>().is_some());
    assert_eq!(root.get::<Visibility>(), Some(&Visibility::Hidden));
}

#[test]
fn despawn_takes_children_along() {
    let mut app = test_app();
    let bar = app.world_mut().spawn(ScaleBar::default()).id();
    app.update();

    app.world_mut().entity_mut(bar).despawn();

    let world = app.world_mut();
    let mut part_query = world.query::<&ScaleBarPart>();
    assert_eq!(part_query.iter(world).count(), 0);
    let mut label_query = world.query::<&ScaleBarLabel>();
    assert_eq!(label_query.iter(world).count(), 0);
}
