use bevy::asset::{Assets, Handle};
use bevy::camera::visibility::Visibility;
use bevy::color::Color;
use bevy::ecs::component::Component;
use bevy::ecs::entity::Entity;
use bevy::ecs::hierarchy::ChildOf;
use bevy::ecs::query::Added;
use bevy::ecs::resource::Resource;
use bevy::ecs::system::{Commands, Query, Res, ResMut};
use bevy::math::Vec2;
use bevy::math::primitives::Rectangle;
use bevy::mesh::{Mesh, Mesh2d};
use bevy::sprite::{Anchor, Text2d};
use bevy::sprite_render::{ColorMaterial, MeshMaterial2d};
use bevy::text::TextColor;
use bevy::transform::components::Transform;
use math::UnitSystem;

#[cfg(test)]
mod tests;

/// Overlay widget reporting the ground distance spanned by the viewport.
///
/// Spawn this component on an empty entity; the plugin attaches the bar
/// geometry and the distance label as children and keeps them sized to the
/// current view. Fields may be mutated after spawn, the bar reflows on the
/// next frame.
#[derive(Debug, Clone, Component)]
pub struct ScaleBar {
    /// Viewport corner the bar hugs.
    pub corner:      Corner,
    /// Maximum on-screen length of the bar in logical pixels.
    ///
    /// The rendered bar is at most this long; the rounded distance it
    /// represents determines how much of it is drawn.
    pub max_width:   f32,
    /// Unit family used for the label.
    pub units:       UnitSystem,
    /// Inset from the viewport edges in logical pixels.
    pub margin:      Vec2,
    /// Baseline thickness in logical pixels.
    pub bar_height:  f32,
    /// End tick height in logical pixels.
    pub tick_height: f32,
    /// Label scale relative to the default font size.
    pub label_size:  f32,
    /// Color shared by the geometry and the label.
    pub color:       Color,
    /// Z translation of the bar root, placing it over map entities.
    pub z:           f32,
}

impl Default for ScaleBar {
    fn default() -> Self {
        Self {
            corner:      Corner::BottomLeft,
            max_width:   100.,
            units:       UnitSystem::Metric,
            margin:      Vec2::new(10., 10.),
            bar_height:  2.,
            tick_height: 8.,
            label_size:  0.5,
            color:       Color::WHITE,
            z:           500.,
        }
    }
}

/// Viewport corner anchoring a [`ScaleBar`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    serde::Serialize,
    serde::Deserialize,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
pub enum Corner {
    TopLeft,
    TopRight,
    #[default]
    BottomLeft,
    BottomRight,
}

impl Corner {
    #[must_use]
    pub const fn is_left(self) -> bool { matches!(self, Self::TopLeft | Self::BottomLeft) }

    #[must_use]
    pub const fn is_top(self) -> bool { matches!(self, Self::TopLeft | Self::TopRight) }

    /// Text anchor that hangs the label away from the nearest horizontal edge.
    #[must_use]
    pub const fn label_anchor(self) -> Anchor {
        if self.is_top() { Anchor::TOP_CENTER } else { Anchor::BOTTOM_CENTER }
    }
}

/// Role of a quad entity under a [`ScaleBar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Component)]
pub enum ScaleBarPart {
    /// Horizontal line along the bar.
    Baseline,
    /// Vertical tick at the local origin of the baseline.
    NearTick,
    /// Vertical tick at the far end of the baseline.
    FarTick,
}

impl ScaleBarPart {
    pub const ALL: [Self; 3] = [Self::Baseline, Self::NearTick, Self::FarTick];
}

/// Marks the text entity under a [`ScaleBar`].
#[derive(Component)]
pub struct ScaleBarLabel;

#[derive(Default, Resource)]
pub(crate) struct Meshes {
    quad: Option<Handle<Mesh>>,
}

impl Meshes {
    pub(crate) fn init_system(mut store: ResMut<Self>, mut meshes: ResMut<Assets<Mesh>>) {
        store.quad = Some(meshes.add(Rectangle::new(1., 1.)));
    }

    fn quad(&self) -> &Handle<Mesh> { self.quad.as_ref().expect("initialized during startup") }
}

pub(crate) fn spawn_system(
    mut commands: Commands,
    bar_query: Query<(Entity, &ScaleBar), Added<ScaleBar>>,
    meshes: Res<Meshes>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for (bar_entity, bar) in bar_query {
        bevy::log::debug!("spawn scale bar children for {bar_entity:?}");

        commands.entity(bar_entity).insert((Transform::IDENTITY, Visibility::Hidden));

        let material = materials.add(ColorMaterial { color: bar.color, ..Default::default() });

        for part in ScaleBarPart::ALL {
            commands.spawn((
                part,
                ChildOf(bar_entity),
                Mesh2d(meshes.quad().clone()),
                MeshMaterial2d(material.clone()),
                Transform::IDENTITY,
            ));
        }

        commands.spawn((
            ScaleBarLabel,
            ChildOf(bar_entity),
            Text2d::new(""),
            TextColor(bar.color),
            bar.corner.label_anchor(),
            Transform::IDENTITY,
        ));
    }
}
