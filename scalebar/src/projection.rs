use bevy::ecs::component::Component;
use bevy::ecs::resource::Resource;
use bevy::math::Vec2;
use math::GeoPos;

/// Inverse of the host map projection.
///
/// The plugin never projects forward. It samples viewport pixels, converts them
/// to world-space points on the camera plane, and asks this resource which
/// geographic position each point displays.
pub trait MapProjection: Resource {
    /// Returns the geographic position rendered at `world` on the camera plane.
    fn unproject(&self, world: Vec2) -> GeoPos;
}

/// Marks the camera whose viewport the scale bar measures.
///
/// Exactly one camera entity should carry this marker. While none exists the
/// bar is left untouched.
#[derive(Component)]
pub struct MapCamera;
