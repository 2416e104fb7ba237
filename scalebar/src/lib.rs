//! Map scale bar overlay for bevy apps.
//!
//! [`ScaleBarPlugin`] keeps a distance scale in a corner of the viewport of
//! the camera marked with [`MapCamera`]. The host supplies the inverse of its
//! map projection as a [`MapProjection`] resource; picking a round distance,
//! sizing the bar and writing the label are handled here.
//!
//! Spawn a [`ScaleBar`] component to get a bar. Its geometry lives in world
//! space under the bar entity, so it works with rotated and zoomed cameras
//! without a separate UI pass.

use std::marker::PhantomData;

use bevy::app::{self, App, Plugin};
use bevy::ecs::schedule::{IntoScheduleConfigs, SystemSet};
use itertools::Itertools;
use strum::IntoEnumIterator;

mod bar;
mod projection;
mod update;

pub use bar::{Corner, ScaleBar, ScaleBarLabel, ScaleBarPart};
pub use projection::{MapCamera, MapProjection};

/// Adds scale bar maintenance systems for the projection type `P`.
pub struct ScaleBarPlugin<P>(PhantomData<P>);

impl<P> Default for ScaleBarPlugin<P> {
    fn default() -> Self { Self(PhantomData) }
}

impl<P: MapProjection> Plugin for ScaleBarPlugin<P> {
    fn build(&self, app: &mut App) {
        app.init_resource::<bar::Meshes>();
        app.add_systems(app::Startup, bar::Meshes::init_system);

        app.add_systems(app::Update, bar::spawn_system.in_set(SystemSets::Spawn));
        app.add_systems(app::Update, update::update_system::<P>.in_set(SystemSets::Update));

        for (before, after) in SystemSets::iter().tuple_windows() {
            app.configure_sets(app::Update, before.before(after));
        }
        app.configure_sets(app::Update, SystemSets::Spawn.ambiguous_with(SystemSets::Spawn));
        app.configure_sets(app::Update, SystemSets::Update.ambiguous_with(SystemSets::Update));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet, strum::EnumIter)]
pub enum SystemSets {
    /// Attach child geometry to newly added [`ScaleBar`]s.
    Spawn,
    /// Reflow bars for the current view.
    Update,
}
