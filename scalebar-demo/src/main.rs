use std::env;
use std::time::Duration;

use bevy::app::{self, App, AppExit, PluginGroup};
use bevy::ecs::schedule::{self, ScheduleBuildSettings};
use bevy::window::{Window, WindowPlugin};
use bevy::winit::WinitSettings;
use clap::Parser;
use math::UnitSystem;
use scalebar::{Corner, ScaleBar, ScaleBarPlugin};

mod map;

#[derive(clap::Parser)]
#[clap(version, about)]
struct Options {
    /// Window corner to pin the bar to.
    #[clap(long, value_enum, default_value_t = CornerArg::BottomLeft)]
    corner:    CornerArg,
    /// Maximum bar length in logical pixels.
    #[clap(long, default_value_t = 100.)]
    max_width: f32,
    /// Unit system for the label, inferred from the locale when omitted.
    #[clap(long, value_enum)]
    units:     Option<UnitsArg>,
    /// Locale tag to infer the unit system from, e.g. `en-US`.
    #[clap(long)]
    locale:    Option<String>,
}

/// Mirrors [`Corner`] for command line parsing.
#[derive(Clone, Copy, clap::ValueEnum)]
enum CornerArg {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl From<CornerArg> for Corner {
    fn from(arg: CornerArg) -> Self {
        match arg {
            CornerArg::TopLeft => Self::TopLeft,
            CornerArg::TopRight => Self::TopRight,
            CornerArg::BottomLeft => Self::BottomLeft,
            CornerArg::BottomRight => Self::BottomRight,
        }
    }
}

/// Mirrors [`UnitSystem`] for command line parsing.
#[derive(Clone, Copy, clap::ValueEnum)]
enum UnitsArg {
    Metric,
    Imperial,
    Nautical,
}

impl From<UnitsArg> for UnitSystem {
    fn from(arg: UnitsArg) -> Self {
        match arg {
            UnitsArg::Metric => Self::Metric,
            UnitsArg::Imperial => Self::Imperial,
            UnitsArg::Nautical => Self::Nautical,
        }
    }
}

/// Locale tag from the command line, falling back to the usual environment chain.
fn locale_tag(options: &Options) -> String {
    options
        .locale
        .clone()
        .or_else(|| env::var("LC_ALL").ok().filter(|var| !var.is_empty()))
        .or_else(|| env::var("LC_MEASUREMENT").ok().filter(|var| !var.is_empty()))
        .or_else(|| env::var("LANG").ok().filter(|var| !var.is_empty()))
        .unwrap_or_default()
}

fn main_app(options: Options) -> App {
    let units = match options.units {
        Some(units) => units.into(),
        None => UnitSystem::from_locale(&locale_tag(&options)),
    };

    let mut app = App::new();
    app.add_plugins((
        bevy::DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window { title: "scalebar demo".into(), ..Default::default() }),
            ..Default::default()
        }),
        ScaleBarPlugin::<map::PlateCarree>::default(),
        map::Plug,
    ));

    app.world_mut().spawn(ScaleBar {
        corner: options.corner.into(),
        max_width: options.max_width,
        units,
        ..ScaleBar::default()
    });

    app.edit_schedule(app::Update, |schedule| {
        schedule.set_build_settings(ScheduleBuildSettings {
            ambiguity_detection: schedule::LogLevel::Warn,
            ..Default::default()
        });
    });

    app.insert_resource(WinitSettings {
        focused_mode:   bevy::winit::UpdateMode::reactive_low_power(Duration::from_millis(10)),
        unfocused_mode: bevy::winit::UpdateMode::reactive_low_power(Duration::from_millis(500)),
    });

    app
}

fn main() -> AppExit { main_app(Options::parse()).run() }
