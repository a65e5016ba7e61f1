//! Text heads-up display

use bevy::prelude::*;

use crate::camera::CameraMode;
use crate::core::coordinates::{GeographicPoint, cartesian_to_spherical};
use crate::core::scale::ScaleSettings;
use crate::orbital::snapshot::CelestialSnapshot;
use crate::orbital::{LatestSnapshot, SimulationClock};
use crate::ui::state::UiState;

#[derive(Component)]
pub struct HudText;

pub fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgb(0.75, 0.9, 0.95)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(8.0),
            left: Val::Px(10.0),
            ..default()
        },
        HudText,
        Name::new("HUD"),
    ));
}

/// Format a point as `12.34°N 56.78°W`. Longitude is west-positive.
pub fn format_point(point: &GeographicPoint) -> String {
    let (lat, lon) = point.as_degrees();
    let ns = if lat >= 0.0 { 'N' } else { 'S' };
    let ew = if lon >= 0.0 { 'W' } else { 'E' };
    format!("{:.2}°{} {:.2}°{}", lat.abs(), ns, lon.abs(), ew)
}

pub fn hud_text(
    clock: &SimulationClock,
    scale: &ScaleSettings,
    mode: &CameraMode,
    snapshot: Option<&CelestialSnapshot>,
) -> String {
    let utc = clock
        .utc()
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| format!("JD {:.5}", clock.current_jd()));
    let state = if clock.is_paused() { "paused" } else { "running" };

    let mut lines = vec![
        utc,
        format!("Speed {}x ({state})", clock.speed_multiplier()),
        format!("Scale {}  Camera {}", scale.mode.label(), mode.label()),
    ];
    if let Some(s) = snapshot {
        let (earth_lon, _, _) = cartesian_to_spherical(s.earth_position);
        lines.push(format!(
            "Earth heliocentric longitude {:.2}°",
            earth_lon.to_degrees()
        ));
        lines.push(format!("Subsolar  {}", format_point(&s.subsolar)));
        lines.push(format!(
            "Sublunar  {}  ({:.1} Earth radii)",
            format_point(&s.sublunar.point),
            s.sublunar.range_earth_radii
        ));
    }
    lines.join("\n")
}

pub fn update_hud(
    clock: Res<SimulationClock>,
    scale: Res<ScaleSettings>,
    mode: Res<CameraMode>,
    snapshot: Res<LatestSnapshot>,
    ui: Res<UiState>,
    mut hud: Query<(&mut Text, &mut Visibility), With<HudText>>,
) {
    let dirty = clock.is_changed()
        || scale.is_changed()
        || mode.is_changed()
        || snapshot.is_changed()
        || ui.is_changed();
    if !dirty {
        return;
    }
    for (mut text, mut visibility) in &mut hud {
        *visibility = if ui.show_hud {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        text.0 = hud_text(&clock, &scale, &mode, snapshot.get());
    }
}
