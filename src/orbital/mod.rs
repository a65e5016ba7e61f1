//! Orbital geometry module
//!
//! This module turns the simulation clock into Sun/Earth/Moon geometry: ephemeris evaluation,
//! subsolar and sublunar points, Earth orientation, the per-frame scene snapshot and the
//! cached orbit path.

use bevy::prelude::*;

pub mod ephemeris;
pub mod moon;
pub mod orbit_path;
pub mod orientation;
pub mod snapshot;
pub mod subpoint;
pub mod sun;
pub mod time;

pub use ephemeris::EphemerisSource;
pub use orbit_path::OrbitPathCache;
pub use orientation::EarthOrientationSolver;
pub use snapshot::LatestSnapshot;
pub use time::{ClockTicker, SimulationClock};

use crate::config::AppConfig;
use crate::core::scale::ScaleSettings;

/// Ordering of the per-frame simulation pipeline. Consumers run after `OrbitPath`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Clock,
    Snapshot,
    OrbitPath,
}

/// Keep the orbit path sampled around the current simulated time.
pub fn refresh_orbit_path(
    clock: Res<SimulationClock>,
    scale: Res<ScaleSettings>,
    source: Res<EphemerisSource>,
    mut cache: ResMut<OrbitPathCache>,
) {
    let jd = clock.current_jd();
    if !cache.needs_resample(jd, &scale) {
        return;
    }
    match cache.ensure_fresh(jd, source.as_dyn(), &scale) {
        Ok(_) => info!(
            "Resampled orbit path: {} samples around JD {:.3}",
            cache.samples().len(),
            jd
        ),
        Err(err) => warn!("Orbit path resample failed, keeping previous path: {err:#}"),
    }
}

/// Plugin for the clock and the celestial geometry pipeline
pub struct OrbitalPlugin;

impl Plugin for OrbitalPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<AppConfig>()
            .cloned()
            .unwrap_or_default();

        app.insert_resource(SimulationClock::new(
            config.start_jd(),
            config.sample_interval_secs,
            config.speed_multiplier,
        ))
        .insert_resource(ScaleSettings::for_mode(config.scale_mode))
        .insert_resource(OrbitPathCache::new(config.orbit_window_days))
        .init_resource::<ClockTicker>()
        .init_resource::<EphemerisSource>()
        .init_resource::<EarthOrientationSolver>()
        .init_resource::<LatestSnapshot>()
        .configure_sets(
            Update,
            (
                SimulationSet::Clock,
                SimulationSet::Snapshot,
                SimulationSet::OrbitPath,
            )
                .chain(),
        )
        .add_systems(
            Update,
            (
                time::drive_simulation_clock.in_set(SimulationSet::Clock),
                snapshot::update_snapshot.in_set(SimulationSet::Snapshot),
                refresh_orbit_path.in_set(SimulationSet::OrbitPath),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sidereal::J2000_JD;
    use crate::orbital::ephemeris::testing::CountingEphemeris;
    use std::sync::Arc;

    fn orbit_world(ephemeris: Arc<CountingEphemeris>) -> (World, Schedule) {
        let mut world = World::new();
        world.insert_resource(SimulationClock::new(J2000_JD, 1.0, 1.0));
        world.insert_resource(ScaleSettings::default());
        world.insert_resource(EphemerisSource(ephemeris));
        world.insert_resource(OrbitPathCache::new(182));
        let mut schedule = Schedule::default();
        schedule.add_systems(refresh_orbit_path);
        (world, schedule)
    }

    fn anchor(world: &World) -> Option<f64> {
        world.resource::<OrbitPathCache>().path().map(|p| p.anchor_jd)
    }

    #[test]
    fn test_refresh_samples_once_and_reuses_cache() {
        let ephemeris = Arc::new(CountingEphemeris::default());
        let (mut world, mut schedule) = orbit_world(ephemeris.clone());

        schedule.run(&mut world);
        assert_eq!(anchor(&world), Some(J2000_JD));
        let sampled = ephemeris.calls();
        assert!(sampled > 0);

        world.resource_mut::<SimulationClock>().reset_to(J2000_JD + 100.0);
        schedule.run(&mut world);
        assert_eq!(ephemeris.calls(), sampled);
        assert_eq!(anchor(&world), Some(J2000_JD));
    }

    #[test]
    fn test_refresh_failure_keeps_previous_path() {
        let ephemeris = Arc::new(CountingEphemeris::default());
        let (mut world, mut schedule) = orbit_world(ephemeris.clone());
        schedule.run(&mut world);
        let samples = world.resource::<OrbitPathCache>().samples().to_vec();

        ephemeris.set_failing(true);
        world.resource_mut::<SimulationClock>().reset_to(J2000_JD + 200.0);
        schedule.run(&mut world);
        assert_eq!(anchor(&world), Some(J2000_JD));
        assert_eq!(world.resource::<OrbitPathCache>().samples(), samples.as_slice());

        ephemeris.set_failing(false);
        schedule.run(&mut world);
        assert_eq!(anchor(&world), Some(J2000_JD + 200.0));
    }
}
