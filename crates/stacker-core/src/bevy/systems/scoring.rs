//! Scoring systems.
//!
//! Translates collision start/end events involving a sensor band into score
//! deltas: the band's value is added when a shape's overlap begins and
//! subtracted when it ends.

use bevy::prelude::*;

use crate::bevy::rapier_plugin::CollisionEvent;
use crate::bevy::{BandOverlapEvent, ScoreChangedEvent, SensorBand, StackGameState};

/// System to apply band overlap events to the score.
pub fn check_band_overlaps(
    mut collision_events: MessageReader<CollisionEvent>,
    bands: Query<&SensorBand>,
    mut game_state: ResMut<StackGameState>,
    mut overlap_events: MessageWriter<BandOverlapEvent>,
    mut score_events: MessageWriter<ScoreChangedEvent>,
) {
    for event in collision_events.read() {
        let (e1, e2, entering) = match event {
            CollisionEvent::Started(e1, e2) => (*e1, *e2, true),
            CollisionEvent::Stopped(e1, e2) => (*e1, *e2, false),
        };

        // The band may be on either side of the pair
        let (band_entity, shape_entity) = if bands.contains(e1) {
            (e1, e2)
        } else if bands.contains(e2) {
            (e2, e1)
        } else {
            continue;
        };

        let Ok(band) = bands.get(band_entity) else {
            continue;
        };

        let (delta, total) = if entering {
            (band.points, game_state.score.overlap_started(band.points))
        } else {
            (-band.points, game_state.score.overlap_ended(band.points))
        };

        tracing::debug!(
            "Band {} overlap {} for {:?}: {:+} -> {}",
            band.band_index,
            if entering { "started" } else { "ended" },
            shape_entity,
            delta,
            total
        );

        overlap_events.write(BandOverlapEvent {
            shape: shape_entity,
            band: band_entity,
            points: band.points,
            entering,
        });
        score_events.write(ScoreChangedEvent { delta, total });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{ArenaConfig, ScoreBand};
    use crate::bevy::test_utils::TestApp;
    use crate::bevy::{ArenaLoadedEvent, FallingShape, StateStores};

    /// A narrow arena with a single band low enough that any resting shape
    /// overlaps it, and no starter boxes.
    fn low_band_arena() -> ArenaConfig {
        let mut config = ArenaConfig::default_classic();
        config.meta.name = "low-band".to_string();
        config.starter_boxes.clear();
        config.bands = vec![ScoreBand { y: 10.0, points: 250 }];
        config.spawn_point = [600.0, 300.0];
        config
    }

    #[test]
    fn test_synthetic_overlap_events_move_the_score() {
        let mut app = TestApp::new();
        app.load_arena(low_band_arena());

        let band = app.single_band_entity();
        let shape = app.world_mut().spawn_empty().id();

        // check_band_overlaps runs in FixedUpdate, so drive one fixed step
        app.write_message(CollisionEvent::Started(shape, band));
        app.step_physics(1);
        assert_eq!(app.score(), 250);
        assert!(!app.world().resource::<Messages<BandOverlapEvent>>().is_empty());

        // Reversed pair ordering on the way out
        app.write_message(CollisionEvent::Stopped(band, shape));
        app.step_physics(1);
        assert_eq!(app.score(), 0);
    }

    #[test]
    fn test_non_band_pairs_are_ignored() {
        let mut app = TestApp::new();
        app.load_arena(low_band_arena());

        let a = app.world_mut().spawn_empty().id();
        let b = app.world_mut().spawn_empty().id();
        app.write_message(CollisionEvent::Started(a, b));
        app.step_physics(1);

        assert_eq!(app.score(), 0);
    }

    #[test]
    fn test_shape_settling_on_low_band_scores_its_value() {
        let mut app = TestApp::new();
        app.load_arena(low_band_arena());
        app.spawn_shape();

        // Let the shape fall from the spawn point and come to rest on the
        // ground; every catalogue shape is thick enough to cover y=10.
        app.step_physics(600);

        assert_eq!(app.score(), 250);
        assert_eq!(app.game_state().score.active_overlaps(), 1);
    }

    #[test]
    fn test_score_store_tracks_collision_frames() {
        let mut app = TestApp::new();
        app.load_arena(low_band_arena());
        app.spawn_shape();
        app.step_physics(600);

        let stores = app.world().resource::<StateStores>().clone();
        assert_eq!(stores.score.get_score(), 250);
        assert!(stores.score.get_version() > 0);
    }

    #[test]
    fn test_reset_rebuilds_world_and_zeroes_score() {
        let mut app = TestApp::new();
        app.load_arena(low_band_arena());
        app.spawn_shape();
        app.spawn_shape();
        app.step_physics(600);
        assert_ne!(app.score(), 0);

        app.reset_game();
        // One extra frame for the loader to consume the reload event
        app.update();

        assert_eq!(app.score(), 0);
        let shapes = app
            .world_mut()
            .query::<&FallingShape>()
            .iter(app.world())
            .count();
        assert_eq!(shapes, 0, "no starter boxes in this arena");

        let stores = app.world().resource::<StateStores>().clone();
        assert_eq!(stores.score.get_score(), 0);
    }

    #[test]
    fn test_classic_arena_rests_at_zero() {
        let mut app = TestApp::new();
        app.load_arena(ArenaConfig::default_classic());
        assert!(!app.world().resource::<Messages<ArenaLoadedEvent>>().is_empty());

        // Starter boxes settle far below the lowest band
        app.step_physics(300);
        assert_eq!(app.score(), 0);
    }
}
