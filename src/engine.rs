use log::debug;

use crate::ephemeris::{ApproximateEphemeris, Ephemeris};
use crate::error::Result;
use crate::geodesy;
use crate::path::sample_path;
use crate::seat::{recommend_seat_by_bearing, recommend_seat_weighted};
use crate::types::{EngineConfig, FlightAnalysis, FlightRequest, PathSample, SolarObservation, ViewingWindows};
use crate::windows::{classify_windows, observe};

/// Computes sunrise/sunset viewing windows and seat recommendations for a flight.
///
/// Holds no state beyond its configuration and ephemeris, so one engine can serve any number of
/// requests, concurrently if the ephemeris is `Sync`.
#[derive(Debug, Clone)]
pub struct SolarGeometryEngine<E = ApproximateEphemeris> {
    config: EngineConfig,
    ephemeris: E,
}

impl Default for SolarGeometryEngine {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            ephemeris: ApproximateEphemeris,
        }
    }
}

impl SolarGeometryEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_ephemeris(config, ApproximateEphemeris)
    }
}

impl<E: Ephemeris> SolarGeometryEngine<E> {
    pub fn with_ephemeris(config: EngineConfig, ephemeris: E) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, ephemeris })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn sample_path(&self, request: &FlightRequest) -> Result<Vec<PathSample>> {
        sample_path(request, &self.config)
    }

    pub fn observe(&self, samples: &[PathSample]) -> Result<Vec<SolarObservation>> {
        observe(samples, &self.ephemeris)
    }

    pub fn classify_windows(&self, observations: &[SolarObservation]) -> ViewingWindows {
        classify_windows(observations, self.config.twilight_altitude_degrees)
    }

    /// Runs sampling, solar observation, window classification and both seat strategies.
    pub fn analyze(&self, request: &FlightRequest) -> Result<FlightAnalysis> {
        let samples = self.sample_path(request)?;
        let observations = self.observe(&samples)?;
        let windows = self.classify_windows(&observations);
        let seat = recommend_seat_by_bearing(request.source, request.destination);
        let weighted_seat = recommend_seat_weighted(
            &observations,
            request.source,
            request.destination,
            self.config.heading_model,
            self.config.twilight_altitude_degrees,
        );
        let bearing_degrees = geodesy::initial_bearing(request.source, request.destination);

        debug!(
            "Analyzed flight: distance_km={:.0} bearing={:.1} samples={} sunrise_window={} sunset_window={} weighted_side={:?} confidence={:.2}",
            geodesy::distance_km(request.source, request.destination),
            bearing_degrees,
            samples.len(),
            !windows.sunrise.is_empty(),
            !windows.sunset.is_empty(),
            weighted_seat.recommended_side(),
            weighted_seat.confidence()
        );

        Ok(FlightAnalysis {
            request: request.clone(),
            direction: request.direction(),
            bearing_degrees,
            observations,
            windows,
            seat,
            weighted_seat,
        })
    }
}
