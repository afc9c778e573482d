use crate::ephemeris::Ephemeris;
use crate::error::Result;
use crate::types::{PathSample, SolarObservation, TwilightPhase, ViewingWindows, VisibilityWindow};

/// Civil twilight band, in degrees either side of the horizon.
pub const CIVIL_TWILIGHT_ALTITUDE: f64 = 6.0;

/// Solar geometry at every sample, in path order.
pub fn observe<E: Ephemeris>(samples: &[PathSample], ephemeris: &E) -> Result<Vec<SolarObservation>> {
    samples
        .iter()
        .map(|sample| {
            let angles = ephemeris.solar_position(sample.instant, sample.point)?;
            let sun_times = ephemeris.sun_times(sample.instant, sample.point)?;
            Ok(SolarObservation {
                sample: *sample,
                altitude_degrees: angles.altitude_degrees,
                azimuth_degrees: angles.azimuth_degrees,
                sun_times,
            })
        })
        .collect()
}

/// Which window, if any, an observation belongs to.
///
/// The sun must be within `threshold_degrees` of the horizon, and the instant must lie strictly
/// between local sunrise and solar noon (sunrise) or strictly between solar noon and sunset
/// (sunset). Low sun on a day without sunrise or sunset is not classified.
pub fn twilight_phase(observation: &SolarObservation, threshold_degrees: f64) -> Option<TwilightPhase> {
    if observation.altitude_degrees.abs() > threshold_degrees {
        return None;
    }
    let t = observation.sample.instant;
    let noon = observation.sun_times.solar_noon();
    let sunrise = observation.sun_times.sunrise()?;
    let sunset = observation.sun_times.sunset()?;
    if sunrise < t && t < noon {
        Some(TwilightPhase::Sunrise)
    } else if noon < t && t < sunset {
        Some(TwilightPhase::Sunset)
    } else {
        None
    }
}

impl VisibilityWindow {
    fn record(&mut self, sample: PathSample) {
        if self.start.is_none() {
            self.start = Some(sample);
        }
        self.end = Some(sample);
    }
}

/// Folds observations (in path order) into one sunrise and one sunset interval.
///
/// The first qualifying sample fixes `start`; `end` tracks the last one. Disjoint qualifying
/// runs are collapsed into a single interval.
pub fn classify_windows(observations: &[SolarObservation], threshold_degrees: f64) -> ViewingWindows {
    let mut windows = ViewingWindows::default();
    for obs in observations {
        match twilight_phase(obs, threshold_degrees) {
            Some(TwilightPhase::Sunrise) => windows.sunrise.record(obs.sample),
            Some(TwilightPhase::Sunset) => windows.sunset.record(obs.sample),
            None => {}
        }
    }
    windows
}
