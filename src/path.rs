use chrono::Duration;

use crate::error::{Error, Result};
use crate::geodesy::GreatCircle;
use crate::types::{EngineConfig, FlightRequest, PathSample, SampleTiming};

/// Number of sampling intervals that fit in the flight, `floor(duration / interval)`.
pub fn interval_count(duration_minutes: u32, interval_minutes: u32) -> u32 {
    duration_minutes / interval_minutes
}

/// Samples the great-circle path of a flight.
///
/// Produces `N + 1` samples at fractions `i / N` with `N = floor(duration / interval)`,
/// or a single sample at the source when the flight is shorter than one interval.
pub fn sample_path(request: &FlightRequest, config: &EngineConfig) -> Result<Vec<PathSample>> {
    request.validate()?;
    config.validate()?;
    let arc = GreatCircle::new(request.source, request.destination)?;
    let n = interval_count(request.duration_minutes, config.sample_interval_minutes);

    if n == 0 {
        return Ok(vec![PathSample {
            fraction: 0.0,
            point: request.source,
            instant: request.departure,
        }]);
    }

    let interval = config.sample_interval_minutes as i64;
    let total_ms = request.duration_minutes as i64 * 60_000;
    (0..=n)
        .map(|i| -> Result<PathSample> {
            let fraction = i as f64 / n as f64;
            let offset = match config.sample_timing {
                SampleTiming::FixedCadence => Duration::minutes(interval * i as i64),
                SampleTiming::Proportional => Duration::milliseconds(total_ms * i as i64 / n as i64),
            };
            let instant = request
                .departure
                .checked_add_signed(offset)
                .ok_or(Error::ArrivalOutOfRange {
                    departure: request.departure,
                    minutes: request.duration_minutes,
                })?;
            Ok(PathSample {
                fraction,
                point: arc.point_at(fraction),
                instant,
            })
        })
        .collect()
}
