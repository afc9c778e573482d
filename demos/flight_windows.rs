use chrono::TimeZone;
use chrono_tz::{America::New_York, Europe::London};
use simplelog::{Config, LevelFilter, SimpleLogger};

use solar_seat::{
    annotate_windows, EngineConfig, FlightRequest, GeoPoint, NominatimConfig, NominatimGeocoder,
    SeatStrategy, SolarGeometryEngine, VisibilityWindow,
};

fn describe(label: &str, window: &VisibilityWindow) {
    match (window.start, window.end) {
        (Some(start), Some(end)) => println!(
            "{}: {} to {} ({} min), {:.1}%-{:.1}% of the route",
            label,
            start.time_label(&London),
            end.time_label(&New_York),
            (end.instant - start.instant).num_minutes(),
            start.fraction * 100.0,
            end.fraction * 100.0
        ),
        _ => println!("{}: not visible on this flight", label),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::init(LevelFilter::Info, Config::default())?;

    let heathrow = GeoPoint::new(51.4706, -0.4619)?;
    let jfk = GeoPoint::new(40.6413, -73.7781)?;
    let departure = London
        .with_ymd_and_hms(2024, 6, 21, 20, 0, 0)
        .single()
        .ok_or("ambiguous local departure time")?;

    let request = FlightRequest::new(heathrow, jfk, &departure, 480)?;
    let engine = SolarGeometryEngine::new(EngineConfig::default())?;
    let analysis = engine.analyze(&request)?;

    println!("=== Sun Viewing Windows ===");
    println!("Route: LHR ({:.2}°N) to JFK ({:.2}°N)", heathrow.latitude, jfk.latitude);
    println!("Departure: {}", departure);
    println!("Initial bearing: {:.1}°", analysis.bearing_degrees);
    println!("Samples: {}", analysis.observations.len());
    println!();
    println!("--- Windows ---");
    describe("Sunrise", &analysis.windows.sunrise);
    describe("Sunset", &analysis.windows.sunset);
    println!();
    println!("--- Seats ---");
    for strategy in [SeatStrategy::Weighted, SeatStrategy::Bearing, SeatStrategy::FixedAzimuth] {
        let seat = analysis.seat_for(strategy);
        println!("{:?}: sunrise {}, sunset {}", strategy, seat.sunrise, seat.sunset);
    }
    println!(
        "Weighted tally: sunset {} left / {} right (confidence {:.2})",
        analysis.weighted_seat.sunset.left,
        analysis.weighted_seat.sunset.right,
        analysis.weighted_seat.confidence()
    );

    // Network lookups are opt-in.
    if std::env::var_os("SOLAR_SEAT_GEOCODE").is_some() {
        let geocoder = NominatimGeocoder::new(&NominatimConfig::default())?;
        let names = annotate_windows(&analysis.windows, &geocoder);
        println!();
        println!("--- Places ---");
        println!("{}", serde_json::to_string_pretty(&names)?);
    }

    Ok(())
}
