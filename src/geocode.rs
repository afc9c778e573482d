//! Place names for viewing-window endpoints.
//!
//! Lookups are cosmetic: every failure is logged and replaced by [`UNKNOWN_LOCATION`].

use std::thread;
use std::time::Duration;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::types::{EndpointNames, GeoPoint, PathSample, ViewingWindows, WindowPlaceNames};

pub const UNKNOWN_LOCATION: &str = "Unknown location";

#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("reverse geocoding request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no place name found near ({latitude}, {longitude})")]
    NoPlaceName { latitude: f64, longitude: f64 },
}

pub trait ReverseGeocoder {
    fn place_name(&self, point: GeoPoint) -> Result<String, GeocodeError>;
}

impl<G: ReverseGeocoder + ?Sized> ReverseGeocoder for &G {
    fn place_name(&self, point: GeoPoint) -> Result<String, GeocodeError> {
        (**self).place_name(point)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NominatimConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            timeout_secs: 10,
            user_agent: concat!("solar_seat/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl NominatimConfig {
    pub fn from_json_str(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    address: Option<Address>,
}

#[derive(Debug, Deserialize)]
struct Address {
    city: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

impl Address {
    /// Most specific of city, state, country.
    fn best_name(self) -> Option<String> {
        [self.city, self.state, self.country]
            .into_iter()
            .flatten()
            .find(|name| !name.trim().is_empty())
    }
}

/// Blocking client for the OpenStreetMap Nominatim `/reverse` endpoint.
pub struct NominatimGeocoder {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new(config: &NominatimConfig) -> Result<Self, GeocodeError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn reverse_url(&self, point: GeoPoint) -> String {
        format!(
            "{}/reverse?format=json&lat={}&lon={}",
            self.base_url, point.latitude, point.longitude
        )
    }
}

impl ReverseGeocoder for NominatimGeocoder {
    fn place_name(&self, point: GeoPoint) -> Result<String, GeocodeError> {
        let url = self.reverse_url(point);
        debug!("Reverse geocoding: url={}", url);
        let response: ReverseResponse = self.client.get(&url).send()?.error_for_status()?.json()?;
        response
            .address
            .and_then(Address::best_name)
            .ok_or(GeocodeError::NoPlaceName {
                latitude: point.latitude,
                longitude: point.longitude,
            })
    }
}

fn name_or_placeholder<G: ReverseGeocoder>(geocoder: &G, point: GeoPoint) -> String {
    geocoder.place_name(point).unwrap_or_else(|err| {
        warn!(
            "Place name lookup failed; using placeholder: lat={} lon={} error={}",
            point.latitude, point.longitude, err
        );
        UNKNOWN_LOCATION.to_string()
    })
}

/// Looks up names for the (up to four) window endpoints concurrently.
///
/// Endpoints that do not exist stay `None`; failed lookups become [`UNKNOWN_LOCATION`]
/// without affecting the others.
pub fn annotate_windows<G>(windows: &ViewingWindows, geocoder: &G) -> WindowPlaceNames
where
    G: ReverseGeocoder + Sync,
{
    let endpoints: [Option<PathSample>; 4] = [
        windows.sunrise.start,
        windows.sunrise.end,
        windows.sunset.start,
        windows.sunset.end,
    ];

    let [sunrise_start, sunrise_end, sunset_start, sunset_end] = thread::scope(|scope| {
        let handles = endpoints.map(|endpoint| {
            endpoint.map(|sample| scope.spawn(move || name_or_placeholder(geocoder, sample.point)))
        });
        handles.map(|handle| {
            handle.map(|h| {
                h.join().unwrap_or_else(|_| {
                    warn!("Place name lookup thread panicked; using placeholder");
                    UNKNOWN_LOCATION.to_string()
                })
            })
        })
    });

    WindowPlaceNames {
        sunrise: EndpointNames {
            start: sunrise_start,
            end: sunrise_end,
        },
        sunset: EndpointNames {
            start: sunset_start,
            end: sunset_end,
        },
    }
}
