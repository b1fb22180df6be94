use std::collections::HashMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::migration::{trip::TripRecord, MigrationError};

/// number of counterpart stations listed in `top_inbound` and `top_outbound`
pub const TOP_STATIONS: usize = 5;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StationCount {
    pub station_id: String,
    pub total: usize,
}

/// trip figures for a single station. inbound trips end at the station,
/// outbound trips start there.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StationStatistics {
    pub station_id: String,
    pub total_inbound: usize,
    pub total_outbound: usize,
    /// meters, rounded to two decimals. absent when there are no inbound trips
    pub average_distance_inbound: Option<f64>,
    pub average_distance_outbound: Option<f64>,
    /// stations that inbound trips most often depart from
    pub top_inbound: Vec<StationCount>,
    /// stations that outbound trips most often return to
    pub top_outbound: Vec<StationCount>,
}

impl StationStatistics {
    pub fn new(
        station_id: &str,
        inbound: &[&TripRecord],
        outbound: &[&TripRecord],
        filepath: &str,
    ) -> Result<StationStatistics, MigrationError> {
        Ok(StationStatistics {
            station_id: station_id.to_string(),
            total_inbound: inbound.len(),
            total_outbound: outbound.len(),
            average_distance_inbound: average_distance(inbound, filepath)?,
            average_distance_outbound: average_distance(outbound, filepath)?,
            top_inbound: top_stations(inbound.iter().map(|t| t.departure_station.as_str())),
            top_outbound: top_stations(outbound.iter().map(|t| t.return_station.as_str())),
        })
    }
}

fn average_distance(trips: &[&TripRecord], filepath: &str) -> Result<Option<f64>, MigrationError> {
    if trips.is_empty() {
        return Ok(None);
    }
    let mut sum = 0.0;
    for trip in trips {
        sum += trip
            .distance
            .trim()
            .parse::<f64>()
            .map_err(|_| MigrationError::InvalidNumber {
                column: String::from("distance"),
                value: trip.distance.clone(),
                expected: String::from("decimal number"),
                filepath: filepath.to_string(),
            })?;
    }
    let mean = sum / trips.len() as f64;
    Ok(Some((mean * 100.0).round() / 100.0))
}

/// most frequent station ids, ties broken by id
fn top_stations<'a>(station_ids: impl Iterator<Item = &'a str>) -> Vec<StationCount> {
    let counts: HashMap<&str, usize> = station_ids.counts();
    counts
        .into_iter()
        .sorted_by(|(a_id, a_n), (b_id, b_n)| b_n.cmp(a_n).then(a_id.cmp(b_id)))
        .take(TOP_STATIONS)
        .map(|(station_id, total)| StationCount {
            station_id: station_id.to_string(),
            total,
        })
        .collect_vec()
}

#[cfg(test)]
mod test {
    use super::StationStatistics;
    use crate::migration::trip::TripRecord;

    fn trip(departure_station: &str, return_station: &str, distance: &str) -> TripRecord {
        TripRecord {
            departure_time: String::from("2021-05-01T10:00:00"),
            return_time: String::from("2021-05-01T10:10:00"),
            departure_station: departure_station.to_string(),
            return_station: return_station.to_string(),
            distance: distance.to_string(),
            duration: String::from("600"),
        }
    }

    #[test]
    fn test_totals_and_rounded_averages() {
        let inbound = [
            trip("502", "501", "100"),
            trip("503", "501", "100"),
            trip("503", "501", "100.1"),
        ];
        let inbound_refs = inbound.iter().collect::<Vec<_>>();
        let stats = StationStatistics::new("501", &inbound_refs, &[], "trips.csv").unwrap();
        assert_eq!(stats.total_inbound, 3);
        assert_eq!(stats.total_outbound, 0);
        assert_eq!(stats.average_distance_inbound, Some(100.03));
        assert_eq!(stats.average_distance_outbound, None);
        assert!(stats.top_outbound.is_empty());
    }

    #[test]
    fn test_top_stations_limited_and_ordered() {
        let returns = ["510", "507", "507", "506", "509", "508", "508", "508", "505"];
        let outbound = returns
            .iter()
            .map(|r| trip("501", r, "1000"))
            .collect::<Vec<_>>();
        let outbound_refs = outbound.iter().collect::<Vec<_>>();
        let stats = StationStatistics::new("501", &[], &outbound_refs, "trips.csv").unwrap();

        let top = stats
            .top_outbound
            .iter()
            .map(|c| (c.station_id.as_str(), c.total))
            .collect::<Vec<_>>();
        assert_eq!(
            top,
            vec![("508", 3), ("507", 2), ("505", 1), ("506", 1), ("509", 1)]
        );
    }
}
