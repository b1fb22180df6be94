use std::{collections::HashMap, path::Path};

use chrono::{Datelike, NaiveDateTime};
use itertools::Itertools;

use crate::migration::{
    csv_ops::{self, HeaderIndex},
    station,
    trip::{TripRecord, TRIPS_HEADER},
    MigrationError,
};

use super::StationStatistics;

const DEPARTURE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// computes the statistics of one station from a consolidated trips file.
/// a registry station without any trips gets zero totals.
///
/// # Arguments
/// * `stations_file` - normalized station registry
/// * `trips_file` - trips in the canonical schema
/// * `station_id` - station to report on, must be in the registry
/// * `month` - when set, only trips departing in this month (1-12) are counted
pub fn station_statistics(
    stations_file: &Path,
    trips_file: &Path,
    station_id: &str,
    month: Option<u32>,
) -> Result<StationStatistics, MigrationError> {
    let station_ids = station::read_station_ids(stations_file)?;
    if !station_ids.contains(station_id) {
        return Err(MigrationError::UnknownStation {
            station_id: station_id.to_string(),
            filepath: csv_ops::filepath_string(stations_file),
        });
    }
    let filepath = csv_ops::filepath_string(trips_file);
    let trips = read_trips(trips_file, month)?;
    let inbound = trips
        .iter()
        .filter(|t| t.return_station == station_id)
        .collect_vec();
    let outbound = trips
        .iter()
        .filter(|t| t.departure_station == station_id)
        .collect_vec();
    StationStatistics::new(station_id, &inbound, &outbound, &filepath)
}

/// computes statistics for every station of the registry, ordered by station id.
pub fn all_station_statistics(
    stations_file: &Path,
    trips_file: &Path,
    month: Option<u32>,
) -> Result<Vec<StationStatistics>, MigrationError> {
    let station_ids = station::read_station_ids(stations_file)?;
    let filepath = csv_ops::filepath_string(trips_file);
    let trips = read_trips(trips_file, month)?;
    let mut inbound: HashMap<&str, Vec<&TripRecord>> = trips
        .iter()
        .into_group_map_by(|t| t.return_station.as_str());
    let mut outbound: HashMap<&str, Vec<&TripRecord>> = trips
        .iter()
        .into_group_map_by(|t| t.departure_station.as_str());

    let station_ids = station_ids.iter().map(String::as_str).sorted().collect_vec();
    log::info!(
        "computing statistics for {} stations from {} trips",
        station_ids.len(),
        trips.len()
    );

    station_ids
        .into_iter()
        .map(|station_id| {
            let station_inbound = inbound.remove(station_id).unwrap_or_default();
            let station_outbound = outbound.remove(station_id).unwrap_or_default();
            StationStatistics::new(station_id, &station_inbound, &station_outbound, &filepath)
        })
        .collect()
}

/// reads a consolidated trips file, keeping only trips departing in `month` when set
pub fn read_trips(trips_file: &Path, month: Option<u32>) -> Result<Vec<TripRecord>, MigrationError> {
    if let Some(m) = month {
        if !(1..=12).contains(&m) {
            return Err(MigrationError::InvalidArgument(format!(
                "month must be in 1-12, found {m}"
            )));
        }
    }
    let filepath = csv_ops::filepath_string(trips_file);
    let mut reader = csv_ops::open_reader(trips_file)?;
    HeaderIndex::from_reader(&mut reader, &filepath)?.require(&TRIPS_HEADER)?;

    let mut trips = vec![];
    for result in reader.deserialize::<TripRecord>() {
        let trip = result.map_err(|source| MigrationError::ReadError {
            filepath: filepath.clone(),
            source,
        })?;
        match month {
            Some(m) if departure_month(&trip, &filepath)? != m => {}
            _ => trips.push(trip),
        }
    }
    Ok(trips)
}

fn departure_month(trip: &TripRecord, filepath: &str) -> Result<u32, MigrationError> {
    NaiveDateTime::parse_from_str(&trip.departure_time, DEPARTURE_TIME_FORMAT)
        .map(|t| t.month())
        .map_err(|source| MigrationError::InvalidTimestamp {
            value: trip.departure_time.clone(),
            filepath: filepath.to_string(),
            source,
        })
}

#[cfg(test)]
mod test {
    use super::{all_station_statistics, read_trips, station_statistics};
    use crate::migration::MigrationError;
    use std::path::{Path, PathBuf};

    const STATIONS: &str = "fid,id,name_fi,name_se,name_en,address_fi,address_se,city_fi,city_se,operator,capacity,x,y
1,501,Hanasaari,Hanaholmen,Hanasaari,Hanasaarenranta 1,Hanaholmsstranden 1,Espoo,Esbo,CityBike Finland,10,24.840319,60.16582
2,502,Keilalahti,Kägelviken,Keilalahti,Keilalahdentie 2,Kägelviksvägen 2,Espoo,Esbo,CityBike Finland,28,24.827467,60.171524
3,503,Westendinasema,Westendstationen,Westendinasema,Westendintie 1,Westendvägen 1,Espoo,Esbo,CityBike Finland,16,24.805758,60.168266
4,504,Golfpolku,Golfstigen,Golfpolku,Golfpolku 3,Golfstigen 3,Espoo,Esbo,CityBike Finland,16,24.796136,60.168143
";

    const TRIPS: &str = "departure_time,return_time,departure_station,return_station,distance,duration
2021-05-01T10:00:00,2021-05-01T10:10:00,501,502,1000,600
2021-05-02T10:00:00,2021-05-02T10:10:00,501,503,2000,600
2021-06-01T10:00:00,2021-06-01T10:10:00,502,501,1500,600
2021-06-02T10:00:00,2021-06-02T10:10:00,503,501,500,600
2021-07-01T10:00:00,2021-07-01T10:10:00,501,502,3000,600
";

    fn write_trips(dir: &Path) -> PathBuf {
        let filepath = dir.join("trips.csv");
        std::fs::write(&filepath, TRIPS).expect("failed writing trips file");
        filepath
    }

    fn write_stations(dir: &Path) -> PathBuf {
        let filepath = dir.join("stations.csv");
        std::fs::write(&filepath, STATIONS).expect("failed writing stations file");
        filepath
    }

    #[test]
    fn test_station_statistics_all_months() {
        let dir = tempfile::tempdir().expect("failed creating temp dir");
        let stations = write_stations(dir.path());
        let filepath = write_trips(dir.path());

        let stats = station_statistics(&stations, &filepath, "501", None).unwrap();
        assert_eq!(stats.total_outbound, 3);
        assert_eq!(stats.total_inbound, 2);
        assert_eq!(stats.average_distance_outbound, Some(2000.0));
        assert_eq!(stats.average_distance_inbound, Some(1000.0));
        assert_eq!(stats.top_outbound[0].station_id, "502");
        assert_eq!(stats.top_outbound[0].total, 2);
    }

    #[test]
    fn test_station_statistics_for_month() {
        let dir = tempfile::tempdir().expect("failed creating temp dir");
        let stations = write_stations(dir.path());
        let filepath = write_trips(dir.path());

        let stats = station_statistics(&stations, &filepath, "501", Some(6)).unwrap();
        assert_eq!(stats.total_outbound, 0);
        assert_eq!(stats.total_inbound, 2);
        assert_eq!(stats.average_distance_outbound, None);
    }

    #[test]
    fn test_all_station_statistics_sorted_by_id() {
        let dir = tempfile::tempdir().expect("failed creating temp dir");
        let stations = write_stations(dir.path());
        let filepath = write_trips(dir.path());

        let all = all_station_statistics(&stations, &filepath, None).unwrap();
        let ids = all.iter().map(|s| s.station_id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["501", "502", "503", "504"]);
        assert_eq!(all[1].total_inbound, 2);
        assert_eq!(all[1].total_outbound, 1);
    }

    #[test]
    fn test_registry_station_without_trips_has_zero_totals() {
        let dir = tempfile::tempdir().expect("failed creating temp dir");
        let stations = write_stations(dir.path());
        let filepath = write_trips(dir.path());

        let stats = station_statistics(&stations, &filepath, "504", None).unwrap();
        assert_eq!(stats.total_inbound, 0);
        assert_eq!(stats.total_outbound, 0);
        assert_eq!(stats.average_distance_inbound, None);
        assert!(stats.top_outbound.is_empty());

        let all = all_station_statistics(&stations, &filepath, None).unwrap();
        assert_eq!(all[3].station_id, "504");
        assert_eq!(all[3].total_inbound, 0);
    }

    #[test]
    fn test_unknown_station_is_an_error() {
        let dir = tempfile::tempdir().expect("failed creating temp dir");
        let stations = write_stations(dir.path());
        let filepath = write_trips(dir.path());

        match station_statistics(&stations, &filepath, "999", None) {
            Err(MigrationError::UnknownStation { station_id, .. }) => assert_eq!(station_id, "999"),
            other => panic!("expected unknown station error, found {other:?}"),
        }
    }

    #[test]
    fn test_invalid_month() {
        let dir = tempfile::tempdir().expect("failed creating temp dir");
        let filepath = write_trips(dir.path());
        assert!(matches!(
            read_trips(&filepath, Some(13)),
            Err(MigrationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_invalid_departure_time_with_month_filter() {
        let dir = tempfile::tempdir().expect("failed creating temp dir");
        let filepath = dir.path().join("trips.csv");
        std::fs::write(
            &filepath,
            "departure_time,return_time,departure_station,return_station,distance,duration\nyesterday,today,501,502,1000,600\n",
        )
        .unwrap();
        assert!(matches!(
            read_trips(&filepath, Some(5)),
            Err(MigrationError::InvalidTimestamp { .. })
        ));
        assert_eq!(read_trips(&filepath, None).unwrap().len(), 1);
    }
}
