mod station_statistics;
mod statistics_ops;

pub use station_statistics::{StationCount, StationStatistics, TOP_STATIONS};
pub use statistics_ops::{all_station_statistics, read_trips, station_statistics};
