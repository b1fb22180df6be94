mod station_ops;
mod station_record;

pub use station_ops::{
    normalize_stations, read_origin_stations, read_station_ids, write_stations, StationIdSet,
};
pub use station_record::{StationRecord, ORIGIN_STATION_COLUMNS, STATIONS_HEADER};
