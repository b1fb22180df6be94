mod consolidation_summary;
mod trip_file_pattern;
mod trip_ops;
mod trip_record;
mod trip_validity;

pub use consolidation_summary::ConsolidationSummary;
pub use trip_file_pattern::TripFilePattern;
pub use trip_ops::consolidate_trips;
pub use trip_record::{
    TripColumns, TripRecord, TripSourceRow, ORIGIN_DEPARTURE, ORIGIN_DEPARTURE_STATION,
    ORIGIN_DISTANCE, ORIGIN_DURATION, ORIGIN_RETURN, ORIGIN_RETURN_STATION, TRIPS_HEADER,
};
pub use trip_validity::{TripThresholds, TripValidity};
