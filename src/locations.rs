//! The closed set of locations accepted for new reviews.
//!
//! Only [`IngestService::create`](crate::ingest::IngestService::create)
//! checks against this list; bootstrap rows are trusted as-is.

/// Accepted "City, State" strings, compared verbatim.
pub const VALID_LOCATIONS: [&str; 18] = [
    "Albuquerque, New Mexico",
    "Carlsbad, California",
    "Chula Vista, California",
    "Colorado Springs, Colorado",
    "Denver, Colorado",
    "El Cajon, California",
    "El Paso, Texas",
    "Escondido, California",
    "Fresno, California",
    "La Mesa, California",
    "Las Vegas, Nevada",
    "Los Angeles, California",
    "Oceanside, California",
    "Phoenix, Arizona",
    "Sacramento, California",
    "Salt Lake City, Utah",
    "San Diego, California",
    "Tucson, Arizona",
];

/// Returns `true` if `location` is exactly one of [`VALID_LOCATIONS`].
pub fn is_valid_location(location: &str) -> bool {
    VALID_LOCATIONS.contains(&location)
}
