pub mod error;
pub mod index;
pub mod listing;
pub mod model;
pub mod query;
pub mod reading_time;
pub mod related;
pub mod scoring;
pub mod store;
pub mod suggestions;
pub mod tags;

#[cfg(test)]
pub(crate) mod test_utils;
