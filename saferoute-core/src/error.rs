use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("No route found between start and end")]
    NoRouteFound,
    #[error("GeoJSON error: {0}")]
    GeoJson(String),
}
