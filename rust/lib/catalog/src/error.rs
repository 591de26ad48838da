use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("query error: {0}")]
    Query(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("fixture error: {0}")]
    Fixture(String),
}
