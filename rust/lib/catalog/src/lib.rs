pub mod driver;
pub mod error;
pub mod fixture;
pub mod traits;

pub use driver::{ConnectOptions, Credentials, ScyllaCatalog};
pub use error::CatalogError;
pub use fixture::FixtureCatalog;
pub use traits::CatalogSource;
