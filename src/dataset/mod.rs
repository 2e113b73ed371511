pub mod provider;
pub mod hub;
pub mod local;
pub mod rate_limiter;
pub mod paginator;

pub use provider::{DatasetProvider, DatasetRequest, DatasetTable, Subset};
pub use hub::HubProvider;
pub use local::LocalProvider;
