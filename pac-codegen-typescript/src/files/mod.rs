//! TypeScript file generators.

mod client_ts;
mod route_config_ts;
mod types_ts;

pub use client_ts::ClientTs;
pub use route_config_ts::RouteConfigTs;
pub use types_ts::TypesTs;
