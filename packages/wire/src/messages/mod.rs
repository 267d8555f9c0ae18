//! Request and response messages, one group per area of the service.

mod admin;
mod catalog;
mod metadata;
mod query;
mod results;

pub use admin::*;
pub use catalog::*;
pub use metadata::*;
pub use query::*;
pub use results::*;
