pub mod advisor;
pub mod behavior;
pub mod catalog;
pub mod config;
pub mod enrich;
pub mod error;
pub mod explain;
pub mod features;
pub mod feedback;
pub mod knowledge;
pub mod ranker;
pub mod scorer;
pub mod similarity;
pub mod store;
pub mod types;
pub mod util;

pub use advisor::{Advisor, SessionContext};
pub use catalog::Catalog;
pub use config::AdvisorConfig;
pub use error::AdvisorError;
pub use types::*;
