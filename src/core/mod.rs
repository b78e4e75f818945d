pub mod district;
pub mod ecourts;
pub mod extract;
pub mod http;
pub mod listing;

pub use crate::domain::model::{CaseInfo, CauseListEntry, ListingInfo};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
