pub mod initializer;
pub mod provisioner;
pub mod registry;

pub use crate::domain::model::{InitOutcome, ProvisionReport};
pub use crate::domain::ports::{AppContext, AssetSource, ConfigProvider, DataLoader, DataProvider};
pub use crate::utils::error::Result;
