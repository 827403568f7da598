//! Services for horoscope lookup and rankings aggregation

pub mod dates;
pub mod local_store;
pub mod rankings;
pub mod remote;
pub mod resolver;
pub mod settings;

pub use local_store::{AvailableDates, LocalContentStore};
pub use rankings::{RankingsAggregator, RankingsSource};
pub use remote::RemoteApi;
pub use resolver::{HoroscopeResolver, HoroscopeSource};
pub use settings::{Settings, SettingsOverrides};
