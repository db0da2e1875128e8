pub mod manager;
pub mod region_map;
pub mod round_robin;

pub use manager::UpstreamsManager;
pub use region_map::{RegionMap, ServersView};
pub use round_robin::IndexRoundRobin;
