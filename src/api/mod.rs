pub mod lcu;
pub mod live_client;

pub use lcu::{LcuClient, LcuCredentials, LcuError, LcuEventStream};
pub use live_client::LiveClientApi;
