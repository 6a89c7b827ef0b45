mod config;
mod error;
mod player;
mod response;
mod room;
mod routes;

pub mod names;

pub use config::*;
pub use error::*;
pub use player::*;
pub use response::*;
pub use room::*;
pub use routes::*;
