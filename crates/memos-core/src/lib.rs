pub mod actions;
pub mod app;
pub mod config;
pub mod controller;
pub mod error;
pub mod middleware;
pub mod navigation;
pub mod persistence;
pub mod reducer;
pub mod state;
pub mod store;
pub mod validator;

pub use actions::*;
pub use app::*;
pub use config::Config;
pub use controller::*;
pub use error::StorageError;
pub use error::StoreError;
pub use error::SurfaceError;
pub use navigation::*;
pub use reducer::*;
pub use state::*;
pub use store::*;

pub use persistence::*;
pub use validator::*;
