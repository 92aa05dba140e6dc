pub mod app;
pub mod dispatch;
pub mod errors;
pub mod export;
pub mod handlers;
pub mod metrics;
pub mod pulse;
pub mod records;
pub mod render;
pub mod state;
pub mod storage;
pub mod store;
pub mod validate;

pub use app::router;
pub use state::AppState;
pub use storage::{load_stores, resolve_data_dir};
