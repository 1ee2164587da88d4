pub mod models;
pub mod errors;
pub mod wizard;
pub mod upload;
pub mod timer;
pub mod chat;
pub mod session;
pub mod directory;
pub mod settings;
pub mod services;
pub mod compliance;
pub mod activity;

pub use models::*;
pub use errors::*;
pub use wizard::*;
pub use upload::*;
pub use timer::*;
pub use chat::*;
pub use session::*;
pub use directory::*;
pub use settings::*;
pub use services::*;
pub use compliance::*;
pub use activity::*;
