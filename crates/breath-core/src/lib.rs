pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod pattern;
pub mod presets;
pub mod scheduler;
pub mod sequence;
pub mod session;
pub mod state;
pub mod value;

pub use clock::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use pattern::*;
pub use presets::*;
pub use scheduler::*;
pub use sequence::*;
pub use session::*;
pub use state::*;
pub use value::*;
