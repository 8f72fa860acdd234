pub mod platform;
pub mod seed;
pub mod session;

pub use platform::PlatformStore;
pub use seed::{seed_demo, DemoSeed};
pub use session::SessionStore;
