pub mod core;
pub mod debug;
pub mod error;
pub mod frame;
pub mod obstacles;
pub mod placement;
pub mod plugin;
pub mod queue;
pub mod registry;
pub mod spawn;
pub mod stack;

pub use stack::DecorStackPlugin;
