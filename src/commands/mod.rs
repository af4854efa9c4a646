pub mod ai;
pub mod dispatcher;
pub mod handler;
pub mod registry;

pub use dispatcher::{CommandDispatcher, DispatchClass, create_command_registry, create_dispatcher};
pub use handler::{CommandContext, CommandHandler};
pub use registry::CommandRegistry;
