//! Built-in commands. Each implements
//! [`ManagementCommand`](crate::command::ManagementCommand).

pub mod keys;
pub mod translate;

pub use keys::KeysCommand;
pub use translate::TranslateCommand;

use crate::command::CommandRegistry;

/// Registers all built-in commands into the given registry.
pub fn register_builtin_commands(registry: &mut CommandRegistry) {
    registry.register(Box::new(TranslateCommand));
    registry.register(Box::new(KeysCommand));
}
