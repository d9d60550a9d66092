//! Channel adapters
//!
//! Implementations of the [`Contactable`](huddle_application::Contactable)
//! port for channels that need no external service, and the gateway that
//! opens them from participant configs.
//!
//! | `type`   | Adapter                   | Notes                              |
//! |----------|---------------------------|------------------------------------|
//! | `memory` | [`InMemoryContactable`]   | embedding and tests                |
//! | `cli`    | [`ConsoleContactable`]    | stdin/stdout, one per run          |

mod console;
mod gateway;
mod memory;

pub use console::ConsoleContactable;
pub use gateway::{CONSOLE_CHANNEL, LocalContactableGateway, MEMORY_CHANNEL};
pub use memory::InMemoryContactable;
