mod lobby;
mod lobby_command;
mod lobby_handle;
mod match_queue;
mod registry;
mod session_table;

pub use lobby::*;
pub use lobby_command::*;
pub use lobby_handle::*;
pub use match_queue::*;
pub use registry::*;
pub use session_table::*;
