mod config_cmd;
mod entry_cmd;
mod watch;

pub use config_cmd::ConfigCommand;
pub use entry_cmd::{AddCommand, HideCommand};
pub use watch::WatchCommand;
