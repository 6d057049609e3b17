//! AppIntent-, AppCommand- und HostEvent-Enums für den Intent/Command-Datenfluss.

mod command;
mod host;
mod intent;

pub use command::AppCommand;
pub use host::HostEvent;
pub use intent::AppIntent;
