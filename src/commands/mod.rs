//! Command implementations for the rapt CLI
//!
//! One module per subcommand. The streaming commands copy subprocess
//! output to the terminal as it arrives and end with a status line.

pub mod autoremove;
pub mod install;
pub mod remove;
pub mod show;
pub mod update;
pub mod upgrade;

pub(crate) mod stream;

pub use autoremove::autoremove;
pub use install::install;
pub use remove::remove;
pub use show::show;
pub use update::update;
pub use upgrade::upgrade;
