//! rapt - an asynchronous facade over `apt-get` and `dpkg`
//!
//! Lets a calling program query installed-package metadata and perform
//! install/remove/upgrade/update/autoremove operations without building
//! shell invocations itself. Mutating operations stream the tool's output
//! as it arrives and resolve exactly once with success or failure.
//!
//! # Quick Start
//!
//! ```no_run
//! use rapt::{Apt, InstallOptions};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let apt = Apt::new();
//!
//!     let mut op = apt.install("redis-server", InstallOptions::default());
//!     while let Some(chunk) = op.next_chunk().await {
//!         print!("{}", chunk.text());
//!     }
//!     let info = op.wait().await?;
//!     println!("installed {:?} {:?}", info.name(), info.version());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Tool resolution
//!
//! Every invocation resolves the tool executables through a [`ToolPaths`]
//! table, so tests and non-standard installations can redirect `dpkg`,
//! `apt-get`, or the `sudo` prefix to arbitrary commands.

pub mod apt;
pub mod error;
pub mod paths;
pub mod stanza;

pub use apt::{Apt, InstallOptions, Operation, OutputChunk, OutputSource, UpgradeOptions};
pub use error::{AptError, Result};
pub use paths::ToolPaths;
pub use stanza::PackageInfo;
