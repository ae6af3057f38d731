//! Command invocation - building `apt-get`/`dpkg` invocations, streaming
//! their output, and mapping exit status to results

use std::process::Stdio;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::{AptError, Result};
use crate::paths::{APT_GET, DPKG, SUDO, ToolPaths};
use crate::stanza::PackageInfo;

/// Which stream of the child process a chunk was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSource {
    Stdout,
    Stderr,
}

/// A chunk of child-process output, tagged with its source stream.
///
/// Chunks arrive in the order the operating system delivers them per
/// stream; no ordering holds between the two streams.
#[derive(Debug, Clone)]
pub struct OutputChunk {
    pub source: OutputSource,
    pub data: Vec<u8>,
}

impl OutputChunk {
    /// The chunk as text. Invalid UTF-8 is replaced, not rejected.
    pub fn text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }
}

/// Options for [`Apt::install`].
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Exact version to install; passed to the manager as `name=version`.
    pub version: Option<String>,
    /// Overwrite packaged configuration files instead of keeping locally
    /// modified ones when the install upgrades a package.
    pub confnew: bool,
}

/// Options for [`Apt::upgrade`].
#[derive(Debug, Clone, Default)]
pub struct UpgradeOptions {
    /// Overwrite packaged configuration files instead of keeping locally
    /// modified ones.
    pub confnew: bool,
}

/// A running package operation: a live stream of output chunks paired with
/// a single terminal result.
///
/// Dropping the operation detaches it - the child runs to completion either
/// way. Dropping only the chunks (by calling [`Operation::wait`] without
/// draining them first) is always safe.
pub struct Operation<T> {
    output: mpsc::UnboundedReceiver<OutputChunk>,
    handle: JoinHandle<Result<T>>,
}

impl<T> Operation<T> {
    /// Next output chunk, or `None` once the child has closed both streams.
    pub async fn next_chunk(&mut self) -> Option<OutputChunk> {
        self.output.recv().await
    }

    /// Wait for the terminal result. Delivered exactly once, after every
    /// chunk has been forwarded.
    pub async fn wait(self) -> Result<T> {
        match self.handle.await {
            Ok(result) => result,
            Err(err) => Err(AptError::Other(anyhow::anyhow!(
                "operation task failed: {err}"
            ))),
        }
    }
}

/// Facade over the system package tools.
///
/// Holds the [`ToolPaths`] table consulted on every invocation. Cloning is
/// cheap and clones share the table.
#[derive(Debug, Clone, Default)]
pub struct Apt {
    paths: ToolPaths,
}

impl Apt {
    /// Facade using the default tool names, looked up on `PATH`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Facade with caller-provided tool path overrides.
    pub fn with_paths(paths: ToolPaths) -> Self {
        Self { paths }
    }

    /// The alias table consulted on every invocation.
    pub fn paths(&self) -> &ToolPaths {
        &self.paths
    }

    /// Query metadata for an installed package (`dpkg -s`).
    ///
    /// Runs unprivileged with captured output; on success the stanza on
    /// stdout is parsed into a [`PackageInfo`].
    pub async fn show(&self, name: &str) -> Result<PackageInfo> {
        let dpkg = self.paths.resolve(DPKG);
        let args = vec!["-s".to_string(), name.to_string()];
        let rendered = render(&dpkg, &args);
        debug!(command = %rendered, "running inspector");

        let output = Command::new(&dpkg)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| AptError::Spawn {
                command: rendered.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(AptError::CommandFailed {
                command: rendered,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(PackageInfo::parse(&String::from_utf8_lossy(&output.stdout)))
    }

    /// Refresh the package index (`apt-get update`).
    pub fn update(&self) -> Operation<()> {
        self.privileged(vec!["update".to_string()])
    }

    /// Install a package (`apt-get install -y`), then report the installed
    /// metadata via [`Apt::show`].
    ///
    /// The version from `options`, when present, is folded into the
    /// specifier as `name=version`; the follow-up `show` always uses the
    /// bare name. On a failed install the manager's error is returned and
    /// `show` is not run.
    pub fn install(&self, name: &str, options: InstallOptions) -> Operation<PackageInfo> {
        let args = install_args(name, &options);
        let (tx, rx) = mpsc::unbounded_channel();
        let apt = self.clone();
        let name = name.to_string();
        let handle = tokio::spawn(async move {
            apt.run_privileged(args, tx).await?;
            apt.show(&name).await
        });
        Operation { output: rx, handle }
    }

    /// Remove a package (`apt-get remove -y`).
    pub fn uninstall(&self, name: &str) -> Operation<()> {
        self.privileged(vec!["remove".to_string(), "-y".to_string(), name.to_string()])
    }

    /// Remove packages that were installed as dependencies and are no
    /// longer needed (`apt-get autoremove -y`).
    pub fn autoremove(&self) -> Operation<()> {
        self.privileged(vec!["autoremove".to_string(), "-y".to_string()])
    }

    /// Upgrade installed packages (`apt-get upgrade -y`).
    ///
    /// Always passes `--force-confdef` so dpkg prefers the default action
    /// for configuration prompts, plus the `confnew`-derived flag.
    pub fn upgrade(&self, options: UpgradeOptions) -> Operation<()> {
        self.privileged(upgrade_args(&options))
    }

    fn privileged(&self, args: Vec<String>) -> Operation<()> {
        let (tx, rx) = mpsc::unbounded_channel();
        let apt = self.clone();
        let handle = tokio::spawn(async move { apt.run_privileged(args, tx).await });
        Operation { output: rx, handle }
    }

    /// Run `<sudo> <apt-get> <args...>`, forwarding output into `tx`.
    async fn run_privileged(
        &self,
        args: Vec<String>,
        tx: mpsc::UnboundedSender<OutputChunk>,
    ) -> Result<()> {
        let sudo = self.paths.resolve(SUDO);
        let manager = self.paths.resolve(APT_GET);
        let mut full_args = Vec::with_capacity(args.len() + 1);
        full_args.push(manager);
        full_args.extend(args);
        stream_command(&sudo, &full_args, tx).await
    }
}

/// `name` or `name=version`. No validation; a malformed specifier is the
/// external tool's error to report.
fn specifier(name: &str, version: Option<&str>) -> String {
    match version {
        Some(version) => format!("{name}={version}"),
        None => name.to_string(),
    }
}

fn force_conf(confnew: bool) -> &'static str {
    if confnew { "new" } else { "old" }
}

fn install_args(name: &str, options: &InstallOptions) -> Vec<String> {
    vec![
        "install".to_string(),
        "-y".to_string(),
        "-o".to_string(),
        format!("Dpkg::Options::=--force-conf{}", force_conf(options.confnew)),
        specifier(name, options.version.as_deref()),
    ]
}

fn upgrade_args(options: &UpgradeOptions) -> Vec<String> {
    vec![
        "upgrade".to_string(),
        "-y".to_string(),
        "-o".to_string(),
        "Dpkg::Options::=--force-confdef".to_string(),
        "-o".to_string(),
        format!("Dpkg::Options::=--force-conf{}", force_conf(options.confnew)),
    ]
}

/// Spawn a command and forward its output streams as tagged chunks.
///
/// Both forwarders are joined before the result is produced, so every chunk
/// is in the channel ahead of the terminal signal. Stderr is additionally
/// captured for the failure report.
async fn stream_command(
    program: &str,
    args: &[String],
    tx: mpsc::UnboundedSender<OutputChunk>,
) -> Result<()> {
    let rendered = render(program, args);
    debug!(command = %rendered, "spawning");

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| AptError::Spawn {
            command: rendered.clone(),
            source,
        })?;

    let stdout_task = child.stdout.take().map(|stdout| {
        let tx = tx.clone();
        tokio::spawn(forward_stream(stdout, OutputSource::Stdout, tx, false))
    });
    let stderr_task = child.stderr.take().map(|stderr| {
        let tx = tx.clone();
        tokio::spawn(forward_stream(stderr, OutputSource::Stderr, tx, true))
    });
    // The forwarders hold the only remaining senders; the channel closes
    // once both streams are drained.
    drop(tx);

    let status = child.wait().await?;

    if let Some(task) = stdout_task {
        let _ = task.await;
    }
    let stderr = match stderr_task {
        Some(task) => task.await.unwrap_or_default(),
        None => String::new(),
    };

    if !status.success() {
        return Err(AptError::CommandFailed {
            command: rendered,
            status,
            stderr,
        });
    }

    Ok(())
}

/// Pump one child stream into the chunk channel, optionally keeping a lossy
/// transcript (used for stderr diagnostics).
async fn forward_stream<R>(
    mut reader: R,
    source: OutputSource,
    tx: mpsc::UnboundedSender<OutputChunk>,
    capture: bool,
) -> String
where
    R: AsyncRead + Unpin,
{
    let mut transcript = String::new();
    let mut buf = [0u8; 4096];
    loop {
        match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                let data = buf[..n].to_vec();
                if capture {
                    transcript.push_str(&String::from_utf8_lossy(&data));
                }
                // A dropped receiver is fine - the caller chose not to
                // watch the stream.
                let _ = tx.send(OutputChunk { source, data });
            }
            Err(err) => {
                warn!(?source, "child stream read failed: {err}");
                break;
            }
        }
    }
    transcript
}

fn render(program: &str, args: &[String]) -> String {
    let mut rendered = program.to_string();
    for arg in args {
        rendered.push(' ');
        rendered.push_str(arg);
    }
    rendered
}
