use courier_core::{CourierError, CourierResult, SlackMessage};
use std::io::Write;
use std::sync::Arc;

/// Output callback used by the stdout transport.
pub type OutputFn = Arc<dyn Fn(&SlackMessage) -> CourierResult<()> + Send + Sync>;

/// Wrap a closure as an [`OutputFn`].
pub fn output_fn<F>(f: F) -> OutputFn
where
    F: Fn(&SlackMessage) -> CourierResult<()> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Default output: one compact JSON line per message on stdout.
pub fn stdout_output() -> OutputFn {
    output_fn(|message| {
        let line = serde_json::to_string(message)?;
        let mut out = std::io::stdout().lock();
        writeln!(out, "{line}").map_err(|e| CourierError::Output(format!("stdout write failed: {e}")))?;
        Ok(())
    })
}
