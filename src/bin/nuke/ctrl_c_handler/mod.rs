// Ctrl+C signal handler.
//
// Cancels the pipeline token on Ctrl+C. In-flight deletes observe the
// cancelled token and finish as failed outcomes; deletes that already
// completed stay in the report.

use std::future::Future;
use std::io;

use nuke_rs::PipelineCancellationToken;
use tokio::task::JoinHandle;
use tokio::{select, signal};
use tracing::{debug, error, warn};

pub fn spawn_ctrl_c_handler(cancellation_token: PipelineCancellationToken) -> JoinHandle<()> {
    tokio::spawn(cancel_on_signal(cancellation_token, signal::ctrl_c()))
}

async fn cancel_on_signal<S>(cancellation_token: PipelineCancellationToken, interrupt: S)
where
    S: Future<Output = io::Result<()>>,
{
    select! {
        _ = cancellation_token.cancelled() => {
            debug!("cancellation_token canceled.")
        }
        result = interrupt => match result {
            Ok(()) => {
                warn!("ctrl-c received, cancelling in-flight deletes.");
                cancellation_token.cancel();
            }
            Err(e) => error!(error = %e, "failed to listen for ctrl-c."),
        }
    }
}
