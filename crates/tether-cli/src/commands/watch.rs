use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tether_config::TetherConfig;
use tether_correlate::Resolver;
use tether_correlate::schema::MappingProfile;
use tether_core::{CorrelationHandle, HistoryEntry};
use tether_history::History;
use tether_session::{PollEvent, PollingSession, SessionEnd, SessionHandle};
use tokio::sync::mpsc;

use crate::cli::{GlobalFlags, StatusArgs};
use crate::{bootstrap, output};

pub async fn handle(
    args: &StatusArgs,
    flags: &GlobalFlags,
    config: &TetherConfig,
) -> anyhow::Result<()> {
    run_session(flags, config, &args.model, args.record_id.as_deref()).await
}

/// Poll until the result arrives or the user hits Ctrl-C.
///
/// Shared between `ttr watch` and `ttr submit --watch`.
pub async fn run_session(
    flags: &GlobalFlags,
    config: &TetherConfig,
    model: &str,
    record_id: Option<&str>,
) -> anyhow::Result<()> {
    let binding = bootstrap::store_binding(config)?;
    let resolver = Resolver::new(
        binding,
        MappingProfile::default(),
        config.polling.scan_page_size,
    );

    let interval = Duration::from_secs(config.polling.interval_secs);
    let session = match record_id {
        Some(id) => {
            let handle = CorrelationHandle {
                record_id: id.to_string(),
                model: model.to_string(),
            };
            PollingSession::for_handle(resolver, &handle, interval)
        }
        None => PollingSession::for_model(resolver, model, interval),
    };

    let (cancel_handle, cancel) = SessionHandle::pair();
    tokio::spawn({
        let cancel_handle = cancel_handle.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel_handle.cancel();
            }
        }
    });

    let spinner = spinner(flags, model);
    let (tx, mut rx) = mpsc::channel(16);
    let run = session.run(&tx, cancel);
    tokio::pin!(run);

    let warn_after = config.polling.warn_after_attempts;
    let mut warned = false;

    let end = loop {
        tokio::select! {
            end = &mut run => break end?,
            event = rx.recv() => {
                if let Some(PollEvent::Processing { attempt, diagnostic }) = event {
                    spinner.set_message(format!("[{attempt}] {diagnostic}"));
                    if attempt >= warn_after && !warned {
                        warned = true;
                        spinner.println(format!(
                            "still waiting after {attempt} checks; the processor may be \
                             backed up (Ctrl-C stops watching, the request stays submitted)"
                        ));
                    }
                }
            }
        }
    };

    match end {
        SessionEnd::Done(result) => {
            spinner.finish_and_clear();
            let history = History::new(&config.general.history_path);
            let entry =
                HistoryEntry::completed_now(model, record_id.map(ToString::to_string), result);
            if let Err(err) = history.append(&entry) {
                tracing::warn!(%err, "could not record completion in local history");
            }
            output::output(&entry.result, flags.format)
        }
        SessionEnd::Cancelled => {
            spinner.abandon_with_message("stopped watching (request stays submitted)");
            Ok(())
        }
    }
}

fn spinner(flags: &GlobalFlags, model: &str) -> ProgressBar {
    if flags.quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    bar.enable_steady_tick(Duration::from_millis(100));
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(format!("waiting for analysis of {model}"));
    bar
}
