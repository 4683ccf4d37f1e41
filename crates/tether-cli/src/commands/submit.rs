use tether_config::TetherConfig;
use tether_core::AnalysisRequest;
use tether_correlate::Submitter;
use tether_correlate::schema::RequestColumns;
use tether_store::PipelineTrigger;

use crate::cli::{GlobalFlags, SubmitArgs};
use crate::{bootstrap, commands, output};

pub async fn handle(
    args: &SubmitArgs,
    flags: &GlobalFlags,
    config: &TetherConfig,
) -> anyhow::Result<()> {
    let request = AnalysisRequest {
        model: args.model.clone(),
        asin: args.asin.clone(),
        category: args.category.clone(),
        features: args.features.clone(),
        scenario: args.scenario.clone(),
        audience: args.audience.clone(),
        price: args.price.clone(),
        rufus_questions: args.rufus_questions.clone(),
    };

    let binding = bootstrap::store_binding(config)?;
    let submitter = Submitter::new(binding, RequestColumns::default());
    let handle = submitter.submit(&request).await?;

    // The submit is durable at this point. The store's own change detection
    // is the primary trigger for the processor; an explicit webhook is a
    // best-effort nudge, so its failure must not discard the handle.
    if config.trigger.is_enabled() {
        let trigger = PipelineTrigger::new(config.trigger.webhook_url.clone());
        if let Err(err) = trigger.fire(&handle.record_id).await {
            tracing::warn!(%err, record_id = %handle.record_id, "pipeline trigger failed");
        }
    }

    if args.watch {
        if !flags.quiet {
            eprintln!("submitted as record {}; waiting for the result...", handle.record_id);
        }
        return commands::watch::run_session(
            flags,
            config,
            &handle.model,
            Some(&handle.record_id),
        )
        .await;
    }

    output::output(&handle, flags.format)
}
