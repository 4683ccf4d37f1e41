use tether_config::TetherConfig;
use tether_correlate::Resolver;
use tether_correlate::schema::MappingProfile;

use crate::cli::{GlobalFlags, StatusArgs};
use crate::{bootstrap, output};

pub async fn handle(
    args: &StatusArgs,
    flags: &GlobalFlags,
    config: &TetherConfig,
) -> anyhow::Result<()> {
    let binding = bootstrap::store_binding(config)?;
    let resolver = Resolver::new(
        binding,
        MappingProfile::default(),
        config.polling.scan_page_size,
    );

    let check = resolver
        .check_status(&args.model, args.record_id.as_deref())
        .await?;
    output::output(&check, flags.format)
}
