use tether_config::TetherConfig;
use tether_history::History;

use crate::cli::{GlobalFlags, HistoryArgs};
use crate::output;

pub fn handle(
    args: &HistoryArgs,
    flags: &GlobalFlags,
    config: &TetherConfig,
) -> anyhow::Result<()> {
    let history = History::new(&config.general.history_path);
    let mut entries = history.load()?;

    if let Some(limit) = args.limit {
        let skip = entries.len().saturating_sub(limit);
        entries.drain(..skip);
    }

    output::output(&entries, flags.format)
}
