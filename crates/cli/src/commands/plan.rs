use roster_orm::{ProjectionConfig, RecordKind};
use serde_json::json;

use super::{print_json, ProjectionArgs};

/// Print the sanitized request and the fetch plan serving it
pub fn plan(kind: RecordKind, args: &ProjectionArgs, config: &ProjectionConfig) -> anyhow::Result<()> {
    let (options, plan) = config.plan_builder().prepare(kind, args.options(config));

    print_json(&json!({
        "root": kind,
        "level": options.effective_level(),
        "fields": options.fields(),
        "paths": plan.paths(),
    }))
}
