use roster_orm::RelationshipRegistry;
use serde_json::{json, Value};

use super::print_json;

/// Print every registered kind with its relations and attributes
pub fn schema() -> anyhow::Result<()> {
    let registry = RelationshipRegistry::global();
    registry.validate_all()?;

    let kinds: Vec<Value> = registry
        .kinds()
        .into_iter()
        .map(|kind| {
            json!({
                "kind": kind,
                "table": kind.table_name(),
                "attributes": registry.attributes_of(kind),
                "relationships": registry.relationships_of(kind),
            })
        })
        .collect();

    print_json(&json!({
        "kinds": kinds,
        "stats": registry.stats(),
    }))
}
