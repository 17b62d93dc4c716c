pub mod show;
pub mod plan;
pub mod schema;

use std::sync::Arc;

use clap::Args;
use roster_orm::{
    DemoSeeder, MappingLevel, MappingOptions, MemoryStore, ProjectionConfig, SeederManager,
};
use roster_orm::loading::parse_attribute_paths;

/// How a request selects its output shape
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectionArgs {
    /// Mapping level: minimal, basic, summary or complete
    #[arg(long, short)]
    pub level: Option<MappingLevel>,

    /// Comma separated attribute paths, e.g. "roles.permissions,addressIds"
    #[arg(long, short)]
    pub attributes: Option<String>,
}

impl ProjectionArgs {
    /// Options for the request; neither flag means the configured default level
    pub fn options(&self, config: &ProjectionConfig) -> MappingOptions {
        let fields = self
            .attributes
            .as_deref()
            .map(parse_attribute_paths)
            .filter(|fields| !fields.is_empty());

        match (self.level, fields) {
            (None, None) => MappingOptions::of(config.default_level),
            (level, fields) => MappingOptions::new(level, fields),
        }
    }
}

/// In-memory store holding the demo data
pub async fn demo_store(config: &ProjectionConfig) -> anyhow::Result<Arc<MemoryStore>> {
    let store = MemoryStore::new().with_actor("roster-cli");
    SeederManager::new()
        .add(DemoSeeder)
        .run_for_environment(&store, &config.environment)
        .await?;
    Ok(Arc::new(store))
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
