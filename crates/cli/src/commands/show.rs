use std::sync::Arc;

use roster_orm::{
    AddressMapper, ContactMapper, EntityMapper, MemoryStore, PermissionMapper, PersonMapper, PersonService,
    ProjectionConfig, RecordKind, RecordService, Repository, RoleMapper,
};
use serde_json::Value;

use super::{demo_store, print_json, ProjectionArgs};

/// Project one record
pub async fn show(kind: RecordKind, id: i64, args: &ProjectionArgs, config: &ProjectionConfig) -> anyhow::Result<()> {
    let store = demo_store(config).await?;
    let value = match kind {
        RecordKind::Person => find_one(PersonMapper, store, id, args, config).await?,
        RecordKind::Address => find_one(AddressMapper, store, id, args, config).await?,
        RecordKind::Contact => find_one(ContactMapper, store, id, args, config).await?,
        RecordKind::Role => find_one(RoleMapper, store, id, args, config).await?,
        RecordKind::Permission => find_one(PermissionMapper, store, id, args, config).await?,
    };
    print_json(&value)
}

/// Project every record of a kind, or list person summaries
pub async fn list(kind: RecordKind, args: &ProjectionArgs, summary: bool, config: &ProjectionConfig) -> anyhow::Result<()> {
    let store = demo_store(config).await?;

    if summary {
        if kind != RecordKind::Person {
            anyhow::bail!("--summary is only available for persons");
        }
        let service: PersonService<MemoryStore> = RecordService::new(PersonMapper, store, config.clone());
        return print_json(&service.find_summaries().await?);
    }

    let value = match kind {
        RecordKind::Person => find_all(PersonMapper, store, args, config).await?,
        RecordKind::Address => find_all(AddressMapper, store, args, config).await?,
        RecordKind::Contact => find_all(ContactMapper, store, args, config).await?,
        RecordKind::Role => find_all(RoleMapper, store, args, config).await?,
        RecordKind::Permission => find_all(PermissionMapper, store, args, config).await?,
    };
    print_json(&value)
}

async fn find_one<M>(
    mapper: M,
    store: Arc<MemoryStore>,
    id: i64,
    args: &ProjectionArgs,
    config: &ProjectionConfig,
) -> anyhow::Result<Value>
where
    M: EntityMapper,
    MemoryStore: Repository<M::Entity>,
{
    let service = RecordService::new(mapper, store, config.clone());
    let dto = service.find_by_id_with_options(id, args.options(config)).await?;
    Ok(serde_json::to_value(dto)?)
}

async fn find_all<M>(
    mapper: M,
    store: Arc<MemoryStore>,
    args: &ProjectionArgs,
    config: &ProjectionConfig,
) -> anyhow::Result<Value>
where
    M: EntityMapper,
    MemoryStore: Repository<M::Entity>,
{
    let service = RecordService::new(mapper, store, config.clone());
    let dtos = service.find_all_with_options(args.options(config)).await?;
    Ok(serde_json::to_value(dtos)?)
}
