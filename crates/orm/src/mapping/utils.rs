//! Shared projection helpers used by the per-type mappers

use std::collections::BTreeSet;

use crate::model::{AuditInfo, Record, RecordRef};
use crate::relationships::containers::HasMany;
use crate::relationships::guard::leads_back;
use super::context::TraversalContext;
use super::dto::AuditDto;
use super::level::MappingLevel;
use super::mappers::EntityMapper;
use super::options::MappingOptions;

/// Primary keys of saved records
pub fn extract_ids<'a, R, I>(records: I) -> BTreeSet<i64>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    records.into_iter().filter_map(Record::primary_key).collect()
}

/// Member count of a relation, zero when it was never loaded
pub fn safe_count<R: Record>(relation: &HasMany<R>) -> usize {
    relation.get().map(<[R]>::len).unwrap_or(0)
}

/// Audit fields, each gated on `Basic` or an explicit request
pub(crate) fn audit_fields(audit: &AuditInfo, options: &MappingOptions, ctx: &TraversalContext) -> AuditDto {
    let wanted = |field: &str| options.level_or_includes(&ctx.path(field), MappingLevel::Basic);
    AuditDto {
        created_date: audit.created_date.filter(|_| wanted("createdDate")),
        modified_date: audit.modified_date.filter(|_| wanted("modifiedDate")),
        created_by: audit.created_by.clone().filter(|_| wanted("createdBy")),
        modified_by: audit.modified_by.clone().filter(|_| wanted("modifiedBy")),
    }
}

fn summary_requested(options: &MappingOptions, ctx: &TraversalContext, segment: &str, attribute: &str) -> bool {
    options.level_or_includes(&ctx.path(segment), MappingLevel::Summary)
        || options.explicitly_includes(&ctx.path(attribute))
}

fn loaded<'a, R: Record>(relation: &'a HasMany<R>, ctx: &TraversalContext, segment: &str) -> Option<&'a [R]> {
    let items = relation.get();
    if items.is_none() {
        tracing::debug!("Relation '{}' was not loaded; leaving it out", ctx.path(segment));
    }
    items
}

/// Identifier set of a relation at `Summary` or when it (or `attribute`) is requested
pub(crate) fn relation_ids<R: Record>(
    relation: &HasMany<R>,
    options: &MappingOptions,
    ctx: &TraversalContext,
    segment: &str,
    attribute: &str,
) -> Option<BTreeSet<i64>> {
    if !summary_requested(options, ctx, segment, attribute) {
        return None;
    }
    loaded(relation, ctx, segment).map(|items| extract_ids(items))
}

/// Member count of a relation at `Summary` or when it (or `attribute`) is requested
pub(crate) fn relation_count<R: Record>(
    relation: &HasMany<R>,
    options: &MappingOptions,
    ctx: &TraversalContext,
    segment: &str,
    attribute: &str,
) -> Option<usize> {
    if !summary_requested(options, ctx, segment, attribute) {
        return None;
    }
    loaded(relation, ctx, segment).map(<[R]>::len)
}

/// Nested projections of a relation at `Complete` or when explicitly requested
///
/// Members already on the traversal stack are skipped.
pub(crate) fn nested<M: EntityMapper>(
    mapper: &M,
    relation: &HasMany<M::Entity>,
    options: &MappingOptions,
    ctx: &TraversalContext,
    segment: &str,
) -> Option<Vec<M::Dto>> {
    if !options.level_or_includes(&ctx.path(segment), MappingLevel::Complete) {
        return None;
    }
    let items = loaded(relation, ctx, segment)?;
    let child_ctx = ctx.descend(segment);

    Some(
        items
            .iter()
            .filter(|item| {
                let on_stack = child_ctx.contains(item.key());
                if on_stack {
                    tracing::debug!("Skipping {} already being projected", item.key());
                }
                !on_stack
            })
            .map(|item| mapper.to_dto_in(item, options, &child_ctx))
            .collect(),
    )
}

/// Owner id of a child, unless the owner is already being projected
pub(crate) fn back_reference_id(
    record: RecordRef<'_>,
    owner_id: Option<i64>,
    options: &MappingOptions,
    ctx: &TraversalContext,
    attribute: &str,
) -> Option<i64> {
    if !options.level_or_includes(&ctx.path(attribute), MappingLevel::Summary) {
        return None;
    }
    if leads_back(record, ctx) {
        return None;
    }
    owner_id
}
