//! Fetch plan builder
//!
//! Turns mapping options into the reduced set of relation paths a fetch
//! must load, using the relationship registry as the schema:
//!
//! - `Minimal` / `Basic`: no relations
//! - `Summary`: every direct mappable relation
//! - `Complete`: every reachable mappable relation, never re-entering a
//!   type already on the current walk
//! - explicit attribute paths: the relation part of each valid path
//!
//! A level combined with explicit paths yields the union of both.

use std::collections::BTreeSet;

use crate::mapping::{MappingLevel, MappingOptions};
use crate::model::RecordKind;
use crate::relationships::registry::RelationshipRegistry;
use super::paths::{depth, join_path};
use super::plan::FetchPlan;

/// Default limit on the number of segments in a requested or walked path
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Result of resolving one attribute path against the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// The requested path as given
    pub path: String,
    /// Relations that must be loaded to serve the path, if any
    pub relation_path: Option<String>,
    /// Kind owning the terminal segment
    pub terminal_kind: RecordKind,
}

/// Builds fetch plans from a relationship registry
#[derive(Debug, Clone)]
pub struct FetchPlanBuilder<'r> {
    registry: &'r RelationshipRegistry,
    max_depth: usize,
}

impl FetchPlanBuilder<'static> {
    /// Builder over the process-wide registry
    pub fn new() -> Self {
        Self::with_registry(RelationshipRegistry::global())
    }
}

impl Default for FetchPlanBuilder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> FetchPlanBuilder<'r> {
    pub fn with_registry(registry: &'r RelationshipRegistry) -> Self {
        Self {
            registry,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn registry(&self) -> &'r RelationshipRegistry {
        self.registry
    }

    /// Plan for the given options: level paths plus the relation part of every valid field
    pub fn build_plan(&self, root: RecordKind, options: &MappingOptions) -> FetchPlan {
        let mut paths = self.level_paths(root, options.effective_level());

        if let Some(fields) = options.fields() {
            for field in fields {
                match self.resolve_path(root, field) {
                    Some(resolved) => paths.extend(resolved.relation_path),
                    None => tracing::debug!("Ignoring unknown attribute path '{}' on {}", field, root),
                }
            }
        }

        let plan = FetchPlan::from_paths(root, paths);
        tracing::debug!("Fetch plan for {} at {}: {}", root, options.effective_level(), plan);
        plan
    }

    /// Plan for explicit attribute paths only
    pub fn plan_for_paths(&self, root: RecordKind, requested: &BTreeSet<String>) -> FetchPlan {
        self.build_plan(root, &MappingOptions::with_fields(requested.iter().cloned()))
    }

    /// Plan for a level alone
    pub fn plan_for_level(&self, root: RecordKind, level: MappingLevel) -> FetchPlan {
        FetchPlan::from_paths(root, self.level_paths(root, level))
    }

    /// Unreduced relation paths implied by a level
    pub fn level_paths(&self, root: RecordKind, level: MappingLevel) -> BTreeSet<String> {
        match level {
            MappingLevel::Minimal | MappingLevel::Basic => BTreeSet::new(),
            MappingLevel::Summary => self.direct_paths(root),
            MappingLevel::Complete => self.complete_paths(root),
        }
    }

    /// Direct mappable relations of `root`
    pub fn direct_paths(&self, root: RecordKind) -> BTreeSet<String> {
        if self.max_depth == 0 {
            return BTreeSet::new();
        }
        self.registry
            .mappable_relations(root)
            .map(|metadata| metadata.path_segment.clone())
            .collect()
    }

    /// Every mappable relation path reachable from `root`, with intermediate paths
    pub fn complete_paths(&self, root: RecordKind) -> BTreeSet<String> {
        let mut paths = BTreeSet::new();
        let mut on_walk = vec![root];
        self.walk(root, "", &mut on_walk, &mut paths);
        paths
    }

    fn walk(&self, kind: RecordKind, prefix: &str, on_walk: &mut Vec<RecordKind>, out: &mut BTreeSet<String>) {
        if depth(prefix) >= self.max_depth {
            return;
        }

        for metadata in self.registry.mappable_relations(kind) {
            if on_walk.contains(&metadata.target) {
                tracing::trace!(
                    "Skipping '{}' on {}: {} is already on the walk",
                    metadata.path_segment,
                    kind,
                    metadata.target
                );
                continue;
            }

            let path = join_path(prefix, &metadata.path_segment);
            out.insert(path.clone());

            on_walk.push(metadata.target);
            self.walk(metadata.target, &path, on_walk, out);
            on_walk.pop();
        }
    }

    /// Resolve a dotted attribute path against the registry
    ///
    /// Every segment but the last must be a mappable relation. The last may be
    /// a mappable relation or a declared attribute of the kind reached so far.
    /// Attributes derived from a relation, such as `roleIds`, pull that
    /// relation into the relation path.
    pub fn resolve_path(&self, root: RecordKind, path: &str) -> Option<ResolvedPath> {
        let segments: Vec<&str> = path.split('.').collect();
        if path.is_empty() || segments.len() > self.max_depth {
            return None;
        }

        let mut kind = root;
        let mut relation_segments: Vec<&str> = Vec::new();

        for (index, segment) in segments.iter().enumerate() {
            let is_last = index + 1 == segments.len();

            if let Some(metadata) = self.registry.mappable_relation(kind, segment) {
                relation_segments.push(metadata.path_segment.as_str());
                if !is_last {
                    kind = metadata.target;
                }
                continue;
            }

            if is_last && self.registry.has_attribute(kind, segment) {
                if let Some(metadata) = self.registry.relation_for_attribute(kind, segment) {
                    relation_segments.push(metadata.path_segment.as_str());
                }
                break;
            }

            return None;
        }

        Some(ResolvedPath {
            path: path.to_string(),
            relation_path: if relation_segments.is_empty() {
                None
            } else {
                Some(relation_segments.join("."))
            },
            terminal_kind: kind,
        })
    }

    /// Whether `path` resolves from `root`
    pub fn is_valid_path(&self, root: RecordKind, path: &str) -> bool {
        self.resolve_path(root, path).is_some()
    }

    /// Drop fields that do not resolve from `root`
    pub fn sanitize(&self, root: RecordKind, options: MappingOptions) -> MappingOptions {
        options.retain_fields(|field| {
            let valid = self.is_valid_path(root, field);
            if !valid {
                tracing::debug!("Dropping invalid attribute path '{}' for {}", field, root);
            }
            valid
        })
    }

    /// Sanitized options together with their fetch plan
    pub fn prepare(&self, root: RecordKind, options: MappingOptions) -> (MappingOptions, FetchPlan) {
        let options = self.sanitize(root, options);
        let plan = self.build_plan(root, &options);
        (options, plan)
    }
}
