//! Record services
//!
//! A service resolves a request (level, attribute string or full options)
//! into sanitized options and a fetch plan, fetches through its repository
//! and projects the result with its mapper.

use std::sync::Arc;

use crate::config::ProjectionConfig;
use crate::error::{ModelError, ModelResult};
use crate::loading::{parse_attribute_paths, FetchPlan};
use crate::mapping::{EntityMapper, MappingLevel, MappingOptions, PersonMapper, PersonSummaryDto};
use crate::model::{Person, Record};
use crate::repository::Repository;

/// Fetch-and-project operations for one record type
pub struct RecordService<M, S> {
    mapper: M,
    store: Arc<S>,
    config: ProjectionConfig,
}

/// Service over persons, adding summary listings
pub type PersonService<S> = RecordService<PersonMapper, S>;

impl<M, S> RecordService<M, S>
where
    M: EntityMapper,
    S: Repository<M::Entity>,
{
    pub fn new(mapper: M, store: Arc<S>, config: ProjectionConfig) -> Self {
        Self { mapper, store, config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Sanitized options together with the plan that serves them
    pub fn plan_for(&self, options: MappingOptions) -> (MappingOptions, FetchPlan) {
        self.config.plan_builder().prepare(M::Entity::kind(), options)
    }

    /// Options for a comma separated attribute string; blank falls back to the default level
    pub fn options_for_attributes(&self, attributes: &str) -> MappingOptions {
        let fields = parse_attribute_paths(attributes);
        if fields.is_empty() {
            MappingOptions::of(self.config.default_level)
        } else {
            MappingOptions::with_fields(fields)
        }
    }

    pub async fn find_by_id(&self, id: i64, level: MappingLevel) -> ModelResult<M::Dto> {
        self.find_by_id_with_options(id, MappingOptions::of(level)).await
    }

    pub async fn find_by_id_with_attributes(&self, id: i64, attributes: &str) -> ModelResult<M::Dto> {
        self.find_by_id_with_options(id, self.options_for_attributes(attributes)).await
    }

    /// Find by id at the configured default level
    pub async fn find_by_id_default(&self, id: i64) -> ModelResult<M::Dto> {
        self.find_by_id(id, self.config.default_level).await
    }

    pub async fn find_by_id_with_options(&self, id: i64, options: MappingOptions) -> ModelResult<M::Dto> {
        let kind = M::Entity::kind();
        let (options, plan) = self.plan_for(options);
        tracing::debug!("Finding {}#{} with plan {}", kind, id, plan);

        match self.store.find_by_id(id, &plan).await? {
            Some(entity) => Ok(self.mapper.to_dto(&entity, &options)),
            None => {
                tracing::warn!("{} with id {} not found", kind, id);
                Err(ModelError::not_found(kind, id))
            }
        }
    }

    /// Project the stored records among `ids`; missing ids are skipped
    pub async fn find_by_ids(&self, ids: &[i64], level: MappingLevel) -> ModelResult<Vec<M::Dto>> {
        self.find_by_ids_with_options(ids, MappingOptions::of(level)).await
    }

    pub async fn find_by_ids_with_options(&self, ids: &[i64], options: MappingOptions) -> ModelResult<Vec<M::Dto>> {
        let (options, plan) = self.plan_for(options);
        tracing::debug!("Finding {} {:?} with plan {}", M::Entity::kind(), ids, plan);

        let entities = self.store.find_by_ids(ids, &plan).await?;
        if entities.len() < ids.len() {
            tracing::debug!("{} of {} requested ids found", entities.len(), ids.len());
        }
        Ok(self.mapper.to_dto_list(&entities, &options))
    }

    pub async fn exists_by_id(&self, id: i64) -> ModelResult<bool> {
        self.store.exists_by_id(id).await
    }

    pub async fn find_all(&self, level: MappingLevel) -> ModelResult<Vec<M::Dto>> {
        self.find_all_with_options(MappingOptions::of(level)).await
    }

    pub async fn find_all_with_attributes(&self, attributes: &str) -> ModelResult<Vec<M::Dto>> {
        self.find_all_with_options(self.options_for_attributes(attributes)).await
    }

    pub async fn find_all_with_options(&self, options: MappingOptions) -> ModelResult<Vec<M::Dto>> {
        let (options, plan) = self.plan_for(options);
        tracing::debug!("Finding all {} with plan {}", M::Entity::kind(), plan);

        let entities = self.store.find_all(&plan).await?;
        Ok(self.mapper.to_dto_list(&entities, &options))
    }
}

impl<S> RecordService<PersonMapper, S>
where
    S: Repository<Person>,
{
    /// Flat listing of every person with relation counts
    pub async fn find_summaries(&self) -> ModelResult<Vec<PersonSummaryDto>> {
        let plan = self
            .config
            .plan_builder()
            .plan_for_level(Person::kind(), MappingLevel::Summary);
        let people = self.store.find_all(&plan).await?;
        Ok(people.iter().map(|person| self.mapper.to_summary_dto(person)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryStore;
    use crate::seeding::DemoSeeder;

    fn service() -> PersonService<MemoryStore> {
        let store = MemoryStore::new();
        store.insert_person(DemoSeeder::demo_person()).unwrap();
        RecordService::new(PersonMapper, Arc::new(store), ProjectionConfig::testing())
    }

    #[tokio::test]
    async fn test_missing_id_is_not_found() {
        let err = service().find_by_id(99, MappingLevel::Minimal).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_blank_attributes_use_default_level() {
        let service = service();
        let options = service.options_for_attributes(" , ");
        assert_eq!(options, MappingOptions::of(MappingLevel::Complete));
    }

    #[tokio::test]
    async fn test_find_summaries() {
        let summaries = service().find_summaries().await.unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].role_count, 1);
        assert_eq!(summaries[0].address_count, 1);
        assert_eq!(summaries[0].contact_count, 1);
    }

    #[tokio::test]
    async fn test_find_by_ids_honours_plan() {
        let service = service();
        service.store().reset_stats();

        let dtos = service
            .find_by_ids_with_options(&[1, 42], MappingOptions::with_fields(["roles.permissions"]))
            .await
            .unwrap();
        assert_eq!(dtos.len(), 1);
        assert!(dtos[0].addresses.is_none());
        let roles = dtos[0].roles.as_ref().unwrap();
        assert_eq!(roles[0].permissions.as_ref().unwrap().len(), 1);

        let stats = service.store().stats();
        assert_eq!(stats.loads_of("addresses"), 0);
        assert_eq!(stats.loads_of("roles.permissions"), 1);

        assert!(service.find_by_ids(&[42], MappingLevel::Complete).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_exists_by_id() {
        let service = service();
        assert!(service.exists_by_id(1).await.unwrap());
        assert!(!service.exists_by_id(2).await.unwrap());
    }

    #[tokio::test]
    async fn test_minimal_fetch_loads_no_relations() {
        let service = service();
        service.store().reset_stats();
        let dto = service.find_by_id(1, MappingLevel::Minimal).await.unwrap();
        assert_eq!(dto.first_name.as_deref(), Some("John"));
        assert_eq!(service.store().stats().relation_loads, 0);
    }
}
