//! Seeding - sample data for development and tests, gated by environment

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::config::Environment;
use crate::error::{ModelError, ModelResult};
use crate::model::{Address, AddressType, Contact, ContactType, Permission, Person, Record, Role};
use crate::repository::MemoryStore;

/// A unit of sample data
#[async_trait]
pub trait Seeder: Send + Sync {
    /// Get the seeder name for logging
    fn name(&self) -> &str;

    /// Get environments where this seeder should run
    fn environments(&self) -> Vec<Environment> {
        vec![Environment::Development, Environment::Testing]
    }

    /// Check if this seeder should run in the given environment
    fn should_run(&self, env: &Environment) -> bool {
        self.environments().contains(env)
    }

    /// Get seeder priority (lower numbers run first)
    fn priority(&self) -> i32 {
        100
    }

    async fn run(&self, store: &MemoryStore) -> ModelResult<()>;
}

/// John Doe with an address, a contact and a `USER` role holding `READ_PRIVILEGES`
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoSeeder;

impl DemoSeeder {
    /// The unsaved demo graph
    pub fn demo_person() -> Person {
        let mut role = Role::new("USER");
        role.add_permission(Permission::new("READ_PRIVILEGES"));

        let mut person = Person::new("John", "Doe").with_password("password123");
        person.birthday = NaiveDate::from_ymd_opt(1990, 1, 1);
        person.add_address(Address::new(AddressType::Local).with_street("123 Main St", "12345"));
        person.add_contact(
            Contact::new(ContactType::Personal)
                .with_phone_number("123-456-7890")
                .with_email("john.doe@example.com"),
        );
        person.add_role(role);
        person
    }
}

#[async_trait]
impl Seeder for DemoSeeder {
    fn name(&self) -> &str {
        "demo"
    }

    async fn run(&self, store: &MemoryStore) -> ModelResult<()> {
        let person = store.insert_person(Self::demo_person())?;
        tracing::info!("Seeded {} with {} role(s)", person.key(), person.roles().len());
        Ok(())
    }
}

/// Seeder manager for running multiple seeders
#[derive(Default)]
pub struct SeederManager {
    seeders: Vec<Box<dyn Seeder>>,
}

impl SeederManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a seeder to the manager
    pub fn add<S: Seeder + 'static>(mut self, seeder: S) -> Self {
        self.seeders.push(Box::new(seeder));
        self
    }

    /// Run every applicable seeder for the environment, lowest priority first
    pub async fn run_for_environment(&self, store: &MemoryStore, env: &Environment) -> ModelResult<usize> {
        if !env.is_safe_for_seeding() {
            return Err(ModelError::Validation(format!(
                "Environment '{}' is not safe for automatic seeding",
                env
            )));
        }

        let mut applicable: Vec<&dyn Seeder> = self
            .seeders
            .iter()
            .map(|seeder| seeder.as_ref())
            .filter(|seeder| seeder.should_run(env))
            .collect();
        applicable.sort_by_key(|seeder| seeder.priority());

        tracing::info!("Running {} seeders for environment: {}", applicable.len(), env);
        for seeder in &applicable {
            tracing::debug!("Running seeder: {}", seeder.name());
            seeder.run(store).await?;
        }
        Ok(applicable.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordKind;

    struct EmptySeeder;

    #[async_trait]
    impl Seeder for EmptySeeder {
        fn name(&self) -> &str {
            "empty"
        }

        fn environments(&self) -> Vec<Environment> {
            vec![Environment::Testing]
        }

        async fn run(&self, _store: &MemoryStore) -> ModelResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_demo_seeder_populates_store() {
        let store = MemoryStore::new();
        let ran = SeederManager::new()
            .add(DemoSeeder)
            .run_for_environment(&store, &Environment::Development)
            .await
            .unwrap();

        assert_eq!(ran, 1);
        assert_eq!(store.len(RecordKind::Person), 1);
        assert_eq!(store.len(RecordKind::Address), 1);
        assert_eq!(store.len(RecordKind::Contact), 1);
        assert_eq!(store.len(RecordKind::Role), 1);
        assert_eq!(store.len(RecordKind::Permission), 1);
    }

    #[tokio::test]
    async fn test_environment_filtering() {
        let store = MemoryStore::new();
        let manager = SeederManager::new().add(DemoSeeder).add(EmptySeeder);
        assert_eq!(manager.run_for_environment(&store, &Environment::Development).await.unwrap(), 1);
        assert!(manager.run_for_environment(&store, &Environment::Production).await.is_err());
    }
}
