//! Declarative test builder.
//!
//! This module provides the `TestBuilder` API for configuring test environments before execution.
//! The builder pattern allows chaining multiple configuration methods together, with all operations
//! queued and executed during the final `build()` call.

use entity::sea_orm_active_enums::UserRole;
use sea_orm::{
    sea_query::{Index, IndexCreateStatement, TableCreateStatement},
    EntityTrait, Schema,
};

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
///
/// Provides an interface for setting up test environments with database tables and fixtures.
/// Methods can be chained together and finalized with `build()`.
pub struct TestBuilder {
    // Tables to create
    tables: Vec<TableCreateStatement>,
    include_helpdesk_tables: bool,

    // Database fixtures to insert
    users: Vec<(String, UserRole)>, // (clerk_user_id, role)
    categories: Vec<String>,
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    /// Create a new TestBuilder with no tables or fixtures configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_helpdesk_tables: false,
            users: Vec::new(),
            categories: Vec::new(),
        }
    }

    /// Add every helpdesk table to the test database.
    ///
    /// Creates user, category, ticket, comment, attachment, vote and notification tables in
    /// foreign key order, along with the unique `(ticket_id, user_id)` index on votes.
    pub fn with_helpdesk_tables(mut self) -> Self {
        self.include_helpdesk_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// Generates a CREATE TABLE statement for the entity, which will be executed during `build()`.
    /// Chain multiple calls to add multiple tables, parents first.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use helpdesk_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), helpdesk_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(User)
    ///     .with_table(Category)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert a user with the given Clerk user ID and role during `build()`.
    pub fn with_user(mut self, clerk_user_id: &str, role: UserRole) -> Self {
        self.users.push((clerk_user_id.to_string(), role));
        self
    }

    /// Insert an active category with the given name during `build()`.
    pub fn with_category(mut self, name: &str) -> Self {
        self.categories.push(name.to_string());
        self
    }

    /// Build the test context.
    ///
    /// Creates tables, then inserts queued fixtures in dependency order.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized context
    /// - `Err(TestError::DbErr)` - Table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new().await?;

        // 1. Create tables
        let mut all_tables = Vec::new();
        let mut all_indexes = Vec::new();

        if self.include_helpdesk_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::User),
                schema.create_table_from_entity(entity::prelude::Category),
                schema.create_table_from_entity(entity::prelude::Ticket),
                schema.create_table_from_entity(entity::prelude::Comment),
                schema.create_table_from_entity(entity::prelude::Attachment),
                schema.create_table_from_entity(entity::prelude::Vote),
                schema.create_table_from_entity(entity::prelude::Notification),
            ]);
            all_indexes.push(vote_unique_index());
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;
        setup.with_indexes(all_indexes).await?;

        // 2. Insert database fixtures
        for (clerk_user_id, role) in self.users {
            setup
                .user()
                .insert_user_with_clerk_id(&clerk_user_id, role)
                .await?;
        }

        for name in self.categories {
            setup.category().insert_category(&name).await?;
        }

        Ok(setup)
    }
}

fn vote_unique_index() -> IndexCreateStatement {
    Index::create()
        .name("idx-vote-ticket_id-user_id")
        .table(entity::vote::Entity)
        .col(entity::vote::Column::TicketId)
        .col(entity::vote::Column::UserId)
        .unique()
        .to_owned()
}
