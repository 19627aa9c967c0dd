pub use sea_orm_migration::prelude::*;

mod m20250712_000001_create_users_table;
mod m20250712_000002_create_orders_table;
mod m20250712_000003_create_contact_messages_table;
mod m20250712_000004_create_portfolio_items_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250712_000001_create_users_table::Migration),
            Box::new(m20250712_000002_create_orders_table::Migration),
            Box::new(m20250712_000003_create_contact_messages_table::Migration),
            Box::new(m20250712_000004_create_portfolio_items_table::Migration),
        ]
    }
}
