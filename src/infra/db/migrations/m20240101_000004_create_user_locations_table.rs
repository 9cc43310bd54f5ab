//! Migration: Create the user_locations association table.
//!
//! Deleting a user or a location removes its association rows.

use sea_orm_migration::prelude::*;

use super::{Locations, UserLocations, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserLocations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserLocations::UserId).integer().not_null())
                    .col(ColumnDef::new(UserLocations::LocationId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(UserLocations::UserId)
                            .col(UserLocations::LocationId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_locations_user_id")
                            .from(UserLocations::Table, UserLocations::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_locations_location_id")
                            .from(UserLocations::Table, UserLocations::LocationId)
                            .to(Locations::Table, Locations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Users-by-location lookups filter on location_id alone
        manager
            .create_index(
                Index::create()
                    .name("idx_user_locations_location_id")
                    .table(UserLocations::Table)
                    .col(UserLocations::LocationId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserLocations::Table).to_owned())
            .await
    }
}
