use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const CUSTOMER_NAME_INDEX: &str = "idx_appointments_customer_name";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // AUTOINCREMENT on SQLite: ids of deleted rows are never handed out again.
        manager
            .create_table(
                Table::create()
                    .table(Appointments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Appointments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Appointments::CustomerName).string().not_null())
                    .col(ColumnDef::new(Appointments::StartTime).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Appointments::EndTime).timestamp_with_time_zone().null())
                    .col(
                        ColumnDef::new(Appointments::Status)
                            .string()
                            .not_null()
                            .default("SCHEDULED"),
                    )
                    .col(ColumnDef::new(Appointments::Notes).text().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name(CUSTOMER_NAME_INDEX)
                    .table(Appointments::Table)
                    .col(Appointments::CustomerName)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name(CUSTOMER_NAME_INDEX).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Appointments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Appointments {
    Table,
    Id,
    CustomerName,
    StartTime,
    EndTime,
    Status,
    Notes,
}
