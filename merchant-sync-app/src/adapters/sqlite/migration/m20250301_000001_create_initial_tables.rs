use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

/// At most one row may carry `is_default = 1`.
const SINGLE_DEFAULT_INDEX: &str = "CREATE UNIQUE INDEX IF NOT EXISTS \
     idx_merchant_accounts_single_default \
     ON merchant_accounts (is_default) WHERE is_default = 1";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // settings 表
        manager
            .create_table(
                Table::create()
                    .table(Setting::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Setting::Name)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Setting::Value).string().not_null())
                    .col(ColumnDef::new(Setting::Salt).string().null())
                    .col(ColumnDef::new(Setting::Nonce).string().null())
                    .col(ColumnDef::new(Setting::SealVersion).integer().null())
                    .to_owned(),
            )
            .await?;

        // merchant_accounts 表
        manager
            .create_table(
                Table::create()
                    .table(MerchantAccount::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MerchantAccount::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MerchantAccount::Title).string().not_null())
                    .col(
                        ColumnDef::new(MerchantAccount::MerchantId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MerchantAccount::LanguageId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MerchantAccount::CountryId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MerchantAccount::CurrencyId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MerchantAccount::IsDefault)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(MerchantAccount::SyncEnabled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(MerchantAccount::CreatedAt)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MerchantAccount::UpdatedAt)
                            .string()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(SINGLE_DEFAULT_INDEX)
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MerchantAccount::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Setting::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Setting {
    #[sea_orm(iden = "settings")]
    Table,
    Name,
    Value,
    Salt,
    Nonce,
    SealVersion,
}

#[derive(DeriveIden)]
enum MerchantAccount {
    #[sea_orm(iden = "merchant_accounts")]
    Table,
    Id,
    Title,
    MerchantId,
    LanguageId,
    CountryId,
    CurrencyId,
    IsDefault,
    SyncEnabled,
    CreatedAt,
    UpdatedAt,
}
