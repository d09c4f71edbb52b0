//! Create `company_industries` join table (many-to-many).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CompanyIndustries::Table)
                    .if_not_exists()
                    .col(text(CompanyIndustries::CompCode).not_null())
                    .col(text(CompanyIndustries::IndCode).not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_company_industries")
                            .col(CompanyIndustries::CompCode)
                            .col(CompanyIndustries::IndCode),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_company_industries_company")
                            .from(CompanyIndustries::Table, CompanyIndustries::CompCode)
                            .to(Companies::Table, Companies::Code)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_company_industries_industry")
                            .from(CompanyIndustries::Table, CompanyIndustries::IndCode)
                            .to(Industries::Table, Industries::Code)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CompanyIndustries::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum CompanyIndustries { Table, CompCode, IndCode }

#[derive(DeriveIden)]
enum Companies { Table, Code }

#[derive(DeriveIden)]
enum Industries { Table, Code }
