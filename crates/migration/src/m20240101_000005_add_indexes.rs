use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Invoices: lookups and cascades by company
        manager
            .create_index(
                Index::create()
                    .name("idx_invoices_comp_code")
                    .table(Invoices::Table)
                    .col(Invoices::CompCode)
                    .to_owned(),
            )
            .await?;

        // CompanyIndustries: the primary key leads with comp_code, so the
        // industries listing join needs its own index on ind_code
        manager
            .create_index(
                Index::create()
                    .name("idx_company_industries_ind_code")
                    .table(CompanyIndustries::Table)
                    .col(CompanyIndustries::IndCode)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_invoices_comp_code").table(Invoices::Table).to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_company_industries_ind_code")
                    .table(CompanyIndustries::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Invoices { Table, CompCode }

#[derive(DeriveIden)]
enum CompanyIndustries { Table, IndCode }
