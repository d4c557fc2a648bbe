use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProfileBookmarks::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ProfileBookmarks::ProfileId).uuid().not_null())
                    .col(
                        ColumnDef::new(ProfileBookmarks::RecipeId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProfileBookmarks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(ProfileBookmarks::ProfileId)
                            .col(ProfileBookmarks::RecipeId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProfileBookmarks::Table, ProfileBookmarks::ProfileId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProfileBookmarks::Table, ProfileBookmarks::RecipeId)
                            .to(Recipes::Table, Recipes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProfileBookmarks::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ProfileBookmarks {
    Table,
    ProfileId,
    RecipeId,
    CreatedAt,
}

#[derive(Iden)]
enum Profiles {
    Table,
    Id,
}

#[derive(Iden)]
enum Recipes {
    Table,
    Id,
}
