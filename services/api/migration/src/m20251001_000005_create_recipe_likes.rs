use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RecipeLikes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(RecipeLikes::UserId).uuid().not_null())
                    .col(ColumnDef::new(RecipeLikes::RecipeId).integer().not_null())
                    .col(
                        ColumnDef::new(RecipeLikes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(RecipeLikes::UserId)
                            .col(RecipeLikes::RecipeId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(RecipeLikes::Table, RecipeLikes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(RecipeLikes::Table, RecipeLikes::RecipeId)
                            .to(Recipes::Table, Recipes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_recipe_likes_recipe_id")
                    .table(RecipeLikes::Table)
                    .col(RecipeLikes::RecipeId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RecipeLikes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum RecipeLikes {
    Table,
    UserId,
    RecipeId,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Recipes {
    Table,
    Id,
}
