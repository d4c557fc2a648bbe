use sea_orm::entity::prelude::*;

/// A recipe, mutable only by its author.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "recipes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub author_id: Uuid,
    pub category_id: i32,
    pub picture: Option<String>,
    pub description: String,
    pub cook_time_minutes: i32,
    pub ingredients: String,
    pub procedure: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::AuthorId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(
        belongs_to = "super::recipe_categories::Entity",
        from = "Column::CategoryId",
        to = "super::recipe_categories::Column::Id",
        on_delete = "Restrict"
    )]
    Category,
    #[sea_orm(has_many = "super::recipe_likes::Entity")]
    RecipeLikes,
    #[sea_orm(has_many = "super::profile_bookmarks::Entity")]
    ProfileBookmarks,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::recipe_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::recipe_likes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecipeLikes.def()
    }
}

impl Related<super::profile_bookmarks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProfileBookmarks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
