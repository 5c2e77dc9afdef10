use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A user review of a single game.
///
/// `mechanic_flags`, `category_flags` and `recommended_player_flags` are bitmasks
/// decoded through [`crate::search::tags::TagSet`].
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "review")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub game_id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub overall_score: Option<f64>,
    pub complexity_score: Option<f64>,
    pub luck_factor: Option<f64>,
    pub interaction_score: Option<f64>,
    pub downtime_score: Option<f64>,
    pub mechanic_flags: i32,
    pub category_flags: i32,
    pub recommended_player_flags: i32,
    pub is_published: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::game::Entity",
        from = "Column::GameId",
        to = "super::game::Column::Id",
        on_delete = "Cascade"
    )]
    Game,
}

impl Related<super::game::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Game.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
