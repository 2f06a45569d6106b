use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "boats")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub boat_type_id: Option<String>,
    pub length: f64,
    pub price: f64,
    pub description: String,
    pub picture: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::boat_type::Entity",
        from = "Column::BoatTypeId",
        to = "super::boat_type::Column::Id"
    )]
    BoatType,
}

impl Related<super::boat_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BoatType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
