use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "todos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub text: String,
    #[sea_orm(default_value = false)]
    pub completed: bool,
    pub created: DateTimeWithTimeZone,
    #[sea_orm(default_value = 1)]
    pub priority: i32,
}

impl ActiveModelBehavior for ActiveModel {}
