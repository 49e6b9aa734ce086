use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Admin-tunable platform parameters (e.g. the creation fee).
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "platform_config")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub key: String,

    pub value: String,
    pub description: String,
}

impl ActiveModelBehavior for ActiveModel {}
