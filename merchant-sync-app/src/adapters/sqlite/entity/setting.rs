//! `SeaORM` entity for the `settings` table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "settings")]
/// One setting. When `seal_version` is set, `value` holds the Base64
/// ciphertext and `salt`/`nonce` the matching parameters.
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
    pub value: String,
    pub salt: Option<String>,
    pub nonce: Option<String>,
    pub seal_version: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
