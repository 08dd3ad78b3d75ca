//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod church;
pub mod user;

#[allow(unused_imports)]
pub use church::{ActiveModel as ChurchActiveModel, Entity as ChurchEntity, Model as ChurchModel};
#[allow(unused_imports)]
pub use user::{ActiveModel as UserActiveModel, Entity as UserEntity, Model as UserModel};
