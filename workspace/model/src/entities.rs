//! Root of the SeaORM entity modules.
//!
//! Identity tables (`roles`, `users`, `user_roles`) follow the layout of the
//! identity framework the store was first deployed with; `categories` and
//! `products` hold the catalog.

pub mod category;
pub mod product;
pub mod role;
pub mod user;
pub mod user_role;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::category::Entity as Category;
    pub use super::product::Entity as Product;
    pub use super::role::Entity as Role;
    pub use super::user::Entity as User;
    pub use super::user_role::Entity as UserRole;
}
