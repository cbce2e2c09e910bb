#[allow(unused_imports)]
pub mod prelude {
    pub use super::store_meta::Entity as StoreMeta;
    pub use super::todo::Entity as Todo;
}

pub mod store_meta;
pub mod todo;
