pub mod brand;
pub mod message;
pub mod post;
pub mod ppe_category;
pub mod ppe_section;
pub mod product;

pub use brand::Entity as BrandEntity;
pub use message::Entity as MessageEntity;
pub use post::Entity as PostEntity;
pub use ppe_category::Entity as PpeCategoryEntity;
pub use ppe_section::Entity as PpeSectionEntity;
pub use product::Entity as ProductEntity;
