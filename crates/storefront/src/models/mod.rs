//! Domain models for the storefront.

pub mod cart;
pub mod catalog;
pub mod content;
pub mod order;
pub mod session;
pub mod user;

pub use cart::{Cart, CartItem};
pub use catalog::{Category, Product};
pub use content::{
    BrandStory, CategoryTile, HeroSlide, Highlight, HomeContent, LogoSettings, ShowcaseSection,
};
pub use order::{Order, OrderItem};
pub use session::CurrentUser;
pub use user::User;
