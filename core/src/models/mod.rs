// core/src/models/mod.rs

pub mod cart;
pub mod order;
pub mod product;
pub mod user;

pub use cart::{CartItem, CheckoutRequest};
pub use order::{Order, OrderItem, ORDER_STATUS_PENDING};
pub use product::{NewProduct, Product};
pub use user::{NewUser, User};
