//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod adoption_request;
pub mod cart;
pub mod cart_item;
pub mod order;
pub mod order_item;
pub mod pet;
pub mod product;
pub mod vet_consultation;

// Re-export specific types to avoid conflicts
pub use adoption_request::{
    Column as AdoptionRequestColumn, Entity as AdoptionRequest, Model as AdoptionRequestModel,
};
pub use cart::{Column as CartColumn, Entity as Cart, Model as CartModel};
pub use cart_item::{Column as CartItemColumn, Entity as CartItem, Model as CartItemModel};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel};
pub use order_item::{Column as OrderItemColumn, Entity as OrderItem, Model as OrderItemModel};
pub use pet::{Column as PetColumn, Entity as Pet, Model as PetModel};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use vet_consultation::{
    Column as VetConsultationColumn, Entity as VetConsultation, Model as VetConsultationModel,
};
