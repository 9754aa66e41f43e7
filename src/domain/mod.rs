pub mod category;
pub mod product;
pub mod slug;
pub mod tag;
pub mod taxonomy;
pub mod variable;
pub mod variation;
