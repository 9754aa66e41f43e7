pub mod category;
pub mod product;
pub mod product_tag;
pub mod tag;
pub mod variable;
pub mod variation;
