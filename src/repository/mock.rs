use std::collections::HashMap;

use mockall::mock;

use super::{
    CategoryReader, CategoryWriter, ProductReader, ProductWriter, TagReader, TagWriter,
    UniqueNameResult, VariableReader, VariableWriter, VariationReader, VariationWriter,
};
use crate::domain::{
    category::{Category, NewCategory, UpdateCategory},
    product::{NewProduct, Product, ProductListQuery},
    tag::{NewTag, Tag, UpdateTag},
    taxonomy::RenameOutcome,
    variable::{NewVariable, Variable},
    variation::{NewVariation, Variation},
};
use pushkind_common::repository::errors::RepositoryResult;

mock! {
    pub CategoryReader {}

    impl CategoryReader for CategoryReader {
        fn get_category_by_id(&self, category_id: i32, hub_id: i32) -> RepositoryResult<Option<Category>>;
        fn list_categories(&self, hub_id: i32) -> RepositoryResult<Vec<Category>>;
        fn count_products_by_category(&self, hub_id: i32) -> RepositoryResult<HashMap<i32, usize>>;
    }
}

mock! {
    pub CategoryWriter {}

    impl CategoryWriter for CategoryWriter {
        fn create_category(&self, new_category: &NewCategory) -> UniqueNameResult<Category>;
        fn rename_category(&self, category_id: i32, hub_id: i32, updates: &UpdateCategory) -> UniqueNameResult<RenameOutcome<Category>>;
        fn delete_category(&self, category_id: i32, hub_id: i32, reassign_to: Option<i32>) -> RepositoryResult<usize>;
        fn reorder_categories(&self, hub_id: i32, ordered_ids: &[i32]) -> RepositoryResult<Vec<Category>>;
    }
}

mock! {
    pub TagReader {}

    impl TagReader for TagReader {
        fn get_tag_by_id(&self, tag_id: i32, hub_id: i32) -> RepositoryResult<Option<Tag>>;
        fn list_tags(&self, hub_id: i32) -> RepositoryResult<Vec<Tag>>;
        fn count_products_by_tag(&self, hub_id: i32) -> RepositoryResult<HashMap<i32, usize>>;
    }
}

mock! {
    pub TagWriter {}

    impl TagWriter for TagWriter {
        fn create_tag(&self, new_tag: &NewTag) -> UniqueNameResult<Tag>;
        fn rename_tag(&self, tag_id: i32, hub_id: i32, updates: &UpdateTag) -> UniqueNameResult<RenameOutcome<Tag>>;
        fn delete_tag(&self, tag_id: i32, hub_id: i32) -> RepositoryResult<usize>;
    }
}

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn set_product_tags(&self, product_id: i32, hub_id: i32, tag_ids: &[i32]) -> RepositoryResult<Product>;
    }
}

mock! {
    pub VariableReader {}

    impl VariableReader for VariableReader {
        fn list_variables(&self, product_id: i32, hub_id: i32) -> RepositoryResult<Vec<Variable>>;
    }
}

mock! {
    pub VariableWriter {}

    impl VariableWriter for VariableWriter {
        fn replace_variables(&self, product_id: i32, hub_id: i32, variables: &[NewVariable]) -> RepositoryResult<Vec<Variable>>;
    }
}

mock! {
    pub VariationReader {}

    impl VariationReader for VariationReader {
        fn list_variations(&self, product_id: i32, hub_id: i32) -> RepositoryResult<Vec<Variation>>;
    }
}

mock! {
    pub VariationWriter {}

    impl VariationWriter for VariationWriter {
        fn replace_variations(&self, product_id: i32, hub_id: i32, variations: &[NewVariation]) -> RepositoryResult<Vec<Variation>>;
    }
}
