use std::collections::HashMap;

use chrono::Local;
use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::product::{NewProduct as DomainNewProduct, Product as DomainProduct, ProductListQuery},
    models::product::{NewProduct as DbNewProduct, Product as DbProduct},
    models::product_tag::{NewProductTag, ProductTag},
    repository::category::ensure_category_with_hub,
    repository::tag::ensure_tags_with_hub,
    repository::{DieselRepository, ProductReader, ProductWriter},
};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<DomainProduct>> {
        let mut conn = self.conn()?;
        load_product(&mut conn, id, hub_id)
    }

    fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainProduct>)> {
        use crate::schema::{product_tags, products};

        let mut conn = self.conn()?;

        let build = || {
            let mut items = products::table
                .filter(products::hub_id.eq(query.hub_id))
                .into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(term) = query.search.as_ref() {
                let pattern = format!("%{}%", term);
                items = items.filter(
                    products::name
                        .like(pattern.clone())
                        .or(products::sku.like(pattern)),
                );
            }

            if let Some(category_id) = query.category_id {
                items = items.filter(products::category_id.eq(category_id));
            }

            if let Some(tag_id) = query.tag_id {
                items = items.filter(
                    products::id.eq_any(
                        product_tags::table
                            .filter(product_tags::tag_id.eq(tag_id))
                            .select(product_tags::product_id),
                    ),
                );
            }

            items
        };

        let total = build().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = build().order((products::name.asc(), products::id.asc()));

        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let db_products = items.load::<DbProduct>(&mut conn)?;

        if db_products.is_empty() {
            return Ok((total, Vec::new()));
        }

        let product_ids: Vec<i32> = db_products.iter().map(|product| product.id).collect();
        let mut tag_map = load_tag_ids_for_products(&mut conn, &product_ids)?;

        let mut domain_products = Vec::with_capacity(db_products.len());
        for db_product in db_products {
            let mut domain: DomainProduct = db_product.into();
            domain.tag_ids = tag_map.remove(&domain.id).unwrap_or_default();
            domain_products.push(domain);
        }

        Ok((total, domain_products))
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        conn.transaction::<DomainProduct, RepositoryError, _>(|conn| {
            if let Some(category_id) = new_product.category_id {
                ensure_category_with_hub(conn, new_product.hub_id, category_id)?;
            }
            ensure_tags_with_hub(conn, new_product.hub_id, &new_product.tag_ids)?;

            let db_new = DbNewProduct::from(new_product);
            let created = diesel::insert_into(products::table)
                .values(&db_new)
                .get_result::<DbProduct>(conn)?;

            insert_tag_links(conn, created.id, &new_product.tag_ids)?;

            load_product(conn, created.id, new_product.hub_id)?.ok_or(RepositoryError::NotFound)
        })
    }

    fn set_product_tags(
        &self,
        product_id: i32,
        hub_id: i32,
        tag_ids: &[i32],
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::{product_tags, products};

        let mut conn = self.conn()?;

        conn.transaction::<DomainProduct, RepositoryError, _>(|conn| {
            ensure_product_with_hub(conn, hub_id, product_id)?;
            ensure_tags_with_hub(conn, hub_id, tag_ids)?;

            diesel::delete(product_tags::table.filter(product_tags::product_id.eq(product_id)))
                .execute(conn)?;
            insert_tag_links(conn, product_id, tag_ids)?;

            diesel::update(
                products::table
                    .filter(products::id.eq(product_id))
                    .filter(products::hub_id.eq(hub_id)),
            )
            .set(products::updated_at.eq(Local::now().naive_utc()))
            .execute(conn)?;

            load_product(conn, product_id, hub_id)?.ok_or(RepositoryError::NotFound)
        })
    }
}

fn load_product(
    conn: &mut SqliteConnection,
    product_id: i32,
    hub_id: i32,
) -> RepositoryResult<Option<DomainProduct>> {
    use crate::schema::products;

    let product = products::table
        .filter(products::id.eq(product_id))
        .filter(products::hub_id.eq(hub_id))
        .first::<DbProduct>(conn)
        .optional()?;

    match product {
        Some(db_product) => {
            let mut domain: DomainProduct = db_product.into();
            let mut tags = load_tag_ids_for_products(conn, &[domain.id])?;
            domain.tag_ids = tags.remove(&domain.id).unwrap_or_default();
            Ok(Some(domain))
        }
        None => Ok(None),
    }
}

fn insert_tag_links(
    conn: &mut SqliteConnection,
    product_id: i32,
    tag_ids: &[i32],
) -> RepositoryResult<()> {
    use crate::schema::product_tags;

    let mut unique = tag_ids.to_vec();
    unique.sort_unstable();
    unique.dedup();

    if unique.is_empty() {
        return Ok(());
    }

    let links: Vec<NewProductTag> = unique
        .into_iter()
        .map(|tag_id| NewProductTag::new(product_id, tag_id))
        .collect();

    diesel::insert_into(product_tags::table)
        .values(&links)
        .execute(conn)?;

    Ok(())
}

fn load_tag_ids_for_products(
    conn: &mut SqliteConnection,
    product_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<i32>>> {
    use crate::schema::product_tags;

    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = product_tags::table
        .filter(product_tags::product_id.eq_any(product_ids))
        .order((product_tags::product_id.asc(), product_tags::tag_id.asc()))
        .load::<ProductTag>(conn)?;

    let mut map: HashMap<i32, Vec<i32>> = HashMap::new();
    for link in rows {
        map.entry(link.product_id).or_default().push(link.tag_id);
    }

    Ok(map)
}

pub(crate) fn ensure_product_with_hub(
    conn: &mut SqliteConnection,
    hub_id: i32,
    product_id: i32,
) -> RepositoryResult<()> {
    use crate::schema::products;

    let exists = select(exists(
        products::table
            .filter(products::id.eq(product_id))
            .filter(products::hub_id.eq(hub_id)),
    ))
    .get_result(conn)?;

    if exists {
        Ok(())
    } else {
        Err(RepositoryError::NotFound)
    }
}
