use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::variation::{NewVariation as DomainNewVariation, Variation as DomainVariation};
use crate::models::variation::{NewProductVariation, ProductVariation};
use crate::repository::product::ensure_product_with_hub;
use crate::repository::{DieselRepository, VariationReader, VariationWriter};

impl VariationReader for DieselRepository {
    fn list_variations(
        &self,
        product_id: i32,
        hub_id: i32,
    ) -> RepositoryResult<Vec<DomainVariation>> {
        let mut conn = self.conn()?;

        ensure_product_with_hub(&mut conn, hub_id, product_id)?;
        load_variations(&mut conn, product_id)
    }
}

impl VariationWriter for DieselRepository {
    fn replace_variations(
        &self,
        product_id: i32,
        hub_id: i32,
        variations: &[DomainNewVariation],
    ) -> RepositoryResult<Vec<DomainVariation>> {
        use crate::schema::product_variations;

        let mut conn = self.conn()?;

        conn.transaction::<Vec<DomainVariation>, RepositoryError, _>(|conn| {
            ensure_product_with_hub(conn, hub_id, product_id)?;

            diesel::delete(
                product_variations::table.filter(product_variations::product_id.eq(product_id)),
            )
            .execute(conn)?;

            if !variations.is_empty() {
                let rows: Vec<NewProductVariation> = variations
                    .iter()
                    .map(|variation| NewProductVariation::new(product_id, variation))
                    .collect();

                diesel::insert_into(product_variations::table)
                    .values(&rows)
                    .execute(conn)?;
            }

            load_variations(conn, product_id)
        })
    }
}

fn load_variations(
    conn: &mut SqliteConnection,
    product_id: i32,
) -> RepositoryResult<Vec<DomainVariation>> {
    use crate::schema::product_variations;

    let rows = product_variations::table
        .filter(product_variations::product_id.eq(product_id))
        .order(product_variations::id.asc())
        .load::<ProductVariation>(conn)?;

    Ok(rows.into_iter().map(DomainVariation::from).collect())
}
