use std::collections::HashMap;

use chrono::Local;
use diesel::dsl::{count_star, exists, max, select};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::category::{
    Category as DomainCategory, NewCategory as DomainNewCategory,
    UpdateCategory as DomainUpdateCategory,
};
use crate::domain::taxonomy::RenameOutcome;
use crate::models::category::{
    Category as DbCategory, NewCategory as DbNewCategory, UpdateCategory as DbUpdateCategory,
};
use crate::repository::{
    CategoryReader, CategoryWriter, DieselRepository, UniqueNameError, UniqueNameResult,
    ensure_name_available, name_conflict,
};

impl CategoryReader for DieselRepository {
    fn get_category_by_id(
        &self,
        category_id: i32,
        hub_id: i32,
    ) -> RepositoryResult<Option<DomainCategory>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::id.eq(category_id))
            .filter(categories::hub_id.eq(hub_id))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        Ok(category.map(DomainCategory::from))
    }

    fn list_categories(&self, hub_id: i32) -> RepositoryResult<Vec<DomainCategory>> {
        let mut conn = self.conn()?;
        load_ordered_categories(&mut conn, hub_id)
    }

    fn count_products_by_category(&self, hub_id: i32) -> RepositoryResult<HashMap<i32, usize>> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let rows = products::table
            .filter(products::hub_id.eq(hub_id))
            .filter(products::category_id.is_not_null())
            .group_by(products::category_id)
            .select((products::category_id, count_star()))
            .load::<(Option<i32>, i64)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .filter_map(|(category_id, count)| category_id.map(|id| (id, count as usize)))
            .collect())
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(
        &self,
        new_category: &DomainNewCategory,
    ) -> UniqueNameResult<DomainCategory> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<DomainCategory, UniqueNameError, _>(|conn| {
            let names = load_category_names(conn, new_category.hub_id, None)?;
            ensure_name_available(names.iter().map(String::as_str), &new_category.name)?;

            let last_position = categories::table
                .filter(categories::hub_id.eq(new_category.hub_id))
                .select(max(categories::sort_order))
                .first::<Option<i32>>(conn)?;

            let mut insertable = DbNewCategory::from(new_category);
            insertable.sort_order = last_position.map_or(0, |position| position + 1);

            let created = diesel::insert_into(categories::table)
                .values(&insertable)
                .get_result::<DbCategory>(conn)
                .map_err(|err| name_conflict(err, &new_category.name))?;

            Ok(created.into())
        })
    }

    fn rename_category(
        &self,
        category_id: i32,
        hub_id: i32,
        updates: &DomainUpdateCategory,
    ) -> UniqueNameResult<RenameOutcome<DomainCategory>> {
        use crate::schema::{categories, products};

        let mut conn = self.conn()?;
        let db_updates = DbUpdateCategory::from(updates);

        conn.immediate_transaction::<RenameOutcome<DomainCategory>, UniqueNameError, _>(|conn| {
            let target = categories::table
                .filter(categories::id.eq(category_id))
                .filter(categories::hub_id.eq(hub_id));

            let updated = diesel::update(target)
                .set(&db_updates)
                .get_result::<DbCategory>(conn)
                .optional()
                .map_err(|err| name_conflict(err, &updates.name))?
                .ok_or(RepositoryError::NotFound)?;

            let names = load_category_names(conn, hub_id, Some(category_id))?;
            ensure_name_available(names.iter().map(String::as_str), &updates.name)?;

            // Products keep the foreign key; bumping them marks their listing stale.
            let products_updated = diesel::update(
                products::table
                    .filter(products::hub_id.eq(hub_id))
                    .filter(products::category_id.eq(category_id)),
            )
            .set(products::updated_at.eq(updates.updated_at))
            .execute(conn)?;

            Ok(RenameOutcome {
                entry: updated.into(),
                products_updated,
            })
        })
    }

    fn delete_category(
        &self,
        category_id: i32,
        hub_id: i32,
        reassign_to: Option<i32>,
    ) -> RepositoryResult<usize> {
        use crate::schema::{categories, products};

        let mut conn = self.conn()?;

        conn.transaction::<usize, RepositoryError, _>(|conn| {
            ensure_category_with_hub(conn, hub_id, category_id)?;
            if let Some(target_id) = reassign_to {
                ensure_category_with_hub(conn, hub_id, target_id)?;
            }

            let now = Local::now().naive_utc();

            let products_updated = diesel::update(
                products::table
                    .filter(products::hub_id.eq(hub_id))
                    .filter(products::category_id.eq(category_id)),
            )
            .set((
                products::category_id.eq(reassign_to),
                products::updated_at.eq(now),
            ))
            .execute(conn)?;

            diesel::delete(
                categories::table
                    .filter(categories::id.eq(category_id))
                    .filter(categories::hub_id.eq(hub_id)),
            )
            .execute(conn)?;

            Ok(products_updated)
        })
    }

    fn reorder_categories(
        &self,
        hub_id: i32,
        ordered_ids: &[i32],
    ) -> RepositoryResult<Vec<DomainCategory>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        conn.transaction::<Vec<DomainCategory>, RepositoryError, _>(|conn| {
            let mut existing = categories::table
                .filter(categories::hub_id.eq(hub_id))
                .select(categories::id)
                .load::<i32>(conn)?;
            existing.sort_unstable();

            let mut requested = ordered_ids.to_vec();
            requested.sort_unstable();

            if existing != requested {
                return Err(RepositoryError::NotFound);
            }

            let now = Local::now().naive_utc();
            for (position, category_id) in ordered_ids.iter().enumerate() {
                diesel::update(
                    categories::table
                        .filter(categories::id.eq(*category_id))
                        .filter(categories::hub_id.eq(hub_id)),
                )
                .set((
                    categories::sort_order.eq(position as i32),
                    categories::updated_at.eq(now),
                ))
                .execute(conn)?;
            }

            load_ordered_categories(conn, hub_id)
        })
    }
}

fn load_ordered_categories(
    conn: &mut SqliteConnection,
    hub_id: i32,
) -> RepositoryResult<Vec<DomainCategory>> {
    use crate::schema::categories;

    let categories = categories::table
        .filter(categories::hub_id.eq(hub_id))
        .order((categories::sort_order.asc(), categories::id.asc()))
        .load::<DbCategory>(conn)?;

    Ok(categories.into_iter().map(DomainCategory::from).collect())
}

/// Names of the hub's categories, leaving out `exclude_id` when given.
fn load_category_names(
    conn: &mut SqliteConnection,
    hub_id: i32,
    exclude_id: Option<i32>,
) -> QueryResult<Vec<String>> {
    use crate::schema::categories;

    let mut query = categories::table
        .filter(categories::hub_id.eq(hub_id))
        .select(categories::name)
        .into_boxed();
    if let Some(category_id) = exclude_id {
        query = query.filter(categories::id.ne(category_id));
    }

    query.load::<String>(conn)
}

pub(crate) fn ensure_category_with_hub(
    conn: &mut SqliteConnection,
    hub_id: i32,
    category_id: i32,
) -> RepositoryResult<()> {
    use crate::schema::categories;

    let exists = select(exists(
        categories::table
            .filter(categories::id.eq(category_id))
            .filter(categories::hub_id.eq(hub_id)),
    ))
    .get_result(conn)?;

    if exists {
        Ok(())
    } else {
        Err(RepositoryError::NotFound)
    }
}
