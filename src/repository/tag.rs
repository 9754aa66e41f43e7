use std::collections::HashMap;

use chrono::Local;
use diesel::dsl::{count_star, exists, select};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::tag::{NewTag as DomainNewTag, Tag as DomainTag, UpdateTag as DomainUpdateTag};
use crate::domain::taxonomy::RenameOutcome;
use crate::models::tag::{NewTag as DbNewTag, Tag as DbTag, UpdateTag as DbUpdateTag};
use crate::repository::{
    DieselRepository, TagReader, TagWriter, UniqueNameError, UniqueNameResult,
    ensure_name_available, name_conflict,
};

impl TagReader for DieselRepository {
    fn get_tag_by_id(&self, tag_id: i32, hub_id: i32) -> RepositoryResult<Option<DomainTag>> {
        use crate::schema::tags;

        let mut conn = self.conn()?;

        let tag = tags::table
            .filter(tags::id.eq(tag_id))
            .filter(tags::hub_id.eq(hub_id))
            .first::<DbTag>(&mut conn)
            .optional()?;

        Ok(tag.map(DomainTag::from))
    }

    fn list_tags(&self, hub_id: i32) -> RepositoryResult<Vec<DomainTag>> {
        use crate::schema::tags;

        let mut conn = self.conn()?;

        let db_tags = tags::table
            .filter(tags::hub_id.eq(hub_id))
            .order((tags::name.asc(), tags::id.asc()))
            .load::<DbTag>(&mut conn)?;

        Ok(db_tags.into_iter().map(DomainTag::from).collect())
    }

    fn count_products_by_tag(&self, hub_id: i32) -> RepositoryResult<HashMap<i32, usize>> {
        use crate::schema::{product_tags, products};

        let mut conn = self.conn()?;

        let rows = product_tags::table
            .inner_join(products::table)
            .filter(products::hub_id.eq(hub_id))
            .group_by(product_tags::tag_id)
            .select((product_tags::tag_id, count_star()))
            .load::<(i32, i64)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(tag_id, count)| (tag_id, count as usize))
            .collect())
    }
}

impl TagWriter for DieselRepository {
    fn create_tag(&self, new_tag: &DomainNewTag) -> UniqueNameResult<DomainTag> {
        use crate::schema::tags;

        let mut conn = self.conn()?;
        let insertable = DbNewTag::from(new_tag);

        conn.immediate_transaction::<DomainTag, UniqueNameError, _>(|conn| {
            let names = load_tag_names(conn, new_tag.hub_id, None)?;
            ensure_name_available(names.iter().map(String::as_str), &new_tag.name)?;

            let created = diesel::insert_into(tags::table)
                .values(&insertable)
                .get_result::<DbTag>(conn)
                .map_err(|err| name_conflict(err, &new_tag.name))?;

            Ok(created.into())
        })
    }

    fn rename_tag(
        &self,
        tag_id: i32,
        hub_id: i32,
        updates: &DomainUpdateTag,
    ) -> UniqueNameResult<RenameOutcome<DomainTag>> {
        use crate::schema::{product_tags, tags};

        let mut conn = self.conn()?;
        let db_updates = DbUpdateTag::from(updates);

        conn.immediate_transaction::<RenameOutcome<DomainTag>, UniqueNameError, _>(|conn| {
            let target = tags::table
                .filter(tags::id.eq(tag_id))
                .filter(tags::hub_id.eq(hub_id));

            let updated = diesel::update(target)
                .set(&db_updates)
                .get_result::<DbTag>(conn)
                .optional()
                .map_err(|err| name_conflict(err, &updates.name))?
                .ok_or(RepositoryError::NotFound)?;

            let names = load_tag_names(conn, hub_id, Some(tag_id))?;
            ensure_name_available(names.iter().map(String::as_str), &updates.name)?;

            diesel::update(product_tags::table.filter(product_tags::tag_id.eq(tag_id)))
                .set(product_tags::updated_at.eq(updates.updated_at))
                .execute(conn)?;

            let products_updated = touch_tagged_products(conn, hub_id, tag_id, updates.updated_at)?;

            Ok(RenameOutcome {
                entry: updated.into(),
                products_updated,
            })
        })
    }

    fn delete_tag(&self, tag_id: i32, hub_id: i32) -> RepositoryResult<usize> {
        use crate::schema::{product_tags, tags};

        let mut conn = self.conn()?;

        conn.transaction::<usize, RepositoryError, _>(|conn| {
            ensure_tag_with_hub(conn, hub_id, tag_id)?;

            let now = Local::now().naive_utc();
            touch_tagged_products(conn, hub_id, tag_id, now)?;

            let products_updated =
                diesel::delete(product_tags::table.filter(product_tags::tag_id.eq(tag_id)))
                    .execute(conn)?;

            diesel::delete(
                tags::table
                    .filter(tags::id.eq(tag_id))
                    .filter(tags::hub_id.eq(hub_id)),
            )
            .execute(conn)?;

            Ok(products_updated)
        })
    }
}

fn touch_tagged_products(
    conn: &mut SqliteConnection,
    hub_id: i32,
    tag_id: i32,
    updated_at: chrono::NaiveDateTime,
) -> RepositoryResult<usize> {
    use crate::schema::{product_tags, products};

    let tagged = product_tags::table
        .filter(product_tags::tag_id.eq(tag_id))
        .select(product_tags::product_id);

    let touched = diesel::update(
        products::table
            .filter(products::hub_id.eq(hub_id))
            .filter(products::id.eq_any(tagged)),
    )
    .set(products::updated_at.eq(updated_at))
    .execute(conn)?;

    Ok(touched)
}

fn load_tag_names(
    conn: &mut SqliteConnection,
    hub_id: i32,
    exclude_id: Option<i32>,
) -> QueryResult<Vec<String>> {
    use crate::schema::tags;

    let mut query = tags::table
        .filter(tags::hub_id.eq(hub_id))
        .select(tags::name)
        .into_boxed();
    if let Some(tag_id) = exclude_id {
        query = query.filter(tags::id.ne(tag_id));
    }

    query.load::<String>(conn)
}

pub(crate) fn ensure_tag_with_hub(
    conn: &mut SqliteConnection,
    hub_id: i32,
    tag_id: i32,
) -> RepositoryResult<()> {
    use crate::schema::tags;

    let exists = select(exists(
        tags::table
            .filter(tags::id.eq(tag_id))
            .filter(tags::hub_id.eq(hub_id)),
    ))
    .get_result(conn)?;

    if exists {
        Ok(())
    } else {
        Err(RepositoryError::NotFound)
    }
}

/// Fails with `NotFound` unless every id in `tag_ids` is a tag of the hub.
pub(crate) fn ensure_tags_with_hub(
    conn: &mut SqliteConnection,
    hub_id: i32,
    tag_ids: &[i32],
) -> RepositoryResult<()> {
    use crate::schema::tags;

    if tag_ids.is_empty() {
        return Ok(());
    }

    let mut unique = tag_ids.to_vec();
    unique.sort_unstable();
    unique.dedup();

    let found = tags::table
        .filter(tags::hub_id.eq(hub_id))
        .filter(tags::id.eq_any(unique.as_slice()))
        .count()
        .get_result::<i64>(conn)?;

    if found as usize == unique.len() {
        Ok(())
    } else {
        Err(RepositoryError::NotFound)
    }
}
