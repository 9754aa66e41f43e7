use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::variable::{NewVariable as DomainNewVariable, Variable as DomainVariable};
use crate::models::variable::{
    NewProductVariable, NewProductVariableValue, ProductVariable, ProductVariableValue,
};
use crate::repository::product::ensure_product_with_hub;
use crate::repository::{DieselRepository, VariableReader, VariableWriter};

impl VariableReader for DieselRepository {
    fn list_variables(&self, product_id: i32, hub_id: i32) -> RepositoryResult<Vec<DomainVariable>> {
        let mut conn = self.conn()?;

        ensure_product_with_hub(&mut conn, hub_id, product_id)?;
        load_variables(&mut conn, product_id)
    }
}

impl VariableWriter for DieselRepository {
    fn replace_variables(
        &self,
        product_id: i32,
        hub_id: i32,
        variables: &[DomainNewVariable],
    ) -> RepositoryResult<Vec<DomainVariable>> {
        use crate::schema::{product_variable_values, product_variables};

        let mut conn = self.conn()?;

        conn.transaction::<Vec<DomainVariable>, RepositoryError, _>(|conn| {
            ensure_product_with_hub(conn, hub_id, product_id)?;

            let existing = product_variables::table
                .filter(product_variables::product_id.eq(product_id))
                .select(product_variables::id);

            diesel::delete(
                product_variable_values::table
                    .filter(product_variable_values::variable_id.eq_any(existing)),
            )
            .execute(conn)?;

            diesel::delete(
                product_variables::table.filter(product_variables::product_id.eq(product_id)),
            )
            .execute(conn)?;

            for variable in variables {
                let created = diesel::insert_into(product_variables::table)
                    .values(&NewProductVariable {
                        product_id,
                        name: variable.name.as_str(),
                        display_order: variable.display_order,
                    })
                    .get_result::<ProductVariable>(conn)?;

                if variable.values.is_empty() {
                    continue;
                }

                let values: Vec<NewProductVariableValue> = variable
                    .values
                    .iter()
                    .map(|value| NewProductVariableValue {
                        variable_id: created.id,
                        value: value.value.as_str(),
                        display_order: value.display_order,
                    })
                    .collect();

                diesel::insert_into(product_variable_values::table)
                    .values(&values)
                    .execute(conn)?;
            }

            load_variables(conn, product_id)
        })
    }
}

fn load_variables(
    conn: &mut SqliteConnection,
    product_id: i32,
) -> RepositoryResult<Vec<DomainVariable>> {
    use crate::schema::{product_variable_values, product_variables};

    let variables = product_variables::table
        .filter(product_variables::product_id.eq(product_id))
        .order((
            product_variables::display_order.asc(),
            product_variables::id.asc(),
        ))
        .load::<ProductVariable>(conn)?;

    if variables.is_empty() {
        return Ok(Vec::new());
    }

    let values = ProductVariableValue::belonging_to(&variables)
        .order((
            product_variable_values::display_order.asc(),
            product_variable_values::id.asc(),
        ))
        .load::<ProductVariableValue>(conn)?
        .grouped_by(&variables);

    Ok(variables
        .into_iter()
        .zip(values)
        .map(|(variable, values)| variable.into_domain(values))
        .collect())
}
