use diesel::prelude::*;

mod common;

#[test]
fn test_db_files_live_and_die_with_handle() {
    let path = {
        let test_db = common::TestDb::new("test_db_lifecycle.db");
        assert!(test_db.pool().get().is_ok());
        assert!(test_db.path().exists());
        test_db.path().to_path_buf()
    };

    assert!(!path.exists());
    let parent = path.parent().expect("database lives in a directory");
    assert!(!parent.exists());
}

#[test]
fn test_migrations_create_empty_catalog_tables() {
    use pushkind_catalog::schema::{
        categories, product_tags, product_variable_values, product_variables,
        product_variations, products, tags,
    };

    let test_db = common::TestDb::new("test_migrations.db");
    let mut conn = test_db.pool().get().expect("connection");

    let counts = [
        categories::table.count().get_result::<i64>(&mut conn),
        tags::table.count().get_result::<i64>(&mut conn),
        products::table.count().get_result::<i64>(&mut conn),
        product_tags::table.count().get_result::<i64>(&mut conn),
        product_variables::table.count().get_result::<i64>(&mut conn),
        product_variable_values::table.count().get_result::<i64>(&mut conn),
        product_variations::table.count().get_result::<i64>(&mut conn),
    ];

    for count in counts {
        assert_eq!(count.expect("table should exist"), 0);
    }
}
