use pushkind_common::repository::errors::RepositoryError;
use pushkind_catalog::domain::category::{NewCategory, UpdateCategory};
use pushkind_catalog::domain::product::{NewProduct, ProductListQuery};
use pushkind_catalog::domain::tag::{NewTag, UpdateTag};
use pushkind_catalog::repository::{
    CategoryReader, CategoryWriter, DieselRepository, ProductReader, ProductWriter, TagReader,
    TagWriter, UniqueNameError,
};

mod common;

#[test]
fn test_category_repository_crud() {
    let test_db = common::TestDb::new("test_category_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let drinks = repo
        .create_category(&NewCategory::new(1, "Drinks"))
        .unwrap();
    let snacks = repo
        .create_category(&NewCategory::new(1, "Salty Snacks"))
        .unwrap();
    let foreign = repo
        .create_category(&NewCategory::new(2, "Drinks"))
        .unwrap();

    assert_eq!(drinks.sort_order, 0);
    assert_eq!(snacks.sort_order, 1);
    assert_eq!(snacks.slug, "salty-snacks");
    assert_eq!(foreign.sort_order, 0);

    let names: Vec<String> = repo
        .list_categories(1)
        .unwrap()
        .into_iter()
        .map(|category| category.name)
        .collect();
    assert_eq!(names, vec!["Drinks", "Salty Snacks"]);

    assert!(repo.get_category_by_id(drinks.id, 2).unwrap().is_none());

    let err = repo
        .rename_category(drinks.id, 2, &UpdateCategory::new("Intruder"))
        .expect_err("expected hub-scoped rename to fail");
    assert!(matches!(
        err,
        UniqueNameError::Repository(RepositoryError::NotFound)
    ));

    let outcome = repo
        .rename_category(drinks.id, 1, &UpdateCategory::new("Cold Drinks"))
        .unwrap();
    assert_eq!(outcome.entry.name, "Cold Drinks");
    assert_eq!(outcome.entry.slug, "cold-drinks");
    assert_eq!(outcome.products_updated, 0);

    let err = repo
        .delete_category(snacks.id, 2, None)
        .expect_err("expected hub-scoped delete to fail");
    assert!(matches!(err, RepositoryError::NotFound));

    repo.delete_category(snacks.id, 1, None).unwrap();
    assert!(repo.get_category_by_id(snacks.id, 1).unwrap().is_none());
    assert_eq!(repo.list_categories(2).unwrap().len(), 1);
}

#[test]
fn test_category_names_are_unique_per_hub_ignoring_case() {
    let test_db = common::TestDb::new("test_category_names_unique.db");
    let repo = DieselRepository::new(test_db.pool());

    repo.create_category(&NewCategory::new(1, "Drinks")).unwrap();

    let err = repo
        .create_category(&NewCategory::new(1, "drinks"))
        .expect_err("expected duplicate to be rejected");
    assert!(matches!(err, UniqueNameError::Taken(name) if name == "drinks"));
    assert!(repo.create_category(&NewCategory::new(2, "drinks")).is_ok());
}

#[test]
fn test_category_names_clash_across_non_ascii_case() {
    let test_db = common::TestDb::new("test_category_names_non_ascii.db");
    let repo = DieselRepository::new(test_db.pool());

    let coffee = repo.create_category(&NewCategory::new(1, "Кофе")).unwrap();
    let tea = repo.create_category(&NewCategory::new(1, "Чай")).unwrap();

    let err = repo
        .create_category(&NewCategory::new(1, "кофе"))
        .expect_err("expected Cyrillic case variant to be rejected");
    assert!(matches!(err, UniqueNameError::Taken(name) if name == "кофе"));

    let err = repo
        .rename_category(tea.id, 1, &UpdateCategory::new("КОФЕ"))
        .expect_err("expected rename onto a case variant to be rejected");
    assert!(matches!(err, UniqueNameError::Taken(_)));

    let names: Vec<String> = repo
        .list_categories(1)
        .unwrap()
        .into_iter()
        .map(|category| category.name)
        .collect();
    assert_eq!(names, vec!["Кофе", "Чай"]);

    let outcome = repo
        .rename_category(coffee.id, 1, &UpdateCategory::new("КОФЕ"))
        .unwrap();
    assert_eq!(outcome.entry.name, "КОФЕ");
    assert!(repo.create_category(&NewCategory::new(2, "кофе")).is_ok());
}

#[test]
fn test_tag_names_clash_across_non_ascii_case() {
    let test_db = common::TestDb::new("test_tag_names_non_ascii.db");
    let repo = DieselRepository::new(test_db.pool());

    repo.create_tag(&NewTag::new(1, "Кофе")).unwrap();
    let tea = repo.create_tag(&NewTag::new(1, "Чай")).unwrap();

    let err = repo
        .create_tag(&NewTag::new(1, "кофе"))
        .expect_err("expected Cyrillic case variant to be rejected");
    assert!(matches!(err, UniqueNameError::Taken(name) if name == "кофе"));

    let err = repo
        .create_tag(&NewTag::new(1, "чай"))
        .expect_err("expected duplicate to be rejected");
    assert!(matches!(err, UniqueNameError::Taken(_)));

    let err = repo
        .rename_tag(tea.id, 1, &UpdateTag::now("кОфЕ"))
        .expect_err("expected rename onto a case variant to be rejected");
    assert!(matches!(err, UniqueNameError::Taken(_)));
    assert_eq!(repo.get_tag_by_id(tea.id, 1).unwrap().unwrap().name, "Чай");
}

#[test]
fn test_reorder_categories_assigns_dense_positions() {
    let test_db = common::TestDb::new("test_reorder_categories.db");
    let repo = DieselRepository::new(test_db.pool());

    let c1 = repo.create_category(&NewCategory::new(1, "One")).unwrap();
    let c2 = repo.create_category(&NewCategory::new(1, "Two")).unwrap();
    let c3 = repo.create_category(&NewCategory::new(1, "Three")).unwrap();

    let ordered = repo.reorder_categories(1, &[c3.id, c1.id, c2.id]).unwrap();

    let summary: Vec<(i32, i32)> = ordered
        .iter()
        .map(|category| (category.id, category.sort_order))
        .collect();
    assert_eq!(summary, vec![(c3.id, 0), (c1.id, 1), (c2.id, 2)]);

    let err = repo
        .reorder_categories(1, &[c3.id, c1.id])
        .expect_err("expected partial order to fail");
    assert!(matches!(err, RepositoryError::NotFound));

    let unchanged: Vec<i32> = repo
        .list_categories(1)
        .unwrap()
        .iter()
        .map(|category| category.id)
        .collect();
    assert_eq!(unchanged, vec![c3.id, c1.id, c2.id]);
}

#[test]
fn test_category_delete_and_merge_cascades() {
    let test_db = common::TestDb::new("test_category_cascades.db");
    let repo = DieselRepository::new(test_db.pool());

    let source = repo.create_category(&NewCategory::new(1, "Source")).unwrap();
    let target = repo.create_category(&NewCategory::new(1, "Target")).unwrap();
    let doomed = repo.create_category(&NewCategory::new(1, "Doomed")).unwrap();

    for name in ["A", "B", "C"] {
        repo.create_product(&NewProduct::new(1, name).with_category_id(source.id))
            .unwrap();
    }
    repo.create_product(&NewProduct::new(1, "D").with_category_id(target.id))
        .unwrap();
    repo.create_product(&NewProduct::new(1, "E").with_category_id(doomed.id))
        .unwrap();

    let counts = repo.count_products_by_category(1).unwrap();
    assert_eq!(counts.get(&source.id), Some(&3));
    assert_eq!(counts.get(&target.id), Some(&1));

    let err = repo
        .delete_category(source.id, 1, Some(999))
        .expect_err("expected unknown target to fail");
    assert!(matches!(err, RepositoryError::NotFound));
    assert!(repo.get_category_by_id(source.id, 1).unwrap().is_some());

    let merged = repo.delete_category(source.id, 1, Some(target.id)).unwrap();
    assert_eq!(merged, 3);

    let counts = repo.count_products_by_category(1).unwrap();
    assert_eq!(counts.get(&target.id), Some(&4));
    assert!(!counts.contains_key(&source.id));

    let cleared = repo.delete_category(doomed.id, 1, None).unwrap();
    assert_eq!(cleared, 1);

    let (_, orphans) = repo
        .list_products(ProductListQuery::new(1).search("E"))
        .unwrap();
    assert_eq!(orphans.len(), 1);
    assert_eq!(orphans[0].category_id, None);
}

#[test]
fn test_tag_repository_cascades() {
    let test_db = common::TestDb::new("test_tag_repository_cascades.db");
    let repo = DieselRepository::new(test_db.pool());

    let organic = repo.create_tag(&NewTag::new(1, "Organic")).unwrap();
    let vegan = repo.create_tag(&NewTag::new(1, "Vegan")).unwrap();
    let foreign = repo.create_tag(&NewTag::new(2, "Organic")).unwrap();

    let first = repo
        .create_product(&NewProduct::new(1, "Oats").with_tag_ids(vec![organic.id, vegan.id]))
        .unwrap();
    repo.create_product(&NewProduct::new(1, "Honey").with_tag_ids(vec![organic.id]))
        .unwrap();
    assert_eq!(first.tag_ids, vec![organic.id, vegan.id]);

    let err = repo
        .create_product(&NewProduct::new(1, "Smuggled").with_tag_ids(vec![foreign.id]))
        .expect_err("expected foreign tag to be rejected");
    assert!(matches!(err, RepositoryError::NotFound));

    let counts = repo.count_products_by_tag(1).unwrap();
    assert_eq!(counts.get(&organic.id), Some(&2));
    assert_eq!(counts.get(&vegan.id), Some(&1));
    assert!(repo.count_products_by_tag(2).unwrap().is_empty());

    let outcome = repo
        .rename_tag(organic.id, 1, &UpdateTag::now("Bio"))
        .unwrap();
    assert_eq!(outcome.entry.slug, "bio");
    assert_eq!(outcome.products_updated, 2);

    let names: Vec<String> = repo
        .list_tags(1)
        .unwrap()
        .into_iter()
        .map(|tag| tag.name)
        .collect();
    assert_eq!(names, vec!["Bio", "Vegan"]);

    let err = repo
        .delete_tag(vegan.id, 2)
        .expect_err("expected hub-scoped delete to fail");
    assert!(matches!(err, RepositoryError::NotFound));

    let untagged = repo.delete_tag(organic.id, 1).unwrap();
    assert_eq!(untagged, 2);

    let oats = repo.get_product_by_id(first.id, 1).unwrap().unwrap();
    assert_eq!(oats.tag_ids, vec![vegan.id]);
    assert!(repo.get_tag_by_id(organic.id, 1).unwrap().is_none());
}

#[test]
fn test_product_listing_filters_and_tag_replacement() {
    let test_db = common::TestDb::new("test_product_listing_filters.db");
    let repo = DieselRepository::new(test_db.pool());

    let teas = repo.create_category(&NewCategory::new(1, "Teas")).unwrap();
    let loose = repo.create_tag(&NewTag::new(1, "Loose leaf")).unwrap();
    let bagged = repo.create_tag(&NewTag::new(1, "Bagged")).unwrap();

    let green = repo
        .create_product(
            &NewProduct::new(1, "Green tea")
                .with_sku("TEA-GRN")
                .with_category_id(teas.id)
                .with_tag_ids(vec![loose.id]),
        )
        .unwrap();
    repo.create_product(&NewProduct::new(1, "Black tea").with_category_id(teas.id))
        .unwrap();
    repo.create_product(&NewProduct::new(1, "Coffee")).unwrap();
    repo.create_product(&NewProduct::new(2, "Green tea")).unwrap();

    let (total, _) = repo.list_products(ProductListQuery::new(1)).unwrap();
    assert_eq!(total, 3);

    let (total, items) = repo
        .list_products(ProductListQuery::new(1).category(teas.id))
        .unwrap();
    assert_eq!(total, 2);
    assert_eq!(items[0].name, "Black tea");

    let (total, items) = repo
        .list_products(ProductListQuery::new(1).search("TEA-GRN"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].id, green.id);

    let (total, items) = repo
        .list_products(ProductListQuery::new(1).paginate(2, 2))
        .unwrap();
    assert_eq!(total, 3);
    assert_eq!(items.len(), 1);

    let retagged = repo
        .set_product_tags(green.id, 1, &[bagged.id])
        .unwrap();
    assert_eq!(retagged.tag_ids, vec![bagged.id]);

    let (total, _) = repo
        .list_products(ProductListQuery::new(1).tag(loose.id))
        .unwrap();
    assert_eq!(total, 0);

    let err = repo
        .set_product_tags(green.id, 2, &[])
        .expect_err("expected hub-scoped update to fail");
    assert!(matches!(err, RepositoryError::NotFound));
}
