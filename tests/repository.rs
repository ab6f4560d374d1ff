use pushkind_storefront::domain::product::{DEFAULT_RATING, ProductData};
use pushkind_storefront::repository::{
    DieselRepository, ProductReader, ProductWriter, RepositoryError,
};

mod common;

fn widget() -> ProductData {
    ProductData::new(
        "Widget",
        "Turns things",
        9.99,
        "Tools",
        5,
        "https://img.example/widget.png",
        "Acme",
    )
}

#[test]
fn test_product_repository_crud() {
    let test_db = common::TestDb::new("test_product_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let widget = repo.create_product(&widget()).unwrap();
    let lamp = repo
        .create_product(
            &ProductData::new("Lamp", "Bright", 25.0, "Home", 0, "https://img/l.png", "Lux")
                .with_original_price(30.0)
                .with_rating(4.9, 12),
        )
        .unwrap();

    assert!(widget.id > 0);
    assert_eq!(widget.rating, DEFAULT_RATING);
    assert_eq!(widget.reviews, 0);
    assert_eq!(lamp.original_price, Some(30.0));
    assert_eq!(lamp.reviews, 12);

    let items = repo.list_products().unwrap();
    let ids: Vec<i32> = items.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![widget.id, lamp.id]);

    let mut changes = lamp.data();
    changes.title = "Desk Lamp".to_string();
    changes.original_price = None;
    let updated = repo.update_product(lamp.id, &changes).unwrap();
    assert_eq!(updated.id, lamp.id);
    assert_eq!(updated.title, "Desk Lamp");
    assert_eq!(updated.original_price, None);
    assert_eq!(updated.created_at, lamp.created_at);
    assert!(updated.updated_at >= lamp.updated_at);

    let fetched = repo.get_product_by_id(lamp.id).unwrap().unwrap();
    assert_eq!(fetched, updated);

    repo.delete_product(widget.id).unwrap();
    assert!(repo.get_product_by_id(widget.id).unwrap().is_none());

    let remaining = repo.list_products().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].title, "Desk Lamp");
}

#[test]
fn test_missing_product_is_not_found() {
    let test_db = common::TestDb::new("test_missing_product_is_not_found.db");
    let repo = DieselRepository::new(test_db.pool());

    assert!(repo.get_product_by_id(42).unwrap().is_none());

    let err = repo
        .update_product(42, &widget())
        .expect_err("expected update of a missing product to fail");
    assert!(matches!(err, RepositoryError::NotFound));

    let err = repo
        .delete_product(42)
        .expect_err("expected delete of a missing product to fail");
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn test_store_rejects_out_of_range_values() {
    let test_db = common::TestDb::new("test_store_rejects_out_of_range_values.db");
    let repo = DieselRepository::new(test_db.pool());

    let mut negative_stock = widget();
    negative_stock.stock = -1;
    let err = repo
        .create_product(&negative_stock)
        .expect_err("negative stock must be rejected");
    assert!(matches!(err, RepositoryError::Database(_)));

    assert!(repo.list_products().unwrap().is_empty());
}
