use pushkind_storefront::domain::admin::FormTarget;
use pushkind_storefront::domain::cart::Cart;
use pushkind_storefront::domain::product::ProductData;
use pushkind_storefront::forms::products::{DraftField, ProductDraft};
use pushkind_storefront::repository::{DieselRepository, ProductReader, ProductWriter};
use pushkind_storefront::services::admin::{
    self, AdminQuery, SaveOutcome, build_admin_page, load_admin_panel,
};
use pushkind_storefront::services::cart::{add_to_cart, load_cart_page};
use pushkind_storefront::services::{Notification, ServiceError};

mod common;

fn draft(title: &str, stock: &str) -> ProductDraft {
    ProductDraft {
        title: title.to_string(),
        description: format!("{title} description"),
        price: "12.50".to_string(),
        category: "Tools".to_string(),
        stock: stock.to_string(),
        image: "https://img.example/p.png".to_string(),
        brand: "Acme".to_string(),
        ..ProductDraft::default()
    }
}

#[test]
fn create_edit_and_delete_through_admin_panel() {
    let test_db = common::TestDb::new("service_admin_round_trip.db");
    let repo = DieselRepository::new(test_db.pool());

    let (mut panel, notification) = load_admin_panel(&repo, AdminQuery::default());
    assert!(notification.is_none());
    assert!(panel.products().is_empty());

    let mut form = admin::open_create_form(&mut panel).with_draft(draft("Widget", "5"));
    let outcome = admin::save_product(&repo, &mut panel, &mut form);
    assert_eq!(
        outcome,
        SaveOutcome::Saved(Notification::success("Product created successfully"))
    );
    assert!(panel.form().is_none());
    let created = panel.products()[0].clone();
    assert_eq!(created.price, 12.5);
    assert_eq!(repo.list_products().unwrap().len(), 1);

    let mut form = admin::open_edit_form(&repo, &mut panel, created.id).expect("edit form");
    assert_eq!(panel.form(), Some(&FormTarget::Edit(created.clone())));
    form.change(DraftField::Stock, "0");
    let outcome = admin::save_product(&repo, &mut panel, &mut form);
    assert_eq!(
        outcome,
        SaveOutcome::Saved(Notification::success("Product updated successfully"))
    );
    assert_eq!(panel.products().len(), 1);
    assert!(panel.products()[0].is_out_of_stock());
    assert_eq!(panel.stats().out_of_stock, 1);

    let stored = repo.get_product_by_id(created.id).unwrap().unwrap();
    assert_eq!(stored.stock, 0);

    let notification = admin::delete_product(&repo, &mut panel, created.id, true);
    assert_eq!(
        notification,
        Some(Notification::success("Product deleted successfully"))
    );
    assert!(panel.products().is_empty());
    assert!(repo.list_products().unwrap().is_empty());
}

#[test]
fn invalid_submission_does_not_touch_store() {
    let test_db = common::TestDb::new("service_admin_invalid.db");
    let repo = DieselRepository::new(test_db.pool());

    let (mut panel, _) = load_admin_panel(&repo, AdminQuery::default());
    let mut form = admin::open_create_form(&mut panel).with_draft(draft("Widget", "2.5"));

    let outcome = admin::save_product(&repo, &mut panel, &mut form);

    assert_eq!(outcome, SaveOutcome::Invalid);
    assert!(form.errors().contains(DraftField::Stock));
    assert!(repo.list_products().unwrap().is_empty());

    let page = build_admin_page(&panel, Some(&form));
    assert!(page.form.is_some());
}

#[test]
fn deleting_a_vanished_product_keeps_cache() {
    let test_db = common::TestDb::new("service_admin_vanished.db");
    let repo = DieselRepository::new(test_db.pool());
    let product = repo
        .create_product(&ProductData::new(
            "Lamp", "Bright", 20.0, "Home", 3, "https://img/l.png", "Lux",
        ))
        .unwrap();

    let (mut panel, _) = load_admin_panel(&repo, AdminQuery::default());
    repo.delete_product(product.id).unwrap();

    let notification = admin::delete_product(&repo, &mut panel, product.id, true);

    assert_eq!(
        notification,
        Some(Notification::error("Failed to delete product"))
    );
    assert_eq!(panel.products().len(), 1);
}

#[test]
fn cart_respects_stock_in_store() {
    let test_db = common::TestDb::new("service_cart_stock.db");
    let repo = DieselRepository::new(test_db.pool());
    let product = repo
        .create_product(&ProductData::new(
            "Lamp", "Bright", 20.0, "Home", 1, "https://img/l.png", "Lux",
        ))
        .unwrap();

    let mut cart = Cart::new();
    add_to_cart(&repo, &mut cart, product.id).expect("in stock");
    add_to_cart(&repo, &mut cart, product.id).expect("in stock");
    assert_eq!(cart.quantity(product.id), 1);

    assert_eq!(
        add_to_cart(&repo, &mut cart, product.id + 100).err(),
        Some(ServiceError::NotFound)
    );

    repo.delete_product(product.id).unwrap();
    let page = load_cart_page(&repo, &mut cart).expect("cart page");
    assert!(page.lines.is_empty());
    assert!(cart.is_empty());
}
