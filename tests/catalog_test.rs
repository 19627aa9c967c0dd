///! Integration tests for the portfolio catalog: category normalization and
///! the one-item-per-category replacement protocol, exercised against an
///! in-memory SQLite database and a throwaway image directory.
///!
///! Run with: `cargo test --test catalog_test`
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use tempfile::TempDir;

use agency_admin_backend::db::portfolio as portfolio_db;
use agency_admin_backend::error::ApiError;
use agency_admin_backend::models::portfolio::{
    self, Category, CreatePortfolioItem, UpdatePortfolioItem,
};
use agency_admin_backend::storage::ImageStore;
use migration::{Migrator, MigratorTrait};

async fn setup() -> (DatabaseConnection, ImageStore, TempDir) {
    // A single connection keeps every statement on the same in-memory
    // database.
    let mut opts = sea_orm::ConnectOptions::new("sqlite::memory:".to_owned());
    opts.max_connections(1);
    let db = Database::connect(opts)
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");

    let dir = TempDir::new().expect("create temp image dir");
    let store = ImageStore::new(dir.path()).expect("open image store");
    (db, store, dir)
}

async fn stored_image(store: &ImageStore, suggested: &str) -> String {
    store
        .save(b"fake image bytes", suggested)
        .await
        .expect("save image")
}

fn create(title: &str, category: &str, image: &str) -> CreatePortfolioItem {
    CreatePortfolioItem {
        title: title.to_string(),
        description: format!("{title} description"),
        category: category.to_string(),
        image_filename: image.to_string(),
    }
}

fn update(title: &str, category: &str, image: Option<&str>) -> UpdatePortfolioItem {
    UpdatePortfolioItem {
        title: title.to_string(),
        description: format!("{title} description"),
        category: category.to_string(),
        image_filename: image.map(str::to_string),
    }
}

// ── Normalization ──

#[test]
fn normalization_is_idempotent_on_canonical_values() {
    for category in [
        Category::PrintingPress,
        Category::Seo,
        Category::PackagesSolutions,
    ] {
        assert_eq!(Category::normalize(category.as_str()), category);
    }
}

#[test]
fn normalization_maps_keyword_variants() {
    assert_eq!(Category::normalize("Print Shop"), Category::PrintingPress);
    assert_eq!(Category::normalize("PRESS kit"), Category::PrintingPress);
    assert_eq!(
        Category::normalize("Search Engine Optimization"),
        Category::Seo
    );
    assert_eq!(Category::normalize("seo audit"), Category::Seo);
    assert_eq!(
        Category::normalize("Premium Package"),
        Category::PackagesSolutions
    );
    assert_eq!(
        Category::normalize("business solutions"),
        Category::PackagesSolutions
    );
}

#[test]
fn unrecognized_category_falls_back_to_printing_press() {
    assert_eq!(Category::normalize("widgets"), Category::PrintingPress);
    assert_eq!(Category::normalize(""), Category::PrintingPress);
}

// ── Add ──

#[tokio::test]
async fn add_replaces_existing_item_in_same_category() {
    let (db, store, _dir) = setup().await;

    let image_a = stored_image(&store, "a.jpg").await;
    portfolio_db::add_portfolio_item(&db, &store, create("A", "Printing", &image_a))
        .await
        .expect("add A");

    let image_b = stored_image(&store, "b.jpg").await;
    portfolio_db::add_portfolio_item(&db, &store, create("B", "Print Shop", &image_b))
        .await
        .expect("add B");

    let items = portfolio_db::get_portfolio_items(&db).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "B");
    assert_eq!(items[0].category, "Printing Press");

    assert!(!store.exists(&image_a).await, "evicted image must be gone");
    assert!(store.exists(&image_b).await);
}

#[tokio::test]
async fn add_returns_item_with_assigned_id_and_timestamp() {
    let (db, store, _dir) = setup().await;

    let image = stored_image(&store, "seo.jpg").await;
    let item = portfolio_db::add_portfolio_item(&db, &store, create("SEO", "seo", &image))
        .await
        .expect("add");

    assert!(item.id >= 1);
    assert_eq!(item.category, "SEO");

    let fetched = portfolio_db::get_portfolio_item(&db, item.id)
        .await
        .unwrap()
        .expect("item exists");
    assert_eq!(fetched, item);
}

#[tokio::test]
async fn add_repairs_a_previously_violated_invariant() {
    let (db, store, _dir) = setup().await;

    // Two rows in the same category, one with drifted casing — the kind of
    // state only older tooling could have produced.
    for (title, category) in [("old one", "Printing Press"), ("old two", "printing press")] {
        portfolio::ActiveModel {
            title: Set(title.to_string()),
            description: Set("legacy".to_string()),
            category: Set(category.to_string()),
            image_filename: Set("missing.jpg".to_string()),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .expect("seed row");
    }

    let image = stored_image(&store, "new.jpg").await;
    portfolio_db::add_portfolio_item(&db, &store, create("new", "print", &image))
        .await
        .expect("add");

    let items = portfolio_db::get_portfolio_items(&db).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "new");
}

#[tokio::test]
async fn add_with_missing_fields_is_rejected_before_any_mutation() {
    let (db, store, _dir) = setup().await;

    let image = stored_image(&store, "keep.jpg").await;
    portfolio_db::add_portfolio_item(&db, &store, create("keep", "seo", &image))
        .await
        .expect("add");

    let err = portfolio_db::add_portfolio_item(&db, &store, create("   ", "seo", "whatever.jpg"))
        .await
        .expect_err("empty title must be rejected");
    assert!(matches!(err, ApiError::Validation(_)));

    // Nothing was purged or replaced.
    let items = portfolio_db::get_portfolio_items(&db).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "keep");
    assert!(store.exists(&image).await);
}

// ── Update ──

#[tokio::test]
async fn update_moves_item_across_categories_and_evicts_occupant() {
    let (db, store, _dir) = setup().await;

    let print_image = stored_image(&store, "print.jpg").await;
    let print_item =
        portfolio_db::add_portfolio_item(&db, &store, create("print", "Printing", &print_image))
            .await
            .expect("add print");

    let seo_image = stored_image(&store, "seo.jpg").await;
    portfolio_db::add_portfolio_item(&db, &store, create("seo", "SEO", &seo_image))
        .await
        .expect("add seo");

    let moved = portfolio_db::update_portfolio_item(
        &db,
        &store,
        print_item.id,
        update("moved", "search engine", None),
    )
    .await
    .expect("update");

    assert_eq!(moved.category, "SEO");
    assert_eq!(moved.id, print_item.id);

    let items = portfolio_db::get_portfolio_items(&db).await.unwrap();
    assert_eq!(items.len(), 1, "previous SEO occupant must be evicted");
    assert_eq!(items[0].title, "moved");

    assert!(!store.exists(&seo_image).await, "evicted image must be gone");
    assert!(
        store.exists(&print_image).await,
        "no new image supplied, so the moved item keeps its file"
    );
}

#[tokio::test]
async fn update_without_new_image_preserves_image() {
    let (db, store, _dir) = setup().await;

    let image = stored_image(&store, "keep.jpg").await;
    let item = portfolio_db::add_portfolio_item(&db, &store, create("before", "seo", &image))
        .await
        .expect("add");

    let updated =
        portfolio_db::update_portfolio_item(&db, &store, item.id, update("after", "seo", None))
            .await
            .expect("update");

    assert_eq!(updated.title, "after");
    assert_eq!(updated.image_filename, image);
    assert!(store.exists(&image).await);
}

#[tokio::test]
async fn update_with_new_image_deletes_the_old_file() {
    let (db, store, _dir) = setup().await;

    let old_image = stored_image(&store, "old.jpg").await;
    let item = portfolio_db::add_portfolio_item(&db, &store, create("item", "seo", &old_image))
        .await
        .expect("add");

    let new_image = stored_image(&store, "new.jpg").await;
    let updated = portfolio_db::update_portfolio_item(
        &db,
        &store,
        item.id,
        update("item", "seo", Some(&new_image)),
    )
    .await
    .expect("update");

    assert_eq!(updated.image_filename, new_image);
    assert!(!store.exists(&old_image).await);
    assert!(store.exists(&new_image).await);
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let (db, store, _dir) = setup().await;

    let err = portfolio_db::update_portfolio_item(&db, &store, 999, update("x", "seo", None))
        .await
        .expect_err("unknown id must fail");
    assert!(matches!(err, ApiError::NotFound(_)));
}

// ── Delete ──

#[tokio::test]
async fn delete_removes_record_and_image() {
    let (db, store, _dir) = setup().await;

    let image = stored_image(&store, "gone.jpg").await;
    let item = portfolio_db::add_portfolio_item(&db, &store, create("gone", "package", &image))
        .await
        .expect("add");

    let deleted = portfolio_db::delete_portfolio_item(&db, &store, item.id)
        .await
        .expect("delete");
    assert!(deleted);

    assert!(portfolio_db::get_portfolio_items(&db).await.unwrap().is_empty());
    assert!(!store.exists(&image).await);
}

#[tokio::test]
async fn delete_unknown_id_returns_false() {
    let (db, store, _dir) = setup().await;

    let deleted = portfolio_db::delete_portfolio_item(&db, &store, 42)
        .await
        .expect("delete must not error");
    assert!(!deleted);
}

#[tokio::test]
async fn delete_tolerates_already_missing_image() {
    let (db, store, _dir) = setup().await;

    let image = stored_image(&store, "fragile.jpg").await;
    let item = portfolio_db::add_portfolio_item(&db, &store, create("fragile", "seo", &image))
        .await
        .expect("add");

    // Someone removed the file behind our back.
    assert!(store.delete(&image).await.expect("manual delete"));

    let deleted = portfolio_db::delete_portfolio_item(&db, &store, item.id)
        .await
        .expect("delete must absorb the missing file");
    assert!(deleted);
    assert!(portfolio_db::get_portfolio_items(&db).await.unwrap().is_empty());
}

// ── Invariant across sequences ──

#[tokio::test]
async fn at_most_one_item_per_category_after_mixed_operations() {
    let (db, store, _dir) = setup().await;

    let inputs = [
        ("one", "print"),
        ("two", "Press release"),
        ("three", "SEO"),
        ("four", "search"),
        ("five", "packages"),
        ("six", "Solutions"),
        ("seven", "widgets"), // falls back to Printing Press
    ];
    for (title, category) in inputs {
        let image = stored_image(&store, &format!("{title}.jpg")).await;
        portfolio_db::add_portfolio_item(&db, &store, create(title, category, &image))
            .await
            .expect("add");
    }

    let items = portfolio_db::get_portfolio_items(&db).await.unwrap();
    assert_eq!(items.len(), 3, "one item per category at most");

    let mut categories: Vec<&str> = items.iter().map(|i| i.category.as_str()).collect();
    categories.sort();
    assert_eq!(
        categories,
        vec!["Packages Solutions", "Printing Press", "SEO"]
    );

    // Latest write per category won.
    assert!(items.iter().any(|i| i.title == "seven"));
    assert!(items.iter().any(|i| i.title == "four"));
    assert!(items.iter().any(|i| i.title == "six"));
}

#[tokio::test]
async fn list_returns_items_in_creation_order() {
    let (db, store, _dir) = setup().await;

    for (title, category) in [("p", "print"), ("s", "seo"), ("k", "package")] {
        let image = stored_image(&store, &format!("{title}.jpg")).await;
        portfolio_db::add_portfolio_item(&db, &store, create(title, category, &image))
            .await
            .expect("add");
    }

    let items = portfolio_db::get_portfolio_items(&db).await.unwrap();
    let ids: Vec<i32> = items.iter().map(|i| i.id).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
}
