///! Integration tests for the filesystem image store and placeholder
///! synthesis.
///!
///! Run with: `cargo test --test storage_test`
use tempfile::TempDir;

use agency_admin_backend::error::ApiError;
use agency_admin_backend::storage::{self, ImageStore, MAX_IMAGE_BYTES};

fn new_store() -> (ImageStore, TempDir) {
    let dir = TempDir::new().expect("create temp dir");
    let store = ImageStore::new(dir.path()).expect("open image store");
    (store, dir)
}

#[tokio::test]
async fn save_generates_collision_free_names() {
    let (store, _dir) = new_store();

    let first = store.save(b"one", "photo.jpg").await.expect("save first");
    let second = store.save(b"two", "photo.jpg").await.expect("save second");

    assert_ne!(first, second);
    assert!(first.ends_with("photo.jpg"));
    assert!(store.exists(&first).await);
    assert!(store.exists(&second).await);
}

#[tokio::test]
async fn save_sanitizes_the_suggested_name() {
    let (store, _dir) = new_store();

    let stored = store
        .save(b"data", "../../etc/some photo (final).png")
        .await
        .expect("save");

    assert!(!stored.contains('/'));
    assert!(!stored.contains(".."));
    assert!(stored.ends_with("some_photo__final_.png"));
    assert!(store.exists(&stored).await);
}

#[tokio::test]
async fn save_rejects_disallowed_extensions() {
    let (store, _dir) = new_store();

    for name in ["malware.exe", "notes.txt", "archive.tar.gz", "noextension"] {
        let err = store
            .save(b"data", name)
            .await
            .expect_err("disallowed extension must be rejected");
        assert!(matches!(err, ApiError::InvalidMediaType(_)), "{name}");
    }

    // Extension check is case-insensitive.
    assert!(store.save(b"data", "photo.JPG").await.is_ok());
}

#[tokio::test]
async fn save_rejects_oversized_payloads() {
    let (store, _dir) = new_store();

    let oversized = vec![0u8; MAX_IMAGE_BYTES + 1];
    let err = store
        .save(&oversized, "big.jpg")
        .await
        .expect_err("oversized payload must be rejected");
    assert!(matches!(err, ApiError::PayloadTooLarge(_)));
}

#[tokio::test]
async fn delete_reports_whether_the_file_existed() {
    let (store, _dir) = new_store();

    let stored = store.save(b"data", "gone.gif").await.expect("save");

    assert!(store.delete(&stored).await.expect("first delete"));
    assert!(!store.delete(&stored).await.expect("second delete"));
    assert!(!store.delete("never-existed.jpg").await.expect("unknown"));
}

#[tokio::test]
async fn read_round_trips_and_reports_missing_files() {
    let (store, _dir) = new_store();

    let stored = store.save(b"image payload", "pic.jpeg").await.expect("save");

    let bytes = store.read(&stored).await.expect("read").expect("present");
    assert_eq!(bytes, b"image payload");

    assert!(store.read("missing.jpg").await.expect("read").is_none());
}

#[tokio::test]
async fn resolve_rejects_path_traversal() {
    let (store, _dir) = new_store();

    assert!(store.resolve("../escape.jpg").is_none());
    assert!(store.resolve("nested/escape.jpg").is_none());
    assert!(store.resolve("back\\slash.jpg").is_none());
    assert!(store.resolve("").is_none());
    assert!(store.resolve("plain.jpg").is_some());
}

#[test]
fn placeholder_is_a_decodable_jpeg_with_expected_size() {
    let bytes = storage::placeholder_jpeg("printing_press_brochure.jpg").expect("synthesize");

    assert_eq!(&bytes[..2], &[0xFF, 0xD8][..], "JPEG magic bytes");

    let img = image::load_from_memory(&bytes).expect("decode placeholder");
    assert_eq!(img.width(), 400);
    assert_eq!(img.height(), 250);
}

#[test]
fn placeholder_color_follows_filename_keywords() {
    let center = |name: &str| {
        let bytes = storage::placeholder_jpeg(name).expect("synthesize");
        let img = image::load_from_memory(&bytes).expect("decode").to_rgb8();
        *img.get_pixel(200, 125)
    };

    let print = center("printing_thing.jpg");
    assert!(print[0] > print[1] && print[0] > print[2], "print is red-ish");

    let seo = center("seo_service.jpg");
    assert!(seo[1] > seo[0] && seo[1] > seo[2], "seo is green-ish");

    let other = center("unrelated.jpg");
    assert!(other[2] > other[0] && other[2] > other[1], "fallback is blue-ish");
}
