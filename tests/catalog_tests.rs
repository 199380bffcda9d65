//! Loading the catalog and card images from disk

use std::fs;

use cartas::{
    catalog::{CatalogError, load_catalog, resolve_asset},
    preview::{PreviewError, load_preview},
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const CARDS: &str = r#"[
    {"numero": 1, "nombre": "Ardo", "grupo": "Fuego", "image": "img/ardo.png",
     "stats": {"furia": 5000, "magia": 3, "armas": 1000, "fuerza": 2000}},
    {"numero": 2, "nombre": "Brisa", "grupo": "Viento", "image": "img/brisa.png",
     "stats": {"furia": 1000, "magia": 7, "armas": 500, "fuerza": 500}}
]"#;

fn site_with(cards: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("data")).unwrap();
    fs::write(dir.path().join("data/cards.json"), cards).unwrap();
    dir
}

#[tokio::test]
async fn test_load_valid_catalog() {
    let site = site_with(CARDS);
    let root = site.path().to_str().unwrap();

    let catalog = load_catalog(&resolve_asset(root, "data/cards.json"))
        .await
        .unwrap();

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.factions(), ["Fuego", "Viento"]);
    assert_eq!(catalog.cards()[1].stats.magia, 7);
}

#[tokio::test]
async fn test_missing_file_is_read_error() {
    let site = TempDir::new().unwrap();
    let err = load_catalog(&site.path().join("data/cards.json"))
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::Read { .. }));
    assert!(err.to_string().contains("cards.json"));
}

#[tokio::test]
async fn test_record_without_stat_rejects_whole_catalog() {
    let site = site_with(
        r#"[
        {"numero": 1, "nombre": "Ardo", "grupo": "Fuego", "image": "img/ardo.png",
         "stats": {"furia": 5000, "magia": 3, "armas": 1000, "fuerza": 2000}},
        {"numero": 2, "nombre": "Brisa", "grupo": "Viento", "image": "img/brisa.png",
         "stats": {"furia": 1000, "magia": 7, "armas": 500}}
    ]"#,
    );

    let err = load_catalog(&site.path().join("data/cards.json"))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Parse { .. }));
    assert!(err.to_string().contains("fuerza"));
}

#[tokio::test]
async fn test_malformed_json_is_parse_error() {
    let site = site_with("[{\"numero\": 1,");
    let err = load_catalog(&site.path().join("data/cards.json"))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Parse { .. }));
}

#[tokio::test]
async fn test_empty_catalog_loads() {
    let site = site_with("[]");
    let catalog = load_catalog(&site.path().join("data/cards.json"))
        .await
        .unwrap();
    assert!(catalog.is_empty());
    assert!(catalog.factions().is_empty());
}

#[tokio::test]
async fn test_load_preview_from_disk() {
    let site = TempDir::new().unwrap();
    let path = site.path().join("ardo.png");
    image::RgbImage::from_pixel(4, 2, image::Rgb([200, 10, 10]))
        .save(&path)
        .unwrap();

    let preview = load_preview(&path).await.unwrap();
    assert_eq!((preview.width, preview.height), (4, 2));
    assert_eq!(preview.pixel(0, 0), [200, 10, 10]);
}

#[tokio::test]
async fn test_corrupt_image_is_unavailable() {
    let site = TempDir::new().unwrap();
    let path = site.path().join("roto.png");
    fs::write(&path, b"not an image").unwrap();

    let err = load_preview(&path).await.unwrap_err();
    assert!(!matches!(err, PreviewError::Read { .. }));
}
