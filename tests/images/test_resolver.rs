// Image resolver contract: token-containment local lookup, graceful
// NotFound when both stages come up empty

use async_trait::async_trait;
use image::{ImageBuffer, ImageFormat, Rgb};
use std::io::Cursor;
use std::sync::Arc;

use ayur_assist::images::{ImageOrigin, ImageResolution, ImageResolver};
use ayur_assist::llm::{ChatClient, ChatError};

struct UnreachableChat;

#[async_trait]
impl ChatClient for UnreachableChat {
    async fn complete(&self, _prompt: &str) -> Result<String, ChatError> {
        Err(ChatError::Unavailable {
            message: "connection refused".to_string(),
        })
    }

    fn model_name(&self) -> &str {
        "unreachable"
    }
}

fn jpeg_bytes() -> Vec<u8> {
    let img = ImageBuffer::from_pixel(3, 3, Rgb([40u8, 130, 70]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)
        .unwrap();
    bytes
}

#[tokio::test]
async fn test_token_containment_match_returns_file_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let bytes = jpeg_bytes();
    std::fs::write(dir.path().join("tulsi_plant_leaf.jpg"), &bytes).unwrap();
    // decoys that match only one token
    std::fs::write(dir.path().join("plant_generic.jpg"), jpeg_bytes()).unwrap();

    let resolver = ImageResolver::new(dir.path(), Arc::new(UnreachableChat)).unwrap();
    let resolution = resolver.resolve("Tulsi Plant").await;

    match resolution {
        ImageResolution::Found(image) => {
            assert_eq!(image.bytes, bytes);
            assert_eq!(image.origin, ImageOrigin::LocalDirectory);
        }
        ImageResolution::NotFound => panic!("expected tulsi_plant_leaf.jpg to match"),
    }
}

#[tokio::test]
async fn test_match_is_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("TULSI_Plant.jpg"), jpeg_bytes()).unwrap();

    let resolver = ImageResolver::new(dir.path(), Arc::new(UnreachableChat)).unwrap();
    assert!(matches!(
        resolver.resolve("tulsi plant").await,
        ImageResolution::Found(_)
    ));
}

#[tokio::test]
async fn test_unreachable_remote_returns_not_found_never_panics() {
    let dir = tempfile::tempdir().unwrap();
    let resolver = ImageResolver::new(dir.path(), Arc::new(UnreachableChat)).unwrap();

    let resolution = resolver.resolve("Brahmi").await;
    assert!(matches!(resolution, ImageResolution::NotFound));
}

#[tokio::test]
async fn test_missing_directory_returns_not_found() {
    let resolver = ImageResolver::new("/no/such/herb/folder", Arc::new(UnreachableChat)).unwrap();

    let resolution = resolver.resolve("Tulsi").await;
    assert!(matches!(resolution, ImageResolution::NotFound));
}

#[tokio::test]
async fn test_repeated_calls_redo_lookup() {
    // no caching: a file added between calls is picked up
    let dir = tempfile::tempdir().unwrap();
    let resolver = ImageResolver::new(dir.path(), Arc::new(UnreachableChat)).unwrap();

    assert!(matches!(
        resolver.resolve("amla").await,
        ImageResolution::NotFound
    ));

    std::fs::write(dir.path().join("amla_fruit.jpg"), jpeg_bytes()).unwrap();
    assert!(matches!(
        resolver.resolve("amla").await,
        ImageResolution::Found(_)
    ));
}
