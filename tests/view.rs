use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use blockkit::attributes::{AttributeBag, BlockKind};
use blockkit::config::Config;
use blockkit::error::{BlockError, RepositoryError};
use blockkit::repository::{ContentRepository, Resource, ResourceType};
use blockkit::view::BlockViewModel;

/// Repository returning a fixed batch, recording the last request.
struct FixedRepository {
    items: Vec<Resource>,
    calls: AtomicUsize,
}

impl FixedRepository {
    fn new(ids: &[u64]) -> Self {
        Self {
            items: ids.iter().map(|id| Resource::new(*id)).collect(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ContentRepository for FixedRepository {
    async fn list(
        &self,
        _resource_type: ResourceType,
        _params: &[(String, String)],
    ) -> Result<Vec<Resource>, RepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.items.clone())
    }
}

fn post_grid_bag() -> AttributeBag {
    json!({ "postsPerPage": 3 }).as_object().unwrap().clone()
}

async fn tick(ms: u64) {
    // Let freshly spawned timer tasks register their sleep first
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
    tokio::time::advance(Duration::from_millis(ms)).await;
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn test_view_model_fetches_and_syncs_carousel() {
    let repo = Arc::new(FixedRepository::new(&[1, 2, 3, 4, 5]));
    let config = Config::default();

    let (view, _channels) = BlockViewModel::new(BlockKind::PostGrid, &post_grid_bag(), repo, &config).unwrap();

    view.fetch_from_attributes(&post_grid_bag(), &config).await.unwrap();

    assert_eq!(view.items().await.len(), 5);
    assert!(!view.loading().await);
    assert!(view.error().await.is_none());
    assert_eq!(view.carousel().item_count, 5);
}

#[tokio::test]
async fn test_view_model_rejects_bag_missing_required_attributes() {
    let repo = Arc::new(FixedRepository::new(&[]));
    let config = Config::default();
    let empty = AttributeBag::new();

    let result = BlockViewModel::new(BlockKind::ProductCarousel, &empty, repo, &config);
    assert!(matches!(result, Err(BlockError::Configuration(_))));
}

#[tokio::test]
async fn test_non_fetching_kind_cannot_fetch() {
    let repo = Arc::new(FixedRepository::new(&[1]));
    let config = Config::default();
    let bag = json!({ "faqItems": [] }).as_object().unwrap().clone();

    let (view, _channels) = BlockViewModel::new(BlockKind::Faq, &bag, repo.clone() as Arc<dyn ContentRepository>, &config).unwrap();

    let result = view.fetch_from_attributes(&bag, &config).await;
    assert!(matches!(result, Err(BlockError::Configuration(_))));
    assert_eq!(repo.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_view_model_carousel_navigation() {
    let repo = Arc::new(FixedRepository::new(&[1, 2, 3, 4, 5, 6]));
    let config = Config::default();

    let (view, _channels) = BlockViewModel::new(BlockKind::PostCarousel, &post_grid_bag(), repo, &config).unwrap();
    view.fetch_from_attributes(&post_grid_bag(), &config).await.unwrap();

    view.on_items_per_view_changed(3);
    assert_eq!(view.carousel().total_slides, 2);

    view.go_next();
    assert_eq!(view.carousel().current_slide, 1);
    view.go_next();
    assert_eq!(view.carousel().current_slide, 0);
}

#[tokio::test]
async fn test_post_slider_lists_posts() {
    let repo = Arc::new(FixedRepository::new(&[1, 2, 3]));
    let config = Config::default();

    let (view, _channels) =
        BlockViewModel::new(BlockKind::PostSlider, &post_grid_bag(), repo.clone() as Arc<dyn ContentRepository>, &config)
            .unwrap();
    view.fetch_from_attributes(&post_grid_bag(), &config).await.unwrap();

    assert_eq!(view.items().await.len(), 3);
    assert_eq!(repo.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_autoplay_engages_once_items_arrive() {
    let repo = Arc::new(FixedRepository::new(&[1, 2, 3, 4, 5, 6]));
    let mut config = Config::default();
    config.carousel.autoplay = true;

    let (view, _channels) = BlockViewModel::new(BlockKind::PostCarousel, &post_grid_bag(), repo, &config).unwrap();
    // Nothing fetched yet: a single empty slide, so no auto-play
    assert!(!view.carousel().auto_playing);

    view.fetch_from_attributes(&post_grid_bag(), &config).await.unwrap();
    view.on_items_per_view_changed(2);
    assert_eq!(view.carousel().total_slides, 3);
    assert!(view.carousel().auto_playing);

    tick(5001).await;
    assert_eq!(view.carousel().current_slide, 1);
}

#[tokio::test]
async fn test_view_model_feeds_the_event_log() {
    let repo = Arc::new(FixedRepository::new(&[1, 2]));
    let config = Config::default();

    let (view, _channels) = BlockViewModel::new(BlockKind::PostGrid, &post_grid_bag(), repo, &config).unwrap();
    view.fetch_from_attributes(&post_grid_bag(), &config).await.unwrap();

    let entries = view.event_log().entries();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].contains("fetch completed: 2 item(s)"));
}

#[tokio::test]
async fn test_view_model_toggles() {
    let repo = Arc::new(FixedRepository::new(&[]));
    let config = Config::default();
    let bag = json!({ "faqItems": [] }).as_object().unwrap().clone();

    let (mut view, _channels) = BlockViewModel::new(BlockKind::Faq, &bag, repo, &config).unwrap();

    assert!(!view.is_expanded("faq-1"));
    view.toggle("faq-1");
    assert!(view.is_expanded("faq-1"));
    view.toggle("faq-1");
    assert!(!view.is_expanded("faq-1"));

    view.expand_all(["a", "b"]);
    assert_eq!(view.toggles().len(), 2);
    view.collapse_all();
    assert!(view.toggles().is_empty());
}

#[tokio::test]
async fn test_view_model_emits_attribute_patches() {
    let repo = Arc::new(FixedRepository::new(&[]));
    let config = Config::default();

    let (view, mut channels) = BlockViewModel::new(BlockKind::PostGrid, &post_grid_bag(), repo, &config).unwrap();

    view.update_attribute("postsPerPage", json!(12));

    let patch = channels.patches.try_recv().unwrap();
    assert_eq!(patch.values.get("postsPerPage"), Some(&json!(12)));
}

#[tokio::test]
async fn test_view_model_dispose_stops_fetch_application() {
    let repo = Arc::new(FixedRepository::new(&[1, 2]));
    let config = Config::default();

    let (mut view, _channels) = BlockViewModel::new(BlockKind::PostGrid, &post_grid_bag(), repo, &config).unwrap();
    view.fetch_from_attributes(&post_grid_bag(), &config).await.unwrap();
    assert_eq!(view.items().await.len(), 2);

    view.dispose();
    assert!(!view.carousel().auto_playing);
}
