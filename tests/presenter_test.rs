//! ResultPresenter actions over an in-memory recipe source

use kodegen_tools_recipe_search::{
    ClearButton, ClientConfig, ExternalOpener, LookupError, LookupResult, QueryController,
    RecipeInformation, RecipeSource, ResultPresenter, SearchResult, Theme,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io;
use std::sync::Arc;

/// Answers every search with the same matches and resolves links from a map
struct FixedSource {
    matches: Vec<SearchResult>,
    links: HashMap<u64, &'static str>,
}

impl FixedSource {
    fn pasta() -> Self {
        Self {
            matches: vec![
                SearchResult::new(1, "Pasta A"),
                SearchResult::new(2, "Pasta B"),
                SearchResult::new(3, "Pasta C"),
            ],
            links: HashMap::from([(1, "http://a"), (2, "not a url")]),
        }
    }
}

impl RecipeSource for FixedSource {
    async fn search(&self, query: &str, limit: usize) -> LookupResult<Vec<SearchResult>> {
        if query.trim().is_empty() {
            return Err(LookupError::EmptyQuery);
        }
        Ok(self.matches.iter().take(limit).cloned().collect())
    }

    async fn information(&self, id: u64) -> LookupResult<RecipeInformation> {
        Ok(match self.links.get(&id) {
            Some(link) => RecipeInformation::with_source_url(*link),
            None => RecipeInformation::default(),
        })
    }
}

#[derive(Clone, Default)]
struct RecordingOpener {
    opened: Arc<Mutex<Vec<String>>>,
}

impl ExternalOpener for RecordingOpener {
    fn open(&self, link: &str) -> io::Result<()> {
        self.opened.lock().push(link.to_string());
        Ok(())
    }
}

async fn settled_presenter() -> (QueryController<FixedSource>, ResultPresenter, RecordingOpener) {
    let config = ClientConfig::builder().api_key("k").build().unwrap();
    let controller = QueryController::new(FixedSource::pasta(), config);
    let opener = RecordingOpener::default();
    let presenter = ResultPresenter::new(controller.handle()).with_opener(opener.clone());

    controller.set_query("pasta");
    controller.settle_now().await;
    (controller, presenter, opener)
}

#[tokio::test]
async fn toggling_theme_twice_restores_it_and_leaves_results() {
    let (_controller, mut presenter, _) = settled_presenter().await;
    let before = presenter.render();
    assert_eq!(presenter.theme(), Theme::Accent);
    assert_eq!(presenter.root_attribute(), ("data-theme", "accent"));

    assert_eq!(presenter.toggle_theme(), Theme::Light);
    assert_eq!(presenter.root_attribute(), ("data-theme", "light"));
    assert_eq!(presenter.render().items, before.items);

    assert_eq!(presenter.toggle_theme(), Theme::Accent);
    assert_eq!(presenter.render(), before);
}

#[tokio::test]
async fn links_are_index_aligned_with_titles() {
    let (_controller, presenter, _) = settled_presenter().await;
    let view = presenter.render();

    let rows: Vec<_> = view
        .items
        .iter()
        .map(|item| (item.index, item.title.as_str(), item.link.as_deref()))
        .collect();
    assert_eq!(
        rows,
        vec![
            (0, "Pasta A", Some("http://a")),
            (1, "Pasta B", Some("not a url")),
            (2, "Pasta C", None),
        ]
    );
}

#[tokio::test]
async fn highlight_moves_within_bounds() {
    let (_controller, presenter, _) = settled_presenter().await;

    assert_eq!(presenter.highlight_next(), Some(0));
    assert_eq!(presenter.highlight_next(), Some(1));
    assert_eq!(presenter.highlight_next(), Some(2));
    assert_eq!(presenter.highlight_next(), Some(2));
    assert_eq!(presenter.render().highlight_index(), 2);

    assert_eq!(presenter.highlight_previous(), Some(1));
    assert_eq!(presenter.highlight_previous(), Some(0));
    assert_eq!(presenter.highlight_previous(), None);
    assert_eq!(presenter.render().highlight_index(), -1);

    assert_eq!(presenter.highlight_previous(), Some(2));
    assert_eq!(presenter.highlight(Some(10)), None);
}

#[tokio::test]
async fn only_the_highlighted_row_is_marked() {
    let (_controller, presenter, _) = settled_presenter().await;
    presenter.highlight(Some(1));

    let marked: Vec<bool> = presenter
        .render()
        .items
        .iter()
        .map(|item| item.highlighted)
        .collect();
    assert_eq!(marked, vec![false, true, false]);
}

#[tokio::test]
async fn activate_opens_resolved_link() {
    let (_controller, presenter, opener) = settled_presenter().await;

    let opened = presenter.activate(0).unwrap();
    assert_eq!(opened.as_deref(), Some("http://a"));
    assert_eq!(opener.opened.lock().as_slice(), ["http://a".to_string()]);
    assert_eq!(presenter.render().items[0].link.as_deref(), Some("http://a"));
}

#[tokio::test]
async fn activate_skips_missing_and_rejects_invalid_links() {
    let (_controller, presenter, opener) = settled_presenter().await;

    assert_eq!(presenter.activate(2).unwrap(), None);
    assert_eq!(presenter.activate(99).unwrap(), None);
    assert!(matches!(
        presenter.activate(1),
        Err(LookupError::InvalidUrl(_))
    ));
    assert!(opener.opened.lock().is_empty());
}

#[tokio::test]
async fn activate_highlighted_follows_highlight() {
    let (_controller, presenter, opener) = settled_presenter().await;

    assert_eq!(presenter.activate_highlighted().unwrap(), None);
    presenter.highlight(Some(0));
    assert_eq!(
        presenter.activate_highlighted().unwrap().as_deref(),
        Some("http://a")
    );
    assert_eq!(opener.opened.lock().as_slice(), ["http://a".to_string()]);
}

#[tokio::test]
async fn clear_resets_everything_but_theme() {
    let (controller, mut presenter, _) = settled_presenter().await;
    presenter.toggle_theme();
    presenter.highlight(Some(1));
    assert_eq!(presenter.render().clear_button, ClearButton::Busy);

    presenter.clear();

    let view = presenter.render();
    assert_eq!(view.query, "");
    assert!(view.is_empty());
    assert_eq!(view.highlight_index(), -1);
    assert_eq!(view.clear_button, ClearButton::Label);
    assert_eq!(view.theme, Theme::Light);
    assert!(controller.snapshot().links().is_empty());
}
