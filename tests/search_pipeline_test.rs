//! End-to-end pipeline: controller and presenter over a mock recipe API

use kodegen_tools_recipe_search::{
    ClearButton, Phase, QueryController, RecipeClient, ResultPresenter, SearchState,
};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::timeout;

mod common;

use common::{
    information_body, mock_any_information, mock_information, mock_search, search_body,
    setup_mock_server, test_config,
};

async fn wait_for_phase(updates: &mut watch::Receiver<SearchState>, phase: Phase) -> SearchState {
    match timeout(Duration::from_secs(5), updates.wait_for(|s| s.phase() == phase)).await {
        Ok(Ok(state)) => state.clone(),
        Ok(Err(e)) => panic!("state channel closed: {e}"),
        Err(_) => panic!("timeout waiting for {phase:?}"),
    }
}

#[tokio::test]
async fn pasta_renders_titles_with_source_links() {
    let mut server = setup_mock_server().await;
    let search = mock_search(
        &mut server,
        "pasta",
        200,
        &search_body(&[(1, "Pasta A"), (2, "Pasta B")]),
    )
    .await;
    let detail_a = mock_information(&mut server, 1, 200, &information_body(1, "http://a")).await;
    let detail_b = mock_information(&mut server, 2, 200, &information_body(2, "http://b")).await;

    let config = test_config(&server);
    let controller = QueryController::new(RecipeClient::new(&config).unwrap(), config);
    let presenter = ResultPresenter::new(controller.handle());
    let mut updates = controller.subscribe();

    controller.set_query("pasta");
    wait_for_phase(&mut updates, Phase::Settled).await;

    let view = presenter.render();
    let rows: Vec<(&str, Option<&str>)> = view
        .items
        .iter()
        .map(|item| (item.title.as_str(), item.link.as_deref()))
        .collect();
    assert_eq!(
        rows,
        vec![("Pasta A", Some("http://a")), ("Pasta B", Some("http://b"))]
    );
    assert_eq!(view.highlight_index(), -1);
    assert_eq!(view.clear_button, ClearButton::Busy);

    search.assert_async().await;
    detail_a.assert_async().await;
    detail_b.assert_async().await;
}

#[tokio::test]
async fn quota_rejection_notifies_without_detail_calls() {
    let mut server = setup_mock_server().await;
    let search = mock_search(&mut server, "pasta", 402, "{}").await;
    let details = mock_any_information(&mut server, 0).await;

    let config = test_config(&server);
    let controller = QueryController::new(RecipeClient::new(&config).unwrap(), config);
    let presenter = ResultPresenter::new(controller.handle());
    let mut updates = controller.subscribe();

    controller.set_query("pasta");
    let state = wait_for_phase(&mut updates, Phase::QuotaRejected).await;

    assert!(state.results().is_empty());
    let view = presenter.render();
    assert!(view.is_empty());
    assert_eq!(
        view.notification.as_deref(),
        Some("Request quota exceeded (HTTP 402)")
    );

    search.assert_async().await;
    details.assert_async().await;
}

#[tokio::test]
async fn rapid_keystrokes_issue_a_single_search() {
    let mut server = setup_mock_server().await;
    let search = mock_search(&mut server, "pasta", 200, &search_body(&[(1, "Pasta A")])).await;
    mock_information(&mut server, 1, 200, &information_body(1, "http://a")).await;

    let config = test_config(&server);
    let controller = QueryController::new(RecipeClient::new(&config).unwrap(), config);
    let mut updates = controller.subscribe();

    for prefix in ["p", "pa", "pas", "past", "pasta"] {
        controller.set_query(prefix);
    }
    wait_for_phase(&mut updates, Phase::Settled).await;

    assert_eq!(controller.snapshot().query(), "pasta");
    assert_eq!(controller.stats().searches_issued, 1);
    search.assert_async().await;
}

#[tokio::test]
async fn clear_after_results_resets_view() {
    let mut server = setup_mock_server().await;
    mock_search(&mut server, "pasta", 200, &search_body(&[(1, "Pasta A")])).await;
    mock_information(&mut server, 1, 200, &information_body(1, "http://a")).await;

    let config = test_config(&server);
    let controller = QueryController::new(RecipeClient::new(&config).unwrap(), config);
    let presenter = ResultPresenter::new(controller.handle());
    let mut updates = controller.subscribe();

    controller.set_query("pasta");
    wait_for_phase(&mut updates, Phase::Settled).await;
    assert_eq!(presenter.highlight_next(), Some(0));

    presenter.clear();
    let view = presenter.render();
    assert!(view.is_empty());
    assert_eq!(view.query, "");
    assert_eq!(view.highlight_index(), -1);
    assert_eq!(view.clear_button, ClearButton::Label);
}
