//! Debounced, cancellable recipe search client
//!
//! Keystrokes go into a [`QueryController`], which waits out a quiet period,
//! searches the recipe API, then resolves every match's source link with a
//! concurrent fan-out. A [`ResultPresenter`] turns the resulting state into
//! a render tree and handles clear, theme and highlight actions.
//!
//! ```no_run
//! use kodegen_tools_recipe_search::{ClientConfig, QueryController, RecipeClient, ResultPresenter};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ClientConfig::builder().api_key("your-key").build()?;
//!     let controller = QueryController::new(RecipeClient::new(&config)?, config);
//!     let presenter = ResultPresenter::new(controller.handle());
//!
//!     let mut updates = controller.subscribe();
//!     controller.set_query("pasta");
//!     while updates.changed().await.is_ok() {
//!         println!("{}", presenter.render());
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod presenter;

pub use api::{RecipeClient, RecipeInformation, RecipeSource, SearchResult};
pub use config::ClientConfig;
pub use controller::{
    ControllerHandle, ControllerStatsSnapshot, Notification, Phase, QueryController, SearchState,
    StateStore,
};
pub use error::{LookupError, LookupResult};
pub use presenter::{
    ClearButton, Command, ExternalOpener, RenderedItem, RenderedView, ResultPresenter,
    SystemOpener, Theme,
};
