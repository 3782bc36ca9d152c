//! Navigation between the overview, the post-create results view and the
//! edit view.

use crate::overview::OverviewController;
use crate::overview::SubmitError;
use crate::overview::SubmitOutcome;
use crate::probe::UrlProbe;
use bookmarky_store::Bookmark;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Overview,
    Results,
    Edit(String),
}

impl Route {
    /// Map a path to a route. Unknown paths land on the overview.
    pub fn parse(path: &str) -> Route {
        let path = path.trim_matches('/');
        match path {
            "" | "overview" => Route::Overview,
            "results" => Route::Results,
            _ => match path.strip_prefix("edit/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Route::Edit(id.to_string()),
                _ => Route::Overview,
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Overview => "/overview".to_string(),
            Route::Results => "/results".to_string(),
            Route::Edit(id) => format!("/edit/{id}"),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Overview => "Bookmark Overview",
            Route::Results => "Bookmark Submission Result",
            Route::Edit(_) => "Edit Bookmark",
        }
    }
}

/// What is on screen after navigation settled, redirects included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Overview,
    Edit { id: String },
    /// Shown once after a bookmark was created.
    Results(Bookmark),
}

impl Screen {
    pub fn route(&self) -> Route {
        match self {
            Screen::Overview => Route::Overview,
            Screen::Edit { id } => Route::Edit(id.clone()),
            Screen::Results(_) => Route::Results,
        }
    }
}

pub struct BookmarkApp<P> {
    overview: OverviewController<P>,
    screen: Screen,
}

impl<P: UrlProbe> BookmarkApp<P> {
    pub fn new(overview: OverviewController<P>) -> Self {
        Self {
            overview,
            screen: Screen::Overview,
        }
    }

    /// Go to `route`. `payload` is the transient state handed to the results
    /// view; without it the results view redirects to the overview.
    pub fn navigate(&mut self, route: Route, payload: Option<Bookmark>) -> &Screen {
        self.screen = match route {
            Route::Overview => {
                self.overview.cancel_edit();
                Screen::Overview
            }
            Route::Results => match payload {
                Some(bookmark) => Screen::Results(bookmark),
                None => {
                    tracing::debug!("results without a submitted bookmark; redirecting");
                    Screen::Overview
                }
            },
            Route::Edit(id) => {
                if self.overview.begin_edit(&id) {
                    Screen::Edit { id }
                } else {
                    Screen::Overview
                }
            }
        };
        &self.screen
    }

    pub fn navigate_path(&mut self, path: &str) -> &Screen {
        self.navigate(Route::parse(path), None)
    }

    /// Submit the overview form and follow the outcome: a create shows the
    /// results view, anything else returns to the overview. Rejections leave
    /// the screen as it was.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, SubmitError> {
        let outcome = self.overview.submit().await?;
        self.screen = match &outcome {
            SubmitOutcome::Created(bookmark) => Screen::Results(bookmark.clone()),
            SubmitOutcome::Updated(_) | SubmitOutcome::EditTargetGone { .. } => Screen::Overview,
        };
        Ok(outcome)
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn overview(&self) -> &OverviewController<P> {
        &self.overview
    }

    pub fn overview_mut(&mut self) -> &mut OverviewController<P> {
        &mut self.overview
    }
}
