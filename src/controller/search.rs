//! Search submission and outcome handling.

use crate::error::SearchError;
use crate::model::SearchCriteria;

use super::AppController;

impl AppController {
    /// Submit the current form as a fresh search. A new search always
    /// starts at page 1; validation failures surface as a prompt and
    /// never reach the gateway.
    pub async fn submit_search(&self) {
        let form = self.model.get_ui_state().await.form;
        let page_size = self.model.page_size().await;

        match form.build_criteria(1, page_size) {
            Ok(criteria) => self.run_search(criteria).await,
            Err(err) => {
                tracing::debug!(error = %err, "search rejected by validation");
                self.model.set_error(err.to_string()).await;
            }
        }
    }

    /// Issue a search for the given criteria. The form controls are
    /// disabled for the duration and re-enabled unconditionally, with
    /// focus restored to the search input.
    pub(crate) async fn run_search(&self, criteria: SearchCriteria) {
        tracing::debug!(
            entity = criteria.entity.plural(),
            term = %criteria.term,
            page = criteria.page,
            "performing search"
        );
        self.model.set_controls_enabled(false).await;
        self.model.set_content_loading(true).await;

        let result = self.gateway.search(&criteria).await;

        self.model.set_controls_enabled(true).await;
        self.model.set_content_loading(false).await;

        match result {
            Ok(outcome) => {
                self.model.apply_search_outcome(criteria, outcome).await;
            }
            Err(SearchError::Application { detail }) => {
                let message = detail.unwrap_or_else(|| {
                    format!(
                        "Failed to retrieve {} for \"{}\". Please try again.",
                        criteria.entity.plural(),
                        criteria.term
                    )
                });
                tracing::error!(term = %criteria.term, %message, "search rejected by server");
                self.model.set_error(message).await;
            }
            Err(err) => {
                tracing::error!(term = %criteria.term, error = %err, "search failed");
                self.model
                    .set_error(format!(
                        "Could not retrieve {}. Please try again later.",
                        criteria.entity.plural()
                    ))
                    .await;
            }
        }
    }
}
