use std::sync::Arc;

use crate::{FetchError, Suggestion, provider::Geocoder};

/// Queries shorter than this (in characters) never reach the geocoder.
pub const MIN_QUERY_CHARS: usize = 2;

/// A lookup the controller wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionTicket {
    seq: u64,
    query: String,
}

/// Result of a lookup, to be handed back to [`SuggestionController::apply`].
#[derive(Debug)]
pub struct SuggestionResponse {
    seq: u64,
    result: Result<Vec<Suggestion>, FetchError>,
}

/// Owns the typed city name and the suggestion dropdown.
#[derive(Debug, Clone)]
pub struct SuggestionController {
    geocoder: Arc<dyn Geocoder>,
    query: String,
    suggestions: Vec<Suggestion>,
    selected_city: Option<u64>,
    /// Bumped on every query change; only a response carrying this value is applied.
    generation: u64,
}

impl SuggestionController {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            geocoder,
            query: String::new(),
            suggestions: Vec::new(),
            selected_city: None,
            generation: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    /// GeoNames id of the last selected suggestion. Recorded, not used for lookups.
    pub fn selected_city(&self) -> Option<u64> {
        self.selected_city
    }

    pub fn geocoder(&self) -> Arc<dyn Geocoder> {
        Arc::clone(&self.geocoder)
    }

    /// Records a new query. Returns a ticket when a lookup should be issued;
    /// short queries clear the list right away instead.
    pub fn set_query(&mut self, query: impl Into<String>) -> Option<SuggestionTicket> {
        self.query = query.into();
        self.generation += 1;

        if self.query.chars().count() < MIN_QUERY_CHARS {
            self.suggestions.clear();
            return None;
        }

        Some(SuggestionTicket {
            seq: self.generation,
            query: self.query.clone(),
        })
    }

    /// Performs the lookup for `ticket`. Holds no borrow of the controller,
    /// so it can run on a spawned task.
    pub async fn fetch(geocoder: &dyn Geocoder, ticket: SuggestionTicket) -> SuggestionResponse {
        let result = geocoder.search(&ticket.query).await;
        SuggestionResponse {
            seq: ticket.seq,
            result,
        }
    }

    /// Applies a finished lookup. Returns `false` if it was superseded and dropped.
    ///
    /// Failures are logged and leave an empty list; they are never shown to the user.
    pub fn apply(&mut self, response: SuggestionResponse) -> bool {
        if response.seq != self.generation {
            tracing::debug!(
                seq = response.seq,
                latest = self.generation,
                "dropping stale suggestion response"
            );
            return false;
        }

        match response.result {
            Ok(list) => self.suggestions = list,
            Err(err) => {
                tracing::warn!(query = %self.query, error = %err, "suggestion lookup failed");
                self.suggestions.clear();
            }
        }
        true
    }

    /// Records the query and, if long enough, looks up and applies suggestions.
    pub async fn update_query(&mut self, query: impl Into<String>) {
        if let Some(ticket) = self.set_query(query) {
            let geocoder = self.geocoder();
            let response = Self::fetch(geocoder.as_ref(), ticket).await;
            self.apply(response);
        }
    }

    /// Picks the suggestion at `index`: the query becomes its name, its id is
    /// recorded, and the list is cleared. Returns the city to fetch weather for.
    pub fn select(&mut self, index: usize) -> Option<String> {
        let chosen = self.suggestions.get(index)?.clone();

        self.query = chosen.name.clone();
        self.selected_city = Some(chosen.id);
        self.suggestions.clear();
        // Any lookup still in flight belongs to the text typed before the selection.
        self.generation += 1;

        Some(chosen.name)
    }

    /// Takes `text` as the final input: no lookup is issued and the dropdown closes.
    pub fn commit_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
        self.suggestions.clear();
        self.generation += 1;
    }

    /// Dropdown labels, one per suggestion. Rows sharing a `name, country`
    /// label get their GeoNames id appended so every label is unique.
    pub fn labels(&self) -> Vec<String> {
        let plain: Vec<String> = self.suggestions.iter().map(Suggestion::label).collect();

        plain
            .iter()
            .zip(&self.suggestions)
            .map(|(label, s)| {
                if plain.iter().filter(|other| *other == label).count() > 1 {
                    format!("{label} ({})", s.id)
                } else {
                    label.clone()
                }
            })
            .collect()
    }

    /// Index of the suggestion whose dropdown label (see [`Self::labels`]) is `label`.
    pub fn position_of_label(&self, label: &str) -> Option<usize> {
        self.labels().iter().position(|l| l == label)
    }
}


#[cfg(test)]
mod tests {
    use super::fakes::{FakeGeocoder, place};
    use super::*;

    fn controller(geocoder: &Arc<FakeGeocoder>) -> SuggestionController {
        SuggestionController::new(geocoder.clone())
    }

    #[tokio::test]
    async fn short_queries_issue_no_request_and_clear_list() {
        let geocoder = Arc::new(FakeGeocoder::with(vec![place("London", "United Kingdom", 1)]));
        let mut ctl = controller(&geocoder);

        ctl.update_query("Lo").await;
        assert_eq!(ctl.suggestions().len(), 1);

        for query in ["", "L", "Л"] {
            ctl.update_query(query).await;
            assert!(ctl.suggestions().is_empty(), "query {query:?} should clear the list");
        }

        assert_eq!(geocoder.calls(), vec!["Lo".to_string()]);
    }

    #[tokio::test]
    async fn successful_lookup_replaces_list_in_order() {
        let geocoder = Arc::new(FakeGeocoder::with(vec![
            place("London", "United Kingdom", 2643743),
            place("Lomé", "Togo", 2365267),
        ]));
        let mut ctl = controller(&geocoder);

        ctl.update_query("Lo").await;

        let names: Vec<_> = ctl.suggestions().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["London", "Lomé"]);
        assert_eq!(ctl.query(), "Lo");
    }

    #[tokio::test]
    async fn failed_lookup_clears_list() {
        let mut ctl = controller(&Arc::new(FakeGeocoder::with(vec![place("Paris", "France", 42)])));
        ctl.update_query("Pa").await;
        assert_eq!(ctl.suggestions().len(), 1);

        let failing = Arc::new(FakeGeocoder::failing());
        let mut ctl = SuggestionController {
            geocoder: failing.clone(),
            ..ctl
        };
        ctl.update_query("Par").await;

        assert!(ctl.suggestions().is_empty());
        assert_eq!(failing.calls(), vec!["Par".to_string()]);
    }

    #[tokio::test]
    async fn stale_response_is_dropped() {
        let geocoder = Arc::new(FakeGeocoder::with(vec![place("Paris", "France", 42)]));
        let mut ctl = controller(&geocoder);

        let first = ctl.set_query("Pa").expect("long enough");
        let second = ctl.set_query("Par").expect("long enough");

        let second_resp = SuggestionController::fetch(&*geocoder, second).await;
        let first_resp = SuggestionController::fetch(&*geocoder, first).await;

        assert!(ctl.apply(second_resp));
        assert!(!ctl.apply(first_resp));
        assert_eq!(ctl.suggestions().len(), 1);
    }

    #[tokio::test]
    async fn shortening_query_invalidates_in_flight_lookup() {
        let geocoder = Arc::new(FakeGeocoder::with(vec![place("Lomé", "Togo", 7)]));
        let mut ctl = controller(&geocoder);

        let ticket = ctl.set_query("Lo").expect("long enough");
        assert!(ctl.set_query("L").is_none());

        let resp = SuggestionController::fetch(&*geocoder, ticket).await;
        assert!(!ctl.apply(resp));
        assert!(ctl.suggestions().is_empty());
    }

    #[tokio::test]
    async fn select_sets_query_records_id_and_clears_list() {
        let geocoder = Arc::new(FakeGeocoder::with(vec![
            place("Paris", "France", 42),
            place("Paris", "United States", 4717560),
        ]));
        let mut ctl = controller(&geocoder);
        ctl.update_query("Par").await;

        let city = ctl.select(0);

        assert_eq!(city.as_deref(), Some("Paris"));
        assert_eq!(ctl.query(), "Paris");
        assert_eq!(ctl.selected_city(), Some(42));
        assert!(ctl.suggestions().is_empty());
        assert_eq!(geocoder.calls().len(), 1);
    }

    #[tokio::test]
    async fn select_out_of_range_changes_nothing() {
        let geocoder = Arc::new(FakeGeocoder::with(vec![place("Paris", "France", 42)]));
        let mut ctl = controller(&geocoder);
        ctl.update_query("Par").await;

        assert_eq!(ctl.select(5), None);
        assert_eq!(ctl.query(), "Par");
        assert_eq!(ctl.selected_city(), None);
        assert_eq!(ctl.suggestions().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_labels_are_told_apart_by_id() {
        let geocoder = Arc::new(FakeGeocoder::with(vec![
            place("Springfield", "United States", 4409896),
            place("Springfield", "United States", 4951788),
            place("Springfield", "Australia", 2148928),
        ]));
        let mut ctl = controller(&geocoder);
        ctl.update_query("Springf").await;

        assert_eq!(
            ctl.labels(),
            vec![
                "Springfield, United States (4409896)",
                "Springfield, United States (4951788)",
                "Springfield, Australia",
            ]
        );

        let index = ctl
            .position_of_label("Springfield, United States (4951788)")
            .expect("second row");
        assert_eq!(index, 1);

        ctl.select(index);
        assert_eq!(ctl.selected_city(), Some(4951788));
        assert_eq!(ctl.query(), "Springfield");
    }

    #[tokio::test]
    async fn commit_query_closes_dropdown_without_lookup() {
        let geocoder = Arc::new(FakeGeocoder::with(vec![place("Paris", "France", 42)]));
        let mut ctl = controller(&geocoder);

        let ticket = ctl.set_query("Par").expect("long enough");
        ctl.commit_query("Paris");

        let resp = SuggestionController::fetch(&*geocoder, ticket).await;
        assert!(!ctl.apply(resp));
        assert_eq!(ctl.query(), "Paris");
        assert!(ctl.suggestions().is_empty());
        assert_eq!(geocoder.calls(), vec!["Par".to_string()]);
    }

    #[tokio::test]
    async fn position_of_label_matches_dropdown_rows() {
        let geocoder = Arc::new(FakeGeocoder::with(vec![
            place("Paris", "France", 42),
            place("Paris", "United States", 4717560),
        ]));
        let mut ctl = controller(&geocoder);
        ctl.update_query("Par").await;

        assert_eq!(ctl.position_of_label("Paris, United States"), Some(1));
        assert_eq!(ctl.position_of_label("Paris"), None);
    }
}
