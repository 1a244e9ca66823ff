//! Interactive mode: a city prompt whose dropdown is fed by the geocoder.

use std::sync::Arc;

use inquire::{
    CustomUserError, InquireError, Text,
    autocompletion::{Autocomplete, Replacement},
};
use tokio::{runtime::Handle, sync::Mutex};
use weather_core::{
    Config, WeatherView,
    controller::WeatherController,
    provider::{geocoder_from_config, weather_source_from_config},
    render::{INPUT_PLACEHOLDER, TITLE},
};

/// Bridges inquire's synchronous autocomplete hook to the async suggestion controller.
#[derive(Debug, Clone)]
struct CitySuggester {
    view: Arc<Mutex<WeatherView>>,
    runtime: Handle,
}

impl Autocomplete for CitySuggester {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        self.runtime.block_on(async {
            let mut view = self.view.lock().await;

            // Tab-completing a row puts its label in the input; keep the dropdown as is.
            if view.input().position_of_label(input).is_none() {
                view.type_query(input).await;
            }

            Ok(view.input().labels())
        })
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        Ok(highlighted_suggestion)
    }
}

pub async fn run(config: &Config) -> anyhow::Result<()> {
    let geocoder = geocoder_from_config(config)?;
    let source = weather_source_from_config(config);
    let view = Arc::new(Mutex::new(WeatherView::new(geocoder, Arc::clone(&source))));

    println!("{TITLE}");

    loop {
        let initial = view.lock().await.query().to_string();
        let suggester = CitySuggester {
            view: Arc::clone(&view),
            runtime: Handle::current(),
        };

        let answer = tokio::task::spawn_blocking(move || {
            Text::new("City:")
                .with_placeholder(INPUT_PLACEHOLDER)
                .with_initial_value(&initial)
                .with_autocomplete(suggester)
                .with_help_message("↑↓ to pick a suggestion, Enter to fetch, Esc to quit")
                .prompt()
        })
        .await?;

        let answer = match answer {
            Ok(answer) => answer,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        let mut view = view.lock().await;
        let Some(ticket) = view.begin_answer(&answer) else {
            continue;
        };
        tracing::debug!(
            city = ticket.city(),
            selected = ?view.input().selected_city(),
            "fetching forecast"
        );
        print!("{}", view.render());

        let outcome = WeatherController::fetch(source.as_ref(), ticket).await;
        view.forecast_mut().finish(outcome);
        println!();
        print!("{}", view.render());
        println!();
    }

    Ok(())
}
