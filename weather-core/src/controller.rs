//! State owners for the weather view.
//!
//! Each controller stamps its outgoing requests with a sequence number and
//! drops responses that are no longer the latest, so a slow reply can never
//! overwrite the state produced by a newer one. Requests themselves are never
//! cancelled.

pub mod suggestions;
pub mod weather;

pub use suggestions::{
    MIN_QUERY_CHARS, SuggestionController, SuggestionResponse, SuggestionTicket,
};
pub use weather::{WeatherController, WeatherOutcome, WeatherTicket};
