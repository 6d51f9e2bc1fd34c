// Handlers for each CLI subcommand. main.rs parses arguments, loads the
// graph and dispatches here.

pub mod cities;
pub mod distances;
pub mod route;

use flightroute_lib::Error as RouteError;

/// Turn library errors into the messages shown to users.
pub(crate) fn describe_failure(err: RouteError) -> anyhow::Error {
    match err {
        RouteError::UnknownNode { name, suggestions } => {
            anyhow::anyhow!(format_unknown_city_message(&name, &suggestions))
        }
        RouteError::NoPathExists { start, goal } => {
            anyhow::anyhow!(format_route_not_found_message(&start, &goal))
        }
        other => anyhow::Error::new(other),
    }
}

pub(crate) fn format_unknown_city_message(name: &str, suggestions: &[String]) -> String {
    let mut message = format!("Unknown city '{}'.", name);
    match suggestions {
        [] => {}
        [only] => {
            message.push_str(&format!(" Did you mean '{only}'?"));
        }
        many => {
            let joined = many
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ");
            message.push_str(&format!(" Did you mean one of: {}?", joined));
        }
    }
    message
}

pub(crate) fn format_route_not_found_message(start: &str, goal: &str) -> String {
    format!(
        "No route found between {} and {}. The two cities are not connected by any sequence of flights.",
        start, goal
    )
}
