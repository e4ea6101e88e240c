use std::time::Duration;

use jiff::SpanRelativeTo;

/// Accepts `1s`, `500ms`, `PT2S`, or a bare number of seconds.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let signed = if let Ok(duration) = input.parse::<jiff::SignedDuration>() {
        duration
    } else if let Ok(duration) = input
        .parse::<jiff::Span>()
        .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
    {
        duration
    } else if let Ok(seconds) = input.parse::<i64>() {
        jiff::SignedDuration::from_secs(seconds)
    } else {
        return Err(String::from("Invalid duration"));
    };

    Duration::try_from(signed).map_err(|_| String::from("Duration must not be negative"))
}
