use jiff::{SignedDuration, Span, SpanRelativeTo};

/// Parses "5s", "1m 30s", "PT2M" or a bare number of seconds such as "2.5".
pub fn parse_duration(input: &str) -> Result<SignedDuration, String> {
    let input = input.trim();

    let duration = if let Ok(duration) = input.parse::<SignedDuration>() {
        duration
    } else if let Ok(duration) = input
        .parse::<Span>()
        .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
    {
        duration
    } else if let Ok(seconds) = input.parse::<f64>() {
        SignedDuration::try_from_secs_f64(seconds)
            .map_err(|error| format!("Invalid duration '{input}': {error}"))?
    } else {
        return Err(format!("Invalid duration '{input}'"));
    };

    if duration.is_negative() {
        return Err(format!("Duration '{input}' must not be negative"));
    }

    Ok(duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_friendly_and_iso() {
        assert_eq!(parse_duration("5s"), Ok(SignedDuration::from_secs(5)));
        assert_eq!(parse_duration("1m 30s"), Ok(SignedDuration::from_secs(90)));
        assert_eq!(parse_duration("PT2M"), Ok(SignedDuration::from_secs(120)));
        assert_eq!(
            parse_duration("250ms"),
            Ok(SignedDuration::from_millis(250))
        );
    }

    #[test]
    fn test_bare_seconds() {
        assert_eq!(parse_duration("7"), Ok(SignedDuration::from_secs(7)));
        assert_eq!(parse_duration(" 2.5 "), Ok(SignedDuration::from_millis(2500)));
    }

    #[test]
    fn test_rejects_garbage_and_negative() {
        assert!(parse_duration("soon").is_err());
        assert!(parse_duration("").is_err());
        assert!(parse_duration("-3").is_err());
    }
}
