use jiff::SpanRelativeTo;

/// Stop given on the command line as `lat,lng` or `lat,lng,name`.
#[derive(Debug, Clone, PartialEq)]
pub struct StopArg {
    pub lat: f64,
    pub lng: f64,
    pub name: Option<String>,
}

pub fn parse_stop(input: &str) -> Result<StopArg, String> {
    let mut parts = input.splitn(3, ',');

    let mut coordinate = |label: &str| -> Result<f64, String> {
        let value = parts
            .next()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| format!("Missing {label} in '{input}', expected lat,lng[,name]"))?;

        value
            .parse::<f64>()
            .map_err(|_| format!("Invalid {label} '{value}'"))
    };

    let lat = coordinate("latitude")?;
    let lng = coordinate("longitude")?;

    let name = parts
        .next()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());

    Ok(StopArg { lat, lng, name })
}

pub fn parse_duration(input: &str) -> Result<jiff::SignedDuration, String> {
    if let Ok(duration) = input.parse::<jiff::SignedDuration>() {
        return Ok(duration);
    }

    if let Ok(duration) = input
        .parse::<jiff::Span>()
        .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
    {
        return Ok(duration);
    }

    if let Ok(seconds) = input.parse::<i64>() {
        return Ok(jiff::SignedDuration::from_secs(seconds.abs()));
    }

    Err(String::from("Invalid duration"))
}
