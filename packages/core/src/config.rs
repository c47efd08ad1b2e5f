/// Softening temperature applied when the environment does not provide one,
/// or provides one that does not parse.
pub const DEFAULT_TEMPERATURE: f32 = 1.8;

/// Lower bound for explicitly configured temperatures. Values below 1.0 would
/// sharpen the distribution instead of softening it.
pub const MIN_TEMPERATURE: f32 = 1.0;

/// Resolve the softening temperature from a raw environment value.
///
/// Unset or unparseable input falls back to [`DEFAULT_TEMPERATURE`]; a value
/// that parses but sits below [`MIN_TEMPERATURE`] is clamped up to it. The
/// two failure modes are intentionally distinct.
pub fn parse_temperature(raw: Option<&str>) -> f32 {
    match raw.and_then(|value| value.trim().parse::<f32>().ok()) {
        Some(temperature) if temperature < MIN_TEMPERATURE => MIN_TEMPERATURE,
        Some(temperature) => temperature,
        None => DEFAULT_TEMPERATURE,
    }
}
