use crate::infrastructure::error::EngineError;

/// Minute of day on the linear axis `[0, 1440)`.
pub type Minute = u32;

pub const MINUTES_PER_DAY: Minute = 24 * 60;

/// Parses a wall-clock `"HH:MM"` string into a minute of day.
/// Anything but exactly two in-range numeric fields is rejected.
pub fn to_minutes(clock: &str) -> Result<Minute, EngineError> {
    let mut split = clock.split(':');
    let Some(hour_str) = split.next() else {
        return Err(EngineError::Format(clock.to_string()));
    };
    let Some(minute_str) = split.next() else {
        return Err(EngineError::Format(clock.to_string()));
    };
    if split.next().is_some() {
        return Err(EngineError::Format(clock.to_string()));
    }

    let hours = hour_str
        .parse::<Minute>()
        .map_err(|_| EngineError::Format(clock.to_string()))?;
    let minutes = minute_str
        .parse::<Minute>()
        .map_err(|_| EngineError::Format(clock.to_string()))?;
    if hours > 23 || minutes > 59 {
        return Err(EngineError::Format(clock.to_string()));
    }
    Ok(hours * 60 + minutes)
}

/// Renders a minute of day back as zero-padded `"HH:MM"`. Values at or past
/// 1440 wrap, so a placement that ran over midnight still renders as a clock.
pub fn to_clock(minute: Minute) -> String {
    let wrapped = minute % MINUTES_PER_DAY;
    format!("{:02}:{:02}", wrapped / 60, wrapped % 60)
}

/// Formats a minute count as `"Xh Ym"`, truncating toward zero.
pub fn format_duration(total: Minute) -> String {
    format!("{}h {}m", total / 60, total % 60)
}
