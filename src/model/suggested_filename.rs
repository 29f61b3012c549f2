const COUNTER_WIDTH: usize = 3;

pub fn initial_suggested_filename(stem: &str) -> String {
    format!("{stem}_{:0width$}.jpg", 0, width = COUNTER_WIDTH)
}

/// Advances a `<word>_<nnn>.<ext>` file name to the next number, keeping the
/// zero padding. Names that don't follow the pattern are returned unchanged.
pub fn next_suggested_filename(current: &str) -> String {
    let Some((name, extension)) = current.rsplit_once('.') else {
        return current.to_string();
    };
    let Some((stem, counter)) = name.rsplit_once('_') else {
        return current.to_string();
    };

    let stem_is_word = !stem.is_empty()
        && stem
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-');
    let counter_is_number =
        counter.len() >= COUNTER_WIDTH && counter.chars().all(|c| c.is_ascii_digit());

    if !stem_is_word || !counter_is_number || extension.is_empty() {
        return current.to_string();
    }

    match counter.parse::<u64>() {
        Ok(value) => format!(
            "{stem}_{:0width$}.{extension}",
            value + 1,
            width = COUNTER_WIDTH
        ),
        Err(_) => current.to_string(),
    }
}
