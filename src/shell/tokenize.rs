/// Splits on runs of whitespace. There is no quoting or escaping.
pub fn tokenize(segment: &str) -> Vec<String> {
    segment.split_whitespace().map(str::to_string).collect()
}
