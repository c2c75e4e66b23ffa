/// Column where the middle of a span starting at `start` ends.
///
/// Scans `line[start..]` keeping a bracket depth. The first closer that
/// takes the depth below zero ends the span, exclusive, so that bracket
/// stays in the suffix. Without one the span ends at the last char of the
/// line. Brackets inside strings and comments are counted like any other.
#[must_use]
pub fn suffix_position(line: &[char], start: usize) -> usize {
    let mut depth: i64 = 0;
    for (column, ch) in line.iter().enumerate().skip(start) {
        match ch {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return column;
        }
    }
    line.len().saturating_sub(1).max(start)
}
