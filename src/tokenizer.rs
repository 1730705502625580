//! CSV tokenizer for catalog-import
//!
//! Splits raw file text into rows of raw cells. The dialect is small:
//!
//! - Lines are separated by `\n`; a `\r` left at the end of a line is dropped
//! - Cells are separated by `,` unless a `"` has opened a quoted section
//! - Every `"` toggles the quoted state, so `""` is not an escape sequence
//!
//! Cells are returned exactly as written. Stripping the surrounding quotes and
//! whitespace is left to the row mapper.

/// Cell delimiter
pub const DELIMITER: char = ',';

/// Quote character that protects delimiters inside a cell
pub const QUOTE: char = '"';

/// Tokenize CSV text into rows of raw cells
///
/// The number of rows returned is always the number of `\n` characters plus
/// one. A file ending in a newline therefore yields a final row holding one
/// empty cell, which later stages skip as blank.
///
/// # Example
/// ```
/// # use catalog_import::tokenizer::tokenize;
/// let rows = tokenize("a,\"b, c\"\nd");
/// assert_eq!(rows, vec![vec!["a", "\"b, c\""], vec!["d"]]);
/// ```
pub fn tokenize(text: &str) -> Vec<Vec<String>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    text.split('\n')
        .map(|line| tokenize_line(line.strip_suffix('\r').unwrap_or(line)))
        .collect()
}

/// Tokenize a single line
///
/// An unbalanced quote leaves the rest of the line in one cell.
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quote = false;

    for ch in line.chars() {
        match ch {
            QUOTE => {
                in_quote = !in_quote;
                current.push(ch);
            }
            DELIMITER if !in_quote => {
                cells.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    cells.push(current);

    cells
}
