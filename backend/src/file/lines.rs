/// Converts DOS (`\r\n`) and classic Mac (`\r`) line endings to `\n`.
pub fn remove_cr(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Splits on any of `\r\n`, `\r` or `\n`.
///
/// A trailing line ending yields a trailing empty line.
pub fn split_lines(text: &str) -> Vec<String> {
    remove_cr(text).split('\n').map(str::to_owned).collect()
}
