//! Line-oriented scanner that splits a Ballerina module source into its
//! top-level members. This is the loader-facing face of the syntax facility:
//! function definitions come back with their name and verbatim text
//! (attached `#` documentation included) so callers can filter and re-emit
//! them without reformatting.

/// A top-level member recovered from module source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScannedMember {
    /// A function definition, documentation lines included.
    Function { name: String, text: String },
    /// Any other top-level declaration (imports, types, enums, variables).
    Other { text: String },
}

impl ScannedMember {
    pub fn function_name(&self) -> Option<&str> {
        match self {
            ScannedMember::Function { name, .. } => Some(name),
            ScannedMember::Other { .. } => None,
        }
    }
}

/// Split module source into top-level members in declaration order.
///
/// Braces inside string literals and `//` comments do not count toward
/// nesting. A `#` documentation block is attached to the member that
/// follows it.
pub fn scan_module_members(source: &str) -> Vec<ScannedMember> {
    let lines: Vec<&str> = source.lines().collect();
    let mut members = Vec::new();
    let mut index = 0;
    let mut doc_start: Option<usize> = None;

    while index < lines.len() {
        let trimmed = lines[index].trim_start();

        if trimmed.is_empty() || trimmed.starts_with("//") {
            doc_start = None;
            index += 1;
            continue;
        }

        if trimmed.starts_with('#') {
            if doc_start.is_none() {
                doc_start = Some(index);
            }
            index += 1;
            continue;
        }

        let start = doc_start.take().unwrap_or(index);
        let end = member_end(&lines, index);
        let text = lines[start..end].join("\n");

        match function_name(trimmed) {
            Some(name) => members.push(ScannedMember::Function { name, text }),
            None => members.push(ScannedMember::Other { text }),
        }
        index = end;
    }

    members
}

/// Index one past the last line of the member starting at `start`.
fn member_end(lines: &[&str], start: usize) -> usize {
    let mut depth: i64 = 0;
    let mut seen_open = false;
    let mut index = start;

    while index < lines.len() {
        let (opens, closes, ends_with_semicolon) = survey_line(lines[index]);
        if opens > 0 {
            seen_open = true;
        }
        depth += opens as i64 - closes as i64;
        index += 1;

        if depth <= 0 && (seen_open || ends_with_semicolon) {
            break;
        }
    }

    index
}

/// Count braces outside string literals and comments; report whether the
/// code part of the line ends with a semicolon.
fn survey_line(line: &str) -> (usize, usize, bool) {
    let mut opens = 0;
    let mut closes = 0;
    let mut in_string = false;
    let mut last_code_char = None;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_string {
            match ch {
                '\\' => {
                    chars.next();
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '/' if chars.peek() == Some(&'/') => break,
            '{' => {
                opens += 1;
                last_code_char = Some(ch);
            }
            '}' => {
                closes += 1;
                last_code_char = Some(ch);
            }
            _ => {
                if !ch.is_whitespace() {
                    last_code_char = Some(ch);
                }
            }
        }
    }

    (opens, closes, last_code_char == Some(';'))
}

/// The declared name, if this line opens a function definition.
fn function_name(line: &str) -> Option<String> {
    let mut rest = line.trim_start();
    loop {
        let (word, tail) = match rest.split_once(char::is_whitespace) {
            Some(pair) => pair,
            None => return None,
        };
        match word {
            "public" | "isolated" => rest = tail.trim_start(),
            "function" => {
                let name: String = tail
                    .trim_start()
                    .chars()
                    .take_while(|c| c.is_alphanumeric() || *c == '_')
                    .collect();
                return if name.is_empty() { None } else { Some(name) };
            }
            _ => return None,
        }
    }
}
