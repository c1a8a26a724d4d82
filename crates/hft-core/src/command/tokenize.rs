use super::CommandError;

/// Split a command line into arguments.
///
/// Arguments are separated by whitespace. Double quotes group text with
/// spaces into one argument and may appear mid-argument (`a"b c"` is `ab c`);
/// `""` is an empty argument. Inside quotes `\"` and `\\` are escapes.
pub fn tokenize(line: &str) -> Result<Vec<String>, CommandError> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut started = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                started = true;
                loop {
                    match chars.next() {
                        None => return Err(CommandError::UnterminatedQuote),
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(e @ ('"' | '\\')) => current.push(e),
                            Some(other) => {
                                current.push('\\');
                                current.push(other);
                            }
                            None => return Err(CommandError::UnterminatedQuote),
                        },
                        Some(other) => current.push(other),
                    }
                }
            }
            c if c.is_whitespace() => {
                if started {
                    out.push(std::mem::take(&mut current));
                    started = false;
                }
            }
            c => {
                started = true;
                current.push(c);
            }
        }
    }
    if started {
        out.push(current);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(line: &str) -> Vec<String> {
        tokenize(line).unwrap()
    }

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(toks("  delete   welcome "), vec!["delete", "welcome"]);
        assert!(toks("   ").is_empty());
    }

    #[test]
    fn quotes_group_words() {
        assert_eq!(
            toks(r#"edit welcome "Hello there, {player}!""#),
            vec!["edit", "welcome", "Hello there, {player}!"]
        );
        assert_eq!(toks(r#"a"b c"d"#), vec!["ab cd"]);
        assert_eq!(toks(r#"edit x """#), vec!["edit", "x", ""]);
    }

    #[test]
    fn escapes_inside_quotes() {
        assert_eq!(toks(r#""say \"hi\"""#), vec![r#"say "hi""#]);
        assert_eq!(toks(r#""a\\b""#), vec![r"a\b"]);
        assert_eq!(toks(r#""\n""#), vec![r"\n"]);
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        assert_eq!(tokenize(r#"edit x "oops"#), Err(CommandError::UnterminatedQuote));
        assert_eq!(tokenize(r#""trailing\"#), Err(CommandError::UnterminatedQuote));
    }
}
