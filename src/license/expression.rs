/// Tokens of a `license_spdx` value.
#[derive(Debug, PartialEq, Clone)]
enum Token<'a> {
    Id(&'a str),
    And,
    Or,
    With,
    LParen,
    RParen,
}

/// Tokenize a license expression. Operators are matched case-insensitively,
/// since metadata authors write `and`/`or` as often as `AND`/`OR`.
fn tokenize(expr: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = expr;

    loop {
        rest = rest.trim_start();
        let Some(c) = rest.chars().next() else {
            break;
        };
        match c {
            '(' => {
                tokens.push(Token::LParen);
                rest = &rest[1..];
            }
            ')' => {
                tokens.push(Token::RParen);
                rest = &rest[1..];
            }
            _ => {
                let end = rest
                    .find(|c: char| c.is_whitespace() || c == '(' || c == ')')
                    .unwrap_or(rest.len());
                let word = &rest[..end];
                let token = if word.eq_ignore_ascii_case("and") {
                    Token::And
                } else if word.eq_ignore_ascii_case("or") {
                    Token::Or
                } else if word.eq_ignore_ascii_case("with") {
                    Token::With
                } else {
                    Token::Id(word)
                };
                tokens.push(token);
                rest = &rest[end..];
            }
        }
    }

    tokens
}

/// License identifiers referenced by an expression, in order of appearance.
///
/// `and`/`or` separate identifiers, parentheses only group, and the
/// exception named after `with` is not a license identifier, so it is
/// skipped.
pub fn license_ids(expr: &str) -> Vec<&str> {
    let mut ids = Vec::new();
    let mut after_with = false;

    for token in tokenize(expr) {
        match token {
            Token::Id(_) if after_with => after_with = false,
            Token::Id(id) => ids.push(id),
            Token::With => after_with = true,
            Token::And | Token::Or | Token::LParen | Token::RParen => after_with = false,
        }
    }

    ids
}
