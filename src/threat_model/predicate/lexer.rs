use super::PredicateSyntaxError;

/// Lexical tokens of the check query language
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Attribute(String),
    Literal(bool),
    And,
    Or,
    Not,
    LeftParen,
    RightParen,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Attribute(name) => write!(f, "attribute '{}'", name),
            Token::Literal(value) => write!(f, "'{}'", value),
            Token::And => write!(f, "'and'"),
            Token::Or => write!(f, "'or'"),
            Token::Not => write!(f, "'not'"),
            Token::LeftParen => write!(f, "'('"),
            Token::RightParen => write!(f, "')'"),
        }
    }
}

/// A token together with the character offset it starts at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub position: usize,
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

/// Splits a check query into tokens.
///
/// Attribute lookups are written either as a bare name (`company_user`) or
/// as a subscript with a quoted key (`attribute["company_user"]`,
/// `resource['is_hardened']`); both produce the same token.
pub fn tokenize(source: &str) -> Result<Vec<Spanned>, PredicateSyntaxError> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c == '(' || c == ')' {
            tokens.push(Spanned {
                token: if c == '(' {
                    Token::LeftParen
                } else {
                    Token::RightParen
                },
                position: i,
            });
            i += 1;
            continue;
        }

        if !is_identifier_start(c) {
            return Err(PredicateSyntaxError::new(
                i,
                format!("unexpected character '{}'", c),
            ));
        }

        let start = i;
        while i < chars.len() && is_identifier_continue(chars[i]) {
            i += 1;
        }
        let word: String = chars[start..i].iter().collect();

        if i < chars.len() && chars[i] == '[' {
            let (key, next) = read_subscript(&chars, i)?;
            tokens.push(Spanned {
                token: Token::Attribute(key),
                position: start,
            });
            i = next;
            continue;
        }

        let token = match word.to_lowercase().as_str() {
            "and" => Token::And,
            "or" => Token::Or,
            "not" => Token::Not,
            "true" => Token::Literal(true),
            "false" => Token::Literal(false),
            _ => Token::Attribute(word),
        };
        tokens.push(Spanned {
            token,
            position: start,
        });
    }

    Ok(tokens)
}

/// Reads `["key"]` starting at the opening bracket; returns the key and the
/// index just past the closing bracket.
fn read_subscript(chars: &[char], open: usize) -> Result<(String, usize), PredicateSyntaxError> {
    let quote_at = open + 1;
    let quote = match chars.get(quote_at) {
        Some(q @ ('"' | '\'')) => *q,
        _ => {
            return Err(PredicateSyntaxError::new(
                quote_at,
                "expected a quoted attribute name after '['".to_string(),
            ))
        }
    };

    let key_start = quote_at + 1;
    let key_end = chars[key_start..]
        .iter()
        .position(|c| *c == quote)
        .map(|offset| key_start + offset)
        .ok_or_else(|| PredicateSyntaxError::new(quote_at, "unterminated quoted attribute name".to_string()))?;

    if chars.get(key_end + 1) != Some(&']') {
        return Err(PredicateSyntaxError::new(
            key_end + 1,
            "expected ']' after quoted attribute name".to_string(),
        ));
    }

    let key: String = chars[key_start..key_end].iter().collect();
    if key.trim().is_empty() {
        return Err(PredicateSyntaxError::new(
            key_start,
            "attribute name cannot be empty".to_string(),
        ));
    }

    Ok((key, key_end + 2))
}
