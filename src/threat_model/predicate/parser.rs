use super::lexer::{Spanned, Token};
use super::{Expression, PredicateSyntaxError};

/// Maximum nesting of parentheses / `not` chains (stack safety limit)
const MAX_NESTING_DEPTH: usize = 64;

/// Recursive-descent parser over the token stream.
///
/// ```text
/// or      := and ( "or" and )*
/// and     := unary ( "and" unary )*
/// unary   := "not" unary | primary
/// primary := "(" or ")" | attribute | literal
/// ```
pub struct Parser<'a> {
    tokens: &'a [Spanned],
    cursor: usize,
    depth: usize,
    end_position: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Spanned], source_len: usize) -> Self {
        Self {
            tokens,
            cursor: 0,
            depth: 0,
            end_position: source_len,
        }
    }

    /// Parses the whole token stream as one expression
    pub fn parse(mut self) -> Result<Expression, PredicateSyntaxError> {
        if self.tokens.is_empty() {
            return Err(PredicateSyntaxError::new(0, "check query is empty".to_string()));
        }

        let expression = self.parse_or()?;

        if let Some(extra) = self.peek() {
            return Err(PredicateSyntaxError::new(
                extra.position,
                format!("unexpected {} after end of expression", extra.token),
            ));
        }

        Ok(expression)
    }

    fn peek(&self) -> Option<&'a Spanned> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<&'a Spanned> {
        let token = self.tokens.get(self.cursor);
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    fn next_is(&self, expected: &Token) -> bool {
        self.peek().map(|s| &s.token == expected).unwrap_or(false)
    }

    fn enter(&mut self, position: usize) -> Result<(), PredicateSyntaxError> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(PredicateSyntaxError::new(
                position,
                format!("expression nested deeper than {} levels", MAX_NESTING_DEPTH),
            ));
        }
        Ok(())
    }

    fn parse_or(&mut self) -> Result<Expression, PredicateSyntaxError> {
        let mut left = self.parse_and()?;
        while self.next_is(&Token::Or) {
            self.advance();
            let right = self.parse_and()?;
            left = Expression::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expression, PredicateSyntaxError> {
        let mut left = self.parse_unary()?;
        while self.next_is(&Token::And) {
            self.advance();
            let right = self.parse_unary()?;
            left = Expression::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expression, PredicateSyntaxError> {
        if let Some(spanned) = self.peek() {
            if spanned.token == Token::Not {
                self.advance();
                self.enter(spanned.position)?;
                let operand = self.parse_unary()?;
                self.depth -= 1;
                return Ok(Expression::Not(Box::new(operand)));
            }
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expression, PredicateSyntaxError> {
        let Some(spanned) = self.advance() else {
            return Err(PredicateSyntaxError::new(
                self.end_position,
                "expected attribute name, 'not' or '(' but the query ended".to_string(),
            ));
        };

        match &spanned.token {
            Token::Attribute(name) => Ok(Expression::Attribute(name.clone())),
            Token::Literal(value) => Ok(Expression::Literal(*value)),
            Token::LeftParen => {
                self.enter(spanned.position)?;
                let inner = self.parse_or()?;
                self.depth -= 1;
                match self.advance() {
                    Some(Spanned {
                        token: Token::RightParen,
                        ..
                    }) => Ok(inner),
                    Some(other) => Err(PredicateSyntaxError::new(
                        other.position,
                        format!("expected ')' but found {}", other.token),
                    )),
                    None => Err(PredicateSyntaxError::new(
                        spanned.position,
                        "unclosed '('".to_string(),
                    )),
                }
            }
            other => Err(PredicateSyntaxError::new(
                spanned.position,
                format!("expected attribute name, 'not' or '(' but found {}", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::lexer::tokenize;
    use super::*;

    fn parse(source: &str) -> Result<Expression, PredicateSyntaxError> {
        let tokens = tokenize(source)?;
        Parser::new(&tokens, source.chars().count()).parse()
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let expr = parse("a or b and c").unwrap();
        assert_eq!(expr.to_string(), "(a or (b and c))");
    }

    #[test]
    fn test_left_associative() {
        assert_eq!(parse("a and b and c").unwrap().to_string(), "((a and b) and c)");
        assert_eq!(parse("a or b or c").unwrap().to_string(), "((a or b) or c)");
    }

    #[test]
    fn test_parentheses_override_precedence() {
        let expr = parse("(a or b) and c").unwrap();
        assert_eq!(expr.to_string(), "((a or b) and c)");
    }

    #[test]
    fn test_not_binds_tightest() {
        let expr = parse("not a and b").unwrap();
        assert_eq!(expr.to_string(), "((not a) and b)");

        let expr = parse("not not a").unwrap();
        assert_eq!(expr.to_string(), "(not (not a))");
    }

    #[test]
    fn test_empty_query() {
        let err = parse("   ").unwrap_err();
        assert!(err.message.contains("empty"));
    }

    #[test]
    fn test_dangling_operator() {
        let err = parse("a and").unwrap_err();
        assert!(err.message.contains("query ended"));
        assert_eq!(err.position, 5);
    }

    #[test]
    fn test_unclosed_paren() {
        let err = parse("(a or b").unwrap_err();
        assert!(err.message.contains("unclosed '('"));
        assert_eq!(err.position, 0);
    }

    #[test]
    fn test_trailing_tokens() {
        let err = parse("a b").unwrap_err();
        assert!(err.message.contains("unexpected attribute 'b'"));
    }

    #[test]
    fn test_operator_in_operand_position() {
        let err = parse("and a").unwrap_err();
        assert!(err.message.contains("found 'and'"));
    }

    #[test]
    fn test_nesting_limit() {
        let deep = format!("{}a{}", "(".repeat(100), ")".repeat(100));
        let err = parse(&deep).unwrap_err();
        assert!(err.message.contains("nested deeper"));

        let not_chain = format!("{}a", "not ".repeat(100));
        assert!(parse(&not_chain).is_err());
    }
}
