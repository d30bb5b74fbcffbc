use crate::error::SyntaxError;

/// Token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    ImportKeyword,
    TypeKeyword,
    EnumKeyword,
    RecordKeyword,
    FinalKeyword,
    ReadonlyKeyword,
    StringKeyword,
    BooleanKeyword,
    OpenBrace,
    CloseBrace,
    Semicolon,
    Comma,
    Equal,
    BitwiseAnd,
    Slash,
    Identifier,
    Eof,
}

impl TokenKind {
    /// Source text for kinds whose spelling is fixed.
    pub fn fixed_text(self) -> Option<&'static str> {
        match self {
            TokenKind::ImportKeyword => Some("import"),
            TokenKind::TypeKeyword => Some("type"),
            TokenKind::EnumKeyword => Some("enum"),
            TokenKind::RecordKeyword => Some("record"),
            TokenKind::FinalKeyword => Some("final"),
            TokenKind::ReadonlyKeyword => Some("readonly"),
            TokenKind::StringKeyword => Some("string"),
            TokenKind::BooleanKeyword => Some("boolean"),
            TokenKind::OpenBrace => Some("{"),
            TokenKind::CloseBrace => Some("}"),
            TokenKind::Semicolon => Some(";"),
            TokenKind::Comma => Some(","),
            TokenKind::Equal => Some("="),
            TokenKind::BitwiseAnd => Some("&"),
            TokenKind::Slash => Some("/"),
            TokenKind::Identifier | TokenKind::Eof => None,
        }
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::ImportKeyword
                | TokenKind::TypeKeyword
                | TokenKind::EnumKeyword
                | TokenKind::RecordKeyword
                | TokenKind::FinalKeyword
                | TokenKind::ReadonlyKeyword
                | TokenKind::StringKeyword
                | TokenKind::BooleanKeyword
        )
    }
}

/// A terminal with optional leading/trailing trivia. Tokens carry no
/// positions; spans stay synthetic (zero-width) until the writer lays the
/// module out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    text: Option<String>,
    leading: String,
    trailing: String,
}

impl Token {
    /// Mint a token of a fixed-spelling kind.
    pub fn of(kind: TokenKind) -> Result<Self, SyntaxError> {
        if kind == TokenKind::Identifier {
            return Err(SyntaxError::MalformedTree(
                "identifier tokens carry text; use Token::identifier".to_string(),
            ));
        }
        Ok(Self {
            kind,
            text: None,
            leading: String::new(),
            trailing: String::new(),
        })
    }

    /// Mint an identifier token.
    pub fn identifier(text: impl Into<String>) -> Result<Self, SyntaxError> {
        let text = text.into();
        if text.is_empty() {
            return Err(SyntaxError::MalformedTree(
                "identifier tokens need non-empty text".to_string(),
            ));
        }
        Ok(Self {
            kind: TokenKind::Identifier,
            text: Some(text),
            leading: String::new(),
            trailing: String::new(),
        })
    }

    pub fn with_leading(mut self, trivia: impl Into<String>) -> Self {
        self.leading = trivia.into();
        self
    }

    pub fn with_trailing(mut self, trivia: impl Into<String>) -> Self {
        self.trailing = trivia.into();
        self
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The token's source text, without trivia.
    pub fn text(&self) -> &str {
        match self.text {
            Some(ref text) => text,
            None => self.kind.fixed_text().unwrap_or(""),
        }
    }

    /// The token's source text with trivia attached.
    pub fn render(&self) -> String {
        format!("{}{}{}", self.leading, self.text(), self.trailing)
    }
}
