use std::fs;
use std::path::Path;

use crate::error::ExportError;

/// Errors that can occur during GML parsing
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GmlParseError {
    #[error("unterminated string literal starting on line {line}")]
    UnterminatedString { line: usize },
    #[error("unexpected character '{ch}' on line {line}")]
    UnexpectedChar { ch: char, line: usize },
    #[error("expected {expected} on line {line}, found {found}")]
    Unexpected {
        expected: &'static str,
        found: String,
        line: usize,
    },
    #[error("{element} is missing required '{key}' attribute")]
    MissingKey {
        element: &'static str,
        key: &'static str,
    },
    #[error("invalid value '{value}' for '{key}'")]
    InvalidValue { key: String, value: String },
}

/// A GML value: scalar or nested key/value list
#[derive(Debug, Clone, PartialEq)]
pub enum GmlValue {
    Number(String),
    Str(String),
    List(Vec<(String, GmlValue)>),
}

impl GmlValue {
    /// Scalar contents, or None for nested lists
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Number(s) | Self::Str(s) => Some(s),
            Self::List(_) => None,
        }
    }
}

/// Represents a node in a GML graph
#[derive(Debug, Clone, PartialEq)]
pub struct GmlNode {
    pub id: String,
    /// Every key except `id`, including `label`
    pub attributes: Vec<(String, GmlValue)>,
}

/// Represents an edge in a GML graph
#[derive(Debug, Clone, PartialEq)]
pub struct GmlEdge {
    pub source: String,
    pub target: String,
    pub attributes: Vec<(String, GmlValue)>,
}

impl GmlEdge {
    /// First scalar value stored under `key`
    pub fn scalar(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_scalar())
    }
}

/// Represents a complete GML graph, nodes and edges in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GmlGraph {
    pub nodes: Vec<GmlNode>,
    pub edges: Vec<GmlEdge>,
    pub attributes: Vec<(String, GmlValue)>,
}

impl GmlGraph {
    /// First scalar graph attribute stored under `key`
    pub fn scalar(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_scalar())
    }

    /// GML marks directed graphs with `directed 1`
    pub fn is_directed(&self) -> bool {
        self.scalar("directed").map_or(false, |v| v.trim() == "1")
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Key(String),
    Number(String),
    Str(String),
    Open,
    Close,
    Eof,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Key(k) => format!("key '{}'", k),
            Token::Number(n) => format!("number {}", n),
            Token::Str(s) => format!("string \"{}\"", s),
            Token::Open => "'['".to_string(),
            Token::Close => "']'".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}

/// Tokenizer over GML source text
struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next();
        if ch == Some('\n') {
            self.line += 1;
        }
        ch
    }

    fn take_while(&mut self, first: char, pred: impl Fn(char) -> bool) -> String {
        let mut out = String::from(first);
        while let Some(&ch) = self.chars.peek() {
            if !pred(ch) {
                break;
            }
            out.push(ch);
            self.bump();
        }
        out
    }

    fn string(&mut self) -> Result<String, GmlParseError> {
        let start = self.line;
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(GmlParseError::UnterminatedString { line: start }),
                Some('"') => return Ok(out),
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('"') => out.push('"'),
                    Some('\\') => out.push('\\'),
                    Some(other) => {
                        out.push('\\');
                        out.push(other);
                    }
                    None => return Err(GmlParseError::UnterminatedString { line: start }),
                },
                Some(ch) => out.push(ch),
            }
        }
    }

    fn next_token(&mut self) -> Result<Token, GmlParseError> {
        loop {
            let Some(ch) = self.bump() else {
                return Ok(Token::Eof);
            };
            match ch {
                c if c.is_whitespace() => continue,
                '#' => {
                    while let Some(c) = self.bump() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                '[' => return Ok(Token::Open),
                ']' => return Ok(Token::Close),
                '"' => return self.string().map(Token::Str),
                c if c.is_ascii_alphabetic() || c == '_' => {
                    return Ok(Token::Key(
                        self.take_while(c, |c| c.is_ascii_alphanumeric() || c == '_'),
                    ));
                }
                c if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => {
                    return Ok(Token::Number(self.take_while(c, |c| {
                        c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '+')
                    })));
                }
                c => {
                    return Err(GmlParseError::UnexpectedChar {
                        ch: c,
                        line: self.line,
                    })
                }
            }
        }
    }
}

/// Recursive-descent parser producing key/value lists
struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Result<Self, GmlParseError> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    fn advance(&mut self) -> Result<Token, GmlParseError> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn unexpected(&self, expected: &'static str) -> GmlParseError {
        GmlParseError::Unexpected {
            expected,
            found: self.current.describe(),
            line: self.lexer.line,
        }
    }

    fn value(&mut self) -> Result<GmlValue, GmlParseError> {
        match self.advance()? {
            Token::Number(n) => Ok(GmlValue::Number(n)),
            Token::Str(s) => Ok(GmlValue::Str(s)),
            Token::Open => {
                let items = self.list()?;
                match self.advance()? {
                    Token::Close => Ok(GmlValue::List(items)),
                    other => {
                        self.current = other;
                        Err(self.unexpected("']'"))
                    }
                }
            }
            other => {
                self.current = other;
                Err(self.unexpected("a value"))
            }
        }
    }

    /// Parse `key value` pairs until `]` or end of input
    fn list(&mut self) -> Result<Vec<(String, GmlValue)>, GmlParseError> {
        let mut items = Vec::new();
        loop {
            match &self.current {
                Token::Close | Token::Eof => return Ok(items),
                Token::Key(key) => {
                    let key = key.clone();
                    self.advance()?;
                    items.push((key, self.value()?));
                }
                _ => return Err(self.unexpected("a key")),
            }
        }
    }

    fn document(&mut self) -> Result<Vec<(String, GmlValue)>, GmlParseError> {
        let items = self.list()?;
        if self.current != Token::Eof {
            return Err(self.unexpected("end of input"));
        }
        Ok(items)
    }
}

fn required(
    items: &[(String, GmlValue)],
    element: &'static str,
    key: &'static str,
) -> Result<String, GmlParseError> {
    items
        .iter()
        .find(|(k, _)| k == key)
        .and_then(|(_, v)| v.as_scalar())
        .map(str::to_string)
        .ok_or(GmlParseError::MissingKey { element, key })
}

fn build_node(items: Vec<(String, GmlValue)>) -> Result<GmlNode, GmlParseError> {
    let id = required(&items, "node", "id")?;
    let attributes = items.into_iter().filter(|(k, _)| k != "id").collect();
    Ok(GmlNode { id, attributes })
}

fn build_edge(items: Vec<(String, GmlValue)>) -> Result<GmlEdge, GmlParseError> {
    let source = required(&items, "edge", "source")?;
    let target = required(&items, "edge", "target")?;
    let attributes = items
        .into_iter()
        .filter(|(k, _)| k != "source" && k != "target")
        .collect();
    Ok(GmlEdge {
        source,
        target,
        attributes,
    })
}

/// Parse GML text containing a top-level `graph [ ... ]` block
pub fn parse_gml_str(content: &str) -> Result<GmlGraph, GmlParseError> {
    let mut parser = Parser::new(content)?;
    let document = parser.document()?;

    let body = document
        .into_iter()
        .find_map(|(k, v)| match v {
            GmlValue::List(items) if k == "graph" => Some(items),
            _ => None,
        })
        .ok_or(GmlParseError::MissingKey {
            element: "document",
            key: "graph",
        })?;

    let mut graph = GmlGraph::default();
    for (key, value) in body {
        match value {
            GmlValue::List(items) if key == "node" => graph.nodes.push(build_node(items)?),
            GmlValue::List(items) if key == "edge" => graph.edges.push(build_edge(items)?),
            value => graph.attributes.push((key, value)),
        }
    }

    log::debug!(
        "Parsed GML graph: {} nodes, {} edges",
        graph.nodes.len(),
        graph.edges.len()
    );
    Ok(graph)
}

/// Parse a GML file and return a GmlGraph object
pub fn parse_gml_file(path: &Path) -> Result<GmlGraph, ExportError> {
    let content = fs::read_to_string(path).map_err(|e| ExportError::io(path, e))?;
    Ok(parse_gml_str(&content)?)
}
