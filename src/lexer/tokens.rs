use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, Keyword> = {
        let mut map = HashMap::new();
        map.insert("LIST", Keyword::List);
        map.insert("VAR", Keyword::Var);
        map.insert("VAL", Keyword::Val);
        map.insert("FUN", Keyword::Fun);
        map.insert("DO", Keyword::Do);
        map.insert("END", Keyword::End);
        map.insert("LET", Keyword::Let);
        map.insert("SWITCH", Keyword::Switch);
        map.insert("CASE", Keyword::Case);
        map.insert("DEFAULT", Keyword::Default);
        map.insert("IF", Keyword::If);
        map.insert("ELSE", Keyword::Else);
        map.insert("WHILE", Keyword::While);
        map.insert("RETURN", Keyword::Return);
        map.insert("TRUE", Keyword::True);
        map.insert("FALSE", Keyword::False);
        map.insert("NIL", Keyword::Nil);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Identifier,
    Integer,
    Decimal,
    Character,
    String,
    Operator,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Reserved words. They are lexed as identifiers and picked out by the parser.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Keyword {
    List,
    Var,
    Val,
    Fun,
    Do,
    End,
    Let,
    Switch,
    Case,
    Default,
    If,
    Else,
    While,
    Return,
    True,
    False,
    Nil,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// The literal source text, quotes and escapes included.
    pub value: String,
    /// Byte offset of the first character in the source.
    pub offset: usize,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({}) @ {}", self.kind, self.value, self.offset)
    }
}

impl Token {
    pub fn keyword(&self) -> Option<Keyword> {
        if self.kind == TokenKind::Identifier {
            RESERVED_LOOKUP.get(self.value.as_str()).copied()
        } else {
            None
        }
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.keyword() == Some(keyword)
    }

    pub fn is_operator(&self, operator: &str) -> bool {
        self.kind == TokenKind::Operator && self.value == operator
    }

    /// Offset one past the last byte of this token.
    pub fn end(&self) -> usize {
        self.offset + self.value.len()
    }
}
