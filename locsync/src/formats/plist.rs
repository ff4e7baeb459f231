//! Support for XML property lists (`Info.plist`).
//!
//! Only the XML flavour is handled. Scalars that locsync never edits
//! (`<integer>`, `<real>`, `<date>`, `<data>`) keep their text exactly as
//! read, so keys unrelated to localization survive a merge unchanged.

use std::io::{BufRead, Write};

use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::{error::Error, traits::Parser};

const DOCTYPE: &str = r#"plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd""#;

/// A property list whose root is a dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub root: Dictionary,
}

/// A single property list value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    String(String),
    Integer(String),
    Real(String),
    Boolean(bool),
    Date(String),
    Data(String),
    Array(Vec<Value>),
    Dictionary(Dictionary),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }
}

/// Ordered `<dict>`: keys keep their document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: Vec<(String, Value)>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Sets `key`, keeping its position if it already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Parser for Document {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut lexer = Lexer::new(reader);

        match lexer.next_significant()? {
            Token::Open(tag) if tag == "plist" => {}
            other => return Err(unexpected("<plist>", &other)),
        }
        let root = match lexer.next_significant()? {
            Token::Open(tag) if tag == "dict" => parse_dict(&mut lexer)?,
            Token::Empty(tag) if tag == "dict" => Dictionary::new(),
            other => {
                return Err(Error::malformed(format!(
                    "root element is not a dictionary (found {})",
                    describe(&other)
                )));
            }
        };
        match lexer.next_significant()? {
            Token::Close(tag) if tag == "plist" => {}
            other => return Err(unexpected("</plist>", &other)),
        }

        Ok(Document { root })
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        {
            let mut xml_writer = Writer::new_with_indent(&mut writer, b'\t', 1);

            xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
            xml_writer.write_event(Event::DocType(BytesText::from_escaped(DOCTYPE)))?;

            let mut plist = BytesStart::new("plist");
            plist.push_attribute(("version", "1.0"));
            xml_writer.write_event(Event::Start(plist))?;
            write_dict(&mut xml_writer, &self.root)?;
            xml_writer.write_event(Event::End(BytesEnd::new("plist")))?;
        }
        writer.write_all(b"\n")?;
        Ok(())
    }
}

fn write_dict<W: Write>(xml_writer: &mut Writer<W>, dict: &Dictionary) -> Result<(), Error> {
    if dict.is_empty() {
        xml_writer.write_event(Event::Empty(BytesStart::new("dict")))?;
        return Ok(());
    }
    xml_writer.write_event(Event::Start(BytesStart::new("dict")))?;
    for (key, value) in dict.iter() {
        write_text_element(xml_writer, "key", key)?;
        write_value(xml_writer, value)?;
    }
    xml_writer.write_event(Event::End(BytesEnd::new("dict")))?;
    Ok(())
}

fn write_value<W: Write>(xml_writer: &mut Writer<W>, value: &Value) -> Result<(), Error> {
    match value {
        Value::String(text) => write_text_element(xml_writer, "string", text),
        Value::Integer(text) => write_text_element(xml_writer, "integer", text),
        Value::Real(text) => write_text_element(xml_writer, "real", text),
        Value::Date(text) => write_text_element(xml_writer, "date", text),
        Value::Data(text) => write_text_element(xml_writer, "data", text),
        Value::Boolean(flag) => {
            let tag = if *flag { "true" } else { "false" };
            xml_writer.write_event(Event::Empty(BytesStart::new(tag)))?;
            Ok(())
        }
        Value::Array(items) if items.is_empty() => {
            xml_writer.write_event(Event::Empty(BytesStart::new("array")))?;
            Ok(())
        }
        Value::Array(items) => {
            xml_writer.write_event(Event::Start(BytesStart::new("array")))?;
            for item in items {
                write_value(xml_writer, item)?;
            }
            xml_writer.write_event(Event::End(BytesEnd::new("array")))?;
            Ok(())
        }
        Value::Dictionary(dict) => write_dict(xml_writer, dict),
    }
}

/// Characters an XML 1.0 document may contain.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

// Empty text is written as `<tag/>`: an open/close pair would pick up indentation.
fn write_text_element<W: Write>(
    xml_writer: &mut Writer<W>,
    tag: &str,
    text: &str,
) -> Result<(), Error> {
    if let Some(c) = text.chars().find(|c| !is_xml_char(*c)) {
        return Err(Error::UnencodableText(format!(
            "<{}> text contains U+{:04X}, which XML 1.0 does not allow",
            tag, c as u32
        )));
    }
    if text.is_empty() {
        xml_writer.write_event(Event::Empty(BytesStart::new(tag)))?;
        return Ok(());
    }
    xml_writer.write_event(Event::Start(BytesStart::new(tag)))?;
    xml_writer.write_event(Event::Text(BytesText::new(text)))?;
    xml_writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Owned view of the XML events the parser cares about.
#[derive(Debug)]
enum Token {
    Open(String),
    Close(String),
    Empty(String),
    Text(String),
    Eof,
}

struct Lexer<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
}

impl<R: BufRead> Lexer<R> {
    fn new(reader: R) -> Self {
        Lexer {
            reader: Reader::from_reader(reader),
            buf: Vec::new(),
        }
    }

    fn next(&mut self) -> Result<Token, Error> {
        loop {
            self.buf.clear();
            let token = match self.reader.read_event_into(&mut self.buf)? {
                Event::Start(e) => Token::Open(String::from_utf8_lossy(e.name().as_ref()).into_owned()),
                Event::End(e) => Token::Close(String::from_utf8_lossy(e.name().as_ref()).into_owned()),
                Event::Empty(e) => Token::Empty(String::from_utf8_lossy(e.name().as_ref()).into_owned()),
                Event::Text(e) => Token::Text(e.unescape()?.into_owned()),
                Event::CData(e) => Token::Text(
                    String::from_utf8(e.into_inner().into_owned())
                        .map_err(|err| Error::malformed(err.to_string()))?,
                ),
                Event::Eof => Token::Eof,
                // Declaration, doctype, comments and processing instructions.
                _ => continue,
            };
            return Ok(token);
        }
    }

    /// Like [`Lexer::next`], skipping whitespace between elements.
    fn next_significant(&mut self) -> Result<Token, Error> {
        loop {
            match self.next()? {
                Token::Text(text) if text.trim().is_empty() => continue,
                token => return Ok(token),
            }
        }
    }

    /// Collects the text content of `<tag>` up to its closing tag.
    fn read_text(&mut self, tag: &str) -> Result<String, Error> {
        let mut text = String::new();
        loop {
            match self.next()? {
                Token::Text(chunk) => text.push_str(&chunk),
                Token::Close(name) if name == tag => return Ok(text),
                other => return Err(unexpected(&format!("</{}>", tag), &other)),
            }
        }
    }
}

fn parse_dict<R: BufRead>(lexer: &mut Lexer<R>) -> Result<Dictionary, Error> {
    let mut dict = Dictionary::new();
    loop {
        let key = match lexer.next_significant()? {
            Token::Close(tag) if tag == "dict" => return Ok(dict),
            Token::Open(tag) if tag == "key" => lexer.read_text("key")?,
            Token::Empty(tag) if tag == "key" => String::new(),
            other => return Err(unexpected("<key>", &other)),
        };
        if dict.contains_key(&key) {
            return Err(Error::malformed(format!("duplicate key `{}`", key)));
        }
        let token = lexer.next_significant()?;
        let value = parse_value(lexer, token)?;
        dict.insert(key, value);
    }
}

fn parse_array<R: BufRead>(lexer: &mut Lexer<R>) -> Result<Vec<Value>, Error> {
    let mut items = Vec::new();
    loop {
        match lexer.next_significant()? {
            Token::Close(tag) if tag == "array" => return Ok(items),
            token => items.push(parse_value(lexer, token)?),
        }
    }
}

fn parse_value<R: BufRead>(lexer: &mut Lexer<R>, token: Token) -> Result<Value, Error> {
    match token {
        Token::Open(tag) => match tag.as_str() {
            "dict" => Ok(Value::Dictionary(parse_dict(lexer)?)),
            "array" => Ok(Value::Array(parse_array(lexer)?)),
            "true" | "false" => {
                match lexer.next_significant()? {
                    Token::Close(name) if name == tag => {}
                    other => return Err(unexpected(&format!("</{}>", tag), &other)),
                }
                Ok(Value::Boolean(tag == "true"))
            }
            "string" | "integer" | "real" | "date" | "data" => {
                let text = lexer.read_text(&tag)?;
                scalar(&tag, text)
            }
            other => Err(Error::malformed(format!("unsupported element <{}>", other))),
        },
        Token::Empty(tag) => match tag.as_str() {
            "dict" => Ok(Value::Dictionary(Dictionary::new())),
            "array" => Ok(Value::Array(Vec::new())),
            "true" => Ok(Value::Boolean(true)),
            "false" => Ok(Value::Boolean(false)),
            "string" | "integer" | "real" | "date" | "data" => scalar(&tag, String::new()),
            other => Err(Error::malformed(format!("unsupported element <{}/>", other))),
        },
        other => Err(unexpected("a value element", &other)),
    }
}

fn scalar(tag: &str, text: String) -> Result<Value, Error> {
    match tag {
        "string" => Ok(Value::String(text)),
        "integer" => Ok(Value::Integer(text)),
        "real" => Ok(Value::Real(text)),
        "date" => Ok(Value::Date(text)),
        "data" => Ok(Value::Data(text)),
        other => Err(Error::malformed(format!("unsupported element <{}>", other))),
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Open(tag) => format!("<{}>", tag),
        Token::Close(tag) => format!("</{}>", tag),
        Token::Empty(tag) => format!("<{}/>", tag),
        Token::Text(text) => format!("text `{}`", text.trim()),
        Token::Eof => "end of file".to_string(),
    }
}

fn unexpected(expected: &str, found: &Token) -> Error {
    Error::malformed(format!("expected {}, found {}", expected, describe(found)))
}
