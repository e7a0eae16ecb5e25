//! parse task document with structure like
//! ```text
//! title1
//! key1: value1 value2
//! title2
//! 1.0 2,5 3
//! ```
//! i.e. sections made of a title line, "key: values" lines and lines of whitespace-separated numbers.
//! A comma inside a number is taken as a decimal separator.
/*
 every line is one of three kinds: a title (one word), a key-value pair (word, colon, values)
 or a row of numbers. Lines starting with //, #, % or ; are comments.
*/
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{alpha1, alphanumeric1, space0, space1},
    combinator::{all_consuming, map, map_res, recognize},
    multi::{many0, separated_list0, separated_list1},
    sequence::{delimited, pair, separated_pair},
};
use std::collections::HashMap;
use std::fmt::Display;

pub type SectionMap = HashMap<String, Vec<Value>>;
pub type DocumentMap = HashMap<String, Section>;

/// enum to represent different value types:
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Float(f64),
    Integer(i64),
    Boolean(bool),
}

impl Value {
    pub fn as_string(&self) -> Option<&String> {
        if let Value::String(s) = self {
            Some(s)
        } else {
            None
        }
    }
    /// integers are floats too
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        if let Value::Integer(i) = self {
            Some(*i)
        } else {
            None
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        if let Value::Boolean(b) = self {
            Some(*b)
        } else {
            None
        }
    }
    pub fn to_string_value(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Float(f) => f.to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Boolean(b) => b.to_string(),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_value())
    }
}

/// section of the document: key-value pairs and rows of numbers in order of appearance
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Section {
    pub pairs: SectionMap,
    pub rows: Vec<Vec<f64>>,
}

impl Section {
    pub fn get(&self, key: &str) -> Option<&Vec<Value>> {
        self.pairs.get(key)
    }
    /// first value of the key
    pub fn first(&self, key: &str) -> Option<&Value> {
        self.pairs.get(key).and_then(|values| values.first())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Line {
    Title(String),
    Pair(String, Vec<Value>),
    Numbers(Vec<f64>),
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | ',' | 'e' | 'E')
}

/// "0,5" and "0.5" are the same number; "nan" and "inf" are not numbers
pub fn parse_number(s: &str) -> Result<f64, String> {
    let s = s.trim();
    if !s.chars().all(is_number_char) {
        return Err(format!("'{}' is not a number", s));
    }
    s.replace(',', ".")
        .parse::<f64>()
        .map_err(|_| format!("'{}' is not a number", s))
}

fn identifier(input: &str) -> IResult<&str, String> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    let mut parser = map(parser, String::from);
    parser.parse(input)
}

/// Parses a title (word characters without spaces)
pub(crate) fn parse_title(input: &str) -> IResult<&str, String> {
    identifier(input)
}

/// Parses a key (word characters without spaces)
pub(crate) fn parse_key(input: &str) -> IResult<&str, String> {
    identifier(input)
}

pub(crate) fn parse_value(input: &str) -> IResult<&str, Value> {
    // a single value ends at whitespace or semicolon
    let value_parser = take_while1(|c: char| !matches!(c, ' ' | '\t' | '\n' | '\r' | ';'));
    let mut value_parser = map_res(value_parser, |s: &str| -> Result<Value, String> {
        // Try parsing as different types in order
        if let Ok(val) = s.parse::<i64>() {
            Ok(Value::Integer(val))
        } else if let Ok(val) = parse_number(s) {
            Ok(Value::Float(val))
        } else if let Ok(val) = s.parse::<bool>() {
            Ok(Value::Boolean(val))
        } else {
            Ok(Value::String(s.to_string()))
        }
    });
    value_parser.parse(input)
}

pub(crate) fn parse_value_list(input: &str) -> IResult<&str, Vec<Value>> {
    let mut value_parser = separated_list0(space1, parse_value);
    value_parser.parse(input)
}

/// Parses "key: value1 value2"
pub(crate) fn parse_key_value_pair(input: &str) -> IResult<&str, (String, Vec<Value>)> {
    let colon_separator = delimited(space0, tag(":"), space0);
    let mut parser = separated_pair(parse_key, colon_separator, parse_value_list);
    parser.parse(input)
}

fn number(input: &str) -> IResult<&str, f64> {
    let token = take_while1(is_number_char);
    let mut parser = map_res(token, parse_number);
    parser.parse(input)
}

/// Parses whitespace-separated numbers
pub(crate) fn parse_number_row(input: &str) -> IResult<&str, Vec<f64>> {
    let mut parser = separated_list1(space1, number);
    parser.parse(input)
}

/// the whole line must be whitespace-separated numbers
pub fn parse_numbers(line: &str) -> Result<Vec<f64>, String> {
    let mut parser = all_consuming(delimited(space0, parse_number_row, space0));
    parser
        .parse(line)
        .map(|(_, row)| row)
        .map_err(|_| format!("'{}' is not a row of numbers", line.trim()))
}

pub(crate) fn parse_line(input: &str) -> IResult<&str, Line> {
    let line = alt((
        map(parse_key_value_pair, |(key, values)| Line::Pair(key, values)),
        map(parse_number_row, Line::Numbers),
        map(parse_title, Line::Title),
    ));
    let mut parser = all_consuming(delimited(space0, line, space0));
    parser.parse(input)
}

pub(crate) fn is_comment(line: &str) -> bool {
    line.starts_with("//") || line.starts_with('#') || line.starts_with('%') || line.starts_with(';')
}

/// Parses the entire document into a HashMap of sections
pub fn parse_document(input: &str) -> Result<DocumentMap, String> {
    let mut result: DocumentMap = HashMap::new();
    let mut current: Option<String> = None;
    for (line_number, raw_line) in input.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || is_comment(line) {
            continue;
        }
        let (_, parsed) = parse_line(line).map_err(|e| {
            format!("Parsing error in line {}: '{}' ({:?})", line_number + 1, line, e)
        })?;
        match parsed {
            Line::Title(title) => {
                result.entry(title.clone()).or_default();
                current = Some(title);
            }
            Line::Pair(key, values) => {
                let title = current
                    .as_ref()
                    .ok_or_else(|| format!("key '{}' outside of any section", key))?;
                if let Some(section) = result.get_mut(title) {
                    section.pairs.insert(key, values);
                }
            }
            Line::Numbers(row) => {
                let title = current
                    .as_ref()
                    .ok_or_else(|| format!("numbers in line {} outside of any section", line_number + 1))?;
                if let Some(section) = result.get_mut(title) {
                    section.rows.push(row);
                }
            }
        }
    }
    if result.is_empty() {
        return Err("document has no sections".to_string());
    }
    Ok(result)
}
