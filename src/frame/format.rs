//! Dtype-driven text formatting of labels and values.
//!
//! A [`DtypeFormat`] maps dtypes to patterns. Temporal dtypes take a
//! `strftime` pattern, numeric dtypes take a [`NumberPattern`] such as
//! `"{:,.2f}"` or `"${:.1%}"`.
use std::collections::BTreeMap;
use std::fmt::Write;

use chrono::NaiveTime;
use serde::Deserialize;

use super::dtype::DType;
use super::value::{Value, float_repr};
use crate::common::error::{Error, Result};

/// Ordered `(dtype, pattern)` pairs applied to columns and index levels.
///
/// Every entry whose dtype the data's inferred dtype falls under is applied
/// in order; after a match the data is text, so later numeric or temporal
/// entries no longer match it.
///
/// # Examples
///
/// ```rust
/// use deckframe::frame::{DType, DtypeFormat, Value};
///
/// let format = DtypeFormat::new().with(DType::Float, "{:,.1f}");
/// let out = format.apply(&[Value::Float(1234.56), Value::Null]).unwrap();
/// assert_eq!(out, vec![Value::text("1,234.6"), Value::Null]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>")]
pub struct DtypeFormat {
    entries: Vec<(DType, String)>,
}

impl DtypeFormat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `pattern` for values of `dtype` or any of its subtypes.
    pub fn with(mut self, dtype: DType, pattern: impl Into<String>) -> Self {
        self.entries.push((dtype, pattern.into()));
        self
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(DType, String)] {
        &self.entries
    }

    /// Format `values` per the registered patterns. Missing values pass
    /// through untouched.
    pub fn apply(&self, values: &[Value]) -> Result<Vec<Value>> {
        let mut values = values.to_vec();
        for (dtype, pattern) in &self.entries {
            let inferred = DType::infer(&values);
            if !inferred.is_subtype_of(*dtype) {
                continue;
            }
            if dtype.is_temporal() {
                values = values
                    .iter()
                    .map(|v| strftime(v, pattern))
                    .collect::<Result<_>>()?;
            } else if dtype.is_numeric() {
                let pattern = NumberPattern::parse(pattern)?;
                values = values
                    .iter()
                    .map(|v| {
                        if v.is_null() {
                            Ok(v.clone())
                        } else {
                            pattern.format(v).map(Value::Text)
                        }
                    })
                    .collect::<Result<_>>()?;
            } else {
                return Err(Error::Unimplemented(format!(
                    "cannot format values of dtype {dtype} to strings; \
                     convert them manually before rendering"
                )));
            }
        }
        Ok(values)
    }
}

impl TryFrom<BTreeMap<String, String>> for DtypeFormat {
    type Error = Error;

    fn try_from(map: BTreeMap<String, String>) -> Result<Self> {
        let entries = map
            .into_iter()
            .map(|(dtype, pattern)| Ok((dtype.parse::<DType>()?, pattern)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }
}

impl FromIterator<(DType, String)> for DtypeFormat {
    fn from_iter<T: IntoIterator<Item = (DType, String)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

fn strftime(value: &Value, pattern: &str) -> Result<Value> {
    let mut out = String::new();
    let written = match value {
        Value::Date(d) => write!(out, "{}", d.and_time(NaiveTime::MIN).format(pattern)),
        Value::DateTime(dt) => write!(out, "{}", dt.format(pattern)),
        _ => return Ok(value.clone()),
    };
    written.map_err(|_| Error::Format(format!("invalid date/time pattern {pattern:?}")))?;
    Ok(Value::Text(out))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
    Center,
    /// Padding goes between the sign and the digits
    AfterSign,
}

impl Align {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '<' => Some(Align::Left),
            '>' => Some(Align::Right),
            '^' => Some(Align::Center),
            '=' => Some(Align::AfterSign),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Sign {
    #[default]
    Negative,
    Always,
    Space,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FormatSpec {
    fill: char,
    align: Option<Align>,
    sign: Sign,
    width: usize,
    grouping: Option<char>,
    precision: Option<usize>,
    kind: Option<char>,
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self {
            fill: ' ',
            align: None,
            sign: Sign::Negative,
            width: 0,
            grouping: None,
            precision: None,
            kind: None,
        }
    }
}

/// A numeric format pattern: literal text around one replacement field.
///
/// The field follows the format-spec mini-language
/// `{[0][:[[fill]align][sign][0][width][,|_][.precision][type]]}` with types
/// `d`, `f`, `F`, `e`, `E`, `g`, `G`, `%` or none. `{{` and `}}` are literal
/// braces.
///
/// ```rust
/// use deckframe::frame::{NumberPattern, Value};
///
/// let p = NumberPattern::parse("${:,.2f}M").unwrap();
/// assert_eq!(p.format(&Value::Float(1234.5)).unwrap(), "$1,234.50M");
///
/// let p = NumberPattern::parse("{:.1%}").unwrap();
/// assert_eq!(p.format(&Value::Float(0.256)).unwrap(), "25.6%");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NumberPattern {
    prefix: String,
    suffix: String,
    spec: Option<FormatSpec>,
}

impl NumberPattern {
    pub fn parse(pattern: &str) -> Result<Self> {
        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut field: Option<String> = None;
        let mut chars = pattern.chars().peekable();
        while let Some(c) = chars.next() {
            let literal = match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    '{'
                },
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    '}'
                },
                '{' => {
                    if field.is_some() {
                        return Err(pattern_error(pattern, "more than one replacement field"));
                    }
                    let mut body = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(c) => body.push(c),
                            None => return Err(pattern_error(pattern, "unclosed '{'")),
                        }
                    }
                    field = Some(body);
                    continue;
                },
                '}' => return Err(pattern_error(pattern, "single '}'")),
                c => c,
            };
            if field.is_none() {
                prefix.push(literal);
            } else {
                suffix.push(literal);
            }
        }

        let spec = match field {
            Some(body) => {
                let (arg, spec) = body.split_once(':').unwrap_or((body.as_str(), ""));
                if !arg.is_empty() && arg != "0" {
                    return Err(pattern_error(
                        pattern,
                        "only the positional field {} or {0} is supported",
                    ));
                }
                Some(parse_spec(spec).map_err(|msg| pattern_error(pattern, &msg))?)
            },
            None => None,
        };
        Ok(Self {
            prefix,
            suffix,
            spec,
        })
    }

    /// Format one numeric value.
    pub fn format(&self, value: &Value) -> Result<String> {
        let Some(spec) = &self.spec else {
            return Ok(self.prefix.clone());
        };
        let mut out = String::with_capacity(self.prefix.len() + self.suffix.len() + 16);
        out.push_str(&self.prefix);
        out.push_str(&spec.render(value)?);
        out.push_str(&self.suffix);
        Ok(out)
    }
}

fn pattern_error(pattern: &str, msg: &str) -> Error {
    Error::Format(format!("invalid number pattern {pattern:?}: {msg}"))
}

fn parse_spec(spec: &str) -> std::result::Result<FormatSpec, String> {
    let chars: Vec<char> = spec.chars().collect();
    let mut out = FormatSpec::default();
    let mut i = 0;

    if let Some(align) = chars.get(1).copied().and_then(Align::from_char) {
        out.fill = chars[0];
        out.align = Some(align);
        i = 2;
    } else if let Some(align) = chars.first().copied().and_then(Align::from_char) {
        out.align = Some(align);
        i = 1;
    }

    let sign = match chars.get(i) {
        Some('+') => Some(Sign::Always),
        Some(' ') => Some(Sign::Space),
        Some('-') => Some(Sign::Negative),
        _ => None,
    };
    if let Some(sign) = sign {
        out.sign = sign;
        i += 1;
    }

    if chars.get(i) == Some(&'0') {
        if out.align.is_none() {
            out.fill = '0';
            out.align = Some(Align::AfterSign);
        }
        i += 1;
    }

    let start = i;
    while chars.get(i).is_some_and(char::is_ascii_digit) {
        i += 1;
    }
    if i > start {
        out.width = digits(&chars[start..i])?;
    }

    if let Some(&c @ (',' | '_')) = chars.get(i) {
        out.grouping = Some(c);
        i += 1;
    }

    if chars.get(i) == Some(&'.') {
        i += 1;
        let start = i;
        while chars.get(i).is_some_and(char::is_ascii_digit) {
            i += 1;
        }
        if i == start {
            return Err("format specifier missing precision".to_string());
        }
        out.precision = Some(digits(&chars[start..i])?);
    }

    match &chars[i..] {
        [] => {},
        [c @ ('d' | 'f' | 'F' | 'e' | 'E' | 'g' | 'G' | '%')] => out.kind = Some(*c),
        [c] => return Err(format!("unknown format code '{c}'")),
        rest => {
            return Err(format!(
                "invalid format specifier near {:?}",
                rest.iter().collect::<String>()
            ));
        },
    }
    Ok(out)
}

fn digits(chars: &[char]) -> std::result::Result<usize, String> {
    chars
        .iter()
        .collect::<String>()
        .parse()
        .map_err(|_| "number too large in format specifier".to_string())
}

impl FormatSpec {
    fn render(&self, value: &Value) -> Result<String> {
        let integer = match value {
            Value::Int(i) => Some(*i),
            Value::Bool(b) => Some(*b as i64),
            _ => None,
        };
        let (negative, mut body) = match (integer, self.kind) {
            (Some(i), None | Some('d')) => (i < 0, i.unsigned_abs().to_string()),
            (None, Some('d')) => {
                return Err(Error::Format(format!(
                    "format code 'd' needs an integer value, found {value:?}"
                )));
            },
            _ => {
                let x = value.as_f64().ok_or_else(|| {
                    Error::Format(format!("cannot apply a number pattern to {value:?}"))
                })?;
                (x.is_sign_negative() && !x.is_nan(), self.float_body(x.abs()))
            },
        };

        if let Some(sep) = self.grouping {
            body = group_thousands(&body, sep);
        }
        let sign = match (negative, self.sign) {
            (true, _) => "-",
            (false, Sign::Always) => "+",
            (false, Sign::Space) => " ",
            (false, Sign::Negative) => "",
        };

        let len = sign.chars().count() + body.chars().count();
        if self.width <= len {
            return Ok(format!("{sign}{body}"));
        }
        let pad = self.width - len;
        let fill = |n: usize| std::iter::repeat_n(self.fill, n).collect::<String>();
        Ok(match self.align.unwrap_or(Align::Right) {
            Align::Left => format!("{sign}{body}{}", fill(pad)),
            Align::Right => format!("{}{sign}{body}", fill(pad)),
            Align::Center => format!("{}{sign}{body}{}", fill(pad / 2), fill(pad - pad / 2)),
            Align::AfterSign => format!("{sign}{}{body}", fill(pad)),
        })
    }

    /// Digits of a non-negative float.
    fn float_body(&self, x: f64) -> String {
        let upper = matches!(self.kind, Some('F' | 'E' | 'G'));
        if !x.is_finite() {
            let mut s = if x.is_nan() { "nan" } else { "inf" }.to_string();
            if self.kind == Some('%') {
                s.push('%');
            }
            return if upper { s.to_uppercase() } else { s };
        }
        let s = match (self.kind, self.precision) {
            (Some('f' | 'F'), p) => format!("{:.*}", p.unwrap_or(6), x),
            (Some('e' | 'E'), p) => scientific(x, p.unwrap_or(6)),
            (Some('g' | 'G'), p) => general(x, p.unwrap_or(6), false),
            (Some('%'), p) => format!("{:.*}%", p.unwrap_or(6), x * 100.0),
            (_, None) => float_repr(x),
            (_, Some(p)) => general(x, p, true),
        };
        if upper { s.to_uppercase() } else { s }
    }
}

/// `1.5e+03` style with `precision` mantissa decimals.
fn scientific(x: f64, precision: usize) -> String {
    let s = format!("{x:.precision$e}");
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
        },
        None => s,
    }
}

/// General format: fixed or scientific depending on the exponent, with
/// trailing zeros removed. `keep_point` keeps at least one decimal in
/// fixed notation.
fn general(x: f64, precision: usize, keep_point: bool) -> String {
    let p = precision.max(1);
    let exp = if x == 0.0 {
        0
    } else {
        let sci = format!("{:.*e}", p - 1, x);
        sci.split_once('e')
            .and_then(|(_, e)| e.parse::<i32>().ok())
            .unwrap_or(0)
    };
    if (-4..p as i32).contains(&exp) {
        let decimals = (p as i32 - 1 - exp).max(0) as usize;
        let mut s = format!("{x:.decimals$}");
        if s.contains('.') {
            let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
            s.truncate(trimmed);
        }
        if keep_point && !s.contains('.') {
            s.push_str(".0");
        }
        s
    } else {
        let s = scientific(x, p - 1);
        match s.split_once('e') {
            Some((mantissa, exp)) if mantissa.contains('.') => {
                let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
                format!("{mantissa}e{exp}")
            },
            _ => s,
        }
    }
}

/// Insert `sep` every three digits of the leading integer part.
fn group_thousands(body: &str, sep: char) -> String {
    let end = body
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(body.len());
    let (int_part, rest) = body.split_at(end);
    let mut out = String::with_capacity(body.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(c);
    }
    out.push_str(rest);
    out
}
