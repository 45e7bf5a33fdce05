use cx_tokens::{TokenKind, TokenValue};
use nom::branch::alt;
use nom::bytes::complete::{is_not, tag, take_till, take_while1};
use nom::character::complete::{alpha1, alphanumeric1, anychar, char, digit1};
use nom::combinator::{consumed, cut, map, map_opt, map_res, opt, recognize, value};
use nom::error::{context, VerboseError};
use nom::multi::{many0, many0_count};
use nom::sequence::{pair, preceded, terminated, tuple};
use nom::IResult;
use std::str::{from_utf8, Utf8Error};

type Result<'a, O, E = &'a [u8]> = IResult<&'a [u8], O, VerboseError<E>>;

/// Recognizes exactly one token at the start of `src`, which must not start with insignificant
/// bytes.
///
/// An unterminated string or character literal is reported as a [nom::Err::Failure], every
/// other unrecognized input as a [nom::Err::Error].
pub fn parse_token(src: &[u8]) -> Result<(TokenKind, TokenValue<'_>)> {
    context(
        "token",
        alt((
            parse_name,
            parse_punctuation,
            parse_string,
            parse_char,
            parse_number,
            parse_operator,
        )),
    )(src)
}

/// Recognizes any amount of whitespace and line comments. Comments may hold any byte.
pub fn parse_insignificant(src: &[u8]) -> Result<()> {
    context(
        "insignificant",
        value(
            (),
            many0(alt((
                context(
                    "whitespace",
                    take_while1(|c: u8| matches!(c, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')),
                ),
                context(
                    "line comment",
                    recognize(tuple((
                        tag("//"),
                        take_till(|c: u8| c == b'\n'),
                        opt(char('\n')),
                    ))),
                ),
            ))),
        ),
    )(src)
}

fn name(text: &str) -> (TokenKind, TokenValue<'_>) {
    (TokenKind::Name, TokenValue::Text(text))
}

fn parse_name(src: &[u8]) -> Result<(TokenKind, TokenValue<'_>)> {
    context(
        "name",
        map(
            map_res(
                recognize(pair(
                    alt((alpha1, tag("_"))),
                    many0_count(alt((alphanumeric1, tag("_")))),
                )),
                from_utf8,
            ),
            name,
        ),
    )(src)
}

fn punctuation(c: char) -> Option<TokenKind> {
    let kind = match c {
        '(' => TokenKind::OpenParenthesis,
        ')' => TokenKind::CloseParenthesis,
        '{' => TokenKind::OpenCurly,
        '}' => TokenKind::CloseCurly,
        '[' => TokenKind::OpenSquare,
        ']' => TokenKind::CloseSquare,
        '.' => TokenKind::Dot,
        ',' => TokenKind::Comma,
        ';' => TokenKind::Semicolon,
        ':' => TokenKind::Colon,
        '=' => TokenKind::Equals,
        '<' => TokenKind::LessThan,
        '>' => TokenKind::GreaterThan,
        '!' => TokenKind::Not,
        _ => return None,
    };
    Some(kind)
}

fn parse_punctuation(src: &[u8]) -> Result<(TokenKind, TokenValue<'_>)> {
    context(
        "punctuation",
        map_opt(anychar, |c| {
            let kind = punctuation(c)?;
            Some((kind, TokenValue::Byte(c as u8)))
        }),
    )(src)
}

/// The raw body of a literal delimited by `delimiter`. A backslash escapes the byte after it,
/// which is kept as written.
fn quoted(delimiter: char) -> impl FnMut(&[u8]) -> Result<&[u8]> {
    move |src| {
        let stop = if delimiter == '"' { "\"\\" } else { "'\\" };
        let body = recognize(many0_count(alt((
            is_not(stop),
            recognize(pair(char('\\'), anychar)),
        ))));
        preceded(char(delimiter), cut(terminated(body, char(delimiter))))(src)
    }
}

fn string(body: &[u8]) -> (TokenKind, TokenValue<'_>) {
    (TokenKind::String, TokenValue::Bytes(body))
}

fn character(body: &[u8]) -> (TokenKind, TokenValue<'_>) {
    (TokenKind::Char, TokenValue::Bytes(body))
}

fn parse_string(src: &[u8]) -> Result<(TokenKind, TokenValue<'_>)> {
    context("string literal", map(quoted('"'), string))(src)
}

fn parse_char(src: &[u8]) -> Result<(TokenKind, TokenValue<'_>)> {
    context("character literal", map(quoted('\''), character))(src)
}

/// Decimal digits, wrapping on overflow
fn number(lexeme: &str) -> (TokenKind, TokenValue<'_>) {
    let value = lexeme.bytes().fold(0_i64, |acc, digit| {
        acc.wrapping_mul(10).wrapping_add(i64::from(digit - b'0'))
    });
    (TokenKind::Number, TokenValue::Integer { lexeme, value })
}

fn parse_number(src: &[u8]) -> Result<(TokenKind, TokenValue<'_>)> {
    context("number", map(map_res(digit1, from_utf8), number))(src)
}

fn operator(
    (lexeme, kind): (&[u8], TokenKind),
) -> std::result::Result<(TokenKind, TokenValue<'_>), Utf8Error> {
    Ok((kind, TokenValue::Text(from_utf8(lexeme)?)))
}

fn parse_operator(src: &[u8]) -> Result<(TokenKind, TokenValue<'_>)> {
    context(
        "operator",
        map_res(
            consumed(alt((
                alt((
                    value(TokenKind::PlusEquals, tag("+=")),
                    value(TokenKind::PlusPlus, tag("++")),
                    value(TokenKind::Plus, char('+')),
                    value(TokenKind::MinusEquals, tag("-=")),
                    value(TokenKind::MinusMinus, tag("--")),
                    value(TokenKind::Arrow, tag("->")),
                    value(TokenKind::Minus, char('-')),
                    value(TokenKind::TimesEquals, tag("*=")),
                    value(TokenKind::Asterisk, char('*')),
                    value(TokenKind::DivideEquals, tag("/=")),
                    value(TokenKind::Slash, char('/')),
                )),
                alt((
                    value(TokenKind::AndEquals, tag("&=")),
                    value(TokenKind::LogicAnd, tag("&&")),
                    value(TokenKind::Ampersand, char('&')),
                    value(TokenKind::OrEquals, tag("|=")),
                    value(TokenKind::LogicOr, tag("||")),
                    value(TokenKind::Pipe, char('|')),
                    value(TokenKind::XorEquals, tag("^=")),
                    value(TokenKind::Xor, char('^')),
                    value(TokenKind::ModEquals, tag("%=")),
                    value(TokenKind::Mod, char('%')),
                )),
            ))),
            operator,
        ),
    )(src)
}
