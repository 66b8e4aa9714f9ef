//! Literal leaves.
//!
//! Constants are written as one token whose suffix carries the type:
//! `1` is `Int32`, `1u8` is `Uint8`, `1.5f64` is `Float64`, `3ci` is `C_int`,
//! `"text"` is `String` and `"text"c` is a C string. Comments are one
//! `// line` token per line.

use hl_ir::types::{
    create_c_string_type, create_default_type_reference, is_c_string, parse_integer_type,
};
use hl_ir::{ConstantExpression, FundamentalType, IntegerType, TypeReference};

use crate::error::{ConvertError, ConvertResult};

const C_SUFFIXES: [(&str, FundamentalType); 11] = [
    ("cb", FundamentalType::CBool),
    ("cc", FundamentalType::CChar),
    ("cs", FundamentalType::CShort),
    ("ci", FundamentalType::CInt),
    ("cl", FundamentalType::CLong),
    ("cll", FundamentalType::CLonglong),
    ("cuc", FundamentalType::CUchar),
    ("cus", FundamentalType::CUshort),
    ("cui", FundamentalType::CUint),
    ("cul", FundamentalType::CUlong),
    ("cull", FundamentalType::CUlonglong),
];

const COMMENT_PREFIX: &str = "//";

pub(crate) fn constant_to_word(constant: &ConstantExpression) -> ConvertResult<String> {
    let data = &constant.data;
    match &constant.type_reference {
        TypeReference::Integer(integer_type) => {
            if integer_type.is_signed && integer_type.number_of_bits == 32 {
                Ok(data.clone())
            } else {
                let sign = if integer_type.is_signed { 'i' } else { 'u' };
                Ok(format!("{data}{sign}{}", integer_type.number_of_bits))
            }
        }
        TypeReference::Fundamental(fundamental_type) => match fundamental_type {
            FundamentalType::Bool => Ok(data.clone()),
            FundamentalType::Float16 => Ok(format!("{data}f16")),
            FundamentalType::Float32 => Ok(format!("{data}f32")),
            FundamentalType::Float64 => Ok(format!("{data}f64")),
            FundamentalType::String => Ok(format!("\"{data}\"")),
            other => C_SUFFIXES
                .iter()
                .find(|(_, fundamental_type)| fundamental_type == other)
                .map(|(suffix, _)| format!("{data}{suffix}"))
                .ok_or(ConvertError::Unrenderable("constant of a type without literal suffix")),
        },
        type_reference if is_c_string(type_reference) => Ok(format!("\"{data}\"c")),
        _ => Err(ConvertError::Unrenderable("constant of a non-scalar type")),
    }
}

pub(crate) fn word_to_constant(word: &str) -> ConvertResult<ConstantExpression> {
    let invalid = || ConvertError::InvalidConstant(word.to_owned());
    let constant = |type_reference, data: &str| ConstantExpression {
        type_reference,
        data: data.to_owned(),
    };

    if let Some(quoted) = word.strip_prefix('"') {
        if let Some(data) = quoted.strip_suffix("\"c") {
            return Ok(constant(create_c_string_type(), data));
        }
        return quoted
            .strip_suffix('"')
            .map(|data| constant(TypeReference::Fundamental(FundamentalType::String), data))
            .ok_or_else(invalid);
    }

    if word == "true" || word == "false" {
        return Ok(constant(TypeReference::Fundamental(FundamentalType::Bool), word));
    }

    let split = word
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(word.len());
    let (data, suffix) = word.split_at(split);
    if !data.bytes().any(|byte| byte.is_ascii_digit()) {
        return Err(invalid());
    }

    let type_reference = match suffix {
        "" => create_default_type_reference(),
        "f16" => TypeReference::Fundamental(FundamentalType::Float16),
        "f32" => TypeReference::Fundamental(FundamentalType::Float32),
        "f64" => TypeReference::Fundamental(FundamentalType::Float64),
        _ => parse_integer_suffix(suffix)
            .map(TypeReference::Integer)
            .or_else(|| {
                C_SUFFIXES
                    .iter()
                    .find(|(c_suffix, _)| *c_suffix == suffix)
                    .map(|(_, fundamental_type)| TypeReference::Fundamental(*fundamental_type))
            })
            .ok_or_else(invalid)?,
    };

    Ok(constant(type_reference, data))
}

/// `i8`, `u64`, ... as the integer type they stand for.
fn parse_integer_suffix(suffix: &str) -> Option<IntegerType> {
    if let Some(bits) = suffix.strip_prefix('i') {
        parse_integer_type(&format!("Int{bits}"))
    } else {
        parse_integer_type(&format!("Uint{}", suffix.strip_prefix('u')?))
    }
}

/// One `//` token per line; empty lines become a bare `//`.
pub(crate) fn comment_to_words(comment: &str) -> Vec<String> {
    comment
        .split('\n')
        .map(|line| {
            if line.is_empty() {
                COMMENT_PREFIX.to_owned()
            } else {
                format!("{COMMENT_PREFIX} {line}")
            }
        })
        .collect()
}

pub(crate) fn words_to_comment<'a>(words: impl IntoIterator<Item = &'a str>) -> String {
    words
        .into_iter()
        .flat_map(|word| word.split('\n'))
        .map(|line| {
            let line = line.strip_prefix(COMMENT_PREFIX).unwrap_or(line);
            line.strip_prefix(' ').unwrap_or(line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
