//! Whole-word replacement of constant names by their values.

use crate::constants::ConstantTable;
use crate::lexer::is_word_char;

/// Replace every whole-word occurrence of a known constant in `expr` with
/// its value.
///
/// A word is a maximal run of alphanumeric characters and `_`, so `K` is
/// not replaced inside `K2`, `MaxK`, or `2K`. Unknown identifiers are kept
/// verbatim. Negative values are parenthesised so that `s^K` stays a power
/// of the whole value.
///
/// Replacement text never contains word characters adjacent to the
/// surrounding input, so the result does not depend on the order in which
/// constants are applied.
pub fn substitute(expr: &str, constants: &ConstantTable) -> String {
    let mut out = String::with_capacity(expr.len());
    let mut word_start: Option<usize> = None;

    for (i, c) in expr.char_indices() {
        if is_word_char(c) {
            if word_start.is_none() {
                word_start = Some(i);
            }
            continue;
        }
        if let Some(start) = word_start.take() {
            push_word(&mut out, &expr[start..i], constants);
        }
        out.push(c);
    }
    if let Some(start) = word_start {
        push_word(&mut out, &expr[start..], constants);
    }

    out
}

fn push_word(out: &mut String, word: &str, constants: &ConstantTable) {
    match constants.get(word) {
        Ok(value) => out.push_str(&format_value(value)),
        Err(_) => out.push_str(word),
    }
}

/// Literal text for a constant value.
pub fn format_value(value: f64) -> String {
    if value.is_sign_negative() {
        format!("({value})")
    } else {
        format!("{value}")
    }
}
