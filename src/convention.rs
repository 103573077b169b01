use convert_case::{Boundary, Case, Converter};

/// The literal every compute function name starts with.
pub const PREFIX: &str = "compute";

/// The literal every compute function name ends with.
pub const SUFFIX: &str = "Attribute";

/// Words of a camel-case token start at each uppercase letter. Digits and
/// runs of capitals are not boundaries on their own.
const BEFORE_UPPER: Boundary = Boundary::Custom { condition: before_upper, start: 1, len: 0 };

fn before_upper(graphemes: &[&str]) -> bool {
    graphemes
        .get(1)
        .and_then(|grapheme| grapheme.chars().next())
        .is_some_and(char::is_uppercase)
}

/// Derive the output field of a compute function from its name.
///
/// `computeTextExcerptAttribute` and `compute_text_excerpt_attribute` both
/// produce `text_excerpt`. A camel-case token is split before every
/// uppercase letter, so `computeAddress2Attribute` writes `address2` and
/// `computeABAttribute` writes `a_b`. A snake-case token is used as is.
/// Returns `None` for names that do not follow the convention, including
/// the bare `computeAttribute` which has no field token.
pub fn output_field(name: &str) -> Option<String> {
    if let Some(token) = snake_token(name) {
        return (!token.is_empty()).then(|| token.to_owned());
    }

    let token = name.strip_prefix(PREFIX)?.strip_suffix(SUFFIX)?;
    if token.is_empty() {
        return None;
    }

    let field = Converter::new()
        .set_boundaries(&[BEFORE_UPPER])
        .to_case(Case::Snake)
        .convert(token);
    Some(field)
}

/// The token of a `compute_..._attribute` name.
fn snake_token(name: &str) -> Option<&str> {
    let rest = name.strip_prefix(PREFIX)?.strip_prefix('_')?;
    if rest == "attribute" {
        return Some("");
    }
    rest.strip_suffix("_attribute")
}
