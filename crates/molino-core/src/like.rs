//! Patrones LIKE independientes del backend.
//!
//! El comodín agnóstico es `*`. Cada backend decide con qué token nativo lo
//! reemplaza (`%` en SQL, `.*` dentro de una regex documental). Los literales
//! pasan tal cual: un `%` o `_` ya presente en la entrada NO se escapa y el
//! backend lo interpretará como comodín propio.

/// Comodín aceptado en los valores de `filter_like` / `filter_not_like`.
pub const LIKE_WILDCARD: char = '*';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LikeSegment {
    Literal(String),
    Wildcard,
}

/// Divide `value` en literales y comodines conservando el orden original.
pub fn parse_like_pattern(value: &str) -> Vec<LikeSegment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    for c in value.chars() {
        if c == LIKE_WILDCARD {
            if !literal.is_empty() {
                segments.push(LikeSegment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(LikeSegment::Wildcard);
        } else {
            literal.push(c);
        }
    }
    if !literal.is_empty() {
        segments.push(LikeSegment::Literal(literal));
    }
    segments
}

/// Reconstruye `value` sustituyendo cada comodín por `wildcard_token`.
pub fn build_like_value(value: &str, wildcard_token: &str) -> String {
    parse_like_pattern(value).into_iter()
                             .fold(String::with_capacity(value.len()), |mut out, segment| {
                                 match segment {
                                     LikeSegment::Literal(text) => out.push_str(&text),
                                     LikeSegment::Wildcard => out.push_str(wildcard_token),
                                 }
                                 out
                             })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_literals_and_wildcards() {
        let segments = parse_like_pattern("*ab**c");
        assert_eq!(segments,
                   vec![LikeSegment::Wildcard,
                        LikeSegment::Literal("ab".into()),
                        LikeSegment::Wildcard,
                        LikeSegment::Wildcard,
                        LikeSegment::Literal("c".into())]);
        assert!(parse_like_pattern("").is_empty());
    }

    #[test]
    fn build_maps_wildcards_to_token() {
        assert_eq!(build_like_value("a*b*c", "%"), "a%b%c");
        assert_eq!(build_like_value("abc", "%"), "abc");
        assert_eq!(build_like_value("*ñandú*", ".*"), ".*ñandú.*");
    }

    #[test]
    fn build_passes_native_wildcards_through() {
        assert_eq!(build_like_value("50%_off*", "%"), "50%_off%");
    }
}
