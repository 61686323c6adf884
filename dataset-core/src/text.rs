//! # Normalização de Caixa
//!
//! Frases e gatilhos são guardados em minúsculas; nomes canônicos de entidades
//! em maiúsculas. Caracteres não alfabéticos passam inalterados.

/// Converte todo o texto para minúsculas.
pub fn to_lower(s: &str) -> String {
    s.to_lowercase()
}

/// Converte todo o texto para maiúsculas.
pub fn to_upper(s: &str) -> String {
    s.to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_folding() {
        assert_eq!(to_lower("May The FORCE"), "may the force");
        assert_eq!(to_upper("luke skywalker"), "LUKE SKYWALKER");
    }

    #[test]
    fn test_non_alphabetic_passthrough() {
        assert_eq!(to_lower("R2-D2, 3PO!"), "r2-d2, 3po!");
        assert_eq!(to_upper("  tab\tend "), "  TAB\tEND ");
        assert_eq!(to_lower(""), "");
    }

    #[test]
    fn test_accented_letters() {
        assert_eq!(to_lower("SÃO PAULO"), "são paulo");
        assert_eq!(to_upper("ação"), "AÇÃO");
    }
}
