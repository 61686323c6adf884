//! # Localizador de Substrings
//!
//! Encontra a primeira ocorrência (mais à esquerda) de um gatilho dentro de uma frase.
//!
//! ## Algoritmo
//! 1. Percorre cada posição inicial candidata `i` de `0` até `len(frase) - len(gatilho)`.
//! 2. Compara o gatilho caractere a caractere com `frase[i .. i + len(gatilho)]`.
//! 3. Retorna o primeiro `i` em que todos os caracteres coincidem.
//!
//! Os offsets são contados em **caracteres** (valores escalares Unicode), não em bytes,
//! que é o que o pipeline de treinamento espera nos campos `start`/`end`.
//! A comparação é sensível a caixa: quem chama normaliza os dois lados antes.

/// Retorna o offset (em caracteres) da primeira ocorrência de `trigger` em `phrase`.
///
/// Um gatilho vazio casa trivialmente no offset `0`.
/// Retorna `None` se o gatilho for maior que a frase ou não ocorrer nela.
///
/// # Exemplo
/// ```rust
/// use dataset_core::locator::find_substring;
///
/// assert_eq!(find_substring("may the force be with you", "force"), Some(8));
/// assert_eq!(find_substring("hello", "world"), None);
/// ```
pub fn find_substring(phrase: &str, trigger: &str) -> Option<usize> {
    let haystack: Vec<char> = phrase.chars().collect();
    let needle: Vec<char> = trigger.chars().collect();

    if needle.len() > haystack.len() {
        return None;
    }

    (0..=haystack.len() - needle.len()).find(|&i| haystack[i..i + needle.len()] == needle[..])
}

/// Quantidade de caracteres do texto (a mesma unidade usada pelos offsets).
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
