//! # Construtor de Exemplos de Treinamento
//!
//! Converte uma frase anotada (frase, sentimento, entidades) em um [`TrainingExample`],
//! a unidade gravada na seção `common_examples` do documento.
//!
//! ## Passos
//! 1. Normaliza a frase para minúsculas.
//! 2. Confere se as listas de nomes e gatilhos têm o mesmo tamanho
//!    (antes de qualquer busca).
//! 3. Para cada par `(nome, gatilho)`, localiza o gatilho na frase com
//!    [`find_substring`] e deriva o [`EntitySpan`].
//! 4. Se algum gatilho não for encontrado, a construção inteira falha:
//!    nenhum exemplo parcial é produzido.
//!
//! ## Exemplo
//! ```rust
//! use dataset_core::entry::{build_entry, Sentiment};
//!
//! let example = build_entry("May the Force be with you", Sentiment::Negative, &["FORCE"], &["force"]).unwrap();
//! assert_eq!(example.text(), "may the force be with you");
//! assert_eq!(example.entities()[0].start, 8);
//! assert_eq!(example.entities()[0].end, 13);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, Result};
use crate::locator::{char_len, find_substring};
use crate::text::{to_lower, to_upper};

/// Rótulo gravado no campo `entity` de todo span.
pub const CHARACTER_ENTITY: &str = "character";

/// Sentimento (intenção) de uma frase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    /// Interpreta o seletor numérico digitado no terminal.
    ///
    /// `0` é negativo; qualquer outro inteiro é positivo.
    /// Texto que não é inteiro gera [`DatasetError::MalformedNumericInput`].
    pub fn from_selector(input: &str) -> Result<Self> {
        let value: i64 = input.trim().parse().map_err(|_| DatasetError::MalformedNumericInput {
            input: input.to_string(),
        })?;
        Ok(if value == 0 { Sentiment::Negative } else { Sentiment::Positive })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
        }
    }
}

/// Uma anotação de entidade ainda não localizada: nome canônico + gatilho.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityAnnotation {
    /// Nome canônico, em maiúsculas (ex: "LUKE").
    pub name: String,
    /// Trecho literal da frase, em minúsculas (ex: "luke").
    pub trigger: String,
}

impl EntityAnnotation {
    pub fn new(name: &str, trigger: &str) -> Self {
        Self {
            name: to_upper(name),
            trigger: to_lower(trigger),
        }
    }
}

/// Intervalo de caracteres de uma entidade dentro da frase.
///
/// Invariante: `end == start + len(gatilho)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntitySpan {
    /// Offset inicial em caracteres (inclusivo).
    pub start: usize,
    /// Offset final em caracteres (exclusivo).
    pub end: usize,
    /// Nome canônico da entidade.
    pub value: String,
    /// Tipo da entidade; sempre [`CHARACTER_ENTITY`].
    pub entity: String,
}

/// Um exemplo de treinamento completo. Imutável depois de construído.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrainingExample {
    text: String,
    intent: Sentiment,
    #[serde(default)]
    entities: Vec<EntitySpan>,
}

impl TrainingExample {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn intent(&self) -> Sentiment {
        self.intent
    }

    pub fn entities(&self) -> &[EntitySpan] {
        &self.entities
    }
}

/// Localiza uma anotação na frase (já normalizada).
fn locate(phrase: &str, annotation: EntityAnnotation) -> Result<EntitySpan> {
    let start = find_substring(phrase, &annotation.trigger).ok_or_else(|| {
        DatasetError::EntityTriggerNotFound {
            trigger: annotation.trigger.clone(),
            phrase: phrase.to_string(),
        }
    })?;

    Ok(EntitySpan {
        start,
        end: start + char_len(&annotation.trigger),
        value: annotation.name,
        entity: CHARACTER_ENTITY.to_string(),
    })
}

/// Constrói um exemplo de treinamento a partir das listas paralelas de nomes e gatilhos.
///
/// A ordem das entidades é preservada. Zero entidades é válido.
pub fn build_entry<N, T>(phrase: &str, sentiment: Sentiment, names: &[N], triggers: &[T]) -> Result<TrainingExample>
where
    N: AsRef<str>,
    T: AsRef<str>,
{
    if names.len() != triggers.len() {
        return Err(DatasetError::MismatchedEntityLists {
            names: names.len(),
            triggers: triggers.len(),
        });
    }

    let annotations: Vec<EntityAnnotation> = names
        .iter()
        .zip(triggers)
        .map(|(name, trigger)| EntityAnnotation::new(name.as_ref(), trigger.as_ref()))
        .collect();

    build_entry_from_annotations(phrase, sentiment, annotations)
}

/// Variante de [`build_entry`] que recebe as anotações já pareadas.
pub fn build_entry_from_annotations(
    phrase: &str,
    sentiment: Sentiment,
    annotations: Vec<EntityAnnotation>,
) -> Result<TrainingExample> {
    let text = to_lower(phrase);
    let entities = annotations
        .into_iter()
        .map(|annotation| locate(&text, annotation))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(text = %text, intent = sentiment.name(), entities = entities.len(), "built training example");

    Ok(TrainingExample {
        text,
        intent: sentiment,
        entities,
    })
}
