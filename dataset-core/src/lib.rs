//! # dataset-core: Construtor de Dataset NLU
//!
//! Este crate transforma frases digitadas à mão, seus sentimentos e as entidades
//! (personagens) mencionadas nelas em um documento de treinamento no formato
//! `rasa_nlu`. Ele atende um único autor curando um dataset pequeno.
//!
//! ## Arquitetura do Sistema
//!
//! O dado flui das folhas para o orquestrador:
//!
//! 1.  **Normalização** ([`text`]): frases e gatilhos em minúsculas, nomes em maiúsculas.
//! 2.  **Localização** ([`locator`]): offset do gatilho dentro da frase.
//! 3.  **Construção** ([`entry`]): um [`TrainingExample`] com seus [`EntitySpan`]s.
//! 4.  **Montagem** ([`assembler`]): sessões de criação e emenda, lendo de um [`LineSource`].
//! 5.  **Sinônimos** ([`synonyms`]): reescrita da seção `entity_synonyms`.
//! 6.  **Saída**: o [`DatasetDocument`] gravado atomicamente em disco ([`document`]).
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use dataset_core::{collect_examples, DatasetDocument, ScriptedLines, SessionConfig};
//!
//! let mut document = DatasetDocument::new();
//! let mut input = ScriptedLines::new(["May the Force be with you", "1", "FORCE", "force", "", "quit"]);
//!
//! collect_examples(&mut input, &mut document, &SessionConfig::default()).unwrap();
//!
//! let span = &document.examples()[0].entities()[0];
//! assert_eq!((span.start, span.end), (8, 13));
//! ```

pub mod assembler;
pub mod document;
pub mod entry;
pub mod error;
pub mod input;
pub mod locator;
pub mod summary;
pub mod synonyms;
pub mod text;

pub use assembler::{collect_examples, create_document, splice_document, InvalidEntryPolicy, SessionConfig, SessionReport};
pub use document::{DatasetDocument, SynonymRecord};
pub use entry::{build_entry, EntitySpan, Sentiment, TrainingExample};
pub use error::{DatasetError, Result};
pub use input::{LineSource, PromptedLines, ScriptedLines};
pub use synonyms::{read_synonyms, write_synonym_section};
