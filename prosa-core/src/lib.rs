//! # prosa-core — Processamento de Texto em Inglês com Modelos Pré-treinados
//!
//! Esta crate implementa um pipeline composável que, a partir de um bloco de
//! texto bruto em inglês, produz:
//! - **Sentenças** — detecção de fronteiras via algoritmo Punkt
//! - **Tokens com POS tags** — Averaged Perceptron sobre features esparsas
//! - **Entidades nomeadas** — classificador MaxEnt + agrupamento IOB
//!
//! ## Fluxo do Pipeline
//!
//! ```text
//! Texto → Segmentador → [Sentence] → Tokenizador → [Token]
//!       → Tagger → [Token + tag] → Classificador → [Token + label]
//!       → Chunker → [Entity]
//! ```
//!
//! Os três estágios estatísticos consomem tabelas pré-treinadas imutáveis
//! (ver [`Model`]); não há treinamento em tempo de execução.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use prosa_core::{Document, Model};
//!
//! let model = Model::embedded().unwrap();
//! let doc = Document::new("Barack Obama visited Paris in 2015.", &model).unwrap();
//!
//! assert_eq!(doc.sentences().len(), 1);
//! assert!(doc.entities().iter().any(|e| e.text == "Barack Obama"));
//! ```

pub mod assets;
pub mod chunker;
pub mod document;
pub mod error;
pub mod maxent;
pub mod model;
pub mod perceptron;
pub mod segmenter;
pub mod token;
pub mod tokenizer;

pub use document::{Document, DocumentConfig};
pub use error::{ProsaError, Result};
pub use model::Model;
pub use token::{Entity, Sentence, Token};
