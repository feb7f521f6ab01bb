//! # Documento — Orquestração do Pipeline
//!
//! Um [`Document`] é construído em uma única chamada e fica somente-leitura:
//! o texto atravessa os estágios em linha reta, cada um consumindo a saída
//! do anterior, sem retroalimentação.
//!
//! ```text
//! texto → segmentador → tokenizador (por sentença) → tagger → classificador → chunker
//! ```
//!
//! A configuração liga e desliga estágios, com dependências forçadas:
//! etiquetar ou extrair exige tokenizar, e extrair exige etiquetar — um
//! token sem POS tag nunca chega ao classificador.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::chunker;
use crate::error::Result;
use crate::maxent::EntityExtractor;
use crate::model::Model;
use crate::perceptron::PerceptronTagger;
use crate::segmenter::SentenceSegmenter;
use crate::token::{Entity, Sentence, Token};
use crate::tokenizer::TreebankWordTokenizer;

/// Quais estágios do pipeline rodar. O default liga tudo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Tokenização em palavras. Forçada quando `tag` ou `extract` estão
    /// ligados.
    pub tokenize: bool,
    /// POS tagging. Forçado quando `extract` está ligado.
    pub tag: bool,
    /// Extração de entidades nomeadas.
    pub extract: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            tokenize: true,
            tag: true,
            extract: true,
        }
    }
}

impl DocumentConfig {
    /// Resolve as dependências entre estágios.
    fn effective(self) -> Self {
        let tag = self.tag || self.extract;
        Self {
            tokenize: self.tokenize || tag,
            tag,
            extract: self.extract,
        }
    }
}

/// Um corpo de texto analisado. Os acessores expõem as saídas de cada
/// estágio; nada é recalculado depois da construção.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    text: String,
    sentences: Vec<Sentence>,
    tokens: Vec<Token>,
    entities: Vec<Entity>,
}

impl Document {
    /// Constrói um documento com o pipeline completo.
    pub fn new(text: &str, model: &Model) -> Result<Self> {
        Self::with_config(text, model, DocumentConfig::default())
    }

    /// Constrói um documento com os estágios escolhidos.
    pub fn with_config(text: &str, model: &Model, config: DocumentConfig) -> Result<Self> {
        let config = config.effective();

        let sentences = SentenceSegmenter::new(&model.punkt).segment(text);

        let mut tokens = Vec::new();
        if config.tokenize {
            let tokenizer = TreebankWordTokenizer::new();
            for sentence in &sentences {
                tokens.extend(tokenizer.tokenize(&sentence.text));
            }
        }
        if config.tag {
            tokens = PerceptronTagger::new(&model.tagger).tag(&tokens)?;
        }
        let entities = if config.extract {
            tokens = EntityExtractor::new(&model.classifier).classify(&tokens)?;
            chunker::tokens_to_entities(&tokens)
        } else {
            Vec::new()
        };

        Ok(Self {
            text: text.to_string(),
            sentences,
            tokens,
            entities,
        })
    }

    /// Constrói vários documentos em paralelo, compartilhando o mesmo modelo.
    /// O paralelismo é entre documentos; dentro de cada um a decodificação
    /// continua sequencial.
    pub fn batch(texts: &[&str], model: &Model) -> Result<Vec<Self>> {
        texts
            .par_iter()
            .map(|text| Self::new(text, model))
            .collect()
    }

    /// O texto original, intacto.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// As sentenças detectadas, na ordem do texto.
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Os tokens, na ordem do texto, com as anotações dos estágios ligados.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// As entidades extraídas, na ordem de primeira ocorrência.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> Model {
        Model::embedded().unwrap()
    }

    fn tags<'a>(doc: &'a Document, text: &str) -> Option<&'a str> {
        doc.tokens()
            .iter()
            .find(|t| t.text == text)
            .map(|t| t.tag.as_str())
    }

    #[test]
    fn test_empty_text_yields_empty_document() {
        let m = model();
        let doc = Document::new("", &m).unwrap();
        assert!(doc.sentences().is_empty());
        assert!(doc.tokens().is_empty());
        assert!(doc.entities().is_empty());
    }

    #[test]
    fn test_single_word_text() {
        let m = model();
        let doc = Document::new("Paris", &m).unwrap();
        assert_eq!(doc.sentences().len(), 1);
        assert_eq!(doc.tokens().len(), 1);
        assert!(doc.entities().len() <= 1);
    }

    #[test]
    fn test_go_sentence() {
        let m = model();
        let doc = Document::new("Go is a programming language.", &m).unwrap();

        assert_eq!(doc.sentences().len(), 1);
        assert_eq!(tags(&doc, "Go"), Some("NNP"));
        assert_eq!(tags(&doc, "."), Some("."));
        assert!(doc.entities().iter().any(|e| e.text == "Go"));
    }

    #[test]
    fn test_obama_sentence() {
        let m = model();
        let doc = Document::new("Barack Obama visited Paris in 2015.", &m).unwrap();

        let got: Vec<(&str, &str)> = doc
            .entities()
            .iter()
            .map(|e| (e.text.as_str(), e.label.as_str()))
            .collect();
        assert!(got.contains(&("Barack Obama", "PERSON")));
        assert!(got.contains(&("Paris", "GPE")));
        assert_eq!(tags(&doc, "2015"), Some("CD"));
    }

    #[test]
    fn test_abbreviation_and_person() {
        let m = model();
        let doc = Document::new("Mr. Smith went to Washington. He smiled.", &m).unwrap();

        assert_eq!(doc.sentences().len(), 2);
        assert_eq!(tags(&doc, "Smith"), Some("NNP"));
        assert!(doc
            .entities()
            .iter()
            .any(|e| e.text == "Smith" && e.label == "PERSON"));
    }

    #[test]
    fn test_us_senate_single_span() {
        let m = model();
        let doc = Document::new("The U.S. Senate met.", &m).unwrap();

        assert_eq!(doc.sentences().len(), 1);
        assert!(doc.entities().iter().any(|e| e.text == "U.S. Senate"));
    }

    #[test]
    fn test_arithmetic_has_no_entities() {
        let m = model();
        let doc = Document::new("1 + 2 = 3", &m).unwrap();

        assert_eq!(tags(&doc, "1"), Some("CD"));
        assert_eq!(tags(&doc, "+"), Some("SYM"));
        assert!(doc.entities().is_empty());
    }

    #[test]
    fn test_every_token_is_fully_annotated() {
        let m = model();
        let doc = Document::new("Mr. Smith went to Washington. He smiled.", &m).unwrap();
        assert!(!doc.tokens().is_empty());
        for tok in doc.tokens() {
            assert!(!tok.tag.is_empty(), "token sem tag: {:?}", tok.text);
            assert!(!tok.label.is_empty(), "token sem label: {:?}", tok.text);
        }
    }

    #[test]
    fn test_token_count_matches_per_sentence_tokenization() {
        let m = model();
        let text = "Mr. Smith went to Washington. He smiled.";
        let doc = Document::new(text, &m).unwrap();

        let tokenizer = TreebankWordTokenizer::new();
        let expected: usize = doc
            .sentences()
            .iter()
            .map(|s| tokenizer.tokenize(&s.text).len())
            .sum();
        assert_eq!(doc.tokens().len(), expected);
    }

    #[test]
    fn test_entities_map_back_to_token_spans() {
        let m = model();
        let doc = Document::new("Barack Obama visited Paris in 2015.", &m).unwrap();
        let texts: Vec<&str> = doc.tokens().iter().map(|t| t.text.as_str()).collect();

        for entity in doc.entities() {
            let parts: Vec<&str> = entity.text.split(' ').collect();
            let found = texts
                .windows(parts.len())
                .any(|window| window == parts.as_slice());
            assert!(found, "entidade sem span contíguo: {:?}", entity.text);
        }
    }

    #[test]
    fn test_pipeline_is_deterministic() {
        let m = model();
        let text = "Barack Obama visited Paris in 2015.";
        let a = Document::new(text, &m).unwrap();
        let b = Document::new(text, &m).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_extraction_forces_tagging_and_tokenization() {
        let m = model();
        let config = DocumentConfig {
            tokenize: false,
            tag: false,
            extract: true,
        };
        let doc = Document::with_config("Paris shone.", &m, config).unwrap();
        assert!(!doc.tokens().is_empty());
        for tok in doc.tokens() {
            assert!(!tok.tag.is_empty());
        }
    }

    #[test]
    fn test_tagging_only_leaves_labels_empty() {
        let m = model();
        let config = DocumentConfig {
            tokenize: true,
            tag: true,
            extract: false,
        };
        let doc = Document::with_config("Paris shone.", &m, config).unwrap();
        assert!(doc.entities().is_empty());
        for tok in doc.tokens() {
            assert!(!tok.tag.is_empty());
            assert!(tok.label.is_empty());
        }
    }

    #[test]
    fn test_tokenization_off_disables_everything_downstream() {
        let m = model();
        let config = DocumentConfig {
            tokenize: false,
            tag: false,
            extract: false,
        };
        let doc = Document::with_config("Paris shone.", &m, config).unwrap();
        assert_eq!(doc.sentences().len(), 1);
        assert!(doc.tokens().is_empty());
        assert!(doc.entities().is_empty());
    }

    #[test]
    fn test_batch_matches_individual_runs() {
        let m = model();
        let texts = ["Paris shone.", "Mr. Smith went to Washington. He smiled."];
        let batch = Document::batch(&texts, &m).unwrap();
        assert_eq!(batch.len(), 2);
        for (text, doc) in texts.iter().zip(&batch) {
            assert_eq!(doc, &Document::new(text, &m).unwrap());
        }
    }
}
