//! # Modelo Pré-treinado Agregado
//!
//! Reúne as tabelas dos três estágios estatísticos em um único [`Model`]
//! imutável, construído uma vez e compartilhável entre documentos (inclusive
//! entre threads — nenhum estágio muta as tabelas depois da carga).
//!
//! Duas origens:
//! - [`Model::embedded`] — o modelo default embutido no binário;
//! - [`Model::from_dir`] — tabelas do usuário no layout
//!   `<dir>/AveragedPerceptron/*.json` + `<dir>/Maxent/*.json`. As tabelas
//!   Punkt não participam desse layout e vêm sempre embutidas.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;

use crate::assets;
use crate::error::{ProsaError, Result};
use crate::maxent::MaxentModel;
use crate::perceptron::PerceptronModel;
use crate::segmenter::PunktModel;

/// As tabelas pré-treinadas de todos os estágios do pipeline.
#[derive(Debug, Clone)]
pub struct Model {
    /// Tabelas do segmentador de sentenças.
    pub punkt: PunktModel,
    /// Tabelas do POS tagger.
    pub tagger: PerceptronModel,
    /// Tabelas do classificador de entidades.
    pub classifier: MaxentModel,
}

impl Model {
    /// Carrega o modelo default embutido no binário.
    pub fn embedded() -> Result<Self> {
        let punkt: PunktModel = assets::decode_embedded("Punkt", "english.json")?;

        let weights = assets::decode_embedded("AveragedPerceptron", "weights.json")?;
        let tagdict = assets::decode_embedded("AveragedPerceptron", "tags.json")?;
        let classes: Vec<String> = assets::decode_embedded("AveragedPerceptron", "classes.json")?;
        let tagger = build_tagger(weights, tagdict, classes, "AveragedPerceptron/classes.json")?;

        let mapping = assets::decode_embedded("Maxent", "mapping.json")?;
        let weights = assets::decode_embedded("Maxent", "weights.json")?;
        let labels = assets::decode_embedded("Maxent", "labels.json")?;
        let words: Vec<String> = assets::decode_embedded("Maxent", "words.json")?;
        let classifier = build_classifier(mapping, weights, labels, words, "Maxent")?;

        Ok(Self {
            punkt,
            tagger,
            classifier,
        })
    }

    /// Carrega tagger e classificador de um diretório do usuário.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let punkt: PunktModel = assets::decode_embedded("Punkt", "english.json")?;

        let weights = assets::decode_file(dir, "AveragedPerceptron", "weights.json")?;
        let tagdict = assets::decode_file(dir, "AveragedPerceptron", "tags.json")?;
        let classes: Vec<String> = assets::decode_file(dir, "AveragedPerceptron", "classes.json")?;
        let shown = dir.join("AveragedPerceptron/classes.json").display().to_string();
        let tagger = build_tagger(weights, tagdict, classes, &shown)?;

        let mapping = assets::decode_file(dir, "Maxent", "mapping.json")?;
        let weights = assets::decode_file(dir, "Maxent", "weights.json")?;
        let labels = assets::decode_file(dir, "Maxent", "labels.json")?;
        let words: Vec<String> = assets::decode_file(dir, "Maxent", "words.json")?;
        let shown = dir.join("Maxent").display().to_string();
        let classifier = build_classifier(mapping, weights, labels, words, &shown)?;

        Ok(Self {
            punkt,
            tagger,
            classifier,
        })
    }

    /// Serializa tagger e classificador no layout em disco, pronto para ser
    /// recarregado por [`Model::from_dir`].
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();

        assets::encode_file(dir, "AveragedPerceptron", "weights.json", &self.tagger.weights)?;
        assets::encode_file(dir, "AveragedPerceptron", "tags.json", &self.tagger.tagdict)?;
        let classes: Vec<&String> = self.tagger.classes.iter().collect();
        assets::encode_file(dir, "AveragedPerceptron", "classes.json", &classes)?;

        assets::encode_file(dir, "Maxent", "mapping.json", &self.classifier.mapping)?;
        assets::encode_file(dir, "Maxent", "weights.json", &self.classifier.weights)?;
        assets::encode_file(dir, "Maxent", "labels.json", &self.classifier.labels)?;
        let mut words: Vec<&String> = self.classifier.words.iter().collect();
        words.sort_unstable();
        assets::encode_file(dir, "Maxent", "words.json", &words)?;

        Ok(())
    }
}

/// Monta e valida as tabelas do tagger. Classes vazias tornam qualquer
/// decodificação impossível e são rejeitadas já na carga.
fn build_tagger(
    weights: HashMap<String, HashMap<String, f64>>,
    tagdict: HashMap<String, String>,
    classes: Vec<String>,
    shown: &str,
) -> Result<PerceptronModel> {
    if classes.is_empty() {
        return Err(ProsaError::asset_corrupt(
            shown,
            "conjunto de classes vazio",
        ));
    }
    Ok(PerceptronModel {
        weights,
        tagdict,
        classes: BTreeSet::from_iter(classes),
    })
}

/// Monta e valida as tabelas do classificador: rótulos não podem ser vazios
/// e todo índice do `mapping` precisa apontar para dentro de `weights`.
fn build_classifier(
    mapping: HashMap<String, usize>,
    weights: Vec<f64>,
    labels: Vec<String>,
    words: Vec<String>,
    shown: &str,
) -> Result<MaxentModel> {
    if labels.is_empty() {
        return Err(ProsaError::asset_corrupt(
            format!("{shown}/labels.json"),
            "conjunto de rótulos vazio",
        ));
    }
    if let Some((key, &idx)) = mapping.iter().find(|(_, &idx)| idx >= weights.len()) {
        return Err(ProsaError::asset_corrupt(
            format!("{shown}/mapping.json"),
            format!(
                "índice {idx} da feature {key:?} fora da tabela de pesos (tamanho {})",
                weights.len()
            ),
        ));
    }
    Ok(MaxentModel {
        mapping,
        weights,
        labels,
        words: HashSet::from_iter(words),
    })
}
